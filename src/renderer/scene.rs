//! Scene, HUD and menu drawing
//!
//! Everything here reads `GameState` and issues `Surface` calls. The only
//! mutable state is the renderer's own RNG for shake jitter, so rendering
//! never perturbs the simulation's random stream.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::{Assets, Surface, TextAlign, TextStyle};
use crate::consts::*;
use crate::settings::Settings;
use crate::sim::menu::{CONFIRM_MENU, INTRO_MENU, MenuCursor, MenuLayout, PAUSE_MENU};
use crate::sim::{Enemy, GameState, Mode, PowerUpKind};

// ============================================================================
// STYLE
// ============================================================================

const BACKGROUND: &str = "#000";
const DIM_OVERLAY: &str = "rgba(0, 0, 0, 0.5)";
const BULLET_COLOR: &str = "#fff";
const ENEMY_BULLET_COLOR: &str = "#ff9";
const OPTION_COLOR: &str = "#ccc";
const SELECTED_COLOR: &str = "#ff0";

const TITLE: TextStyle = TextStyle::new("28px system-ui, sans-serif", "#fff", TextAlign::Center);
const HEADING: TextStyle = TextStyle::new("24px system-ui, sans-serif", "#fff", TextAlign::Center);
const OPTION: TextStyle = TextStyle::new("18px system-ui, sans-serif", OPTION_COLOR, TextAlign::Center);
const BODY: TextStyle = TextStyle::new("16px system-ui, sans-serif", "#fff", TextAlign::Left);
const HUD: TextStyle = TextStyle::new("14px system-ui, sans-serif", "#fff", TextAlign::Left);
const HUD_RIGHT: TextStyle = TextStyle::new("14px system-ui, sans-serif", "#fff", TextAlign::Right);
const LIVES: TextStyle = TextStyle::new("bold 14px system-ui, sans-serif", "#e33", TextAlign::Left);
const BANNER: TextStyle = TextStyle::new("bold 20px system-ui, sans-serif", "#ff0", TextAlign::Center);
const PICKUP_LABEL: TextStyle =
    TextStyle::new("bold 14px system-ui, sans-serif", "#000", TextAlign::Center);

const HELP_LINES: [&str; 10] = [
    "Move: mouse (smooth follow), nudge with arrows or WASD",
    "Shoot: hold Space or left mouse button",
    "Pause / resume: P or Esc",
    "Menus: Up/Down or hover, Enter or click to select",
    "Score: +1 per enemy destroyed",
    "Power-ups: S spread, D damage, V bullet speed",
    "Power-up caps rise at 2, 30 and 100 kills",
    "Bosses appear every 30 kills",
    "Defeat a boss for a guaranteed drop and +1 life",
    "Lives: top-left; you blink briefly after a hit",
];

fn power_up_color(kind: PowerUpKind) -> &'static str {
    match kind {
        PowerUpKind::Spread => "#3cf",
        PowerUpKind::Damage => "#f55",
        PowerUpKind::Speed => "#5f5",
    }
}

/// Ship hidden on alternate tenths of a second while invincible
pub fn blink_hidden(invincible_timer: f32) -> bool {
    invincible_timer > 0.0 && ((invincible_timer * 10.0).floor() as i64) % 2 == 0
}

/// Read-only scene renderer
#[derive(Debug, Clone)]
pub struct Renderer {
    rng: Pcg32,
}

impl Renderer {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Draw one frame
    pub fn draw<S: Surface>(
        &mut self,
        state: &GameState,
        settings: &Settings,
        assets: &Assets<S::Image>,
        surface: &mut S,
        fps: f32,
    ) {
        surface.clear(CANVAS_WIDTH, CANVAS_HEIGHT);

        match state.mode {
            Mode::Intro => return draw_intro(state, surface),
            Mode::Help => return draw_help(surface),
            Mode::GameOver => return draw_game_over(state, surface),
            Mode::Playing | Mode::Paused | Mode::ConfirmEnd => {}
        }

        let shaken = state.mode == Mode::Playing
            && settings.effective_screen_shake()
            && state.shake.is_active();
        if shaken {
            let m = state.shake.magnitude;
            let dx = self.rng.random_range(-1.0f32..=1.0) * m;
            let dy = self.rng.random_range(-1.0f32..=1.0) * m;
            surface.save();
            surface.translate(dx, dy);
        }

        surface.fill_rect(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT, BACKGROUND);
        draw_world(state, assets, surface);
        draw_hud(state, surface);

        if shaken {
            surface.restore();
        }

        if settings.show_fps {
            surface.fill_text(
                &format!("{fps:.0} FPS"),
                CANVAS_WIDTH - 8.0,
                CANVAS_HEIGHT - 8.0,
                &HUD_RIGHT.with_color("#8f8"),
            );
        }

        match state.mode {
            Mode::Paused => {
                draw_overlay("Pause Menu", &PAUSE_MENU, state.menus.pause, surface);
                draw_debug_prompt(state, surface);
            }
            Mode::ConfirmEnd => {
                draw_overlay("End current game?", &CONFIRM_MENU, state.menus.confirm, surface)
            }
            _ => {}
        }
    }
}

// ============================================================================
// FULL SCREENS
// ============================================================================

fn full_screen<S: Surface>(surface: &mut S) {
    surface.fill_rect(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT, BACKGROUND);
}

fn draw_menu<S: Surface>(layout: &MenuLayout, cursor: MenuCursor, surface: &mut S) {
    for (i, option) in layout.options.iter().enumerate() {
        let style = if i == cursor.index {
            OPTION.with_color(SELECTED_COLOR)
        } else {
            OPTION
        };
        surface.fill_text(option, CANVAS_WIDTH / 2.0, layout.row_y(i), &style);
    }
}

fn draw_intro<S: Surface>(state: &GameState, surface: &mut S) {
    full_screen(surface);
    let cx = CANVAS_WIDTH / 2.0;
    surface.fill_text("ShootEmUp", cx, CANVAS_HEIGHT / 2.0 - 60.0, &TITLE);
    draw_menu(&INTRO_MENU, state.menus.intro, surface);
    if state.high_score > 0 {
        surface.fill_text(
            &format!("High Score: {}", state.high_score),
            cx,
            CANVAS_HEIGHT / 2.0 + 80.0,
            &HUD.with_color(OPTION_COLOR),
        );
    }
}

fn draw_help<S: Surface>(surface: &mut S) {
    full_screen(surface);
    surface.fill_text(
        "Help",
        40.0,
        60.0,
        &TextStyle::new("22px system-ui, sans-serif", "#fff", TextAlign::Left),
    );
    for (i, line) in HELP_LINES.iter().enumerate() {
        surface.fill_text(line, 40.0, 100.0 + i as f32 * 24.0, &BODY);
    }
    surface.fill_text(
        "Enter, Esc or click to go back",
        CANVAS_WIDTH / 2.0,
        CANVAS_HEIGHT - 40.0,
        &OPTION,
    );
}

fn draw_game_over<S: Surface>(state: &GameState, surface: &mut S) {
    full_screen(surface);
    let cx = CANVAS_WIDTH / 2.0;
    let cy = CANVAS_HEIGHT / 2.0;
    let line = TextStyle::new("16px system-ui, sans-serif", "#fff", TextAlign::Center);
    surface.fill_text("Game Over", cx, cy, &HEADING);
    surface.fill_text(&format!("Score: {}", state.score), cx, cy + 28.0, &line);
    surface.fill_text(
        &format!("High Score: {}", state.high_score),
        cx,
        cy + 50.0,
        &line,
    );
    surface.fill_text("Press Enter or click to restart", cx, cy + 80.0, &line);
}

// ============================================================================
// PLAYING SCENE
// ============================================================================

fn draw_world<S: Surface>(state: &GameState, assets: &Assets<S::Image>, surface: &mut S) {
    for star in &state.stars {
        surface.fill_rect(star.pos.x, star.pos.y, star.size, star.size, star.color);
    }

    let player = &state.player;
    if !blink_hidden(player.invincible_timer) {
        assets.draw(surface, "player", player.rect(), player.color);
    }

    for b in &player.bullets {
        surface.fill_circle(b.pos, b.radius, BULLET_COLOR);
    }
    for b in &state.enemy_bullets {
        surface.fill_circle(b.pos, b.radius, ENEMY_BULLET_COLOR);
    }

    for enemy in &state.enemies {
        let (sprite, fallback) = enemy.sprite();
        assets.draw(surface, sprite, enemy.rect(), fallback);
        if enemy.is_boss() {
            draw_health_bar(enemy, surface);
        }
    }

    for p in &state.power_ups {
        let r = p.rect();
        let color = power_up_color(p.kind);
        surface.save();
        surface.set_shadow(color, 8.0);
        surface.fill_rect(r.x, r.y, r.w, r.h, color);
        surface.restore();
        let c = r.center();
        surface.fill_text(p.kind.label(), c.x, c.y + 5.0, &PICKUP_LABEL);
    }

    for e in &state.explosions {
        surface.save();
        surface.set_alpha(e.alpha);
        surface.stroke_circle(e.pos, e.radius, 2.0, e.color);
        surface.restore();
    }
}

fn draw_health_bar<S: Surface>(enemy: &Enemy, surface: &mut S) {
    if enemy.max_hp == 0 {
        return;
    }
    let r = enemy.rect();
    let frac = enemy.hp as f32 / enemy.max_hp as f32;
    surface.fill_rect(r.x, r.y - 8.0, r.w, 4.0, "#400");
    surface.fill_rect(r.x, r.y - 8.0, r.w * frac, 4.0, "#f44");
}

fn draw_hud<S: Surface>(state: &GameState, surface: &mut S) {
    surface.fill_text(&format!("Score: {}", state.score), 8.0, 16.0, &HUD);
    surface.fill_text(&format!("Lives: {}", state.player.lives), 8.0, 34.0, &LIVES);
    surface.fill_text(
        &format!("High: {}", state.high_score),
        CANVAS_WIDTH - 8.0,
        16.0,
        &HUD_RIGHT,
    );
    surface.fill_text(
        &format!("Kills: {}  Stage: {}", state.kills, state.stage()),
        CANVAS_WIDTH - 8.0,
        34.0,
        &HUD_RIGHT,
    );

    let a = state.player.abilities;
    let mut x = 8.0;
    for kind in PowerUpKind::ALL {
        let text = format!("{}{}", kind.label(), a.level(kind));
        surface.fill_text(
            &text,
            x,
            CANVAS_HEIGHT - 8.0,
            &HUD.with_color(power_up_color(kind)),
        );
        x += 32.0;
    }

    if let Some(alert) = &state.alert {
        surface.fill_text(alert.message, CANVAS_WIDTH / 2.0, CANVAS_HEIGHT / 3.0, &BANNER);
    }
    if state.extra_life_timer > 0.0 {
        surface.fill_text(
            "+1 LIFE",
            CANVAS_WIDTH / 2.0,
            CANVAS_HEIGHT / 3.0 + 28.0,
            &BANNER.with_color("#6f6"),
        );
    }
    if state.debug.active {
        surface.fill_text("DEBUG", CANVAS_WIDTH / 2.0, 16.0, &BANNER.with_color("#f80"));
    }
}

// ============================================================================
// OVERLAYS
// ============================================================================

fn draw_overlay<S: Surface>(title: &str, layout: &MenuLayout, cursor: MenuCursor, surface: &mut S) {
    surface.save();
    surface.fill_rect(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT, DIM_OVERLAY);
    surface.fill_text(title, CANVAS_WIDTH / 2.0, CANVAS_HEIGHT / 2.0 - 50.0, &HEADING);
    draw_menu(layout, cursor, surface);
    surface.restore();
}

fn draw_debug_prompt<S: Surface>(state: &GameState, surface: &mut S) {
    if !state.debug.entering {
        return;
    }
    let w = 260.0;
    let h = 60.0;
    let x = (CANVAS_WIDTH - w) / 2.0;
    let y = CANVAS_HEIGHT / 2.0 + 90.0;
    surface.fill_rect(x, y, w, h, "#222");
    let center = Vec2::new(CANVAS_WIDTH / 2.0, y);
    surface.fill_text(
        &format!("Set kills: {}_", state.debug.buffer),
        center.x,
        center.y + 26.0,
        &OPTION.with_color("#fff"),
    );
    surface.fill_text(
        "Enter to apply, empty Enter exits debug",
        center.x,
        center.y + 48.0,
        &HUD.with_color(OPTION_COLOR),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::recording::{Call, RecordingSurface};
    use crate::sim::{Enemy, PowerUp};

    fn render(state: &GameState, settings: &Settings) -> RecordingSurface {
        let mut surface = RecordingSurface::default();
        let assets: Assets<u32> = Assets::new();
        Renderer::new(1).draw(state, settings, &assets, &mut surface, 60.0);
        surface
    }

    fn playing() -> GameState {
        let mut state = GameState::new(4, 10, 5);
        state.start_run();
        state
    }

    #[test]
    fn test_intro_highlights_selection() {
        let mut state = GameState::new(1, 0, 0);
        state.menus.intro = MenuCursor::at(1);
        let s = render(&state, &Settings::default());
        assert!(s.has_text("ShootEmUp"));
        assert_eq!(s.text_style("Help").map(|t| t.color), Some(SELECTED_COLOR));
        assert_eq!(s.text_style("Start").map(|t| t.color), Some(OPTION_COLOR));
    }

    #[test]
    fn test_game_over_shows_scores() {
        let mut state = playing();
        state.score = 33;
        state.enter_game_over();
        let s = render(&state, &Settings::default());
        assert!(s.has_text("Game Over"));
        assert!(s.has_text("Score: 33"));
        assert!(s.has_text("High Score: 33"));
    }

    #[test]
    fn test_enemy_fallback_colors() {
        let mut state = playing();
        state.enemies.push(Enemy::rusher(Vec2::new(10.0, 10.0), 0.0));
        let boss = Enemy::elite_shooter(Vec2::new(100.0, 40.0), 2, &mut state.rng);
        state.enemies.push(boss);
        let s = render(&state, &Settings::default());
        assert_eq!(s.rects_with_color("#f93"), 1);
        assert_eq!(s.rects_with_color("#f0c"), 1);
        // Boss health bar
        assert_eq!(s.rects_with_color("#f44"), 1);
    }

    #[test]
    fn test_loaded_sprite_is_blitted() {
        let mut state = playing();
        state.enemies.push(Enemy::rusher(Vec2::new(10.0, 10.0), 0.0));
        let mut assets = Assets::new();
        assets.insert("rusher", 3u32);
        assets.mark("rusher", true);
        let mut surface = RecordingSurface::default();
        Renderer::new(1).draw(&state, &Settings::default(), &assets, &mut surface, 60.0);
        assert!(surface.calls.contains(&Call::Image { id: 3, x: 10.0, y: 10.0 }));
        assert_eq!(surface.rects_with_color("#f93"), 0);
    }

    #[test]
    fn test_power_up_letter() {
        let mut state = playing();
        state
            .power_ups
            .push(PowerUp::new(Vec2::new(50.0, 50.0), PowerUpKind::Speed));
        let s = render(&state, &Settings::default());
        assert!(s.texts().contains(&"V"));
        assert_eq!(s.rects_with_color("#5f5"), 1);
    }

    #[test]
    fn test_player_blinks() {
        assert!(!blink_hidden(0.0));
        assert!(!blink_hidden(0.95));
        assert!(blink_hidden(0.85));

        let mut state = playing();
        let color = state.player.color;
        state.player.invincible_timer = 0.85;
        assert_eq!(render(&state, &Settings::default()).rects_with_color(color), 0);
        state.player.invincible_timer = 0.95;
        assert_eq!(render(&state, &Settings::default()).rects_with_color(color), 1);
    }

    #[test]
    fn test_shake_only_while_playing() {
        let mut state = playing();
        state.shake.trigger(HIT_SHAKE);
        assert_eq!(render(&state, &Settings::default()).translations(), 1);

        let calm = Settings {
            reduced_motion: true,
            ..Settings::default()
        };
        assert_eq!(render(&state, &calm).translations(), 0);

        state.mode = Mode::Paused;
        assert_eq!(render(&state, &Settings::default()).translations(), 0);
    }

    #[test]
    fn test_pause_overlay_and_debug_prompt() {
        let mut state = playing();
        state.mode = Mode::Paused;
        state.debug.active = true;
        state.debug.entering = true;
        state.debug.buffer = "42".into();
        let s = render(&state, &Settings::default());
        assert_eq!(s.rects_with_color(DIM_OVERLAY), 1);
        assert!(s.has_text("Pause Menu"));
        assert!(s.has_text("Set kills: 42_"));
        assert!(s.has_text("DEBUG"));
    }

    #[test]
    fn test_confirm_overlay() {
        let mut state = playing();
        state.mode = Mode::ConfirmEnd;
        let s = render(&state, &Settings::default());
        assert!(s.has_text("End current game?"));
        assert_eq!(s.text_style("No").map(|t| t.color), Some(SELECTED_COLOR));
    }

    #[test]
    fn test_hud_contents() {
        let mut state = playing();
        state.kills = 120;
        state.score = 120;
        state.player.abilities.damage = 2;
        state.evaluate_alerts();
        state.grant_extra_life();
        let settings = Settings {
            show_fps: true,
            ..Settings::default()
        };
        let s = render(&state, &settings);
        assert!(s.has_text("Score: 120"));
        assert!(s.has_text("Lives: 6"));
        assert!(s.has_text("High: 10"));
        assert!(s.has_text("Stage: 1"));
        assert!(s.has_text("D2"));
        assert!(s.has_text("+1 LIFE"));
        assert!(s.has_text("60 FPS"));
        assert!(state.alert.as_ref().is_some_and(|a| s.has_text(a.message)));
    }
}
