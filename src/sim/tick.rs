//! Per-frame simulation tick
//!
//! Dispatches on the top-level mode. Menus consume edge-triggered input;
//! `Playing` advances the world in a fixed order.

use std::collections::BTreeSet;

use glam::Vec2;

use super::collision;
use super::enemy::EnemyContext;
use super::menu::{CONFIRM_MENU, INTRO_MENU, MenuCursor, MenuLayout, PAUSE_MENU};
use super::spawn::{try_spawn_boss, update_spawner};
use super::state::{GameState, Mode};

const PAUSE_KEYS: [&str; 2] = ["p", "escape"];
const DEBUG_KEY: &str = "`";
const DEBUG_BUFFER_MAX: usize = 7;

/// Input for one frame. Key names are lower-cased `KeyboardEvent.key` values.
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// Keys currently down
    pub held: BTreeSet<String>,
    /// Keys that went down since last frame
    pub just_pressed: BTreeSet<String>,
    /// Canvas-space mouse position
    pub pointer: Vec2,
    pub left_down: bool,
    /// Left button went down since last frame
    pub just_clicked: bool,
}

impl FrameInput {
    pub fn pressed(&self, key: &str) -> bool {
        self.just_pressed.contains(key)
    }

    pub fn any_pressed(&self, keys: &[&str]) -> bool {
        keys.iter().any(|k| self.just_pressed.contains(*k))
    }

    pub fn any_held(&self, keys: &[&str]) -> bool {
        keys.iter().any(|k| self.held.contains(*k))
    }
}

/// Advance the game by one frame
pub fn tick(state: &mut GameState, input: &FrameInput, dt: f32) {
    match state.mode {
        Mode::Intro => update_intro(state, input),
        Mode::Help => {
            if input.any_pressed(&["enter", "escape"]) || input.just_clicked {
                state.mode = Mode::Intro;
            }
        }
        Mode::Playing => {
            if input.any_pressed(&PAUSE_KEYS) {
                state.mode = Mode::Paused;
                state.menus.pause = MenuCursor::at(0);
                log::debug!("Paused");
                return;
            }
            update_world(state, input, dt);
        }
        Mode::Paused => update_paused(state, input),
        Mode::ConfirmEnd => update_confirm(state, input),
        Mode::GameOver => {
            if input.pressed("enter") || input.just_clicked {
                state.start_run();
            }
        }
    }
}

/// Shared menu navigation. Returns the confirmed option, if any.
fn navigate(cursor: &mut MenuCursor, layout: &MenuLayout, input: &FrameInput) -> Option<usize> {
    cursor.hover(layout, input.pointer);
    if input.pressed("arrowup") {
        cursor.up();
    }
    if input.pressed("arrowdown") {
        cursor.down(layout);
    }
    // A click confirms the highlighted option wherever the pointer is
    if input.pressed("enter") || input.just_clicked {
        return Some(cursor.index);
    }
    None
}

fn update_intro(state: &mut GameState, input: &FrameInput) {
    match navigate(&mut state.menus.intro, &INTRO_MENU, input) {
        Some(0) => state.start_run(),
        Some(_) => state.mode = Mode::Help,
        None => {}
    }
}

fn update_paused(state: &mut GameState, input: &FrameInput) {
    if state.debug.entering {
        update_debug_prompt(state, input);
        return;
    }
    if input.pressed(DEBUG_KEY) {
        state.debug.active = true;
        state.debug.entering = true;
        state.debug.buffer.clear();
        log::info!("Debug prompt opened");
        return;
    }
    if input.any_pressed(&PAUSE_KEYS) {
        state.mode = Mode::Playing;
        return;
    }
    match navigate(&mut state.menus.pause, &PAUSE_MENU, input) {
        Some(0) => state.mode = Mode::Playing,
        Some(1) => state.start_run(),
        Some(_) => {
            state.menus.confirm = MenuCursor::at(1);
            state.mode = Mode::ConfirmEnd;
        }
        None => {}
    }
}

fn update_confirm(state: &mut GameState, input: &FrameInput) {
    if input.pressed("escape") {
        state.mode = Mode::Paused;
        return;
    }
    match navigate(&mut state.menus.confirm, &CONFIRM_MENU, input) {
        Some(0) => {
            log::info!("Run ended from the pause menu at score {}", state.score);
            state.reset();
            state.mode = Mode::Intro;
        }
        Some(_) => state.mode = Mode::Paused,
        None => {}
    }
}

/// Digits pressed within the same frame are appended in sorted key order, not press order.
fn update_debug_prompt(state: &mut GameState, input: &FrameInput) {
    for key in &input.just_pressed {
        match key.as_str() {
            "escape" | DEBUG_KEY => {
                state.debug.entering = false;
                return;
            }
            "backspace" => {
                state.debug.buffer.pop();
            }
            "enter" => {
                submit_debug_buffer(state);
                return;
            }
            k if k.len() == 1 && k.chars().all(|c| c.is_ascii_digit()) => {
                if state.debug.buffer.len() < DEBUG_BUFFER_MAX {
                    state.debug.buffer.push_str(k);
                }
            }
            _ => {}
        }
    }
}

fn submit_debug_buffer(state: &mut GameState) {
    let buffer = std::mem::take(&mut state.debug.buffer);
    state.debug.entering = false;
    if buffer.is_empty() {
        state.debug.active = false;
        log::info!("Debug mode off");
        return;
    }
    match buffer.parse::<u32>() {
        Ok(kills) => set_kills(state, kills),
        Err(err) => log::warn!("Ignoring debug input {buffer:?}: {err}"),
    }
}

/// Debug override of the kill counter. Does not advance time.
pub fn set_kills(state: &mut GameState, kills: u32) {
    log::info!("Debug: kills {} -> {kills}", state.kills);
    state.kills = kills;
    state.evaluate_alerts();
    try_spawn_boss(state);
}

/// One frame of gameplay
fn update_world(state: &mut GameState, input: &FrameInput, dt: f32) {
    state.player.update(dt, input);
    for b in &mut state.player.bullets {
        b.update(dt);
    }
    state.player.bullets.retain(|b| !b.is_offscreen());

    for b in &mut state.enemy_bullets {
        b.update(dt);
    }
    state.enemy_bullets.retain(|b| !b.is_offscreen());

    update_spawner(state, dt);

    let mut spawned = Vec::new();
    {
        let mut ctx = EnemyContext {
            player_center: state.player.center(),
            bullets: &mut state.enemy_bullets,
            spawned: &mut spawned,
            rng: &mut state.rng,
        };
        for enemy in &mut state.enemies {
            enemy.update(dt, &mut ctx);
        }
    }
    state.enemies.append(&mut spawned);
    state.enemies.retain(|e| !e.is_offscreen());

    for p in &mut state.power_ups {
        p.update(dt);
    }
    state.power_ups.retain(|p| !p.is_offscreen());

    collision::resolve(state);

    state.shake.update(dt);
    for e in &mut state.explosions {
        e.update(dt);
    }
    state.explosions.retain(|e| !e.is_done());
    for s in &mut state.stars {
        s.update(dt, &mut state.rng);
    }
    state.update_messages(dt);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::entities::EnemyBullet;
    use crate::sim::state::GameEvent;

    fn press(keys: &[&str]) -> FrameInput {
        FrameInput {
            just_pressed: keys.iter().map(|k| k.to_string()).collect(),
            // Park the pointer away from every menu option
            pointer: Vec2::new(2.0, 2.0),
            ..Default::default()
        }
    }

    fn idle() -> FrameInput {
        press(&[])
    }

    fn playing() -> GameState {
        let mut state = GameState::new(3, 0, 20);
        state.start_run();
        state
    }

    fn paused() -> GameState {
        let mut state = playing();
        tick(&mut state, &press(&["p"]), 0.016);
        state
    }

    #[test]
    fn test_intro_start_and_help() {
        let mut state = GameState::new(1, 0, 0);
        tick(&mut state, &press(&["arrowdown"]), 0.016);
        assert_eq!(state.menus.intro.index, 1);
        tick(&mut state, &press(&["enter"]), 0.016);
        assert_eq!(state.mode, Mode::Help);
        tick(&mut state, &press(&["escape"]), 0.016);
        assert_eq!(state.mode, Mode::Intro);

        state.menus.intro = MenuCursor::at(0);
        tick(&mut state, &press(&["enter"]), 0.016);
        assert_eq!(state.mode, Mode::Playing);
    }

    #[test]
    fn test_click_on_option_confirms() {
        let mut state = GameState::new(1, 0, 0);
        let input = FrameInput {
            pointer: Vec2::new(CANVAS_WIDTH / 2.0, INTRO_MENU.row_y(1)),
            just_clicked: true,
            ..Default::default()
        };
        tick(&mut state, &input, 0.016);
        assert_eq!(state.mode, Mode::Help);
    }

    #[test]
    fn test_click_off_menu_confirms_highlighted() {
        let mut state = paused();
        assert_eq!(state.menus.pause.index, 0);
        let click = FrameInput {
            just_clicked: true,
            ..idle()
        };
        tick(&mut state, &click, 0.016);
        assert_eq!(state.mode, Mode::Playing);

        // Highlight "End" with the keyboard, then click in an empty corner
        let mut state = paused();
        tick(&mut state, &press(&["arrowdown"]), 0.016);
        tick(&mut state, &press(&["arrowdown"]), 0.016);
        tick(&mut state, &click, 0.016);
        assert_eq!(state.mode, Mode::ConfirmEnd);
    }

    #[test]
    fn test_pause_freezes_world() {
        let mut state = playing();
        state
            .enemy_bullets
            .push(EnemyBullet::new(Vec2::new(100.0, 100.0), Vec2::Y));
        tick(&mut state, &press(&["escape"]), 0.016);
        assert_eq!(state.mode, Mode::Paused);
        let before = state.enemy_bullets[0].pos;
        for _ in 0..10 {
            tick(&mut state, &idle(), 0.05);
        }
        assert_eq!(state.enemy_bullets[0].pos, before);
        tick(&mut state, &press(&["p"]), 0.016);
        assert_eq!(state.mode, Mode::Playing);
    }

    #[test]
    fn test_pause_menu_restart() {
        let mut state = paused();
        state.score = 9;
        tick(&mut state, &press(&["arrowdown"]), 0.016);
        tick(&mut state, &press(&["enter"]), 0.016);
        assert_eq!(state.mode, Mode::Playing);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_end_game_confirm_flow() {
        let mut state = paused();
        state.score = 9;
        state.menus.pause = MenuCursor::at(2);
        tick(&mut state, &press(&["enter"]), 0.016);
        assert_eq!(state.mode, Mode::ConfirmEnd);
        assert_eq!(state.menus.confirm.index, 1);

        // Default "No" goes back to the pause menu
        tick(&mut state, &press(&["enter"]), 0.016);
        assert_eq!(state.mode, Mode::Paused);
        assert_eq!(state.score, 9);

        state.menus.pause = MenuCursor::at(2);
        tick(&mut state, &press(&["enter"]), 0.016);
        tick(&mut state, &press(&["arrowup"]), 0.016);
        tick(&mut state, &press(&["enter"]), 0.016);
        assert_eq!(state.mode, Mode::Intro);
        assert_eq!(state.score, 0);
        assert_eq!(state.high_score, 0);
    }

    #[test]
    fn test_debug_sets_kills_and_alert_once() {
        let mut state = paused();
        tick(&mut state, &press(&[DEBUG_KEY]), 0.016);
        assert!(state.debug.active && state.debug.entering);
        for k in ["9", "9", "enter"] {
            tick(&mut state, &press(&[k]), 0.016);
        }
        assert_eq!(state.kills, 99);
        assert!(state.alert.is_none());
        assert!(!state.debug.entering);

        set_kills(&mut state, 100);
        assert!(state.alert.is_some());
        state.alert = None;
        set_kills(&mut state, 100);
        assert!(state.alert.is_none());
        let alerts = state
            .drain_events()
            .iter()
            .filter(|e| matches!(e, GameEvent::StageAlert(1)))
            .count();
        assert_eq!(alerts, 1);
    }

    #[test]
    fn test_debug_kills_trigger_boss() {
        let mut state = paused();
        set_kills(&mut state, 30);
        assert_eq!(state.boss_count(), 1);
        assert_eq!(state.next_elite_at, 60);
        // Still paused; no time passed
        assert_eq!(state.mode, Mode::Paused);
    }

    #[test]
    fn test_debug_prompt_editing() {
        let mut state = paused();
        tick(&mut state, &press(&[DEBUG_KEY]), 0.016);
        for k in ["1", "2", "x", "3", "backspace"] {
            tick(&mut state, &press(&[k]), 0.016);
        }
        assert_eq!(state.debug.buffer, "12");
        for _ in 0..10 {
            tick(&mut state, &press(&["8"]), 0.016);
        }
        assert_eq!(state.debug.buffer.len(), 7);

        tick(&mut state, &press(&["escape"]), 0.016);
        assert!(!state.debug.entering);
        assert!(state.debug.active);
        assert_eq!(state.mode, Mode::Paused);
    }

    #[test]
    fn test_same_frame_digits_append_sorted() {
        let mut state = paused();
        tick(&mut state, &press(&[DEBUG_KEY]), 0.016);
        tick(&mut state, &press(&["7", "3"]), 0.016);
        assert_eq!(state.debug.buffer, "37");
    }

    #[test]
    fn test_debug_empty_enter_exits() {
        let mut state = paused();
        state.kills = 12;
        tick(&mut state, &press(&[DEBUG_KEY]), 0.016);
        tick(&mut state, &press(&["enter"]), 0.016);
        assert!(!state.debug.active);
        assert_eq!(state.kills, 12);
    }

    #[test]
    fn test_malformed_debug_input_ignored() {
        let mut state = paused();
        state.kills = 12;
        state.debug.active = true;
        state.debug.entering = true;
        // Larger than u32 fits in seven digits only via direct buffer writes
        state.debug.buffer = "99999999999".to_string();
        tick(&mut state, &press(&["enter"]), 0.016);
        assert_eq!(state.kills, 12);
        assert!(state.debug.buffer.is_empty());
        assert!(state.debug.active);
    }

    #[test]
    fn test_game_over_restart() {
        let mut state = playing();
        state.enter_game_over();
        tick(&mut state, &idle(), 0.016);
        assert_eq!(state.mode, Mode::GameOver);
        tick(&mut state, &press(&["enter"]), 0.016);
        assert_eq!(state.mode, Mode::Playing);
        assert_eq!(state.player.lives, PLAYER_START_LIVES);
    }

    #[test]
    fn test_playing_spawns_and_expires() {
        let mut state = playing();
        let input = FrameInput {
            pointer: state.player.center(),
            ..idle()
        };
        for _ in 0..200 {
            tick(&mut state, &input, 0.016);
        }
        assert!(!state.enemies.is_empty());
        assert!(state.player.bullets.iter().all(|b| !b.is_offscreen()));
        assert!(state.explosions.iter().all(|e| !e.is_done()));
    }
}
