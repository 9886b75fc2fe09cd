//! The bouncing-ball game: level data plus the callbacks that drive it.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use stagehand_game::prelude::*;

pub const WORLD_WIDTH: f32 = 320.0;
pub const WORLD_HEIGHT: f32 = 240.0;

const LEVEL: &str = include_str!("../assets/level.json");

const BALL: &str = "ball";
const HUD: &str = "hud";
const BALL_RADIUS: f32 = 12.0;

/// Upward speed of a kick, in units per second.
const KICK_SPEED: f32 = 320.0;
/// Speed of the first floor bounce; each later bounce keeps `BOUNCE_DAMPING` of it.
const BOUNCE_SPEED: f32 = 260.0;
const BOUNCE_DAMPING: f32 = 0.75;
const MIN_BOUNCE_SPEED: f32 = 40.0;

/// Game-specific payload carried in the state.
///
/// Input handlers only queue requests here. Positions and velocities of
/// tracked entities are re-read from the stage before every `update`, so a
/// handler writing them directly would be overwritten; `update` applies the
/// queued requests instead.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub kicks: u32,
    pub bounces: u32,
    #[serde(default)]
    pub kick_queued: bool,
    #[serde(default)]
    pub drop_at: Option<Vec2>,
}

pub fn load() -> Result<GameState<Score>> {
    serde_json::from_str(LEVEL).context("assets/level.json is not a valid game state")
}

pub fn functions(level: GameState<Score>, debug: bool) -> GameFunctions<Score> {
    GameFunctions::new(move |_empty| Some(level.clone()))
        .update(update)
        .on_key_down(kick)
        .on_mouse_down(drop_ball)
        .debug(debug)
}

fn update(state: &GameState<Score>, _time: f32, _delta: f32) -> Option<GameState<Score>> {
    let Some(ball) = state.entity(BALL) else {
        return Some(state.clone());
    };
    let mut score = state.sack.clone();
    let mut ball = ball.clone();

    if let Some(point) = score.drop_at.take() {
        ball = ball.with_position(point).with_velocity(Vec2::zero());
        score.bounces = 0;
    }
    if std::mem::take(&mut score.kick_queued) {
        let vx = ball.velocity.x;
        ball = ball.with_velocity(Vec2::new(vx, -KICK_SPEED));
        score.bounces = 0;
    } else {
        let on_floor = ball.position.y + BALL_RADIUS >= WORLD_HEIGHT - 0.5 && ball.velocity.y == 0.0;
        let speed = BOUNCE_SPEED * BOUNCE_DAMPING.powi(score.bounces as i32);
        if on_floor && speed >= MIN_BOUNCE_SPEED {
            let vx = ball.velocity.x;
            ball = ball.with_velocity(Vec2::new(vx, -speed));
            score.bounces += 1;
        }
    }

    if score == state.sack {
        return Some(state.clone().with_entity(BALL, ball));
    }
    Some(with_hud(state.clone().with_entity(BALL, ball), score))
}

fn kick(state: &GameState<Score>, key: &KeyInput) -> Option<GameState<Score>> {
    if key.key != Key::Space {
        return Some(state.clone());
    }
    let score = Score { kicks: state.sack.kicks + 1, kick_queued: true, ..state.sack.clone() };
    log::info!("kick #{}", score.kicks);
    Some(with_hud(state.clone(), score))
}

fn drop_ball(state: &GameState<Score>, pointer: &PointerInput) -> Option<GameState<Score>> {
    log::info!("dropping ball at ({:.0}, {:.0})", pointer.position.x, pointer.position.y);
    let score = Score { drop_at: Some(pointer.position), ..state.sack.clone() };
    Some(state.clone().with_sack(score))
}

fn with_hud(state: GameState<Score>, score: Score) -> GameState<Score> {
    let text = format!("kicks {}  bounces {}", score.kicks, score.bounces);
    state.map_entity(HUD, |hud| hud.with_text(text)).with_sack(score)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resting_ball(bounces: u32) -> GameState<Score> {
        load()
            .unwrap()
            .map_entity(BALL, |b| b.at(100.0, WORLD_HEIGHT - BALL_RADIUS).with_velocity(Vec2::new(5.0, 0.0)))
            .with_sack(Score { bounces, ..Score::default() })
    }

    #[test]
    fn level_parses_with_tracked_roots() {
        let level = load().unwrap();
        assert_eq!(level.root_names().collect::<Vec<_>>(), vec!["ball", "hud", "sign"]);
        assert!(level.entity(BALL).unwrap().is_dynamic_root());
        assert_eq!(level.entity("sign").unwrap().components[0].text_content(), Some("SPACE"));
        assert!(level.scene.background.is_some());
        assert_eq!(level.sack, Score::default());
    }

    // ── update ────────────────────────────────────────────────────────────

    #[test]
    fn ball_on_floor_bounces_with_damping() {
        let next = update(&resting_ball(0), 1.0, 0.016).unwrap();
        assert_eq!(next.entity(BALL).unwrap().velocity, Vec2::new(5.0, -BOUNCE_SPEED));
        assert_eq!(next.sack.bounces, 1);
        assert_eq!(next.entity(HUD).unwrap().text_content(), Some("kicks 0  bounces 1"));

        let next = update(&resting_ball(1), 1.0, 0.016).unwrap();
        assert_eq!(next.entity(BALL).unwrap().velocity.y, -BOUNCE_SPEED * BOUNCE_DAMPING);
    }

    #[test]
    fn ball_stops_bouncing_once_too_slow() {
        let state = resting_ball(10);
        let next = update(&state, 1.0, 0.016).unwrap();
        assert_eq!(next, state);
    }

    // ── input ─────────────────────────────────────────────────────────────

    #[test]
    fn space_queues_a_kick_that_update_applies() {
        let state = load().unwrap();
        let space = KeyInput { key: Key::Space, code: Key::Space.code() };

        let queued = kick(&state, &space).unwrap();
        assert_eq!(queued.sack.kicks, 1);
        assert!(queued.sack.kick_queued);
        assert_eq!(queued.entity(BALL), state.entity(BALL));

        let kicked = update(&queued, 1.0, 0.016).unwrap();
        assert_eq!(kicked.entity(BALL).unwrap().velocity.y, -KICK_SPEED);
        assert!(!kicked.sack.kick_queued);
    }

    #[test]
    fn other_keys_change_nothing() {
        let state = load().unwrap();
        let other = KeyInput { key: Key::A, code: Key::A.code() };
        assert_eq!(kick(&state, &other).unwrap(), state);
    }

    #[test]
    fn click_drops_ball_on_next_update() {
        let pointer = PointerInput { button: 0, position: Vec2::new(30.0, 20.0) };
        let queued = drop_ball(&load().unwrap(), &pointer).unwrap();
        let dropped = update(&queued, 1.0, 0.016).unwrap();

        let ball = dropped.entity(BALL).unwrap();
        assert_eq!(ball.position, Vec2::new(30.0, 20.0));
        assert_eq!(ball.velocity, Vec2::zero());
        assert_eq!(dropped.sack.drop_at, None);
    }
}
