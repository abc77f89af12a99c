//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. Physics and
//! scrolling are per-frame constants; the spawn clock and the distance
//! counter take the frame's wall time so pacing holds if frames drop.

use rand::Rng;

use super::collision::first_hit;
use super::state::{GameEvent, GamePhase, GameState, Obstacle, ObstacleKind};
use crate::frame_units;
use crate::tuning::{DistanceRate, TargetGrowth};

/// How many frames of scroll the demo autopilot looks ahead
const AUTOPILOT_LEAD_FRAMES: f32 = 10.0;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump edge (press, not hold)
    pub jump: bool,
    /// Idle/demo mode - autopilot plays the game
    pub idle_mode: bool,
}

/// Advance the game state by one fixed timestep.
///
/// Returns the events raised this tick, in the order they happened.
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    state.time_ticks += 1;

    // Idle/demo mode - the autopilot supplies the jump edge
    let jump_pressed = if input.idle_mode {
        autopilot_wants_jump(state)
    } else {
        input.jump
    };

    match state.phase {
        GamePhase::Transition => {
            // Overlay countdown. The world is frozen and input is dropped.
            state.transition_frames_left = state.transition_frames_left.saturating_sub(1);
            if state.transition_frames_left == 0 {
                state.phase = GamePhase::Running;
                // Play resumes on this same tick; the press sampled during
                // the overlay stays dropped
                step_running(state, false, dt_ms, &mut events);
            }
        }
        GamePhase::Running => step_running(state, jump_pressed, dt_ms, &mut events),
        GamePhase::Dead => {
            // Corpse keeps falling and flashing while the restart timer runs
            state.player.step(&state.tuning);
            state.restart_frames_left = state.restart_frames_left.saturating_sub(1);
            if state.restart_frames_left == 0 {
                reset_run(state);
                events.push(GameEvent::RunRestarted { level: state.level });
            }
        }
    }

    events
}

/// One frame of active play: player physics, scrolling, collision, the
/// spawn clock, distance accrual and the level check.
fn step_running(state: &mut GameState, jump_pressed: bool, dt_ms: f32, events: &mut Vec<GameEvent>) {
    if jump_pressed {
        state.player.jump(&state.tuning);
    }
    state.player.step(&state.tuning);

    // Scroll the field and drop obstacles past the cull line
    for obstacle in &mut state.obstacles {
        obstacle.x -= state.scroll_speed;
    }
    let cull_line = -state.tuning.cull_margin;
    state.obstacles.retain(|o| o.right_edge() >= cull_line);

    // One hit kills. Nothing else advances on the death frame.
    let ground_y = state.tuning.ground_y();
    if first_hit(&state.player.aabb(), &state.obstacles, ground_y).is_some() {
        state.player.alive = false;
        state.player.flash_frames = state.tuning.damage_flash_frames;
        state.phase = GamePhase::Dead;
        state.restart_frames_left = state.tuning.restart_delay_frames;

        let final_distance = state.distance as u32;
        events.push(GameEvent::PlayerDied {
            distance: final_distance,
        });
        if final_distance > state.high_score {
            state.high_score = final_distance;
            events.push(GameEvent::HighScore {
                score: final_distance,
            });
        }
        return;
    }

    // Spawn clock runs on wall time, not frames
    state.spawn_clock_ms += dt_ms;
    if state.spawn_clock_ms > state.tuning.spawn_interval_ms {
        state.spawn_clock_ms = 0.0;
        spawn_obstacle(state);
    }

    // Distance accrues in reference frame units
    let rate = match state.tuning.distance_rate {
        DistanceRate::ScrollSpeed => state.scroll_speed,
        DistanceRate::Fixed(rate) => rate,
    };
    state.distance += rate * frame_units(dt_ms);

    if state.distance >= state.target_distance {
        advance_level(state);
        events.push(GameEvent::LevelUp { level: state.level });
    }
}

/// Rebuild the field for a fresh attempt at the current level.
///
/// Obstacles, score and the spawn clock reset; the level, the target and
/// the best score survive. Leaves the state in `Running`.
pub fn reset_run(state: &mut GameState) {
    state.obstacles.clear();
    state.spawn_clock_ms = 0.0;
    state.distance = 0.0;
    state.scroll_speed = state.tuning.scroll_speed_for(state.level);
    state.player.reset(&state.tuning);
    state.restart_frames_left = 0;
    state.phase = GamePhase::Running;
}

/// Move to the next level: bump the level counter, grow the target per the
/// profile, rebuild the field and hold on the level overlay.
pub fn advance_level(state: &mut GameState) {
    state.level += 1;
    if let TargetGrowth::Geometric { factor } = state.tuning.target_growth {
        state.target_distance = (state.target_distance * factor).trunc();
    }
    reset_run(state);
    state.phase = GamePhase::Transition;
    state.transition_frames_left = state.tuning.level_overlay_frames;
    log::info!(
        "Level {} reached, next target {}",
        state.level,
        state.target_distance
    );
}

/// Roll a new obstacle and place it past the right screen edge.
///
/// Kind is a weighted draw, then height and width are drawn in whole
/// pixels from the kind's ranges. Draw order is part of determinism.
pub fn spawn_obstacle(state: &mut GameState) {
    let spike_weight = state.tuning.spike_weight;
    let total_weight = spike_weight + state.tuning.block_weight;
    let roll = state.rng.random_range(0..total_weight);
    let kind = if roll < spike_weight {
        ObstacleKind::Spike
    } else {
        ObstacleKind::Block
    };

    let (width_range, height_range) = match kind {
        ObstacleKind::Spike => (state.tuning.spike_width, state.tuning.spike_height),
        ObstacleKind::Block => (state.tuning.block_width, state.tuning.block_height),
    };
    let height = state.rng.random_range(height_range.0..=height_range.1) as f32;
    let width = state.rng.random_range(width_range.0..=width_range.1) as f32;

    let x = state.tuning.screen_width + state.tuning.spawn_margin;
    log::debug!("spawn {:?} {}x{} at x={}", kind, width, height, x);
    state.obstacles.push(Obstacle {
        kind,
        x,
        width,
        height,
    });
}

/// Jump as soon as a grounded player sees an obstacle within the lead
/// window. Misses high blocks on purpose; the demo is allowed to die.
fn autopilot_wants_jump(state: &GameState) -> bool {
    if state.phase != GamePhase::Running || !state.player.on_ground {
        return false;
    }
    let player_right = state.player.pos.x + state.player.size;
    let horizon = state.scroll_speed * AUTOPILOT_LEAD_FRAMES;
    state.obstacles.iter().any(|o| {
        let gap = o.x - player_right;
        gap >= 0.0 && gap < horizon
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FRAME_MS;
    use crate::sim::state::Player;
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    /// Classic-profile state already past the intro overlay
    fn running_state(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        reset_run(&mut state);
        state
    }

    #[test]
    fn test_intro_overlay_freezes_world() {
        let mut state = GameState::new(7);
        assert_eq!(state.phase, GamePhase::Transition);
        assert_eq!(state.transition_frames_left, 90);

        let input = TickInput {
            jump: true,
            ..Default::default()
        };
        for _ in 0..89 {
            let events = tick(&mut state, &input, FRAME_MS);
            assert!(events.is_empty());
            assert_eq!(state.phase, GamePhase::Transition);
        }
        // Jump presses during the overlay never reach the player
        assert_eq!(state.player.vel_y, 0.0);
        assert_eq!(state.player.pos.y, 284.0);
        assert_eq!(state.distance, 0.0);
        assert!(state.obstacles.is_empty());

        tick(&mut state, &input, FRAME_MS);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.time_ticks, 90);
    }

    #[test]
    fn test_world_advances_on_overlay_end_tick() {
        let mut state = GameState::new(7);
        let input = TickInput {
            jump: true,
            ..Default::default()
        };
        for _ in 0..89 {
            tick(&mut state, &input, FRAME_MS);
        }
        assert_eq!(state.transition_frames_left, 1);

        // The tick that ends the overlay already runs the world, but the
        // press sampled during the overlay stays dropped
        tick(&mut state, &input, FRAME_MS);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.distance, 5.0);
        assert_eq!(state.spawn_clock_ms, FRAME_MS);
        assert!(state.player.on_ground);
        assert_eq!(state.player.vel_y, 0.0);
    }

    #[test]
    fn test_jump_requires_ground_contact() {
        let tuning = Tuning::classic();
        let mut player = Player::new(&tuning);

        // A fresh player sits at ground height and lands on the first step
        assert!(!player.on_ground);
        player.step(&tuning);
        assert!(player.on_ground);

        player.jump(&tuning);
        assert_eq!(player.vel_y, -15.0);
        assert!(!player.on_ground);

        // Airborne presses are ignored
        player.jump(&tuning);
        assert_eq!(player.vel_y, -15.0);
    }

    #[test]
    fn test_jump_arc_returns_to_ground() {
        let tuning = Tuning::classic();
        let mut player = Player::new(&tuning);
        player.step(&tuning);
        player.jump(&tuning);

        let mut frames = 0;
        while !player.on_ground {
            player.step(&tuning);
            frames += 1;
            assert!(frames < 100, "player never landed");
        }
        assert!(frames > 10);
        assert_eq!(player.pos.y, 284.0);
        assert_eq!(player.vel_y, 0.0);
    }

    #[test]
    fn test_vertical_motion_truncates_to_whole_pixels() {
        let tuning = Tuning::classic();
        let mut player = Player::new(&tuning);
        player.step(&tuning);
        player.jump(&tuning);
        player.step(&tuning);

        // -15 + 0.8 gravity moves the player by the whole-pixel part only
        assert!((player.vel_y + 14.2).abs() < 1e-4);
        assert_eq!(player.pos.y, 270.0);
    }

    #[test]
    fn test_scroll_and_cull_line() {
        let mut state = GameState::new(3);
        // Park the player far off-field so nothing can collide
        state.tuning.player_start_x = -500.0;
        reset_run(&mut state);
        state.obstacles.push(Obstacle {
            kind: ObstacleKind::Block,
            x: 820.0,
            width: 35.0,
            height: 60.0,
        });

        // dt of zero freezes the spawn clock and score so only scrolling acts
        let input = TickInput::default();
        for _ in 0..181 {
            tick(&mut state, &input, 0.0);
        }
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacles[0].right_edge(), -50.0);

        tick(&mut state, &input, 0.0);
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_spawn_clock_runs_on_wall_time() {
        let mut state = running_state(11);

        // 60 ticks at 20ms sit exactly on the 1200ms boundary
        for _ in 0..60 {
            tick(&mut state, &TickInput::default(), 20.0);
        }
        assert!(state.obstacles.is_empty());

        tick(&mut state, &TickInput::default(), 20.0);
        assert_eq!(state.obstacles.len(), 1);

        for _ in 0..61 {
            tick(&mut state, &TickInput::default(), 20.0);
        }
        assert_eq!(state.obstacles.len(), 2);
    }

    #[test]
    fn test_spawn_kind_weights_and_size_ranges() {
        let mut state = running_state(99);
        for _ in 0..200 {
            spawn_obstacle(&mut state);
        }

        let spikes = state
            .obstacles
            .iter()
            .filter(|o| o.kind == ObstacleKind::Spike)
            .count();
        let blocks = state.obstacles.len() - spikes;
        assert!(blocks > 0);
        assert!(spikes > blocks);

        for obstacle in &state.obstacles {
            assert_eq!(obstacle.x, 820.0);
            let (width_range, height_range) = match obstacle.kind {
                ObstacleKind::Spike => ((32.0, 45.0), (50.0, 75.0)),
                ObstacleKind::Block => ((35.0, 50.0), (55.0, 90.0)),
            };
            assert!(obstacle.width >= width_range.0 && obstacle.width <= width_range.1);
            assert!(obstacle.height >= height_range.0 && obstacle.height <= height_range.1);
        }
    }

    #[test]
    fn test_collision_kills_and_short_circuits() {
        let mut state = running_state(5);
        state.distance = 500.75;
        state.obstacles.push(Obstacle {
            kind: ObstacleKind::Spike,
            x: 130.0,
            width: 40.0,
            height: 60.0,
        });

        let events = tick(&mut state, &TickInput::default(), FRAME_MS);
        assert_eq!(
            events,
            vec![
                GameEvent::PlayerDied { distance: 500 },
                GameEvent::HighScore { score: 500 },
            ]
        );
        assert_eq!(state.phase, GamePhase::Dead);
        assert!(!state.player.alive);
        assert_eq!(state.player.flash_frames, 30);
        assert_eq!(state.restart_frames_left, 90);
        assert_eq!(state.high_score, 500);
        // The death frame does not score or spawn
        assert_eq!(state.distance, 500.75);
        assert_eq!(state.spawn_clock_ms, 0.0);

        // A corpse cannot die again
        let events = tick(&mut state, &TickInput::default(), FRAME_MS);
        assert!(events.is_empty());
        assert_eq!(state.player.flash_frames, 29);
        assert_eq!(state.restart_frames_left, 89);
    }

    #[test]
    fn test_no_high_score_event_below_best() {
        let mut state = running_state(5);
        state.high_score = 1000;
        state.distance = 500.0;
        state.obstacles.push(Obstacle {
            kind: ObstacleKind::Spike,
            x: 130.0,
            width: 40.0,
            height: 60.0,
        });

        let events = tick(&mut state, &TickInput::default(), FRAME_MS);
        assert_eq!(events, vec![GameEvent::PlayerDied { distance: 500 }]);
        assert_eq!(state.high_score, 1000);
    }

    #[test]
    fn test_auto_restart_keeps_level_and_best() {
        let mut state = running_state(5);
        state.level = 3;
        state.scroll_speed = state.tuning.scroll_speed_for(3);
        state.distance = 700.0;
        state.obstacles.push(Obstacle {
            kind: ObstacleKind::Block,
            x: 130.0,
            width: 40.0,
            height: 60.0,
        });
        tick(&mut state, &TickInput::default(), FRAME_MS);
        assert_eq!(state.phase, GamePhase::Dead);

        let mut restarted = Vec::new();
        for _ in 0..90 {
            restarted.extend(tick(&mut state, &TickInput::default(), FRAME_MS));
        }
        assert_eq!(restarted, vec![GameEvent::RunRestarted { level: 3 }]);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.level, 3);
        assert_eq!(state.scroll_speed, 7.5);
        assert_eq!(state.distance, 0.0);
        assert!(state.obstacles.is_empty());
        assert!(state.player.alive);
        assert_eq!(state.high_score, 700);
    }

    #[test]
    fn test_level_up_grows_target_and_speed() {
        let mut state = running_state(5);
        state.distance = 999.9;

        let events = tick(&mut state, &TickInput::default(), FRAME_MS);
        assert_eq!(events, vec![GameEvent::LevelUp { level: 2 }]);
        assert_eq!(state.level, 2);
        assert_eq!(state.target_distance, 1250.0);
        assert_eq!(state.scroll_speed, 6.25);
        assert_eq!(state.phase, GamePhase::Transition);
        assert_eq!(state.transition_frames_left, 120);
        assert_eq!(state.distance, 0.0);
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_level_up_steady_keeps_target() {
        let mut state = GameState::with_tuning(5, Tuning::steady());
        reset_run(&mut state);
        state.distance = 9999.0;

        let events = tick(&mut state, &TickInput::default(), FRAME_MS);
        assert_eq!(events, vec![GameEvent::LevelUp { level: 2 }]);
        assert_eq!(state.target_distance, 10000.0);
        assert_eq!(state.scroll_speed, 9.5);
        assert_eq!(state.transition_frames_left, 120);
    }

    #[test]
    fn test_steady_score_rate_ignores_scroll_speed() {
        let mut state = GameState::with_tuning(5, Tuning::steady());
        reset_run(&mut state);
        assert_eq!(state.scroll_speed, 8.0);

        tick(&mut state, &TickInput::default(), FRAME_MS);
        assert_eq!(state.distance, 4.0);
    }

    #[test]
    fn test_autopilot_clears_near_obstacles() {
        let mut state = running_state(5);
        state.obstacles.push(Obstacle {
            kind: ObstacleKind::Spike,
            x: 186.0,
            width: 40.0,
            height: 60.0,
        });
        state.player.step(&state.tuning);
        assert!(state.player.on_ground);

        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        tick(&mut state, &input, FRAME_MS);
        assert!(!state.player.on_ground);
        assert!(state.player.vel_y < 0.0);
    }

    #[test]
    fn test_autopilot_waits_on_far_obstacles() {
        let mut state = running_state(5);
        state.obstacles.push(Obstacle {
            kind: ObstacleKind::Spike,
            x: 456.0,
            width: 40.0,
            height: 60.0,
        });
        state.player.step(&state.tuning);

        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        tick(&mut state, &input, FRAME_MS);
        assert!(state.player.on_ground);
        assert_eq!(state.player.vel_y, 0.0);
    }

    #[test]
    fn test_run_reaches_level_two() {
        let mut state = running_state(2024);
        let input = TickInput::default();

        // 250 frames of real 60Hz time comfortably covers the first target
        let mut all_events = Vec::new();
        for _ in 0..250 {
            all_events.extend(tick(&mut state, &input, 16.67));
        }

        let level_ups = all_events
            .iter()
            .filter(|e| matches!(e, GameEvent::LevelUp { .. }))
            .count();
        let deaths = all_events
            .iter()
            .filter(|e| matches!(e, GameEvent::PlayerDied { .. }))
            .count();
        assert_eq!(level_ups, 1);
        assert_eq!(deaths, 0);
        assert_eq!(state.level, 2);
        assert_eq!(state.phase, GamePhase::Transition);
        assert_eq!(state.distance, 0.0);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);

        let mut events1 = Vec::new();
        let mut events2 = Vec::new();
        for i in 0..700u64 {
            let input = TickInput {
                jump: i % 13 == 0,
                ..Default::default()
            };
            events1.extend(tick(&mut state1, &input, FRAME_MS));
            events2.extend(tick(&mut state2, &input, FRAME_MS));
        }

        assert_eq!(events1, events2);
        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.phase, state2.phase);
        assert_eq!(state1.level, state2.level);
        assert_eq!(state1.distance, state2.distance);
        assert_eq!(state1.high_score, state2.high_score);
        assert_eq!(state1.player, state2.player);
        assert_eq!(state1.obstacles, state2.obstacles);
    }

    proptest! {
        #[test]
        fn gravity_accrues_every_airborne_frame(extra_frames in 0u32..40) {
            let tuning = Tuning::classic();
            let mut player = Player::new(&tuning);
            player.step(&tuning);
            player.jump(&tuning);

            for _ in 0..extra_frames {
                let before = player.vel_y;
                player.step(&tuning);
                if !player.on_ground {
                    prop_assert!((player.vel_y - (before + tuning.gravity)).abs() < 1e-4);
                } else {
                    prop_assert_eq!(player.vel_y, 0.0);
                }
            }
        }

        #[test]
        fn ground_never_pierced(jumps in proptest::collection::vec(any::<bool>(), 0..400)) {
            let tuning = Tuning::classic();
            let mut player = Player::new(&tuning);
            for &jump in &jumps {
                if jump {
                    player.jump(&tuning);
                }
                player.step(&tuning);
                prop_assert!(player.pos.y + player.size <= tuning.ground_y() + 0.001);
                if player.on_ground {
                    prop_assert_eq!(player.vel_y, 0.0);
                }
            }
        }
    }
}
