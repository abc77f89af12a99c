//! Platform abstraction layer
//!
//! Seams between the simulation and the host: where frame time comes from
//! and where jump presses come from. The shipped implementations cover a
//! native terminal session; tests swap in scripted ones.

use std::time::{Duration, Instant};

use crate::consts::{FRAME_MS, MAX_FRAME_MS};

/// Source of jump presses, polled once per rendered frame
pub trait InputSource {
    /// True when a jump was pressed since the last poll (edge, not level)
    fn poll_jump(&mut self) -> bool;
}

/// Source of frame time
pub trait Clock {
    /// Milliseconds elapsed since the previous call
    fn tick(&mut self) -> f32;
}

/// Wall clock with a frame limiter.
///
/// Sleeps toward the target rate and reports real elapsed time, capped so
/// a stalled host cannot flood the simulation with a giant frame.
pub struct FrameClock {
    target: Duration,
    last: Option<Instant>,
}

impl FrameClock {
    pub fn new(target_fps: u32) -> Self {
        Self {
            target: Duration::from_secs_f64(1.0 / f64::from(target_fps.max(1))),
            last: None,
        }
    }
}

impl Clock for FrameClock {
    fn tick(&mut self) -> f32 {
        if let Some(last) = self.last {
            let elapsed = last.elapsed();
            if elapsed < self.target {
                std::thread::sleep(self.target - elapsed);
            }
        }

        let now = Instant::now();
        let dt_ms = match self.last {
            Some(last) => (now - last).as_secs_f32() * 1000.0,
            None => FRAME_MS,
        };
        self.last = Some(now);

        if dt_ms > MAX_FRAME_MS {
            log::warn!("Frame stalled for {:.0}ms, clamping", dt_ms);
            return MAX_FRAME_MS;
        }
        dt_ms
    }
}

/// Plays back a fixed list of press frames. Drives demos and tests.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    jump_frames: Vec<u64>,
    frame: u64,
}

impl ScriptedInput {
    pub fn new(jump_frames: Vec<u64>) -> Self {
        Self {
            jump_frames,
            frame: 0,
        }
    }
}

impl InputSource for ScriptedInput {
    fn poll_jump(&mut self) -> bool {
        let pressed = self.jump_frames.contains(&self.frame);
        self.frame += 1;
        pressed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_input_sequence() {
        let mut input = ScriptedInput::new(vec![0, 2]);
        assert!(input.poll_jump());
        assert!(!input.poll_jump());
        assert!(input.poll_jump());
        assert!(!input.poll_jump());
    }

    #[test]
    fn test_frame_clock_reports_bounded_dt() {
        let mut clock = FrameClock::new(240);
        assert_eq!(clock.tick(), FRAME_MS);

        let dt = clock.tick();
        assert!(dt > 0.0);
        assert!(dt <= MAX_FRAME_MS);
    }
}
