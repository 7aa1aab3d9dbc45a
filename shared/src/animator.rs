use std::fmt;

use rand::Rng;

use crate::wheel::WheelState;

/// Angular speed in degrees per frame at the start of a spin.
pub const INITIAL_SPEED: f64 = 20.0;
/// The spin ends on the first frame whose speed falls below this.
pub const STOP_THRESHOLD: f64 = 0.1;
/// Every spin travels between three and six full turns.
pub const MIN_TURNS: u32 = 3;
pub const MAX_TURNS: u32 = 6;

/// Ease-out curve driving the deceleration. Monotonically increasing on
/// [0, 1] with f(0) = 0 and f(1) = 1.
pub fn ease_out_sine(x: f64) -> f64 {
    (x * std::f64::consts::FRAC_PI_2).sin()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Spinning,
}

impl Default for Phase {
    fn default() -> Self {
        Phase::Idle
    }
}

/// What happened on one animation frame.
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    /// The wheel advanced; redraw at the new rotation.
    Moving { speed: f64 },
    /// Deceleration crossed the stop threshold this frame. Carries the item
    /// snapshot taken at spin start so the caller can persist it with the
    /// winner.
    Finished {
        winner: String,
        item_list: Vec<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinError {
    /// Spinning an empty wheel. Surfaced to the user, never fatal.
    NoItems,
}

impl fmt::Display for SpinError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpinError::NoItems => write!(f, "cannot spin an empty wheel"),
        }
    }
}

impl std::error::Error for SpinError {}

/// Drives one decelerating rotation at a time. The animator never schedules
/// anything itself: the caller invokes [`SpinAnimator::step`] once per
/// animation frame, which keeps the termination condition and the winner
/// computation runnable under a plain test loop.
#[derive(Debug, Clone, Default)]
pub struct SpinAnimator {
    phase: Phase,
    start_deg: f64,
    target_rotation: f64,
    snapshot: Vec<String>,
}

impl SpinAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_spinning(&self) -> bool {
        self.phase == Phase::Spinning
    }

    /// Start a spin from the wheel's current rotation. A no-op while a spin
    /// is already in flight; fails on an empty wheel.
    ///
    /// The item list is snapshotted here: mutations made to the wheel while
    /// it spins cannot change the outcome, and the snapshot is what gets
    /// persisted alongside the winner.
    pub fn spin(&mut self, wheel: &WheelState, rng: &mut impl Rng) -> Result<(), SpinError> {
        if self.phase == Phase::Spinning {
            return Ok(());
        }
        if wheel.is_empty() {
            return Err(SpinError::NoItems);
        }
        self.snapshot = wheel.items().to_vec();
        self.start_deg = wheel.current_deg();
        self.target_rotation = rng.gen_range(360 * MIN_TURNS..=360 * MAX_TURNS) as f64;
        self.phase = Phase::Spinning;
        Ok(())
    }

    /// Advance one frame. Returns `None` when idle.
    pub fn step(&mut self, wheel: &mut WheelState) -> Option<Frame> {
        if self.phase != Phase::Spinning {
            return None;
        }

        let travelled = wheel.current_deg() - self.start_deg;
        let progress = (travelled / self.target_rotation).clamp(0.0, 1.0);
        let speed = (1.0 - ease_out_sine(progress)) * INITIAL_SPEED;

        if speed < STOP_THRESHOLD {
            self.phase = Phase::Idle;
            let item_list = std::mem::take(&mut self.snapshot);
            let frozen = WheelState::from_parts(item_list.clone(), wheel.current_deg());
            // spin() rejects empty wheels, so the snapshot always resolves.
            let winner = frozen.winner().unwrap_or_default().to_string();
            return Some(Frame::Finished { winner, item_list });
        }

        wheel.advance(speed);
        Some(Frame::Moving { speed })
    }
}
