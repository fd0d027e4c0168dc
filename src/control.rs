//! Pause/resume and speed control.
//!
//! Two orthogonal pieces of state: a [`RunState`] toggled by
//! [`ControlEvent::TogglePause`], and a speed multiplier nudged up and down
//! within [`SpeedLimits`]. [`ControlEvent::Quit`] ends the run from either state.

use crate::config::SpeedLimits;

/// Discrete user intents, already decoupled from whatever key produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlEvent {
    Quit,
    TogglePause,
    SpeedUp,
    SpeedDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Running,
    Paused,
}

impl RunState {
    pub fn toggled(self) -> Self {
        match self {
            RunState::Running => RunState::Paused,
            RunState::Paused => RunState::Running,
        }
    }
}

/// What the frame loop should do after applying an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Run state plus speed multiplier.
#[derive(Debug, Clone, PartialEq)]
pub struct Controls {
    state: RunState,
    speed: f64,
    limits: SpeedLimits,
}

impl Controls {
    /// Start running at `initial_speed`, clamped into `limits`.
    pub fn new(initial_speed: f64, limits: SpeedLimits) -> Self {
        Self {
            state: RunState::Running,
            speed: limits.clamp(initial_speed),
            limits,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.state == RunState::Paused
    }

    #[inline]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn limits(&self) -> SpeedLimits {
        self.limits
    }

    pub fn toggle_pause(&mut self) {
        self.state = self.state.toggled();
        log::debug!("{:?}", self.state);
    }

    pub fn speed_up(&mut self) {
        self.set_speed(self.speed * self.limits.factor);
    }

    pub fn speed_down(&mut self) {
        self.set_speed(self.speed / self.limits.factor);
    }

    /// Set the multiplier directly; clamped like every other change.
    pub fn set_speed(&mut self, speed: f64) {
        let clamped = if speed.is_nan() {
            self.speed
        } else {
            self.limits.clamp(speed)
        };
        if clamped != self.speed {
            log::debug!("Speed {:.2}x -> {:.2}x", self.speed, clamped);
        }
        self.speed = clamped;
    }

    /// Apply one event. Quit short-circuits; everything else continues.
    pub fn apply(&mut self, event: ControlEvent) -> Flow {
        match event {
            ControlEvent::Quit => return Flow::Exit,
            ControlEvent::TogglePause => self.toggle_pause(),
            ControlEvent::SpeedUp => self.speed_up(),
            ControlEvent::SpeedDown => self.speed_down(),
        }
        Flow::Continue
    }
}

impl Default for Controls {
    fn default() -> Self {
        Self::new(1.0, SpeedLimits::default())
    }
}
