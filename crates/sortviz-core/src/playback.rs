//! Step-playback engine.
//!
//! Animates a recorded trace by moving a frame index forward on a repeating
//! timer. All timing goes through a [`TickScheduler`], so every transition
//! can be driven by hand in tests.

use std::sync::Arc;
use std::time::Duration;

use crate::constants::BASE_FRAME_DURATION_MS;
use crate::error::VizError;
use crate::model::RunResult;
use crate::scheduler::{TickScheduler, TimerId};
use crate::validation::check_speed;

/// Playback state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// No trace loaded.
    Idle,
    /// Timer armed, frames advancing.
    Playing,
    /// Timer disarmed, frame index held.
    Paused,
    /// Last frame reached. Terminal until the next `start`.
    Finished,
}

/// Drives a frame index over one run's trace.
///
/// Invariants: at most one timer is armed, and only while `Playing`; the
/// frame index stays within `[0, frame_count - 1]` and never decreases
/// during playback.
pub struct PlaybackEngine<S: TickScheduler> {
    scheduler: S,
    state: PlaybackState,
    run: Option<Arc<RunResult>>,
    frame: usize,
    speed: u32,
    base: Duration,
    timer: Option<TimerId>,
}

impl<S: TickScheduler> PlaybackEngine<S> {
    /// Create an idle engine.
    pub fn new(scheduler: S, speed: u32) -> Result<Self, VizError> {
        Ok(Self {
            scheduler,
            state: PlaybackState::Idle,
            run: None,
            frame: 0,
            speed: check_speed(speed)?,
            base: Duration::from_millis(BASE_FRAME_DURATION_MS),
            timer: None,
        })
    }

    /// Override the duration divided by the speed.
    #[must_use]
    pub fn with_base_duration(mut self, base: Duration) -> Self {
        self.base = base;
        self
    }

    /// Load `run` and play it from the first frame.
    ///
    /// Any armed timer is cancelled first. A run without a trace is rejected
    /// and leaves the engine untouched.
    pub fn start(&mut self, run: Arc<RunResult>) -> Result<(), VizError> {
        if !run.has_trace() {
            return Err(VizError::Validation(
                "run has no recorded steps to play back".into(),
            ));
        }
        self.disarm();
        self.frame = 0;
        let single_frame = run.frame_count() == 1;
        self.run = Some(run);
        if single_frame {
            self.state = PlaybackState::Finished;
        } else {
            self.state = PlaybackState::Playing;
            self.arm();
        }
        tracing::debug!(frames = self.frame_count(), state = ?self.state, "playback started");
        Ok(())
    }

    /// Handle a timer tick; returns the new frame index if it advanced.
    ///
    /// Ticks from any timer other than the armed one are ignored.
    pub fn tick(&mut self, id: TimerId) -> Option<usize> {
        if self.state != PlaybackState::Playing || self.timer != Some(id) {
            return None;
        }
        let last = self.last_index();
        self.frame = (self.frame + 1).min(last);
        if self.frame == last {
            self.disarm();
            self.state = PlaybackState::Finished;
            tracing::debug!(frame = self.frame, "playback finished");
        }
        Some(self.frame)
    }

    /// Pause a playing animation. Returns whether the state changed.
    pub fn pause(&mut self) -> bool {
        if self.state != PlaybackState::Playing {
            return false;
        }
        self.disarm();
        self.state = PlaybackState::Paused;
        true
    }

    /// Resume a paused animation. No-op in any other state.
    pub fn resume(&mut self) -> bool {
        if self.state != PlaybackState::Paused {
            return false;
        }
        self.state = PlaybackState::Playing;
        self.arm();
        true
    }

    /// Play/pause toggle bound to the UI key.
    pub fn toggle(&mut self) -> bool {
        match self.state {
            PlaybackState::Playing => self.pause(),
            PlaybackState::Paused => self.resume(),
            PlaybackState::Idle | PlaybackState::Finished => false,
        }
    }

    /// Change the speed; re-arms a running timer without touching the frame.
    pub fn set_speed(&mut self, speed: u32) -> Result<(), VizError> {
        self.speed = check_speed(speed)?;
        if self.state == PlaybackState::Playing {
            self.disarm();
            self.arm();
        }
        Ok(())
    }

    /// Cancel the timer and unload the trace.
    pub fn stop(&mut self) {
        self.disarm();
        self.run = None;
        self.frame = 0;
        self.state = PlaybackState::Idle;
    }

    #[must_use]
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    #[must_use]
    pub fn frame(&self) -> usize {
        self.frame
    }

    #[must_use]
    pub fn speed(&self) -> u32 {
        self.speed
    }

    /// Time between ticks at the current speed.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.base / self.speed
    }

    /// Frames in the loaded trace, 0 when idle.
    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.run.as_ref().map_or(0, |r| r.frame_count())
    }

    /// Snapshot at the current frame index.
    #[must_use]
    pub fn current_frame(&self) -> Option<&[i64]> {
        self.run.as_ref().and_then(|r| r.frame(self.frame))
    }

    /// Loaded run, if any.
    #[must_use]
    pub fn run(&self) -> Option<&Arc<RunResult>> {
        self.run.as_ref()
    }

    /// Fraction of the trace shown so far, in [0.0, 1.0].
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn progress(&self) -> f64 {
        match self.last_index() {
            0 if self.run.is_some() => 1.0,
            0 => 0.0,
            last => self.frame as f64 / last as f64,
        }
    }

    /// Armed timer, if any.
    #[must_use]
    pub fn active_timer(&self) -> Option<TimerId> {
        self.timer
    }

    #[must_use]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Mutable scheduler access for the event loop that polls it.
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    fn last_index(&self) -> usize {
        self.frame_count().saturating_sub(1)
    }

    fn arm(&mut self) {
        let interval = self.interval();
        self.timer = Some(self.scheduler.schedule_repeating(interval));
    }

    fn disarm(&mut self) {
        if let Some(id) = self.timer.take() {
            self.scheduler.cancel(id);
        }
    }
}

impl<S: TickScheduler> Drop for PlaybackEngine<S> {
    fn drop(&mut self) {
        self.disarm();
    }
}
