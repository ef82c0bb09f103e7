//! Per-question countdown and the post-answer feedback delay.
//!
//! Both timers run as spawned tokio tasks that post [`Trigger`]s back to the
//! session's channel. Every trigger carries the epoch of the task that sent
//! it; cancelling or restarting a timer bumps the epoch, so anything still
//! queued from an older task is recognised as stale and dropped.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Seconds allowed per question.
pub const QUESTION_TIME_LIMIT: u32 = 30;

/// Default pause between answering and moving on, in milliseconds.
pub const DEFAULT_FEEDBACK_DELAY_MS: u64 = 1700;

pub const DEFAULT_FEEDBACK_DELAY: Duration = Duration::from_millis(DEFAULT_FEEDBACK_DELAY_MS);

const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// A timed wake-up delivered to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// One second of the question clock has passed.
    Tick { epoch: u64 },
    /// The feedback delay after an answer has finished.
    FeedbackElapsed { epoch: u64 },
}

/// A spawned task that is aborted when the handle is dropped.
struct ScheduledTask(JoinHandle<()>);

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Result of feeding a tick trigger to the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockTick {
    /// The tick came from a cancelled task.
    Stale,
    /// Time remains on the clock.
    Running(u32),
    /// The clock hit zero and stopped itself.
    Expired,
}

/// Countdown for the current question. Owns at most one ticking task.
pub struct SessionClock {
    limit: u32,
    remaining: u32,
    epoch: u64,
    task: Option<ScheduledTask>,
    triggers: mpsc::UnboundedSender<Trigger>,
}

impl SessionClock {
    pub fn new(limit: u32, triggers: mpsc::UnboundedSender<Trigger>) -> Self {
        Self {
            limit,
            remaining: limit,
            epoch: 0,
            task: None,
            triggers,
        }
    }

    /// Reset to the full limit and begin ticking. Any running tick is
    /// cancelled first. Must be called from within a tokio runtime.
    pub fn start(&mut self) {
        self.stop();
        self.remaining = self.limit;

        let epoch = self.epoch;
        let triggers = self.triggers.clone();
        // Anchored at start, so a late wake-up does not push later ticks back.
        let mut ticks = tokio::time::interval(TICK_INTERVAL);
        let handle = tokio::spawn(async move {
            ticks.tick().await;
            loop {
                ticks.tick().await;
                if triggers.send(Trigger::Tick { epoch }).is_err() {
                    break;
                }
            }
        });
        self.task = Some(ScheduledTask(handle));
    }

    /// Cancel the ticking task, if any. Remaining time is left as is.
    pub fn stop(&mut self) {
        self.task = None;
        self.epoch += 1;
    }

    /// Apply a tick. Ticks from cancelled tasks are reported as stale and
    /// change nothing.
    pub fn on_tick(&mut self, epoch: u64) -> ClockTick {
        if epoch != self.epoch || self.task.is_none() {
            return ClockTick::Stale;
        }

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.stop();
            ClockTick::Expired
        } else {
            ClockTick::Running(self.remaining)
        }
    }

    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub(crate) fn reset(&mut self) {
        self.stop();
        self.remaining = self.limit;
    }
}

/// One-shot delay between showing answer feedback and moving on.
pub struct FeedbackDelay {
    epoch: u64,
    task: Option<ScheduledTask>,
    triggers: mpsc::UnboundedSender<Trigger>,
}

impl FeedbackDelay {
    pub fn new(triggers: mpsc::UnboundedSender<Trigger>) -> Self {
        Self {
            epoch: 0,
            task: None,
            triggers,
        }
    }

    pub fn schedule(&mut self, delay: Duration) {
        self.cancel();

        let epoch = self.epoch;
        let triggers = self.triggers.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = triggers.send(Trigger::FeedbackElapsed { epoch });
        });
        self.task = Some(ScheduledTask(handle));
    }

    pub fn cancel(&mut self) {
        self.task = None;
        self.epoch += 1;
    }

    /// Returns true when `epoch` belongs to the pending delay, which is then
    /// considered finished.
    pub fn on_elapsed(&mut self, epoch: u64) -> bool {
        if epoch != self.epoch || self.task.is_none() {
            return false;
        }
        self.cancel();
        true
    }

    pub fn is_pending(&self) -> bool {
        self.task.is_some()
    }
}

/// Format seconds as `MM:SS`.
pub fn format_time(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
