//! Countdown driving an attempt's clock.
//!
//! A [`Countdown`] owns a background task that emits one tick per period.
//! Dropping or cancelling it aborts the task, so no tick outlives the
//! attempt it was started for.

use std::time::Duration;

use log::debug;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use uuid::Uuid;

/// Default tick cadence: one second per tick.
pub const DEFAULT_TICK: Duration = Duration::from_secs(1);

pub struct Countdown {
    attempt_id: Uuid,
    ticks: mpsc::UnboundedReceiver<()>,
    task: JoinHandle<()>,
}

impl Countdown {
    /// Start ticking every `period` for the attempt `attempt_id`.
    ///
    /// The first tick arrives one full period after starting. Must be called
    /// from within a tokio runtime.
    pub fn start(attempt_id: Uuid, period: Duration) -> Self {
        let (tx, ticks) = mpsc::unbounded_channel();
        let task = tokio::spawn(async move {
            let mut interval = time::interval_at(time::Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Burst);
            loop {
                interval.tick().await;
                if tx.send(()).is_err() {
                    break;
                }
            }
        });
        debug!("countdown started for attempt {} every {:?}", attempt_id, period);

        Self {
            attempt_id,
            ticks,
            task,
        }
    }

    pub fn attempt_id(&self) -> Uuid {
        self.attempt_id
    }

    /// Wait for the next tick. Returns `None` only if the task has stopped.
    pub async fn tick(&mut self) -> Option<()> {
        self.ticks.recv().await
    }

    /// Stop ticking. Pending ticks are discarded.
    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.task.abort();
        self.ticks.close();
        debug!("countdown cancelled for attempt {}", self.attempt_id);
    }
}
