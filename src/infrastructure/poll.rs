//! Poll scheduling
//!
//! A poller delivers `PollTick`s at a fixed period until it is stopped. Ticks
//! carry the feed session they were started for, so a tick that was already
//! queued when the poller stopped is recognised as stale by the feed and
//! never reaches `check_newer_count`.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{self, Instant, MissedTickBehavior},
};
use tokio_util::sync::CancellationToken;

use crate::{domain::FeedScope, model::feed::SessionId};

/// A "check for newer hoaxes" trigger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollTick {
    pub scope: FeedScope,
    pub session: SessionId,
}

pub trait PollScheduler: Send {
    /// Start ticking every `period`, replacing any running schedule.
    fn start(&mut self, period: Duration, tick: PollTick);
    /// Stop ticking; no tick is sent after this returns.
    fn stop(&mut self);
    fn is_running(&self) -> bool;
}

/// Tokio interval task sending ticks over a channel
#[derive(Debug)]
pub struct IntervalPoller {
    sender: mpsc::UnboundedSender<PollTick>,
    running: Option<(CancellationToken, JoinHandle<()>)>,
}

impl IntervalPoller {
    pub fn new(sender: mpsc::UnboundedSender<PollTick>) -> Self {
        Self {
            sender,
            running: None,
        }
    }
}

impl PollScheduler for IntervalPoller {
    fn start(&mut self, period: Duration, tick: PollTick) {
        self.stop();

        let token = CancellationToken::new();
        let child = token.clone();
        let sender = self.sender.clone();
        let handle = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    biased;
                    _ = child.cancelled() => break,
                    _ = interval.tick() => {
                        if child.is_cancelled() || sender.send(tick.clone()).is_err() {
                            break;
                        }
                    }
                }
            }
            log::debug!("poller for {} stopped", tick.scope);
        });
        self.running = Some((token, handle));
    }

    fn stop(&mut self) {
        if let Some((token, handle)) = self.running.take() {
            token.cancel();
            handle.abort();
        }
    }

    fn is_running(&self) -> bool {
        self.running.is_some()
    }
}

impl Drop for IntervalPoller {
    fn drop(&mut self) {
        self.stop();
    }
}

/// What a `RecordingPoller` was asked to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollerCall {
    Started { period: Duration, tick: PollTick },
    Stopped,
}

/// Poller that only records calls; ticks are fired by hand
///
/// Clones share the same log, so a test can keep one handle while the feed
/// owns another.
#[derive(Debug, Clone, Default)]
pub struct RecordingPoller {
    calls: Arc<Mutex<Vec<PollerCall>>>,
    current: Arc<Mutex<Option<PollTick>>>,
}

impl RecordingPoller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<PollerCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn start_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, PollerCall::Started { .. }))
            .count()
    }

    /// The tick the running schedule would deliver
    pub fn current_tick(&self) -> Option<PollTick> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl PollScheduler for RecordingPoller {
    fn start(&mut self, period: Duration, tick: PollTick) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(PollerCall::Started {
                period,
                tick: tick.clone(),
            });
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = Some(tick);
    }

    fn stop(&mut self) {
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        if current.take().is_some() {
            self.calls
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(PollerCall::Stopped);
        }
    }

    fn is_running(&self) -> bool {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}
