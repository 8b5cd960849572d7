//! Timer APIs
//!
//! setTimeout / setInterval on a millisecond clock that only moves when the
//! host advances it, so timer-driven behaviour is deterministic.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use crate::Document;

/// Timer callback
pub type TimerCallback = Rc<dyn Fn(&mut Document)>;

/// Timer handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u32);

/// Timer entry
#[derive(Clone)]
struct Timer {
    due: u64,
    interval: Option<u64>,
    callback: TimerCallback,
}

/// Timer manager
#[derive(Default)]
pub struct Timers {
    now: u64,
    next_id: u32,
    timers: BTreeMap<TimerId, Timer>,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current clock value in milliseconds
    pub fn now(&self) -> u64 {
        self.now
    }

    fn insert(&mut self, delay_ms: u64, interval: Option<u64>, callback: TimerCallback) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.timers.insert(
            id,
            Timer {
                due: self.now + delay_ms,
                interval,
                callback,
            },
        );
        id
    }

    /// Add a timeout
    pub fn set_timeout(&mut self, callback: TimerCallback, delay_ms: u64) -> TimerId {
        self.insert(delay_ms, None, callback)
    }

    /// Add an interval. A zero delay is clamped to 1ms.
    pub fn set_interval(&mut self, callback: TimerCallback, delay_ms: u64) -> TimerId {
        let delay = delay_ms.max(1);
        self.insert(delay, Some(delay), callback)
    }

    /// Clear a timer; unknown or already fired ids are ignored
    pub fn clear(&mut self, id: TimerId) {
        self.timers.remove(&id);
    }

    /// Check if a timer is still scheduled
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.contains_key(&id)
    }

    /// Check if there are pending timers
    pub fn has_pending(&self) -> bool {
        !self.timers.is_empty()
    }

    /// Milliseconds until the next timer fires
    pub fn time_until_next(&self) -> Option<u64> {
        self.timers
            .values()
            .map(|t| t.due.saturating_sub(self.now))
            .min()
    }

    /// Pop the earliest timer due at or before `until`, moving the clock to
    /// its due time. Intervals are rescheduled, timeouts removed.
    pub(crate) fn pop_due(&mut self, until: u64) -> Option<(TimerId, TimerCallback)> {
        let (&id, timer) = self
            .timers
            .iter()
            .filter(|(_, t)| t.due <= until)
            .min_by_key(|(id, t)| (t.due, **id))?;

        let (due, interval, callback) = (timer.due, timer.interval, Rc::clone(&timer.callback));
        self.now = self.now.max(due);
        match interval {
            Some(interval) => {
                if let Some(t) = self.timers.get_mut(&id) {
                    t.due += interval;
                }
            }
            None => {
                self.timers.remove(&id);
            }
        }
        Some((id, callback))
    }

    pub(crate) fn set_now(&mut self, now: u64) {
        self.now = self.now.max(now);
    }
}

impl fmt::Debug for Timers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timers")
            .field("now", &self.now)
            .field("pending", &self.timers.keys().collect::<Vec<_>>())
            .finish()
    }
}
