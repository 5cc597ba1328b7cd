//! Periodic callbacks on the cooperative frame scheduler
//!
//! An `Interval` is the "run every N ms until cancelled" primitive. The host
//! feeds it elapsed time; it reports how many periods came due. Once its
//! `CancelToken` is cancelled it never fires again.

use std::cell::Cell;
use std::rc::Rc;

use crate::consts::MAX_CATCHUP_TICKS;

/// Shared cancellation flag (single-threaded)
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

#[derive(Debug)]
pub struct Interval {
    period_secs: f32,
    accumulator: f32,
    token: CancelToken,
}

impl Interval {
    /// Fire every `period_ms` until `token` is cancelled
    pub fn every(period_ms: u32, token: CancelToken) -> Self {
        Self {
            period_secs: period_ms.max(1) as f32 / 1000.0,
            accumulator: 0.0,
            token,
        }
    }

    pub fn token(&self) -> &CancelToken {
        &self.token
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Accumulate `dt` seconds; returns the number of periods now due,
    /// at most `MAX_CATCHUP_TICKS`
    pub fn advance(&mut self, dt: f32) -> u32 {
        if self.token.is_cancelled() {
            self.accumulator = 0.0;
            return 0;
        }
        // NaN and negative deltas count as no time
        self.accumulator += dt.max(0.0);
        let mut due = 0;
        while self.accumulator >= self.period_secs && due < MAX_CATCHUP_TICKS {
            self.accumulator -= self.period_secs;
            due += 1;
        }
        if self.accumulator >= self.period_secs {
            log::warn!(
                "Clock stalled: dropping {} s of countdown backlog",
                self.accumulator
            );
            self.accumulator = 0.0;
        }
        due
    }
}
