//! Clock adapters.
//!
//! - `SystemClock` reads the wall clock
//! - `ManualClock` only moves when told to, for window tests

use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::foundation::Timestamp;
use crate::ports::Clock;

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// Clock with second resolution that advances only via [`ManualClock::advance`].
#[derive(Debug, Default)]
pub struct ManualClock {
    unix_secs: AtomicU64,
}

impl ManualClock {
    /// Starts the clock at the given Unix time.
    pub fn starting_at(unix_secs: u64) -> Self {
        Self {
            unix_secs: AtomicU64::new(unix_secs),
        }
    }

    pub fn advance(&self, secs: u64) {
        self.unix_secs.fetch_add(secs, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        Timestamp::from_unix_secs(self.unix_secs.load(Ordering::SeqCst))
    }
}
