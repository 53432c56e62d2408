use std::{
    fmt::Display,
    time::{Duration, Instant},
};

use super::logging::{self, LogLevel};

/// Logs the time spent in a scope when it is dropped, for components at verbose level.
pub struct Benchmark {
    time: Instant,
    cc: &'static str,
    label: String,
}

impl Benchmark {
    pub fn start(cc: &'static str, label: impl Into<String>) -> Self {
        Self {
            time: Instant::now(),
            cc,
            label: label.into(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.time.elapsed()
    }
}

impl Drop for Benchmark {
    fn drop(&mut self) {
        if logging::is_enabled(self.cc) && logging::is_at_level(self.cc, LogLevel::VERBOSE) {
            println!("[{}] {}: {}", self.cc, self.label, self);
        }
    }
}

impl Display for Benchmark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let duration = self.elapsed();

        if duration.as_secs() > 60 {
            write!(f, "{:0>2}:{:0>2}min", duration.as_secs() / 60, duration.as_secs() % 60)
        } else {
            write!(f, "{}ms", duration.as_millis())
        }
    }
}
