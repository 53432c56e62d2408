use std::{collections::HashMap, sync::RwLock};

use serde_derive::Deserialize;

pub(crate) static LOGGER_CONFIG: once_cell::sync::Lazy<RwLock<LoggingConfig>> =
    once_cell::sync::Lazy::new(|| RwLock::new(LoggingConfig::default()));

#[derive(Copy, Clone, Debug, PartialEq, PartialOrd, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    #[default]
    INFO,
    VERBOSE,
}

#[macro_export]
macro_rules! logln {
    ($fmt:literal) => {
        if $crate::util::logging::is_enabled(Self::CC) {
            println!("[{}:{}] {}", file!(), line!(), $fmt);
        }
    };
    ($fmt:literal, $($arg:tt)*) => {
        if $crate::util::logging::is_enabled(Self::CC) {
            print!("[{}:{}] ", file!(), line!());
            println!($fmt, $($arg)*);
        }
    };
}

#[macro_export]
macro_rules! logvbln {
    ($fmt:literal) => {
        if $crate::util::logging::is_enabled(Self::CC)
            && $crate::util::logging::is_at_level(Self::CC, $crate::util::logging::LogLevel::VERBOSE)
        {
            println!("[{}:{}] {}", file!(), line!(), $fmt);
        }
    };
    ($fmt:literal, $($arg:tt)*) => {
        if $crate::util::logging::is_enabled(Self::CC)
            && $crate::util::logging::is_at_level(Self::CC, $crate::util::logging::LogLevel::VERBOSE)
        {
            print!("[{}:{}] ", file!(), line!());
            println!($fmt, $($arg)*);
        }
    };
}

// A poisoned lock only means a panic happened mid-update; the flags are still usable.
fn read_config<R>(f: impl FnOnce(&LoggingConfig) -> R) -> R {
    match LOGGER_CONFIG.read() {
        Ok(config) => f(&*config),
        Err(poisoned) => f(&*poisoned.into_inner()),
    }
}

fn write_config(f: impl FnOnce(&mut LoggingConfig)) {
    match LOGGER_CONFIG.write() {
        Ok(mut config) => f(&mut *config),
        Err(poisoned) => f(&mut *poisoned.into_inner()),
    }
}

pub fn is_enabled(cc: &'static str) -> bool {
    read_config(|config| config.cc_enabled(cc))
}

pub fn is_at_level(cc: &'static str, level: LogLevel) -> bool {
    read_config(|config| config.cc_at_level(cc, level))
}

pub fn set_global_level(level: LogLevel) {
    write_config(|config| config.set_global_level(level));
}

pub struct LoggingConfig {
    global_tracing_enabled: bool,
    global_level: LogLevel,
    flags: HashMap<&'static str, (bool, LogLevel)>, // <component code, (tracing enabled, trace level)>
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            global_tracing_enabled: true,
            global_level: LogLevel::INFO,
            flags: Default::default(),
        }
    }
}

impl LoggingConfig {
    pub fn cc_enabled(&self, cc: &str) -> bool {
        if !self.global_tracing_enabled {
            return false;
        }

        self.flags.get(cc).map_or(true, |flag| flag.0)
    }

    pub fn cc_at_level(&self, cc: &str, level: LogLevel) -> bool {
        if self.global_level >= level {
            return true;
        }

        self.flags.get(cc).map_or(LogLevel::INFO, |flag| flag.1) == level
    }

    pub fn enable_cc(&mut self, cc: &'static str, level: LogLevel) {
        self.flags.insert(cc, (true, level));
    }

    pub fn disable_cc(&mut self, cc: &'static str) {
        self.flags.insert(cc, (false, LogLevel::INFO));
    }

    pub fn enable_global_tracing(&mut self) {
        self.global_tracing_enabled = true;
    }

    pub fn disable_global_tracing(&mut self) {
        self.global_tracing_enabled = false;
    }

    pub fn set_global_level(&mut self, level: LogLevel) {
        self.global_level = level;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn components_follow_global_switch() {
        let mut config = LoggingConfig::default();
        assert!(config.cc_enabled("Loader"));

        config.disable_global_tracing();
        assert!(!config.cc_enabled("Loader"));

        config.enable_global_tracing();
        config.disable_cc("Loader");
        assert!(!config.cc_enabled("Loader"));
        assert!(config.cc_enabled("Pivot"));
    }

    #[test]
    fn verbose_needs_global_level_or_override() {
        let mut config = LoggingConfig::default();
        assert!(config.cc_at_level("Loader", LogLevel::INFO));
        assert!(!config.cc_at_level("Loader", LogLevel::VERBOSE));

        config.enable_cc("Loader", LogLevel::VERBOSE);
        assert!(config.cc_at_level("Loader", LogLevel::VERBOSE));
        assert!(!config.cc_at_level("Pivot", LogLevel::VERBOSE));

        config.set_global_level(LogLevel::VERBOSE);
        assert!(config.cc_at_level("Pivot", LogLevel::VERBOSE));
    }

    #[test]
    fn global_level_reaches_shared_config() {
        set_global_level(LogLevel::INFO);
        assert!(is_enabled("Loader"));
        assert!(is_at_level("Loader", LogLevel::INFO));
    }
}
