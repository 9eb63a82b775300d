//! The general configuration settings for noice.
//!
//! This module defines the [General] struct for deserializing
//! general settings from the noice.toml configuration file
//! and the [InternalGeneral] struct for internal use within noice.

use serde::Deserialize;
use std::time::Duration;

/// Shortest accepted input wait.
const MIN_TICK_MS: u64 = 50;
/// Longest accepted input wait.
const MAX_TICK_MS: u64 = 60_000;

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct General {
    mtime_order: bool,
    idle_timeout: u32,
    idle_cmd: String,
    tick_ms: u64,
}

impl Default for General {
    fn default() -> Self {
        General {
            mtime_order: false,
            idle_timeout: 0,
            idle_cmd: "rain".into(),
            tick_ms: 1000,
        }
    }
}

#[derive(Debug)]
pub struct InternalGeneral {
    mtime_order: bool,
    idle_timeout: u32,
    idle_cmd: String,
    tick: Duration,
}

impl From<General> for InternalGeneral {
    fn from(g: General) -> Self {
        let tick_ms = g.tick_ms.clamp(MIN_TICK_MS, MAX_TICK_MS);
        if tick_ms != g.tick_ms {
            eprintln!(
                "[Warning] tick_ms={} out of range ({}..={}), clamped to {}",
                g.tick_ms, MIN_TICK_MS, MAX_TICK_MS, tick_ms
            );
        }
        Self {
            mtime_order: g.mtime_order,
            idle_timeout: g.idle_timeout,
            idle_cmd: g.idle_cmd,
            tick: Duration::from_millis(tick_ms),
        }
    }
}

impl InternalGeneral {
    #[inline]
    pub fn mtime_order(&self) -> bool {
        self.mtime_order
    }

    /// Number of consecutive idle ticks before the idle command runs. Zero disables it.
    #[inline]
    pub fn idle_timeout(&self) -> u32 {
        self.idle_timeout
    }

    #[inline]
    pub fn idle_cmd(&self) -> &str {
        &self.idle_cmd
    }

    /// How long one input wait lasts before it counts as an idle tick.
    #[inline]
    pub fn tick(&self) -> Duration {
        self.tick
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_is_clamped() {
        let g = General {
            tick_ms: 1,
            ..General::default()
        };
        let internal = InternalGeneral::from(g);
        assert_eq!(internal.tick(), Duration::from_millis(MIN_TICK_MS));
    }

    #[test]
    fn defaults_disable_idle_command() {
        let internal = InternalGeneral::from(General::default());
        assert_eq!(internal.idle_timeout(), 0);
        assert_eq!(internal.idle_cmd(), "rain");
        assert!(!internal.mtime_order());
        assert_eq!(internal.tick(), Duration::from_secs(1));
    }
}
