//! Auto-refresh settings for list views.
//!
//! Queue and registration boards can re-fetch themselves on a fixed timer.
//! The interval comes from a small fixed set the dashboard offers; the
//! toggle and interval travel together as an [`AutoRefresh`] value.

use std::time::Duration;

/// The fixed set of polling intervals a list view may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshInterval {
    Seconds15,
    Seconds30,
    Minute1,
    Minutes5,
}

impl RefreshInterval {
    /// Every selectable interval, in ascending order.
    pub const ALL: [Self; 4] = [
        Self::Seconds15,
        Self::Seconds30,
        Self::Minute1,
        Self::Minutes5,
    ];

    /// The interval as a [`Duration`].
    pub const fn duration(self) -> Duration {
        match self {
            Self::Seconds15 => Duration::from_secs(15),
            Self::Seconds30 => Duration::from_secs(30),
            Self::Minute1 => Duration::from_secs(60),
            Self::Minutes5 => Duration::from_secs(300),
        }
    }
}

impl Default for RefreshInterval {
    fn default() -> Self {
        Self::Seconds30
    }
}

impl std::fmt::Display for RefreshInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Seconds15 => "15s",
            Self::Seconds30 => "30s",
            Self::Minute1 => "1m",
            Self::Minutes5 => "5m",
        };
        write!(f, "{label}")
    }
}

/// The operator-controlled auto-refresh switch for one list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AutoRefresh {
    pub enabled: bool,
    pub interval: RefreshInterval,
}

impl AutoRefresh {
    /// Auto-refresh switched on at the given interval.
    pub fn every(interval: RefreshInterval) -> Self {
        Self {
            enabled: true,
            interval,
        }
    }

    /// Auto-refresh switched off.
    pub fn off() -> Self {
        Self::default()
    }
}
