//! Aggregate monitor status shown beneath the axis bars.

use std::fmt;

/// Overall state of the monitor after an update tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorStatus {
    /// No handler is triggered.
    Ready,
    /// This many handlers are currently triggered.
    Triggered(usize),
}

impl MonitorStatus {
    pub const fn from_count(triggered: usize) -> Self {
        if triggered == 0 {
            Self::Ready
        } else {
            Self::Triggered(triggered)
        }
    }

    pub const fn is_alerting(self) -> bool {
        matches!(self, Self::Triggered(_))
    }
}

impl fmt::Display for MonitorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready => f.write_str("Ready"),
            Self::Triggered(n) => write!(f, "Triggered handlers: {n}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_count() {
        assert_eq!(MonitorStatus::from_count(0), MonitorStatus::Ready);
        assert_eq!(MonitorStatus::from_count(2), MonitorStatus::Triggered(2));
        assert!(MonitorStatus::Triggered(1).is_alerting());
        assert_eq!(MonitorStatus::Triggered(3).to_string(), "Triggered handlers: 3");
    }
}
