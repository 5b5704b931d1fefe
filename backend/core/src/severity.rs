//! Six-level severity model.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};

use serde::{Deserialize, Serialize};

use crate::error::CorrlogError;

/// Ordered logging priority, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Silly,
    Debug,
    Verbose,
    Info,
    Warn,
    Error,
}

impl Severity {
    /// Every level in ascending order.
    pub const ALL: [Severity; 6] = [
        Severity::Silly,
        Severity::Debug,
        Severity::Verbose,
        Severity::Info,
        Severity::Warn,
        Severity::Error,
    ];

    /// Position in the ordering, `0` for silly up to `5` for error.
    pub fn rank(self) -> u8 {
        self as u8
    }

    pub fn from_rank(rank: u8) -> Option<Self> {
        Self::ALL.get(rank as usize).copied()
    }

    /// Whether a record at this severity passes a sink configured at `threshold`.
    pub fn allows(self, threshold: Severity) -> bool {
        self >= threshold
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Silly => "silly",
            Severity::Debug => "debug",
            Severity::Verbose => "verbose",
            Severity::Info => "info",
            Severity::Warn => "warn",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = CorrlogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == normalized)
            .ok_or_else(|| CorrlogError::InvalidSeverity(s.to_string()))
    }
}

/// A sink threshold that can be changed while other threads are logging.
#[derive(Debug)]
pub struct SeverityCell(AtomicU8);

impl SeverityCell {
    pub fn new(level: Severity) -> Self {
        Self(AtomicU8::new(level.rank()))
    }

    pub fn load(&self) -> Severity {
        // Only ranks produced by `store` ever land in the cell.
        Severity::from_rank(self.0.load(Ordering::Acquire)).unwrap_or(Severity::Silly)
    }

    pub fn store(&self, level: Severity) {
        self.0.store(level.rank(), Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_is_silly_to_error() {
        let mut sorted = Severity::ALL;
        sorted.sort();
        assert_eq!(sorted, Severity::ALL);
        assert!(Severity::Silly < Severity::Debug);
        assert!(Severity::Verbose < Severity::Info);
        assert!(Severity::Warn < Severity::Error);
    }

    #[test]
    fn test_allows_matches_rank_for_every_pair() {
        for message in Severity::ALL {
            for threshold in Severity::ALL {
                assert_eq!(
                    message.allows(threshold),
                    message.rank() >= threshold.rank(),
                    "{message} against threshold {threshold}"
                );
            }
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("ERROR".parse::<Severity>().unwrap(), Severity::Error);
        assert_eq!(" verbose ".parse::<Severity>().unwrap(), Severity::Verbose);
        assert!(matches!(
            "fatal".parse::<Severity>(),
            Err(CorrlogError::InvalidSeverity(s)) if s == "fatal"
        ));
    }

    #[test]
    fn test_display_parses_back() {
        for level in Severity::ALL {
            assert_eq!(level.to_string().parse::<Severity>().unwrap(), level);
        }
    }

    #[test]
    fn test_serde_uses_lowercase_names() {
        assert_eq!(serde_json::to_string(&Severity::Verbose).unwrap(), "\"verbose\"");
        let parsed: Severity = serde_json::from_str("\"silly\"").unwrap();
        assert_eq!(parsed, Severity::Silly);
    }

    #[test]
    fn test_cell_store_and_load() {
        let cell = SeverityCell::new(Severity::Silly);
        assert_eq!(cell.load(), Severity::Silly);
        cell.store(Severity::Warn);
        assert_eq!(cell.load(), Severity::Warn);
    }
}
