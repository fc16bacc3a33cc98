/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Shared types for fastwire operations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Importance of a log message, ordered from most to least severe.
///
/// Low numeric values are more important. Consumers gate delivery with
/// `want_log(level)`: a consumer interested in [`LogLevel::Warning`]
/// typically accepts every level `<= Warning`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[repr(u8)]
pub enum LogLevel {
    /// The process cannot continue.
    Fatal = 0,
    /// A serious problem; decoding may be unreliable.
    Serious = 1,
    /// A recoverable problem worth attention.
    #[default]
    Warning = 2,
    /// Normal operational events.
    Info = 3,
    /// Detailed diagnostic output.
    Verbose = 4,
}

impl LogLevel {
    /// Returns the numeric severity (0 = most important).
    #[inline]
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Converts a numeric severity back to a level, if in range.
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Fatal),
            1 => Some(Self::Serious),
            2 => Some(Self::Warning),
            3 => Some(Self::Info),
            4 => Some(Self::Verbose),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Fatal => "fatal",
            Self::Serious => "serious",
            Self::Warning => "warning",
            Self::Info => "info",
            Self::Verbose => "verbose",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_ordering() {
        assert!(LogLevel::Fatal < LogLevel::Verbose);
        assert!(LogLevel::Warning <= LogLevel::Info);
        assert_eq!(LogLevel::Serious.as_u8(), 1);
    }

    #[test]
    fn test_log_level_from_u8() {
        assert_eq!(LogLevel::from_u8(0), Some(LogLevel::Fatal));
        assert_eq!(LogLevel::from_u8(4), Some(LogLevel::Verbose));
        assert_eq!(LogLevel::from_u8(5), None);
    }

    #[test]
    fn test_log_level_display() {
        assert_eq!(LogLevel::Info.to_string(), "info");
    }
}
