//! Severity definitions

use super::error::LoggerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Graded importance of a log message.
///
/// Lower discriminants are more severe: `Fatal < Error < ... < Verbose`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[repr(u8)]
pub enum Severity {
    Fatal = 0,
    Error = 1,
    Warning = 2,
    #[default]
    Information = 3,
    Debug = 4,
    Verbose = 5,
}

impl Severity {
    /// All severities, most severe first
    pub const ALL: [Severity; 6] = [
        Severity::Fatal,
        Severity::Error,
        Severity::Warning,
        Severity::Information,
        Severity::Debug,
        Severity::Verbose,
    ];

    /// Fixed three-letter code shown in rendered lines
    pub fn code(&self) -> &'static str {
        match self {
            Severity::Fatal => "FTL",
            Severity::Error => "ERR",
            Severity::Warning => "WRN",
            Severity::Information => "INF",
            Severity::Debug => "DBG",
            Severity::Verbose => "VRB",
        }
    }

    pub fn to_str(&self) -> &'static str {
        match self {
            Severity::Fatal => "Fatal",
            Severity::Error => "Error",
            Severity::Warning => "Warning",
            Severity::Information => "Information",
            Severity::Debug => "Debug",
            Severity::Verbose => "Verbose",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl TryFrom<u8> for Severity {
    type Error = LoggerError;

    fn try_from(value: u8) -> Result<Self, LoggerError> {
        Severity::ALL
            .get(usize::from(value))
            .copied()
            .ok_or_else(|| {
                LoggerError::invalid_argument("severity", format!("unknown severity value {}", value))
            })
    }
}

impl FromStr for Severity {
    type Err = LoggerError;

    /// Accepts full names and short codes, case-insensitive
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "FATAL" | "FTL" => Ok(Severity::Fatal),
            "ERROR" | "ERR" => Ok(Severity::Error),
            "WARNING" | "WARN" | "WRN" => Ok(Severity::Warning),
            "INFORMATION" | "INFO" | "INF" => Ok(Severity::Information),
            "DEBUG" | "DBG" => Ok(Severity::Debug),
            "VERBOSE" | "VRB" => Ok(Severity::Verbose),
            _ => Err(LoggerError::invalid_argument(
                "severity",
                format!("invalid severity: '{}'", s),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_is_most_severe_first() {
        assert!(Severity::Fatal < Severity::Error);
        assert!(Severity::Error < Severity::Warning);
        assert!(Severity::Warning < Severity::Information);
        assert!(Severity::Information < Severity::Debug);
        assert!(Severity::Debug < Severity::Verbose);
    }

    #[test]
    fn test_codes() {
        let codes: Vec<_> = Severity::ALL.iter().map(Severity::code).collect();
        assert_eq!(codes, ["FTL", "ERR", "WRN", "INF", "DBG", "VRB"]);
    }

    #[test]
    fn test_try_from_u8() {
        assert_eq!(Severity::try_from(0).unwrap(), Severity::Fatal);
        assert_eq!(Severity::try_from(5).unwrap(), Severity::Verbose);
        assert!(Severity::try_from(6).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_parse_names_and_codes() {
        assert_eq!("warning".parse::<Severity>().unwrap(), Severity::Warning);
        assert_eq!("WRN".parse::<Severity>().unwrap(), Severity::Warning);
        assert_eq!("info".parse::<Severity>().unwrap(), Severity::Information);
        assert_eq!(" vrb ".parse::<Severity>().unwrap(), Severity::Verbose);
        assert!("loud".parse::<Severity>().unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_default_is_information() {
        assert_eq!(Severity::default(), Severity::Information);
    }
}
