//! Severity - ordered log importance
//!
//! Lower numeric value means more severe. The derived `Ord` follows the
//! discriminant, so `Severity::Emergency < Severity::Debug`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ContractError;

/// Log severity, most severe first
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Severity {
    Emergency = 0,
    Alert = 1,
    Critical = 2,
    Error = 3,
    Warning = 4,
    Notice = 5,
    #[default]
    Informational = 6,
    Debug = 7,
}

impl Severity {
    /// All severities, most severe first
    pub const ALL: [Severity; 8] = [
        Severity::Emergency,
        Severity::Alert,
        Severity::Critical,
        Severity::Error,
        Severity::Warning,
        Severity::Notice,
        Severity::Informational,
        Severity::Debug,
    ];

    /// Fixed-width (6 char) label used in formatted log lines
    pub fn label(self) -> &'static str {
        match self {
            Severity::Emergency => "Emrgcy",
            Severity::Alert => "Alert ",
            Severity::Critical => "Crit  ",
            Severity::Error => "Error ",
            Severity::Warning => "Warn  ",
            Severity::Notice => "Notice",
            Severity::Informational => "Info  ",
            Severity::Debug => "Debug ",
        }
    }

    /// Lower-case name, as used in configuration
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Emergency => "emergency",
            Severity::Alert => "alert",
            Severity::Critical => "critical",
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Notice => "notice",
            Severity::Informational => "informational",
            Severity::Debug => "debug",
        }
    }

    /// Numeric level (0 = Emergency)
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Inverse of [`Severity::as_u8`]
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::ALL.get(usize::from(value)).copied()
    }

    /// True if an entry of this severity passes a gate set to `threshold`
    #[inline]
    pub fn passes(self, threshold: Severity) -> bool {
        self <= threshold
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = ContractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        match lowered.as_str() {
            "emergency" | "emrgcy" => Ok(Severity::Emergency),
            "alert" => Ok(Severity::Alert),
            "critical" | "crit" => Ok(Severity::Critical),
            "error" => Ok(Severity::Error),
            "warning" | "warn" => Ok(Severity::Warning),
            "notice" => Ok(Severity::Notice),
            "informational" | "info" => Ok(Severity::Informational),
            "debug" => Ok(Severity::Debug),
            _ => Err(ContractError::config_validation(
                "severity",
                format!("unknown severity '{s}'"),
            )),
        }
    }
}
