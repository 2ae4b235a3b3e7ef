//! User-facing diagnostics surfaced by a plugin.
//!
//! Issues are the only failure representation the host forwards to the end
//! user. Protocol-level faults use [`ExitCode`](crate::ExitCode) instead
//! and never reach the issue list.

use serde::{Deserialize, Serialize};

/// Severity of an [`Issue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum IssueLevel {
    /// An informational message.
    Info,
    /// A non-fatal warning.
    Warn,
    /// A failure that prevented the operation from completing.
    Error,
}

impl IssueLevel {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        }
    }
}

impl std::fmt::Display for IssueLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A levelled, human-readable diagnostic carried in the response envelope.
///
/// # Example
///
/// ```
/// use wherry_plugin_api::{Issue, IssueLevel};
///
/// let issue = Issue::new(IssueLevel::Error, "target file is read-only");
/// assert_eq!(issue.level(), IssueLevel::Error);
/// assert_eq!(issue.message(), "target file is read-only");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    level: IssueLevel,
    message: String,
}

impl Issue {
    /// Creates an issue with the given severity and message.
    #[must_use]
    pub fn new(level: IssueLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    /// Returns the severity level.
    #[must_use]
    pub const fn level(&self) -> IssueLevel {
        self.level
    }

    /// Returns the message text.
    #[must_use]
    pub const fn message(&self) -> &str {
        self.message.as_str()
    }
}
