//! The failure taxonomy plugins report and its mapping onto issues.
//!
//! A handler signals failure with a [`PluginFailure`]. The closed set of
//! variants covers the three shapes the protocol distinguishes: a single
//! levelled issue, an aggregate of independent failures, and an opaque
//! error that only carries a textual description. The supervisor flattens
//! whichever shape it receives into the ordered issue list carried by the
//! response envelope; the host never sees a raw failure value.

use thiserror::Error;

use wherry_plugin_api::{Issue, IssueLevel};

/// A failure reported by (or intercepted around) a plugin handler.
///
/// # Example
///
/// ```
/// use wherry_guest::failure::PluginFailure;
/// use wherry_plugin_api::IssueLevel;
///
/// let failure = PluginFailure::joined(vec![
///     PluginFailure::warn("existing content kept"),
///     PluginFailure::error("second target is read-only"),
/// ]);
/// let issues = failure.to_issues();
/// assert_eq!(issues.len(), 2);
/// assert_eq!(issues[0].level(), IssueLevel::Warn);
/// ```
#[derive(Debug, Error)]
pub enum PluginFailure {
    /// A single levelled issue to surface to the user.
    #[error("{message}")]
    Issue {
        /// Severity shown to the user.
        level: IssueLevel,
        /// Human-readable description.
        message: String,
    },

    /// Several independent failures joined into one value.
    #[error("{} joined failures", .0.len())]
    Joined(Vec<PluginFailure>),

    /// An opaque error with only a textual description.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PluginFailure {
    /// Creates a failure carrying a single levelled issue.
    #[must_use]
    pub fn issue(level: IssueLevel, message: impl Into<String>) -> Self {
        Self::Issue {
            level,
            message: message.into(),
        }
    }

    /// Creates an `Info`-level issue failure.
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self::issue(IssueLevel::Info, message)
    }

    /// Creates a `Warn`-level issue failure.
    #[must_use]
    pub fn warn(message: impl Into<String>) -> Self {
        Self::issue(IssueLevel::Warn, message)
    }

    /// Creates an `Error`-level issue failure.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::issue(IssueLevel::Error, message)
    }

    /// Joins several failures into one aggregate value.
    #[must_use]
    pub fn joined(failures: Vec<Self>) -> Self {
        Self::Joined(failures)
    }

    /// Flattens the failure into the ordered issue list shown to the
    /// user.
    ///
    /// Issue variants map to a single-element list; joined failures are
    /// flattened depth-first, left-to-right, so arbitrarily nested trees
    /// with the same leaves produce the same flat list; anything else
    /// becomes one `Error`-level issue carrying the failure's display
    /// text. The mapping is pure and total.
    #[must_use]
    pub fn to_issues(&self) -> Vec<Issue> {
        match self {
            Self::Issue { level, message } => vec![Issue::new(*level, message.clone())],
            Self::Joined(children) => children.iter().flat_map(Self::to_issues).collect(),
            Self::Other(error) => vec![Issue::new(IssueLevel::Error, error.to_string())],
        }
    }
}
