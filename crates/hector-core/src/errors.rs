//! Structured, severity-tagged error types shared across Hector crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How serious a reported condition is.
///
/// Library code never terminates the process: a [`Severity::Fatal`] error is
/// returned to the caller, which decides whether to abort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Severity {
    /// Informational notice, the operation fully succeeded.
    Info,
    /// Recoverable condition, a best-effort value is available.
    Warning,
    /// Physically or logically invalid request.
    Fatal,
}

impl Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Fatal => "fatal",
        };
        f.write_str(label)
    }
}

/// Structured payload attached to every [`HectorError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Severity of the condition.
    pub severity: Severity,
    /// Optional numeric identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<i32>,
    /// Contextual key value pairs (positions, masses, etc.).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new fatal error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            severity: Severity::Fatal,
            number: None,
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Creates a new payload flagged as a recoverable warning.
    pub fn warning(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(code, message).with_severity(Severity::Warning)
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.context.insert(key.into(), value.to_string());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Overrides the severity of the payload.
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Attaches a numeric identifier to the payload.
    pub fn with_number(mut self, number: i32) -> Self {
        self.number = Some(number);
        self
    }
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} (code: {}", self.severity, self.message, self.code)?;
        if let Some(number) = self.number {
            write!(f, " #{number}")?;
        }
        write!(f, ")")?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

/// Canonical error type for the Hector crates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum HectorError {
    /// Trajectory bookkeeping and interpolation errors.
    #[error("trajectory error: {0}")]
    Trajectory(ErrorInfo),
    /// Kinematics and state vector errors.
    #[error("kinematics error: {0}")]
    Kinematics(ErrorInfo),
    /// Aperture construction and evaluation errors.
    #[error("aperture error: {0}")]
    Aperture(ErrorInfo),
    /// Beam generator errors.
    #[error("generator error: {0}")]
    Generator(ErrorInfo),
    /// Run configuration errors.
    #[error("config error: {0}")]
    Config(ErrorInfo),
    /// Serialization errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl HectorError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            HectorError::Trajectory(info)
            | HectorError::Kinematics(info)
            | HectorError::Aperture(info)
            | HectorError::Generator(info)
            | HectorError::Config(info)
            | HectorError::Serde(info) => info,
        }
    }

    /// Returns the stable error code.
    pub fn code(&self) -> &str {
        &self.info().code
    }

    /// Returns the severity carried by the payload.
    pub fn severity(&self) -> Severity {
        self.info().severity
    }

    /// Whether the caller should treat the condition as unrecoverable.
    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}
