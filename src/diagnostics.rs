#![warn(missing_docs)]
//! Structured diagnostic events of a beam tracing run.
//!
//! Physical caveats (clipping, total reflection, open beams, ...) do not stop a simulation. They
//! are collected as [`Diagnostic`]s so that a caller can inspect, filter or format them. Each
//! event is additionally forwarded to the [`log`] facade (`error!`, `warn!` or `info!` according
//! to its severity) so that the hosting application decides about verbosity.
use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Severity of a [`Diagnostic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumIter)]
pub enum Severity {
    /// purely informational event
    Info,
    /// caveat concerning the validity of the results
    Warning,
    /// a single beam could not be traced any further
    Error,
}

/// Kind of a [`Diagnostic`] event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumIter)]
pub enum DiagnosticKind {
    /// a transmitted beam was suppressed because of total internal reflection
    TotalReflection,
    /// the beam hits a component close to its edge
    Clipping,
    /// the beam passes close to the edge of a component it does not hit
    AntiClipping,
    /// a daughter beam was suppressed because its power is below the threshold
    ThresholdReached,
    /// a daughter beam was suppressed because its stray order exceeds the simulation order
    OrderReached,
    /// the beam does not hit any component
    OpenBeam,
    /// the beam was absorbed (beam dump, side face, filter)
    Absorbed,
    /// a component has physically questionable parameters
    InvalidConfiguration,
    /// the simulation parameters do not guarantee a termination
    NonTerminating,
    /// the daughters of a beam could not be computed (degenerate incidence)
    SingularTransform,
}

/// A single diagnostic event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    severity: Severity,
    kind: DiagnosticKind,
    message: String,
}
impl Diagnostic {
    /// Creates a new [`Diagnostic`].
    #[must_use]
    pub const fn new(severity: Severity, kind: DiagnosticKind, message: String) -> Self {
        Self {
            severity,
            kind,
            message,
        }
    }
    /// Returns the severity of this [`Diagnostic`].
    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.severity
    }
    /// Returns the kind of this [`Diagnostic`].
    #[must_use]
    pub const fn kind(&self) -> DiagnosticKind {
        self.kind
    }
    /// Returns the message of this [`Diagnostic`].
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}
impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}): {}", self.severity, self.kind, self.message)
    }
}

/// An ordered collection of [`Diagnostic`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    /// Records an informational event and logs it with `info!`.
    pub fn info(&mut self, kind: DiagnosticKind, message: String) {
        info!("{message}");
        self.0.push(Diagnostic::new(Severity::Info, kind, message));
    }
    /// Records a warning and logs it with `warn!`.
    pub fn warning(&mut self, kind: DiagnosticKind, message: String) {
        warn!("{message}");
        self.0.push(Diagnostic::new(Severity::Warning, kind, message));
    }
    /// Records an error and logs it with `error!`.
    pub fn error(&mut self, kind: DiagnosticKind, message: String) {
        error!("{message}");
        self.0.push(Diagnostic::new(Severity::Error, kind, message));
    }
    /// Appends all events of another collection (without logging them again).
    pub fn append(&mut self, other: &mut Self) {
        self.0.append(&mut other.0);
    }
    /// Returns all events of the given kind.
    pub fn of_kind(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter().filter(move |d| d.kind == kind)
    }
    /// Returns all warnings.
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter().filter(|d| d.severity == Severity::Warning)
    }
    /// Returns all errors.
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter().filter(|d| d.severity == Severity::Error)
    }
    /// Returns an iterator over all events in the order of their occurence.
    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.0.iter()
    }
    /// Returns the number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }
    /// Returns `true` if no event has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
impl From<Vec<Diagnostic>> for Diagnostics {
    fn from(diagnostics: Vec<Diagnostic>) -> Self {
        Self(diagnostics)
    }
}
