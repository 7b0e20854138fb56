#![warn(missing_docs)]
//! Error structures of the beam tracer
use std::{error::Error, fmt::Display};

/// Result type used throughout the beam tracer
pub type GbtResult<T> = std::result::Result<T, GbtError>;

/// Errors that can be returned by the beam tracer.
///
/// Physical outcomes such as total reflection, clipping or a beam leaving the setup are **not**
/// errors. They are reported as [`Diagnostic`](crate::diagnostics::Diagnostic)s instead.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum GbtError {
    /// invalid geometric input (zero length normal vectors, non-finite positions, ...)
    Geometry(String),
    /// invalid parameters while constructing a Gaussian beam
    Beam(String),
    /// invalid parameters while constructing an optical component
    Component(String),
    /// a basis change matrix of the curvature tensor transfer could not be inverted
    SingularTransform(String),
    /// invalid simulation configuration values
    Configuration(String),
    /// errors while reading or parsing a scene file
    Scene(String),
    /// errors console io
    Console(String),
    /// errors not falling in one of the categories above
    Other(String),
}

impl Display for GbtError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Geometry(m) => {
                write!(f, "Geometry:{m}")
            }
            Self::Beam(m) => {
                write!(f, "Beam:{m}")
            }
            Self::Component(m) => {
                write!(f, "Component:{m}")
            }
            Self::SingularTransform(m) => {
                write!(f, "SingularTransform:{m}")
            }
            Self::Configuration(m) => {
                write!(f, "Configuration:{m}")
            }
            Self::Scene(m) => {
                write!(f, "Scene:{m}")
            }
            Self::Console(m) => {
                write!(f, "Console:{m}")
            }
            Self::Other(m) => write!(f, "Gbtrace Error:Other:{m}"),
        }
    }
}
impl Error for GbtError {}

impl std::convert::From<String> for GbtError {
    fn from(msg: String) -> Self {
        Self::Other(msg)
    }
}
