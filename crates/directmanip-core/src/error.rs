//! Error types for directmanip.

use crate::recognizer::GestureKind;
use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, GestureError>;

/// Errors raised by misuse of the recognizers or their configuration.
///
/// Input that a recognizer does not understand is never an error; it is
/// ignored. These variants describe caller mistakes and fail immediately.
#[derive(Debug, Error)]
pub enum GestureError {
    /// A kind-specific accessor was called on another kind of recognizer.
    #[error("{accessor} is only available on {expected} recognizers, not {actual}")]
    KindMismatch {
        accessor: &'static str,
        expected: GestureKind,
        actual: GestureKind,
    },

    /// A gesture kind name could not be parsed.
    #[error("Unknown gesture kind: {0}")]
    UnknownGesture(String),

    /// A plan name outside the supported set was used.
    #[error("Only \"draggable\", \"pinchable\", or \"rotatable\" names may be used, got \"{0}\"")]
    InvalidPlanName(String),

    /// A plan was registered under the name of a different gesture kind.
    #[error("Plan name \"{name}\" does not match a {kind} plan")]
    PlanNameMismatch { name: String, kind: GestureKind },

    /// A configuration value is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A TOML configuration could not be parsed.
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mismatch_message() {
        let err = GestureError::KindMismatch {
            accessor: "translation",
            expected: GestureKind::Drag,
            actual: GestureKind::Rotate,
        };
        let msg = err.to_string();
        assert!(msg.contains("translation"));
        assert!(msg.contains("drag"));
        assert!(msg.contains("rotate"));
    }

    #[test]
    fn test_invalid_plan_name_message() {
        let err = GestureError::InvalidPlanName("foobar".to_string());
        assert!(err.to_string().contains("\"draggable\""));
        assert!(err.to_string().contains("foobar"));
    }

    #[test]
    fn test_plan_name_mismatch_message() {
        let err = GestureError::PlanNameMismatch {
            name: "pinchable".to_string(),
            kind: GestureKind::Drag,
        };
        assert_eq!(
            err.to_string(),
            "Plan name \"pinchable\" does not match a drag plan"
        );
    }

    #[test]
    fn test_config_parse_from() {
        let toml_err = toml::from_str::<toml::Value>("= nope").unwrap_err();
        let err = GestureError::from(toml_err);
        assert!(matches!(err, GestureError::ConfigParse(_)));
        assert!(err.to_string().starts_with("Config parse error"));
    }

    #[test]
    fn test_error_debug() {
        let err = GestureError::InvalidConfig("drag_slop must be >= 0".to_string());
        assert!(format!("{err:?}").contains("InvalidConfig"));
    }
}
