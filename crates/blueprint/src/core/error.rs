//! Core error types for diagram processing
//!
//! Configuration errors (dangling actor references, duplicate ids) abort a
//! render. Presentational problems such as an unknown variant never reach
//! this type; they fall back to a default style with a warning instead.

use thiserror::Error;

/// Core error types for diagram processing
#[derive(Error, Debug)]
pub enum DiagramError {
    #[error("Parse error: {message} at line {line}, column {column}")]
    ParseError {
        message: String,
        line: usize,
        column: usize,
    },

    #[error("Configuration error: message '{message_id}' references unknown actor '{actor_id}'")]
    UnknownActor {
        message_id: String,
        actor_id: String,
    },

    #[error("Configuration error: actor id '{actor_id}' is declared more than once")]
    DuplicateActor { actor_id: String },

    #[error("Configuration error: message id '{message_id}' is used more than once")]
    DuplicateMessage { message_id: String },

    #[error("Invalid scene: {message}")]
    InvalidScene { message: String },

    #[error("Layout error: {message}")]
    LayoutError { message: String },

    #[error("Render error: {message}")]
    RenderError { message: String },

    #[error("Detection error: {message}")]
    DetectionError { message: String },

    #[error("IO error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("Unknown diagram type: {diagram_type}")]
    UnknownDiagramType { diagram_type: String },
}

impl DiagramError {
    /// Create a new parse error
    pub fn parse_error(message: String, line: usize, column: usize) -> Self {
        Self::ParseError {
            message,
            line,
            column,
        }
    }

    /// Create an unknown-actor configuration error
    pub fn unknown_actor(message_id: impl Into<String>, actor_id: impl Into<String>) -> Self {
        Self::UnknownActor {
            message_id: message_id.into(),
            actor_id: actor_id.into(),
        }
    }

    /// Create a duplicate-actor configuration error
    pub fn duplicate_actor(actor_id: impl Into<String>) -> Self {
        Self::DuplicateActor {
            actor_id: actor_id.into(),
        }
    }

    /// Create a duplicate-message configuration error
    pub fn duplicate_message(message_id: impl Into<String>) -> Self {
        Self::DuplicateMessage {
            message_id: message_id.into(),
        }
    }

    /// Create a new invalid scene error
    pub fn invalid_scene(message: String) -> Self {
        Self::InvalidScene { message }
    }

    /// Create a new layout error
    pub fn layout_error(message: String) -> Self {
        Self::LayoutError { message }
    }

    /// Create a new render error
    pub fn render_error(message: String) -> Self {
        Self::RenderError { message }
    }

    /// Create a new detection error
    pub fn detection_error(message: String) -> Self {
        Self::DetectionError { message }
    }

    /// True for errors caused by an inconsistent diagram description
    /// (dangling references or duplicate identities).
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownActor { .. } | Self::DuplicateActor { .. } | Self::DuplicateMessage { .. }
        )
    }
}

impl From<serde_json::Error> for DiagramError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidScene {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error() {
        let error = DiagramError::parse_error("Invalid syntax".to_string(), 5, 10);
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("Parse error"));
        assert!(error_msg.contains("Invalid syntax"));
        assert!(error_msg.contains("line 5"));
        assert!(error_msg.contains("column 10"));
    }

    #[test]
    fn test_unknown_actor() {
        let error = DiagramError::unknown_actor("m1", "ghost");
        let error_msg = error.to_string();
        assert!(error_msg.contains("Configuration error"));
        assert!(error_msg.contains("'m1'"));
        assert!(error_msg.contains("'ghost'"));
        assert!(error.is_configuration_error());
    }

    #[test]
    fn test_duplicate_ids_are_configuration_errors() {
        assert!(DiagramError::duplicate_actor("svc").is_configuration_error());
        assert!(DiagramError::duplicate_message("1").is_configuration_error());
        assert!(!DiagramError::layout_error("x".to_string()).is_configuration_error());
    }

    #[test]
    fn test_json_error_conversion() {
        let err = serde_json::from_str::<serde_json::Value>("{ nope").unwrap_err();
        let error: DiagramError = err.into();
        assert!(error.to_string().starts_with("Invalid scene"));
    }

    #[test]
    fn test_io_error_conversion() {
        use std::io;
        let io_err = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error: DiagramError = io_err.into();
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("IO error"));
        assert!(error_msg.contains("File not found"));
    }
}
