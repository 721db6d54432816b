//! uastify error handling.
//!
//! Every failure the pipeline can produce is fatal: no partial tree is ever
//! handed back. Each stage owns its own error enum, and [`UastError`] wraps
//! them for callers that drive the whole pipeline.

use miette::Diagnostic;
use thiserror::Error;

// ============================================================================
// NODE BUILDER ERRORS
// ============================================================================

/// Errors raised while turning a raw value tree into nodes.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum BuildError {
    #[error("Build error: raw object at {path} has no internal type key '{key}'")]
    #[diagnostic(
        code(uastify::build::no_internal_type),
        help("every non-empty raw object must carry a string under '{key}'")
    )]
    NoInternalType { key: String, path: String },

    #[error("Build error: internal type key '{key}' at {path} holds a {found}, expected a string")]
    #[diagnostic(code(uastify::build::invalid_internal_type))]
    InvalidInternalType {
        key: String,
        path: String,
        found: String,
    },

    #[error("Build error: root value is a {found}, expected an object")]
    #[diagnostic(code(uastify::build::unsupported_root))]
    UnsupportedRoot { found: String },

    #[error("Build error: promoted list '{key}' at {path} contains a {found}, expected objects")]
    #[diagnostic(
        code(uastify::build::unsupported_list_element),
        help("only lists of objects can be promoted; remove '{key}' from the promotion table")
    )]
    UnsupportedListElement {
        key: String,
        path: String,
        found: String,
    },
}

// ============================================================================
// RULE ENGINE ERRORS
// ============================================================================

/// Errors raised by the annotation pass.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum AnnotationError {
    /// An `Error` action fired: a required structural invariant does not hold.
    #[error("Annotation error: {message} (node '{internal_type}' at {path})")]
    #[diagnostic(code(uastify::annotate::validation))]
    Validation {
        message: String,
        internal_type: String,
        path: String,
    },
}

// ============================================================================
// PIPELINE ERRORS
// ============================================================================

/// The single error type surfaced by the pipeline, the service and the CLI.
#[derive(Error, Diagnostic, Debug)]
pub enum UastError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Annotation(#[from] AnnotationError),

    #[error("Pipeline error: no driver registered for language '{language}'")]
    #[diagnostic(
        code(uastify::pipeline::unknown_language),
        help("available languages: {available}")
    )]
    UnknownLanguage { language: String, available: String },

    #[error("Pipeline error: could not decode native AST: {message}")]
    #[diagnostic(code(uastify::pipeline::decode))]
    Decode { message: String },

    #[error("Pipeline error: could not serialize output: {message}")]
    #[diagnostic(code(uastify::pipeline::encode))]
    Encode { message: String },

    #[error("Pipeline error: invalid driver manifest: {message}")]
    #[diagnostic(code(uastify::pipeline::manifest))]
    Manifest { message: String },

    #[error("I/O error on '{path}'")]
    #[diagnostic(code(uastify::io))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl UastError {
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        UastError::Io {
            path: path.into(),
            source,
        }
    }

    /// Stable diagnostic code, used by the service to classify failures.
    pub fn code_suffix(&self) -> &'static str {
        match self {
            UastError::Build(_) => "build",
            UastError::Annotation(_) => "annotate",
            UastError::UnknownLanguage { .. } => "unknown_language",
            UastError::Decode { .. } => "decode",
            UastError::Encode { .. } => "encode",
            UastError::Manifest { .. } => "manifest",
            UastError::Io { .. } => "io",
        }
    }
}

/// Prints an error with full miette diagnostics.
pub fn print_error(error: UastError) {
    let report = miette::Report::new(error);
    eprintln!("{report:?}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_errors_render_with_codes() {
        let err = UastError::from(BuildError::NoInternalType {
            key: "ast_type".into(),
            path: "$.body[0]".into(),
        });
        let code = err.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("uastify::build::no_internal_type"));
        assert!(err.to_string().contains("$.body[0]"));
        let help = err.help().map(|h| h.to_string()).unwrap_or_default();
        assert!(help.contains("ast_type"));
    }

    #[test]
    fn report_includes_validation_message() {
        let err = UastError::from(AnnotationError::Validation {
            message: "root must be Module".into(),
            internal_type: "Expr".into(),
            path: "$".into(),
        });
        assert_eq!(err.code_suffix(), "annotate");
        let output = format!("{:?}", miette::Report::new(err));
        assert!(output.contains("root must be Module"));
    }
}
