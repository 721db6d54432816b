//! # Pipeline
//!
//! Native AST → [`Value`] → node tree → annotated UAST, plus the request /
//! response service wrapped around it.
//!
//! Every stage is fatal on failure: a response either carries a fully
//! annotated tree or none at all.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::annotation::Annotator;
use crate::builder::NodeBuilder;
use crate::drivers::DriverRegistry;
use crate::errors::UastError;
use crate::uast::Node;
use crate::value::Value;

/// Builds then annotates one value tree.
#[instrument(level = "debug", skip_all)]
pub fn run(native: &Value, builder: &NodeBuilder, annotator: &Annotator) -> Result<Node, UastError> {
    let mut tree = builder.build(native)?;
    let stats = annotator.annotate(&mut tree)?;
    debug!(nodes = tree.count(), roles = stats.assigned, "normalized tree");
    Ok(tree)
}

// ============================================================================
// NATIVE PARSERS
// ============================================================================

/// Turns source content into the language's native AST as a value tree.
pub trait NativeParser: Send + Sync {
    fn parse_native(&self, language: &str, content: &str) -> Result<Value, UastError>;
}

/// Deepest array/object nesting [`JsonNativeParser`] accepts.
///
/// Long left-leaning expression chains dump as one object level per operand,
/// well past `serde_json`'s default limit of 128. Building and annotating are
/// recursive as well, so the input is bounded up front.
pub const MAX_JSON_DEPTH: usize = 256;

/// A parser for content that is already a JSON-dumped native AST, which is
/// what external native drivers emit.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonNativeParser;

impl NativeParser for JsonNativeParser {
    fn parse_native(&self, _language: &str, content: &str) -> Result<Value, UastError> {
        let depth = json_depth(content);
        if depth > MAX_JSON_DEPTH {
            return Err(UastError::Decode {
                message: format!("nesting depth {depth} exceeds the limit of {MAX_JSON_DEPTH}"),
            });
        }
        let decode_error = |e: serde_json::Error| UastError::Decode {
            message: e.to_string(),
        };
        let mut de = serde_json::Deserializer::from_str(content);
        de.disable_recursion_limit();
        let json = serde_json::Value::deserialize(&mut de).map_err(decode_error)?;
        de.end().map_err(decode_error)?;
        Ok(Value::from(json))
    }
}

/// Maximum array/object nesting of a JSON text, ignoring brackets in strings.
/// Malformed input is left for the decoder to reject.
fn json_depth(content: &str) -> usize {
    let (mut depth, mut max) = (0usize, 0usize);
    let (mut in_string, mut escaped) = (false, false);
    for byte in content.bytes() {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match byte {
            b'"' => in_string = true,
            b'{' | b'[' => {
                depth += 1;
                max = max.max(depth);
            }
            b'}' | b']' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    max
}

// ============================================================================
// SERVICE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseRequest {
    pub language: String,
    pub content: String,
    #[serde(default)]
    pub filename: Option<String>,
}

impl ParseRequest {
    pub fn new(language: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            content: content.into(),
            filename: None,
        }
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Ok,
    Fatal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseResponse {
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uast: Option<Node>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    pub elapsed: Duration,
}

impl ParseResponse {
    pub fn is_ok(&self) -> bool {
        self.status == Status::Ok
    }
}

/// Parse requests dispatched to registered drivers.
pub struct ParseService {
    registry: Arc<DriverRegistry>,
    parser: Box<dyn NativeParser>,
}

impl std::fmt::Debug for ParseService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParseService")
            .field("languages", &self.registry.languages())
            .finish_non_exhaustive()
    }
}

impl ParseService {
    pub fn new(registry: impl Into<Arc<DriverRegistry>>, parser: impl NativeParser + 'static) -> Self {
        Self {
            registry: registry.into(),
            parser: Box::new(parser),
        }
    }

    /// The built-in drivers reading JSON-dumped native ASTs.
    pub fn with_builtin() -> Self {
        Self::new(DriverRegistry::with_builtin(), JsonNativeParser)
    }

    pub fn registry(&self) -> &DriverRegistry {
        &self.registry
    }

    /// Runs the full pipeline. Failures are reported in the response.
    #[instrument(level = "debug", skip_all, fields(language = %request.language, filename = ?request.filename))]
    pub fn parse(&self, request: &ParseRequest) -> ParseResponse {
        let started = Instant::now();
        let outcome = self.normalize(request);
        let elapsed = started.elapsed();
        match outcome {
            Ok(uast) => ParseResponse {
                status: Status::Ok,
                uast: Some(uast),
                errors: Vec::new(),
                elapsed,
            },
            Err(error) => {
                warn!(kind = error.code_suffix(), "parse failed: {error}");
                ParseResponse {
                    status: Status::Fatal,
                    uast: None,
                    errors: vec![error.to_string()],
                    elapsed,
                }
            }
        }
    }

    /// Like [`parse`](Self::parse), keeping the typed error.
    pub fn normalize(&self, request: &ParseRequest) -> Result<Node, UastError> {
        let driver = self.registry.get(&request.language)?;
        let native = self.parser.parse_native(driver.language(), &request.content)?;
        driver.normalize(&native)
    }
}
