//! Builder configuration: which raw keys mean what.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Describes how a driver's raw objects map onto [`Node`](crate::uast::Node)
/// fields. Built once per driver and shared read-only between builds.
///
/// Promotion keys are dotted paths: `"If"` applies to every `If` object,
/// while `"ListComp.generators"` applies only to objects reached through the
/// `generators` property of a `ListComp`, and so on for deeper paths.
///
/// # Examples
///
/// ```rust
/// use uastify::builder::BuilderConfig;
/// let config = BuilderConfig::new("type")
///     .with_token_keys(["id", "name"])
///     .with_promoted("Module", ["body"])
///     .with_synthetic_token("Add", "+");
/// assert_eq!(config.token_keys, vec!["id", "name"]);
/// assert!(config.promoted_lists["Module"].contains("body"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuilderConfig {
    /// Raw key holding the internal type of every object.
    pub internal_type_key: String,
    pub line_key: Option<String>,
    pub column_key: Option<String>,
    pub offset_key: Option<String>,
    pub end_line_key: Option<String>,
    pub end_column_key: Option<String>,
    pub end_offset_key: Option<String>,
    /// Token keys in priority order: the earliest key present wins.
    pub token_keys: Vec<String>,
    /// Literal tokens for internal types that carry none in the raw output.
    pub synthetic_tokens: BTreeMap<String, String>,
    /// Dotted promotion key -> list-valued properties lifted into children.
    pub promoted_lists: BTreeMap<String, BTreeSet<String>>,
    /// Promote every list-valued property regardless of the table.
    pub promote_all_lists: bool,
    /// Accept scalar or empty roots as untyped leaf nodes.
    pub allow_untyped_root: bool,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self::new("type")
    }
}

impl BuilderConfig {
    pub fn new(internal_type_key: impl Into<String>) -> Self {
        Self {
            internal_type_key: internal_type_key.into(),
            line_key: None,
            column_key: None,
            offset_key: None,
            end_line_key: None,
            end_column_key: None,
            end_offset_key: None,
            token_keys: Vec::new(),
            synthetic_tokens: BTreeMap::new(),
            promoted_lists: BTreeMap::new(),
            promote_all_lists: false,
            allow_untyped_root: false,
        }
    }

    pub fn with_position_keys(
        mut self,
        line: impl Into<String>,
        column: impl Into<String>,
        offset: Option<&str>,
    ) -> Self {
        self.line_key = Some(line.into());
        self.column_key = Some(column.into());
        self.offset_key = offset.map(str::to_string);
        self
    }

    pub fn with_end_position_keys(
        mut self,
        line: impl Into<String>,
        column: impl Into<String>,
        offset: Option<&str>,
    ) -> Self {
        self.end_line_key = Some(line.into());
        self.end_column_key = Some(column.into());
        self.end_offset_key = offset.map(str::to_string);
        self
    }

    pub fn with_token_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.token_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_synthetic_token(
        mut self,
        internal_type: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        self.synthetic_tokens
            .insert(internal_type.into(), token.into());
        self
    }

    /// Marks properties of the given (possibly dotted) key as promotable.
    /// Repeated calls for the same key accumulate.
    pub fn with_promoted<I, S>(mut self, key: impl Into<String>, properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.promoted_lists
            .entry(key.into())
            .or_default()
            .extend(properties.into_iter().map(Into::into));
        self
    }

    pub fn promoting_all_lists(mut self, enabled: bool) -> Self {
        self.promote_all_lists = enabled;
        self
    }

    pub fn allowing_untyped_root(mut self, enabled: bool) -> Self {
        self.allow_untyped_root = enabled;
        self
    }
}
