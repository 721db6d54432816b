//! # Node Builder
//!
//! Turns a raw [`Value`] tree into a [`Node`] tree according to a
//! [`BuilderConfig`]. Per object:
//!
//! - the internal type key names the node's type (required on non-empty objects),
//! - position keys fill `position` / `end_position`,
//! - token keys compete for the token by configured priority,
//! - nested objects become single children labelled with their key,
//! - list properties become ordered children only when promoted,
//! - everything else is kept as an opaque property.
//!
//! Children follow the raw object's key order, and within a promoted list the
//! original element order.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::errors::BuildError;
use crate::uast::{Node, Position};
use crate::value::{Value, ValueMap};

pub mod config;
mod promotion;

pub use config::BuilderConfig;
use promotion::{Frame, PromotionTable};

/// Builds a node tree from `value` with a one-off builder for `config`.
///
/// Prefer [`NodeBuilder`] when the same configuration serves many builds.
///
/// # Examples
///
/// ```rust
/// use uastify::builder::{build, BuilderConfig};
/// use uastify::value::Value;
///
/// let raw: Value = serde_json::from_str(
///     r#"{"type": "Module", "body": [{"type": "Name", "id": "x"}]}"#,
/// ).unwrap();
/// let config = BuilderConfig::new("type")
///     .with_token_keys(["id"])
///     .with_promoted("Module", ["body"]);
/// let tree = build(&raw, &config).unwrap();
/// assert_eq!(tree.children[0].label, "body");
/// assert_eq!(tree.children[0].node.token.as_deref(), Some("x"));
/// ```
pub fn build(value: &Value, config: &BuilderConfig) -> Result<Node, BuildError> {
    NodeBuilder::new(config.clone()).build(value)
}

/// Which position field a raw key fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PositionSlot {
    Line,
    Column,
    Offset,
    EndLine,
    EndColumn,
    EndOffset,
}

/// A reusable builder: the configuration plus its precompiled lookup tables.
#[derive(Debug, Clone)]
pub struct NodeBuilder {
    config: Arc<BuilderConfig>,
    promotions: PromotionTable,
    token_priority: HashMap<String, usize>,
    position_keys: HashMap<String, PositionSlot>,
}

impl NodeBuilder {
    pub fn new(config: impl Into<Arc<BuilderConfig>>) -> Self {
        let config = config.into();
        let promotions = PromotionTable::compile(&config.promoted_lists);

        // First occurrence wins if a key is listed twice.
        let mut token_priority = HashMap::new();
        for (priority, key) in config.token_keys.iter().enumerate() {
            token_priority.entry(key.clone()).or_insert(priority);
        }

        let mut position_keys = HashMap::new();
        let slots = [
            (&config.line_key, PositionSlot::Line),
            (&config.column_key, PositionSlot::Column),
            (&config.offset_key, PositionSlot::Offset),
            (&config.end_line_key, PositionSlot::EndLine),
            (&config.end_column_key, PositionSlot::EndColumn),
            (&config.end_offset_key, PositionSlot::EndOffset),
        ];
        for (key, slot) in slots {
            if let Some(key) = key {
                position_keys.insert(key.clone(), slot);
            }
        }

        Self {
            config,
            promotions,
            token_priority,
            position_keys,
        }
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// Builds the node tree for one raw value.
    pub fn build(&self, value: &Value) -> Result<Node, BuildError> {
        let mut ctx = BuildContext::default();
        let root = match value {
            Value::Map(map) if !map.is_empty() => self.build_object(map, &mut ctx)?,
            Value::Map(_) if self.config.allow_untyped_root => Node::new(""),
            Value::List(_) if self.config.allow_untyped_root => {
                return Err(BuildError::UnsupportedRoot {
                    found: value.type_name().to_string(),
                })
            }
            scalar if scalar.is_scalar() && self.config.allow_untyped_root => {
                let mut leaf = Node::new("");
                leaf.token = scalar.scalar_text();
                leaf
            }
            _ => {
                return Err(BuildError::NoInternalType {
                    key: self.config.internal_type_key.clone(),
                    path: ctx.path(),
                })
            }
        };
        debug!(
            internal_type = %root.internal_type,
            nodes = ctx.nodes.max(1),
            "built node tree"
        );
        Ok(root)
    }

    // ------------------------------------------------------------------------
    // Object conversion
    // ------------------------------------------------------------------------

    fn build_object(&self, map: &ValueMap, ctx: &mut BuildContext) -> Result<Node, BuildError> {
        let type_key = &self.config.internal_type_key;
        let internal_type = match map.get(type_key) {
            Some(Value::String(t)) => t.clone(),
            Some(other) => {
                return Err(BuildError::InvalidInternalType {
                    key: type_key.clone(),
                    path: ctx.path(),
                    found: other.type_name().to_string(),
                })
            }
            None => {
                return Err(BuildError::NoInternalType {
                    key: type_key.clone(),
                    path: ctx.path(),
                })
            }
        };
        ctx.nodes += 1;
        trace!(internal_type = %internal_type, path = %ctx.path(), "building object");

        let promoted = self.promotions.lookup(&internal_type, &ctx.chain);
        let is_promoted =
            |key: &str| self.config.promote_all_lists || promoted.iter().any(|p| p.contains(key));

        let mut node = Node::new(internal_type.clone());
        let mut start = Position::default();
        let mut end = Position::default();
        let mut token: Option<(usize, &str, String)> = None;

        for (key, value) in map {
            if key == type_key {
                continue;
            }

            if let Some(slot) = self.position_keys.get(key.as_str()) {
                if let Some(n) = value.as_i64().and_then(|n| u32::try_from(n).ok()) {
                    match slot {
                        PositionSlot::Line => start.line = Some(n),
                        PositionSlot::Column => start.column = Some(n),
                        PositionSlot::Offset => start.offset = Some(n),
                        PositionSlot::EndLine => end.line = Some(n),
                        PositionSlot::EndColumn => end.column = Some(n),
                        PositionSlot::EndOffset => end.offset = Some(n),
                    }
                    continue;
                }
            }

            if let Some(&priority) = self.token_priority.get(key.as_str()) {
                if let Some(text) = value.scalar_text() {
                    let better = token.as_ref().map_or(true, |(best, _, _)| priority < *best);
                    if better {
                        token = Some((priority, key.as_str(), text));
                    }
                }
            }

            match value {
                Value::List(items) if is_promoted(key.as_str()) => {
                    self.promote_list(&mut node, key, items, ctx)?;
                }
                Value::Map(inner) if !inner.is_empty() => {
                    ctx.enter(&internal_type, key, None);
                    let child = self.build_object(inner, ctx);
                    ctx.leave();
                    node.push_child(key.clone(), child?);
                }
                _ => {
                    node.properties.insert(key.clone(), value.clone());
                }
            }
        }

        match token {
            Some((_, key, text)) => {
                // Losing candidates stay behind as plain properties.
                node.properties.shift_remove(key);
                node.token = Some(text);
            }
            None => {
                node.token = self.config.synthetic_tokens.get(&internal_type).cloned();
            }
        }
        if !start.is_empty() {
            node.position = Some(start);
        }
        if !end.is_empty() {
            node.end_position = Some(end);
        }
        Ok(node)
    }

    fn promote_list(
        &self,
        node: &mut Node,
        key: &str,
        items: &[Value],
        ctx: &mut BuildContext,
    ) -> Result<(), BuildError> {
        for (index, item) in items.iter().enumerate() {
            match item {
                // Placeholders carry no node; the index keeps siblings aligned.
                Value::Null => continue,
                Value::Map(inner) if inner.is_empty() => continue,
                Value::Map(inner) => {
                    ctx.enter(&node.internal_type, key, Some(index));
                    let child = self.build_object(inner, ctx);
                    ctx.leave();
                    node.push_element(key, index, child?);
                }
                other => {
                    return Err(BuildError::UnsupportedListElement {
                        key: key.to_string(),
                        path: ctx.path(),
                        found: other.type_name().to_string(),
                    })
                }
            }
        }
        Ok(())
    }
}

// ============================================================================
// BUILD CONTEXT
// ============================================================================

/// Mutable state of one build: the ancestor chain used for qualified
/// promotions, the path used in error messages and a node counter.
#[derive(Debug, Default)]
struct BuildContext {
    chain: Vec<Frame>,
    segments: Vec<String>,
    nodes: usize,
}

impl BuildContext {
    fn enter(&mut self, parent_type: &str, edge: &str, index: Option<usize>) {
        self.chain.push(Frame {
            internal_type: parent_type.to_string(),
            edge: edge.to_string(),
        });
        match index {
            Some(i) => self.segments.push(format!(".{}[{}]", edge, i)),
            None => self.segments.push(format!(".{}", edge)),
        }
    }

    fn leave(&mut self) {
        self.chain.pop();
        self.segments.pop();
    }

    fn path(&self) -> String {
        let mut path = String::from("$");
        for segment in &self.segments {
            path.push_str(segment);
        }
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(json: serde_json::Value) -> Value {
        Value::from(json)
    }

    #[test]
    fn nested_objects_become_single_children() {
        let config = BuilderConfig::new("type");
        let tree = build(
            &raw(json!({"type": "Expr", "value": {"type": "Num", "n": 1}})),
            &config,
        )
        .unwrap();
        assert_eq!(tree.children.len(), 1);
        assert_eq!(tree.children[0].label, "value");
        assert_eq!(tree.children[0].node.property("n"), Some(&Value::Int(1)));
    }

    #[test]
    fn error_path_points_at_offending_object() {
        let config = BuilderConfig::new("type").with_promoted("Module", ["body"]);
        let err = build(
            &raw(json!({"type": "Module", "body": [{"type": "Pass"}, {"lineno": 2}]})),
            &config,
        )
        .unwrap_err();
        assert_eq!(
            err,
            BuildError::NoInternalType {
                key: "type".into(),
                path: "$.body[1]".into()
            }
        );
    }

    #[test]
    fn non_string_internal_type_is_rejected() {
        let config = BuilderConfig::new("type");
        let err = build(&raw(json!({"type": 3})), &config).unwrap_err();
        assert!(matches!(err, BuildError::InvalidInternalType { found, .. } if found == "Int"));
    }

    #[test]
    fn positions_are_parsed_from_configured_keys() {
        let config = BuilderConfig::new("type")
            .with_position_keys("lineno", "col_offset", None)
            .with_end_position_keys("end_lineno", "end_col_offset", None);
        let tree = build(
            &raw(json!({"type": "Name", "lineno": 3, "col_offset": 4, "end_lineno": 3, "end_col_offset": 5})),
            &config,
        )
        .unwrap();
        let pos = tree.position.unwrap();
        assert_eq!((pos.line, pos.column, pos.offset), (Some(3), Some(4), None));
        assert_eq!(tree.end_position.unwrap().column, Some(5));
        assert!(tree.properties.is_empty());
    }

    #[test]
    fn malformed_position_values_stay_as_properties() {
        let config = BuilderConfig::new("type").with_position_keys("lineno", "col", None);
        let tree = build(&raw(json!({"type": "Name", "lineno": "three"})), &config).unwrap();
        assert_eq!(tree.position, None);
        assert_eq!(tree.property("lineno"), Some(&Value::from("three")));
    }

    #[test]
    fn null_elements_of_promoted_lists_are_skipped() {
        let config = BuilderConfig::new("type").with_promoted("Set", ["elts"]);
        let tree = build(
            &raw(json!({"type": "Set", "elts": [null, {"type": "Str"}]})),
            &config,
        )
        .unwrap();
        assert_eq!(tree.children.len(), 1);
        assert_eq!(tree.children[0].node.internal_type, "Str");
        // The raw index survives the skip.
        assert_eq!(tree.children[0].index, Some(1));
        assert_eq!(tree.children[0].segment(), ".elts[1]");
    }

    #[test]
    fn empty_objects_in_promoted_lists_are_skipped() {
        let config = BuilderConfig::new("type").with_promoted("Module", ["body"]);
        let tree = build(
            &raw(json!({"type": "Module", "body": [{}, {"type": "Pass"}, {}]})),
            &config,
        )
        .unwrap();
        assert_eq!(tree.children.len(), 1);
        assert_eq!(tree.children[0].node.internal_type, "Pass");
        assert_eq!(tree.children[0].index, Some(1));
    }

    #[test]
    fn scalar_elements_of_promoted_lists_fail() {
        let config = BuilderConfig::new("type").with_promoted("Global", ["names"]);
        let err = build(&raw(json!({"type": "Global", "names": ["a"]})), &config).unwrap_err();
        assert!(matches!(err, BuildError::UnsupportedListElement { key, .. } if key == "names"));
    }

    #[test]
    fn untyped_roots_need_opt_in() {
        let strict = BuilderConfig::new("type");
        assert!(matches!(
            build(&Value::from("leaf"), &strict),
            Err(BuildError::NoInternalType { .. })
        ));
        assert!(matches!(
            build(&raw(json!({})), &strict),
            Err(BuildError::NoInternalType { .. })
        ));

        let lenient = BuilderConfig::new("type").allowing_untyped_root(true);
        let leaf = build(&Value::Int(42), &lenient).unwrap();
        assert_eq!(leaf.internal_type, "");
        assert_eq!(leaf.token.as_deref(), Some("42"));
        assert_eq!(build(&raw(json!({})), &lenient).unwrap(), Node::new(""));
        assert!(matches!(
            build(&raw(json!([1])), &lenient),
            Err(BuildError::UnsupportedRoot { .. })
        ));
    }

    #[test]
    fn empty_nested_objects_are_properties() {
        let config = BuilderConfig::new("type");
        let tree = build(&raw(json!({"type": "Name", "ctx": {}})), &config).unwrap();
        assert!(tree.children.is_empty());
        assert!(tree.property("ctx").is_some());
    }
}
