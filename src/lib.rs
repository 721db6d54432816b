//! # uastify
//!
//! Normalizes the native ASTs produced by language parsers into a universal,
//! role-annotated syntax tree (UAST).
//!
//! The pipeline has two stages:
//!
//! 1. [`builder`] turns a generic [`Value`] tree into a uniform [`Node`] tree,
//!    driven entirely by a [`BuilderConfig`].
//! 2. [`annotation`] walks that tree with a declarative [`Rule`] tree and
//!    attaches [`Role`]s.
//!
//! [`drivers`] bundle both configurations per language, and [`pipeline`]
//! wraps them in a request/response service.

pub mod annotation;
pub mod builder;
pub mod cli;
pub mod drivers;
pub mod errors;
pub mod pipeline;
pub mod uast;
pub mod value;

pub use annotation::{annotate, Action, Annotator, Predicate, Rule, Scope};
pub use builder::{build, BuilderConfig, NodeBuilder};
pub use drivers::{Driver, DriverManifest, DriverRegistry};
pub use errors::{AnnotationError, BuildError, UastError};
pub use pipeline::{ParseRequest, ParseResponse, ParseService, Status};
pub use uast::{Edge, Node, Position, Role, RoleSet};
pub use value::{Value, ValueMap};
