//! Compile a GraphQL-style schema graph into a JSON-Schema-shaped definitions
//! table, and resolve `Category.Name` references to documentation anchors.
//!
//! ```text
//! SchemaGraph ──compile──▶ Definitions ──▶ renderer
//!                 │                          ▲
//!              convert            anchor::resolve, classify::is_enum
//! ```
pub mod anchor;
pub mod classify;
pub mod cli;
pub mod compile;
pub mod convert;
pub mod error;
pub mod introspection;
pub mod options;
pub mod schema;
pub mod shape;

pub use anchor::{definition_anchor, interpolate, resolve};
pub use classify::is_enum;
pub use compile::compile;
pub use convert::convert;
pub use error::{Error, Result};
pub use options::{CompileOptions, UnknownScalarPolicy};
pub use schema::{SchemaGraph, TypeKind, TypeRef};
pub use shape::{Definitions, Primitive, Schema, Shape};
