//! Generative UI schema interpreter
//!
//! This module turns the backend-supplied declarative UI description into a
//! rendered output tree:
//! - `node`: borrowed views over raw schema JSON (nodes, text children, attributes)
//! - `kind`: the registry of known presentational kinds plus the passthrough fallback
//! - `render`: the pure, iterative `render` function and the rendered tree types
//! - `markup`: HTML serialisation of a rendered tree
//!
//! The interpreter never fails: malformed input renders as nothing.

mod kind;
mod markup;
mod node;
mod render;

pub use kind::NodeKind;
pub use node::{AttrValue, SchemaChild, SchemaNode, UiSchema};
pub use render::{render, render_nodes, render_schema, Element, RenderedNode, RenderedTree};
