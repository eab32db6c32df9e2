use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::slice;

use super::node::{AttrValue, SchemaChild, SchemaNode, UiSchema};

/// Output of the interpreter: an ordered forest of rendered nodes
#[derive(Debug, Clone, Default, Serialize)]
pub struct RenderedTree {
    pub nodes: Vec<RenderedNode>,
}

impl RenderedTree {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// A rendered node: text leaf or element
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum RenderedNode {
    Text(String),
    Element(Element),
}

impl RenderedNode {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(element) => Some(element),
            Self::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text.as_str()),
            Self::Element(_) => None,
        }
    }
}

/// A rendered element
#[derive(Debug, Clone, Serialize)]
pub struct Element {
    /// Output tag (e.g. `div`, `h3`, or the passthrough kind)
    pub tag: String,

    /// Base class followed by the caller-supplied class
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,

    /// Attributes passed through from the schema node
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, AttrValue>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RenderedNode>,
}

impl Element {
    /// Build the element shell for a node (children are attached by the walker)
    fn open(node: &SchemaNode<'_>) -> Self {
        let kind = node.kind();
        let class = match (kind.base_class(), node.class_name()) {
            (Some(base), Some(extra)) => Some(format!("{} {}", base, extra)),
            (Some(base), None) => Some(base.to_string()),
            (None, Some(extra)) => Some(extra.to_string()),
            (None, None) => None,
        };

        Self {
            tag: kind.element_tag().to_string(),
            class,
            attributes: node
                .attributes()
                .map(|(key, value)| (key.to_string(), value))
                .collect(),
            children: Vec::new(),
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&AttrValue> {
        self.attributes.get(name)
    }

    /// Child elements, skipping text leaves
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(RenderedNode::as_element)
    }
}

impl Drop for Element {
    // Tear deep trees down iteratively so dropping never recurses per level.
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(node) = pending.pop() {
            if let RenderedNode::Element(mut element) = node {
                pending.append(&mut element.children);
            }
        }
    }
}

/// Render a raw schema value
///
/// A non-array top level renders as an empty tree.
pub fn render(schema: &Value) -> RenderedTree {
    match schema {
        Value::Array(nodes) => render_nodes(nodes),
        _ => RenderedTree::default(),
    }
}

pub fn render_schema(schema: &UiSchema) -> RenderedTree {
    render_nodes(schema.nodes())
}

/// Render a sequence of `SchemaNode | string` values
///
/// The walk uses an explicit stack, so nesting depth is bounded only by the
/// input. Entries that are not text or kinded nodes render as nothing.
pub fn render_nodes(nodes: &[Value]) -> RenderedTree {
    let mut roots = Vec::new();
    let mut open: Vec<(Element, slice::Iter<'_, Value>)> = Vec::new();
    let mut top_level = nodes.iter();

    loop {
        let next = match open.last_mut() {
            Some((_, remaining)) => remaining.next(),
            None => top_level.next(),
        };

        let Some(value) = next else {
            match open.pop() {
                Some((element, _)) => attach(&mut open, &mut roots, RenderedNode::Element(element)),
                None => break,
            }
            continue;
        };

        match SchemaChild::parse(value) {
            Some(SchemaChild::Text(text)) => {
                attach(&mut open, &mut roots, RenderedNode::Text(text.into_owned()));
            }
            Some(SchemaChild::Node(node)) => {
                let element = Element::open(&node);
                if node.kind().is_leaf() {
                    attach(&mut open, &mut roots, RenderedNode::Element(element));
                } else {
                    open.push((element, node.children().iter()));
                }
            }
            None => {}
        }
    }

    RenderedTree { nodes: roots }
}

fn attach(
    open: &mut [(Element, slice::Iter<'_, Value>)],
    roots: &mut Vec<RenderedNode>,
    node: RenderedNode,
) {
    match open.last_mut() {
        Some((parent, _)) => parent.children.push(node),
        None => roots.push(node),
    }
}
