use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::borrow::Cow;
use std::fmt;

use super::kind::NodeKind;

/// Wire key holding a node's kind
const KIND_KEY: &str = "type";
/// Wire key holding a node's attributes
const PROPS_KEY: &str = "props";
/// Wire key holding a node's children
const CHILDREN_KEY: &str = "children";

/// Attribute carrying the caller-supplied style class
pub const CLASS_ATTR: &str = "className";
/// Attribute names that are never passed through to the output element
const RESERVED_ATTRS: [&str; 2] = [CLASS_ATTR, CHILDREN_KEY];

/// Whether `name` can be written as an element or attribute name
///
/// ASCII letter first, then ASCII alphanumerics, `-`, `_`, `:` or `.`.
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|first| first.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.'))
}

/// A retained UI schema: the top-level node sequence received from the backend
///
/// Nodes are kept as raw JSON and only interpreted when rendered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UiSchema(Vec<Value>);

impl UiSchema {
    pub fn new(nodes: Vec<Value>) -> Self {
        Self(nodes)
    }

    /// Build a schema from a wire value
    ///
    /// Only a non-empty array counts as a schema update; anything else
    /// (empty array, null, object, scalar) yields `None`.
    pub fn from_update(value: &Value) -> Option<Self> {
        match value {
            Value::Array(nodes) if !nodes.is_empty() => Some(Self(nodes.clone())),
            _ => None,
        }
    }

    pub fn nodes(&self) -> &[Value] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Scalar attribute value passed through to rendered elements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Text(String),
    Number(Number),
    Bool(bool),
}

impl AttrValue {
    /// Convert a JSON value into an attribute; non-scalars are dropped
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self::Text(s.clone())),
            Value::Number(n) => Some(Self::Number(n.clone())),
            Value::Bool(b) => Some(Self::Bool(*b)),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{}", n),
            Self::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// One entry of a children sequence
#[derive(Debug, Clone)]
pub enum SchemaChild<'a> {
    /// Plain text leaf
    Text(Cow<'a, str>),
    /// Nested node
    Node(SchemaNode<'a>),
}

impl<'a> SchemaChild<'a> {
    /// Interpret a raw child value
    ///
    /// Strings and numbers are text; objects with a usable kind are nodes.
    /// Everything else (null, booleans, nested arrays, kindless objects) is `None`.
    pub fn parse(value: &'a Value) -> Option<Self> {
        match value {
            Value::String(text) => Some(Self::Text(Cow::Borrowed(text))),
            Value::Number(n) => Some(Self::Text(Cow::Owned(n.to_string()))),
            Value::Object(_) => SchemaNode::parse(value).map(Self::Node),
            Value::Null | Value::Bool(_) | Value::Array(_) => None,
        }
    }
}

/// Borrowed view of a single schema node
#[derive(Debug, Clone)]
pub struct SchemaNode<'a> {
    kind: NodeKind<'a>,
    props: Option<&'a Map<String, Value>>,
    children: &'a [Value],
}

impl<'a> SchemaNode<'a> {
    /// View a raw value as a node; `None` when it is not an object or lacks a kind
    pub fn parse(value: &'a Value) -> Option<Self> {
        let object = value.as_object()?;
        let kind = object
            .get(KIND_KEY)
            .and_then(Value::as_str)
            .filter(|tag| is_valid_name(tag))?;

        let props = object.get(PROPS_KEY).and_then(Value::as_object);
        let children = object
            .get(CHILDREN_KEY)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[]);

        Some(Self {
            kind: NodeKind::from_tag(kind),
            props,
            children,
        })
    }

    pub fn kind(&self) -> &NodeKind<'a> {
        &self.kind
    }

    /// Caller-supplied style class, if any
    pub fn class_name(&self) -> Option<&'a str> {
        self.props?
            .get(CLASS_ATTR)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|class| !class.is_empty())
    }

    /// Attributes to pass through: everything except the reserved keys
    pub fn attributes(&self) -> impl Iterator<Item = (&'a str, AttrValue)> + 'a {
        self.props
            .into_iter()
            .flatten()
            .filter(|(key, _)| !RESERVED_ATTRS.contains(&key.as_str()) && is_valid_name(key))
            .filter_map(|(key, value)| AttrValue::from_json(value).map(|v| (key.as_str(), v)))
    }

    pub fn children(&self) -> &'a [Value] {
        self.children
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_node_requires_kind() {
        assert!(SchemaNode::parse(&json!({ "props": {} })).is_none());
        assert!(SchemaNode::parse(&json!({ "type": 42 })).is_none());
        assert!(SchemaNode::parse(&json!({ "type": "  " })).is_none());
        assert!(SchemaNode::parse(&json!("Card")).is_none());
        assert!(SchemaNode::parse(&json!({ "type": "Card" })).is_some());
    }

    #[test]
    fn test_attributes_skip_reserved_and_non_scalar() {
        let value = json!({
            "type": "img",
            "props": {
                "className": "w-full",
                "children": "ignored",
                "src": "poster.jpg",
                "width": 320,
                "hidden": false,
                "style": { "color": "red" },
                "alt": null
            }
        });
        let node = SchemaNode::parse(&value).unwrap();

        let mut attrs: Vec<_> = node.attributes().collect();
        attrs.sort_by(|a, b| a.0.cmp(b.0));
        assert_eq!(
            attrs,
            vec![
                ("hidden", AttrValue::Bool(false)),
                ("src", AttrValue::Text("poster.jpg".to_string())),
                ("width", AttrValue::Number(320.into())),
            ]
        );
        assert_eq!(node.class_name(), Some("w-full"));
    }

    #[test]
    fn test_invalid_names_are_rejected() {
        assert!(SchemaNode::parse(&json!({ "type": "p><script>x()</script" })).is_none());
        assert!(SchemaNode::parse(&json!({ "type": "my-widget" })).is_some());
        assert!(SchemaNode::parse(&json!({ "type": "1div" })).is_none());

        let value = json!({
            "type": "div",
            "props": { "data-id": 1, "onclick=\"x()\"": "y", "a b": "c" }
        });
        let node = SchemaNode::parse(&value).unwrap();
        let names: Vec<_> = node.attributes().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["data-id"]);
    }

    #[test]
    fn test_valid_names() {
        assert!(is_valid_name("CardTitle"));
        assert!(is_valid_name("xlink:href"));
        assert!(is_valid_name("aria-label"));
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("-x"));
        assert!(!is_valid_name("p>"));
        assert!(!is_valid_name("a\"b"));
    }

    #[test]
    fn test_non_object_props_treated_as_empty() {
        let value = json!({ "type": "div", "props": "oops", "children": ["hi"] });
        let node = SchemaNode::parse(&value).unwrap();

        assert_eq!(node.attributes().count(), 0);
        assert_eq!(node.class_name(), None);
        assert_eq!(node.children().len(), 1);
    }

    #[test]
    fn test_schema_update_requires_non_empty_array() {
        assert!(UiSchema::from_update(&json!([])).is_none());
        assert!(UiSchema::from_update(&json!(null)).is_none());
        assert!(UiSchema::from_update(&json!({ "type": "Card" })).is_none());

        let schema = UiSchema::from_update(&json!([{ "type": "Card" }])).unwrap();
        assert_eq!(schema.len(), 1);
    }

    #[test]
    fn test_child_parsing() {
        assert!(matches!(SchemaChild::parse(&json!("text")), Some(SchemaChild::Text(_))));
        assert!(matches!(SchemaChild::parse(&json!(7)), Some(SchemaChild::Text(t)) if t == "7"));
        assert!(SchemaChild::parse(&json!(null)).is_none());
        assert!(SchemaChild::parse(&json!(true)).is_none());
        assert!(SchemaChild::parse(&json!(["nested"])).is_none());
    }
}
