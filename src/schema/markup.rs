use super::render::{Element, RenderedNode, RenderedTree};

/// Elements written without a closing tag
const VOID_ELEMENTS: [&str; 8] = ["img", "br", "hr", "input", "meta", "link", "source", "wbr"];

enum Step<'a> {
    Enter(&'a RenderedNode),
    Close(&'a str),
}

impl RenderedTree {
    /// Serialise the tree as HTML markup
    ///
    /// Text and attribute values are escaped the way a DOM host would treat
    /// them; the tree itself is written verbatim.
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        let mut steps: Vec<Step<'_>> = self.nodes.iter().rev().map(Step::Enter).collect();

        while let Some(step) = steps.pop() {
            match step {
                Step::Enter(RenderedNode::Text(text)) => escape_into(&mut out, text, false),
                Step::Enter(RenderedNode::Element(element)) => {
                    write_open_tag(&mut out, element);
                    if VOID_ELEMENTS.contains(&element.tag.as_str()) {
                        out.push_str(" />");
                        continue;
                    }
                    out.push('>');
                    steps.push(Step::Close(&element.tag));
                    steps.extend(element.children.iter().rev().map(Step::Enter));
                }
                Step::Close(tag) => {
                    out.push_str("</");
                    out.push_str(tag);
                    out.push('>');
                }
            }
        }

        out
    }
}

fn write_open_tag(out: &mut String, element: &Element) {
    out.push('<');
    out.push_str(&element.tag);

    if let Some(class) = &element.class {
        out.push_str(" class=\"");
        escape_into(out, class, true);
        out.push('"');
    }

    for (name, value) in &element.attributes {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        escape_into(out, &value.to_string(), true);
        out.push('"');
    }
}

fn escape_into(out: &mut String, text: &str, in_attribute: bool) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if in_attribute => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
}
