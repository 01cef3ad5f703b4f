//! Owned XML tree used where converted markup has to be restructured
//!
//!     roxmltree gives us a fast, well-tested parser but its documents are read-only. The
//!     hoisting stage needs to move elements between parents, so parsed documents are copied
//!     into this small owned model (element, text, CDATA, comment, processing instruction) and written
//!     back out with the conventions of a browser `XMLSerializer`:
//!
//!     - empty elements self-close without a space: `<formulaequationinput/>`
//!     - text escapes `&`, `<` and `>`
//!     - attribute values escape `&`, `<`, `>`, `"` and tab/newline/carriage return
//!     - attributes keep their source order, namespace declarations come first
//!     - CDATA sections are written back as CDATA, unescaped

mod parser;

pub use parser::{parse, parse_fragment};

/// A node in the owned tree
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
    CData(String),
    Comment(String),
    ProcessingInstruction {
        target: String,
        value: Option<String>,
    },
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }
}

/// A single attribute, name as written (prefix included)
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// An element with ordered attributes and children
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Element {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }

    /// Direct element children, in order
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// Index (into `children`) of the first element child
    pub fn first_element_index(&self) -> Option<usize> {
        self.children
            .iter()
            .position(|child| matches!(child, Node::Element(_)))
    }

    /// All descendant elements in document order, not including `self`
    pub fn descendants(&self) -> Vec<&Element> {
        let mut found = Vec::new();
        collect_descendants(self, &mut found);
        found
    }

    /// True when the element has no element children and its text is only whitespace
    pub fn is_blank(&self) -> bool {
        self.children.iter().all(|child| match child {
            Node::Text(text) | Node::CData(text) => text.trim().is_empty(),
            Node::Comment(_) => true,
            _ => false,
        })
    }

    pub fn serialize(&self) -> String {
        let mut out = String::new();
        write_element(self, &mut out);
        out
    }
}

fn collect_descendants<'a>(element: &'a Element, found: &mut Vec<&'a Element>) {
    for child in element.child_elements() {
        found.push(child);
        collect_descendants(child, found);
    }
}

fn write_element(element: &Element, out: &mut String) {
    out.push('<');
    out.push_str(&element.name);
    for attr in &element.attributes {
        out.push(' ');
        out.push_str(&attr.name);
        out.push_str("=\"");
        escape_attribute(&attr.value, out);
        out.push('"');
    }

    if element.children.is_empty() {
        out.push_str("/>");
        return;
    }

    out.push('>');
    for child in &element.children {
        write_node(child, out);
    }
    out.push_str("</");
    out.push_str(&element.name);
    out.push('>');
}

fn write_node(node: &Node, out: &mut String) {
    match node {
        Node::Element(element) => write_element(element, out),
        Node::Text(text) => escape_text(text, out),
        Node::CData(text) => {
            out.push_str("<![CDATA[");
            out.push_str(text);
            out.push_str("]]>");
        }
        Node::Comment(text) => {
            out.push_str("<!--");
            out.push_str(text);
            out.push_str("-->");
        }
        Node::ProcessingInstruction { target, value } => {
            out.push_str("<?");
            out.push_str(target);
            if let Some(value) = value {
                out.push(' ');
                out.push_str(value);
            }
            out.push_str("?>");
        }
    }
}

fn escape_text(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
}

fn escape_attribute(value: &str, out: &mut String) {
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\t' => out.push_str("&#9;"),
            '\n' => out.push_str("&#10;"),
            '\r' => out.push_str("&#13;"),
            _ => out.push(ch),
        }
    }
}
