use super::{Attribute, Element, Node};
use crate::error::FormatError;
use once_cell::sync::Lazy;
use regex::Regex;
use roxmltree::NodeType;

const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

static CDATA_SECTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\A<!\[CDATA\[(.*?)\]\]>").unwrap());

/// Parse a complete XML document into an owned tree rooted at its root element
pub fn parse(source: &str) -> Result<Element, FormatError> {
    let doc = roxmltree::Document::parse(source)
        .map_err(|e| FormatError::ParseError(format!("XML parsing error: {e}")))?;

    Ok(convert_element(doc.root_element()))
}

/// Parse markup that may hold several top-level nodes by wrapping it in `<wrapper>`
pub fn parse_fragment(fragment: &str, wrapper: &str) -> Result<Element, FormatError> {
    parse(&format!("<{wrapper}>{fragment}</{wrapper}>"))
}

fn convert_element(node: roxmltree::Node) -> Element {
    let tag = node.tag_name();
    let mut element = Element::new(qualified_name(node, tag.namespace(), tag.name()));

    for (prefix, uri) in declared_namespaces(node) {
        let name = match prefix {
            Some(prefix) => format!("xmlns:{prefix}"),
            None => "xmlns".to_string(),
        };
        element.attributes.push(Attribute {
            name,
            value: uri.to_string(),
        });
    }

    for attr in node.attributes() {
        element.attributes.push(Attribute {
            name: qualified_name(node, attr.namespace(), attr.name()),
            value: attr.value().to_string(),
        });
    }

    for child in node.children() {
        match child.node_type() {
            NodeType::Element => element.children.push(Node::Element(convert_element(child))),
            NodeType::Text => element.children.extend(text_nodes(child)),
            NodeType::Comment => {
                element
                    .children
                    .push(Node::Comment(child.text().unwrap_or("").to_string()));
            }
            NodeType::PI => {
                if let Some(pi) = child.pi() {
                    element.children.push(Node::ProcessingInstruction {
                        target: pi.target.to_string(),
                        value: pi.value.map(|v| v.to_string()),
                    });
                }
            }
            NodeType::Root => {}
        }
    }

    element
}

/// roxmltree folds CDATA sections into the surrounding text; split them back out of the source
fn text_nodes(node: roxmltree::Node) -> Vec<Node> {
    let text = node.text().unwrap_or("");
    let mut rest = &node.document().input_text()[node.range().start..];

    let first_tag = rest.find('<').unwrap_or(rest.len());
    if !rest[first_tag..].starts_with("<![CDATA[") {
        return match text {
            "" => Vec::new(),
            text => vec![Node::Text(text.to_string())],
        };
    }

    let mut nodes = Vec::new();
    loop {
        if let Some(section) = CDATA_SECTION.captures(rest) {
            nodes.push(Node::CData(section[1].to_string()));
            rest = &rest[section[0].len()..];
            continue;
        }
        let end = rest.find('<').unwrap_or(rest.len());
        if end == 0 {
            break;
        }
        nodes.push(Node::Text(decode_text(&rest[..end])));
        rest = &rest[end..];
    }

    nodes
}

/// Resolve references in a run of raw character data
fn decode_text(raw: &str) -> String {
    let wrapped = format!("<t>{raw}</t>");
    roxmltree::Document::parse(&wrapped)
        .ok()
        .and_then(|doc| doc.root_element().text().map(str::to_string))
        .unwrap_or_else(|| raw.to_string())
}

/// Namespaces declared on this element (in scope here but not on the parent)
fn declared_namespaces(node: roxmltree::Node) -> Vec<(Option<String>, String)> {
    let in_scope = |element: roxmltree::Node| -> Vec<(Option<String>, String)> {
        element
            .namespaces()
            .map(|ns| (ns.name().map(str::to_string), ns.uri().to_string()))
            .collect()
    };
    let inherited = node.parent_element().map(in_scope).unwrap_or_default();

    in_scope(node)
        .into_iter()
        .filter(|(_, uri)| uri != XML_NAMESPACE)
        .filter(|declared| !inherited.contains(declared))
        .collect()
}

fn qualified_name(node: roxmltree::Node, namespace: Option<&str>, local: &str) -> String {
    match namespace.and_then(|uri| node.lookup_prefix(uri)) {
        Some(prefix) if !prefix.is_empty() => format!("{prefix}:{local}"),
        _ => local.to_string(),
    }
}
