//! Move the rest of a block inside its only response element
//!
//!     The editors expect a single-response problem to carry its question text inside the
//!     response: `<numericalresponse><label/><p/>...<formulaequationinput/></numericalresponse>`.
//!     When a block holds exactly one response element, sitting directly at the top level,
//!     the elements before it are inserted ahead of its first child element and the elements
//!     after it are appended. Top-level text between elements is dropped. Blocks with no
//!     response or several responses are left alone. A lone response nested in other markup
//!     cannot take in the element that contains it; that block is left alone too and
//!     reported, so strict conversions reject it.

use crate::pipeline::{Diagnostic, StageContext};
use crate::problem::{self, ResponseType};
use crate::xml::{self, Node};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

static XMLNS_ATTRIBUTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)\sxmlns=['"].*?['"]"#).unwrap());
static ADJACENT_TAGS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(</.*?>)(<.*?>)").unwrap());

const FRAGMENT_WRAPPER: &str = "prob";

pub fn hoist_single_response(text: String, ctx: &mut StageContext) -> String {
    let mentions_response = ResponseType::ALL
        .iter()
        .any(|response| text.contains(&format!("<{}", response.tag_name())));
    if !mentions_response {
        return text;
    }

    let mut root = match xml::parse_fragment(&text, FRAGMENT_WRAPPER) {
        Ok(root) => root,
        Err(err) => {
            warn!(block = ctx.block + 1, error = %err, "block is not well-formed XML, leaving it as is");
            ctx.diagnostics.push(Diagnostic::MalformedBlock {
                block: ctx.block,
                message: err.to_string(),
            });
            return text;
        }
    };

    let responses = problem::response_elements(&root);
    let [(response, _)] = responses.as_slice() else {
        debug!(block = ctx.block + 1, count = responses.len(), "not a single-response block");
        return text;
    };
    let response_name = response.name.clone();

    let Some(position) = root
        .children
        .iter()
        .position(|child| matches!(child, Node::Element(e) if e.name == response_name))
    else {
        warn!(block = ctx.block + 1, response = %response_name, "single response is nested in other markup, leaving block as is");
        ctx.diagnostics.push(Diagnostic::NestedResponse {
            block: ctx.block,
            response: response_name,
        });
        return text;
    };

    let mut response = match root.children.remove(position) {
        Node::Element(element) => element,
        _ => return text,
    };

    let mut before = Vec::new();
    let mut after = Vec::new();
    for (index, child) in root.children.into_iter().enumerate() {
        if let Node::Element(element) = child {
            if index < position {
                before.push(Node::Element(element));
            } else {
                after.push(Node::Element(element));
            }
        }
    }

    let insert_at = response
        .first_element_index()
        .unwrap_or(response.children.len());
    response.children.splice(insert_at..insert_at, before);
    response.children.extend(after);

    let serialized = response.serialize();
    let serialized = XMLNS_ATTRIBUTE.replace_all(&serialized, "");
    ADJACENT_TAGS.replace_all(&serialized, "${1}\n${2}").into_owned()
}
