//! Response types and problem classification
//!
//! A converted problem is "basic" when it carries exactly one response element, which is
//! what the simple editors can open. Anything else is "advanced" and has to be edited as
//! raw OLX. A `<problem>` holding nothing but whitespace has no type yet.

use crate::error::FormatError;
use crate::xml::{self, Element};
use serde::Serialize;
use std::fmt;

/// The answer elements the markdown shorthand knows how to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseType {
    OptionResponse,
    MultipleChoiceResponse,
    StringResponse,
    NumericalResponse,
    ChoiceResponse,
}

impl ResponseType {
    pub const ALL: [ResponseType; 5] = [
        ResponseType::OptionResponse,
        ResponseType::MultipleChoiceResponse,
        ResponseType::StringResponse,
        ResponseType::NumericalResponse,
        ResponseType::ChoiceResponse,
    ];

    pub fn tag_name(self) -> &'static str {
        match self {
            ResponseType::OptionResponse => "optionresponse",
            ResponseType::MultipleChoiceResponse => "multiplechoiceresponse",
            ResponseType::StringResponse => "stringresponse",
            ResponseType::NumericalResponse => "numericalresponse",
            ResponseType::ChoiceResponse => "choiceresponse",
        }
    }

    /// Name shown to authors in the problem type picker
    pub fn title(self) -> &'static str {
        match self {
            ResponseType::OptionResponse => "Dropdown",
            ResponseType::MultipleChoiceResponse => "Single select",
            ResponseType::StringResponse => "Text input",
            ResponseType::NumericalResponse => "Numerical input",
            ResponseType::ChoiceResponse => "Multi-select",
        }
    }

    pub fn from_tag_name(name: &str) -> Option<ResponseType> {
        ResponseType::ALL
            .into_iter()
            .find(|response| response.tag_name() == name)
    }
}

impl fmt::Display for ResponseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag_name())
    }
}

/// Which editor a problem document belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProblemType {
    Basic(ResponseType),
    Advanced,
}

impl fmt::Display for ProblemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProblemType::Basic(response) => write!(f, "{} ({})", response.title(), response),
            ProblemType::Advanced => f.write_str("Advanced"),
        }
    }
}

/// Response elements found anywhere in `root`, in document order
pub(crate) fn response_elements(root: &Element) -> Vec<(&Element, ResponseType)> {
    root.descendants()
        .into_iter()
        .filter_map(|element| ResponseType::from_tag_name(&element.name).map(|t| (element, t)))
        .collect()
}

/// List the response types of an OLX document in document order
pub fn detect_response_types(olx: &str) -> Result<Vec<ResponseType>, FormatError> {
    let root = xml::parse(olx)?;
    Ok(response_elements(&root)
        .into_iter()
        .map(|(_, response)| response)
        .collect())
}

/// Decide which editor can open an OLX `<problem>` document
///
/// Only direct children of the root count, so a response nested inside some other markup
/// makes the problem advanced.
pub fn classify_problem(olx: &str) -> Result<Option<ProblemType>, FormatError> {
    let root = xml::parse(olx)?;
    if root.is_blank() {
        return Ok(None);
    }

    let responses: Vec<ResponseType> = root
        .child_elements()
        .filter_map(|child| ResponseType::from_tag_name(&child.name))
        .collect();

    match responses.as_slice() {
        [single] => Ok(Some(ProblemType::Basic(*single))),
        _ => Ok(Some(ProblemType::Advanced)),
    }
}
