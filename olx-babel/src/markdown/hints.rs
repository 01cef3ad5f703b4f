//! Inline `{{ ... }}` hint extraction
//!
//! Answer lines of every problem type may carry feedback in double braces:
//!
//!     (x) Paris {{ Correct! }}
//!     [[ Apple {{ fruit:: Apples grow on trees }} ]]
//!
//! Text before a `::` names the hint (`label` attribute); the rest is the hint body.

use once_cell::sync::Lazy;
use regex::Regex;

static INLINE_HINT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\{\{(.*?)\}\}").unwrap());
static HINT_LABEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(.*?)::").unwrap());

/// An answer line split into its visible text and its optional hint
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedHint {
    /// The line with the first `{{...}}` (and the whitespace before it) removed
    pub text: String,
    /// Trimmed hint body, empty when the line has none
    pub hint: String,
    /// `Some` whenever a `::` was present, even if the label itself is blank
    pub label: Option<String>,
    /// The remaining text was wrapped in parentheses (only when requested)
    pub parens: bool,
}

impl ExtractedHint {
    pub fn has_hint(&self) -> bool {
        !self.hint.is_empty()
    }

    /// ` label="..."` whenever a label separator was written
    pub fn label_attribute(&self) -> String {
        match &self.label {
            Some(label) => format!(" label=\"{label}\""),
            None => String::new(),
        }
    }

    /// ` label="..."` only for a non-blank label
    pub fn non_empty_label_attribute(&self) -> String {
        match &self.label {
            Some(label) if !label.is_empty() => format!(" label=\"{label}\""),
            _ => String::new(),
        }
    }
}

/// Pull the first `{{ label:: hint }}` out of `input`
///
/// With `detect_parens`, a remaining text of the form `(...)` loses its outer parentheses
/// and `parens` is set; dropdown options use this to mark the correct answer.
pub fn extract_hint(input: &str, detect_parens: bool) -> ExtractedHint {
    let mut extracted = ExtractedHint {
        text: input.to_string(),
        ..ExtractedHint::default()
    };

    if let Some(caps) = INLINE_HINT.captures(input) {
        let whole = caps.get(0).map_or(0..0, |m| m.range());
        extracted.text.replace_range(whole, "");

        let body = caps.get(1).map_or("", |m| m.as_str()).trim();
        match HINT_LABEL.captures(body) {
            Some(label) => {
                let prefix_len = label.get(0).map_or(0, |m| m.end());
                extracted.hint = body[prefix_len..].trim().to_string();
                extracted.label = Some(label[1].trim().to_string());
            }
            None => extracted.hint = body.to_string(),
        }
    }

    if detect_parens {
        let text = &extracted.text;
        if text.len() >= 2 && text.starts_with('(') && text.ends_with(')') {
            extracted.text = text[1..text.len() - 1].to_string();
            extracted.parens = true;
        }
    }

    extracted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_without_hint_is_untouched() {
        let extracted = extract_hint("Paris", false);
        assert_eq!(extracted.text, "Paris");
        assert!(!extracted.has_hint());
        assert_eq!(extracted.label, None);
    }

    #[test]
    fn removes_hint_and_leading_whitespace() {
        let extracted = extract_hint("Paris  {{ Correct! }}", false);
        assert_eq!(extracted.text, "Paris");
        assert_eq!(extracted.hint, "Correct!");
        assert_eq!(extracted.label_attribute(), "");
    }

    #[test]
    fn splits_label_from_hint() {
        let extracted = extract_hint("Apple {{ fruit :: Apples grow on trees }}", false);
        assert_eq!(extracted.hint, "Apples grow on trees");
        assert_eq!(extracted.label.as_deref(), Some("fruit"));
        assert_eq!(extracted.label_attribute(), " label=\"fruit\"");
    }

    #[test]
    fn blank_label_only_counts_for_the_permissive_attribute() {
        let extracted = extract_hint("A {{ :: hint }}", false);
        assert_eq!(extracted.label_attribute(), " label=\"\"");
        assert_eq!(extracted.non_empty_label_attribute(), "");
    }

    #[test]
    fn only_first_hint_is_extracted() {
        let extracted = extract_hint("A {{one}} {{two}}", false);
        assert_eq!(extracted.text, "A {{two}}");
        assert_eq!(extracted.hint, "one");
    }

    #[test]
    fn detects_parenthesized_text() {
        let extracted = extract_hint("(Orange) {{ yes }}", true);
        assert_eq!(extracted.text, "Orange");
        assert!(extracted.parens);

        let plain = extract_hint("(Orange) extra", true);
        assert_eq!(plain.text, "(Orange) extra");
        assert!(!plain.parens);
    }
}
