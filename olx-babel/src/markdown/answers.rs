//! `=` answers: numerical input when the first answer looks like a number, text input otherwise
//!
//!     = 100 +- 5              numerical, with tolerance
//!     = [5, 7)                numerical range
//!     or= 101                 extra numerical answer
//!     s= Paris                text input
//!     = | Par(is|ee)          text input matched as a regular expression
//!     not= London {{ No }}    feedback for a known wrong text answer

use super::hints::extract_hint;
use crate::pipeline::{Diagnostic, StageContext};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::warn;

static ANSWER_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)(^s?=\s*(.*?$)(\n*(or|not)=\s*(.*?$))*)+").unwrap());
static NUMERIC_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^=\s*").unwrap());
static STRING_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^s?=\s*").unwrap());
static OR_ANSWER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^or=\s*(.*)").unwrap());
static NOT_ANSWER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^not=\s*(.*)").unwrap());
static TOLERANCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(.*?)\+-\s*(.*?$)").unwrap());
static FEEDBACK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\{\{.*?\}\}").unwrap());
static NON_EXPONENT_LETTER: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-df-zA-DF-Z]").unwrap());
static FLOAT_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*[+-]?([0-9]|\.[0-9])").unwrap());
static DECIMAL_LITERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(Infinity|([0-9]+\.?[0-9]*|\.[0-9]+)([eE][+-]?[0-9]+)?)$").unwrap()
});
static RADIX_LITERAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^0([xX][0-9a-fA-F]+|[oO][0-7]+|[bB][01]+)$").unwrap());

/// Runs of `=`/`s=` lines followed by `or=`/`not=` lines become a response element
pub fn convert_answers(text: String, ctx: &mut StageContext) -> String {
    ANSWER_RUN
        .replace_all(&text, |caps: &Captures| {
            let lines: Vec<&str> = caps
                .get(1)
                .map_or("", |m| m.as_str())
                .split('\n')
                .collect();
            numerical_response(&lines, ctx).unwrap_or_else(|| string_response(&lines))
        })
        .into_owned()
}

/// Looks like a number once feedback is removed: no letters besides an exponent `e`,
/// and a leading float
fn is_numeric(value: &str) -> bool {
    let cleaned = if value.contains("{{") && value.contains("}}") {
        FEEDBACK.replace_all(value, "").trim().to_string()
    } else {
        value.to_string()
    };
    !NON_EXPONENT_LETTER.is_match(&cleaned) && FLOAT_PREFIX.is_match(&cleaned)
}

/// `[a, b]`, `(a, b)` or any mix of the two brackets
fn is_range(value: &str) -> bool {
    value.starts_with(['[', '(']) && value.ends_with([']', ')'])
}

/// The whole value reads as one number: decimal, exponent, hex/octal/binary or `Infinity`
///
/// Blank counts as zero.
fn is_number_literal(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || DECIMAL_LITERAL.is_match(value) || RADIX_LITERAL.is_match(value)
}

fn strip_whitespace(value: &str) -> String {
    value.chars().filter(|c| !c.is_whitespace()).collect()
}

fn correct_hint(label: &str, hint: &str) -> String {
    format!("<correcthint{label}>{hint}</correcthint>")
}

fn numerical_response(lines: &[&str], ctx: &mut StageContext) -> Option<String> {
    let first = NUMERIC_PREFIX.replace(lines.first()?, "").into_owned();
    if !is_numeric(&first) && !is_range(&first) {
        return None;
    }

    let answer = extract_hint(&first, false);
    let (answer_text, hint_line) = if answer.has_hint() {
        let line = format!("  {}\n", correct_hint(&answer.label_attribute(), &answer.hint));
        (answer.text.clone(), line)
    } else {
        (first, String::new())
    };

    let mut out = if is_range(&answer_text) {
        format!("<numericalresponse answer=\"{answer_text}\">\n")
    } else {
        match TOLERANCE.captures(&answer_text) {
            Some(tolerance) => {
                let mut out = format!(
                    "<numericalresponse answer=\"{}\">\n",
                    strip_whitespace(&tolerance[1])
                );
                if !tolerance[2].is_empty() {
                    out.push_str(&format!(
                        "  <responseparam type=\"tolerance\" default=\"{}\" />\n",
                        &tolerance[2]
                    ));
                }
                out
            }
            None => format!(
                "<numericalresponse answer=\"{}\">\n",
                strip_whitespace(&answer_text)
            ),
        }
    };

    // only plain numbers can be additional answers; not= has no numerical form
    for line in &lines[1..] {
        let alternative = extract_hint(line, false);
        let Some(or) = OR_ANSWER.captures(&alternative.text) else {
            continue;
        };
        let value = &or[1];
        if !is_number_literal(value) || is_range(value) || TOLERANCE.is_match(value) {
            warn!(block = ctx.block + 1, line = *line, "dropping non-numeric alternative answer");
            ctx.diagnostics.push(Diagnostic::DroppedAlternative {
                block: ctx.block,
                line: line.to_string(),
            });
            continue;
        }

        let hint = if alternative.has_hint() {
            correct_hint(&alternative.label_attribute(), &alternative.hint)
        } else {
            String::new()
        };
        out.push_str(&format!("  <additional_answer answer=\"{value}\">{hint}</additional_answer>\n"));
    }

    out.push_str("  <formulaequationinput />\n");
    out.push_str(&hint_line);
    out.push_str("</numericalresponse>\n\n");
    Some(out)
}

fn string_response(lines: &[&str]) -> String {
    let first = lines.first().copied().unwrap_or_default();
    let answer = extract_hint(&STRING_PREFIX.replace(first, ""), false);

    let (answer_text, kind) = match answer.text.strip_prefix('|') {
        Some(pattern) => (pattern.trim(), " type=\"ci regexp\""),
        None => (answer.text.as_str(), " type=\"ci\""),
    };

    let mut out = format!("<stringresponse answer=\"{answer_text}\"{kind} >\n");
    if answer.has_hint() {
        out.push_str(&format!(
            "  {}\n",
            correct_hint(&answer.label_attribute(), &answer.hint)
        ));
    }

    for line in lines.iter().skip(1) {
        let alternative = extract_hint(line, false);
        if let Some(not) = NOT_ANSWER.captures(&alternative.text) {
            out.push_str(&format!(
                "  <stringequalhint answer=\"{}\"{}>{}</stringequalhint>\n",
                &not[1],
                alternative.label_attribute(),
                alternative.hint
            ));
        } else if let Some(or) = OR_ANSWER.captures(&alternative.text) {
            let hint = if alternative.has_hint() {
                correct_hint(&alternative.label_attribute(), &alternative.hint)
            } else {
                String::new()
            };
            out.push_str(&format!(
                "  <additional_answer answer=\"{}\">{hint}</additional_answer>\n",
                &or[1]
            ));
        }
    }

    out.push_str("  <textline size=\"20\"/>\n</stringresponse>\n\n");
    out
}
