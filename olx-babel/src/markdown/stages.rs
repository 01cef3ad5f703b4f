//! Text-level stages: everything that does not produce a response element
//!
//! Response conversion lives in `choices` and `answers`, hoisting in `hoist`.

use crate::pipeline::StageContext;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static HEADER_UNDERLINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^==+$").unwrap());
static LABEL_BLOCK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)>>(.+?)<<").unwrap());
static DEMAND_HINT_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)(^\s*\|\|.*?\|\|\s*$\n?)+").unwrap());
static DEMAND_HINT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\|\|(.*?)\|\|").unwrap());
static EXTENDED_HINT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\{\{.*?\}\}").unwrap());
static HINT_LINE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\r?\n[ \t]*").unwrap());
static EXPLANATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\[explanation\]\n?([^\]]*)\[/?explanation\]").unwrap());
static CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\[code\]\n?([^\]]*)\[/?code\]").unwrap());
static VERBATIM_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"</?(?:script|pre|label|description).*?>").unwrap());
static VERBATIM_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<(script|pre|label|description)").unwrap());
static VERBATIM_CLOSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"</(script|pre|label|description)").unwrap());
static QTITLE_CLASS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\sclass='qtitle'").unwrap());

pub fn normalize_line_endings(text: String) -> String {
    text.replace("\r\n", "\n")
}

/// `Title` followed by a `==` line becomes an `<h3>`; the underline goes away
///
/// An underline on the very first line has no line above it and is left alone.
pub fn convert_headers(text: String) -> String {
    let lines: Vec<&str> = text.split('\n').collect();

    let wrapped: Vec<String> = lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let underlined = lines
                .get(i + 1)
                .is_some_and(|next| HEADER_UNDERLINE.is_match(next));
            if underlined {
                format!("<h3 class=\"hd hd-2 problem-header\">{line}</h3>")
            } else {
                line.to_string()
            }
        })
        .collect();

    let mut out = String::with_capacity(text.len() + 64);
    for (i, line) in wrapped.iter().enumerate() {
        if i == 0 {
            out.push_str(line);
        } else if !HEADER_UNDERLINE.is_match(line) {
            out.push('\n');
            out.push_str(line);
        }
    }
    out
}

/// `>>label||description<<` becomes `<label>` plus an optional `<description>`
pub fn convert_labels(text: String) -> String {
    LABEL_BLOCK
        .replace_all(&text, |caps: &Captures| {
            let mut parts = caps[1].split("||");
            let label = format!("<label>{}</label>\n", parts.next().unwrap_or_default());
            match parts.next() {
                Some(description) if !description.is_empty() => {
                    format!("{label}<description>{description}</description>\n")
                }
                _ => label,
            }
        })
        .into_owned()
}

/// Remove runs of `|| hint ||` lines, keeping each hint for the `<demandhint>` section
pub fn extract_demand_hints(text: String, ctx: &mut StageContext) -> String {
    DEMAND_HINT_RUN
        .replace_all(&text, |caps: &Captures| {
            for line in caps[0].split('\n') {
                if let Some(hint) = DEMAND_HINT.captures(line) {
                    ctx.block_hints.push(hint[1].trim().to_string());
                }
            }
            ""
        })
        .into_owned()
}

/// Multi-line `{{ ... }}` hints are joined into one line so later line-based rules see them whole
pub fn fold_extended_hints(text: String) -> String {
    EXTENDED_HINT
        .replace_all(&text, |caps: &Captures| {
            HINT_LINE_BREAK.replace_all(&caps[0], " ").into_owned()
        })
        .into_owned()
}

/// `[explanation]` becomes a `<solution>`, `[code]` a `<pre><code>` block
///
/// The closing slash is optional and the body may not contain `]`.
pub fn convert_explanations(text: String) -> String {
    let text = EXPLANATION.replace_all(&text, |caps: &Captures| {
        format!(
            "<solution>\n<div class=\"detailed-solution\">\nExplanation\n\n{}\n</div>\n</solution>",
            &caps[1]
        )
    });
    CODE.replace_all(&text, |caps: &Captures| format!("<pre><code>{}</code></pre>", &caps[1]))
        .into_owned()
}

/// Wrap every bare line in `<p>`, except inside script, pre, label and description elements
pub fn wrap_paragraphs(text: String) -> String {
    let mut pieces: Vec<&str> = Vec::new();
    let mut last = 0;
    for tag in VERBATIM_TAG.find_iter(&text) {
        pieces.push(&text[last..tag.start()]);
        pieces.push(tag.as_str());
        last = tag.end();
    }
    pieces.push(&text[last..]);

    let mut wrapping = true;
    let mut out = String::with_capacity(text.len() + 32);
    for piece in pieces {
        if VERBATIM_OPEN.is_match(piece) {
            wrapping = false;
        }
        let piece = if wrapping {
            wrap_bare_lines(piece)
        } else {
            piece.to_string()
        };
        if VERBATIM_CLOSE.is_match(&piece) {
            wrapping = true;
        }
        out.push_str(&piece);
    }
    out
}

/// A line is bare when it is not empty and the next non-whitespace character, looking
/// across the following lines, is not the start of a tag
fn wrap_bare_lines(piece: &str) -> String {
    let mut out = String::with_capacity(piece.len() + 16);
    let mut offset = 0;
    for (i, line) in piece.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let starts_with_tag = piece[offset..].trim_start().starts_with('<');
        if line.is_empty() || starts_with_tag {
            out.push_str(line);
        } else {
            out.push_str("<p>");
            out.push_str(line);
            out.push_str("</p>");
        }
        offset += line.len() + 1;
    }
    out
}

/// Collapse `\n\n\n` to a single newline, left to right
pub fn collapse_blank_lines(text: String) -> String {
    text.replace("\n\n\n", "\n")
}

/// Hand the block's demand hints over to the document
pub fn assemble_demand_hints(text: String, ctx: &mut StageContext) -> String {
    ctx.demand_hints.append(&mut ctx.block_hints);
    text
}

pub fn final_cleanup(text: String) -> String {
    QTITLE_CLASS.replace_all(&text, "").into_owned()
}
