//! Choice-style responses: dropdowns, single select and multi-select
//!
//!     [[apple, (banana), cherry]]        dropdown, one line
//!     [[                                 dropdown, one option per line
//!         apple {{ not yellow }}
//!         (banana)
//!     ]]
//!     (x) correct                        single select; `@` pins, `!` shuffles
//!     ( ) wrong
//!     [x] correct                        multi-select
//!     [ ] wrong {{ selected: no }, { unselected: right }}
//!     {{ ((A B)) compound hint }}

use super::hints::extract_hint;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static OPTION_BLOCK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\[\[(.+?)\]\]").unwrap());
static OPTION_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r",\s*").unwrap());
static PARENTHESIZED_OPTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|,)\s*\((.*?)\)\s*(?:$|,)").unwrap());

static CHOICE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)(^\s*\(.{0,3}\).*?$\n*)+").unwrap());
static CHOICE_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*\((.{0,3})\)\s*").unwrap());

static CHECKBOX_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)(^\s*((\[.?\])|(\{\{.*?\}\})).*?$\n*)+").unwrap());
static CHECKBOX_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*\[.?\]\s*").unwrap());
static CHECKED: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^\s*\[x\]").unwrap());
static COMPOUND_HINT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\{\{\s*\(\((.*?)\)\)(.*?)\}\}").unwrap());
static SELECTED_HINT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)\{\s*(s|selected):(.*?)\}").unwrap());
static UNSELECTED_HINT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)\{\s*(u|unselected):(.*?)\}").unwrap());

/// `[[ ... ]]` becomes an `<optionresponse>`
pub fn convert_option_responses(text: String) -> String {
    OPTION_BLOCK
        .replace_all(&text, |caps: &Captures| {
            let body = &caps[1];
            if caps[0].contains('\n') {
                option_lines(body)
            } else {
                inline_options(body)
            }
        })
        .into_owned()
}

/// `[[A, (B), C]]`: the first parenthesized option is the answer
fn inline_options(body: &str) -> String {
    let options: Vec<String> = OPTION_SEPARATOR
        .split(body)
        .map(|option| format!("'{}'", PARENTHESIZED_OPTION.replace_all(option, "${1}")))
        .collect();
    let correct = PARENTHESIZED_OPTION
        .captures(body)
        .map(|caps| caps[1].to_string())
        .unwrap_or_default();

    format!(
        "\n<optionresponse>\n  <optioninput options=\"({})\" correct=\"{correct}\"></optioninput>\n</optionresponse>\n\n",
        options.join(",")
    )
}

/// One option per line, `(answer)` in parentheses, each with an optional hint
fn option_lines(body: &str) -> String {
    let mut options = String::new();
    for line in body.split('\n').map(str::trim).filter(|line| !line.is_empty()) {
        let option = extract_hint(line, true);
        let correct = if option.parens { "True" } else { "False" };
        let hint = if option.has_hint() {
            format!(
                " <optionhint{}>{}</optionhint>",
                option.non_empty_label_attribute(),
                option.hint
            )
        } else {
            String::new()
        };
        options.push_str(&format!(
            "    <option correct=\"{correct}\">{}{hint}</option>\n",
            option.text
        ));
    }

    format!("\n<optionresponse>\n  <optioninput>\n{options}  </optioninput>\n</optionresponse>\n\n")
}

/// Runs of `(x)` / `( )` lines become a `<multiplechoiceresponse>`
pub fn convert_multiple_choice(text: String) -> String {
    CHOICE_RUN
        .replace_all(&text, |caps: &Captures| {
            let mut shuffle = false;
            let mut choices = String::new();

            for line in caps[0].split('\n').map(str::trim).filter(|l| !l.is_empty()) {
                let Some(marker) = CHOICE_MARKER.captures(line) else {
                    continue;
                };
                let flags = &marker[1];
                let correct = flags.contains(['x', 'X']);
                let fixed = if flags.contains('@') { " fixed=\"true\"" } else { "" };
                shuffle |= flags.contains('!');

                let value = &line[marker.get(0).map_or(0, |m| m.end())..];
                let choice = extract_hint(value, false);
                let value = if choice.has_hint() {
                    format!(
                        "{} <choicehint{}>{}</choicehint>",
                        choice.text,
                        choice.label_attribute(),
                        choice.hint
                    )
                } else {
                    value.to_string()
                };
                choices.push_str(&format!(
                    "    <choice correct=\"{correct}\"{fixed}>{value}</choice>\n"
                ));
            }

            let group = if shuffle {
                "  <choicegroup type=\"MultipleChoice\" shuffle=\"true\">\n"
            } else {
                "  <choicegroup type=\"MultipleChoice\">\n"
            };
            format!("<multiplechoiceresponse>\n{group}{choices}  </choicegroup>\n</multiplechoiceresponse>\n\n")
        })
        .into_owned()
}

/// Runs of `[x]` / `[ ]` lines, with `{{ ((A B)) ... }}` lines mixed in, become a `<choiceresponse>`
pub fn convert_checkboxes(text: String) -> String {
    CHECKBOX_RUN
        .replace_all(&text, |caps: &Captures| {
            let mut choices = String::new();
            // compound hints go after every choice
            let mut compound_hints = String::new();

            for line in caps[0].split('\n').filter(|l| !l.trim().is_empty()) {
                if let Some(compound) = COMPOUND_HINT.captures(line) {
                    let body = compound[2].replacen("&lf;", "\n", 1);
                    compound_hints.push_str(&format!(
                        "    <compoundhint value=\"{}\">{}</compoundhint>\n",
                        compound[1].trim(),
                        body.trim()
                    ));
                    continue;
                }
                choices.push_str(&checkbox_choice(line));
            }

            format!(
                "<choiceresponse>\n  <checkboxgroup>\n{choices}{compound_hints}  </checkboxgroup>\n</choiceresponse>\n\n"
            )
        })
        .into_owned()
}

fn checkbox_choice(line: &str) -> String {
    let correct = CHECKED.is_match(line);
    // a `{{...}}` line without a box keeps its text as a plain choice
    let mut value = match CHECKBOX_MARKER.find(line) {
        Some(marker) => line[marker.end()..].to_string(),
        None => line.trim().to_string(),
    };

    let choice = extract_hint(&value, false);
    let mut hints = String::new();
    if choice.has_hint() {
        let inner = format!("{{{}}}", choice.hint);
        if let Some(selected) = SELECTED_HINT.captures(&inner) {
            hints.push_str(&format!(
                "\n      <choicehint selected=\"true\">{}</choicehint>",
                selected[2].trim()
            ));
        }
        if let Some(unselected) = UNSELECTED_HINT.captures(&inner) {
            hints.push_str(&format!(
                "\n      <choicehint selected=\"false\">{}</choicehint>",
                unselected[2].trim()
            ));
        }
        // a hint in any other form stays visible so the author notices it
        if !hints.is_empty() {
            value = choice.text;
        }
    }

    format!("    <choice correct=\"{correct}\">{value}{hints}</choice>\n")
}
