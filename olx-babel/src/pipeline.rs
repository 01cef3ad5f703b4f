//! The per-block rewrite pipeline
//!
//!     Every `---` separated block of markdown is rewritten by the same fixed sequence of
//!     stages. Each stage is a plain function from text to text; the only state they share is
//!     the [`StageContext`], which collects demand hints and diagnostics for one conversion.
//!
//!     Stages are listed in [`Stage::ALL`] in the order they run. The order matters: option
//!     responses must be converted before the checkbox rule sees `[[`, answers before
//!     paragraph wrapping, and hoisting needs the final markup of the block.
//!
//!     A [`Conversion`] keeps the text of every block after every stage, which is what the
//!     `inspect` command shows when a rule does not fire the way an author expects.

use crate::error::FormatError;
use crate::markdown::{answers, choices, hoist, stages};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// A stage function: block text in, rewritten block text out
pub type StageFn = fn(String, &mut StageContext) -> String;

/// One of the ordered rewrite passes applied to every block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    NormalizeLineEndings,
    Headers,
    Labels,
    DemandHints,
    FoldHints,
    OptionResponse,
    MultipleChoice,
    Checkbox,
    Answers,
    Explanations,
    Paragraphs,
    Whitespace,
    DemandHintAssembly,
    HoistResponse,
    Cleanup,
}

impl Stage {
    /// All stages, in execution order
    pub const ALL: [Stage; 15] = [
        Stage::NormalizeLineEndings,
        Stage::Headers,
        Stage::Labels,
        Stage::DemandHints,
        Stage::FoldHints,
        Stage::OptionResponse,
        Stage::MultipleChoice,
        Stage::Checkbox,
        Stage::Answers,
        Stage::Explanations,
        Stage::Paragraphs,
        Stage::Whitespace,
        Stage::DemandHintAssembly,
        Stage::HoistResponse,
        Stage::Cleanup,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Stage::NormalizeLineEndings => "normalize-line-endings",
            Stage::Headers => "headers",
            Stage::Labels => "labels",
            Stage::DemandHints => "demand-hints",
            Stage::FoldHints => "fold-hints",
            Stage::OptionResponse => "option-response",
            Stage::MultipleChoice => "multiple-choice",
            Stage::Checkbox => "checkbox",
            Stage::Answers => "answers",
            Stage::Explanations => "explanations",
            Stage::Paragraphs => "paragraphs",
            Stage::Whitespace => "whitespace",
            Stage::DemandHintAssembly => "demand-hint-assembly",
            Stage::HoistResponse => "hoist-response",
            Stage::Cleanup => "cleanup",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Stage::NormalizeLineEndings => "Convert CRLF line endings to LF",
            Stage::Headers => "Turn `Title` over a `===` line into an <h3> header",
            Stage::Labels => "Turn >>label||description<< into <label> and <description>",
            Stage::DemandHints => "Collect || hint || lines as demand hints",
            Stage::FoldHints => "Join {{ ... }} hints that span several lines",
            Stage::OptionResponse => "Turn [[ ... ]] into a dropdown <optionresponse>",
            Stage::MultipleChoice => "Turn (x) lines into a <multiplechoiceresponse>",
            Stage::Checkbox => "Turn [x] lines into a <choiceresponse>",
            Stage::Answers => "Turn =, or= and not= lines into numerical or text input",
            Stage::Explanations => "Convert [explanation] and [code] sections",
            Stage::Paragraphs => "Wrap remaining bare lines in <p>",
            Stage::Whitespace => "Collapse triple newlines",
            Stage::DemandHintAssembly => "Add the block's demand hints to the document",
            Stage::HoistResponse => "Move a lone response's siblings inside it",
            Stage::Cleanup => "Drop leftover class='qtitle' attributes",
        }
    }

    /// The function implementing this stage
    pub fn transform(self) -> StageFn {
        match self {
            Stage::NormalizeLineEndings => |text, _| stages::normalize_line_endings(text),
            Stage::Headers => |text, _| stages::convert_headers(text),
            Stage::Labels => |text, _| stages::convert_labels(text),
            Stage::DemandHints => stages::extract_demand_hints,
            Stage::FoldHints => |text, _| stages::fold_extended_hints(text),
            Stage::OptionResponse => |text, _| choices::convert_option_responses(text),
            Stage::MultipleChoice => |text, _| choices::convert_multiple_choice(text),
            Stage::Checkbox => |text, _| choices::convert_checkboxes(text),
            Stage::Answers => answers::convert_answers,
            Stage::Explanations => |text, _| stages::convert_explanations(text),
            Stage::Paragraphs => |text, _| stages::wrap_paragraphs(text),
            Stage::Whitespace => |text, _| stages::collapse_blank_lines(text),
            Stage::DemandHintAssembly => stages::assemble_demand_hints,
            Stage::HoistResponse => hoist::hoist_single_response,
            Stage::Cleanup => |text, _| stages::final_cleanup(text),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Stage {
    type Err = FormatError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Stage::ALL
            .into_iter()
            .find(|stage| stage.name() == name)
            .ok_or_else(|| FormatError::UnknownStage(name.to_string()))
    }
}

/// Something worth reporting that did not stop the conversion
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Diagnostic {
    /// The block could not be parsed as XML and was left as the stages produced it
    MalformedBlock { block: usize, message: String },
    /// The block's only response is nested in other markup and was left where it is
    NestedResponse { block: usize, response: String },
    /// An `or=` line that a numerical response cannot express
    DroppedAlternative { block: usize, line: String },
}

impl Diagnostic {
    /// The error strict conversions raise for this diagnostic, if any
    pub fn to_error(&self) -> Option<FormatError> {
        match self {
            Diagnostic::MalformedBlock { block, message } => Some(FormatError::MalformedBlock {
                block: *block,
                message: message.clone(),
            }),
            Diagnostic::NestedResponse { block, response } => Some(FormatError::NestedResponse {
                block: *block,
                response: response.clone(),
            }),
            Diagnostic::DroppedAlternative { .. } => None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::MalformedBlock { block, message } => {
                write!(f, "block {}: not well-formed XML, left unchanged ({message})", block + 1)
            }
            Diagnostic::NestedResponse { block, response } => write!(
                f,
                "block {}: <{response}> is nested inside other markup, left unchanged",
                block + 1
            ),
            Diagnostic::DroppedAlternative { block, line } => {
                write!(f, "block {}: dropped non-numeric alternative '{line}'", block + 1)
            }
        }
    }
}

/// State shared by the stages during one conversion
#[derive(Debug, Default)]
pub struct StageContext {
    /// Zero-based index of the block being rewritten
    pub block: usize,
    /// Demand hints found in the current block, not yet assembled
    pub block_hints: Vec<String>,
    /// Demand hints of the whole document, in order
    pub demand_hints: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
}

impl StageContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset per-block state before the next block runs
    pub fn start_block(&mut self, block: usize) {
        self.block = block;
        self.block_hints.clear();
    }
}

/// Run every stage over one block
///
/// `observer` sees each stage together with the text before and after it.
pub fn run_block<F>(block: &str, ctx: &mut StageContext, mut observer: F) -> String
where
    F: FnMut(Stage, &str, &str),
{
    let mut text = block.to_string();
    for stage in Stage::ALL {
        let before = text.clone();
        text = (stage.transform())(text, ctx);
        if before != text {
            debug!(block = ctx.block + 1, stage = stage.name(), "stage rewrote block");
        }
        observer(stage, &before, &text);
    }
    text
}

/// Text of a block after one stage
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageRecord {
    pub stage: Stage,
    pub output: String,
    pub changed: bool,
}

/// Every stage's output for one block
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockTrace {
    /// Zero-based block index
    pub index: usize,
    pub source: String,
    pub stages: Vec<StageRecord>,
}

/// Result of a traced conversion
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Conversion {
    pub olx: String,
    pub blocks: Vec<BlockTrace>,
    pub demand_hints: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
}

/// What [`Conversion::render_stages`] shows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraceOptions {
    /// Also list stages that left the block as it was
    pub include_unchanged: bool,
    /// Only show this stage
    pub stage: Option<Stage>,
}

impl Conversion {
    /// The first diagnostic that strict conversions treat as an error
    pub fn first_error(&self) -> Option<FormatError> {
        self.diagnostics.iter().find_map(Diagnostic::to_error)
    }

    /// Plain-text report of what each stage did to each block
    pub fn render_stages(&self, options: &TraceOptions) -> String {
        let mut out = String::new();

        for block in &self.blocks {
            out.push_str(&format!("=== block {} ===\n", block.index + 1));
            for record in &block.stages {
                let selected = match options.stage {
                    Some(stage) => stage == record.stage,
                    None => record.changed || options.include_unchanged,
                };
                if !selected {
                    continue;
                }

                if record.changed {
                    out.push_str(&format!("--- {} ---\n", record.stage));
                    out.push_str(&record.output);
                    if !record.output.ends_with('\n') {
                        out.push('\n');
                    }
                } else {
                    out.push_str(&format!("--- {} (unchanged) ---\n", record.stage));
                }
            }
        }

        if !self.diagnostics.is_empty() {
            out.push_str("=== diagnostics ===\n");
            for diagnostic in &self.diagnostics {
                out.push_str(&format!("- {diagnostic}\n"));
            }
        }

        out
    }
}
