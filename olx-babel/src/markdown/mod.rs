//! Markdown shorthand to OLX problem conversion
//!
//!     Authors write problems in a compact shorthand and get back the XML the course runtime
//!     understands. The shorthand is line oriented and deliberately forgiving: anything the
//!     rules do not recognize ends up as paragraph text, so conversion never fails.
//!
//!     The document is split into blocks on `---` lines. Each block runs through the stages in
//!     [`crate::pipeline`] on its own, which is how one problem can hold several questions.
//!     Demand hints (`|| hint ||`) from every block are gathered into a single `<demandhint>`
//!     section at the end:
//!
//!         <problem>
//!         {block 1}
//!
//!         {block 2}
//!         <demandhint>
//!           <hint>...</hint>
//!         </demandhint>
//!         </problem>
//!
//!     The only step that can go wrong is hoisting, which parses the block as XML. A block the
//!     parser rejects is kept as the stages produced it and reported as a diagnostic; strict
//!     conversions turn that diagnostic into an error.

pub mod answers;
pub mod choices;
pub mod hints;
pub mod hoist;
pub mod stages;

use crate::error::FormatError;
use crate::pipeline::{self, BlockTrace, Conversion, StageContext, StageRecord};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

static BLOCK_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*---\s*\n").unwrap());

/// How a conversion treats problems it can recover from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Fail on the first malformed block instead of keeping it as is
    pub strict: bool,
}

/// Split a document into the blocks converted independently, dropping blank ones
pub fn split_blocks(markdown: &str) -> Vec<&str> {
    BLOCK_SEPARATOR
        .split(markdown)
        .filter(|block| !block.trim().is_empty())
        .collect()
}

/// Convert markdown shorthand to an OLX `<problem>` document
///
/// Never fails; see [`try_convert`] for a conversion that rejects malformed blocks.
pub fn convert(markdown: &str) -> String {
    run(markdown, false).olx
}

/// Convert, failing if any block could not be parsed as XML
pub fn try_convert(markdown: &str) -> Result<String, FormatError> {
    convert_with_options(markdown, &ConvertOptions { strict: true })
}

/// Convert, strict or lenient as `options` say
pub fn convert_with_options(markdown: &str, options: &ConvertOptions) -> Result<String, FormatError> {
    let conversion = run(markdown, false);
    if options.strict {
        if let Some(err) = conversion.first_error() {
            return Err(err);
        }
    }
    Ok(conversion.olx)
}

/// Convert and keep every block's text after every stage
pub fn convert_with_trace(markdown: &str) -> Conversion {
    run(markdown, true)
}

fn run(markdown: &str, trace: bool) -> Conversion {
    let blocks = split_blocks(markdown);
    debug!(blocks = blocks.len(), "converting markdown problem");

    let mut ctx = StageContext::new();
    let mut outputs = Vec::with_capacity(blocks.len());
    let mut traces = Vec::new();

    for (index, block) in blocks.into_iter().enumerate() {
        ctx.start_block(index);
        let mut records = Vec::new();
        let output = pipeline::run_block(block, &mut ctx, |stage, before, after| {
            if trace {
                records.push(StageRecord {
                    stage,
                    output: after.to_string(),
                    changed: before != after,
                });
            }
        });
        debug!(block = index + 1, "block converted");

        if trace {
            traces.push(BlockTrace {
                index,
                source: block.to_string(),
                stages: records,
            });
        }
        outputs.push(output);
    }

    let olx = assemble(&outputs, &ctx.demand_hints);
    Conversion {
        olx,
        blocks: traces,
        demand_hints: ctx.demand_hints,
        diagnostics: ctx.diagnostics,
    }
}

/// Wrap converted blocks and the collected demand hints in `<problem>`
fn assemble(blocks: &[String], demand_hints: &[String]) -> String {
    let mut olx = String::from("<problem>\n");
    olx.push_str(&blocks.join("\n\n"));

    if !demand_hints.is_empty() {
        olx.push_str("\n<demandhint>\n");
        for hint in demand_hints {
            olx.push_str(&format!("  <hint>{hint}</hint>\n"));
        }
        olx.push_str("</demandhint>");
    }

    olx.push_str("\n</problem>");
    olx
}
