//! CLI-specific inspect views
//!
//! Each view renders one aspect of a conversion. The converter runs every
//! block through the same stage pipeline, so most views look at the traced
//! [`Conversion`] rather than only the final document.
//!
//! ## Views
//!
//! - `stages`: plain-text report of what each stage did to each block
//! - `stages-json`: the complete trace as JSON (sources, stage outputs, hints, diagnostics)
//! - `response-types`: the response elements found in the converted document
//! - `problem-type`: how an editor would classify the converted problem
//!
//! Example: `olx inspect question.md stages --stage hoist-response`

use olx_babel::pipeline::{Conversion, TraceOptions};
use olx_babel::{classify_problem, convert_with_trace, detect_response_types, FormatError};

/// Views accepted by `olx inspect`, in the order they are listed
pub const AVAILABLE_VIEWS: &[&str] = &["stages", "stages-json", "response-types", "problem-type"];

/// Render a view of the conversion of `source`
///
/// # Arguments
///
/// * `source` - Markdown problem text
/// * `view` - One of [`AVAILABLE_VIEWS`]
/// * `options` - Which stages the `stages` view lists
///
/// # Returns
///
/// The rendered view, or an error if the view is unknown or the converted
/// document cannot be read back.
pub fn execute_view(source: &str, view: &str, options: &TraceOptions) -> Result<String, FormatError> {
    let conversion = convert_with_trace(source);

    match view {
        "stages" => Ok(conversion.render_stages(options)),
        "stages-json" => stages_json(conversion, options),
        "response-types" => {
            let types = detect_response_types(&conversion.olx)?;
            if types.is_empty() {
                return Ok("none\n".to_string());
            }
            Ok(types
                .iter()
                .map(|response| format!("{}\t{}\n", response.tag_name(), response.title()))
                .collect())
        }
        "problem-type" => match classify_problem(&conversion.olx)? {
            Some(problem_type) => Ok(format!("{problem_type}\n")),
            None => Ok("none\n".to_string()),
        },
        other => Err(FormatError::ParseError(format!(
            "Unknown view '{other}'. Available views: {}",
            AVAILABLE_VIEWS.join(", ")
        ))),
    }
}

/// The full trace, or only the selected stage of each block
fn stages_json(mut conversion: Conversion, options: &TraceOptions) -> Result<String, FormatError> {
    if let Some(stage) = options.stage {
        for block in &mut conversion.blocks {
            block.stages.retain(|record| record.stage == stage);
        }
    }

    serde_json::to_string_pretty(&conversion)
        .map(|json| json + "\n")
        .map_err(|e| FormatError::ParseError(format!("JSON serialization failed: {e}")))
}
