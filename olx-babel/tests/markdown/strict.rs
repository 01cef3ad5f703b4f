//! Lenient versus strict handling of blocks that are not well-formed XML

use olx_babel::pipeline::Diagnostic;
use olx_babel::{convert, convert_with_options, convert_with_trace, try_convert};
use olx_babel::{ConvertOptions, FormatError};

const MALFORMED: &str = "Is 1 < 2?\n(x) yes\n() no";
const NESTED: &str = "<div>\n= 5\n</div>";

#[test]
fn test_malformed_block_is_kept_as_produced() {
    let result = convert(MALFORMED);
    assert!(result.contains("<p>Is 1 < 2?</p>\n<multiplechoiceresponse>"));
}

#[test]
fn test_malformed_block_is_reported() {
    let conversion = convert_with_trace(MALFORMED);
    assert_eq!(conversion.diagnostics.len(), 1);
    assert!(matches!(
        &conversion.diagnostics[0],
        Diagnostic::MalformedBlock { block: 0, .. }
    ));
}

#[test]
fn test_strict_conversion_fails() {
    let err = try_convert(MALFORMED).unwrap_err();
    assert!(matches!(err, FormatError::MalformedBlock { block: 0, .. }));
    assert!(err.to_string().starts_with("Block 1 is not well-formed XML"));
}

#[test]
fn test_strict_failure_names_the_block() {
    let markdown = format!("(x) fine\n() also fine\n---\n{MALFORMED}");
    let err = try_convert(&markdown).unwrap_err();
    assert!(matches!(err, FormatError::MalformedBlock { block: 1, .. }));
}

#[test]
fn test_options_choose_the_behavior() {
    let lenient = convert_with_options(MALFORMED, &ConvertOptions { strict: false });
    assert_eq!(lenient.unwrap(), convert(MALFORMED));

    let strict = convert_with_options(MALFORMED, &ConvertOptions { strict: true });
    assert!(strict.is_err());
}

#[test]
fn test_well_formed_input_passes_strict_mode() {
    let markdown = ">>Pick one<<\n(x) A\n() B";
    assert_eq!(try_convert(markdown).unwrap(), convert(markdown));
}

#[test]
fn test_nested_single_response_is_kept_and_reported() {
    let conversion = convert_with_trace(NESTED);
    assert!(conversion
        .olx
        .contains("<div>\n<numericalresponse answer=\"5\">"));
    assert_eq!(
        conversion.diagnostics,
        vec![Diagnostic::NestedResponse {
            block: 0,
            response: "numericalresponse".to_string(),
        }]
    );
}

#[test]
fn test_nested_single_response_fails_strict_conversion() {
    let err = try_convert(NESTED).unwrap_err();
    assert_eq!(
        err,
        FormatError::NestedResponse {
            block: 0,
            response: "numericalresponse".to_string(),
        }
    );
    assert_eq!(
        err.to_string(),
        "Block 1 has its only <numericalresponse> nested inside other markup"
    );
}
