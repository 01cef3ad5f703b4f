//! Response type detection and problem classification on converted documents

use olx_babel::{classify_problem, convert, detect_response_types, FormatError};
use olx_babel::{ProblemType, ResponseType};

#[test]
fn test_each_shorthand_yields_its_response_type() {
    let cases = [
        ("[[a, (b)]]", ResponseType::OptionResponse),
        ("(x) a\n() b", ResponseType::MultipleChoiceResponse),
        ("s= paris", ResponseType::StringResponse),
        ("= 4", ResponseType::NumericalResponse),
        ("[x] a\n[ ] b", ResponseType::ChoiceResponse),
    ];

    for (markdown, expected) in cases {
        let olx = convert(markdown);
        assert_eq!(detect_response_types(&olx).unwrap(), vec![expected], "{markdown}");
        assert_eq!(
            classify_problem(&olx).unwrap(),
            Some(ProblemType::Basic(expected)),
            "{markdown}"
        );
    }
}

#[test]
fn test_several_blocks_make_an_advanced_problem() {
    let olx = convert("= 4\n---\ns= four");
    assert_eq!(
        detect_response_types(&olx).unwrap(),
        vec![ResponseType::NumericalResponse, ResponseType::StringResponse]
    );
    assert_eq!(classify_problem(&olx).unwrap(), Some(ProblemType::Advanced));
}

#[test]
fn test_empty_problem_has_no_type() {
    assert_eq!(classify_problem(&convert("")).unwrap(), None);
}

#[test]
fn test_text_only_problem_is_advanced() {
    assert_eq!(
        classify_problem(&convert("Just reading")).unwrap(),
        Some(ProblemType::Advanced)
    );
}

#[test]
fn test_unparseable_document_is_an_error() {
    let err = classify_problem("<problem><p></problem>").unwrap_err();
    assert!(matches!(err, FormatError::ParseError(_)));
}

#[test]
fn test_problem_type_display() {
    assert_eq!(
        ProblemType::Basic(ResponseType::ChoiceResponse).to_string(),
        "Multi-select (choiceresponse)"
    );
    assert_eq!(ProblemType::Advanced.to_string(), "Advanced");
}
