//! Numerical and text input

use insta::assert_snapshot;
use olx_babel::convert;

#[test]
fn test_numerical() {
    let result = convert("= 100");
    assert!(result.contains("<numericalresponse answer=\"100\">"));
    assert!(result.contains("<formulaequationinput/>"));
}

#[test]
fn test_numerical_tolerance() {
    assert_snapshot!(convert("= 100 +- 5"), @r#"
    <problem>
    <numericalresponse answer="100">
      <responseparam type="tolerance" default="5"/>
      <formulaequationinput/>
    </numericalresponse>
    </problem>
    "#);
}

#[test]
fn test_numerical_range() {
    let result = convert("= [90, 110]");
    assert!(result.contains("<numericalresponse answer=\"[90, 110]\">"));
    assert!(!result.contains("responseparam"));
}

#[test]
fn test_numerical_additional_answer() {
    let result = convert("= 100\nor= 200 {{This is an additional answer}}");
    assert!(result.contains(
        "<additional_answer answer=\"200\"><correcthint>This is an additional answer</correcthint></additional_answer>"
    ));
}

#[test]
fn test_numerical_drops_text_alternatives() {
    let result = convert("= 100\nor= lots\nnot= 7");
    assert!(!result.contains("additional_answer"));
    assert!(!result.contains("stringequalhint"));
}

#[test]
fn test_numerical_correct_hint() {
    let result = convert("= 100 {{Great job!}}");
    assert!(result.contains("<correcthint>Great job!</correcthint>"));
}

#[test]
fn test_string() {
    let result = convert("s= answer {{Hint}}");
    assert!(result.contains("<stringresponse answer=\"answer\" type=\"ci\">"));
    assert!(result.contains("<textline size=\"20\"/>"));
    assert!(result.contains("<correcthint>Hint</correcthint>"));
}

#[test]
fn test_string_regexp() {
    let result = convert("s= |answer.*");
    assert!(result.contains("<stringresponse answer=\"answer.*\" type=\"ci regexp\">"));
}

#[test]
fn test_string_additional_answer() {
    let result = convert("s= answer1\nor= answer2 {{This is an additional answer}}");
    assert!(result.contains("<additional_answer answer=\"answer2\">"));
    assert!(result.contains("<correcthint>This is an additional answer</correcthint>"));
}

#[test]
fn test_string_equal_hint() {
    let result = convert("s= correct\nnot= wrong {{Try again}}");
    assert!(result.contains("<stringequalhint answer=\"wrong\">Try again</stringequalhint>"));
}

#[test]
fn test_question_text_moves_into_string_response() {
    assert_snapshot!(convert("What is the capital of France?\ns= Paris"), @r#"
    <problem>
    <stringresponse answer="Paris" type="ci">
      <p>What is the capital of France?</p>
    <textline size="20"/>
    </stringresponse>
    </problem>
    "#);
}
