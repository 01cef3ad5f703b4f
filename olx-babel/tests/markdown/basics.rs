//! Headers, labels, demand hints, explanations and code

use insta::assert_snapshot;
use olx_babel::convert;

#[test]
fn test_empty_input() {
    assert_eq!(convert(""), "<problem>\n\n</problem>");
}

#[test]
fn test_simple_text() {
    assert_snapshot!(convert("Simple text"), @r"
    <problem>
    <p>Simple text</p>
    </problem>
    ");
}

#[test]
fn test_header() {
    assert_snapshot!(convert("Header Text\n==========="), @r#"
    <problem>
    <h3 class="hd hd-2 problem-header">Header Text</h3>
    </problem>
    "#);
}

#[test]
fn test_windows_line_endings() {
    let result = convert("Question\r\n===========\r\n= 42");
    assert!(result.contains("<h3 class=\"hd hd-2 problem-header\">Question</h3>"));
    assert!(result.contains("<numericalresponse answer=\"42\">"));
    assert!(!result.contains('\r'));
}

#[test]
fn test_label() {
    let result = convert(">>Question Label<<");
    assert!(result.contains("<label>Question Label</label>"));
    assert!(!result.contains("<description>"));
}

#[test]
fn test_label_with_description() {
    let result = convert(">>Question Label||Description text<<");
    assert!(result.contains("<label>Question Label</label>\n<description>Description text</description>"));
}

#[test]
fn test_label_and_description_move_into_response() {
    assert_snapshot!(convert(">>Q||D<<\n= 5"), @r#"
    <problem>
    <numericalresponse answer="5">
      <label>Q</label>
    <description>D</description>
    <formulaequationinput/>
    </numericalresponse>
    </problem>
    "#);
}

#[test]
fn test_demand_hint() {
    let result = convert("|| This is a hint ||");
    assert!(result.contains("<demandhint>\n  <hint>This is a hint</hint>\n</demandhint>"));
}

#[test]
fn test_several_demand_hints() {
    let result = convert("|| First hint ||\n|| Second hint ||");
    assert!(result.contains("<hint>First hint</hint>\n  <hint>Second hint</hint>"));
}

#[test]
fn test_blank_demand_hints() {
    assert_snapshot!(convert("|| ||\n|| ||"), @r"
    <problem>

    <demandhint>
      <hint></hint>
      <hint></hint>
    </demandhint>
    </problem>
    ");
}

#[test]
fn test_explanation() {
    let result = convert("[explanation]\nThis is an explanation\n[/explanation]");
    assert!(result.contains(
        "<solution>\n<div class=\"detailed-solution\">\n<p>Explanation</p>\n\n<p>This is an explanation</p>\n\n</div>\n</solution>"
    ));
}

#[test]
fn test_code_block() {
    let result = convert("[code]\nfunction test() {\n  return true;\n}\n[/code]");
    assert!(result.contains("<pre><code>function test() {\n  return true;\n}\n</code></pre>"));
}

#[test]
fn test_code_is_not_wrapped() {
    let result = convert("[code]\nThis should not be wrapped\n[/code]");
    assert!(!result.contains("<p>This should not be wrapped</p>"));
}

#[test]
fn test_qtitle_class_is_removed() {
    let result = convert("<p class='qtitle'>Title</p>");
    assert_eq!(result, "<problem>\n<p>Title</p>\n</problem>");
}
