//! Dropdown, single select and multi-select

use insta::assert_snapshot;
use olx_babel::convert;

#[test]
fn test_single_line_option_response() {
    assert_snapshot!(convert("[[Apple, Banana, (Orange)]]"), @r#"
    <problem>
    <optionresponse>
      <optioninput options="('Apple','Banana','Orange')" correct="Orange"/>
    </optionresponse>
    </problem>
    "#);
}

#[test]
fn test_multi_line_option_response() {
    let result = convert("[[Apple\nBanana\n(Orange)]]");
    assert!(result.contains("<optionresponse>"));
    assert!(result.contains("<option correct=\"False\">Apple</option>"));
    assert!(result.contains("<option correct=\"False\">Banana</option>"));
    assert!(result.contains("<option correct=\"True\">Orange</option>"));
}

#[test]
fn test_option_hint() {
    let result = convert("[[Apple {{label::This is a hint}}\nBanana\n(Orange)]]");
    assert!(result.contains("<optionhint label=\"label\">This is a hint</optionhint>"));
}

#[test]
fn test_multiple_choice() {
    assert_snapshot!(convert("(x) Correct Answer\n() Wrong Answer"), @r#"
    <problem>
    <multiplechoiceresponse>
      <choicegroup type="MultipleChoice">
        <choice correct="true">Correct Answer</choice>
        <choice correct="false">Wrong Answer</choice>
      </choicegroup>
    </multiplechoiceresponse>
    </problem>
    "#);
}

#[test]
fn test_multiple_choice_shuffle() {
    let result = convert("(x!) Correct Answer\n() Wrong Answer");
    assert!(result.contains("<choicegroup type=\"MultipleChoice\" shuffle=\"true\">"));
}

#[test]
fn test_multiple_choice_fixed() {
    let result = convert("(x@) Correct Answer\n() Wrong Answer");
    assert!(result.contains("<choice correct=\"true\" fixed=\"true\">Correct Answer</choice>"));
}

#[test]
fn test_multiple_choice_hint() {
    let result = convert("(x) Correct Answer {{label::Hint text}}\n() Wrong Answer");
    assert!(result.contains("<choicehint label=\"label\">Hint text</choicehint>"));
}

#[test]
fn test_multiline_hint_is_folded() {
    let result = convert("(x) Right {{ This hint\n   spans lines }}\n() Wrong");
    assert!(result.contains("<choicehint>This hint spans lines</choicehint>"));
}

#[test]
fn test_checkboxes() {
    let result = convert("[x] Correct Option\n[] Wrong Option");
    assert!(result.contains("<choiceresponse>"));
    assert!(result.contains("<checkboxgroup>"));
    assert!(result.contains("<choice correct=\"true\">Correct Option</choice>"));
    assert!(result.contains("<choice correct=\"false\">Wrong Option</choice>"));
}

#[test]
fn test_checkbox_selection_hints() {
    let result = convert("[x] Option {{selected: Good choice}}");
    assert!(result.contains("<choicehint selected=\"true\">Good choice</choicehint>"));

    let result = convert("[x] Option {{unselected: Bad choice}}");
    assert!(result.contains("<choicehint selected=\"false\">Bad choice</choicehint>"));
}

#[test]
fn test_compound_hint() {
    let result = convert("{{ ((A*B)) This is a compound hint }}");
    assert!(result.contains("<compoundhint value=\"A*B\">This is a compound hint</compoundhint>"));
}

#[test]
fn test_complete_problem() {
    let markdown = "Problem Title
==============
>>What is the capital of France?||Choose the correct answer<<

(x) Paris {{Correct! Paris is indeed the capital of France.}}
() London {{No, London is the capital of the United Kingdom.}}
() Berlin {{No, Berlin is the capital of Germany.}}
() Madrid {{No, Madrid is the capital of Spain.}}

[explanation]
Paris is the capital and most populous city of France.
[/explanation]

|| Need a hint? Think about the Eiffel Tower! ||";

    let result = convert(markdown);
    assert!(result.contains("<h3 class=\"hd hd-2 problem-header\">Problem Title</h3>"));
    assert!(result.contains("<label>What is the capital of France?</label>"));
    assert!(result.contains("<description>Choose the correct answer</description>"));
    assert!(result.contains("<choicegroup type=\"MultipleChoice\">"));
    assert!(result.contains(
        "<choice correct=\"true\">Paris <choicehint>Correct! Paris is indeed the capital of France.</choicehint>\n</choice>"
    ));
    assert!(result.contains("<solution>"));
    assert!(result.contains("<hint>Need a hint? Think about the Eiffel Tower!</hint>"));

    // everything ended up inside the response
    assert!(result.starts_with("<problem>\n<multiplechoiceresponse>"));
    assert!(result.contains("</multiplechoiceresponse>\n<demandhint>"));
}
