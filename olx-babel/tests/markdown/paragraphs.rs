//! Property-based tests for text without any shorthand
//!
//! Lines that use no markers must come out as one paragraph each, in order.

use olx_babel::convert;
use proptest::prelude::*;

/// Generate a line of plain words: starts with a letter, no markup characters
fn plain_line_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        // Single word
        "[a-zA-Z]{1,12}",
        // Words with spaces
        "[a-zA-Z][a-zA-Z ]{0,30}",
        // Sentences with punctuation that no rule reacts to
        "[A-Z][a-z ]{0,20}[.?!]",
    ]
}

proptest! {
    #[test]
    fn plain_lines_become_paragraphs(lines in prop::collection::vec(plain_line_strategy(), 1..8)) {
        let markdown = lines.join("\n");
        let expected_body: Vec<String> = lines.iter().map(|line| format!("<p>{line}</p>")).collect();
        let expected = format!("<problem>\n{}\n</problem>", expected_body.join("\n"));

        prop_assert_eq!(convert(&markdown), expected);
    }

    #[test]
    fn output_is_always_one_problem(markdown in "[a-zA-Z0-9 =()\\[\\]{}|<>x!@\\n-]{0,80}") {
        let olx = convert(&markdown);
        prop_assert!(olx.starts_with("<problem>\n"));
        prop_assert!(olx.ends_with("\n</problem>"));
    }
}
