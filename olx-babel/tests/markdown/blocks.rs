//! Documents with several `---` separated blocks, and stage traces

use insta::assert_snapshot;
use olx_babel::pipeline::{Stage, TraceOptions};
use olx_babel::{convert, convert_with_trace};

#[test]
fn test_each_block_gets_its_own_response() {
    let markdown = "Question 1
==========
= 42

---

Question 2
==========
s= hello";

    let result = convert(markdown);
    assert!(result.contains("<numericalresponse answer=\"42\">"));
    assert!(result.contains("<stringresponse answer=\"hello\""));
    assert!(result.contains("</numericalresponse>\n\n<stringresponse"));
}

#[test]
fn test_demand_hints_from_all_blocks_are_collected_at_the_end() {
    assert_snapshot!(convert("Q1\n|| h1 ||\n---\nQ2\n|| h2 ||"), @r"
    <problem>
    <p>Q1</p>


    <p>Q2</p>

    <demandhint>
      <hint>h1</hint>
      <hint>h2</hint>
    </demandhint>
    </problem>
    ");
}

#[test]
fn test_blank_blocks_are_skipped() {
    assert_eq!(
        convert("  \n---\none\n---\ntwo\n---\n  "),
        "<problem>\n<p>one</p>\n\n<p>two</p>\n</problem>"
    );
}

#[test]
fn test_trace_records_every_stage_in_order() {
    let conversion = convert_with_trace("(x) A\n() B\n---\nplain");
    assert_eq!(conversion.blocks.len(), 2);

    for block in &conversion.blocks {
        let stages: Vec<Stage> = block.stages.iter().map(|record| record.stage).collect();
        assert_eq!(stages, Stage::ALL.to_vec());
    }

    let last = conversion.blocks[1].stages.last().unwrap();
    assert_eq!(last.output, "<p>plain</p>");
    assert_eq!(conversion.olx, convert("(x) A\n() B\n---\nplain"));
}

#[test]
fn test_trace_report_shows_changing_stages() {
    let conversion = convert_with_trace("plain");
    let report = conversion.render_stages(&TraceOptions::default());
    assert_snapshot!(report, @r"
    === block 1 ===
    --- paragraphs ---
    <p>plain</p>
    ");
}

#[test]
fn test_trace_serializes_to_json() {
    let conversion = convert_with_trace("= 5");
    let json = serde_json::to_value(&conversion).unwrap();
    assert_eq!(json["blocks"][0]["stages"][8]["stage"], "answers");
    assert_eq!(json["blocks"][0]["stages"][8]["changed"], true);
}
