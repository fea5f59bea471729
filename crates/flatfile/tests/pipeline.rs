//! End-to-end pipeline scenarios.
//!
//! Exercises the full path through the core on realistic inputs:
//! 1. Raw bytes are segmented and decoded with encoding recovery
//! 2. Decoded lines pass through the structural filter
//! 3. Surviving lines parse into typed records against a schema
//!
//! Also pins the cross-module invariants: loss-free segmentation,
//! reload idempotence, and filter output ordering.

use flatfile::{
    classify, filter, load_lines, read_fields, split_lines, CodePage, FieldSpec, FieldType,
    FieldValue, LineFilter, ParseOptions, Verdict, REPLACEMENT,
};

fn text_lines(bytes: &[u8]) -> Vec<String> {
    load_lines(bytes, None, true)
        .lines
        .into_iter()
        .map(|line| line.text)
        .collect()
}

// ── Concrete scenarios ─────────────────────────────────────────

#[test]
fn utf8_csv_happy_path() {
    let bytes = b"Hi,1\n";
    let lines = text_lines(bytes);
    assert_eq!(lines, vec!["Hi,1"]);

    let schema = vec![
        FieldSpec::new("g", FieldType::Text).with_max_length(8),
        FieldSpec::new("n", FieldType::Integer),
    ];
    let parsed = read_fields(
        &lines,
        &schema,
        &ParseOptions::new().with_separators([","]),
    )
    .unwrap();

    assert!(parsed.is_success);
    assert!(parsed.error_lines.is_empty());
    assert_eq!(parsed.records.len(), 1);
    assert_eq!(parsed.records[0].get(0), Some(&FieldValue::Text("Hi".into())));
    assert_eq!(parsed.records[0].get(1), Some(&FieldValue::Integer(1)));
}

#[test]
fn latin1_fallback() {
    let bytes = b"Caf\xE9\n";

    let classification = classify(&bytes[..4], None);
    assert_eq!(classification.verdict, Verdict::Confirmed);
    assert_eq!(classification.detected, Some(CodePage::LATIN_1));

    let loaded = load_lines(bytes, None, true);
    assert_eq!(loaded.lines[0].text, "Café");
    assert_eq!(loaded.encoding, CodePage::LATIN_1);
}

#[test]
fn mixed_encodings_retry_stabilizes() {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"id;name\n");
    bytes.extend_from_slice(b"1;Caf\xE9\n");
    bytes.extend_from_slice("2;Grüße\n".as_bytes());

    let loaded = load_lines(&bytes, None, true);
    // The winning pass decodes every line under one code page, with no
    // lossy markers left anywhere.
    assert_eq!(loaded.encoding, CodePage::LATIN_1);
    assert!(loaded
        .lines
        .iter()
        .all(|line| line.code_page == loaded.encoding));
    assert!(loaded
        .lines
        .iter()
        .all(|line| !line.text.contains(REPLACEMENT)));
    assert_eq!(loaded.lines[1].text, "1;Café");
}

#[test]
fn filter_window_between_sentinels() {
    let lines: Vec<String> = ["HDR", "a", "b", "TRL", "c"]
        .iter()
        .map(|s| (*s).to_string())
        .collect();
    let out = filter(
        &lines,
        &LineFilter::new()
            .with_start_sentinel("HDR")
            .with_end_sentinel("TRL"),
    );
    assert_eq!(out.lines, vec!["a", "b"]);
    assert!(out.is_success);
    assert_eq!(out.skipped, 0);
}

#[test]
fn stop_at_first_error_returns_partial_records() {
    let lines: Vec<String> = ["1", "x", "3"].iter().map(|s| (*s).to_string()).collect();
    let schema = vec![FieldSpec::new("n", FieldType::Integer)];
    let parsed = read_fields(
        &lines,
        &schema,
        &ParseOptions::new().with_stop_at_first_error(true),
    )
    .unwrap();

    assert!(!parsed.is_success);
    assert_eq!(parsed.records.len(), 1);
    assert_eq!(parsed.records[0].get(0), Some(&FieldValue::Integer(1)));
    assert_eq!(parsed.error_lines, vec![1]);
}

#[test]
fn fixed_width_schema_without_separators() {
    let lines = vec!["ABCDEFG".to_string()];
    let schema = vec![
        FieldSpec::new("t", FieldType::Text).with_max_length(3),
        FieldSpec::new("u", FieldType::Text).with_max_length(4),
    ];
    let parsed = read_fields(&lines, &schema, &ParseOptions::new()).unwrap();
    assert!(parsed.is_success);
    assert_eq!(parsed.records[0].get(0), Some(&FieldValue::Text("ABC".into())));
    assert_eq!(parsed.records[0].get(1), Some(&FieldValue::Text("DEFG".into())));
}

// ── Cross-module invariants ────────────────────────────────────

#[test]
fn segmentation_is_lossless_for_lf_buffers() {
    let bytes = b"alpha\nbeta\r\ngamma\rdelta\nlast";
    let lines = split_lines(bytes);
    assert_eq!(
        lines,
        vec![&b"alpha"[..], b"beta", b"gamma\rdelta", b"last"]
    );
}

#[test]
fn reload_with_detected_encoding_is_idempotent() {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"plain\n");
    bytes.extend_from_slice(b"Caf\xE9\n");
    bytes.extend_from_slice("Grüße\n".as_bytes());

    let first = load_lines(&bytes, None, true);
    let second = load_lines(&bytes, Some(first.encoding), false);

    let first_texts: Vec<&str> = first.lines.iter().map(|l| l.text.as_str()).collect();
    let second_texts: Vec<&str> = second.lines.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(first_texts, second_texts);
    assert_eq!(first.encoding, second.encoding);
}

#[test]
fn confirmed_classification_redecodes_without_loss() {
    for bytes in [&b"plain ascii line"[..], b"Caf\xE9 au lait", b"\x93Caf\xE9\x94"] {
        let classification = classify(bytes, None);
        assert_eq!(classification.verdict, Verdict::Confirmed);
        let detected = classification.detected.expect("confirmed implies detected");
        let decoded = flatfile::decode(bytes, detected);
        assert!(
            !decoded.contains(REPLACEMENT),
            "confirmed detection must decode {bytes:?} cleanly"
        );
    }
}

#[test]
fn filter_output_is_subsequence_of_window() {
    let lines: Vec<String> = ["r1", "", "r2", "noise", "r3"]
        .iter()
        .map(|s| (*s).to_string())
        .collect();
    let out = filter(&lines, &LineFilter::new().with_required_prefix("r"));
    assert_eq!(out.lines, vec!["r1", "r2", "r3"]);
    assert!(!out.is_success); // "noise" failed the prefix
    assert_eq!(out.skipped, 2); // the blank line and "noise"
}

#[test]
fn empty_buffer_yields_no_lines_and_ascii_classification() {
    assert!(split_lines(b"").is_empty());
    let classification = classify(b"", None);
    assert_eq!(classification.verdict, Verdict::Confirmed);
    assert_eq!(classification.detected, Some(CodePage::US_ASCII));
    assert!(load_lines(b"", None, true).lines.is_empty());
}

// ── A realistic end-to-end run ─────────────────────────────────

#[test]
fn windows1252_export_parses_into_typed_records() {
    // A 1252-encoded export with header/trailer sentinels, a blank
    // line, smart quotes in the data, and a quoted field containing
    // the separator.
    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"BEGIN\n");
    bytes.extend_from_slice(b"\x93Caf\xE9 Wien\x94,4,12.50,2024-03-01,true\n");
    bytes.extend_from_slice(b"\n");
    bytes.extend_from_slice(b"\x22Bistro, Nord\x22,11,7.25,2024-03-02,0\n");
    bytes.extend_from_slice(b"END\n");

    let loaded = load_lines(&bytes, None, true);
    assert_eq!(loaded.encoding, CodePage::WINDOWS_1252);
    let lines: Vec<String> = loaded.lines.into_iter().map(|l| l.text).collect();

    let window = filter(
        &lines,
        &LineFilter::new()
            .with_start_sentinel("BEGIN")
            .with_end_sentinel("END"),
    );
    assert!(window.is_success);
    assert_eq!(window.lines.len(), 2);
    assert_eq!(window.skipped, 1); // the blank line

    let schema = vec![
        FieldSpec::new("name", FieldType::Text),
        FieldSpec::new("tables", FieldType::Integer),
        FieldSpec::new("price", FieldType::Decimal),
        FieldSpec::new("opened", FieldType::DateTime),
        FieldSpec::new("active", FieldType::Boolean),
    ];
    let parsed = read_fields(
        &window.lines,
        &schema,
        &ParseOptions::new().with_separators([","]).with_quotes(['"']),
    )
    .unwrap();

    assert!(parsed.is_success, "errors: {:?}", parsed.error_lines);
    assert_eq!(
        parsed.records[0].get(0),
        Some(&FieldValue::Text("\u{201C}Café Wien\u{201D}".into()))
    );
    assert_eq!(parsed.records[0].get(1), Some(&FieldValue::Integer(4)));
    assert_eq!(
        parsed.records[1].get(0),
        Some(&FieldValue::Text("Bistro, Nord".into()))
    );
    assert_eq!(parsed.records[1].get(4), Some(&FieldValue::Boolean(false)));
    let price = parsed.records[1].get(2).unwrap();
    assert_eq!(price.to_string(), "7.25");
}
