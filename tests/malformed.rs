use memo_rs::prelude::*;
use pretty_assertions::assert_eq;

#[test]
fn three_glyph_row_is_fatal() {
    let err = parse_chart("t=120\n口口①\n").expect_err("short row");
    assert_eq!(
        err.content(),
        &ChartError::MalformedLine {
            line: "口口①".to_owned()
        }
    );
    // the span covers the offending line
    assert_eq!(err.as_span(), 6..15);
}

#[test]
fn empty_timing_suffix_is_fatal() {
    let err = parse_chart("t=120\n口口口口|\n").expect_err("bare delimiter");
    assert!(matches!(err.content(), ChartError::MalformedLine { .. }));
}

#[test]
fn grid_before_bpm_is_fatal() {
    let err = parse_chart("①口口口|①②③④|\n口口口口\n口口口口\n口口口口\n")
        .expect_err("no timing base");
    assert_eq!(err.content(), &ChartError::MissingBpm { measure: 0 });
}

#[test]
fn incomplete_grid_group_is_fatal() {
    let err = parse_chart("t=120\n①口口口|①②③④|\n口口口口\n口口口口\n")
        .expect_err("3 of 4 rows");
    assert_eq!(
        err.content(),
        &ChartError::IncompleteGrid {
            measure: 0,
            rows: 3
        }
    );
}

#[test]
fn foreign_lines_warn_but_do_not_fail() {
    let source = "\
Title: some song
Artist: somebody
t=120
口①口口|①|
口口口口
口口口口
口口口口
";
    let ChartOutput { chart, warnings } = parse_chart(source).expect("valid chart");
    assert_eq!(chart.note_count(), 1);
    assert_eq!(warnings.len(), 2);
    assert!(warnings.iter().all(|warning| matches!(
        warning.content(),
        ChartWarning::ForeignLine { .. }
    )));
}

#[test]
fn comments_are_ignored() {
    let source = "\
// full-line comment
t=120 // inline comment
口①口口|①| // trailing comment
口口口口
口口口口
口口口口
";
    let ChartOutput { chart, warnings } = parse_chart(source).expect("valid chart");
    assert_eq!(warnings, vec![]);
    assert_eq!(chart.note_count(), 1);
    assert_eq!(chart.bpm_list(), &[120.0]);
}

#[test]
fn spans_point_into_the_source() {
    let source = "t=120\njunk line\n";
    let ChartOutput { warnings, .. } = parse_chart(source).expect("valid chart");
    assert_eq!(warnings.len(), 1);
    let span = warnings[0].as_span();
    assert_eq!(&source[span], "junk line");
}

#[test]
fn errors_format_for_humans() {
    let err = parse_chart("t=120\n口口①\n").expect_err("short row");
    let message = err.to_string();
    assert!(message.contains("malformed chart line"), "got: {message}");
    assert!(message.contains("bytes"), "got: {message}");
}
