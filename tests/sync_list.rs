use memo_rs::prelude::*;
use pretty_assertions::assert_eq;

#[test]
fn calibration_file_round_trip() {
    let source = "\
first song:0.25
second song:-0.5
broken line without separator
third song:oops
";
    let table = OffsetTable::parse(source);
    assert_eq!(table.len(), 2);
    assert_eq!(table.get("first song"), 0.25);
    assert_eq!(table.get("second song"), -0.5);
    assert_eq!(table.get("third song"), 0.0);

    // adjust one entry, leaving the junk lines untouched
    let updated = OffsetTable::update_source(source, "second song", 0.125).expect("changed");
    assert_eq!(
        updated,
        "\
first song:0.25
second song:0.125
broken line without separator
third song:oops
"
    );
    let reparsed = OffsetTable::parse(&updated);
    assert_eq!(reparsed.get("second song"), 0.125);

    // writing the identical value reports nothing to persist
    assert_eq!(
        OffsetTable::update_source(&updated, "second song", 0.125),
        None
    );
}

#[test]
fn new_songs_are_appended() {
    let updated = OffsetTable::update_source("first:1\n", "brand new", -0.25).expect("changed");
    assert_eq!(updated, "first:1\nbrand new:-0.25\n");
}

#[test]
fn offsets_feed_the_music_bar() {
    let source = "\
t=120
①口口口|①|
口口口口
口口口口
口口口口
";
    let ChartOutput { chart, .. } = parse_chart(source).expect("valid chart");

    let mut table = OffsetTable::new();
    table.set("some song", 29.0 / 60.0);
    let bar = MusicBar::build(&chart, 60.0, table.get("some song"));
    assert_eq!(bar.assignments()[0].bucket, Some(0));

    // an unknown song falls back to zero calibration
    let bar = MusicBar::build(&chart, 60.0, table.get("another song"));
    assert_eq!(bar.assignments()[0].bucket, None);
}
