use std::num::NonZeroU32;

use memo_rs::prelude::*;
use pretty_assertions::assert_eq;

fn board(notes: u32) -> ScoreBoard {
    ScoreBoard::new(NonZeroU32::new(notes).unwrap())
}

#[test]
fn perfect_play_reaches_a_million() {
    let mut board = board(100);
    for _ in 0..100 {
        board.record(Judgement::Perfect, JudgeTiming::Late, None);
    }
    assert_eq!(board.score(), 900_000);
    assert_eq!(board.shutter_point(), 1024);
    assert_eq!(board.shutter_score(), 100_000);
    assert_eq!(board.total_score(), 1_000_000);
    assert_eq!(board.combo(), 100);
}

#[test]
fn mixed_session_arithmetic() {
    // 10-note chart: 6 perfect, 2 great, 1 good, 1 miss
    let mut board = board(10);
    for _ in 0..6 {
        board.record(Judgement::Perfect, JudgeTiming::Early, None);
    }
    for _ in 0..2 {
        board.record(Judgement::Great, JudgeTiming::Late, None);
    }
    board.record(Judgement::Good, JudgeTiming::Early, None);
    board.record(Judgement::Miss, JudgeTiming::Late, None);

    // 90000 * (60 + 14 + 4 + 1) / 10 = 711000
    assert_eq!(board.score(), 711_000);
    assert_eq!(board.judged(Judgement::Perfect), 6);
    assert_eq!(board.tally(Judgement::Perfect, JudgeTiming::Early), 6);
    assert_eq!(board.tally(Judgement::Perfect, JudgeTiming::Late), 0);
    assert_eq!(board.combo(), 0);

    // shutter: unit 10, so +204 per perfect/great with a clamp after every
    // note; the meter saturates at 1024 by the sixth hit, then the miss
    // takes 819 back off
    assert_eq!(board.shutter_point(), 205);
    assert_eq!(board.shutter_score(), 205 * 100_000 / 1024);
}

#[test]
fn combo_survives_good_but_not_miss() {
    let mut board = board(20);
    board.record(Judgement::Perfect, JudgeTiming::Late, None);
    board.record(Judgement::Good, JudgeTiming::Late, None);
    board.record(Judgement::Great, JudgeTiming::Early, None);
    assert_eq!(board.combo(), 3);
    board.record(Judgement::Miss, JudgeTiming::Late, None);
    assert_eq!(board.combo(), 0);
}

#[test]
fn judging_a_parsed_chart_end_to_end() {
    let source = "\
t=120
①口口口|①②③④|
口②口口
口口③口
口口口④
";
    let ChartOutput { chart, .. } = parse_chart(source).expect("valid chart");
    let note_count = NonZeroU32::new(u32::try_from(chart.note_count()).unwrap()).unwrap();

    // place the chart zero at the song start; 0.25 s buckets
    let bar = MusicBar::build(&chart, 30.0, 29.0 / 60.0);
    let mut board = ScoreBoard::new(note_count);
    for assignment in bar.assignments() {
        board.record(Judgement::Perfect, JudgeTiming::Late, assignment.bucket);
    }

    assert_eq!(board.score(), 900_000);
    assert_eq!(board.combo(), 4);
    // notes at 0.0 and 0.125 paint bucket 0, notes at 0.25 and 0.375 bucket 1
    assert_eq!(board.bar_scores()[0], 4);
    assert_eq!(board.bar_scores()[1], 4);
    assert_eq!(board.bar_scores()[2], 0);
    assert_eq!(bar.counts()[0], 2);
    assert_eq!(bar.counts()[1], 2);
}

#[test]
fn music_bar_skips_out_of_song_notes() {
    let source = "\
t=120
①口口口|①|
口口口口
口口口口
口口口口
";
    let ChartOutput { chart, .. } = parse_chart(source).expect("valid chart");
    // zero calibration keeps the base shift, so the note precedes the song
    let bar = MusicBar::build(&chart, 60.0, 0.0);
    assert_eq!(bar.assignments().len(), 1);
    assert_eq!(bar.assignments()[0].bucket, None);
    assert!(bar.counts().iter().all(|&count| count == 0));
}

#[test]
fn reset_starts_a_fresh_session() {
    let mut board = board(5);
    board.record(Judgement::Miss, JudgeTiming::Late, Some(0));
    board.record(Judgement::Perfect, JudgeTiming::Early, Some(1));
    board.reset();
    assert_eq!(board.score(), 0);
    assert_eq!(board.combo(), 0);
    assert_eq!(board.shutter_point(), 0);
    assert!(board.bar_scores().iter().all(|&score| score == 0));
}
