//! The compiled chart aggregate.

use std::collections::{BTreeMap, BTreeSet};

use itertools::Itertools;

use super::{fin_f64::FinF64, note::Note};

/// A compiled chart: the ordered note stream plus its summary data.
///
/// Notes are bucketed per start cell (linear cell index). Aggregation is
/// where hold notes get their release time: the first plain event landing on
/// a cell whose latest note is an unreleased hold is consumed as that hold's
/// release marker instead of being kept as a note of its own. A chart is
/// built once by the parse driver and read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Chart {
    level: f64,
    bpm_list: Vec<f64>,
    buckets: BTreeMap<usize, Vec<Note>>,
    clap_timings: BTreeSet<FinF64>,
    note_count: usize,
    is_hold: bool,
}

impl Chart {
    pub(crate) fn new() -> Self {
        Self {
            level: 1.0,
            bpm_list: Vec::new(),
            buckets: BTreeMap::new(),
            clap_timings: BTreeSet::new(),
            note_count: 0,
            is_hold: false,
        }
    }

    pub(crate) const fn set_level(&mut self, level: f64) {
        self.level = level;
    }

    pub(crate) fn push_bpm(&mut self, bpm: f64) {
        self.bpm_list.push(bpm);
    }

    /// The BPM a measure compiled right now would use: the latest directive.
    pub(crate) fn current_bpm(&self) -> Option<f64> {
        self.bpm_list.last().copied()
    }

    /// Adds a note to its start cell's bucket, or consumes it as the release
    /// marker of that bucket's pending hold. Either way the start time joins
    /// the clap timing set; only a kept note bumps the note count.
    pub(crate) fn add_note(&mut self, note: Note) {
        if note.is_hold() {
            self.is_hold = true;
        }
        let time = note.time();
        let bucket = self.buckets.entry(note.pos().index()).or_default();
        match bucket.last_mut() {
            Some(last) if last.is_hold() && last.release_time().is_none() => {
                last.set_release_time(time);
            }
            _ => {
                bucket.push(note);
                self.note_count += 1;
            }
        }
        if let Some(time) = FinF64::new(time) {
            self.clap_timings.insert(time);
        }
    }

    /// Holds still waiting for a release marker, for end-of-chart warnings.
    pub(crate) fn unreleased_holds(&self) -> impl Iterator<Item = &Note> {
        self.buckets
            .values()
            .flatten()
            .filter(|note| note.is_hold() && note.release_time().is_none())
    }

    /// The chart's difficulty level. Defaults to 1.0 when the source had no
    /// `lev` directive.
    #[must_use]
    pub const fn level(&self) -> f64 {
        self.level
    }

    /// Every BPM directive of the source, in order.
    #[must_use]
    pub fn bpm_list(&self) -> &[f64] {
        &self.bpm_list
    }

    /// The smallest BPM of the chart, when any was declared.
    #[must_use]
    pub fn min_bpm(&self) -> Option<f64> {
        self.bpm_list.iter().copied().reduce(f64::min)
    }

    /// The largest BPM of the chart, when any was declared.
    #[must_use]
    pub fn max_bpm(&self) -> Option<f64> {
        self.bpm_list.iter().copied().reduce(f64::max)
    }

    /// The BPM range for display: a single value when the spread is under
    /// 0.01, otherwise `min-max`.
    #[must_use]
    pub fn bpm_display(&self) -> String {
        let (Some(min), Some(max)) = (self.min_bpm(), self.max_bpm()) else {
            return String::new();
        };
        if (max - min).abs() < 0.01 {
            format!("{min}")
        } else {
            format!("{min}-{max}")
        }
    }

    /// How many notes the chart has. Hold notes count once; release markers
    /// are not notes.
    #[must_use]
    pub const fn note_count(&self) -> usize {
        self.note_count
    }

    /// Whether the chart contains any hold note.
    #[must_use]
    pub const fn is_hold(&self) -> bool {
        self.is_hold
    }

    /// Every distinct note start time, ordered ascending. Auto-play claps
    /// once per entry.
    #[must_use]
    pub const fn clap_timings(&self) -> &BTreeSet<FinF64> {
        &self.clap_timings
    }

    /// Returns the iterator having all of the notes sorted by start time.
    /// Equal times keep cell-bucket order, so the sequence is deterministic.
    pub fn all_notes(&self) -> impl Iterator<Item = &Note> {
        self.buckets
            .values()
            .flatten()
            .sorted_by(|a, b| a.time().total_cmp(&b.time()))
    }

    /// Converts into the notes sorted by start time.
    #[must_use]
    pub fn into_all_notes(self) -> Vec<Note> {
        self.buckets
            .into_values()
            .flatten()
            .sorted_by(|a, b| a.time().total_cmp(&b.time()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::grid::GridPos;

    fn pos(row: u8, col: u8) -> GridPos {
        GridPos::new(row, col).unwrap()
    }

    #[test]
    fn release_marker_closes_pending_hold() {
        let mut chart = Chart::new();
        chart.add_note(Note::hold(0, pos(0, 0), pos(2, 0), 0.5));
        chart.add_note(Note::tap(0, pos(0, 0), 1.5));

        assert_eq!(chart.note_count(), 1);
        let notes: Vec<_> = chart.all_notes().collect();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].release_time(), Some(1.5));
        // both start times still clap
        assert_eq!(chart.clap_timings().len(), 2);
        assert!(chart.is_hold());
    }

    #[test]
    fn other_cells_do_not_release_a_hold() {
        let mut chart = Chart::new();
        chart.add_note(Note::hold(0, pos(0, 0), pos(2, 0), 0.5));
        chart.add_note(Note::tap(0, pos(1, 1), 1.0));

        assert_eq!(chart.note_count(), 2);
        assert_eq!(chart.unreleased_holds().count(), 1);
    }

    #[test]
    fn taps_on_the_same_cell_stack_up() {
        let mut chart = Chart::new();
        chart.add_note(Note::tap(0, pos(3, 3), 0.25));
        chart.add_note(Note::tap(0, pos(3, 3), 0.5));
        chart.add_note(Note::tap(1, pos(3, 3), 0.75));

        assert_eq!(chart.note_count(), 3);
        assert_eq!(chart.all_notes().count(), 3);
        assert!(!chart.is_hold());
    }

    #[test]
    fn clap_timings_deduplicate() {
        let mut chart = Chart::new();
        chart.add_note(Note::tap(0, pos(0, 0), 0.25));
        chart.add_note(Note::tap(0, pos(0, 1), 0.25));
        chart.add_note(Note::tap(0, pos(0, 2), 0.75));

        assert_eq!(chart.note_count(), 3);
        assert_eq!(chart.clap_timings().len(), 2);
    }

    #[test]
    fn note_order_is_by_time_across_cells() {
        let mut chart = Chart::new();
        chart.add_note(Note::tap(0, pos(3, 3), 0.0));
        chart.add_note(Note::tap(0, pos(0, 0), 0.5));
        chart.add_note(Note::tap(0, pos(2, 0), 0.25));

        let times: Vec<f64> = chart.all_notes().map(Note::time).collect();
        assert_eq!(times, vec![0.0, 0.25, 0.5]);
    }

    #[test]
    fn bpm_display_formats_range() {
        let mut chart = Chart::new();
        assert_eq!(chart.bpm_display(), "");
        chart.push_bpm(140.0);
        assert_eq!(chart.bpm_display(), "140");
        chart.push_bpm(185.0);
        assert_eq!(chart.bpm_display(), "140-185");
        assert_eq!(chart.min_bpm(), Some(140.0));
        assert_eq!(chart.max_bpm(), Some(185.0));
    }
}
