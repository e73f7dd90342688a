//! Measure compiler: grid glyph rows and timing codes into absolute-time
//! notes.
//!
//! A measure owns a run of grid rows (grouped by 4 into full panel
//! snapshots) and the timing codes collected from those rows. Compiling
//! walks the timing codes to build a character-to-time map, resolves hold
//! direction glyphs against it, then emits a note for every remaining timed
//! cell.

use std::collections::{BTreeMap, HashMap};

use itertools::Either;

use super::{
    ChartError,
    grid::{GRID_CELLS, GRID_SIDE, GridPos},
    note::Note,
};

/// Which way a hold direction glyph points, i.e. where its note cell is
/// searched for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// `^` or `∧`: the note cell is above the glyph.
    Up,
    /// `∨` or `Ｖ`: the note cell is below the glyph.
    Down,
    /// `>` or `＞`: the note cell is to the right of the glyph.
    Right,
    /// `<` or `＜`: the note cell is to the left of the glyph.
    Left,
}

impl Direction {
    /// Classifies a hold direction glyph.
    #[must_use]
    pub const fn from_glyph(c: char) -> Option<Self> {
        match c {
            '^' | '∧' => Some(Self::Up),
            '∨' | 'Ｖ' => Some(Self::Down),
            '>' | '＞' => Some(Self::Right),
            '<' | '＜' => Some(Self::Left),
            _ => None,
        }
    }

    /// The cells to probe for the note paired with a glyph at
    /// (`row`, `col`), nearest first, stopping at the grid edge.
    fn ray(self, row: usize, col: usize) -> impl Iterator<Item = (usize, usize)> {
        let side = GRID_SIDE as usize;
        match self {
            Self::Up => Either::Left(Either::Left((0..row).rev().map(move |r| (r, col)))),
            Self::Down => Either::Left(Either::Right((row + 1..side).map(move |r| (r, col)))),
            Self::Right => Either::Right(Either::Left((col + 1..side).map(move |c| (row, c)))),
            Self::Left => Either::Right(Either::Right((0..col).rev().map(move |c| (row, c)))),
        }
    }
}

/// One measure of a chart, before timing resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct Measure {
    index: usize,
    start_offset: f64,
    grid_rows: Vec<[char; 4]>,
    timing_rows: Vec<String>,
}

/// Everything a compiled measure hands back to the parse driver.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledMeasure {
    /// The measure's notes, bucketed per start cell and flattened in cell
    /// index order; within a cell, sorted by start time.
    pub notes: Vec<Note>,
    /// The absolute time where the next measure begins.
    pub next_offset: f64,
    /// Direction glyphs that found nothing to pair with, for warnings.
    pub unmatched: Vec<(char, GridPos)>,
}

impl Measure {
    /// Creates an empty measure starting at `start_offset` seconds.
    #[must_use]
    pub const fn new(index: usize, start_offset: f64) -> Self {
        Self {
            index,
            start_offset,
            grid_rows: Vec::new(),
            timing_rows: Vec::new(),
        }
    }

    /// The measure index, counted from 0.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Appends one grid row; a timing code may ride along with it.
    pub fn push_row(&mut self, glyphs: [char; 4], timing: Option<String>) {
        self.grid_rows.push(glyphs);
        if let Some(timing) = timing {
            self.timing_rows.push(timing);
        }
    }

    /// Resolves the measure into absolute-time notes under `bpm`.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::IncompleteGrid`] when the grid rows do not
    /// group into full 4-row panel snapshots.
    pub fn compile(self, bpm: f64) -> Result<CompiledMeasure, ChartError> {
        // Character-to-time map. Each timing code character owns one
        // subdivision; the running offset carries across timing rows and
        // becomes the start of the next measure. Duplicate characters keep
        // the latest occurrence.
        let mut timing_map = HashMap::new();
        let mut offset = self.start_offset;
        for timing in &self.timing_rows {
            let len = timing.chars().count().max(4);
            let step = 60.0 / (bpm * len as f64);
            for c in timing.chars() {
                timing_map.insert(c, offset);
                offset += step;
            }
        }

        let mut buckets: BTreeMap<usize, Vec<Note>> = BTreeMap::new();
        let mut unmatched = Vec::new();

        let mut groups = self.grid_rows.chunks_exact(4);
        for group in groups.by_ref() {
            compile_group(self.index, group, &timing_map, &mut buckets, &mut unmatched);
        }
        let leftover = groups.remainder();
        if !leftover.is_empty() {
            return Err(ChartError::IncompleteGrid {
                measure: self.index,
                rows: leftover.len(),
            });
        }

        Ok(CompiledMeasure {
            notes: buckets.into_values().flatten().collect(),
            next_offset: offset,
            unmatched,
        })
    }
}

/// Resolves one 4-row panel snapshot.
fn compile_group(
    measure: usize,
    group: &[[char; 4]],
    timing_map: &HashMap<char, f64>,
    buckets: &mut BTreeMap<usize, Vec<Note>>,
    unmatched: &mut Vec<(char, GridPos)>,
) {
    let side = GRID_SIDE as usize;
    let mut claimed = [false; GRID_CELLS];

    // Direction glyphs resolve first so their note cells are claimed before
    // the plain scan runs.
    for (row, glyph_row) in group.iter().enumerate() {
        for (col, &glyph) in glyph_row.iter().enumerate() {
            let Some(direction) = Direction::from_glyph(glyph) else {
                continue;
            };
            let bar_pos = grid_pos(row, col);
            let target = direction.ray(row, col).find_map(|(r, c)| {
                if claimed[r * side + c] {
                    return None;
                }
                timing_map.get(&group[r][c]).map(|&time| (r, c, time))
            });
            match target {
                Some((r, c, time)) => {
                    claimed[r * side + c] = true;
                    push_sorted(buckets, Note::hold(measure, grid_pos(r, c), bar_pos, time));
                }
                None => unmatched.push((glyph, bar_pos)),
            }
        }
    }

    // Every unclaimed cell whose glyph has a timing entry is a tap note.
    for (row, glyph_row) in group.iter().enumerate() {
        for (col, glyph) in glyph_row.iter().enumerate() {
            if claimed[row * side + col] {
                continue;
            }
            if let Some(&time) = timing_map.get(glyph) {
                push_sorted(buckets, Note::tap(measure, grid_pos(row, col), time));
            }
        }
    }
}

/// Inserts a note into its start cell's bucket, keeping the bucket sorted by
/// start time; equal times keep insertion order.
fn push_sorted(buckets: &mut BTreeMap<usize, Vec<Note>>, note: Note) {
    let bucket = buckets.entry(note.pos().index()).or_default();
    let at = bucket
        .iter()
        .position(|other| other.time() > note.time())
        .unwrap_or(bucket.len());
    bucket.insert(at, note);
}

fn grid_pos(row: usize, col: usize) -> GridPos {
    // Rows and columns come from iterating 4-element arrays, so they are in
    // bounds; fall back to the origin to keep this panic-free.
    GridPos::new(row as u8, col as u8).unwrap_or(GridPos::MIN)
}
