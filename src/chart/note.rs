//! Playable note events with absolute times.

use crate::rng::Rng;

use super::grid::{AxisMap, CellMap, GridPos, Rotation};

/// One playable event of a chart.
///
/// A tap note occupies a single cell. A hold note additionally carries the
/// cell of its direction glyph (`bar_pos`, where the hold bar tail sits) and,
/// once the terminating event on the same start cell has been aggregated, the
/// absolute release time.
///
/// After compilation a note is immutable; play modes derive transformed
/// copies through [`Note::rotated`], [`Note::remapped`], and
/// [`Note::remapped_axes`], which never touch the timing fields.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Note {
    measure: usize,
    pos: GridPos,
    time: f64,
    bar_pos: Option<GridPos>,
    release_time: Option<f64>,
}

impl Note {
    /// Creates a tap note.
    #[must_use]
    pub const fn tap(measure: usize, pos: GridPos, time: f64) -> Self {
        Self {
            measure,
            pos,
            time,
            bar_pos: None,
            release_time: None,
        }
    }

    /// Creates a hold note whose release time is not resolved yet.
    #[must_use]
    pub const fn hold(measure: usize, pos: GridPos, bar_pos: GridPos, time: f64) -> Self {
        Self {
            measure,
            pos,
            time,
            bar_pos: Some(bar_pos),
            release_time: None,
        }
    }

    /// The measure this note originated from, counted from 0.
    #[must_use]
    pub const fn measure(&self) -> usize {
        self.measure
    }

    /// The cell the note is played at.
    #[must_use]
    pub const fn pos(&self) -> GridPos {
        self.pos
    }

    /// Absolute start time in seconds from the chart's zero.
    #[must_use]
    pub const fn time(&self) -> f64 {
        self.time
    }

    /// The cell of the hold bar tail, when this is a hold note.
    #[must_use]
    pub const fn bar_pos(&self) -> Option<GridPos> {
        self.bar_pos
    }

    /// Absolute release time in seconds, once resolved. Greater than
    /// [`Note::time`] by construction.
    #[must_use]
    pub const fn release_time(&self) -> Option<f64> {
        self.release_time
    }

    /// Whether this is a hold note.
    #[must_use]
    pub const fn is_hold(&self) -> bool {
        self.bar_pos.is_some()
    }

    pub(crate) const fn set_release_time(&mut self, release_time: f64) {
        self.release_time = Some(release_time);
    }

    /// This note with both cells rotated around the panel center. Timing
    /// fields are unchanged.
    #[must_use]
    pub fn rotated(&self, rotation: Rotation) -> Self {
        Self {
            pos: self.pos.rotated(rotation),
            bar_pos: self.bar_pos.map(|bar| bar.rotated(rotation)),
            ..self.clone()
        }
    }

    /// This note with both cells sent through a 16-cell permutation.
    ///
    /// A cell permutation can tear a hold apart so that its two cells share
    /// neither row nor column. Such a shape is unplayable, so the bar cell is
    /// collapsed back onto the start cell's row or column, the axis chosen by
    /// `rng`. Inject [`crate::rng::RngMock`] to pin the choice in tests.
    #[must_use]
    pub fn remapped(&self, map: &CellMap, rng: &mut impl Rng) -> Self {
        let pos = map.apply(self.pos);
        let bar_pos = self.bar_pos.map(|bar| {
            let bar = map.apply(bar);
            if bar.row() != pos.row() && bar.col() != pos.col() {
                if rng.generate(0..=1) == 0 {
                    bar.with_row_of(pos)
                } else {
                    bar.with_col_of(pos)
                }
            } else {
                bar
            }
        });
        Self {
            pos,
            bar_pos,
            ..self.clone()
        }
    }

    /// This note with both cells sent through row/column permutations.
    /// Axis permutations preserve shared rows and columns, so hold shapes
    /// stay valid without any collapse.
    #[must_use]
    pub fn remapped_axes(&self, map: &AxisMap) -> Self {
        Self {
            pos: map.apply(self.pos),
            bar_pos: self.bar_pos.map(|bar| map.apply(bar)),
            ..self.clone()
        }
    }
}
