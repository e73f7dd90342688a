//! memo-rs is a compiler and scoring engine for the text chart format used by
//! 4x4 panel ("memo" style) rhythm games.
//!
//! A chart source is a plain text file mixing directive lines (`lev`, `bpm`,
//! `t=`) with measure blocks. A measure block is a run of grid rows, each
//! exactly 4 position glyphs wide, optionally annotated with a timing code:
//!
//! ```text
//! bpm140
//! lev8
//!
//! ①口口口 |①②③④|
//! 口②口口
//! 口口③口
//! 口口口④
//! ```
//!
//! Each timing code character stands for one subdivision of the measure; a
//! position glyph that reuses a timing character places a note at that
//! subdivision's absolute time. Direction glyphs (`∧ ∨ ^ Ｖ > ＞ < ＜`) link
//! two cells of the grid into a hold note.
//!
//! The [`chart`] module compiles a source text into a [`chart::Chart`], an
//! ordered stream of absolute-time [`chart::note::Note`]s. The [`score`]
//! module consumes per-note judgements during play and models combo, the
//! shutter meter, and the final score. Both are pure and blocking: no I/O,
//! no global state, safe to run on any worker thread.
//!
//! ```
//! use memo_rs::prelude::*;
//!
//! let source = "t=120\n①口口口|①②③④|\n口口口口\n口口口口\n口口口口\n";
//! let ChartOutput { chart, warnings } = parse_chart(source).expect("valid chart");
//! assert!(warnings.is_empty());
//! assert_eq!(chart.note_count(), 1);
//! ```

pub mod chart;
#[cfg(feature = "diagnostics")]
pub mod diagnostics;
pub mod prelude;
pub mod rng;
pub mod score;
pub mod sync;

pub use chart::{ChartOutput, parse_chart};
