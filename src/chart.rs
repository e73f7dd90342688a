//! Chart compiler of the memo text format.
//!
//! Raw chart text == [`lex`] ==> line tokens == [`parse`] ==> [`Chart`]
//!
//! Compilation is a pure batch computation over the whole source. A fatal
//! error ([`ChartError`]) aborts the compile with no partial chart; tolerated
//! oddities are collected as [`ChartWarning`]s alongside the result, so a
//! frontend can surface them without failing the song.

pub mod fin_f64;
pub mod grid;
pub mod lex;
pub mod measure;
pub mod model;
pub mod note;
pub mod parse;
pub mod span;

use thiserror::Error;

pub use self::model::Chart;
use self::span::Spanned;

/// The difficulty slots a song can offer, one chart source file each.
///
/// The conventional file name of a chart is `{file_stem}.txt` inside the
/// song's directory; locating and reading that file is the caller's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Difficulty {
    /// The easiest chart of a song.
    Basic,
    /// The middle chart of a song.
    Advanced,
    /// The hardest chart of a song.
    Extreme,
}

impl Difficulty {
    /// All difficulties, in ascending order.
    pub const ALL: [Self; 3] = [Self::Basic, Self::Advanced, Self::Extreme];

    /// The lowercased file stem of this difficulty's chart source.
    #[must_use]
    pub const fn file_stem(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Advanced => "advanced",
            Self::Extreme => "extreme",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Basic => "Basic",
            Self::Advanced => "Advanced",
            Self::Extreme => "Extreme",
        };
        write!(f, "{name}")
    }
}

/// A fatal error of chart compilation. The whole chart is discarded.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChartError {
    /// The line carries position glyphs but does not match the grid row
    /// grammar (exactly 4 glyphs, then an optional `|timing|` suffix).
    #[error("malformed chart line: `{line}`")]
    MalformedLine {
        /// The offending line, after comment stripping.
        line: String,
    },
    /// A grid group of a measure ended with fewer than 4 rows.
    #[error("measure {measure} has an incomplete grid group of {rows} rows")]
    IncompleteGrid {
        /// The measure the group belongs to, counted from 0.
        measure: usize,
        /// How many rows the trailing group actually had.
        rows: usize,
    },
    /// A measure was reached before any BPM directive, so there is no
    /// timing base to compile it against.
    #[error("measure {measure} reached before any bpm directive")]
    MissingBpm {
        /// The measure that could not be compiled, counted from 0.
        measure: usize,
    },
}

/// A tolerated oddity noticed during chart compilation.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChartWarning {
    /// A direction glyph scanned to the grid edge without finding an
    /// unclaimed timed cell to pair with. The hold note is skipped.
    #[error(
        "direction glyph `{glyph}` at row {row}, column {col} of measure {measure} pairs with nothing"
    )]
    UnmatchedDirection {
        /// The direction glyph itself.
        glyph: char,
        /// Grid row of the glyph.
        row: u8,
        /// Grid column of the glyph.
        col: u8,
        /// The measure the glyph appeared in, counted from 0.
        measure: usize,
    },
    /// A non-blank line matched no grammar and carries no chart glyphs.
    /// It ends any open measure block and is otherwise ignored.
    #[error("ignored non-chart line: `{line}`")]
    ForeignLine {
        /// The ignored line, after comment stripping.
        line: String,
    },
    /// A hold note was still waiting for its release marker when the chart
    /// ended. Its release time stays unset.
    #[error("hold note at row {row}, column {col} of measure {measure} is never released")]
    DanglingHold {
        /// Grid row of the hold's start cell.
        row: u8,
        /// Grid column of the hold's start cell.
        col: u8,
        /// The measure the hold started in, counted from 0.
        measure: usize,
    },
}

/// A [`ChartError`] together with its byte span in the source.
pub type ChartErrorWithRange = Spanned<ChartError>;
/// A [`ChartWarning`] together with its byte span in the source.
pub type ChartWarningWithRange = Spanned<ChartWarning>;

/// Output of compiling a chart source.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChartOutput {
    /// The compiled chart.
    pub chart: Chart,
    /// Warnings that occurred during compilation.
    pub warnings: Vec<ChartWarningWithRange>,
}

/// Compiles a chart source text into a [`Chart`].
///
/// ```
/// use memo_rs::chart::{ChartOutput, parse_chart};
///
/// let source = "bpm180\n①①口口|①②|\n口口口口\n口口口口\n口口口口\n";
/// let ChartOutput { chart, .. } = parse_chart(source).expect("valid chart");
/// assert_eq!(chart.note_count(), 2);
/// assert_eq!(chart.bpm_display(), "180");
/// ```
///
/// # Errors
///
/// Returns a spanned [`ChartError`] when the source contains a malformed
/// glyph line, an incomplete grid group, or a measure before any BPM
/// directive. No partial chart is produced.
pub fn parse_chart(source: &str) -> Result<ChartOutput, ChartErrorWithRange> {
    parse::parse(source)
}
