//! Prelude module for the memo-rs crate.
//!
//! This module re-exports the public types for convenient access. You can
//! use `use memo_rs::prelude::*;` to import everything at once.

#[cfg(feature = "diagnostics")]
pub use crate::diagnostics::{
    SimpleSource, ToAriadne, collect_chart_reports, emit_chart_warnings,
};

pub use crate::{
    chart::{
        Chart, ChartError, ChartErrorWithRange, ChartOutput, ChartWarning, ChartWarningWithRange,
        Difficulty,
        fin_f64::FinF64,
        grid::{AxisMap, CellMap, GRID_CELLS, GRID_SIDE, GridPos, Rotation},
        lex::{LexOutput, Token, TokenWithRange, is_position_glyph},
        measure::{CompiledMeasure, Direction, Measure},
        note::Note,
        parse_chart,
        span::{Spanned, SpannedExt},
    },
    rng::{Rng, RngMock},
    score::{
        JudgeTiming, Judgement, ScoreBoard,
        music_bar::{BarAssignment, MUSIC_BAR_BUCKETS, MusicBar},
    },
    sync::OffsetTable,
};

#[cfg(feature = "rand")]
pub use crate::rng::RandRng;
