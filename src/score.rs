//! Judgement-to-score model: rolling combo, shutter meter, and the score
//! formula.
//!
//! A play session owns one [`ScoreBoard`]. The gameplay loop judges each
//! note against its timing window and feeds the result through
//! [`ScoreBoard::record`]; everything else (score, combo, shutter, the
//! per-bucket bar scores) is derived state readable at any time.

pub mod music_bar;

use std::num::NonZeroU32;

use self::music_bar::MUSIC_BAR_BUCKETS;

/// A judgement rank, best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Judgement {
    /// Hit inside the tightest window.
    Perfect,
    /// Hit slightly off.
    Great,
    /// Hit barely inside the judged window.
    Good,
    /// Missed entirely. Breaks the combo.
    Miss,
}

impl Judgement {
    /// All ranks, best to worst.
    pub const ALL: [Self; 4] = [Self::Perfect, Self::Great, Self::Good, Self::Miss];

    const fn rank(self) -> usize {
        match self {
            Self::Perfect => 0,
            Self::Great => 1,
            Self::Good => 2,
            Self::Miss => 3,
        }
    }

    /// The weight of this rank in the score formula.
    #[must_use]
    pub const fn score_weight(self) -> u64 {
        match self {
            Self::Perfect => 10,
            Self::Great => 7,
            Self::Good => 4,
            Self::Miss => 1,
        }
    }
}

impl std::fmt::Display for Judgement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Perfect => "Perfect",
            Self::Great => "Great",
            Self::Good => "Good",
            Self::Miss => "Miss",
        };
        write!(f, "{name}")
    }
}

/// Which side of the judgement point a hit landed on. Misses conventionally
/// record as [`JudgeTiming::Late`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum JudgeTiming {
    /// The hit came before the judgement point.
    Early,
    /// The hit came at or after the judgement point.
    Late,
}

/// Scoring state of one play session.
///
/// The score formula normalizes by the chart's note count, so a board is
/// built per chart; [`ScoreBoard::new`] takes the count as [`NonZeroU32`]
/// to rule out division by zero by construction.
///
/// ```
/// use std::num::NonZeroU32;
/// use memo_rs::score::{Judgement, JudgeTiming, ScoreBoard};
///
/// let mut board = ScoreBoard::new(NonZeroU32::new(100).unwrap());
/// for _ in 0..100 {
///     board.record(Judgement::Perfect, JudgeTiming::Late, None);
/// }
/// assert_eq!(board.score(), 900_000);
/// assert_eq!(board.shutter_point(), 1024);
/// assert_eq!(board.shutter_score(), 100_000);
/// assert_eq!(board.total_score(), 1_000_000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreBoard {
    note_count: NonZeroU32,
    early: [u32; 4],
    late: [u32; 4],
    combo: u32,
    shutter_point: i32,
    bar_scores: [u32; MUSIC_BAR_BUCKETS],
}

/// The shutter meter is saturated at this many points.
const SHUTTER_MAX: i32 = 1024;

impl ScoreBoard {
    /// Creates a zeroed board for a chart of `note_count` notes.
    #[must_use]
    pub const fn new(note_count: NonZeroU32) -> Self {
        Self {
            note_count,
            early: [0; 4],
            late: [0; 4],
            combo: 0,
            shutter_point: 0,
            bar_scores: [0; MUSIC_BAR_BUCKETS],
        }
    }

    /// Records one judged note.
    ///
    /// `bucket` is the note's music bar bucket from
    /// [`music_bar::MusicBar`]; pass `None` to skip bar score painting.
    pub fn record(&mut self, judgement: Judgement, timing: JudgeTiming, bucket: Option<usize>) {
        let rank = judgement.rank();
        match timing {
            JudgeTiming::Early => self.early[rank] += 1,
            JudgeTiming::Late => self.late[rank] += 1,
        }

        if let Some(bucket) = bucket
            && bucket < MUSIC_BAR_BUCKETS
        {
            self.bar_scores[bucket] += if judgement == Judgement::Perfect { 2 } else { 1 };
        }

        self.combo = if judgement == Judgement::Miss {
            0
        } else {
            self.combo + 1
        };

        // the shutter moves in units of 1/min(1024, n) of its range
        let unit = i64::from(self.note_count.get().min(1024));
        let delta = match judgement {
            Judgement::Perfect | Judgement::Great => 2048 / unit,
            Judgement::Good => 1024 / unit,
            Judgement::Miss => -(8192 / unit),
        };
        self.shutter_point =
            (i64::from(self.shutter_point) + delta).clamp(0, i64::from(SHUTTER_MAX)) as i32;
    }

    /// The base score, `0..=900000`. Integer arithmetic, recomputed from the
    /// tallies: `90000 * (10*P + 7*G + 4*Gd + M) / note_count`.
    #[must_use]
    pub fn score(&self) -> u64 {
        let weighted: u64 = Judgement::ALL
            .iter()
            .map(|&judgement| judgement.score_weight() * u64::from(self.judged(judgement)))
            .sum();
        90_000 * weighted / u64::from(self.note_count.get())
    }

    /// The shutter bonus score, `0..=100000`.
    #[must_use]
    pub fn shutter_score(&self) -> u64 {
        self.shutter_point.max(0) as u64 * 100_000 / SHUTTER_MAX as u64
    }

    /// Base score plus shutter bonus, `0..=1000000`.
    #[must_use]
    pub fn total_score(&self) -> u64 {
        self.score() + self.shutter_score()
    }

    /// The current combo. Resets to 0 on every miss.
    #[must_use]
    pub const fn combo(&self) -> u32 {
        self.combo
    }

    /// The shutter meter position, `0..=1024`.
    #[must_use]
    pub const fn shutter_point(&self) -> i32 {
        self.shutter_point
    }

    /// How many notes were judged `judgement` on the given side.
    #[must_use]
    pub const fn tally(&self, judgement: Judgement, timing: JudgeTiming) -> u32 {
        match timing {
            JudgeTiming::Early => self.early[judgement.rank()],
            JudgeTiming::Late => self.late[judgement.rank()],
        }
    }

    /// How many notes were judged `judgement`, either side.
    #[must_use]
    pub const fn judged(&self, judgement: Judgement) -> u32 {
        self.early[judgement.rank()] + self.late[judgement.rank()]
    }

    /// The live bar score histogram painted by [`ScoreBoard::record`].
    #[must_use]
    pub const fn bar_scores(&self) -> &[u32; MUSIC_BAR_BUCKETS] {
        &self.bar_scores
    }

    /// Zeroes everything for a new session on the same chart.
    pub const fn reset(&mut self) {
        *self = Self::new(self.note_count);
    }
}
