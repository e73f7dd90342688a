//! Timeline bar-bucketing: the 120-column "music bar" histogram.
//!
//! The song select screen sketches a chart as a 120-column bar graph of
//! note density over the song, and the in-game bar repaints each column as
//! its notes are judged. Buckets are song-timeline positions, so building
//! the histogram needs the song length and the per-song calibration offset
//! alongside the chart itself.

use crate::chart::Chart;

/// How many buckets the music bar has.
pub const MUSIC_BAR_BUCKETS: usize = 120;

/// Where the chart's zero sits on the song timeline, in seconds, before
/// calibration.
const BASE_SHIFT: f64 = 29.0 / 60.0;

/// Which music bar buckets one note lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BarAssignment {
    /// The bucket of the note's start, when it lands inside the song.
    pub bucket: Option<usize>,
    /// The bucket of a hold note's release, when resolved and in range.
    pub release_bucket: Option<usize>,
}

/// The 120-bucket note density histogram of a chart over a song.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MusicBar {
    counts: [u32; MUSIC_BAR_BUCKETS],
    assignments: Vec<BarAssignment>,
}

impl MusicBar {
    /// Buckets every note of `chart` over a song of `song_len` seconds.
    ///
    /// `calibration` is the per-song sync offset in seconds (see
    /// [`crate::sync::OffsetTable`]); positive values push the chart later
    /// on the timeline. Events falling outside the song are skipped rather
    /// than counted. A non-positive `song_len` yields an empty histogram.
    #[must_use]
    pub fn build(chart: &Chart, song_len: f64, calibration: f64) -> Self {
        let mut counts = [0; MUSIC_BAR_BUCKETS];
        let mut assignments = Vec::with_capacity(chart.note_count());
        if song_len <= 0.0 {
            assignments.resize(
                chart.note_count(),
                BarAssignment {
                    bucket: None,
                    release_bucket: None,
                },
            );
            return Self {
                counts,
                assignments,
            };
        }

        let shift = BASE_SHIFT - calibration;
        let divide = song_len / MUSIC_BAR_BUCKETS as f64;
        for note in chart.all_notes() {
            let bucket = bucket_of(note.time(), shift, divide);
            if let Some(bucket) = bucket {
                counts[bucket] += 1;
            }
            let release_bucket = note
                .release_time()
                .and_then(|release| bucket_of(release, shift, divide));
            if let Some(bucket) = release_bucket {
                counts[bucket] += 1;
            }
            assignments.push(BarAssignment {
                bucket,
                release_bucket,
            });
        }
        Self {
            counts,
            assignments,
        }
    }

    /// The note density histogram, one count per bucket.
    #[must_use]
    pub const fn counts(&self) -> &[u32; MUSIC_BAR_BUCKETS] {
        &self.counts
    }

    /// Bucket assignments in [`Chart::all_notes`] order.
    #[must_use]
    pub fn assignments(&self) -> &[BarAssignment] {
        &self.assignments
    }
}

fn bucket_of(time: f64, shift: f64, divide: f64) -> Option<usize> {
    let bucket = ((time - shift) / divide).floor();
    (bucket >= 0.0 && bucket < MUSIC_BAR_BUCKETS as f64).then(|| bucket as usize)
}
