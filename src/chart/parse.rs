//! Token stream driver: tokens into a compiled [`Chart`].
//!
//! A measure block is a maximal run of grid row tokens. Directives and
//! foreign lines end the current block; blank lines never reach this stage
//! and thus never end one. Blocks compile in order, each starting where the
//! previous one left off on the timeline.

use super::{
    ChartError, ChartErrorWithRange, ChartOutput, ChartWarning, ChartWarningWithRange,
    lex::{self, Token},
    measure::Measure,
    model::Chart,
    span::SpannedExt,
};

/// Compiles a chart source into a [`Chart`] plus warnings. The span of a
/// measure-level error or warning covers the whole measure block.
pub(super) fn parse(source: &str) -> Result<ChartOutput, ChartErrorWithRange> {
    let lex::LexOutput {
        tokens,
        mut warnings,
    } = lex::parse(source)?;

    let mut chart = Chart::new();
    let mut level_seen = false;
    let mut measure_index = 0;
    let mut start_offset = 0.0;
    // the open measure block and the byte span it covers so far
    let mut block: Option<(Measure, std::ops::Range<usize>)> = None;

    for token in tokens {
        let span = token.as_span();
        match token.into_content() {
            Token::Bpm(bpm) => {
                flush(&mut block, &mut chart, &mut warnings, &mut start_offset)?;
                chart.push_bpm(bpm);
            }
            Token::Level(level) => {
                flush(&mut block, &mut chart, &mut warnings, &mut start_offset)?;
                if !level_seen {
                    chart.set_level(level);
                    level_seen = true;
                }
            }
            Token::GridRow { glyphs, timing } => {
                let (measure, block_span) = block.get_or_insert_with(|| {
                    let measure = Measure::new(measure_index, start_offset);
                    measure_index += 1;
                    (measure, span.clone())
                });
                measure.push_row(glyphs, timing);
                block_span.end = span.end;
            }
            Token::Foreign => {
                flush(&mut block, &mut chart, &mut warnings, &mut start_offset)?;
            }
        }
    }
    flush(&mut block, &mut chart, &mut warnings, &mut start_offset)?;

    // Holds whose release marker never arrived keep an unset release time;
    // the player treats them as released instantly.
    let end = source.len()..source.len();
    let dangling: Vec<_> = chart
        .unreleased_holds()
        .map(|note| {
            ChartWarning::DanglingHold {
                row: note.pos().row(),
                col: note.pos().col(),
                measure: note.measure(),
            }
            .into_spanned(end.clone())
        })
        .collect();
    warnings.extend(dangling);

    Ok(ChartOutput { chart, warnings })
}

/// Compiles and drains the open measure block, if any.
fn flush(
    block: &mut Option<(Measure, std::ops::Range<usize>)>,
    chart: &mut Chart,
    warnings: &mut Vec<ChartWarningWithRange>,
    start_offset: &mut f64,
) -> Result<(), ChartErrorWithRange> {
    let Some((measure, span)) = block.take() else {
        return Ok(());
    };
    let index = measure.index();
    let Some(bpm) = chart.current_bpm() else {
        return Err(ChartError::MissingBpm { measure: index }.into_spanned(span));
    };
    let compiled = measure
        .compile(bpm)
        .map_err(|error| error.into_spanned(span.clone()))?;
    for (glyph, pos) in compiled.unmatched {
        warnings.push(
            ChartWarning::UnmatchedDirection {
                glyph,
                row: pos.row(),
                col: pos.col(),
                measure: index,
            }
            .into_spanned(span.clone()),
        );
    }
    for note in compiled.notes {
        chart.add_note(note);
    }
    *start_offset = compiled.next_offset;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{grid::GridPos, note::Note, parse_chart};

    fn pos(row: u8, col: u8) -> GridPos {
        GridPos::new(row, col).unwrap()
    }

    #[test]
    fn single_measure_chart() {
        let ChartOutput { chart, warnings } = parse_chart(
            "t=120\n\
             lev5.5\n\
             ①口口口|①②③④|\n\
             口②口口\n\
             口口③口\n\
             口口口④\n",
        )
        .expect("valid chart");

        assert_eq!(warnings, vec![]);
        assert_eq!(chart.level(), 5.5);
        assert_eq!(chart.note_count(), 4);
        let notes: Vec<&Note> = chart.all_notes().collect();
        assert_eq!(notes[0].pos(), pos(0, 0));
        assert_eq!(notes[0].time(), 0.0);
        assert_eq!(notes[3].pos(), pos(3, 3));
        assert_eq!(notes[3].time(), 0.375);
    }

    #[test]
    fn blank_lines_do_not_split_a_measure() {
        let with_blanks = parse_chart(
            "bpm120\n①口口口|①②③④|\n\n口口口口\n\n口口口口\n口口口口\n",
        )
        .expect("valid chart");
        let without = parse_chart(
            "bpm120\n①口口口|①②③④|\n口口口口\n口口口口\n口口口口\n",
        )
        .expect("valid chart");
        assert_eq!(with_blanks.chart, without.chart);
    }

    #[test]
    fn foreign_line_ends_the_measure_block() {
        // two 4-row blocks split by a title line; the second measure starts
        // where the first stopped on the timeline
        let ChartOutput { chart, warnings } = parse_chart(
            "t=120\n\
             ①口口口|①②|\n\
             口口口口\n\
             口口口口\n\
             口口口口\n\
             some title here\n\
             ①口口口|①②|\n\
             口口口口\n\
             口口口口\n\
             口口口口\n",
        )
        .expect("valid chart");

        assert_eq!(warnings.len(), 1);
        assert!(matches!(
            warnings[0].content(),
            ChartWarning::ForeignLine { .. }
        ));
        let times: Vec<f64> = chart.all_notes().map(Note::time).collect();
        assert_eq!(times, vec![0.0, 0.25]);
        let measures: Vec<usize> = chart.all_notes().map(Note::measure).collect();
        assert_eq!(measures, vec![0, 1]);
    }

    #[test]
    fn bpm_change_between_measures() {
        let ChartOutput { chart, .. } = parse_chart(
            "t=120\n\
             ①口口口|①②|\n\
             口口口口\n\
             口口口口\n\
             口口口口\n\
             t=60\n\
             ①口口口|①②|\n\
             口口口口\n\
             口口口口\n\
             口口口口\n",
        )
        .expect("valid chart");

        assert_eq!(chart.bpm_list(), &[120.0, 60.0]);
        assert_eq!(chart.bpm_display(), "60-120");
        let times: Vec<f64> = chart.all_notes().map(Note::time).collect();
        // second measure runs at 60 BPM: step 0.25 s, starting at 0.25
        assert_eq!(times, vec![0.0, 0.25]);
    }

    #[test]
    fn only_the_first_level_wins() {
        let ChartOutput { chart, .. } =
            parse_chart("lev3\nlev9\nt=120\n").expect("valid chart");
        assert_eq!(chart.level(), 3.0);
    }

    #[test]
    fn level_defaults_to_one() {
        let ChartOutput { chart, .. } = parse_chart("t=120\n").expect("valid chart");
        assert_eq!(chart.level(), 1.0);
    }

    #[test]
    fn measure_before_bpm_is_fatal() {
        let err = parse_chart("①口口口|①②③④|\n口口口口\n口口口口\n口口口口\n")
            .expect_err("no timing base");
        assert_eq!(err.content(), &ChartError::MissingBpm { measure: 0 });
        assert_eq!(err.as_span().start, 0);
    }

    #[test]
    fn hold_release_pairs_across_measures() {
        let ChartOutput { chart, warnings } = parse_chart(
            "t=120\n\
             ①口口口|①②|\n\
             ^口口口\n\
             口口口口\n\
             口口口口\n\
             end\n\
             ①口口口|①②|\n\
             口口口口\n\
             口口口口\n\
             口口口口\n",
        )
        .expect("valid chart");

        // the second measure's tap on (0,0) becomes the hold's release
        assert_eq!(chart.note_count(), 1);
        let notes: Vec<&Note> = chart.all_notes().collect();
        assert!(notes[0].is_hold());
        assert_eq!(notes[0].time(), 0.0);
        assert_eq!(notes[0].release_time(), Some(0.25));
        // only the foreign `end` line warns
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn unmatched_direction_glyph_warns_with_block_span() {
        let source = "t=120\n∨口口口|①|\n口口口口\n口口口口\n口口口口\n";
        let ChartOutput { chart, warnings } = parse_chart(source).expect("valid chart");

        assert_eq!(chart.note_count(), 0);
        assert_eq!(warnings.len(), 1);
        assert_eq!(
            warnings[0].content(),
            &ChartWarning::UnmatchedDirection {
                glyph: '∨',
                row: 0,
                col: 0,
                measure: 0,
            }
        );
        // span covers the whole 4-row block
        assert_eq!(warnings[0].as_span().start, 6);
        assert_eq!(warnings[0].as_span().end, source.len() - 1);
    }

    #[test]
    fn never_released_hold_warns_at_end() {
        let ChartOutput { chart, warnings } = parse_chart(
            "t=120\n\
             ①口口口|①②|\n\
             ^口口口\n\
             口口口口\n\
             口口口口\n",
        )
        .expect("valid chart");

        assert!(chart.is_hold());
        assert_eq!(warnings.len(), 1);
        assert_eq!(
            warnings[0].content(),
            &ChartWarning::DanglingHold {
                row: 0,
                col: 0,
                measure: 0,
            }
        );
    }

    #[test]
    fn incomplete_grid_is_fatal() {
        let err =
            parse_chart("t=120\n①口口口|①②③④|\n口口口口\n").expect_err("grid is short");
        assert_eq!(
            err.content(),
            &ChartError::IncompleteGrid {
                measure: 0,
                rows: 2
            }
        );
    }
}
