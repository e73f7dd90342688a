//! Line tokenizer of the memo chart format.
//!
//! Every source line is cleaned (trailing `//` comment stripped, whitespace
//! trimmed, inner spaces removed) and classified into a [`Token`]. Blank
//! lines vanish entirely; they never end a measure block. A line that
//! matches no grammar but still carries chart glyphs is rejected as a fatal
//! [`ChartError::MalformedLine`], while a genuinely foreign line (a header
//! the game does not know, say) only ends the current measure block.

use super::{
    ChartError, ChartErrorWithRange, ChartWarning, ChartWarningWithRange,
    span::{Spanned, SpannedExt},
};

/// A classified chart source line.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Token {
    /// A BPM directive (`bpm140`, `t=140`). Repeatable; order matters.
    Bpm(f64),
    /// A level directive (`lev9.2`). Only the first one is honored.
    Level(f64),
    /// One grid row of a measure: 4 position glyphs and an optional
    /// timing code taken from between the `|` delimiters.
    GridRow {
        /// The 4 position glyphs, left to right.
        glyphs: [char; 4],
        /// The timing code characters, when the row carried any.
        timing: Option<String>,
    },
    /// A non-blank line that matches no grammar and carries no chart
    /// glyphs. Ends any open measure block, otherwise ignored.
    Foreign,
}

/// A [`Token`] together with the byte span of its source line.
pub type TokenWithRange = Spanned<Token>;

/// Tokenize results, including tokens and non-fatal warnings.
#[derive(Debug, Clone, PartialEq)]
pub struct LexOutput {
    /// The classified lines, blank lines dropped.
    pub tokens: Vec<TokenWithRange>,
    /// Foreign-line warnings noticed while tokenizing.
    pub warnings: Vec<ChartWarningWithRange>,
}

/// Whether `c` belongs to the grid row glyph alphabet.
///
/// Besides the blank cell (`口`/`□`) and the timing reference glyphs
/// (`①`-`⑳`, `Ａ`-`Ｚ`), the alphabet contains the hold direction glyphs and
/// a few box-drawing glyphs charts use to sketch hold bars visually.
#[must_use]
pub const fn is_position_glyph(c: char) -> bool {
    matches!(c,
        '口' | '□'
            | '①'..='⑳'
            | 'Ａ'..='Ｚ'
            | '┼' | '｜' | '┃' | '━' | '―'
            | '∧' | '∨' | '^' | '>' | '＞' | '<' | '＜')
}

/// Analyzes and converts the chart source text into a [`Token`] list.
///
/// # Errors
///
/// Returns [`ChartError::MalformedLine`] for a glyph-bearing line that fails
/// the grid row grammar, spanned to the offending line.
pub fn parse(source: &str) -> Result<LexOutput, ChartErrorWithRange> {
    let mut tokens = Vec::new();
    let mut warnings = Vec::new();

    let mut offset = 0;
    for raw in source.split_inclusive('\n') {
        let start = offset;
        offset += raw.len();
        let line = raw.strip_suffix('\n').unwrap_or(raw);
        let line = line.strip_suffix('\r').unwrap_or(line);
        let span = start..start + line.len();

        let cleaned = clean_line(line);
        if cleaned.is_empty() {
            continue;
        }

        if has_prefix_ignore_ascii_case(&cleaned, "bpm") || has_prefix_ignore_ascii_case(&cleaned, "t=")
        {
            if let Some(value) = scan_decimal(&cleaned) {
                tokens.push(Token::Bpm(value).into_spanned(span));
                continue;
            }
        } else if has_prefix_ignore_ascii_case(&cleaned, "lev") {
            if let Some(value) = scan_decimal(&cleaned) {
                tokens.push(Token::Level(value).into_spanned(span));
                continue;
            }
        }

        match classify_grid_row(&cleaned) {
            GridRowMatch::Row { glyphs, timing } => {
                tokens.push(Token::GridRow { glyphs, timing }.into_spanned(span));
            }
            GridRowMatch::Malformed => {
                return Err(ChartError::MalformedLine { line: cleaned }.into_spanned(span));
            }
            GridRowMatch::NotARow => {
                // Full-line comments are legal filler; anything else gets
                // flagged so chart authors can spot typos.
                if !cleaned.starts_with("//") {
                    warnings
                        .push(ChartWarning::ForeignLine { line: cleaned }.into_spanned(span.clone()));
                }
                tokens.push(Token::Foreign.into_spanned(span));
            }
        }
    }

    Ok(LexOutput { tokens, warnings })
}

enum GridRowMatch {
    Row {
        glyphs: [char; 4],
        timing: Option<String>,
    },
    Malformed,
    NotARow,
}

fn classify_grid_row(cleaned: &str) -> GridRowMatch {
    let chars: Vec<char> = cleaned.chars().collect();
    let glyph_prefix = chars.len() >= 4 && chars.iter().take(4).copied().all(is_position_glyph);
    if !glyph_prefix {
        // Not even a 4-glyph prefix: fatal only if the line still smells
        // like chart text.
        let chart_like = chars.iter().any(|&c| is_position_glyph(c) || c == '|');
        return if chart_like {
            GridRowMatch::Malformed
        } else {
            GridRowMatch::NotARow
        };
    }

    let mut glyphs = ['口'; 4];
    for (slot, &c) in glyphs.iter_mut().zip(chars.iter()) {
        *slot = c;
    }

    let rest: String = chars.iter().skip(4).collect();
    if rest.is_empty() {
        return GridRowMatch::Row {
            glyphs,
            timing: None,
        };
    }
    // A timing suffix is `|` plus at least one character; the code itself is
    // whatever sits before the next `|`, so a trailing delimiter is fine.
    match rest.strip_prefix('|') {
        Some(tail) if !tail.is_empty() => {
            let timing = tail.split('|').next().unwrap_or("").to_owned();
            GridRowMatch::Row {
                glyphs,
                timing: Some(timing),
            }
        }
        _ => GridRowMatch::Malformed,
    }
}

/// Strips a trailing `//` comment, trims the ends, and removes inner spaces.
/// A line that *starts* with `//` is kept as-is; only trailing comments are
/// stripped, matching the established format behavior.
fn clean_line(line: &str) -> String {
    let stripped = match line.find("//") {
        Some(index) if index > 0 => &line[..index],
        _ => line,
    };
    stripped.trim().chars().filter(|&c| c != ' ').collect()
}

fn has_prefix_ignore_ascii_case(text: &str, prefix: &str) -> bool {
    text.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

/// Finds the first signed decimal number embedded anywhere in `text`.
fn scan_decimal(text: &str) -> Option<f64> {
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i].is_ascii_digit() {
            let mut start = i;
            if start > 0 && bytes[start - 1] == b'-' {
                start -= 1;
            }
            let mut end = i;
            while end < bytes.len() && bytes[end].is_ascii_digit() {
                end += 1;
            }
            if end + 1 < bytes.len() && bytes[end] == b'.' && bytes[end + 1].is_ascii_digit() {
                end += 1;
                while end < bytes.len() && bytes[end].is_ascii_digit() {
                    end += 1;
                }
            }
            return text.get(start..end)?.parse().ok();
        }
        i += 1;
    }
    None
}
