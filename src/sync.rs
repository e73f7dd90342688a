//! Per-song calibration offsets, persisted as a `sync.txt`-style text.
//!
//! The file is a plain list of `title:offset` lines, one song each, with
//! the offset in seconds. This module only deals in strings; reading and
//! writing the actual file stays with the caller, and
//! [`OffsetTable::update_source`] rewrites the text surgically so a
//! hand-edited file keeps its layout.

use std::collections::HashMap;

/// The calibration offsets of every known song, keyed by title.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OffsetTable {
    offsets: HashMap<String, f64>,
}

impl OffsetTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a `title:offset` line list.
    ///
    /// Lines without a `:` or with an unparsable offset are skipped; a
    /// title listed twice keeps its last offset. Never fails.
    ///
    /// ```
    /// use memo_rs::sync::OffsetTable;
    ///
    /// let table = OffsetTable::parse("some song:0.12\nanother: -0.5\n");
    /// assert_eq!(table.get("some song"), 0.12);
    /// assert_eq!(table.get("another"), -0.5);
    /// assert_eq!(table.get("unknown"), 0.0);
    /// ```
    #[must_use]
    pub fn parse(source: &str) -> Self {
        let mut offsets = HashMap::new();
        for line in source.lines() {
            let Some((title, value)) = line.split_once(':') else {
                continue;
            };
            if let Ok(offset) = value.trim().parse::<f64>() {
                offsets.insert(title.to_owned(), offset);
            }
        }
        Self { offsets }
    }

    /// The offset of `title` in seconds, 0.0 when unknown.
    #[must_use]
    pub fn get(&self, title: &str) -> f64 {
        self.offsets.get(title).copied().unwrap_or(0.0)
    }

    /// Sets the offset of `title` in seconds.
    pub fn set(&mut self, title: impl Into<String>, offset: f64) {
        self.offsets.insert(title.into(), offset);
    }

    /// Iterates over every `(title, offset)` pair, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.offsets
            .iter()
            .map(|(title, &offset)| (title.as_str(), offset))
    }

    /// How many songs the table knows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Rewrites `source` so that `title` maps to `offset`, returning the
    /// new text.
    ///
    /// The last line whose title matches case-insensitively is replaced in
    /// place; when none matches, a new line is appended. Returns `None`
    /// when the matching line already spells the identical value, so the
    /// caller can skip the file write.
    #[must_use]
    pub fn update_source(source: &str, title: &str, offset: f64) -> Option<String> {
        let prefix = format!("{title}:");
        let mut lines: Vec<String> = source.lines().map(str::to_owned).collect();
        let entry = format!("{title}:{offset}");

        let found = lines.iter_mut().rev().find(|line| {
            line.get(..prefix.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(&prefix))
        });
        match found {
            Some(line) if *line == entry => return None,
            Some(line) => *line = entry,
            None => lines.push(entry),
        }

        let mut updated = lines.join("\n");
        updated.push('\n');
        Some(updated)
    }
}

impl<'a> IntoIterator for &'a OffsetTable {
    type Item = (&'a String, &'a f64);
    type IntoIter = std::collections::hash_map::Iter<'a, String, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.offsets.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_skips_junk_lines() {
        let table = OffsetTable::parse(
            "song a:0.25\n\
             no separator here\n\
             song b:not a number\n\
             song c: -1.5\n",
        );
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("song a"), 0.25);
        assert_eq!(table.get("song b"), 0.0);
        assert_eq!(table.get("song c"), -1.5);
    }

    #[test]
    fn later_entries_win() {
        let table = OffsetTable::parse("dup:1\ndup:2\n");
        assert_eq!(table.get("dup"), 2.0);
    }

    #[test]
    fn set_and_get_round_trip() {
        let mut table = OffsetTable::new();
        assert!(table.is_empty());
        table.set("a song", 0.125);
        assert_eq!(table.get("a song"), 0.125);
        table.set("a song", 0.5);
        assert_eq!(table.get("a song"), 0.5);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn update_replaces_last_match_case_insensitively() {
        let source = "Song:1\nother:2\nSONG:3\n";
        let updated = OffsetTable::update_source(source, "song", 0.5).expect("changed");
        assert_eq!(updated, "Song:1\nother:2\nsong:0.5\n");
    }

    #[test]
    fn update_appends_when_missing() {
        let updated = OffsetTable::update_source("other:2\n", "song", 0.5).expect("changed");
        assert_eq!(updated, "other:2\nsong:0.5\n");
        let updated = OffsetTable::update_source("", "song", 0.5).expect("changed");
        assert_eq!(updated, "song:0.5\n");
    }

    #[test]
    fn update_skips_identical_value() {
        assert_eq!(OffsetTable::update_source("song:0.5\n", "song", 0.5), None);
        // a differently spelled but equal value still rewrites
        let updated = OffsetTable::update_source("song:0.50\n", "song", 0.5).expect("respelled");
        assert_eq!(updated, "song:0.5\n");
    }
}
