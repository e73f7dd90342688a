//! Fancy diagnostics support using `ariadne`.
//!
//! Chart errors and warnings carry byte spans into the source text
//! ([`crate::chart::span::Spanned`]); this module turns them into
//! `ariadne::Report`s so a frontend can print them with row/column context
//! without any conversion code of its own.
//!
//! # Usage Example
//!
//! ```rust
//! use memo_rs::{chart::parse_chart, diagnostics::emit_chart_warnings};
//!
//! let source = "t=120\nsome stray header\n①口口口|①②③④|\n口口口口\n口口口口\n口口口口\n";
//! let output = parse_chart(source).expect("valid chart");
//!
//! emit_chart_warnings("extreme.txt", source, &output.warnings);
//! ```

use ariadne::{Color, Label, Report, ReportKind, Source};

use crate::chart::{ChartErrorWithRange, ChartWarningWithRange};

/// Simple source container that holds the filename and source text.
/// Ariadne will automatically handle row/column calculations from byte
/// offsets.
pub struct SimpleSource<'a> {
    /// Name of the source file.
    name: &'a str,
    /// Source text content.
    text: &'a str,
}

impl<'a> SimpleSource<'a> {
    /// Create a new source container instance.
    #[must_use]
    pub const fn new(name: &'a str, text: &'a str) -> Self {
        Self { name, text }
    }

    /// Get source text content.
    #[must_use]
    pub const fn text(&self) -> &'a str {
        self.text
    }

    /// Get source file name.
    #[must_use]
    pub const fn name(&self) -> &'a str {
        self.name
    }
}

/// Trait for converting positioned errors to `ariadne::Report`.
pub trait ToAriadne {
    /// Convert error to ariadne Report.
    fn to_report<'a>(&self, src: &SimpleSource<'a>)
    -> Report<'a, (String, std::ops::Range<usize>)>;
}

/// Helper to build a styled ariadne `Report` consistently.
#[must_use]
pub fn build_report<'a>(
    src: &SimpleSource<'a>,
    kind: ReportKind<'a>,
    range: std::ops::Range<usize>,
    title: &str,
    label_message: impl ToString,
    color: Color,
) -> Report<'a, (String, std::ops::Range<usize>)> {
    let filename = src.name().to_string();
    Report::build(kind, (filename.clone(), range.clone()))
        .with_message(title)
        .with_label(
            Label::new((filename, range))
                .with_message(label_message.to_string())
                .with_color(color),
        )
        .finish()
}

impl ToAriadne for ChartErrorWithRange {
    fn to_report<'a>(
        &self,
        src: &SimpleSource<'a>,
    ) -> Report<'a, (String, std::ops::Range<usize>)> {
        build_report(
            src,
            ReportKind::Error,
            self.as_span(),
            "chart error",
            self.content(),
            Color::Red,
        )
    }
}

impl ToAriadne for ChartWarningWithRange {
    fn to_report<'a>(
        &self,
        src: &SimpleSource<'a>,
    ) -> Report<'a, (String, std::ops::Range<usize>)> {
        build_report(
            src,
            ReportKind::Warning,
            self.as_span(),
            "chart warning",
            self.content(),
            Color::Yellow,
        )
    }
}

/// Convenience method: batch render a chart warning list to the terminal.
///
/// Ariadne will automatically handle row/column calculations from the
/// byte ranges the warnings carry.
pub fn emit_chart_warnings<'a>(
    name: &'a str,
    source: &'a str,
    warnings: impl IntoIterator<Item = &'a ChartWarningWithRange>,
) {
    let simple = SimpleSource::new(name, source);
    let ariadne_source = Source::from(source);
    for warning in warnings {
        let report = warning.to_report(&simple);
        let _ = report.print((name.to_string(), ariadne_source.clone()));
    }
}

/// Collect `ariadne::Report` instances for a warning list without printing.
///
/// This is useful in tests to verify diagnostics can be generated while
/// keeping test output clean.
#[must_use]
pub fn collect_chart_reports<'a>(
    name: &'a str,
    source: &'a str,
    warnings: impl IntoIterator<Item = &'a ChartWarningWithRange>,
) -> Vec<Report<'a, (String, std::ops::Range<usize>)>> {
    let simple = SimpleSource::new(name, source);
    warnings.into_iter().map(|w| w.to_report(&simple)).collect()
}
