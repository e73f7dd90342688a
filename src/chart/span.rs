//! Byte-span wrapper attached to tokens, errors, and warnings so that
//! diagnostics can point back into the chart source.

use std::ops::Range;

/// A value together with its byte span in the chart source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Spanned<T> {
    content: T,
    /// Start byte index, inclusive.
    start: usize,
    /// End byte index, exclusive.
    end: usize,
}

impl<T> Spanned<T> {
    /// Wraps `content` with the given byte span.
    pub const fn new(content: T, span: Range<usize>) -> Self {
        Self {
            content,
            start: span.start,
            end: span.end,
        }
    }

    /// Returns the wrapped content.
    pub const fn content(&self) -> &T {
        &self.content
    }

    /// Takes the content out of the wrapper.
    pub fn into_content(self) -> T {
        self.content
    }

    /// Start byte index of the span, inclusive.
    pub const fn start(&self) -> usize {
        self.start
    }

    /// End byte index of the span, exclusive.
    pub const fn end(&self) -> usize {
        self.end
    }

    /// The span as a [`Range`].
    pub const fn as_span(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Maps the content, keeping the span.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Spanned<U> {
        Spanned {
            content: f(self.content),
            start: self.start,
            end: self.end,
        }
    }
}

impl<T: std::fmt::Display> std::fmt::Display for Spanned<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at bytes [{}, {})", self.content, self.start, self.end)
    }
}

impl<T: std::error::Error + 'static> std::error::Error for Spanned<T> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.content)
    }
}

/// Extension methods to wrap any value into a [`Spanned`].
pub trait SpannedExt {
    /// Wraps `self` with the given byte span.
    fn into_spanned(self, span: Range<usize>) -> Spanned<Self>
    where
        Self: Sized,
    {
        Spanned::new(self, span)
    }

    /// Wraps `self` with the span of another wrapper.
    fn into_spanned_of<W>(self, other: &Spanned<W>) -> Spanned<Self>
    where
        Self: Sized,
    {
        Spanned::new(self, other.as_span())
    }
}

impl<T> SpannedExt for T {}
