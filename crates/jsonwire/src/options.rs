/// Nesting limit used by [`ReaderOptions::default`].
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// Configuration options for [`Reader`](crate::Reader).
///
/// # Examples
///
/// ```rust
/// use jsonwire::{Reader, ReaderOptions};
///
/// let reader = Reader::with_options(
///     "[1, 2, 3]",
///     ReaderOptions {
///         max_depth: 8,
///         ..Default::default()
///     },
/// );
/// assert_eq!(reader.depth(), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderOptions {
    /// Number of simultaneously open objects and arrays at which decoding
    /// fails with [`Schema::MaximumDepth`](crate::Schema::MaximumDepth).
    ///
    /// The limit is reached, not exceeded: with the default of `100`, a
    /// document of 99 nested arrays decodes and one of 100 does not. This is
    /// the only thing bounding recursion on adversarial input, so raise it
    /// with care.
    ///
    /// # Default
    ///
    /// `100`
    pub max_depth: usize,

    /// Whether bytes other than whitespace may follow the top-level value.
    ///
    /// When `false`, [`Reader::check_complete`](crate::Reader::check_complete)
    /// rejects input such as `{}{}` or `[1]x` with
    /// [`SyntaxError::TrailingCharacters`](crate::SyntaxError::TrailingCharacters).
    ///
    /// # Default
    ///
    /// `false`
    pub allow_trailing_bytes: bool,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            allow_trailing_bytes: false,
        }
    }
}
