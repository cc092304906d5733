//! Run configuration shared by the single-case and batch runners.

use crate::format::DEFAULT_ARGREPR_LEN;
use crate::output::StdoutSink;

/// How a returned value is judged against a value expectation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TagMode {
    /// Plain `!=` against the expectation; the case tag is resolved and
    /// validated but does not take part in the comparison.
    #[default]
    Equality,
    /// The resolved tag predicate decides.
    Predicate,
}

/// Configuration for case execution and reporting.
///
/// Verbosity levels: `0` is silent, `1` prints errors and the summary of
/// batches with non-passing cases, `2` adds failures and every summary, `3`
/// adds passes and a `Running <test>` header.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub verbosity: u8,
    /// Maximum length of rendered arguments; `None` or `Some(0)` disables it.
    pub shorten_args: Option<usize>,
    pub use_colors: bool,
    pub tag_mode: TagMode,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            verbosity: 1,
            shorten_args: Some(DEFAULT_ARGREPR_LEN),
            use_colors: atty::is(atty::Stream::Stdout),
            tag_mode: TagMode::Equality,
        }
    }
}

impl RunConfig {
    /// No diagnostic output at all.
    pub fn quiet() -> Self {
        Self::default().with_verbosity(0)
    }

    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn with_shorten_args(mut self, maxlen: Option<usize>) -> Self {
        self.shorten_args = maxlen;
        self
    }

    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    pub fn with_tag_mode(mut self, tag_mode: TagMode) -> Self {
        self.tag_mode = tag_mode;
        self
    }

    /// A stdout sink honoring `use_colors`.
    pub fn stdout_sink(&self) -> StdoutSink {
        StdoutSink::new(self.use_colors)
    }
}
