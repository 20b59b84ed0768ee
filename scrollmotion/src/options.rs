use alloc::string::String;
use alloc::sync::Arc;

use crate::error::SourceAccessError;
use crate::rule::KeyframesRule;

/// Resolves an animation name to its structured rule.
///
/// The engine looks rules up through a [`crate::RuleRegistry`], which falls
/// back to this callback on a cache miss. See
/// [`crate::resolver_from_sources`] for building a resolver over several
/// fallible sources.
pub type RuleResolver = Arc<dyn Fn(&str) -> Option<KeyframesRule> + Send + Sync>;

/// One rule source consulted during resolution.
///
/// Returns `Ok(None)` when the source does not define the name, and `Err`
/// when the source itself is unreadable (the scan skips it and continues).
pub type RuleSource =
    Arc<dyn Fn(&str) -> Result<Option<KeyframesRule>, SourceAccessError> + Send + Sync>;

/// Configuration for [`crate::AnimationEngine`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EngineOptions {
    /// Selector for the reference container whose geometry drives progress.
    ///
    /// `None` means the bound element itself is the container. The core never
    /// resolves the selector; the adapter hands it to the host's geometry
    /// provider.
    pub container: Option<String>,

    /// When set, a property is omitted from the emitted mapping whenever the
    /// unclamped progress falls strictly outside `[0, 1]`, signaling the
    /// host to unset it instead of pinning it to an endpoint value.
    pub suppress_out_of_range: bool,
}

impl EngineOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_container(mut self, container: Option<impl Into<String>>) -> Self {
        self.container = container.map(Into::into);
        self
    }

    pub fn with_suppress_out_of_range(mut self, suppress: bool) -> Self {
        self.suppress_out_of_range = suppress;
        self
    }
}
