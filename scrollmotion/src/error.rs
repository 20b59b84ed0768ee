use alloc::string::String;

/// Errors produced while building an [`crate::AnimationDefinition`].
///
/// Construction is all-or-nothing: on error no partial definition survives
/// and the element stays unanimated until it is explicitly rebound.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DefinitionError {
    /// No registered rule source knows the named animation.
    #[error("animation `{name}` is not defined in any registered rule source")]
    UnknownAnimation { name: String },
    /// The animation attribute contained no animation names.
    #[error("animation attribute is empty")]
    EmptyAttribute,
}

/// Errors produced by a single recomputation step.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum StepError {
    /// The container's scroll span is zero, so progress is undefined. The
    /// step is abandoned and the engine keeps its previous progress.
    #[error(
        "container spans zero scroll distance (top {top}, height {height}, viewport height {viewport_height})"
    )]
    DegenerateGeometry {
        top: f64,
        height: f64,
        viewport_height: f64,
    },
}

/// A rule source that could not be read (e.g. cross-origin restricted).
///
/// Non-fatal: resolution skips the source and continues with the rest.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("rule source is not readable: {reason}")]
pub struct SourceAccessError {
    pub reason: String,
}

impl SourceAccessError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}
