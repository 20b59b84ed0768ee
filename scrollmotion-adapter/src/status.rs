use alloc::string::String;

use scrollmotion::EngineStatus;

/// The diagnostic surface reported to the host per element after every pass
/// (and on binding failures).
///
/// Write-only from the engine's point of view: the core never reads it back.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusReport {
    /// Clamped progress from the last successful step.
    pub progress: f64,
    /// Unclamped progress from the last successful step.
    pub real_progress: f64,
    pub status: EngineStatus,
    /// Present when `status` is [`EngineStatus::Error`].
    pub message: Option<String>,
}
