use crate::error::StepError;
use crate::template::round6;

/// Geometry of the reference container, in document coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContainerGeometry {
    /// Top offset of the container from the document origin.
    pub top: f64,
    /// Height of the container.
    pub height: f64,
}

/// A snapshot of the viewport's scroll state.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    pub height: f64,
    pub scroll_top: f64,
}

/// Progress along the animation span for one recomputation.
///
/// `real` is the unclamped ratio (used for out-of-range suppression and
/// on/off status), `normalized` its clamp to `[0, 1]`. Both are rounded to 6
/// fractional digits so diagnostics and change-detection comparisons do not
/// jitter.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Progress {
    pub real: f64,
    pub normalized: f64,
}

impl Progress {
    /// Computes progress from container geometry and viewport state.
    ///
    /// Progress 0 is the scroll offset where the container's top enters the
    /// viewport bottom; progress 1 is where its bottom leaves the viewport
    /// top. A zero-length span between the two is an error: progress is
    /// undefined and the caller freezes at its last good value.
    pub fn compute(geometry: ContainerGeometry, viewport: Viewport) -> Result<Self, StepError> {
        let start = geometry.top - viewport.height;
        let end = geometry.top + geometry.height;
        if end == start {
            return Err(StepError::DegenerateGeometry {
                top: geometry.top,
                height: geometry.height,
                viewport_height: viewport.height,
            });
        }
        let real = round6((viewport.scroll_top - start) / (end - start));
        Ok(Self {
            real,
            normalized: real.clamp(0.0, 1.0),
        })
    }

    /// Whether the unclamped progress lies within the animated span.
    pub fn in_range(&self) -> bool {
        (0.0..=1.0).contains(&self.real)
    }
}
