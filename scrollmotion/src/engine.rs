use crate::definition::AnimationDefinition;
use crate::error::{DefinitionError, StepError};
use crate::options::{EngineOptions, RuleResolver};
use crate::progress::{ContainerGeometry, Progress, Viewport};
use crate::registry::RuleRegistry;
use crate::types::{EngineStatus, StyleMap};

/// The animation engine for one bound element.
///
/// Owns an immutable [`AnimationDefinition`] plus the progress/state
/// bookkeeping refreshed by [`Self::step`]. The engine is headless: callers
/// feed it geometry and viewport snapshots and apply the returned mapping
/// themselves (see the `scrollmotion-adapter` crate for a ready-made pass
/// driver).
///
/// Construction is fallible and all-or-nothing; a failed construction yields
/// no engine and is retried by binding afresh.
#[derive(Clone, Debug)]
pub struct AnimationEngine {
    definition: AnimationDefinition,
    options: EngineOptions,
    progress: Option<Progress>,
    failed: bool,
}

impl AnimationEngine {
    /// Parses `attribute` and builds the engine for one element.
    pub fn new(
        attribute: &str,
        options: EngineOptions,
        registry: &mut RuleRegistry,
        resolver: &RuleResolver,
    ) -> Result<Self, DefinitionError> {
        let definition = AnimationDefinition::from_attribute(attribute, registry, resolver)?;
        sdebug!(
            properties = definition.timelines().len(),
            suppress = options.suppress_out_of_range,
            "AnimationEngine::new"
        );
        Ok(Self::from_definition(definition, options))
    }

    /// Wraps an already-built definition (useful when the host constructs
    /// rules programmatically).
    pub fn from_definition(definition: AnimationDefinition, options: EngineOptions) -> Self {
        Self {
            definition,
            options,
            progress: None,
            failed: false,
        }
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn definition(&self) -> &AnimationDefinition {
        &self.definition
    }

    /// The progress computed by the most recent successful step.
    pub fn progress(&self) -> Option<Progress> {
        self.progress
    }

    pub fn status(&self) -> EngineStatus {
        if self.failed {
            return EngineStatus::Error;
        }
        match self.progress {
            None => EngineStatus::Ready,
            Some(p) if p.in_range() => EngineStatus::On,
            Some(_) => EngineStatus::Off,
        }
    }

    /// Recomputes progress and evaluates every timeline, returning the
    /// ordered property → value mapping for the host to apply.
    ///
    /// On a geometry error the previous progress is kept (the element stays
    /// frozen at its last good values) and the error is surfaced through
    /// [`Self::status`].
    pub fn step(
        &mut self,
        geometry: ContainerGeometry,
        viewport: Viewport,
    ) -> Result<StyleMap, StepError> {
        let progress = match Progress::compute(geometry, viewport) {
            Ok(progress) => progress,
            Err(err) => {
                self.failed = true;
                return Err(err);
            }
        };
        self.failed = false;
        self.progress = Some(progress);
        strace!(
            real = progress.real,
            normalized = progress.normalized,
            "AnimationEngine::step"
        );

        let mut styles = StyleMap::new();
        for timeline in self.definition.timelines() {
            let value = if self.options.suppress_out_of_range {
                timeline.value_at_bounded(progress.real)
            } else {
                timeline.value_at(progress.normalized)
            };
            if let Some(value) = value {
                styles.set(timeline.name(), value);
            }
        }
        Ok(styles)
    }
}
