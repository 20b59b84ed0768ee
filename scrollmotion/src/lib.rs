//! A headless scroll-driven keyframe animation engine.
//!
//! For orchestration helpers (pass scheduling, status reporting), see the
//! `scrollmotion-adapter` crate.
//!
//! This crate focuses on the core algorithms needed to drive declarative
//! keyframe animations from a scroll position at interactive frame rates:
//! tolerant numeric extraction from textual property values, per-property
//! timelines with exact-hit and interpolated lookup, modifier-adjusted
//! merging of several named rules into one definition, and scroll progress
//! computation.
//!
//! It is UI-agnostic. A DOM/GUI layer is expected to provide:
//! - container geometry (top offset / height) and viewport scroll state
//! - keyframe rules by name, from whatever stylesheet representation it has
//! - application of the computed property → value mapping
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod definition;
mod engine;
mod error;
mod options;
mod progress;
mod registry;
mod rule;
mod template;
mod timeline;
mod types;

#[cfg(test)]
mod tests;

pub use definition::{AnimationDefinition, Modifier, SourceSpec};
pub use engine::AnimationEngine;
pub use error::{DefinitionError, SourceAccessError, StepError};
pub use options::{EngineOptions, RuleResolver, RuleSource};
pub use progress::{ContainerGeometry, Progress, Viewport};
pub use registry::{RuleRegistry, resolver_from_sources};
pub use rule::{KeyframeBlock, KeyframesRule};
pub use template::ValueTemplate;
pub use timeline::PropertyTimeline;
pub use types::{EngineStatus, StyleMap};
