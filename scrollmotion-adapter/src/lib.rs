//! Adapter utilities for the `scrollmotion` crate.
//!
//! The `scrollmotion` crate is UI-agnostic and focuses on the core parsing
//! and interpolation math. This crate provides the small, framework-neutral
//! orchestration layer a host typically needs on top:
//!
//! - a pass driver over many bound elements (coalesced scroll/resize
//!   triggers, re-entrancy guard, per-pass geometry memoization)
//! - change detection so unchanged style mappings are not re-applied
//! - the per-element status surface (ready/on/off/error)
//!
//! This crate is intentionally framework-agnostic (no DOM/webview bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod driver;
mod key;
mod status;


pub use driver::{
    Driver, DriverOptions, GeometryProvider, StatusSink, StyleSink, ViewportProvider,
};
pub use key::ElementKey;
pub use status::StatusReport;
