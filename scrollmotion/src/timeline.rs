use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::template::ValueTemplate;

/// An ordered, progress-keyed sequence of value templates for one property.
///
/// Entries are kept strictly increasing by progress with unique keys;
/// inserting at an existing key overwrites that entry in place, which is what
/// makes the cross-source merge rule "last source wins per exact key".
#[derive(Clone, Debug, PartialEq)]
pub struct PropertyTimeline {
    name: String,
    entries: Vec<ValueTemplate>,
}

impl PropertyTimeline {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(progress, raw value)` pairs in ascending progress order.
    pub fn entries(&self) -> impl Iterator<Item = (f64, &str)> + '_ {
        self.entries.iter().map(|e| (e.progress(), e.raw()))
    }

    /// Inserts a keyframe value, overwriting any entry at the same progress.
    pub fn add(&mut self, progress: f64, raw_value: &str) {
        let entry = ValueTemplate::new(progress, raw_value);
        match self
            .entries
            .binary_search_by(|e| e.progress().total_cmp(&progress))
        {
            Ok(i) => self.entries[i] = entry,
            Err(i) => self.entries.insert(i, entry),
        }
    }

    /// Evaluates the timeline at `progress`.
    ///
    /// - An exact key hit returns that keyframe's raw value unmodified,
    ///   bypassing interpolation entirely.
    /// - Before the first keyframe the first value is returned; after the
    ///   last, the last (clamping extrapolation).
    /// - Between two keyframes each numeric component is interpolated
    ///   linearly and substituted back into the earlier keyframe's template.
    ///
    /// Returns `None` only for a timeline with no entries.
    pub fn value_at(&self, progress: f64) -> Option<String> {
        if let Ok(i) = self
            .entries
            .binary_search_by(|e| e.progress().total_cmp(&progress))
        {
            return Some(self.entries[i].raw().to_string());
        }

        let mut before: Option<&ValueTemplate> = None;
        let mut after: Option<&ValueTemplate> = None;
        for entry in &self.entries {
            if entry.progress() < progress {
                before = Some(entry);
            } else {
                after = Some(entry);
                break;
            }
        }

        match (before, after) {
            (None, None) => None,
            (None, Some(first)) => Some(first.raw().to_string()),
            (Some(last), None) => Some(last.raw().to_string()),
            (Some(from), Some(to)) => Some(self.interpolate(from, to, progress)),
        }
    }

    /// Like [`Self::value_at`], but treats progress strictly outside `[0, 1]`
    /// as "no value": the consumer is expected to unset the property instead
    /// of clamping it to an endpoint value.
    pub fn value_at_bounded(&self, progress: f64) -> Option<String> {
        if !(0.0..=1.0).contains(&progress) {
            return None;
        }
        self.value_at(progress)
    }

    fn interpolate(&self, from: &ValueTemplate, to: &ValueTemplate, progress: f64) -> String {
        let ratio = (progress - from.progress()) / (to.progress() - from.progress());
        let len = from.numbers().len().max(to.numbers().len());
        let mut components = Vec::with_capacity(len);
        for position in 0..len {
            let a = self.component(from, to, position);
            let b = self.component(to, from, position);
            components.push(a + (b - a) * ratio);
        }
        from.fill(&components)
    }

    /// Resolves `side`'s numeric component at `position`, falling back when
    /// the two keyframes disagree on arity: a property-specific fixup first,
    /// then the other side's value (the component holds steady across the
    /// interval).
    fn component(&self, side: &ValueTemplate, other: &ValueTemplate, position: usize) -> f64 {
        match side.numbers().get(position) {
            Some(&value) => value,
            None => missing_component(&self.name, position)
                .unwrap_or_else(|| other.numbers().get(position).copied().unwrap_or_default()),
        }
    }
}

/// Default for a numeric component one keyframe has and the other lacks.
///
/// Color properties: a missing 4th component is the alpha channel an
/// `rgb()`-style notation leaves implicit, so it defaults to fully opaque.
fn missing_component(name: &str, position: usize) -> Option<f64> {
    if position == 3 && name.ends_with("color") {
        Some(1.0)
    } else {
        None
    }
}
