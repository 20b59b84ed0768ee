use alloc::string::String;
use alloc::vec::Vec;

/// An ordered property → value mapping, emitted once per step.
///
/// Property names are unique; order is the first-seen order of the
/// definition's timelines. Equality is what pass-level change detection
/// compares, which is why interpolated components are rounded before they
/// land here.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StyleMap {
    entries: Vec<(String, String)>,
}

impl StyleMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a property, replacing an existing value under the same name.
    pub fn set(&mut self, property: impl Into<String>, value: impl Into<String>) {
        let property = property.into();
        match self.entries.iter_mut().find(|(name, _)| *name == property) {
            Some(slot) => slot.1 = value.into(),
            None => self.entries.push((property, value.into())),
        }
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| name == property)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Lifecycle/status surface reported to the host per element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EngineStatus {
    /// Bound, but no step has run yet.
    Ready,
    /// Last step ran with progress inside the animated span.
    On,
    /// Last step ran with progress outside the animated span.
    Off,
    /// The last step (or the binding itself) failed.
    Error,
}

impl EngineStatus {
    /// Lowercase form, suitable for a host status attribute.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ready => "ready",
            Self::On => "on",
            Self::Off => "off",
            Self::Error => "error",
        }
    }
}
