use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

use crate::options::{RuleResolver, RuleSource};
use crate::rule::KeyframesRule;

#[cfg(feature = "std")]
type RuleMap = HashMap<String, Arc<KeyframesRule>>;
#[cfg(not(feature = "std"))]
type RuleMap = BTreeMap<String, Arc<KeyframesRule>>;

/// An explicit repository of resolved keyframe rules.
///
/// The registry memoizes name → rule lookups so repeated bindings do not
/// rescan the host's rule sources. It is owned by the orchestration layer
/// and passed into definition construction; there is no hidden process-wide
/// cache. Entries are never invalidated automatically: newly available
/// rules become visible lazily on the next miss, and a host that reloads its
/// stylesheets should call [`Self::clear`].
#[derive(Clone, Debug, Default)]
pub struct RuleRegistry {
    rules: RuleMap,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookup(&self, name: &str) -> Option<Arc<KeyframesRule>> {
        self.rules.get(name).cloned()
    }

    /// Registers a rule under its own name, returning the shared handle.
    pub fn register(&mut self, rule: KeyframesRule) -> Arc<KeyframesRule> {
        let entry = Arc::new(rule);
        self.rules
            .insert(entry.name().to_string(), Arc::clone(&entry));
        entry
    }

    /// Looks `name` up, consulting `resolver` and caching the result on a
    /// miss.
    pub fn resolve(&mut self, name: &str, resolver: &RuleResolver) -> Option<Arc<KeyframesRule>> {
        if let Some(hit) = self.lookup(name) {
            return Some(hit);
        }
        let rule = resolver(name)?;
        sdebug!(name, "RuleRegistry: caching resolved rule");
        let entry = Arc::new(rule);
        self.rules.insert(name.to_string(), Arc::clone(&entry));
        Some(entry)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn clear(&mut self) {
        self.rules.clear();
    }
}

/// Builds a [`RuleResolver`] that scans `sources` in order and returns the
/// first hit.
///
/// An unreadable source is logged and skipped; scanning continues with the
/// remaining sources.
pub fn resolver_from_sources(sources: Vec<RuleSource>) -> RuleResolver {
    Arc::new(move |name| {
        for source in &sources {
            match source(name) {
                Ok(Some(rule)) => return Some(rule),
                Ok(None) => {}
                Err(err) => {
                    swarn!(name, error = %err, "skipping unreadable rule source");
                    let _ = err;
                }
            }
        }
        None
    })
}
