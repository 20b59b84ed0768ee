use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cell::Cell;

#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

use scrollmotion::{
    AnimationEngine, ContainerGeometry, DefinitionError, EngineOptions, EngineStatus, Progress,
    RuleRegistry, RuleResolver, StyleMap, Viewport,
};

use crate::key::ElementKey;
use crate::status::StatusReport;

#[cfg(feature = "std")]
type GeometryCache = HashMap<String, Option<ContainerGeometry>>;
#[cfg(not(feature = "std"))]
type GeometryCache = BTreeMap<String, Option<ContainerGeometry>>;

/// Resolves container geometry for an element.
///
/// The second argument is the engine's container selector; `None` means the
/// element itself is the container. Returning `None` marks the container as
/// unresolvable for this pass (reported as an error, element skipped).
pub type GeometryProvider<K> =
    Arc<dyn Fn(&K, Option<&str>) -> Option<ContainerGeometry> + Send + Sync>;

/// Snapshots the viewport's scroll state; called once per pass.
pub type ViewportProvider = Arc<dyn Fn() -> Viewport + Send + Sync>;

/// Applies a computed style mapping to a host element.
pub type StyleSink<K> = Arc<dyn Fn(&K, &StyleMap) + Send + Sync>;

/// Receives the per-element status surface after bindings and passes.
pub type StatusSink<K> = Arc<dyn Fn(&K, &StatusReport) + Send + Sync>;

/// Configuration for [`Driver`]: the host collaborators the core treats as
/// external.
///
/// Cheap to clone; the callbacks are stored in `Arc`s.
pub struct DriverOptions<K> {
    pub resolver: RuleResolver,
    pub geometry: GeometryProvider<K>,
    pub viewport: ViewportProvider,
    pub apply_style: StyleSink<K>,
    /// Optional diagnostic surface; never read back by the driver.
    pub report_status: Option<StatusSink<K>>,
}

impl<K> DriverOptions<K> {
    pub fn new(
        resolver: RuleResolver,
        geometry: impl Fn(&K, Option<&str>) -> Option<ContainerGeometry> + Send + Sync + 'static,
        viewport: impl Fn() -> Viewport + Send + Sync + 'static,
        apply_style: impl Fn(&K, &StyleMap) + Send + Sync + 'static,
    ) -> Self {
        Self {
            resolver,
            geometry: Arc::new(geometry),
            viewport: Arc::new(viewport),
            apply_style: Arc::new(apply_style),
            report_status: None,
        }
    }

    pub fn with_report_status(
        mut self,
        report_status: Option<impl Fn(&K, &StatusReport) + Send + Sync + 'static>,
    ) -> Self {
        self.report_status = report_status.map(|f| Arc::new(f) as _);
        self
    }
}

impl<K> Clone for DriverOptions<K> {
    fn clone(&self) -> Self {
        Self {
            resolver: Arc::clone(&self.resolver),
            geometry: Arc::clone(&self.geometry),
            viewport: Arc::clone(&self.viewport),
            apply_style: Arc::clone(&self.apply_style),
            report_status: self.report_status.clone(),
        }
    }
}

impl<K> core::fmt::Debug for DriverOptions<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DriverOptions").finish_non_exhaustive()
    }
}

#[derive(Clone, Debug)]
struct Binding<K> {
    key: K,
    engine: AnimationEngine,
    last_applied: Option<StyleMap>,
}

/// A framework-neutral pass driver over many bound elements.
///
/// The host wires its scroll/resize/frame events to this type:
/// - `bind` / `unbind` when elements gain or lose their animation attribute
/// - `request_pass()` from scroll and resize handlers (any number of
///   triggers coalesce into one pending pass)
/// - `tick()` once per animation-frame opportunity
///
/// A pass snapshots the viewport once, memoizes container geometry per
/// selector, steps every engine, applies each style mapping only when it
/// changed since the last application, and reports per-element status. An
/// element's failure never aborts the rest of the pass.
#[derive(Clone, Debug)]
pub struct Driver<K> {
    options: DriverOptions<K>,
    registry: RuleRegistry,
    bindings: Vec<Binding<K>>,
    busy: Cell<bool>,
    pass_pending: Cell<bool>,
}

impl<K: ElementKey> Driver<K> {
    pub fn new(options: DriverOptions<K>) -> Self {
        Self {
            options,
            registry: RuleRegistry::new(),
            bindings: Vec::new(),
            busy: Cell::new(false),
            pass_pending: Cell::new(false),
        }
    }

    pub fn options(&self) -> &DriverOptions<K> {
        &self.options
    }

    /// The rule registry shared by every binding. Pre-seed it with
    /// [`RuleRegistry::register`] when rules are built programmatically.
    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut RuleRegistry {
        &mut self.registry
    }

    /// Binds an element to an animation attribute, replacing any existing
    /// binding under the same key (explicit reinitialization).
    ///
    /// On failure the element is left unbound and unanimated, and an error
    /// status is reported for it; other bindings are unaffected.
    pub fn bind(
        &mut self,
        key: K,
        attribute: &str,
        options: EngineOptions,
    ) -> Result<(), DefinitionError> {
        self.unbind(&key);
        match AnimationEngine::new(attribute, options, &mut self.registry, &self.options.resolver)
        {
            Ok(engine) => {
                report(
                    &self.options,
                    &key,
                    StatusReport {
                        progress: 0.0,
                        real_progress: 0.0,
                        status: EngineStatus::Ready,
                        message: None,
                    },
                );
                self.bindings.push(Binding {
                    key,
                    engine,
                    last_applied: None,
                });
                Ok(())
            }
            Err(err) => {
                report(
                    &self.options,
                    &key,
                    StatusReport {
                        progress: 0.0,
                        real_progress: 0.0,
                        status: EngineStatus::Error,
                        message: Some(err.to_string()),
                    },
                );
                Err(err)
            }
        }
    }

    pub fn unbind(&mut self, key: &K) -> bool {
        match self.bindings.iter().position(|b| &b.key == key) {
            Some(i) => {
                self.bindings.remove(i);
                true
            }
            None => false,
        }
    }

    pub fn is_bound(&self, key: &K) -> bool {
        self.bindings.iter().any(|b| &b.key == key)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn engine(&self, key: &K) -> Option<&AnimationEngine> {
        self.bindings
            .iter()
            .find(|b| &b.key == key)
            .map(|b| &b.engine)
    }

    pub fn status_of(&self, key: &K) -> Option<EngineStatus> {
        self.engine(key).map(AnimationEngine::status)
    }

    pub fn progress_of(&self, key: &K) -> Option<Progress> {
        self.engine(key).and_then(AnimationEngine::progress)
    }

    /// Marks a pass as pending. Call from scroll/resize handlers; any number
    /// of calls before the next [`Self::tick`] coalesce into one pass.
    pub fn request_pass(&self) {
        self.pass_pending.set(true);
    }

    pub fn has_pending_pass(&self) -> bool {
        self.pass_pending.get()
    }

    /// Runs one pass if one is pending. Call once per animation-frame
    /// opportunity. Returns the number of elements whose styles changed.
    pub fn tick(&mut self) -> usize {
        if !self.pass_pending.replace(false) {
            return 0;
        }
        self.run_pass()
    }

    /// Runs a pass unconditionally.
    ///
    /// A pass started while another is in flight is dropped, not queued.
    pub fn run_pass(&mut self) -> usize {
        if self.busy.replace(true) {
            awarn!("run_pass: a pass is already in flight, dropping this one");
            return 0;
        }

        let viewport = (self.options.viewport)();
        let mut geometry_cache = GeometryCache::new();
        let mut applied = 0usize;

        for binding in &mut self.bindings {
            let geometry = match &binding.engine.options().container {
                Some(selector) => *geometry_cache
                    .entry(selector.clone())
                    .or_insert_with(|| {
                        (self.options.geometry)(&binding.key, Some(selector.as_str()))
                    }),
                None => (self.options.geometry)(&binding.key, None),
            };

            let Some(geometry) = geometry else {
                let progress = binding.engine.progress().unwrap_or_default();
                report(
                    &self.options,
                    &binding.key,
                    StatusReport {
                        progress: progress.normalized,
                        real_progress: progress.real,
                        status: EngineStatus::Error,
                        message: Some(String::from("container not found")),
                    },
                );
                continue;
            };

            match binding.engine.step(geometry, viewport) {
                Ok(styles) => {
                    if binding.last_applied.as_ref() != Some(&styles) {
                        (self.options.apply_style)(&binding.key, &styles);
                        binding.last_applied = Some(styles);
                        applied += 1;
                    }
                    let progress = binding.engine.progress().unwrap_or_default();
                    report(
                        &self.options,
                        &binding.key,
                        StatusReport {
                            progress: progress.normalized,
                            real_progress: progress.real,
                            status: binding.engine.status(),
                            message: None,
                        },
                    );
                }
                Err(err) => {
                    // Frozen at the last good values; nothing is applied.
                    let progress = binding.engine.progress().unwrap_or_default();
                    report(
                        &self.options,
                        &binding.key,
                        StatusReport {
                            progress: progress.normalized,
                            real_progress: progress.real,
                            status: EngineStatus::Error,
                            message: Some(err.to_string()),
                        },
                    );
                }
            }
        }

        atrace!(applied, bindings = self.bindings.len(), "run_pass done");
        self.busy.set(false);
        applied
    }
}

fn report<K>(options: &DriverOptions<K>, key: &K, status: StatusReport) {
    if let Some(sink) = &options.report_status {
        sink(key, &status);
    }
}
