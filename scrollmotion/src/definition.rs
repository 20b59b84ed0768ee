use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::error::DefinitionError;
use crate::options::RuleResolver;
use crate::registry::RuleRegistry;
use crate::rule::KeyframesRule;
use crate::template::round6;
use crate::timeline::PropertyTimeline;

/// A transform applied to every keyframe progress value contributed by one
/// named animation source, before the merge into per-property timelines.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Modifier {
    /// `progress := 1 - progress`
    Reverse,
    /// `progress := progress + x/100` (argument in percent, like positions)
    Shift(f64),
    /// `progress := progress * x`
    Scale(f64),
}

impl Modifier {
    pub fn apply(&self, progress: f64) -> f64 {
        match self {
            Self::Reverse => 1.0 - progress,
            Self::Shift(x) => progress + x / 100.0,
            Self::Scale(x) => progress * x,
        }
    }

    /// Parses one `:`-separated attribute segment, e.g. `reverse` or
    /// `shift(10)`. Returns `None` for unknown keywords or missing
    /// arguments; the caller logs and ignores those.
    fn parse(segment: &str) -> Option<Self> {
        let (keyword, args) = match segment.split_once('(') {
            Some((keyword, rest)) => (keyword, Some(rest.strip_suffix(')').unwrap_or(rest))),
            None => (segment, None),
        };
        match keyword.trim() {
            "reverse" => Some(Self::Reverse),
            "shift" => Some(Self::Shift(first_argument(args)?)),
            "scale" => Some(Self::Scale(first_argument(args)?)),
            _ => None,
        }
    }
}

fn first_argument(args: Option<&str>) -> Option<f64> {
    args?.split(',').next()?.trim().parse().ok()
}

/// One named animation source parsed from the attribute, with the modifiers
/// written after it.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceSpec {
    pub name: String,
    pub modifiers: Vec<Modifier>,
}

/// Tokenizes an animation attribute: whitespace-separated tokens, each a
/// name followed by `:`-separated modifier segments.
fn parse_attribute(attribute: &str) -> Vec<SourceSpec> {
    let mut sources = Vec::new();
    for token in attribute.split_whitespace() {
        let mut segments = token.split(':');
        let Some(name) = segments.next() else {
            continue;
        };
        if name.is_empty() {
            continue;
        }
        let mut modifiers = Vec::new();
        for segment in segments {
            match Modifier::parse(segment) {
                Some(modifier) => modifiers.push(modifier),
                None => {
                    swarn!(segment, token, "ignoring unrecognized timeline modifier");
                }
            }
        }
        sources.push(SourceSpec {
            name: name.to_string(),
            modifiers,
        });
    }
    sources
}

/// The per-property timelines for one element binding, merged from one or
/// more named animation sources.
///
/// Timelines are registered in first-seen property order, which is also the
/// order the engine emits the final style mapping in. Sources are processed
/// in attribute order and `PropertyTimeline::add` overwrites on an equal
/// progress key, so a later source wins at an exact key while entries at
/// distinct keys coexist in one timeline and interpolate together. The
/// latter means two sources with sparse, interleaved keyframe grids can
/// blend in surprising ways; that is the documented cost of the simple merge
/// rule.
#[derive(Clone, Debug)]
pub struct AnimationDefinition {
    properties: Vec<PropertyTimeline>,
    sources: Vec<SourceSpec>,
}

impl AnimationDefinition {
    /// Parses an animation attribute and merges every named rule into one
    /// definition.
    ///
    /// Resolution failure for any name aborts the whole construction; no
    /// partial definition is retained.
    pub fn from_attribute(
        attribute: &str,
        registry: &mut RuleRegistry,
        resolver: &RuleResolver,
    ) -> Result<Self, DefinitionError> {
        let sources = parse_attribute(attribute);
        if sources.is_empty() {
            return Err(DefinitionError::EmptyAttribute);
        }

        let mut definition = Self {
            properties: Vec::new(),
            sources: Vec::new(),
        };
        for source in sources {
            let Some(rule) = registry.resolve(&source.name, resolver) else {
                return Err(DefinitionError::UnknownAnimation { name: source.name });
            };
            definition.merge_rule(&rule, &source.modifiers);
            definition.sources.push(source);
        }
        sdebug!(
            properties = definition.properties.len(),
            sources = definition.sources.len(),
            "AnimationDefinition::from_attribute"
        );
        Ok(definition)
    }

    /// Builds a definition from a single already-resolved rule, without
    /// modifiers.
    pub fn from_rule(rule: &KeyframesRule) -> Self {
        let mut definition = Self {
            properties: Vec::new(),
            sources: alloc::vec![SourceSpec {
                name: rule.name().to_string(),
                modifiers: Vec::new(),
            }],
        };
        definition.merge_rule(rule, &[]);
        definition
    }

    fn merge_rule(&mut self, rule: &KeyframesRule, modifiers: &[Modifier]) {
        for block in rule.blocks() {
            for &position in block.positions() {
                let mut progress = position / 100.0;
                for modifier in modifiers {
                    progress = modifier.apply(progress);
                }
                // Rounding keeps modifier arithmetic on the same key a
                // literal percentage produces, so exact-key overwrites stay
                // dependable.
                let progress = round6(progress);
                for (property, value) in block.declarations() {
                    self.timeline_mut(property).add(progress, value);
                }
            }
        }
    }

    fn timeline_mut(&mut self, property: &str) -> &mut PropertyTimeline {
        let index = match self.properties.iter().position(|t| t.name() == property) {
            Some(i) => i,
            None => {
                self.properties.push(PropertyTimeline::new(property));
                self.properties.len() - 1
            }
        };
        &mut self.properties[index]
    }

    /// Timelines in first-seen property order.
    pub fn timelines(&self) -> &[PropertyTimeline] {
        &self.properties
    }

    pub fn timeline(&self, property: &str) -> Option<&PropertyTimeline> {
        self.properties.iter().find(|t| t.name() == property)
    }

    /// The parsed sources, kept for diagnostics.
    pub fn sources(&self) -> &[SourceSpec] {
        &self.sources
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}
