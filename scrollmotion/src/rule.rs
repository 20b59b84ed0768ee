use alloc::string::String;
use alloc::vec::Vec;

/// One keyframe block: a set of positions (percent, as authored) sharing a
/// set of property declarations, like `0%, 50% { opacity: 0; }`.
///
/// Declarations are an explicit ordered list; the engine never reflects over
/// a host style object.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KeyframeBlock {
    positions: Vec<f64>,
    declarations: Vec<(String, String)>,
}

impl KeyframeBlock {
    /// A block for a single percent position.
    pub fn at(position_percent: f64) -> Self {
        Self {
            positions: alloc::vec![position_percent],
            declarations: Vec::new(),
        }
    }

    /// A block shared by several percent positions.
    pub fn at_each(positions_percent: impl IntoIterator<Item = f64>) -> Self {
        Self {
            positions: positions_percent.into_iter().collect(),
            declarations: Vec::new(),
        }
    }

    pub fn with_declaration(
        mut self,
        property: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.declarations.push((property.into(), value.into()));
        self
    }

    pub fn positions(&self) -> &[f64] {
        &self.positions
    }

    pub fn declarations(&self) -> &[(String, String)] {
        &self.declarations
    }
}

/// A structured, named keyframe rule as resolved from the host's stylesheet
/// layer (or built directly via [`KeyframesRule::new`]).
#[derive(Clone, Debug, PartialEq)]
pub struct KeyframesRule {
    name: String,
    blocks: Vec<KeyframeBlock>,
}

impl KeyframesRule {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            blocks: Vec::new(),
        }
    }

    pub fn with_block(mut self, block: KeyframeBlock) -> Self {
        self.blocks.push(block);
        self
    }

    pub fn push_block(&mut self, block: KeyframeBlock) {
        self.blocks.push(block);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn blocks(&self) -> &[KeyframeBlock] {
        &self.blocks
    }
}
