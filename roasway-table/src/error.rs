use thiserror::Error;

use crate::element::SelectorError;

/// Fatal for the whole engine: nothing is managed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("no tables match selector `{selector}`")]
    NoMatchingGrid { selector: String },
    #[error("invalid selector `{selector}`: {source}")]
    InvalidSelector {
        selector: String,
        #[source]
        source: SelectorError,
    },
}

/// Fatal for one grid only; sibling grids keep initializing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralError {
    #[error("table `{grid}` has no header cells")]
    MissingHeaders { grid: String },
    #[error("table `{grid}` has no rows")]
    MissingRows { grid: String },
}

impl StructuralError {
    pub fn grid(&self) -> &str {
        match self {
            Self::MissingHeaders { grid } | Self::MissingRows { grid } => grid,
        }
    }
}
