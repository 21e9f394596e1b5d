//! Patch validation.
//!
//! [`validate_patch`] checks everything that can be checked without building
//! a graph: run settings, block names, block parameters, and that every
//! connection endpoint names an existing block and a port that block has.
//! All problems are collected rather than stopping at the first one.
//!
//! # Example
//!
//! ```rust
//! use senal_config::{Patch, ValidationError, validate_patch};
//! use senal_core::BlockParams;
//!
//! let patch = Patch::new("broken")
//!     .with_block("sh", BlockParams::SampleHold)
//!     .with_connection("ghost", "sh");
//! assert!(matches!(
//!     validate_patch(&patch),
//!     Err(ValidationError::UnknownBlock { .. })
//! ));
//! ```

use std::collections::HashMap;
use thiserror::Error;

use senal_core::{BlockKind, ParamError, TimeBase, TimeBaseError};

use crate::endpoint::{Endpoint, PortSelector};
use crate::patch::Patch;

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// Sample rate or duration unusable.
    #[error("invalid run settings: {0}")]
    InvalidRun(#[from] TimeBaseError),

    /// A block has an empty name.
    #[error("block #{0} has an empty name")]
    EmptyName(usize),

    /// A block name contains the endpoint separator.
    #[error("block name '{0}' must not contain '.'")]
    InvalidName(String),

    /// Two blocks share a name.
    #[error("block name '{0}' is used more than once")]
    DuplicateBlock(String),

    /// A block's parameters are out of range.
    #[error("block '{block}': {source}")]
    InvalidParams {
        /// Block name.
        block: String,
        /// What is wrong with the parameters.
        #[source]
        source: ParamError,
    },

    /// A connection names a block that does not exist.
    #[error("connection #{index}: unknown block '{name}'")]
    UnknownBlock {
        /// Position of the connection in the patch.
        index: usize,
        /// The missing block name.
        name: String,
    },

    /// A connection endpoint has an unrecognised port suffix.
    #[error("connection #{index}: '{endpoint}' is not a valid {side} endpoint")]
    BadPort {
        /// Position of the connection in the patch.
        index: usize,
        /// The endpoint text.
        endpoint: String,
        /// `"source"` or `"target"`.
        side: &'static str,
    },

    /// A connection endpoint names a port the block does not have.
    #[error("connection #{index}: {kind} block '{block}' has no '{port}' port")]
    NoSuchPort {
        /// Position of the connection in the patch.
        index: usize,
        /// Block name.
        block: String,
        /// Block type.
        kind: BlockKind,
        /// The requested port.
        port: PortSelector,
    },

    /// A connection runs from a block into itself.
    #[error("connection #{index}: block '{block}' is wired to itself")]
    SelfLoop {
        /// Position of the connection in the patch.
        index: usize,
        /// Block name.
        block: String,
    },

    /// Multiple validation errors.
    #[error("multiple validation errors: {}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validate a whole patch, collecting every problem found.
///
/// Returns the single error directly when there is exactly one, and
/// [`ValidationError::Multiple`] otherwise.
pub fn validate_patch(patch: &Patch) -> ValidationResult<()> {
    let mut errors = Vec::new();

    if let Err(e) = TimeBase::new(patch.run.sample_rate, patch.run.duration) {
        errors.push(ValidationError::InvalidRun(e));
    }

    let mut kinds: HashMap<&str, BlockKind> = HashMap::new();
    for (index, block) in patch.blocks.iter().enumerate() {
        if block.name.is_empty() {
            errors.push(ValidationError::EmptyName(index));
        } else if block.name.contains('.') {
            errors.push(ValidationError::InvalidName(block.name.clone()));
        } else if kinds.insert(&block.name, block.params.kind()).is_some() {
            errors.push(ValidationError::DuplicateBlock(block.name.clone()));
        }
        if let Err(source) = block.params.validate() {
            errors.push(ValidationError::InvalidParams {
                block: block.name.clone(),
                source,
            });
        }
    }

    for (index, conn) in patch.connections.iter().enumerate() {
        let from = Endpoint::parse(&conn.from);
        let to = Endpoint::parse(&conn.to);
        let source = check_endpoint(
            index,
            &conn.from,
            from,
            from.source_selector(),
            "source",
            &kinds,
        );
        let target =
            check_endpoint(index, &conn.to, to, to.target_selector(), "target", &kinds);
        for result in [source, target] {
            if let Err(e) = result {
                errors.push(e);
            }
        }
        if from.block == to.block && kinds.contains_key(from.block) {
            errors.push(ValidationError::SelfLoop {
                index,
                block: from.block.to_string(),
            });
        }
    }

    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.remove(0)),
        _ => Err(ValidationError::Multiple(errors)),
    }
}

fn check_endpoint(
    index: usize,
    text: &str,
    endpoint: Endpoint<'_>,
    selector: Option<PortSelector>,
    side: &'static str,
    kinds: &HashMap<&str, BlockKind>,
) -> ValidationResult<()> {
    let Some(&kind) = kinds.get(endpoint.block) else {
        return Err(ValidationError::UnknownBlock {
            index,
            name: endpoint.block.to_string(),
        });
    };
    let Some(port) = selector else {
        return Err(ValidationError::BadPort {
            index,
            endpoint: text.to_string(),
            side,
        });
    };
    let layout = kind.port_layout();
    let exists = match port {
        PortSelector::Output => layout.outputs > 0,
        PortSelector::Input(slot) => slot < layout.inputs,
        PortSelector::Clock => layout.clock_inputs > 0,
    };
    if exists {
        Ok(())
    } else {
        Err(ValidationError::NoSuchPort {
            index,
            block: endpoint.block.to_string(),
            kind,
            port,
        })
    }
}
