//! Patch files and factory patches for senal.
//!
//! A patch is the file form of a block diagram: named blocks with their
//! parameters, the wires between them, and the settings to run them with.
//!
//! # Features
//!
//! - **Patches**: load and save TOML patch files, build a [`Graph`](senal_core::Graph)
//! - **Validation**: collect every naming, parameter and wiring problem at once
//! - **Factory Patches**: built-in lab set-ups that always run
//!
//! # Example
//!
//! ```rust
//! use senal_config::{Patch, get_factory_patch};
//! use senal_engine::run;
//!
//! let patch = get_factory_patch("sampling").unwrap();
//! let built = patch.build_graph()?;
//! let output = run(&built.graph, &patch.run_settings())?;
//! assert!(output.report.stuck.is_empty());
//!
//! let text = patch.to_toml()?;
//! assert_eq!(Patch::from_toml(&text)?, patch);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod endpoint;
mod error;
mod patch;

/// Patch validation.
pub mod validation;

/// Factory patches bundled with the library.
pub mod factory_patches;

pub use endpoint::{Endpoint, PortSelector};
pub use error::ConfigError;
pub use factory_patches::{
    FACTORY_PATCH_NAMES, factory_patches, get_factory_patch, is_factory_patch,
};
pub use patch::{BlockConfig, BuiltPatch, ConnectionConfig, Patch, RunConfig};
pub use validation::{ValidationError, ValidationResult, validate_patch};
