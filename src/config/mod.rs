//! Interpretation Configuration Module
//!
//! Every physical and statistical constant used by the interpreter (matrix
//! densities, Archie parameters, PE ranges, GR cutoff, clustering bounds) lives
//! in `InterpretationConfig`, loaded from TOML and passed explicitly to each
//! component.
//!
//! ## Loading Order
//!
//! 1. `PETROLOG_CONFIG` environment variable (path to TOML file)
//! 2. `petrolog.toml` in the current working directory
//! 3. Built-in defaults (see `defaults`)
//!
//! ## Usage
//!
//! ```ignore
//! let config = InterpretationConfig::load();
//! let bundle = pipeline::interpret(&store, &config);
//! ```

mod interp_config;
pub mod defaults;
pub mod validation;

pub use interp_config::*;
