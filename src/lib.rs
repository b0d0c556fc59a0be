//! barrelsplit - Rewrites barrel imports for better tree shaking
//!
//! This crate turns whole-library imports of utility libraries such as
//! lodash into per-function default imports, so bundlers only include the
//! functions a module actually uses.

pub mod ast;
pub mod config;
pub mod runner;
pub mod transform;

pub use config::{Config, WatchedModules};
pub use runner::{
    collect_source_files, transform_file, transform_files, FileOutcome, TransformError,
    TransformResult, Transformer,
};
pub use transform::{transform_program, transform_source, SplitImports};
