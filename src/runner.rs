//! File-level driver: discovers source files, transforms them, and
//! reports what changed.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::ast::{print_program, ParseError, ParseResult, SourceLanguage, SourceParser};
use crate::config::WatchedModules;
use crate::transform::SplitImports;

/// Errors that can occur while transforming files.
#[derive(Error, Debug)]
pub enum TransformError {
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: ParseError,
    },

    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),
}

/// Result type for transform operations.
pub type TransformResult<T> = Result<T, TransformError>;

/// The result of transforming one file.
#[derive(Debug, Clone)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub original: String,
    /// Transformed source. Equal to `original` when nothing was rewritten.
    pub output: String,
}

impl FileOutcome {
    /// Returns true if the transform rewrote anything.
    pub fn changed(&self) -> bool {
        self.original != self.output
    }

    /// Write the transformed source back to `path`.
    pub fn write(&self) -> std::io::Result<()> {
        fs::write(&self.path, &self.output)
    }
}

/// Transforms sources with a reusable parser.
///
/// Parsing needs `&mut self`, so each thread owns its own `Transformer`.
pub struct Transformer {
    parser: SourceParser,
    visitor: SplitImports,
}

impl Transformer {
    /// Create a new Transformer.
    pub fn new(watched: WatchedModules) -> ParseResult<Self> {
        Ok(Self {
            parser: SourceParser::new()?,
            visitor: SplitImports::new(watched),
        })
    }

    /// Transform source code directly.
    ///
    /// Returns `None` when the module has nothing to rewrite.
    pub fn transform_source(
        &mut self,
        source: &str,
        language: SourceLanguage,
    ) -> ParseResult<Option<String>> {
        let mut program = self.parser.parse(source, language)?;
        let before = program.clone();

        crate::ast::traverse(&mut program, &self.visitor);

        if program == before {
            return Ok(None);
        }

        let mut output = print_program(&program);
        if source.ends_with('\n') {
            output.push('\n');
        }
        Ok(Some(output))
    }

    /// Transform a single file.
    pub fn transform_file(&mut self, path: &Path) -> TransformResult<FileOutcome> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        let language = SourceLanguage::from_extension(ext)
            .ok_or_else(|| TransformError::UnsupportedFileType(path.display().to_string()))?;

        let original = fs::read_to_string(path)?;
        let output = self
            .transform_source(&original, language)
            .map_err(|source| TransformError::Parse {
                path: path.display().to_string(),
                source,
            })?;

        match &output {
            Some(_) => info!(path = %path.display(), "rewrote barrel imports"),
            None => debug!(path = %path.display(), "nothing to rewrite"),
        }

        Ok(FileOutcome {
            path: path.to_path_buf(),
            output: output.unwrap_or_else(|| original.clone()),
            original,
        })
    }
}

/// Transform a single file with a throwaway parser.
pub fn transform_file(path: &Path, watched: &WatchedModules) -> TransformResult<FileOutcome> {
    let mut transformer =
        Transformer::new(watched.clone()).map_err(|source| TransformError::Parse {
            path: path.display().to_string(),
            source,
        })?;
    transformer.transform_file(path)
}

/// Transform many files in parallel, one parser per worker thread.
///
/// Results are returned in the order of `paths`.
pub fn transform_files(
    paths: &[PathBuf],
    watched: &WatchedModules,
) -> Vec<(PathBuf, TransformResult<FileOutcome>)> {
    paths
        .par_iter()
        .map_init(
            || Transformer::new(watched.clone()),
            |transformer, path| {
                let result = match transformer {
                    Ok(transformer) => transformer.transform_file(path),
                    Err(_) => Err(TransformError::Parse {
                        path: path.display().to_string(),
                        source: ParseError::LanguageInit,
                    }),
                };
                (path.clone(), result)
            },
        )
        .collect()
}

/// Expand the given paths into a sorted list of source files.
///
/// Directories are walked recursively, skipping dependency and build
/// output directories; files given explicitly are always included.
pub fn collect_source_files(roots: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for root in roots {
        if !root.is_dir() {
            files.push(root.clone());
            continue;
        }

        for entry in WalkDir::new(root)
            .into_iter()
            .filter_entry(|e| !is_ignored_dir(e))
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !entry.file_type().is_file() {
                continue;
            }

            let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
            if SourceLanguage::from_extension(ext).is_some() {
                files.push(path.to_path_buf());
            }
        }
    }

    files.sort();
    files.dedup();
    files
}

/// Check if a directory should be ignored during traversal.
fn is_ignored_dir(entry: &walkdir::DirEntry) -> bool {
    if !entry.file_type().is_dir() || entry.depth() == 0 {
        return false;
    }

    let name = entry.file_name().to_string_lossy();
    matches!(
        name.as_ref(),
        "node_modules" | ".git" | "dist" | "build" | ".next" | "coverage" | ".turbo"
    )
}
