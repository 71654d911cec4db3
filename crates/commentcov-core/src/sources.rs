//! Source providers for coverage measurement

use crate::coverage::{CoverageItem, MeasureOptions, file_coverage};
use crate::error::{Error, Result};
use crate::go;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Measure one file's coverage from text already in memory.
///
/// `file` is only recorded in the items; nothing is read from disk.
pub fn measure_source(file: &str, text: &str, options: &MeasureOptions) -> Result<Vec<CoverageItem>> {
    let source = go::parse(text).map_err(|error| {
        warn!(file, %error, "failed to parse go source");
        Error::Parse {
            file: file.to_string(),
            error,
        }
    })?;

    Ok(file_coverage(file, &source, options))
}

/// Read, parse and classify one Go file
pub fn measure_file(path: impl AsRef<Path>, options: &MeasureOptions) -> Result<Vec<CoverageItem>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;

    measure_source(&path.to_string_lossy(), &text, options)
}

/// Trait for providing Go files to measure
pub trait Sources {
    /// Measure every source, concatenating the per-file items in source order
    fn extract(self, options: &MeasureOptions) -> Result<Vec<CoverageItem>>;
}

/// Sources from an explicit list of file paths
pub struct PathSources(Vec<PathBuf>);

impl PathSources {
    /// Create from an iterator of paths
    pub fn new(paths: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        Self(paths.into_iter().map(Into::into).collect())
    }
}

impl Sources for PathSources {
    fn extract(self, options: &MeasureOptions) -> Result<Vec<CoverageItem>> {
        debug!(files = self.0.len(), "measuring files");

        #[cfg(feature = "parallel")]
        let per_file: Vec<Vec<CoverageItem>> = {
            use rayon::prelude::*;

            self.0
                .par_iter()
                .map(|path| measure_file(path, options))
                .collect::<Result<_>>()?
        };

        #[cfg(not(feature = "parallel"))]
        let per_file: Vec<Vec<CoverageItem>> = self
            .0
            .iter()
            .map(|path| measure_file(path, options))
            .collect::<Result<_>>()?;

        Ok(per_file.into_iter().flatten().collect())
    }
}

/// In-memory sources (useful for testing)
pub struct MemorySources(Vec<(String, String)>);

impl MemorySources {
    /// Create empty memory sources
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Add a file with content
    pub fn add(mut self, file: impl Into<String>, content: impl Into<String>) -> Self {
        self.0.push((file.into(), content.into()));
        self
    }
}

impl Default for MemorySources {
    fn default() -> Self {
        Self::new()
    }
}

impl Sources for MemorySources {
    fn extract(self, options: &MeasureOptions) -> Result<Vec<CoverageItem>> {
        let mut items = Vec::new();
        for (file, content) in self.0 {
            items.extend(measure_source(&file, &content, options)?);
        }
        Ok(items)
    }
}

/// Gitignore-aware walk for `.go` files under a directory
#[cfg(feature = "walk")]
pub struct WalkSources {
    root: PathBuf,
}

#[cfg(feature = "walk")]
impl WalkSources {
    /// Create a walker for the given root directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Every `.go` file under the root, sorted by path
    pub fn paths(&self) -> Result<Vec<PathBuf>> {
        use ignore::WalkBuilder;

        let walker = WalkBuilder::new(&self.root)
            .follow_links(true)
            .hidden(false)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .build();

        let mut paths = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|source| Error::Walk {
                root: self.root.clone(),
                source,
            })?;

            let path = entry.path();
            let is_file = entry.file_type().is_some_and(|ty| ty.is_file());
            if is_file && path.extension().is_some_and(|ext| ext == "go") {
                paths.push(path.to_path_buf());
            }
        }

        paths.sort();
        debug!(root = %self.root.display(), files = paths.len(), "walked for go files");
        Ok(paths)
    }
}

#[cfg(feature = "walk")]
impl Sources for WalkSources {
    fn extract(self, options: &MeasureOptions) -> Result<Vec<CoverageItem>> {
        PathSources::new(self.paths()?).extract(options)
    }
}
