//! A profiled source file loaded from disk, and lookups across a run.

use crate::coverage::{CoverProfile, FunctionCoverage, FunctionMatcher, Profile};
use crate::paint::{paint_profile, render_annotated, Gradient, OutputMode, PaintPoint};
use crate::report::FileReport;
use crate::result::{CoverError, CoverResult};
use crate::source::{extract_functions, FunctionExtent, LineMap, SourceResolver};
use std::fs;
use std::path::{Path, PathBuf};

/// Source bytes together with the byte-offset profile that covers them
#[derive(Debug, Clone)]
pub struct SourceFile {
    path: PathBuf,
    src: Vec<u8>,
    profile: Profile,
}

impl SourceFile {
    /// Resolve, read and align one profile with its source
    pub fn load<R>(cover: &CoverProfile, resolver: &R) -> CoverResult<Self>
    where
        R: SourceResolver + ?Sized,
    {
        let path = resolver.resolve(&cover.file_reference)?;
        let src = fs::read(&path).map_err(|e| {
            CoverError::source_not_found(
                &cover.file_reference,
                format!("can't read {}: {e}", path.display()),
            )
        })?;
        tracing::debug!(
            reference = %cover.file_reference,
            path = %path.display(),
            bytes = src.len(),
            "loaded source"
        );
        Self::from_source(path, src, cover)
    }

    /// Align a profile with source bytes already in memory
    pub fn from_source(
        path: impl Into<PathBuf>,
        src: Vec<u8>,
        cover: &CoverProfile,
    ) -> CoverResult<Self> {
        let profile = cover.resolve(&src)?;
        Ok(Self {
            path: path.into(),
            src,
            profile,
        })
    }

    /// Resolved path on disk
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw source bytes
    #[must_use]
    pub fn src(&self) -> &[u8] {
        &self.src
    }

    /// Byte-offset profile
    #[must_use]
    pub const fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Function declarations in source order
    pub fn functions(&self) -> CoverResult<Vec<FunctionExtent>> {
        extract_functions(&self.src, &self.path.display().to_string())
    }

    /// First function named `name`, if declared here
    pub fn find_function(&self, name: &str) -> CoverResult<Option<FunctionExtent>> {
        Ok(self.functions()?.into_iter().find(|f| f.name == name))
    }

    /// Coverage of every declared function
    pub fn function_coverage(&self) -> CoverResult<Vec<FunctionCoverage>> {
        let functions = self.functions()?;
        FunctionMatcher::new(&self.profile, &self.src).coverage_all(&functions)
    }

    /// Paint points for the whole file
    pub fn paint_points(&self) -> CoverResult<Vec<PaintPoint>> {
        paint_profile(&self.profile, &self.src)
    }

    /// Annotated rendering of the whole file
    pub fn render(&self, gradient: &Gradient, mode: OutputMode) -> CoverResult<String> {
        let points = self.paint_points()?;
        Ok(render_annotated(
            &self.src,
            &points,
            0..self.src.len(),
            gradient,
            mode,
        ))
    }

    /// Annotated rendering of one function's declaration
    pub fn render_function(
        &self,
        extent: &FunctionExtent,
        gradient: &Gradient,
        mode: OutputMode,
    ) -> CoverResult<String> {
        let map = LineMap::new(&self.src);
        let range = extent.byte_range(&map, self.profile.file_reference())?;
        let points = self.paint_points()?;
        Ok(render_annotated(&self.src, &points, range, gradient, mode))
    }

    /// Report section for this file, headed by `display_path`
    pub fn report(&self, display_path: impl Into<String>) -> CoverResult<FileReport> {
        let functions = self.function_coverage()?;
        let report = FileReport::new(display_path, self.profile.totals(), functions);
        tracing::debug!(
            file = %report.path,
            functions = report.functions.len(),
            function_statements = report.function_totals().total,
            "built file report"
        );
        Ok(report)
    }
}

/// Load profiled files in order until one declares `name`.
///
/// Files are resolved lazily; a resolution failure before the match aborts
/// the search. A name declared nowhere is a [`CoverError::FunctionNotFound`].
pub fn locate_function<R>(
    profiles: &[CoverProfile],
    resolver: &R,
    name: &str,
) -> CoverResult<(SourceFile, FunctionExtent)>
where
    R: SourceResolver + ?Sized,
{
    for cover in profiles {
        let file = SourceFile::load(cover, resolver)?;
        if let Some(extent) = file.find_function(name)? {
            return Ok((file, extent));
        }
    }
    Err(CoverError::function_not_found(name))
}

/// Every profiled file whose resolved path contains `needle`.
///
/// All files are resolved first, so a missing source fails the lookup even
/// when it would not have matched.
pub fn files_matching<R>(
    profiles: &[CoverProfile],
    resolver: &R,
    needle: &str,
) -> CoverResult<Vec<SourceFile>>
where
    R: SourceResolver + ?Sized,
{
    let files = profiles
        .iter()
        .map(|cover| SourceFile::load(cover, resolver))
        .collect::<CoverResult<Vec<_>>>()?;
    let matched: Vec<_> = files
        .into_iter()
        .filter(|f| f.path.to_string_lossy().contains(needle))
        .collect();
    if matched.is_empty() {
        return Err(CoverError::file_not_profiled(needle));
    }
    Ok(matched)
}
