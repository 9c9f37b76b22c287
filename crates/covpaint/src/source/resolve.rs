//! Locating profiled source files on disk.
//!
//! Go cover profiles name files by import path (`example.com/mod/pkg/file.go`).
//! [`ModuleResolver`] maps those references back through the enclosing
//! `go.mod`, falling back to the working directory and `$GOPATH/src`.

use crate::result::{CoverError, CoverResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Maps a profile file reference to a readable path
pub trait SourceResolver {
    /// Resolve `reference`, or fail with [`CoverError::SourceNotFound`]
    fn resolve(&self, reference: &str) -> CoverResult<PathBuf>;
}

impl<F> SourceResolver for F
where
    F: Fn(&str) -> CoverResult<PathBuf>,
{
    fn resolve(&self, reference: &str) -> CoverResult<PathBuf> {
        self(reference)
    }
}

/// A Go module found by walking up from a directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoModule {
    /// Directory containing `go.mod`
    pub root: PathBuf,
    /// Declared module path
    pub path: String,
}

impl GoModule {
    /// Find the nearest `go.mod` at or above `dir`
    pub fn discover(dir: &Path) -> CoverResult<Option<Self>> {
        for candidate in dir.ancestors() {
            let manifest = candidate.join("go.mod");
            if !manifest.is_file() {
                continue;
            }
            let text = fs::read_to_string(&manifest)?;
            return Ok(parse_module_path(&text).map(|path| Self {
                root: candidate.to_path_buf(),
                path,
            }));
        }
        Ok(None)
    }
}

/// Module path declared by a `go.mod` file
#[must_use]
pub fn parse_module_path(go_mod: &str) -> Option<String> {
    go_mod.lines().find_map(|line| {
        let line = line.split("//").next().unwrap_or_default().trim();
        let rest = line.strip_prefix("module")?;
        if !rest.starts_with(char::is_whitespace) {
            return None;
        }
        let path = rest.trim().trim_matches('"');
        (!path.is_empty()).then(|| path.to_string())
    })
}

/// Resolves references against the enclosing module, the working directory
/// and `$GOPATH/src`, in that order
#[derive(Debug, Clone)]
pub struct ModuleResolver {
    module: Option<GoModule>,
    cwd: PathBuf,
    gopath: Option<PathBuf>,
}

impl ModuleResolver {
    /// Build a resolver for the module enclosing `cwd`
    pub fn discover(cwd: impl Into<PathBuf>) -> CoverResult<Self> {
        let cwd = cwd.into();
        let module = GoModule::discover(&cwd)?;
        if let Some(ref m) = module {
            tracing::debug!(module = %m.path, root = %m.root.display(), "found go module");
        }
        Ok(Self {
            module,
            cwd,
            gopath: None,
        })
    }

    /// Build a resolver from the process working directory and `GOPATH`
    pub fn from_env() -> CoverResult<Self> {
        let resolver = Self::discover(std::env::current_dir()?)?;
        let gopath = std::env::var_os("GOPATH")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|home| Path::new(&home).join("go")));
        Ok(match gopath {
            Some(gopath) => resolver.with_gopath(gopath),
            None => resolver,
        })
    }

    /// Also search `<gopath>/src`
    #[must_use]
    pub fn with_gopath(mut self, gopath: impl Into<PathBuf>) -> Self {
        self.gopath = Some(gopath.into());
        self
    }

    /// The module this resolver maps import paths through
    #[must_use]
    pub const fn module(&self) -> Option<&GoModule> {
        self.module.as_ref()
    }

    fn candidates(&self, reference: &str) -> Vec<PathBuf> {
        let mut candidates = Vec::new();
        if let Some(ref m) = self.module {
            if let Some(rest) = reference
                .strip_prefix(m.path.as_str())
                .and_then(|rest| rest.strip_prefix('/'))
            {
                candidates.push(m.root.join(rest));
            }
        }
        let direct = Path::new(reference);
        if direct.is_absolute() {
            candidates.push(direct.to_path_buf());
        } else {
            candidates.push(self.cwd.join(direct));
        }
        if let Some(ref gopath) = self.gopath {
            candidates.push(gopath.join("src").join(reference));
        }
        candidates
    }
}

impl SourceResolver for ModuleResolver {
    fn resolve(&self, reference: &str) -> CoverResult<PathBuf> {
        let candidates = self.candidates(reference);
        if let Some(found) = candidates.iter().find(|c| c.is_file()) {
            tracing::trace!(reference, path = %found.display(), "resolved source file");
            return Ok(found.clone());
        }
        let tried = candidates
            .iter()
            .map(|c| c.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        Err(CoverError::source_not_found(
            reference,
            format!("not found in {tried}"),
        ))
    }
}
