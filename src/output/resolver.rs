use crate::error::{fail, ToolFailure, ToolResult};
use directories::UserDirs;
use std::fs;
use std::path::{Path, PathBuf};

use super::naming::GeneratedFileName;

/// A directory that was absolute, writable and present when it was resolved.
///
/// Only [`PathResolver`] can build one, which makes it the single gate for
/// write targets: see [`ResolvedOutputPath::join`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOutputPath(PathBuf);

impl ResolvedOutputPath {
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Full write target for a generated file name.
    pub fn join(&self, name: &GeneratedFileName) -> WriteTarget {
        WriteTarget(self.0.join(name.as_str()))
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

impl AsRef<Path> for ResolvedOutputPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

/// A file path inside a [`ResolvedOutputPath`]. Only built by
/// [`ResolvedOutputPath::join`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteTarget(PathBuf);

impl WriteTarget {
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

impl AsRef<Path> for WriteTarget {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

/// Turns caller-supplied output directories into validated, existing ones.
///
/// Holds the host's home directory (for `~` expansion) and the default output
/// directory used when the caller passes an empty string. Nothing else is
/// cached; every call re-checks the filesystem.
#[derive(Debug, Clone)]
pub struct PathResolver {
    home_dir: PathBuf,
    default_dir: PathBuf,
}

impl PathResolver {
    pub fn new(home_dir: impl Into<PathBuf>, default_dir: impl Into<PathBuf>) -> Self {
        Self {
            home_dir: home_dir.into(),
            default_dir: default_dir.into(),
        }
    }

    /// Look up the home and desktop directories from the host environment.
    /// Falls back to the home directory when the platform has no desktop.
    pub fn from_env() -> ToolResult<Self> {
        let Some(dirs) = UserDirs::new() else {
            return fail("Unable to resolve the home directory");
        };
        let home_dir = dirs.home_dir().to_path_buf();
        let default_dir = match dirs.desktop_dir() {
            Some(desktop) => desktop.to_path_buf(),
            None => {
                tracing::debug!(home = %home_dir.display(), "no desktop directory; defaulting to home");
                home_dir.clone()
            }
        };
        Ok(Self::new(home_dir, default_dir))
    }

    pub fn home_dir(&self) -> &Path {
        &self.home_dir
    }

    pub fn default_dir(&self) -> &Path {
        &self.default_dir
    }

    /// Compute, validate and create the output directory.
    pub fn resolve(&self, requested: &str, base: Option<&str>) -> ToolResult<ResolvedOutputPath> {
        let path = self.output_path(requested, base)?;

        if !is_writable(&path) {
            return Err(ToolFailure::NotWritable(path));
        }

        if let Err(err) = fs::create_dir_all(&path) {
            tracing::warn!(path = %path.display(), error = %err, "create output directory failed");
            return Err(ToolFailure::NotWritable(path));
        }

        tracing::debug!(path = %path.display(), "resolved output directory");
        Ok(ResolvedOutputPath(path))
    }

    /// Where `requested` points, without touching the filesystem.
    pub fn output_path(&self, requested: &str, base: Option<&str>) -> ToolResult<PathBuf> {
        if requested.is_empty() {
            return Ok(self.default_dir.clone());
        }

        if Path::new(requested).is_absolute() {
            return Ok(self.expand_user(requested));
        }

        match base {
            Some(base) => Ok(self.base_dir(base).join(requested)),
            None => Err(ToolFailure::InvalidDirectoryConfiguration(
                requested.to_string(),
            )),
        }
    }

    /// Anchor `relative` under the configured base. Used for input files too.
    pub fn under_base(&self, relative: &str, base: &str) -> PathBuf {
        self.base_dir(base).join(relative)
    }

    /// Expand a leading `~` or `~/`. Other forms (`~user`) are left alone.
    pub fn expand_user(&self, raw: &str) -> PathBuf {
        if raw == "~" {
            return self.home_dir.clone();
        }
        match raw.strip_prefix("~/").or_else(|| raw.strip_prefix("~\\")) {
            Some(rest) => self.home_dir.join(rest),
            None => PathBuf::from(raw),
        }
    }

    fn base_dir(&self, base: &str) -> PathBuf {
        let expanded = self.expand_user(base);
        if expanded.is_absolute() {
            expanded
        } else {
            self.default_dir.join(expanded)
        }
    }
}

/// Write permission on `path` if it exists, otherwise on its nearest existing
/// ancestor (which is where the missing directories will be created).
pub fn is_writable(path: &Path) -> bool {
    let mut candidate = path;
    loop {
        if candidate.exists() {
            return has_write_access(candidate);
        }
        match candidate.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => candidate = parent,
            _ => return false,
        }
    }
}

#[cfg(unix)]
fn has_write_access(path: &Path) -> bool {
    // Mode bits catch directories revoked for everyone, which access(2)
    // reports as writable for root.
    let readonly = match fs::metadata(path) {
        Ok(meta) => meta.permissions().readonly(),
        Err(_) => return false,
    };
    !readonly && rustix::fs::access(path, rustix::fs::Access::WRITE_OK).is_ok()
}

#[cfg(not(unix))]
fn has_write_access(path: &Path) -> bool {
    fs::metadata(path)
        .map(|meta| !meta.permissions().readonly())
        .unwrap_or(false)
}
