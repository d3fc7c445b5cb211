pub mod cleanup;
pub mod naming;
pub mod resolver;

pub use naming::{make_file_name, FileNamer, GeneratedFileName};
pub use resolver::{PathResolver, ResolvedOutputPath, WriteTarget};

use crate::error::ToolResult;

/// Resolve `requested` against the host's home/desktop directories.
pub fn resolve(requested: &str, base: Option<&str>) -> ToolResult<ResolvedOutputPath> {
    PathResolver::from_env()?.resolve(requested, base)
}
