use anyhow::Context;
use filetime::FileTime;
use std::fs;
use std::path::Path;

/// Delete regular files in `dir` whose mtime is older than `max_age_hours`.
///
/// Returns the number of files removed. A missing directory removes nothing;
/// files that can't be deleted are skipped.
pub fn cleanup_old_files(dir: &Path, max_age_hours: u64) -> anyhow::Result<usize> {
    cleanup_older_than(dir, max_age_hours.saturating_mul(3600), FileTime::now())
}

pub fn cleanup_older_than(dir: &Path, max_age_secs: u64, now: FileTime) -> anyhow::Result<usize> {
    if !dir.is_dir() {
        return Ok(0);
    }

    let mut deleted = 0;
    for entry in fs::read_dir(dir).with_context(|| format!("read dir {}", dir.display()))? {
        let entry = entry?;
        let meta = match entry.metadata() {
            Ok(meta) => meta,
            Err(_) => continue,
        };
        if !meta.is_file() {
            continue;
        }

        let mtime = FileTime::from_last_modification_time(&meta);
        // Future mtimes give a negative age and are never expired.
        let age = now.unix_seconds().saturating_sub(mtime.unix_seconds());
        let expired = u64::try_from(age).map_or(false, |age| age > max_age_secs);
        if !expired {
            continue;
        }

        let path = entry.path();
        match fs::remove_file(&path) {
            Ok(()) => deleted += 1,
            Err(err) => {
                tracing::debug!(path = %path.display(), error = %err, "skip undeletable file");
            }
        }
    }

    Ok(deleted)
}
