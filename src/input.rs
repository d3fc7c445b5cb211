//! Validation of caller-supplied input files (audio to transcribe, isolate, ...).

use crate::config::Config;
use crate::error::{ToolFailure, ToolResult};
use crate::output::resolver::PathResolver;
use std::fs;
use std::path::{Path, PathBuf};

const AUDIO_EXTENSIONS: &[&str] = &[
    "wav", "mp3", "m4a", "aac", "ogg", "flac", "mp4", "avi", "mov", "wmv",
];

/// Validates input paths the same way output directories are anchored:
/// absolute paths as given, relative ones only under a base.
#[derive(Debug, Clone)]
pub struct InputResolver<'a> {
    paths: &'a PathResolver,
    base: Option<&'a str>,
    threshold: u8,
    max_suggestions: usize,
}

impl<'a> InputResolver<'a> {
    pub fn new(paths: &'a PathResolver, config: &'a Config) -> Self {
        Self {
            paths,
            base: config.base_path(),
            threshold: config.similarity_threshold,
            max_suggestions: config.max_suggestions,
        }
    }

    /// Return the path of an existing regular file, optionally insisting on an
    /// audio/video extension.
    pub fn resolve(&self, raw: &str, audio_content_check: bool) -> ToolResult<PathBuf> {
        let path = if Path::new(raw).is_absolute() {
            PathBuf::from(raw)
        } else {
            match self.base {
                Some(base) => self.paths.under_base(raw, base),
                None => return Err(ToolFailure::InvalidInputPath(raw.to_string())),
            }
        };

        if !path.exists() {
            let suggestions = match path.parent() {
                Some(parent) if parent.is_dir() => self.similar_audio_files(&path, parent),
                _ => Vec::new(),
            };
            return Err(ToolFailure::FileNotFound { path, suggestions });
        }

        if !path.is_file() {
            return Err(ToolFailure::NotAFile(path));
        }

        if audio_content_check && !is_audio_file(&path) {
            return Err(ToolFailure::NotAudioFile(path));
        }

        Ok(path)
    }

    fn similar_audio_files(&self, target: &Path, dir: &Path) -> Vec<PathBuf> {
        let Some(target_name) = target.file_name().and_then(|n| n.to_str()) else {
            return Vec::new();
        };

        let mut scored = Vec::new();
        collect_similar(dir, target_name, self.threshold, &mut scored);
        scored.sort_by(|a, b| b.1.cmp(&a.1));

        scored
            .into_iter()
            .take(self.max_suggestions)
            .map(|(path, _)| path)
            .filter(|path| is_audio_file(path))
            .collect()
    }
}

pub fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| AUDIO_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

fn collect_similar(dir: &Path, target_name: &str, threshold: u8, out: &mut Vec<(PathBuf, u8)>) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            tracing::debug!(dir = %dir.display(), error = %err, "skip unreadable dir");
            return;
        }
    };

    for entry in entries.flatten() {
        let Ok(file_type) = entry.file_type() else {
            continue;
        };
        let path = entry.path();
        if file_type.is_dir() {
            collect_similar(&path, target_name, threshold, out);
            continue;
        }
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        let score = token_sort_ratio(target_name, name);
        if score >= threshold {
            out.push((path, score));
        }
    }
}

/// Similarity in `0..=100` of two names after lowercasing, splitting on
/// non-alphanumerics and sorting the tokens. The score is the Indel ratio
/// `2 * lcs / (len_a + len_b)`.
pub fn token_sort_ratio(a: &str, b: &str) -> u8 {
    let a: Vec<char> = sorted_tokens(a).chars().collect();
    let b: Vec<char> = sorted_tokens(b).chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 0;
    }
    let ratio = 2.0 * lcs_len(&a, &b) as f64 / total as f64;
    (ratio * 100.0).round() as u8
}

fn lcs_len(a: &[char], b: &[char]) -> usize {
    let mut row = vec![0usize; b.len() + 1];
    for &ca in a {
        let mut diag = 0;
        for (j, &cb) in b.iter().enumerate() {
            let up = row[j + 1];
            row[j + 1] = if ca == cb { diag + 1 } else { up.max(row[j]) };
            diag = up;
        }
    }
    row[b.len()]
}

fn sorted_tokens(s: &str) -> String {
    let lowered = s.to_lowercase();
    let mut tokens: Vec<&str> = lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .collect();
    tokens.sort_unstable();
    tokens.join(" ")
}
