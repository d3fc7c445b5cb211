use chrono::{DateTime, Local};
use rand::distributions::Alphanumeric;
use rand::Rng;
use regex::Regex;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;

const FRAGMENT_CHARS: usize = 5;
const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Leaf name of an artifact. Never contains a path separator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GeneratedFileName(String);

impl GeneratedFileName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GeneratedFileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for GeneratedFileName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// `{tag}_{fragment}_{YYYYMMDD_HHMMSS}.{extension}` for the current local time.
///
/// Two calls with the same tag and text inside the same second return the
/// same name. Use [`FileNamer::unique`] when that matters.
pub fn make_file_name(tag: &str, text: &str, extension: &str) -> GeneratedFileName {
    FileNamer::new().name(tag, text, extension)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FileNamer {
    full_id: bool,
    unique: bool,
}

impl FileNamer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the whole text instead of its first five characters.
    pub fn full_id(mut self, full_id: bool) -> Self {
        self.full_id = full_id;
        self
    }

    /// Append a per-call token so names from the same second differ.
    pub fn unique(mut self, unique: bool) -> Self {
        self.unique = unique;
        self
    }

    pub fn name(&self, tag: &str, text: &str, extension: &str) -> GeneratedFileName {
        self.name_at(tag, text, extension, Local::now())
    }

    pub fn name_at(
        &self,
        tag: &str,
        text: &str,
        extension: &str,
        at: DateTime<Local>,
    ) -> GeneratedFileName {
        let fragment: String = if self.full_id {
            text.to_string()
        } else {
            text.chars().take(FRAGMENT_CHARS).collect()
        };
        let timestamp = at.format(TIMESTAMP_FORMAT);
        let extension = sanitize(extension.trim_start_matches('.'));

        let mut name = format!("{}_{}_{}", sanitize(tag), sanitize(&fragment), timestamp);
        if self.unique {
            name.push('_');
            name.push_str(&unique_token());
        }
        name.push('.');
        name.push_str(&extension);
        GeneratedFileName(name)
    }
}

fn sanitize(part: &str) -> String {
    static UNSAFE: OnceLock<Regex> = OnceLock::new();
    let re = UNSAFE.get_or_init(|| {
        Regex::new(r#"[\s/\\:*?"<>|\x00-\x1f\x7f]"#).expect("static pattern compiles")
    });
    re.replace_all(part, "_").into_owned()
}

fn unique_token() -> String {
    let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);
    let noise: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(4)
        .map(char::from)
        .collect();
    format!("{noise}{seq}")
}
