use crate::error::{ToolFailure, ToolResult};
use std::io::Write;

/// Return `text` as-is, or park it in a temp file when it is longer than
/// `max_length` characters and return a pointer message instead.
pub fn handle_large_text(text: &str, max_length: usize, content_type: &str) -> ToolResult<String> {
    if text.chars().count() <= max_length {
        return Ok(text.to_string());
    }

    let mut temp = tempfile::Builder::new()
        .prefix("audioforge-")
        .suffix(".txt")
        .tempfile()
        .map_err(|err| write_failure(content_type, &err))?;
    temp.write_all(text.as_bytes())
        .map_err(|err| write_failure(content_type, &err))?;
    let (_, path) = temp
        .keep()
        .map_err(|err| write_failure(content_type, &err.error))?;

    tracing::debug!(path = %path.display(), len = text.len(), "large text saved to temp file");
    Ok(format!(
        "{} saved to temporary file: {}\nUse the Read tool to access the full {}.",
        capitalize(content_type),
        path.display(),
        content_type
    ))
}

fn write_failure(content_type: &str, err: &std::io::Error) -> ToolFailure {
    ToolFailure::Message(format!("Failed to save {content_type} to a temporary file: {err}"))
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_passes_through() {
        assert_eq!(handle_large_text("hello", 5, "transcript").unwrap(), "hello");
    }

    #[test]
    fn long_text_is_parked_in_temp_file() {
        let text = "word ".repeat(50);
        let message = handle_large_text(&text, 10, "transcript").unwrap();
        assert!(message.starts_with("Transcript saved to temporary file: "));
        assert!(message.ends_with("Use the Read tool to access the full transcript."));

        let path = message
            .lines()
            .next()
            .and_then(|line| line.strip_prefix("Transcript saved to temporary file: "))
            .unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), text);
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn capitalize_matches_sentence_case() {
        assert_eq!(capitalize("cONTENT"), "Content");
        assert_eq!(capitalize(""), "");
    }
}
