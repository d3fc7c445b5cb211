use audioforge::output::{make_file_name, FileNamer};
use chrono::{Local, TimeZone};
use regex::Regex;
use std::collections::HashSet;
use std::path::Path;

fn fixed_time() -> chrono::DateTime<Local> {
    Local.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).single().unwrap()
}

#[test]
fn name_has_tag_fragment_timestamp_and_extension() {
    let name = make_file_name("tts", "Hello world", "mp3");
    let pattern = Regex::new(r"^tts_Hello_\d{8}_\d{6}\.mp3$").unwrap();
    assert!(pattern.is_match(name.as_str()), "{name}");
}

#[test]
fn fragment_keeps_first_five_chars_and_underscores_spaces() {
    let name = FileNamer::new().name_at("sfx", "a b cdefg", "mp3", fixed_time());
    assert_eq!(name.as_str(), "sfx_a_b_c_20240506_070809.mp3");
}

#[test]
fn truncation_counts_characters_not_bytes() {
    let name = FileNamer::new().name_at("tts", "héllo wörld", "mp3", fixed_time());
    assert_eq!(name.as_str(), "tts_héllo_20240506_070809.mp3");
}

#[test]
fn full_id_uses_whole_text() {
    let name = FileNamer::new()
        .full_id(true)
        .name_at("stt", "meeting notes.wav", "txt", fixed_time());
    assert_eq!(name.as_str(), "stt_meeting_notes.wav_20240506_070809.txt");
}

#[test]
fn same_second_same_input_collides() {
    let namer = FileNamer::new();
    let first = namer.name_at("tts", "Hello world", "mp3", fixed_time());
    let second = namer.name_at("tts", "Hello world", "mp3", fixed_time());
    assert_eq!(first, second);
}

#[test]
fn unique_names_differ_within_the_same_second() {
    let namer = FileNamer::new().unique(true);
    let pattern = Regex::new(r"^tts_Hello_20240506_070809_[A-Za-z0-9]{4}\d+\.mp3$").unwrap();

    let names: HashSet<String> = (0..500)
        .map(|_| namer.name_at("tts", "Hello world", "mp3", fixed_time()).to_string())
        .collect();

    assert_eq!(names.len(), 500);
    assert!(names.iter().all(|name| pattern.is_match(name)));
}

#[test]
fn name_never_contains_a_path_separator() {
    let cases = [
        ("tts", "../../etc/passwd", "mp3"),
        ("tts", "a\\b\\c", "mp3"),
        ("t/s", "/abs", "../mp3"),
        ("iso", "\0\n\t x", ".mp3"),
    ];
    for (tag, text, ext) in cases {
        let name = FileNamer::new().name_at(tag, text, ext, fixed_time());
        let s = name.as_str();
        assert!(!s.contains('/') && !s.contains('\\'), "{s}");
        assert_eq!(Path::new(s).components().count(), 1, "{s}");
        assert_eq!(Path::new(s).file_name().unwrap(), s, "{s}");
    }
}

#[test]
fn leading_dot_on_extension_is_dropped() {
    let name = FileNamer::new().name_at("iso", "clip", ".mp3", fixed_time());
    assert_eq!(name.as_str(), "iso_clip_20240506_070809.mp3");
}
