//! Handler-side plumbing shared by the file-producing tools.
//!
//! The remote API calls live elsewhere; this module decides where their
//! results land and enforces the argument checks the handlers share.

use crate::config::Config;
use crate::error::{ToolFailure, ToolResult};
use crate::input::InputResolver;
use crate::output::{FileNamer, PathResolver, ResolvedOutputPath, WriteTarget};
use crate::text;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

pub const SOUND_EFFECT_DURATION: RangeInclusive<f64> = 0.5..=5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    #[value(name = "tts", alias = "text-to-speech")]
    TextToSpeech,
    #[value(name = "stt", alias = "speech-to-text")]
    SpeechToText,
    #[value(name = "sfx", alias = "sound-effects")]
    SoundEffects,
    #[value(name = "iso", alias = "isolate-audio")]
    AudioIsolation,
}

impl Tool {
    pub fn tag(self) -> &'static str {
        match self {
            Tool::TextToSpeech => "tts",
            Tool::SpeechToText => "stt",
            Tool::SoundEffects => "sfx",
            Tool::AudioIsolation => "iso",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Tool::SpeechToText => "txt",
            Tool::TextToSpeech | Tool::SoundEffects | Tool::AudioIsolation => "mp3",
        }
    }
}

/// Where a transcript goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    File,
    Client,
    Both,
}

impl Delivery {
    pub fn from_flags(save_to_file: bool, return_to_client: bool) -> ToolResult<Self> {
        match (save_to_file, return_to_client) {
            (true, true) => Ok(Delivery::Both),
            (true, false) => Ok(Delivery::File),
            (false, true) => Ok(Delivery::Client),
            (false, false) => Err(ToolFailure::NoDestinationSpecified),
        }
    }

    pub fn writes_file(self) -> bool {
        matches!(self, Delivery::File | Delivery::Both)
    }
}

pub fn validate_sound_effect_duration(seconds: f64) -> ToolResult<f64> {
    if !SOUND_EFFECT_DURATION.contains(&seconds) {
        return Err(ToolFailure::InvalidArgument(format!(
            "Duration must be between {} and {} seconds",
            SOUND_EFFECT_DURATION.start(),
            SOUND_EFFECT_DURATION.end()
        )));
    }
    Ok(seconds)
}

/// Per-process view handlers use for every invocation.
///
/// Built once from [`Config`]; the base path it carries is read at start and
/// passed to the resolver on each call.
#[derive(Debug, Clone)]
pub struct ToolContext {
    paths: PathResolver,
    config: Config,
}

impl ToolContext {
    pub fn new(paths: PathResolver, config: Config) -> Self {
        Self { paths, config }
    }

    pub fn from_env(config: Config) -> ToolResult<Self> {
        Ok(Self::new(PathResolver::from_env()?, config))
    }

    pub fn paths(&self) -> &PathResolver {
        &self.paths
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn resolve_output_dir(&self, requested: &str) -> ToolResult<ResolvedOutputPath> {
        self.paths.resolve(requested, self.config.base_path())
    }

    pub fn input_file(&self, raw: &str, audio_content_check: bool) -> ToolResult<PathBuf> {
        InputResolver::new(&self.paths, &self.config).resolve(raw, audio_content_check)
    }

    /// Resolve the directory, then name the artifact inside it.
    pub fn prepare_output(
        &self,
        tool: Tool,
        text: &str,
        requested_dir: &str,
        full_id: bool,
    ) -> ToolResult<WriteTarget> {
        let dir = self.resolve_output_dir(requested_dir)?;
        let name = FileNamer::new()
            .full_id(full_id)
            .unique(self.config.unique_names)
            .name(tool.tag(), text, tool.extension());
        Ok(dir.join(&name))
    }

    /// Same as [`prepare_output`](Self::prepare_output) but names the artifact
    /// after an input file, as transcription and isolation do.
    pub fn prepare_output_for_input(
        &self,
        tool: Tool,
        input: &Path,
        requested_dir: &str,
    ) -> ToolResult<WriteTarget> {
        let stem = input
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.prepare_output(tool, &stem, requested_dir, false)
    }

    /// Save and/or hand back a finished transcript of `input`.
    ///
    /// Transcripts returned to the client that exceed `max_text_length` are
    /// parked in a temp file and replaced by a pointer message.
    pub fn deliver_transcript(
        &self,
        transcript: &str,
        input: &Path,
        delivery: Delivery,
        requested_dir: &str,
    ) -> ToolResult<String> {
        let mut saved = None;
        if delivery.writes_file() {
            let target = self.prepare_output_for_input(Tool::SpeechToText, input, requested_dir)?;
            write_artifact(&target, transcript.as_bytes())?;
            saved = Some(target);
        }

        match (delivery, saved) {
            (Delivery::File, Some(target)) => {
                Ok(format!("Transcription saved to {}", target.as_path().display()))
            }
            _ => text::handle_large_text(transcript, self.config.max_text_length, "transcript"),
        }
    }
}

/// Write one artifact. Not atomic; an interrupted write leaves a partial file.
pub fn write_artifact(target: &WriteTarget, bytes: &[u8]) -> ToolResult<()> {
    let target = target.as_path();
    fs::write(target, bytes).map_err(|err| {
        tracing::warn!(path = %target.display(), error = %err, "artifact write failed");
        ToolFailure::Message(format!("Failed to write file ({}): {err}", target.display()))
    })?;
    tracing::debug!(path = %target.display(), bytes = bytes.len(), "artifact written");
    Ok(())
}
