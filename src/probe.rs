use log::debug;
use std::path::Path;

use crate::errors::ProbeError;
use crate::process::{Invocation, ProcessOutput, ProcessRunner};

// @module: Duration and size of the target media file

/// External utility used to query media metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeTool {
    /// Spotlight metadata (`mdls`), available on macOS
    Mdls,
    /// FFmpeg's `ffprobe`
    FfProbe,
}

impl ProbeTool {
    // @returns: The probe utility available on this platform
    pub fn for_platform() -> Self {
        if cfg!(target_os = "macos") {
            Self::Mdls
        } else {
            Self::FfProbe
        }
    }

    pub fn program(&self) -> &'static str {
        match self {
            Self::Mdls => "mdls",
            Self::FfProbe => "ffprobe",
        }
    }

    /// Invocations needed to read duration and size
    pub fn invocations(&self, media: &Path) -> Vec<Invocation> {
        match self {
            Self::Mdls => ["kMDItemDurationSeconds", "kMDItemLogicalSize"]
                .into_iter()
                .map(|attribute| {
                    Invocation::new(self.program())
                        .args(["-raw", "-name", attribute])
                        .arg(media)
                })
                .collect(),
            Self::FfProbe => vec![
                Invocation::new(self.program())
                    .args([
                        "-v",
                        "error",
                        "-show_entries",
                        "format=duration,size",
                        "-of",
                        "default=noprint_wrappers=1",
                    ])
                    .arg(media),
            ],
        }
    }
}

/// Facts about the target media file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaProbe {
    /// Duration in whole seconds
    pub seconds: u64,

    /// Duration formatted as `HH:MM:SS`
    pub stamp: String,

    /// Size in bytes, as reported by the probe
    pub size: String,
}

impl MediaProbe {
    pub fn new(seconds: u64, size: String) -> Self {
        Self {
            seconds,
            stamp: format_stamp(seconds),
            size,
        }
    }

    /// Probe `media` with `tool` through `runner`.
    pub fn probe<R: ProcessRunner>(runner: &R, tool: ProbeTool, media: &Path) -> Result<Self, ProbeError> {
        let outputs = tool
            .invocations(media)
            .iter()
            .map(|invocation| run_probe(runner, tool, invocation))
            .collect::<Result<Vec<_>, _>>()?;

        let (duration, size) = match tool {
            ProbeTool::Mdls => (
                outputs[0].stdout.trim().to_string(),
                outputs[1].stdout.trim().to_string(),
            ),
            ProbeTool::FfProbe => parse_ffprobe(&outputs[0].stdout),
        };
        debug!("Probe of {:?}: duration={} size={}", media, duration, size);

        let seconds = parse_seconds(&duration)?;
        let size = parse_size(&size)?;
        Ok(Self::new(seconds, size))
    }

    /// HTML comment block written at the top of the show notes
    pub fn comment_block(&self) -> String {
        [
            "<!-- Metadata".to_string(),
            format!("Duration Seconds: {}", self.seconds),
            format!("Duration: {}", self.stamp),
            format!("Filesize: {}", self.size),
            "-->".to_string(),
        ]
        .join("\n")
    }
}

fn run_probe<R: ProcessRunner>(
    runner: &R,
    tool: ProbeTool,
    invocation: &Invocation,
) -> Result<ProcessOutput, ProbeError> {
    let output = runner.run(invocation).map_err(|source| ProbeError::Unavailable {
        tool: tool.program().to_string(),
        source,
    })?;

    if !output.is_success() {
        return Err(ProbeError::Failed {
            tool: tool.program().to_string(),
            stderr: output.stderr.trim().to_string(),
        });
    }
    Ok(output)
}

fn parse_ffprobe(stdout: &str) -> (String, String) {
    let mut duration = String::new();
    let mut size = String::new();
    for line in stdout.lines() {
        match line.trim().split_once('=') {
            Some(("duration", value)) => duration = value.trim().to_string(),
            Some(("size", value)) => size = value.trim().to_string(),
            _ => {}
        }
    }
    (duration, size)
}

/// Parse a duration in (fractional) seconds, rounded to the nearest second.
pub fn parse_seconds(raw: &str) -> Result<u64, ProbeError> {
    let unparseable = || ProbeError::Unparseable {
        field: "duration",
        output: raw.to_string(),
    };

    let seconds: f64 = raw.trim().parse().map_err(|_| unparseable())?;
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(unparseable());
    }
    Ok(seconds.round() as u64)
}

fn parse_size(raw: &str) -> Result<String, ProbeError> {
    let trimmed = raw.trim();
    trimmed
        .parse::<u64>()
        .map(|bytes| bytes.to_string())
        .map_err(|_| ProbeError::Unparseable {
            field: "size",
            output: raw.to_string(),
        })
}

/// Format seconds as `HH:MM:SS`
pub fn format_stamp(seconds: u64) -> String {
    format!("{:02}:{:02}:{:02}", seconds / 3600, seconds / 60 % 60, seconds % 60)
}
