/*!
 * Error types for the podtagger application.
 *
 * This module contains custom error types for the different stages of a run,
 * using the thiserror crate for ergonomic error definitions.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading the configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No configuration file existed, a skeleton was written in its place
    #[error("Skeleton config written, please edit file {}", path.display())]
    SkeletonWritten {
        /// Location of the new skeleton
        path: PathBuf,
    },

    /// The file exists but has no `default` profile
    #[error("Missing default configuration in {}", path.display())]
    MissingDefault {
        /// Location of the configuration file
        path: PathBuf,
    },

    /// `default.podcast` names a profile that does not exist
    #[error("No configuration for {podcast}. Please edit {}", path.display())]
    MissingProfile {
        /// Podcast name that has no profile
        podcast: String,
        /// Location of the configuration file
        path: PathBuf,
    },

    /// Reading or writing the file failed
    #[error("Failed to access config file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid YAML
    #[error("Failed to parse config file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Errors that can occur while locating or reading show notes
#[derive(Error, Debug)]
pub enum ShowNotesError {
    /// None of the candidate source files exist
    #[error("No shownotes.raw file exists in {}", dir.display())]
    NoSource {
        /// Directory that was searched
        dir: PathBuf,
    },

    /// The front-matter block could not be parsed
    #[error("Error reading YAML headers in {}: {reason}", path.display())]
    FrontMatter {
        path: PathBuf,
        /// Diagnostic reported by the YAML parser
        reason: String,
    },

    /// Reading or copying a show notes file failed
    #[error("Failed to access show notes {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised while expanding `%%key%%` templates
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TemplateError {
    /// The named format key is absent from the metadata
    #[error("No title format specified ({template})")]
    MissingFormat {
        /// Name of the format key (`title_format`, `ep_title_format`)
        template: String,
    },

    /// A placeholder references a key with no value
    #[error("Missing value for key '%%{key}%%' in format string ({template})")]
    MissingValue { key: String, template: String },

    /// A placeholder references a nested mapping
    #[error("Value for key '%%{key}%%' in format string ({template}) is not a scalar")]
    NotScalar { key: String, template: String },
}

/// Errors raised while validating episode metadata
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// A required key is missing or empty
    #[error("No {label} ({key})")]
    MissingKey {
        /// Metadata key
        key: &'static str,
        /// Human readable description of what is missing
        label: &'static str,
    },

    /// `date` could not be parsed
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    /// `year` does not contain a four digit year
    #[error("Invalid year format: {0}")]
    InvalidYear(String),
}

/// Errors that can occur while invoking the external tagger
#[derive(Error, Debug)]
pub enum TagError {
    /// The tagging executable could not be found
    #[error(
        "Missing executable. Ensure that {name} exists in your path.\nSee https://mutagen.readthedocs.io/en/latest/man/mid3v2.html for installation help"
    )]
    MissingExecutable { name: String },

    /// The tagging executable could not be started
    #[error("Failed to execute {}", program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that can occur while probing the target media file
#[derive(Error, Debug)]
pub enum ProbeError {
    /// The probe utility could not be started
    #[error("Media probe utility {tool} is unavailable")]
    Unavailable {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    /// The probe utility exited unsuccessfully
    #[error("Media probe {tool} failed: {stderr}")]
    Failed { tool: String, stderr: String },

    /// The probe output could not be interpreted
    #[error("Unexpected {field} value from media probe: '{output}'")]
    Unparseable { field: &'static str, output: String },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from the configuration loader
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Error from the show notes parser
    #[error(transparent)]
    ShowNotes(#[from] ShowNotesError),

    /// Error from template expansion
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// Error from metadata validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Error from the tagger
    #[error(transparent)]
    Tag(#[from] TagError),

    /// Error from the media probe
    #[error(transparent)]
    Probe(#[from] ProbeError),
}
