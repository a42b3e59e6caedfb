/*!
 * # PodTagger - Automated podcast ID3 tagger
 *
 * Reads a `shownotes.raw[.md]` file (Markdown with YAML front-matter) that sits
 * next to an MP3, applies the metadata through configurable title templates
 * to the MP3's ID3 tags, and writes a rendered `shownotes.md`.
 *
 * ## Features
 *
 * - YAML configuration with a `default` profile and per-podcast overrides
 * - Front-matter merged over the configuration profile
 * - `%%key%%` title templates for the ID3 title and the show notes heading
 * - Title taken from the first Markdown heading when none is given
 * - Tagging through `mid3v2` from the Python mutagen package
 * - Optional duration and file size comment in the rendered show notes
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration file loading and profile resolution
 * - `shownotes`: Show notes discovery and front-matter parsing
 * - `metadata`: Ordered key/value metadata and merging
 * - `template`: `%%key%%` template expansion
 * - `episode`: Validation of the merged metadata
 * - `tagger`: ID3 frame set and tagger command
 * - `probe`: Media duration and size
 * - `writer`: Rendered show notes and file manager reveal
 * - `process`: External program execution:
 *   - `process::system`: Runs programs on the host
 *   - `process::mock`: Recording runner for tests
 * - `status`: Styled status output on stderr
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod episode;
pub mod errors;
pub mod file_utils;
pub mod metadata;
pub mod probe;
pub mod process;
pub mod shownotes;
pub mod status;
pub mod tagger;
pub mod template;
pub mod writer;

// Re-export main types for easier usage
pub use app_config::ConfigFile;
pub use app_controller::{Controller, RunOptions, RunReport};
pub use episode::Episode;
pub use errors::{AppError, ConfigError, ProbeError, ShowNotesError, TagError, TemplateError, ValidationError};
pub use metadata::Metadata;
pub use shownotes::ShowNotes;
pub use status::{OutputStyle, StatusLogger};
