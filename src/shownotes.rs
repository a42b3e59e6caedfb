use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_yaml::Value;
use std::path::{Path, PathBuf};

use crate::errors::ShowNotesError;
use crate::file_utils::FileManager;
use crate::metadata::Metadata;

// @module: Show notes source discovery and front-matter parsing

/// Candidate source files, in search order
pub const SOURCE_CANDIDATES: [&str; 2] = ["shownotes.raw", "shownotes.raw.md"];

/// Rendered show notes, also the fallback source
pub const OUTPUT_FILE: &str = "shownotes.md";

static LEADING_FRONT_MATTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?ms)\A\s*---[ \t]*\r?\n(.*?)^---[ \t]*\r?$").unwrap());

static HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^#{1,2} ([^\r\n]*)(?:(?:\r?\n)+|\z)").unwrap());

/// Show notes split into front-matter and Markdown body
#[derive(Debug, Clone)]
pub struct ShowNotes {
    /// File the notes were read from
    pub source: PathBuf,

    /// Parsed front-matter; empty when the file has none
    pub front_matter: Metadata,

    /// Markdown body with the front-matter removed
    pub body: String,
}

impl ShowNotes {
    /// Locate the show notes source in `dir` and parse it.
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self, ShowNotesError> {
        let source = locate_source(dir)?;
        let content = FileManager::read_to_string(&source).map_err(|source_err| ShowNotesError::Io {
            path: source.clone(),
            source: source_err,
        })?;
        Self::parse(source, &content)
    }

    /// Split `content` into front-matter and body.
    pub fn parse(source: PathBuf, content: &str) -> Result<Self, ShowNotesError> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let (front_matter, rest) = match LEADING_FRONT_MATTER.captures(content) {
            Some(caps) => {
                let end = caps.get(0).map_or(0, |m| m.end());
                (parse_front_matter(&source, &caps[1])?, &content[end..])
            }
            None => {
                debug!("No front-matter found in {:?}", source);
                (Metadata::new(), content)
            }
        };

        let body = rest.trim_start_matches(['\r', '\n']).to_string();

        Ok(Self {
            source,
            front_matter,
            body,
        })
    }

    /// Take the title from the first level 1 or 2 heading, removing it from the body.
    pub fn take_heading_title(&mut self) -> Option<String> {
        let caps = HEADING.captures(&self.body)?;
        let title = caps[1].trim_end().to_string();
        let range = caps.get(0)?.range();
        self.body.replace_range(range, "");
        Some(title)
    }
}

/// Find the show notes source in `dir`.
///
/// `shownotes.raw` wins over `shownotes.raw.md`. When neither exists an
/// existing `shownotes.md` is copied to `shownotes.raw.md` and used, so the
/// rendered output never overwrites the only copy of the source.
pub fn locate_source<P: AsRef<Path>>(dir: P) -> Result<PathBuf, ShowNotesError> {
    let dir = dir.as_ref();

    if let Some(found) = SOURCE_CANDIDATES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| FileManager::file_exists(path))
    {
        debug!("Using show notes source {:?}", found);
        return Ok(found);
    }

    let rendered = dir.join(OUTPUT_FILE);
    if FileManager::file_exists(&rendered) {
        let raw = dir.join(SOURCE_CANDIDATES[1]);
        debug!("Copying {:?} to {:?}", rendered, raw);
        FileManager::copy_file(&rendered, &raw).map_err(|source| ShowNotesError::Io {
            path: raw.clone(),
            source,
        })?;
        return Ok(raw);
    }

    Err(ShowNotesError::NoSource {
        dir: dir.to_path_buf(),
    })
}

fn parse_front_matter(source: &Path, block: &str) -> Result<Metadata, ShowNotesError> {
    let invalid = |reason: String| ShowNotesError::FrontMatter {
        path: source.to_path_buf(),
        reason,
    };

    if block.trim().is_empty() {
        return Ok(Metadata::new());
    }

    let value: Value = serde_yaml::from_str(block).map_err(|e| invalid(e.to_string()))?;
    Metadata::from_value(value).ok_or_else(|| invalid("front-matter is not a key/value mapping".to_string()))
}
