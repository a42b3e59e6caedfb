/*!
 * Common test utilities for the podtagger test suite
 */

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Configuration with a default profile and one podcast profile
pub const SAMPLE_CONFIG: &str = r###"default:
  podcast: Overtired
  host: Brett Terpstra
  network: ''
  title_format: "%%title%% with %%guest%%"
  ep_title_format: "%%title%% with %%guest%% - %%podcast%% %%episode%%"
  logo: /art/default.jpg
  include_metadata: false

Overtired:
  logo: /art/overtired.jpg

Systematic:
  host: Brett
  network: Relay
  title_format: "## %%title%%"
  ep_title_format: "%%podcast%% %%episode%%: %%title%%"
  logo: /art/systematic.jpg
"###;

/// Show notes with front-matter and a heading used as the title
pub const SAMPLE_NOTES: &str = r#"---
podcast: Systematic
description: Talking about bugs
episode: 3
date: 2020-05-01
---

# Episode 12: Thing

First paragraph.

## Links

- [Example](https://example.com)
"#;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Writes `SAMPLE_CONFIG` as `podtagger.yaml` in `dir`
pub fn create_test_config(dir: &Path) -> Result<PathBuf> {
    create_test_file(dir, "podtagger.yaml", SAMPLE_CONFIG)
}

/// Creates an episode directory holding an empty MP3 and the given raw notes
pub fn create_test_episode(dir: &Path, notes: &str) -> Result<PathBuf> {
    let episode_dir = dir.join("episode");
    fs::create_dir_all(&episode_dir)?;
    create_test_file(&episode_dir, "shownotes.raw.md", notes)?;
    create_test_file(&episode_dir, "episode.mp3", "")
}
