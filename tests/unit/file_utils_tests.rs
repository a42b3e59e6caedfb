/*!
 * Tests for file and folder utilities
 */

use anyhow::Result;
use std::fs;
use std::path::PathBuf;
use podtagger::file_utils::FileManager;
use crate::common;

/// Test writing creates missing parent directories
#[test]
fn test_write_to_file_withMissingParents_shouldCreateThem() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("a").join("b").join("notes.md");

    FileManager::write_to_file(&path, "content")?;

    assert!(FileManager::file_exists(&path));
    assert_eq!(FileManager::read_to_string(&path)?, "content");
    Ok(())
}

/// Test copying a file
#[test]
fn test_copy_file_withExistingSource_shouldCopyContent() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let source = common::create_test_file(temp_dir.path(), "shownotes.md", "notes")?;
    let target = temp_dir.path().join("shownotes.raw.md");

    FileManager::copy_file(&source, &target)?;

    assert_eq!(fs::read_to_string(&target)?, "notes");
    assert!(source.exists());
    Ok(())
}

/// Test copying a missing file fails
#[test]
fn test_copy_file_withMissingSource_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;

    let result = FileManager::copy_file(temp_dir.path().join("nope"), temp_dir.path().join("copy"));

    assert_eq!(result.unwrap_err().kind(), std::io::ErrorKind::NotFound);
    Ok(())
}

/// Test that a directory is not a file
#[test]
fn test_file_exists_withDirectory_shouldBeFalse() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    assert!(!FileManager::file_exists(temp_dir.path()));
    Ok(())
}

/// Test tilde expansion and absolutizing relative paths
#[test]
fn test_expand_path_shouldExpandHomeAndRelative() {
    if let Some(home) = dirs::home_dir() {
        assert_eq!(FileManager::expand_path("~/art/logo.jpg"), home.join("art/logo.jpg"));
        assert_eq!(FileManager::expand_path("~"), home);
    }

    let cwd = std::env::current_dir().unwrap();
    assert_eq!(FileManager::expand_path("art/logo.jpg"), cwd.join("art/logo.jpg"));
    assert_eq!(FileManager::expand_path("/art/logo.jpg"), PathBuf::from("/art/logo.jpg"));
    assert_eq!(FileManager::expand_path("~user/x"), cwd.join("~user/x"));
}

/// Test extension matching ignores case
#[test]
fn test_has_extension_shouldIgnoreCase() {
    assert!(FileManager::has_extension("episode.mp3", "mp3"));
    assert!(FileManager::has_extension("EPISODE.MP3", "mp3"));
    assert!(!FileManager::has_extension("episode.m4a", "mp3"));
    assert!(!FileManager::has_extension("mp3", "mp3"));
}

/// Test the execute bit check
#[cfg(unix)]
#[test]
fn test_is_executable_withModeBits_shouldCheckExecuteBit() -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = common::create_temp_dir()?;
    let script = common::create_test_file(temp_dir.path(), "tool", "#!/bin/sh\n")?;

    fs::set_permissions(&script, fs::Permissions::from_mode(0o644))?;
    assert!(!FileManager::is_executable(&script));

    fs::set_permissions(&script, fs::Permissions::from_mode(0o755))?;
    assert!(FileManager::is_executable(&script));
    assert!(!FileManager::is_executable(temp_dir.path()));
    Ok(())
}
