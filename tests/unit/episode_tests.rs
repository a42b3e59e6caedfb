/*!
 * Tests for episode validation and title resolution
 */

use anyhow::Result;
use std::path::PathBuf;
use podtagger::errors::{AppError, TemplateError, ValidationError};
use podtagger::{ConfigFile, Episode, Metadata, ShowNotes};
use crate::common;

const COMPLETE: &str = r###"podcast: Overtired
host: Brett
network: ''
description: Talking about bugs
episode: 12
title: Bugs
guest: Jane
date: 2020-05-01
logo: /art/logo.jpg
title_format: "## %%title%% with %%guest%%"
ep_title_format: "%%title%% with %%guest%% - %%podcast%% %%episode%%"
"###;

fn metadata(yaml: &str) -> Metadata {
    Metadata::from_value(serde_yaml::from_str(yaml).expect("valid yaml")).expect("mapping")
}

fn notes(body: &str) -> ShowNotes {
    ShowNotes::parse(PathBuf::from("shownotes.raw"), body).expect("notes should parse")
}

fn without(yaml: &str, key: &str) -> String {
    yaml.lines()
        .filter(|line| !line.starts_with(&format!("{}:", key)))
        .map(|line| format!("{}\n", line))
        .collect()
}

/// Test that complete metadata resolves both titles
#[test]
fn test_resolve_withCompleteMetadata_shouldResolveTitles() -> Result<()> {
    let mut meta = metadata(COMPLETE);
    let mut notes = notes("Body\n");

    let episode = Episode::resolve(&mut meta, &mut notes)?;

    assert_eq!(episode.ep_title, "Bugs with Jane - Overtired 12");
    assert_eq!(episode.display_title, "## Bugs with Jane");
    assert_eq!(episode.episode, "12");
    assert_eq!(episode.year, "2020");
    assert_eq!(episode.logo, PathBuf::from("/art/logo.jpg"));
    assert_eq!(notes.body, "Body\n");
    Ok(())
}

/// Test that a blank network falls back to the host
#[test]
fn test_resolve_withBlankNetwork_shouldUseHost() -> Result<()> {
    let mut meta = metadata(&COMPLETE.replace("host: Brett", "host: Jane"));
    let episode = Episode::resolve(&mut meta, &mut notes("Body\n"))?;

    assert_eq!(episode.network, "Jane");
    assert_eq!(episode.host, "Jane");
    Ok(())
}

/// Test that every required key is reported when absent
#[test]
fn test_resolve_withMissingRequiredKey_shouldNameIt() {
    let cases = [
        ("podcast", "No podcast specified (podcast)"),
        ("description", "No description provided (description)"),
        ("episode", "No episode number specified (episode)"),
        ("logo", "No logo specified (logo)"),
        ("host", "No host specified (host)"),
    ];

    for (key, message) in cases {
        let mut meta = metadata(&without(COMPLETE, key));
        let err = Episode::resolve(&mut meta, &mut notes("Body\n")).unwrap_err();

        assert!(
            matches!(&err, AppError::Validation(ValidationError::MissingKey { key: k, .. }) if *k == key),
            "unexpected error for {}: {:?}",
            key,
            err
        );
        assert_eq!(err.to_string(), message);
    }
}

/// Test that the heading supplies the title when metadata has none
#[test]
fn test_resolve_withoutTitle_shouldTakeHeadingAndRemoveIt() -> Result<()> {
    let mut meta = metadata(&without(COMPLETE, "title"));
    let mut notes = notes("# Episode 12: Thing\n\nFirst paragraph.\n");

    let episode = Episode::resolve(&mut meta, &mut notes)?;

    assert_eq!(episode.title, "Episode 12: Thing");
    assert_eq!(episode.display_title, "## Episode 12: Thing with Jane");
    assert_eq!(meta.get_string("title").as_deref(), Some("Episode 12: Thing"));
    assert_eq!(notes.body, "First paragraph.\n");
    Ok(())
}

/// Test that an explicit title leaves the heading in the body
#[test]
fn test_resolve_withExplicitTitle_shouldKeepHeading() -> Result<()> {
    let mut meta = metadata(COMPLETE);
    let mut notes = notes("# A heading\n\nText\n");

    let episode = Episode::resolve(&mut meta, &mut notes)?;

    assert_eq!(episode.title, "Bugs");
    assert_eq!(notes.body, "# A heading\n\nText\n");
    Ok(())
}

/// Test that a missing title with no heading is an error
#[test]
fn test_resolve_withoutTitleOrHeading_shouldFail() {
    let mut meta = metadata(&without(COMPLETE, "title"));

    let err = Episode::resolve(&mut meta, &mut notes("No heading here\n")).unwrap_err();

    assert_eq!(err.to_string(), "No title specified (title)");
}

/// Test that an unresolved placeholder names the key and format
#[test]
fn test_resolve_withMissingGuest_shouldFailWithTemplateError() {
    let mut meta = metadata(&without(COMPLETE, "guest"));

    let err = Episode::resolve(&mut meta, &mut notes("Body\n")).unwrap_err();

    match err {
        AppError::Template(TemplateError::MissingValue { key, template }) => {
            assert_eq!(key, "guest");
            assert_eq!(template, "ep_title_format");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

/// Test that a missing format is reported
#[test]
fn test_resolve_withoutTitleFormat_shouldFail() {
    let mut meta = metadata(&without(COMPLETE, "title_format"));

    let err = Episode::resolve(&mut meta, &mut notes("Body\n")).unwrap_err();

    assert_eq!(err.to_string(), "No title format specified (title_format)");
}

/// Test that an unparseable date is rejected
#[test]
fn test_resolve_withInvalidDate_shouldFail() {
    let mut meta = metadata(&COMPLETE.replace("date: 2020-05-01", "date: someday"));

    let err = Episode::resolve(&mut meta, &mut notes("Body\n")).unwrap_err();

    assert!(matches!(err, AppError::Validation(ValidationError::InvalidDate(_))));
}

/// Test that a year key is used when no date is given
#[test]
fn test_resolve_withYearOnly_shouldUseYear() -> Result<()> {
    let mut meta = metadata(&without(COMPLETE, "date"));
    meta.insert("year", "2019");

    let episode = Episode::resolve(&mut meta, &mut notes("Body\n"))?;

    assert_eq!(episode.year, "2019");
    Ok(())
}

/// Test resolution against the sample configuration and notes
#[test]
fn test_resolve_withSampleConfigAndNotes_shouldUseSystematicFormats() -> Result<()> {
    let config = ConfigFile::parse("podtagger.yaml", common::SAMPLE_CONFIG)?;
    let mut notes = ShowNotes::parse(PathBuf::from("shownotes.raw.md"), common::SAMPLE_NOTES)?;
    let mut meta = config
        .resolve(notes.front_matter.get_string("podcast").as_deref())?
        .merged_with(&notes.front_matter);

    let episode = Episode::resolve(&mut meta, &mut notes)?;

    assert_eq!(episode.ep_title, "Systematic 3: Episode 12: Thing");
    assert_eq!(episode.display_title, "## Episode 12: Thing");
    assert_eq!(episode.network, "Relay");
    assert_eq!(episode.host, "Brett");
    assert!(notes.body.starts_with("First paragraph."));
    Ok(())
}
