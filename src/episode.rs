use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime};
use log::info;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::path::PathBuf;

use crate::errors::{AppError, ValidationError};
use crate::file_utils::FileManager;
use crate::metadata::Metadata;
use crate::shownotes::ShowNotes;
use crate::template;

// @module: Validated episode metadata

static FOUR_DIGIT_YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{4}").unwrap());

const DATE_FORMATS: [&str; 7] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
    "%a, %d %b %Y",
    "%A, %B %d, %Y",
];
const OFFSET_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S %z", "%Y-%m-%d %H:%M %z"];
const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"];

/// Metadata of one episode after merging, validation and template resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Episode {
    pub podcast: String,
    pub host: String,
    /// Network name; the host when no network is configured
    pub network: String,
    pub description: String,
    /// Episode number as written in the metadata
    pub episode: String,
    pub title: String,
    /// Absolute path of the artwork
    pub logo: PathBuf,
    /// Recording year
    pub year: String,
    /// Resolved `ep_title_format`, used as the ID3 title
    pub ep_title: String,
    /// Resolved `title_format`, used as the show notes heading
    pub display_title: String,
}

impl Episode {
    /// Validate `metadata` and resolve both title formats.
    ///
    /// When `metadata` has no `title`, the first level 1 or 2 heading of the
    /// notes body becomes the title; it is removed from the body and stored
    /// back in `metadata` so templates can refer to it.
    pub fn resolve(metadata: &mut Metadata, notes: &mut ShowNotes) -> Result<Self, AppError> {
        let year = resolve_year(metadata)?;
        let podcast = required(metadata, "podcast", "podcast specified")?;
        let description = required(metadata, "description", "description provided")?;
        let episode = required(metadata, "episode", "episode number specified")?;

        let title = match metadata.get_string("title") {
            Some(title) => title,
            None => {
                let title = notes.take_heading_title().ok_or(ValidationError::MissingKey {
                    key: "title",
                    label: "title specified",
                })?;
                info!("=> [Title taken from h1: {}]", title);
                metadata.insert("title", title.as_str());
                title
            }
        };

        let logo = FileManager::expand_path(&required(metadata, "logo", "logo specified")?);
        let host = required(metadata, "host", "host specified")?;
        let network = resolve_network(metadata, &host);

        let ep_title = template::resolve_format(metadata, "ep_title_format")?;
        let display_title = template::resolve_format(metadata, "title_format")?;

        Ok(Self {
            podcast,
            host,
            network,
            description,
            episode,
            title,
            logo,
            year,
            ep_title,
            display_title,
        })
    }
}

fn required(metadata: &Metadata, key: &'static str, label: &'static str) -> Result<String, ValidationError> {
    metadata
        .get_string(key)
        .ok_or(ValidationError::MissingKey { key, label })
}

/// Network name, falling back to the host when unset or blank
pub fn resolve_network(metadata: &Metadata, host: &str) -> String {
    metadata.non_empty("network").unwrap_or_else(|| host.to_string())
}

/// Recording year from `date`, then `year`, then the current year.
pub fn resolve_year(metadata: &Metadata) -> Result<String, ValidationError> {
    if let Some(date) = metadata.get_string("date") {
        return parse_date_year(&date)
            .map(|year| year.to_string())
            .ok_or(ValidationError::InvalidDate(date));
    }

    if let Some(year) = metadata.get_string("year") {
        return match FOUR_DIGIT_YEAR.find(&year) {
            Some(_) => Ok(year),
            None => Err(ValidationError::InvalidYear(year)),
        };
    }

    Ok(Local::now().year().to_string())
}

/// Year of a date written in one of the accepted formats
pub fn parse_date_year(raw: &str) -> Option<i32> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.year());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.year());
    }
    if let Some(dt) = OFFSET_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(raw, fmt).ok())
    {
        return Some(dt.year());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.year())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
                .map(|d| d.year())
        })
}
