use log::{debug, warn};
use serde_yaml::Value;
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::ConfigError;
use crate::metadata::Metadata;

/// Application configuration module
/// This module locates the YAML configuration file, writes a skeleton when it
/// is missing, and resolves the profile that applies to a podcast.

/// Name of the profile every configuration must carry
pub const DEFAULT_PROFILE: &str = "default";

/// Placeholder podcast name used by the skeleton configuration
pub const PLACEHOLDER_PODCAST: &str = "PODCAST NAME";

/// Location of the configuration file when none is given on the command line
pub fn default_config_path() -> PathBuf {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".config").join("podtagger").join("podtagger.yaml")
}

/// Text of the skeleton configuration written on first run
pub fn skeleton_config(podcast: Option<&str>) -> String {
    let podcast = podcast.unwrap_or(PLACEHOLDER_PODCAST);
    format!(
        r###"default:
  # Title of podcast
  podcast: {podcast}

  # Name of host(s)
  host: HOST NAME

  # Podcast network name, blank if not applicable
  network: NETWORK

  # Format for adding header to output show notes
  # Any meta key can be used within %% variables
  title_format: "%%title%% with %%guest%%"

  # Format for title added as ID3 tag
  # Any meta key can be used within %% variables
  ep_title_format: "%%title%% with %%guest%% - %%podcast%% %%episode%%"

  # POSIX path to thumbnail image
  logo: PATH/TO/THUMBNAIL

  # Include episode length, filesize as HTML comment in show notes
  include_metadata: false

## Optionally add configs for podcast-specific keys
# {podcast}:
#   ep_title_format: "%%title%% with %%guest%% - %%podcast%% %%episode%%"
#   title_format: "## %%title%% with %%guest%%"
#   logo: PATH/TO/THUMBNAIL
"###
    )
}

/// Parsed configuration file: profile name to profile metadata
#[derive(Debug, Clone)]
pub struct ConfigFile {
    /// Where the configuration was read from
    pub path: PathBuf,

    /// The `default` profile
    pub default: Metadata,

    /// Every other profile, keyed by podcast name
    pub profiles: Vec<(String, Metadata)>,
}

impl ConfigFile {
    /// Load the configuration at `path`.
    ///
    /// A missing file is replaced by a skeleton and reported as
    /// [`ConfigError::SkeletonWritten`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            warn!("Config file not found at '{}', writing skeleton config.", path.display());
            Self::write_skeleton(path, None)?;
            return Err(ConfigError::SkeletonWritten {
                path: path.to_path_buf(),
            });
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(path, &content)
    }

    /// Parse configuration text; `path` is only used in errors.
    pub fn parse<P: AsRef<Path>>(path: P, content: &str) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let value: Value = serde_yaml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let missing_default = || ConfigError::MissingDefault {
            path: path.to_path_buf(),
        };

        let Value::Mapping(root) = value else {
            return Err(missing_default());
        };

        let mut default = None;
        let mut profiles = Vec::new();
        for (name, profile) in root {
            let Some(name) = name.as_str().map(str::to_string) else {
                debug!("Ignoring profile with non-string name: {:?}", name);
                continue;
            };
            let Some(profile) = Metadata::from_value(profile) else {
                debug!("Ignoring profile '{}' that is not a mapping", name);
                continue;
            };
            if name == DEFAULT_PROFILE {
                default = Some(profile);
            } else {
                profiles.push((name, profile));
            }
        }

        Ok(Self {
            path: path.to_path_buf(),
            default: default.ok_or_else(missing_default)?,
            profiles,
        })
    }

    /// Write the skeleton configuration, creating parent directories.
    pub fn write_skeleton<P: AsRef<Path>>(path: P, podcast: Option<&str>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let io_error = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        fs::write(path, skeleton_config(podcast)).map_err(io_error)
    }

    // @returns: Profile for the named podcast, if configured
    pub fn profile(&self, name: &str) -> Option<&Metadata> {
        self.profiles
            .iter()
            .find(|(profile_name, _)| profile_name == name)
            .map(|(_, profile)| profile)
    }

    /// Resolve the profile that applies to `podcast`.
    ///
    /// 1. An explicit podcast with a profile is merged over `default`, and
    ///    `podcast` is set to that name.
    /// 2. Otherwise `default.podcast`, when set, must name a profile, which is
    ///    merged over `default`.
    /// 3. Otherwise `default` is returned as is.
    pub fn resolve(&self, podcast: Option<&str>) -> Result<Metadata, ConfigError> {
        let mut resolved = self.default.clone();

        if let Some((name, profile)) = podcast.and_then(|name| Some((name, self.profile(name)?))) {
            debug!("Using profile '{}'", name);
            resolved.merge(profile);
            resolved.insert("podcast", name);
        } else if let Some(default_podcast) = self.default.get_string("podcast") {
            match self.profile(&default_podcast) {
                Some(profile) => {
                    debug!("Using profile '{}' from default configuration", default_podcast);
                    resolved.merge(profile);
                }
                None => {
                    return Err(ConfigError::MissingProfile {
                        podcast: default_podcast,
                        path: self.path.clone(),
                    });
                }
            }
        }

        Ok(resolved)
    }
}

/// Load the configuration at `path` and resolve the profile for `podcast`.
pub fn load_profile<P: AsRef<Path>>(path: P, podcast: Option<&str>) -> Result<Metadata, ConfigError> {
    ConfigFile::load(path)?.resolve(podcast)
}
