use anyhow::{Context, Result, anyhow};
use log::{info, trace};
use std::path::{Path, PathBuf};

use crate::app_config::{self, ConfigFile};
use crate::episode::Episode;
use crate::metadata::Metadata;
use crate::probe::{MediaProbe, ProbeTool};
use crate::process::{ProcessRunner, SystemRunner};
use crate::shownotes::ShowNotes;
use crate::tagger::{self, TagCommand, TagFrames};
use crate::writer;

// @module: Application controller for tagging one episode

/// Options that shape a run
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Configuration file to load
    pub config_path: PathBuf,

    /// Explicit tagger executable; located on the system when `None`
    pub tagger: Option<PathBuf>,

    /// Probe utility used when `include_metadata` is set
    pub probe_tool: ProbeTool,

    /// Reveal the tagged file in the file manager when done
    pub reveal: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            config_path: app_config::default_config_path(),
            tagger: None,
            probe_tool: ProbeTool::for_platform(),
            reveal: true,
        }
    }
}

/// What a successful run produced
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Validated episode metadata
    pub episode: Episode,

    /// Frames handed to the tagger
    pub frames: TagFrames,

    /// Media facts, when metadata inclusion is enabled
    pub probe: Option<MediaProbe>,

    /// Rendered show notes file
    pub show_notes: PathBuf,
}

/// Main application controller for podcast tagging
pub struct Controller<R: ProcessRunner = SystemRunner> {
    // @field: Run options
    options: RunOptions,
    // @field: Executes external programs
    runner: R,
}

impl Controller<SystemRunner> {
    // @method: Create a controller that runs real programs
    pub fn with_options(options: RunOptions) -> Self {
        Self::new(options, SystemRunner::new())
    }
}

impl<R: ProcessRunner> Controller<R> {
    pub fn new(options: RunOptions, runner: R) -> Self {
        Self { options, runner }
    }

    /// Tag `target` and write the show notes next to it.
    pub fn run<P: AsRef<Path>>(&self, target: P) -> Result<RunReport> {
        let target = target.as_ref();
        if !target.is_file() {
            return Err(anyhow!("File {} does not exist.", target.display()));
        }

        let tagger_path = match &self.options.tagger {
            Some(path) => path.clone(),
            None => tagger::locate_tagger()?,
        };

        let base_dir = target
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));

        let mut notes = ShowNotes::load(base_dir)?;
        let mut metadata = self.resolve_metadata(&notes.front_matter)?;
        Self::dump_metadata(&metadata);

        let episode = Episode::resolve(&mut metadata, &mut notes)?;
        trace!(
            "* [Episode]\n{}",
            serde_yaml::to_string(&episode).unwrap_or_default()
        );

        let frames = TagFrames::for_episode(&episode);
        TagCommand::new(&tagger_path, target, frames.clone()).execute(&self.runner)?;

        let probe = if metadata.flag("include_metadata") {
            Some(
                MediaProbe::probe(&self.runner, self.options.probe_tool, target)
                    .context("Failed to read duration and size of the target")?,
            )
        } else {
            None
        };

        let rendered = writer::render_show_notes(&episode.display_title, &notes.body, probe.as_ref());
        let show_notes = writer::write_show_notes(base_dir, &rendered)
            .with_context(|| format!("Failed to write show notes in {}", base_dir.display()))?;
        info!(
            "Show notes for \"{}\" written to {}",
            episode.ep_title,
            show_notes
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default()
        );

        if self.options.reveal {
            writer::reveal(&self.runner, target);
        }

        Ok(RunReport {
            episode,
            frames,
            probe,
            show_notes,
        })
    }

    /// Profile for the front-matter's podcast with the front-matter merged over it
    fn resolve_metadata(&self, front_matter: &Metadata) -> Result<Metadata> {
        let podcast = front_matter.get_string("podcast");
        let profile = ConfigFile::load(&self.options.config_path)?.resolve(podcast.as_deref())?;
        Ok(profile.merged_with(front_matter))
    }

    fn dump_metadata(metadata: &Metadata) {
        if log::max_level() < log::LevelFilter::Trace {
            return;
        }
        trace!("* [Resolved YAML data]");
        trace!("------------");
        for (key, value) in metadata.entries() {
            trace!("{:>15}: {}", key, value);
        }
        trace!("------------");
    }
}
