use log::{debug, info, trace, warn};
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::episode::Episode;
use crate::errors::TagError;
use crate::file_utils::FileManager;
use crate::process::{Invocation, ProcessRunner, shell_quote};

// @module: ID3 tagging through an external executable

/// Name of the tagging executable
pub const TAGGER_NAME: &str = "mid3v2";

/// Directory next to the running binary holding a bundled tagger
pub const BUNDLED_RESOURCES_DIR: &str = "PodTaggerResources";

/// ID3 frames written for every episode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame {
    /// Description
    Tdes,
    /// Comment
    Comm,
    /// Album
    Talb,
    /// Compilation flag
    Tcmp,
    /// Genre
    Tcon,
    /// Track number
    Trck,
    /// Attached picture
    Apic,
    /// Lead artist
    Tpe1,
    /// Band / album artist
    Tpe2,
    /// Title
    Tit2,
    /// Recording time
    Tdrc,
}

impl Frame {
    pub fn id(&self) -> &'static str {
        match self {
            Self::Tdes => "TDES",
            Self::Comm => "COMM",
            Self::Talb => "TALB",
            Self::Tcmp => "TCMP",
            Self::Tcon => "TCON",
            Self::Trck => "TRCK",
            Self::Apic => "APIC",
            Self::Tpe1 => "TPE1",
            Self::Tpe2 => "TPE2",
            Self::Tit2 => "TIT2",
            Self::Tdrc => "TDRC",
        }
    }

    // @returns: Command line flag for this frame
    pub fn flag(&self) -> String {
        format!("--{}", self.id())
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Ordered set of frame values for one episode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagFrames(Vec<(Frame, String)>);

impl TagFrames {
    /// Build the frame set written for `episode`
    pub fn for_episode(episode: &Episode) -> Self {
        Self(vec![
            (Frame::Tdes, episode.description.clone()),
            (Frame::Comm, episode.description.clone()),
            (Frame::Talb, episode.podcast.clone()),
            (Frame::Tcmp, "1".to_string()),
            (Frame::Tcon, "Podcast".to_string()),
            (Frame::Trck, episode.episode.clone()),
            (Frame::Apic, episode.logo.to_string_lossy().into_owned()),
            (Frame::Tpe1, episode.network.clone()),
            (Frame::Tpe2, episode.host.clone()),
            (Frame::Tit2, episode.ep_title.clone()),
            (Frame::Tdrc, episode.year.clone()),
        ])
    }

    pub fn get(&self, frame: Frame) -> Option<&str> {
        self.0
            .iter()
            .find(|(f, _)| *f == frame)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Frame, String)> {
        self.0.iter()
    }

    // @returns: `--FRAME value` pairs, flattened
    pub fn to_args(&self) -> Vec<OsString> {
        self.0
            .iter()
            .flat_map(|(frame, value)| [OsString::from(frame.flag()), OsString::from(value)])
            .collect()
    }
}

/// Find the tagging executable.
///
/// Searches `PATH`, then `/usr/local/bin`, then a bundled copy next to the
/// running binary.
pub fn locate_tagger() -> Result<PathBuf, TagError> {
    if let Some(found) = FileManager::find_in_path(TAGGER_NAME) {
        return Ok(found);
    }

    fallback_candidates()
        .into_iter()
        .find(|candidate| FileManager::is_executable(candidate))
        .ok_or_else(|| TagError::MissingExecutable {
            name: TAGGER_NAME.to_string(),
        })
}

// @returns: Fixed locations checked after PATH
pub fn fallback_candidates() -> Vec<PathBuf> {
    let mut candidates = vec![Path::new("/usr/local/bin").join(TAGGER_NAME)];
    if let Some(dir) = std::env::current_exe().ok().and_then(|exe| exe.parent().map(Path::to_path_buf)) {
        candidates.push(dir.join(BUNDLED_RESOURCES_DIR).join(TAGGER_NAME));
    }
    candidates
}

/// Strip-then-apply tagging command for one target file
#[derive(Debug, Clone)]
pub struct TagCommand {
    tagger: PathBuf,
    target: PathBuf,
    frames: TagFrames,
}

impl TagCommand {
    pub fn new<P1: Into<PathBuf>, P2: Into<PathBuf>>(tagger: P1, target: P2, frames: TagFrames) -> Self {
        Self {
            tagger: tagger.into(),
            target: target.into(),
            frames,
        }
    }

    /// Removes every existing tag from the target
    pub fn strip_invocation(&self) -> Invocation {
        Invocation::new(&self.tagger).arg("-D").arg(&self.target)
    }

    /// Writes the frame set to the target
    pub fn apply_invocation(&self) -> Invocation {
        Invocation::new(&self.tagger)
            .args(self.frames.to_args())
            .arg(&self.target)
    }

    /// Both invocations in execution order
    pub fn invocations(&self) -> [Invocation; 2] {
        [self.strip_invocation(), self.apply_invocation()]
    }

    /// Run the command: apply only runs when strip succeeded.
    ///
    /// A tool that runs but exits unsuccessfully is only reported as a
    /// warning; a tool that cannot be started is an error.
    pub fn execute<R: ProcessRunner>(&self, runner: &R) -> Result<(), TagError> {
        debug!("* [Command]\n------------\n{}\n------------", self);

        for invocation in self.invocations() {
            let output = runner.run(&invocation).map_err(|source| TagError::Spawn {
                program: self.tagger.clone(),
                source,
            })?;

            if !output.is_success() {
                warn!(
                    "{} exited with status {}: {}",
                    TAGGER_NAME,
                    output.code.map_or_else(|| "signal".to_string(), |c| c.to_string()),
                    output.stderr.trim()
                );
                return Ok(());
            }
        }

        info!("=> ID3 tags written to {}", self.target.display());

        trace!("------------");
        for (frame, value) in self.frames.iter() {
            trace!("   {}: {}", frame, value);
        }
        trace!("------------");

        Ok(())
    }
}

impl fmt::Display for TagCommand {
    /// Combined shell line, as it would be typed in a terminal
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tagger = shell_quote(&self.tagger.to_string_lossy());
        let target = shell_quote(&self.target.to_string_lossy());

        write!(f, "{} -D {} && {}", tagger, target, tagger)?;
        for (frame, value) in self.frames.iter() {
            write!(f, " {} {}", frame.flag(), shell_quote(value))?;
        }
        write!(f, " {}", target)
    }
}
