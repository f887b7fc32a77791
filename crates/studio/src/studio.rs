use std::path::Path;

use tracing::info;
use utils::assets::static_layout;

use crate::{
    album::{self, AlbumListing},
    assets::AssetDirectory,
    error::StudioError,
    mood::MoodTable,
    picker::{Chooser, SamplePicker, Selection},
    resolver::{MatchStage, MoodResolver, Prompt},
};

/// Static-root-relative locations of the studio's asset folders
#[derive(Debug, Clone)]
pub struct StudioPaths {
    pub samples: String,
    pub backgrounds: String,
    pub album: String,
}

impl Default for StudioPaths {
    fn default() -> Self {
        Self {
            samples: static_layout::SAMPLES_DIR.to_string(),
            backgrounds: static_layout::BACKGROUNDS_DIR.to_string(),
            album: static_layout::ALBUM_DIR.to_string(),
        }
    }
}

/// Result of a generate call, with static-root-relative asset paths
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    pub prompt: String,
    pub selection: Selection,
    pub stage: MatchStage,
    /// e.g. `music/samples/Night.mp3`
    pub sample_path: String,
}

/// Tables and directories shared by every studio request.
///
/// Built once at startup; nothing in here changes afterwards.
#[derive(Debug, Clone)]
pub struct Studio {
    table: MoodTable,
    paths: StudioPaths,
    samples: AssetDirectory,
    backgrounds: AssetDirectory,
    album: AssetDirectory,
}

impl Studio {
    pub fn new(static_root: &Path, table: MoodTable, paths: StudioPaths) -> Self {
        Self {
            samples: AssetDirectory::new(static_root.join(&paths.samples)),
            backgrounds: AssetDirectory::new(static_root.join(&paths.backgrounds)),
            album: AssetDirectory::new(static_root.join(&paths.album)),
            table,
            paths,
        }
    }

    pub fn with_defaults(static_root: &Path) -> Self {
        Self::new(static_root, MoodTable::standard(), StudioPaths::default())
    }

    /// Validate `raw_prompt`, resolve it to a mood and pick a sample
    pub fn generate(
        &self,
        raw_prompt: &str,
        chooser: &mut dyn Chooser,
    ) -> Result<Generation, StudioError> {
        let prompt = Prompt::parse(raw_prompt)?;

        let resolution = MoodResolver::new(&self.table, &self.samples).resolve(&prompt)?;

        let picker = SamplePicker::new(&self.table, &self.backgrounds, &self.paths.backgrounds);
        let selection = picker
            .pick(&resolution, chooser)
            .ok_or_else(|| StudioError::NoSamples(self.samples.root().to_path_buf()))?;

        info!(
            mood = selection.chosen_mood.map(|m| m.as_str()).unwrap_or("none"),
            stage = ?resolution.stage,
            sample = %selection.chosen_sample,
            "Generated sample for prompt"
        );

        let sample_path = format!(
            "{}/{}",
            self.paths.samples.trim_end_matches('/'),
            selection.chosen_sample
        );

        Ok(Generation {
            prompt: prompt.original().to_string(),
            selection,
            stage: resolution.stage,
            sample_path,
        })
    }

    /// The artist album listing, re-read from disk
    pub fn album(&self) -> AlbumListing {
        album::list_album(&self.album)
    }

    /// Static-root-relative path of a file in the album folder
    pub fn album_path(&self, file: &str) -> String {
        format!("{}/{}", self.paths.album.trim_end_matches('/'), file)
    }
}
