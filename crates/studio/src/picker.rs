use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::Serialize;
use tracing::warn;

use crate::{
    assets::{AssetDirectory, IMAGE_EXTENSIONS},
    mood::{Mood, MoodTable},
    resolver::Resolution,
};

/// Background used when no mood-linked or on-disk image is available
pub const DEFAULT_BACKGROUND: &str = "music/bg/Day.jpg";

/// Source of the uniform choices made by the picker
pub trait Chooser {
    /// Index in `0..len`; only called with `len > 0`
    fn choose_index(&mut self, len: usize) -> usize;

    fn choose<'a>(&mut self, items: &'a [String]) -> Option<&'a String> {
        if items.is_empty() {
            return None;
        }
        items.get(self.choose_index(items.len()))
    }
}

/// `Chooser` backed by any `rand` generator
pub struct RandomChooser<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomChooser<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomChooser<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Reproducible chooser for tests and debugging
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Chooser for RandomChooser<R> {
    fn choose_index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

/// Final outcome of one generate request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    /// Sample filename inside the sample directory
    pub chosen_sample: String,
    pub chosen_mood: Option<Mood>,
    /// Background path relative to the static root
    pub background: String,
}

/// Picks one sample from the resolved candidates plus a background image
pub struct SamplePicker<'a> {
    table: &'a MoodTable,
    backgrounds: &'a AssetDirectory,
    /// Static-root-relative prefix of `backgrounds`, e.g. `music/bg`
    backgrounds_prefix: &'a str,
}

impl<'a> SamplePicker<'a> {
    pub fn new(
        table: &'a MoodTable,
        backgrounds: &'a AssetDirectory,
        backgrounds_prefix: &'a str,
    ) -> Self {
        Self {
            table,
            backgrounds,
            backgrounds_prefix,
        }
    }

    /// `None` only if `resolution` carries no candidates, which the
    /// resolver never produces
    pub fn pick(&self, resolution: &Resolution, chooser: &mut dyn Chooser) -> Option<Selection> {
        let chosen_sample = chooser.choose(&resolution.candidates)?.clone();
        let background = self.background(resolution.mood, chooser);

        Some(Selection {
            chosen_sample,
            chosen_mood: resolution.mood,
            background,
        })
    }

    fn background(&self, mood: Option<Mood>, chooser: &mut dyn Chooser) -> String {
        if let Some(path) = mood.and_then(|m| self.table.background_for(m)) {
            return path.to_string();
        }

        if !self.backgrounds.is_present() {
            return DEFAULT_BACKGROUND.to_string();
        }

        match self.backgrounds.list_with_extensions(IMAGE_EXTENSIONS) {
            Ok(images) => match chooser.choose(&images) {
                Some(image) => {
                    format!("{}/{}", self.backgrounds_prefix.trim_end_matches('/'), image)
                }
                None => DEFAULT_BACKGROUND.to_string(),
            },
            Err(e) => {
                warn!(
                    "Failed to list backgrounds in {}: {}",
                    self.backgrounds.root().display(),
                    e
                );
                DEFAULT_BACKGROUND.to_string()
            }
        }
    }
}
