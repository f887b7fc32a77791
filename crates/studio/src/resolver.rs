use serde::Serialize;
use tracing::debug;

use crate::{
    assets::{AUDIO_EXTENSIONS, AssetDirectory},
    error::StudioError,
    mood::{Mood, MoodTable},
};

/// A validated, non-empty prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    original: String,
    normalized: String,
}

impl Prompt {
    /// Trim `raw` and reject it when nothing is left
    pub fn parse(raw: &str) -> Result<Self, StudioError> {
        let original = raw.trim();
        if original.is_empty() {
            return Err(StudioError::EmptyPrompt);
        }
        Ok(Self {
            original: original.to_string(),
            normalized: original.to_lowercase(),
        })
    }

    /// Trimmed prompt as the user typed it
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Lower-cased prompt used for matching
    pub fn normalized(&self) -> &str {
        &self.normalized
    }
}

/// Which resolution stage produced the candidates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStage {
    Direct,
    Synonym,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub mood: Option<Mood>,
    /// Never empty; every entry existed on disk when resolved
    pub candidates: Vec<String>,
    pub stage: MatchStage,
}

/// Narrows a prompt to a mood and the sample files eligible for it
pub struct MoodResolver<'a> {
    table: &'a MoodTable,
    samples: &'a AssetDirectory,
}

impl<'a> MoodResolver<'a> {
    pub fn new(table: &'a MoodTable, samples: &'a AssetDirectory) -> Self {
        Self { table, samples }
    }

    /// Direct keyword, then synonym, then random fallback over the whole
    /// sample directory. The first stage yielding on-disk files wins.
    pub fn resolve(&self, prompt: &Prompt) -> Result<Resolution, StudioError> {
        if !self.samples.is_present() {
            return Err(StudioError::SamplesDirMissing(
                self.samples.root().to_path_buf(),
            ));
        }

        let text = prompt.normalized();

        if let Some(resolution) = self.direct_match(text) {
            return Ok(resolution);
        }
        if let Some(resolution) = self.synonym_match(text) {
            return Ok(resolution);
        }
        self.fallback()
    }

    /// Only the first mood named in the prompt is tried
    fn direct_match(&self, text: &str) -> Option<Resolution> {
        let entry = self
            .table
            .entries()
            .iter()
            .find(|entry| text.contains(entry.mood.as_str()))?;

        let candidates = self.samples.existing(&entry.samples);
        if candidates.is_empty() {
            debug!(
                "Mood '{}' named directly but none of its samples are on disk",
                entry.mood
            );
            return None;
        }

        Some(Resolution {
            mood: Some(entry.mood),
            candidates,
            stage: MatchStage::Direct,
        })
    }

    /// First mood with a synonym hit and at least one sample on disk
    fn synonym_match(&self, text: &str) -> Option<Resolution> {
        for (mood, synonyms) in self.table.synonyms() {
            let Some(hit) = synonyms.iter().find(|s| text.contains(s.as_str())) else {
                continue;
            };

            let candidates = self.samples.existing(self.table.samples_for(*mood));
            if candidates.is_empty() {
                debug!(
                    "Synonym '{}' implies '{}' but none of its samples are on disk",
                    hit, mood
                );
                continue;
            }

            return Some(Resolution {
                mood: Some(*mood),
                candidates,
                stage: MatchStage::Synonym,
            });
        }
        None
    }

    fn fallback(&self) -> Result<Resolution, StudioError> {
        let root = self.samples.root();
        let candidates = self
            .samples
            .list_with_extensions(AUDIO_EXTENSIONS)
            .map_err(|source| StudioError::SamplesDirUnreadable {
                path: root.to_path_buf(),
                source,
            })?;

        if candidates.is_empty() {
            return Err(StudioError::NoSamples(root.to_path_buf()));
        }

        Ok(Resolution {
            mood: None,
            candidates,
            stage: MatchStage::Fallback,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, path::Path};

    use super::*;

    const ALL_SAMPLES: [&str; 9] = [
        "Autumn.mp3",
        "Spring.mp3",
        "Summer.mp3",
        "Winter.mp3",
        "Crazy.mp3",
        "Day.mp3",
        "Melancholy.mp3",
        "Night.mp3",
        "Peace.mp3",
    ];

    fn sample_dir(files: &[&str]) -> tempfile::TempDir {
        let tmp = tempfile::tempdir().unwrap();
        for name in files {
            fs::write(tmp.path().join(name), b"ID3").unwrap();
        }
        tmp
    }

    fn resolve_in(dir: &Path, prompt: &str) -> Result<Resolution, StudioError> {
        let table = MoodTable::standard();
        let samples = AssetDirectory::new(dir);
        MoodResolver::new(&table, &samples).resolve(&Prompt::parse(prompt)?)
    }

    #[test]
    fn test_prompt_rejects_blank_input() {
        assert!(matches!(Prompt::parse(""), Err(StudioError::EmptyPrompt)));
        assert!(matches!(Prompt::parse("  \t\n"), Err(StudioError::EmptyPrompt)));

        let prompt = Prompt::parse("  Rainy NIGHT ").unwrap();
        assert_eq!(prompt.original(), "Rainy NIGHT");
        assert_eq!(prompt.normalized(), "rainy night");
    }

    #[test]
    fn test_direct_match_by_mood_name() {
        let tmp = sample_dir(&ALL_SAMPLES);
        let resolution = resolve_in(tmp.path(), "A Winter walk").unwrap();
        assert_eq!(resolution.mood, Some(Mood::Winter));
        assert_eq!(resolution.candidates, vec!["Winter.mp3".to_string()]);
        assert_eq!(resolution.stage, MatchStage::Direct);
    }

    #[test]
    fn test_direct_match_follows_table_order() {
        let tmp = sample_dir(&ALL_SAMPLES);
        // "peace" is declared after "night"
        let resolution = resolve_in(tmp.path(), "peace at night").unwrap();
        assert_eq!(resolution.mood, Some(Mood::Night));
    }

    #[test]
    fn test_synonym_only_prompt() {
        let tmp = sample_dir(&ALL_SAMPLES);
        let resolution = resolve_in(tmp.path(), "snowed in with cocoa").unwrap();
        assert_eq!(resolution.mood, Some(Mood::Winter));
        assert_eq!(resolution.stage, MatchStage::Synonym);

        let resolution = resolve_in(tmp.path(), "we are LOCKED IN").unwrap();
        assert_eq!(resolution.mood, Some(Mood::Crazy));
    }

    #[test]
    fn test_direct_beats_other_moods_synonym() {
        let tmp = sample_dir(&ALL_SAMPLES);
        let resolution = resolve_in(tmp.path(), "peace and party energy").unwrap();
        assert_eq!(resolution.mood, Some(Mood::Peace));
        assert_eq!(resolution.stage, MatchStage::Direct);
    }

    #[test]
    fn test_direct_beats_same_moods_synonym() {
        let tmp = sample_dir(&ALL_SAMPLES);
        let resolution = resolve_in(tmp.path(), "i love the beach this summer").unwrap();
        assert_eq!(resolution.mood, Some(Mood::Summer));
        assert_eq!(resolution.stage, MatchStage::Direct);
    }

    #[test]
    fn test_synonym_table_order_locks_first_mood() {
        let tmp = sample_dir(&ALL_SAMPLES);
        // "warm" (summer) and "sad" (melancholy); summer is listed first
        let resolution = resolve_in(tmp.path(), "sad but warm").unwrap();
        assert_eq!(resolution.mood, Some(Mood::Summer));
    }

    #[test]
    fn test_fragment_matches_count() {
        let tmp = sample_dir(&ALL_SAMPLES);
        let resolution = resolve_in(tmp.path(), "nightly").unwrap();
        assert_eq!(resolution.mood, Some(Mood::Night));
    }

    #[test]
    fn test_no_match_falls_back_to_directory() {
        let tmp = sample_dir(&["Day.mp3", "extra.wav", "cover.png"]);
        let resolution = resolve_in(tmp.path(), "xyz123").unwrap();
        assert_eq!(resolution.mood, None);
        assert_eq!(resolution.stage, MatchStage::Fallback);
        assert_eq!(
            resolution.candidates,
            vec!["Day.mp3".to_string(), "extra.wav".to_string()]
        );
    }

    #[test]
    fn test_direct_match_without_files_falls_through_to_synonyms() {
        // "autumn" named but Autumn.mp3 missing; "stars" implies night
        let tmp = sample_dir(&["Night.mp3", "Day.mp3"]);
        let resolution = resolve_in(tmp.path(), "autumn under the stars").unwrap();
        assert_eq!(resolution.mood, Some(Mood::Night));
        assert_eq!(resolution.stage, MatchStage::Synonym);
    }

    #[test]
    fn test_synonym_without_files_moves_to_next_mood() {
        // "beach" implies summer (missing), "chill" implies day
        let tmp = sample_dir(&["Day.mp3"]);
        let resolution = resolve_in(tmp.path(), "chill beach").unwrap();
        assert_eq!(resolution.mood, Some(Mood::Day));
        assert_eq!(resolution.candidates, vec!["Day.mp3".to_string()]);
    }

    #[test]
    fn test_matched_mood_without_files_falls_back() {
        let tmp = sample_dir(&["random.mp3"]);
        let resolution = resolve_in(tmp.path(), "summer").unwrap();
        assert_eq!(resolution.mood, None);
        assert_eq!(resolution.candidates, vec!["random.mp3".to_string()]);
    }

    #[test]
    fn test_candidates_are_configured_and_on_disk() {
        let tmp = sample_dir(&ALL_SAMPLES);
        let table = MoodTable::standard();
        let samples = AssetDirectory::new(tmp.path());
        let resolver = MoodResolver::new(&table, &samples);

        for entry in table.entries() {
            let prompt = Prompt::parse(&format!("feeling {}", entry.mood)).unwrap();
            let resolution = resolver.resolve(&prompt).unwrap();
            assert_eq!(resolution.mood, Some(entry.mood));
            for candidate in &resolution.candidates {
                assert!(entry.samples.contains(candidate));
                assert!(samples.contains(candidate));
            }
        }
    }

    #[test]
    fn test_missing_directory_is_configuration_error() {
        let tmp = tempfile::tempdir().unwrap();
        let err = resolve_in(&tmp.path().join("samples"), "summer").unwrap_err();
        assert!(matches!(err, StudioError::SamplesDirMissing(_)));
        assert!(err.is_configuration());
    }

    #[test]
    fn test_empty_directory_is_exhaustion_error() {
        let tmp = sample_dir(&["readme.txt"]);
        let err = resolve_in(tmp.path(), "xyz123").unwrap_err();
        assert!(matches!(err, StudioError::NoSamples(_)));
        assert!(!err.is_configuration());
    }
}
