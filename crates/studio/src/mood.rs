use std::fmt;

use serde::{Deserialize, Serialize};

/// Fixed set of moods the studio can score a prompt against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Autumn,
    Spring,
    Summer,
    Winter,
    Crazy,
    Day,
    Melancholy,
    Night,
    Peace,
}

impl Mood {
    /// Lower-case name, which is also the direct-match keyword
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Autumn => "autumn",
            Mood::Spring => "spring",
            Mood::Summer => "summer",
            Mood::Winter => "winter",
            Mood::Crazy => "crazy",
            Mood::Day => "day",
            Mood::Melancholy => "melancholy",
            Mood::Night => "night",
            Mood::Peace => "peace",
        }
    }

    /// Capitalized stem shared by the mood's sample and background files
    fn file_stem(&self) -> &'static str {
        match self {
            Mood::Autumn => "Autumn",
            Mood::Spring => "Spring",
            Mood::Summer => "Summer",
            Mood::Winter => "Winter",
            Mood::Crazy => "Crazy",
            Mood::Day => "Day",
            Mood::Melancholy => "Melancholy",
            Mood::Night => "Night",
            Mood::Peace => "Peace",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A mood's configured samples and background image
#[derive(Debug, Clone)]
pub struct MoodEntry {
    pub mood: Mood,
    /// Sample filenames relative to the sample directory
    pub samples: Vec<String>,
    /// Background path relative to the static root
    pub background: String,
}

/// Immutable lookup tables driving mood resolution.
///
/// Both lists are ordered; iteration order is the tie-break when a prompt
/// mentions more than one mood. The synonym list keeps its own order, which
/// is not the keyword order.
#[derive(Debug, Clone)]
pub struct MoodTable {
    entries: Vec<MoodEntry>,
    synonyms: Vec<(Mood, Vec<String>)>,
}

impl MoodTable {
    pub fn new(entries: Vec<MoodEntry>, synonyms: Vec<(Mood, Vec<String>)>) -> Self {
        Self { entries, synonyms }
    }

    /// The stock AI Studio tables
    pub fn standard() -> Self {
        const KEYWORD_ORDER: [Mood; 9] = [
            Mood::Autumn,
            Mood::Spring,
            Mood::Summer,
            Mood::Winter,
            Mood::Crazy,
            Mood::Day,
            Mood::Melancholy,
            Mood::Night,
            Mood::Peace,
        ];

        let entries = KEYWORD_ORDER
            .iter()
            .map(|mood| MoodEntry {
                mood: *mood,
                samples: vec![format!("{}.mp3", mood.file_stem())],
                background: format!("music/bg/{}.jpg", mood.file_stem()),
            })
            .collect();

        let synonyms: [(Mood, &[&str]); 9] = [
            (
                Mood::Summer,
                &["beach", "california", "sun", "heat", "tropical", "warm"],
            ),
            (
                Mood::Winter,
                &["snow", "cold", "frost", "december", "christmas", "icy"],
            ),
            (
                Mood::Autumn,
                &["fall", "leaves", "pumpkin", "november", "autumn"],
            ),
            (Mood::Spring, &["flowers", "valley", "nice", "jazz"]),
            (Mood::Peace, &["calm", "relax", "zen", "quiet", "peace"]),
            (
                Mood::Melancholy,
                &["sad", "nostalgia", "rain", "blue", "melancholy"],
            ),
            (
                Mood::Crazy,
                &["party", "wild", "energetic", "rave", "locked in", "adrenaline"],
            ),
            (
                Mood::Day,
                &[
                    "dope",
                    "skateboard",
                    "fun",
                    "confident",
                    "type shi",
                    "good",
                    "life",
                    "chill",
                ],
            ),
            (
                Mood::Night,
                &["late", "night", "midnight", "stars", "nocturnal"],
            ),
        ];

        let synonyms = synonyms
            .iter()
            .map(|(mood, words)| (*mood, words.iter().map(|w| w.to_string()).collect()))
            .collect();

        Self::new(entries, synonyms)
    }

    /// Keyword table in priority order
    pub fn entries(&self) -> &[MoodEntry] {
        &self.entries
    }

    /// Synonym table in priority order
    pub fn synonyms(&self) -> &[(Mood, Vec<String>)] {
        &self.synonyms
    }

    pub fn entry(&self, mood: Mood) -> Option<&MoodEntry> {
        self.entries.iter().find(|entry| entry.mood == mood)
    }

    /// Configured samples for `mood`, empty when the mood has no keyword entry
    pub fn samples_for(&self, mood: Mood) -> &[String] {
        self.entry(mood)
            .map(|entry| entry.samples.as_slice())
            .unwrap_or(&[])
    }

    pub fn background_for(&self, mood: Mood) -> Option<&str> {
        self.entry(mood).map(|entry| entry.background.as_str())
    }
}

impl Default for MoodTable {
    fn default() -> Self {
        Self::standard()
    }
}
