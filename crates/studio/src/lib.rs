//! AI Studio - picks a local audio sample and background for a mood prompt
//!
//! ```text
//! prompt  -->  MoodResolver  -->  candidates  -->  SamplePicker  -->  Selection
//!                  |                                   |
//!              MoodTable                        AssetDirectory (samples, bg)
//! ```

pub mod album;
pub mod assets;
pub mod error;
pub mod mood;
pub mod picker;
pub mod resolver;
pub mod studio;

pub use assets::{AUDIO_EXTENSIONS, AssetDirectory, IMAGE_EXTENSIONS};
pub use error::StudioError;
pub use mood::{Mood, MoodTable};
pub use picker::{Chooser, RandomChooser, SamplePicker, Selection};
pub use resolver::{MatchStage, MoodResolver, Prompt, Resolution};
pub use studio::{Generation, Studio, StudioPaths};
