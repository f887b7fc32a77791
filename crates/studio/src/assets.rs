use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// Audio extensions eligible for random fallback
pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav"];

/// Image extensions eligible for random backgrounds
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// A static asset directory that is re-read on every call.
///
/// Nothing is cached: a file added or removed between two requests changes
/// the outcome of the next one.
#[derive(Debug, Clone)]
pub struct AssetDirectory {
    root: PathBuf,
}

impl AssetDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn is_present(&self) -> bool {
        self.root.is_dir()
    }

    /// Whether `name` exists as a file directly inside this directory
    pub fn contains(&self, name: &str) -> bool {
        if name.is_empty() || name.contains(['/', '\\']) {
            return false;
        }
        self.root.join(name).is_file()
    }

    /// `names` filtered down to the ones present on disk, order preserved
    pub fn existing(&self, names: &[String]) -> Vec<String> {
        names
            .iter()
            .filter(|name| self.contains(name))
            .cloned()
            .collect()
    }

    /// Filenames whose extension matches one of `extensions`, case-insensitively.
    ///
    /// The listing is sorted so callers see a stable order for the same
    /// directory contents.
    pub fn list_with_extensions(&self, extensions: &[&str]) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
                continue;
            }
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if has_extension(&name, extensions) {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }
}

/// Suffix match, so a bare `.mp3` counts as an mp3
fn has_extension(name: &str, extensions: &[&str]) -> bool {
    let name = name.to_ascii_lowercase();
    extensions.iter().any(|ext| {
        name.strip_suffix(&ext.to_ascii_lowercase())
            .is_some_and(|stem| stem.ends_with('.'))
    })
}
