use std::{env, path::PathBuf};

const PROJECT_ROOT: &str = env!("CARGO_MANIFEST_DIR");
const STATIC_DIR_ENV: &str = "MOODWAVE_STATIC_DIR";
const STATIC_URL_ENV: &str = "MOODWAVE_STATIC_URL";
const DEFAULT_STATIC_URL: &str = "/static/";

/// Layout of the static tree, relative to the static root
pub mod static_layout {
    pub const SAMPLES_DIR: &str = "music/samples";
    pub const BACKGROUNDS_DIR: &str = "music/bg";
    pub const ALBUM_DIR: &str = "music/album";
    pub const GENRE_ICONS_DIR: &str = "music/img/genres";
}

/// Root directory holding the sample, background and album assets.
///
/// `MOODWAVE_STATIC_DIR` wins when set. Debug builds otherwise point at the
/// workspace `static/` folder so `cargo run` works from a checkout.
pub fn static_dir() -> PathBuf {
    if let Ok(custom_dir) = env::var(STATIC_DIR_ENV) {
        return PathBuf::from(custom_dir);
    }

    if cfg!(debug_assertions) {
        PathBuf::from(PROJECT_ROOT).join("../../static")
    } else {
        PathBuf::from("static")
    }
}

/// Public URL prefix the static root is mounted under
pub fn static_url_prefix() -> String {
    env::var(STATIC_URL_ENV).unwrap_or_else(|_| DEFAULT_STATIC_URL.to_string())
}

/// Maps a relative asset path to a publicly fetchable URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticUrl {
    prefix: String,
}

impl StaticUrl {
    pub fn new(prefix: impl Into<String>) -> Self {
        let mut prefix = prefix.into();
        if !prefix.starts_with('/') && !prefix.contains("://") {
            prefix.insert(0, '/');
        }
        if !prefix.ends_with('/') {
            prefix.push('/');
        }
        Self { prefix }
    }

    /// Local mount path for the static file service, without the trailing
    /// slash. `None` when assets live on another host.
    pub fn mount_path(&self) -> Option<&str> {
        if self.prefix.contains("://") {
            return None;
        }
        let trimmed = self.prefix.trim_end_matches('/');
        Some(if trimmed.is_empty() { "/" } else { trimmed })
    }

    /// Public URL for `relative`, percent-encoding each path segment
    pub fn url(&self, relative: &str) -> String {
        let encoded = relative
            .trim_start_matches('/')
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/");
        format!("{}{}", self.prefix, encoded)
    }
}

impl Default for StaticUrl {
    fn default() -> Self {
        Self::new(DEFAULT_STATIC_URL)
    }
}
