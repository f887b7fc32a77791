//! The artist's own album, served from the static album folder

use serde::Serialize;

use crate::assets::AssetDirectory;

pub const ALBUM_TITLE: &str = "POSTSCRIPT";
pub const MISSING_ALBUM_TITLE: &str = "From the Artist";
pub const ALBUM_ART: &str = "Album Cover - Postscript.png";

/// Track files in running order with their display titles
const TRACKLIST: &[(&str, &str)] = &[
    ("Sainted.wav", "Sainted"),
    ("Nocturnal_Vision.wav", "Nocturnal Vision"),
    ("Righteous_Liars.wav", "Righteous Liars"),
    ("Hold_On_2.wav", "Hold On"),
    ("Arson (1).wav", "Arson"),
    ("Pyromania.wav", "Pyromania"),
    ("FE_Draft_Final (5).wav", "Fake Entitlement"),
    ("Allegiance.wav", "Allegiance"),
    ("Kingda Ka.wav", "Kingda Ka"),
    ("Graffiti.wav", "Graffiti"),
    ("Tribulations_1 (2).wav", "Tribulations"),
    ("Epiphany_Pt_1.wav", "Epiphany"),
    ("Scripted.wav", "Scripted"),
    ("Leaf.wav", "Leaf"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlbumTrack {
    pub title: String,
    /// Filename inside the album folder
    pub file: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlbumListing {
    pub album_title: String,
    pub tracks: Vec<AlbumTrack>,
    /// Cover filename, when present on disk
    pub art: Option<String>,
    pub message: Option<String>,
}

/// Tracks of the album that exist on disk, in running order
pub fn list_album(dir: &AssetDirectory) -> AlbumListing {
    if !dir.is_present() {
        return AlbumListing {
            album_title: MISSING_ALBUM_TITLE.to_string(),
            tracks: Vec::new(),
            art: None,
            message: Some("Album not found.".to_string()),
        };
    }

    let tracks = TRACKLIST
        .iter()
        .filter(|(file, _)| dir.contains(file))
        .map(|(file, title)| AlbumTrack {
            title: title.to_string(),
            file: file.to_string(),
        })
        .collect();

    AlbumListing {
        album_title: ALBUM_TITLE.to_string(),
        tracks,
        art: dir.contains(ALBUM_ART).then(|| ALBUM_ART.to_string()),
        message: None,
    }
}
