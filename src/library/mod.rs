//! Track catalogs.
//!
//! A catalog is the set of tracks the front end can browse and queue. It is
//! read from a TOML file with one `[[tracks]]` table per track:
//!
//! ```toml
//! [[tracks]]
//! id = "t1"
//! name = "song-one"
//! title = "Song One"
//! artist = "Artist"
//! poster_path = "/covers/1.jpg"
//! ```

use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

use crate::error::{Error, Result, ResultExt};
use crate::model::{Track, TrackId};

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    tracks: Vec<Track>,
}

/// Load a catalog from a TOML file.
///
/// Track ids must be unique within the file.
pub fn load_catalog(path: &Path) -> Result<Vec<Track>> {
    let contents = std::fs::read_to_string(path)
        .with_context(format!("reading catalog {}", path.display()))?;
    let tracks = parse_catalog(&contents, path)?;
    info!("Loaded {} tracks from {:?}", tracks.len(), path);
    Ok(tracks)
}

/// Parse catalog text. `path` is only used in error messages.
pub fn parse_catalog(contents: &str, path: &Path) -> Result<Vec<Track>> {
    let file: CatalogFile =
        toml::from_str(contents).map_err(|e| Error::catalog(path, e.message()))?;

    let mut seen: HashSet<&TrackId> = HashSet::new();
    for track in &file.tracks {
        if !seen.insert(&track.id) {
            return Err(Error::catalog(
                path,
                format!("duplicate track id \"{}\"", track.id),
            ));
        }
    }

    Ok(file.tracks)
}

/// Find a track by id.
pub fn find<'a>(catalog: &'a [Track], id: &TrackId) -> Option<&'a Track> {
    catalog.iter().find(|t| &t.id == id)
}

/// Built-in catalog used when no catalog file is configured.
pub fn demo_catalog() -> Vec<Track> {
    [
        ("t1", "morning-light", "Morning Light", "The Dawn Chorus"),
        ("t2", "tidal", "Tidal", "Harbour Lights"),
        ("t3", "paper-kites", "Paper Kites", "Margin Notes"),
        ("t4", "slow-orbit", "Slow Orbit", "The Dawn Chorus"),
        ("t5", "last-ferry", "Last Ferry", "Harbour Lights"),
        ("t6", "static-bloom", "Static Bloom", "Low Fidelity"),
    ]
    .into_iter()
    .map(|(id, name, title, artist)| {
        Track::new(id, name).with_title(title).with_artist(artist)
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_parse_catalog() {
        let toml = r#"
[[tracks]]
id = "a"
name = "alpha"
title = "Alpha"
artist = "Someone"

[[tracks]]
id = "b"
name = "beta"
"#;
        let tracks = parse_catalog(toml, Path::new("test.toml")).unwrap();
        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].display_title(), "Alpha");
        assert_eq!(tracks[1].display_title(), "beta");
        assert!(tracks[1].artist.is_none());
    }

    #[test]
    fn test_empty_catalog() {
        let tracks = parse_catalog("", Path::new("empty.toml")).unwrap();
        assert!(tracks.is_empty());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let toml = r#"
[[tracks]]
id = "a"
name = "one"

[[tracks]]
id = "a"
name = "two"
"#;
        let err = parse_catalog(toml, Path::new("dup.toml")).unwrap_err();
        assert!(matches!(err, Error::Catalog { .. }));
        assert!(err.to_string().contains("duplicate track id \"a\""));
    }

    #[test]
    fn test_missing_name_rejected() {
        let toml = "[[tracks]]\nid = \"a\"\n";
        let err = parse_catalog(toml, Path::new("bad.toml")).unwrap_err();
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn test_load_catalog_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path: PathBuf = dir.path().join("catalog.toml");
        std::fs::write(&path, "[[tracks]]\nid = \"x\"\nname = \"x-ray\"\n").unwrap();

        let tracks = load_catalog(&path).unwrap();
        assert_eq!(tracks[0].id.as_str(), "x");
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_catalog(Path::new("/nonexistent/catalog.toml")).unwrap_err();
        assert!(err.to_string().contains("reading catalog"));
    }

    #[test]
    fn test_demo_catalog_is_unique() {
        let catalog = demo_catalog();
        let ids: HashSet<_> = catalog.iter().map(|t| t.id.clone()).collect();
        assert_eq!(ids.len(), catalog.len());
        assert!(find(&catalog, &TrackId::new("t3")).is_some());
        assert!(find(&catalog, &TrackId::new("nope")).is_none());
    }
}
