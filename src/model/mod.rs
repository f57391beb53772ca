//! Core data model for queued tracks.
//!
//! A [`Track`] is supplied by whatever browses the library; the queue never
//! assigns identifiers itself. Two tracks are the same queue entry exactly
//! when their [`TrackId`]s are equal.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable, externally assigned track identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(String);

impl TrackId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TrackId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A playable track with display metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Unique identifier (queue uniqueness key)
    pub id: TrackId,
    /// Raw name, used when no title tag is present
    pub name: String,
    /// Track title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Artist name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    /// Artwork path or URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,
}

impl Track {
    /// Create a track with only an id and a name.
    pub fn new(id: impl Into<TrackId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            title: None,
            artist: None,
            poster_path: None,
        }
    }

    /// Builder-style title setter.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Builder-style artist setter.
    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = Some(artist.into());
        self
    }

    /// Get the display title: title, then name, then a placeholder.
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .filter(|t| !t.is_empty())
            .or_else(|| Some(self.name.as_str()).filter(|n| !n.is_empty()))
            .unwrap_or("Unknown Track")
    }

    /// Get display artist.
    pub fn display_artist(&self) -> &str {
        self.artist
            .as_deref()
            .filter(|a| !a.is_empty())
            .unwrap_or("Unknown Artist")
    }
}

impl From<String> for TrackId {
    fn from(id: String) -> Self {
        Self(id)
    }
}
