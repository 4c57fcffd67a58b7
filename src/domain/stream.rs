//! Stream records and the partial data used to create or edit them.

use serde::{Deserialize, Serialize};

use super::category::Category;

/// Thumbnail used when a stream is added without one
pub const DEFAULT_THUMBNAIL: &str = "https://images.unsplash.com/photo-1546519638-68e109498ffc?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&q=80";

/// A stream in the catalog.
///
/// Field names on the wire match the persisted layout
/// (`{id, title, category, url, thumbnail, viewers, isLive}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamRecord {
    /// Unique positive identifier
    pub id: u64,

    /// Human-readable title
    pub title: String,

    /// Sport category key
    pub category: Category,

    /// Source (share) URL as entered by the admin
    pub url: String,

    /// Thumbnail image URL
    #[serde(default)]
    pub thumbnail: String,

    /// Current viewer count
    #[serde(default)]
    pub viewers: u64,

    /// Whether the stream is shown as live
    #[serde(rename = "isLive", default = "default_is_live")]
    pub is_live: bool,
}

fn default_is_live() -> bool {
    true
}

impl StreamRecord {
    /// Finalize new stream data under an assigned id
    pub fn from_new(id: u64, data: NewStream) -> Self {
        Self {
            id,
            title: data.title,
            category: data.category,
            url: data.url,
            thumbnail: data.thumbnail,
            viewers: data.viewers,
            is_live: true,
        }
    }

    /// Merge a patch over this record. Fields present in the patch win.
    pub fn apply(&mut self, patch: StreamPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(url) = patch.url {
            self.url = url;
        }
        if let Some(thumbnail) = patch.thumbnail {
            self.thumbnail = thumbnail;
        }
        if let Some(viewers) = patch.viewers {
            self.viewers = viewers;
        }
        if let Some(is_live) = patch.is_live {
            self.is_live = is_live;
        }
    }
}

/// Data for a stream that has not been assigned an id yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStream {
    pub title: String,
    pub category: Category,
    pub url: String,
    pub thumbnail: String,
    pub viewers: u64,
}

impl NewStream {
    /// Create stream data with the default thumbnail and no viewers
    pub fn new(
        title: impl Into<String>,
        category: impl Into<Category>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            category: category.into(),
            url: url.into(),
            thumbnail: DEFAULT_THUMBNAIL.to_string(),
            viewers: 0,
        }
    }

    /// Set the thumbnail
    pub fn with_thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = thumbnail.into();
        self
    }

    /// Set the starting viewer count
    pub fn with_viewers(mut self, viewers: u64) -> Self {
        self.viewers = viewers;
        self
    }
}

/// Partial update of a stream record; `None` leaves a field untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamPatch {
    pub title: Option<String>,
    pub category: Option<Category>,
    pub url: Option<String>,
    pub thumbnail: Option<String>,
    pub viewers: Option<u64>,
    pub is_live: Option<bool>,
}

impl StreamPatch {
    /// Whether the patch changes nothing
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl From<NewStream> for StreamPatch {
    fn from(data: NewStream) -> Self {
        Self {
            title: Some(data.title),
            category: Some(data.category),
            url: Some(data.url),
            thumbnail: Some(data.thumbnail),
            viewers: Some(data.viewers),
            is_live: None,
        }
    }
}

/// Built-in catalog used when nothing is persisted yet
pub fn default_streams() -> Vec<StreamRecord> {
    let seed = |id: u64, title: &str, category: &str, url: &str, thumbnail: &str, viewers: u64| {
        StreamRecord {
            id,
            title: title.to_string(),
            category: Category::new(category),
            url: url.to_string(),
            thumbnail: thumbnail.to_string(),
            viewers,
            is_live: true,
        }
    };

    vec![
        seed(
            1,
            "Football Highlights - Best Goals 2024",
            "football",
            "https://www.youtube.com/watch?v=oygGdlm6T8I",
            "https://images.unsplash.com/photo-1575361204480-aadea25e6e68?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&q=80",
            45_892,
        ),
        seed(
            2,
            "NBA Top 10 Plays of the Week",
            "basketball",
            "https://www.youtube.com/watch?v=xMfA6T3fBkE",
            "https://images.unsplash.com/photo-1546519638-68e109498ffc?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&q=80",
            32_145,
        ),
        seed(
            3,
            "Tennis Best Points - Wimbledon 2024",
            "tennis",
            "https://youtu.be/oygGdlm6T8I",
            "https://images.unsplash.com/photo-1622279457486-62dcc4a431f3?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&q=80",
            28_763,
        ),
        seed(
            4,
            "MLB Baseball Highlights",
            "baseball",
            "https://www.youtube.com/watch?v=xMfA6T3fBkE",
            "https://images.unsplash.com/photo-1575361204480-aadea25e6e68?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&q=80",
            15_678,
        ),
    ]
}
