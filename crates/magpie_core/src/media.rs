use std::collections::HashSet;

/// Broad classification of a discovered media file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Video,
    Image,
    Audio,
}

impl MediaKind {
    /// Maps the free-text kind reported by the scan provider. Unknown values
    /// default to video, which is what the upstream mostly returns anyway.
    pub fn from_raw(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "image" => MediaKind::Image,
            "audio" => MediaKind::Audio,
            _ => MediaKind::Video,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MediaKind::Video => "video",
            MediaKind::Image => "image",
            MediaKind::Audio => "audio",
        }
    }
}

/// One discovered media item. Immutable once produced by `ingest`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaDescriptor {
    pub id: String,
    pub url: String,
    pub kind: MediaKind,
    pub title: String,
    pub size: Option<String>,
    pub source: Option<String>,
    pub thumbnail: Option<String>,
}

/// Raw scan output as it crosses the engine boundary: descriptor shape,
/// but no identifier yet and an unvalidated kind string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScanItem {
    pub url: String,
    pub kind: String,
    pub title: String,
    pub size: Option<String>,
    pub source: Option<String>,
    pub thumbnail: Option<String>,
}

/// Normalizes raw scan output into descriptors.
///
/// Assigns a synthetic id derived from the scan generation and the item's
/// position, drops items without a URL, and deduplicates by URL keeping the
/// first occurrence. Order is otherwise preserved. Pure transform; the caller
/// replaces its catalog with the result.
pub fn ingest(generation: u64, items: Vec<ScanItem>) -> Vec<MediaDescriptor> {
    let mut seen_urls = HashSet::new();
    let mut catalog = Vec::with_capacity(items.len());

    for (index, item) in items.into_iter().enumerate() {
        let url = item.url.trim().to_string();
        if url.is_empty() {
            continue;
        }
        if !seen_urls.insert(url.clone()) {
            continue;
        }

        let title = if item.title.trim().is_empty() {
            format!("Media {}", index + 1)
        } else {
            item.title
        };

        catalog.push(MediaDescriptor {
            id: format!("media-{generation}-{index}"),
            url,
            kind: MediaKind::from_raw(&item.kind),
            title,
            size: item.size,
            source: item.source,
            thumbnail: item.thumbnail,
        });
    }

    catalog
}
