//! Fabricated media catalogs used when the scan provider's answer cannot be
//! parsed or comes back empty. The scan is fail-open: the user always gets a
//! plausible result for the page's host rather than a hard failure.

use crate::types::DiscoveredMedia;

fn item(
    url: String,
    kind: &str,
    title: &str,
    size: &str,
    host: &str,
    thumbnail: Option<String>,
) -> DiscoveredMedia {
    DiscoveredMedia {
        url,
        kind: kind.to_string(),
        title: title.to_string(),
        size: Some(size.to_string()),
        source: Some(host.to_string()),
        thumbnail,
    }
}

/// Demo catalog for a quick scan of `host`.
pub fn quick_demo_media(host: &str) -> Vec<DiscoveredMedia> {
    vec![
        item(
            format!("https://{host}/sample-video-1.mp4"),
            "video",
            "Sample Video 1 - High Quality",
            "25.4 MB",
            host,
            Some(format!("https://{host}/thumb1.jpg")),
        ),
        item(
            format!("https://{host}/sample-video-2.mp4"),
            "video",
            "Sample Video 2 - Medium Quality",
            "15.2 MB",
            host,
            Some(format!("https://{host}/thumb2.jpg")),
        ),
        item(
            format!("https://{host}/sample-image-1.jpg"),
            "image",
            "High Resolution Image",
            "3.8 MB",
            host,
            None,
        ),
        item(
            format!("https://{host}/sample-audio-1.mp3"),
            "audio",
            "Audio Track - High Quality",
            "8.5 MB",
            host,
            None,
        ),
    ]
}

/// Larger demo catalog for a deep scan of `host`.
pub fn deep_demo_media(host: &str) -> Vec<DiscoveredMedia> {
    vec![
        item(
            format!("https://{host}/deep-crawl-video-1.mp4"),
            "video",
            "Deep Crawled Video 1 - 4K Quality",
            "125.4 MB",
            host,
            Some(format!("https://{host}/deep-thumb1.jpg")),
        ),
        item(
            format!("https://{host}/deep-crawl-video-2.mp4"),
            "video",
            "Deep Crawled Video 2 - HD Quality",
            "85.2 MB",
            host,
            Some(format!("https://{host}/deep-thumb2.jpg")),
        ),
        item(
            format!("https://{host}/deep-crawl-video-3.webm"),
            "video",
            "Deep Crawled Video 3 - WebM Format",
            "65.8 MB",
            host,
            Some(format!("https://{host}/deep-thumb3.jpg")),
        ),
        item(
            format!("https://{host}/deep-crawl-image-1.jpg"),
            "image",
            "High Resolution Gallery Image 1",
            "8.5 MB",
            host,
            None,
        ),
        item(
            format!("https://{host}/deep-crawl-image-2.png"),
            "image",
            "High Resolution Gallery Image 2",
            "12.3 MB",
            host,
            None,
        ),
        item(
            format!("https://{host}/deep-crawl-audio-1.mp3"),
            "audio",
            "High Quality Audio Track 1",
            "15.7 MB",
            host,
            None,
        ),
        item(
            format!("https://{host}/deep-crawl-audio-2.wav"),
            "audio",
            "High Quality Audio Track 2",
            "45.2 MB",
            host,
            None,
        ),
        item(
            format!("https://{host}/playlist-media.m3u8"),
            "video",
            "Video Playlist/Stream",
            "Unknown",
            host,
            None,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_catalogs_are_host_scoped_and_distinct() {
        let quick = quick_demo_media("example.com");
        let deep = deep_demo_media("example.com");
        assert_eq!(quick.len(), 4);
        assert_eq!(deep.len(), 8);
        for media in quick.iter().chain(deep.iter()) {
            assert!(media.url.contains("example.com"));
            assert!(!media.title.is_empty());
        }
        // Quick and deep must not produce colliding URLs.
        assert!(quick.iter().all(|q| deep.iter().all(|d| d.url != q.url)));
    }
}
