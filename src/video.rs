use std::sync::LazyLock;

use regex::Regex;

/// Matches watch, short-link, embed, shorts and `v/` URL shapes. The greedy
/// prefix makes the last marker in the URL win.
static VIDEO_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^.*(?:(?:youtu\.be/|v/|vi/|u/\w/|embed/|shorts/)|(?:(?:watch)?\?vi?=|&vi?=))([^#&?]*).*",
    )
    .expect("video id pattern is valid")
});

/// Length of every YouTube video id.
pub const VIDEO_ID_LEN: usize = 11;

/// Extract the 11-character video id from any supported YouTube URL.
pub fn extract_id(url: &str) -> Option<String> {
    let caps = VIDEO_ID_RE.captures(url)?;
    let id = caps.get(1)?.as_str();
    (id.chars().count() == VIDEO_ID_LEN).then(|| id.to_string())
}

/// The canonical watch URL for a video id.
pub fn canonical_url(id: &str) -> String {
    format!("https://www.youtube.com/watch?v={id}")
}

/// High-quality thumbnail for a video id.
pub fn thumbnail_url(id: &str) -> String {
    format!("https://img.youtube.com/vi/{id}/hqdefault.jpg")
}
