//! Preview images for video resources.

use once_cell::sync::Lazy;
use regex::Regex;

static YOUTUBE_ID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:v=|/)([0-9A-Za-z_-]{11})(?:[?&#/]|$)").expect("valid YouTube id pattern")
});

/// Thumbnail URL for a YouTube video, `None` for anything else.
pub fn youtube_thumbnail(url: &str) -> Option<String> {
    if !url.contains("youtube.com") && !url.contains("youtu.be") {
        return None;
    }
    let id = YOUTUBE_ID.captures(url)?.get(1)?.as_str();
    Some(format!("https://img.youtube.com/vi/{}/hqdefault.jpg", id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn watch_url() {
        assert_eq!(
            youtube_thumbnail("https://www.youtube.com/watch?v=rfscVS0vtbw").as_deref(),
            Some("https://img.youtube.com/vi/rfscVS0vtbw/hqdefault.jpg")
        );
    }

    #[test]
    fn short_url() {
        assert_eq!(
            youtube_thumbnail("https://youtu.be/rfscVS0vtbw?t=42").as_deref(),
            Some("https://img.youtube.com/vi/rfscVS0vtbw/hqdefault.jpg")
        );
    }

    #[test]
    fn other_hosts_have_none() {
        assert_eq!(youtube_thumbnail("https://realpython.com/python-first-steps/"), None);
        assert_eq!(youtube_thumbnail("https://www.youtube.com/"), None);
    }

    #[test]
    fn id_must_be_exactly_eleven_characters() {
        assert_eq!(
            youtube_thumbnail("https://www.youtube.com/watch?v=rfscVS0vtbw&list=PL123").as_deref(),
            Some("https://img.youtube.com/vi/rfscVS0vtbw/hqdefault.jpg")
        );
        assert_eq!(
            youtube_thumbnail("https://www.youtube.com/embed/rfscVS0vtbw").as_deref(),
            Some("https://img.youtube.com/vi/rfscVS0vtbw/hqdefault.jpg")
        );
        assert_eq!(youtube_thumbnail("https://www.youtube.com/watch?v=abcdefghijklmnop"), None);
        assert_eq!(youtube_thumbnail("https://www.youtube.com/channelname123"), None);
    }
}
