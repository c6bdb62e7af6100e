//! Video transport classification
//!
//! Decides whether a video URL plays as a direct media file, through the
//! embedded provider player, or not at all (opened externally).

use serde::Serialize;
use url::Url;

/// Direct-media extensions and the MIME type declared for each
const MEDIA_TYPES: &[(&str, &str)] = &[
    ("mp4", "video/mp4"),
    ("m4v", "video/mp4"),
    ("webm", "video/webm"),
    ("ogv", "video/ogg"),
    ("ogg", "video/ogg"),
    ("mov", "video/quicktime"),
];

const SHORT_LINK_HOSTS: &[&str] = &["youtu.be"];

const PROVIDER_HOSTS: &[&str] = &[
    "youtube.com",
    "www.youtube.com",
    "m.youtube.com",
    "youtube-nocookie.com",
    "www.youtube-nocookie.com",
];

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Transport {
    /// Native media element playing the file itself
    #[serde(rename_all = "camelCase")]
    DirectMedia { mime: &'static str },
    /// Provider iframe with custom controls
    #[serde(rename_all = "camelCase")]
    Embedded { video_id: String },
    /// Open the URL in a new browsing context
    External,
}

impl Transport {
    /// Classify a video URL
    ///
    /// Relative URLs are accepted for direct media. Unparseable URLs are
    /// logged and treated as external.
    pub fn classify(raw: &str) -> Transport {
        if let Some(mime) = media_type(raw) {
            return Transport::DirectMedia { mime };
        }

        match Url::parse(raw.trim()) {
            Ok(url) => match extract_video_id(&url) {
                Some(video_id) => Transport::Embedded { video_id },
                None => Transport::External,
            },
            Err(e) => {
                log::warn!("Unparseable video URL '{}': {}", raw, e);
                Transport::External
            }
        }
    }
}

/// MIME type for a URL whose path ends in a known media extension
pub fn media_type(raw: &str) -> Option<&'static str> {
    let path = raw
        .trim()
        .split(|c| c == '?' || c == '#')
        .next()
        .unwrap_or("");
    let file = path.rsplit('/').next().unwrap_or(path);
    let (_, ext) = file.rsplit_once('.')?;

    MEDIA_TYPES
        .iter()
        .find(|(known, _)| ext.eq_ignore_ascii_case(known))
        .map(|(_, mime)| *mime)
}

/// Provider content identifier, if the URL is a provider URL that has one
pub fn extract_video_id(url: &Url) -> Option<String> {
    let host = url.host_str()?.to_ascii_lowercase();
    let mut segments = url.path_segments()?.filter(|s| !s.is_empty());

    let candidate = if SHORT_LINK_HOSTS.contains(&host.as_str()) {
        segments.next().map(str::to_string)
    } else if PROVIDER_HOSTS.contains(&host.as_str()) {
        let from_query = url
            .query_pairs()
            .find(|(key, value)| key == "v" && !value.is_empty())
            .map(|(_, value)| value.into_owned());

        from_query.or_else(|| match (segments.next(), segments.next()) {
            (Some("embed"), Some(id)) | (Some("shorts"), Some(id)) => Some(id.to_string()),
            _ => None,
        })
    } else {
        None
    };

    candidate.filter(|id| is_valid_id(id))
}

/// Provider identifiers are non-empty and URL-safe base64
pub fn parse_video_id(raw: &str) -> Option<String> {
    match Url::parse(raw.trim()) {
        Ok(url) => extract_video_id(&url),
        Err(e) => {
            log::warn!("Unparseable video URL '{}': {}", raw, e);
            None
        }
    }
}

fn is_valid_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_link_identifier() {
        assert_eq!(parse_video_id("https://youtu.be/abc123"), Some("abc123".to_string()));
        assert_eq!(parse_video_id("https://youtu.be/abc123?t=42"), Some("abc123".to_string()));
    }

    #[test]
    fn test_watch_query_identifier() {
        assert_eq!(
            parse_video_id("https://www.youtube.com/watch?v=xyz789"),
            Some("xyz789".to_string())
        );
        assert_eq!(
            parse_video_id("https://m.youtube.com/watch?feature=share&v=xyz789"),
            Some("xyz789".to_string())
        );
    }

    #[test]
    fn test_embed_path_identifier() {
        assert_eq!(
            parse_video_id("https://www.youtube.com/embed/qwe456"),
            Some("qwe456".to_string())
        );
        assert_eq!(
            parse_video_id("https://www.youtube-nocookie.com/embed/qwe456?rel=0"),
            Some("qwe456".to_string())
        );
    }

    #[test]
    fn test_empty_watch_query_defers_to_path() {
        assert_eq!(
            parse_video_id("https://www.youtube.com/embed/qwe456?v="),
            Some("qwe456".to_string())
        );
        assert_eq!(
            parse_video_id("https://www.youtube.com/watch?v=&v=xyz789"),
            Some("xyz789".to_string())
        );
    }

    #[test]
    fn test_unparseable_url_has_no_identifier() {
        assert_eq!(parse_video_id("not a url at all"), None);
        assert_eq!(Transport::classify("not a url at all"), Transport::External);
    }

    #[test]
    fn test_provider_url_without_identifier_falls_back() {
        assert_eq!(Transport::classify("https://www.youtube.com/"), Transport::External);
        assert_eq!(Transport::classify("https://www.youtube.com/watch"), Transport::External);
        assert_eq!(Transport::classify("https://youtu.be/"), Transport::External);
        assert_eq!(Transport::classify("https://www.youtube.com/watch?v=bad%20id"), Transport::External);
    }

    #[test]
    fn test_unknown_host_falls_back() {
        assert_eq!(Transport::classify("https://vimeo.com/12345"), Transport::External);
        assert_eq!(Transport::classify("https://example.com/watch?v=abc"), Transport::External);
    }

    #[test]
    fn test_direct_media_by_extension() {
        assert_eq!(
            Transport::classify("media/intro.MP4"),
            Transport::DirectMedia { mime: "video/mp4" }
        );
        assert_eq!(
            Transport::classify("https://cdn.example.com/clip.webm?token=1#t=3"),
            Transport::DirectMedia { mime: "video/webm" }
        );
        assert_eq!(media_type("movie.mov"), Some("video/quicktime"));
        assert_eq!(media_type("https://example.com/clip.mp4/page"), None);
    }

    #[test]
    fn test_embedded_classification() {
        assert_eq!(
            Transport::classify("https://youtu.be/abc123"),
            Transport::Embedded { video_id: "abc123".to_string() }
        );
    }
}
