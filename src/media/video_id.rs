use url::Url;

/// Length of a video identifier token.
const ID_LEN: usize = 11;

/// Extracts the 11-character video identifier from a video URL.
///
/// Recognised forms:
/// - `https://youtu.be/{id}`
/// - `https://www.youtube.com/watch?v={id}` (also with `v` later in the query)
/// - `https://www.youtube.com/embed/{id}`
/// - `https://www.youtube.com/shorts/{id}`
/// - `https://www.youtube.com/v/{id}`
///
/// A missing scheme is tolerated (`youtu.be/{id}`). Anything else, including
/// empty or malformed input, yields `None`. Never panics.
///
/// # Examples
///
/// ```
/// use reelview::media::extract_video_id;
///
/// let id = Some("dQw4w9WgXcQ".to_string());
/// assert_eq!(extract_video_id("https://youtu.be/dQw4w9WgXcQ"), id);
/// assert_eq!(extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"), id);
/// assert_eq!(extract_video_id("https://www.youtube.com/embed/dQw4w9WgXcQ"), id);
/// assert_eq!(extract_video_id("https://example.com/video.mp4"), None);
/// assert_eq!(extract_video_id(""), None);
/// ```
pub fn extract_video_id(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let parsed = Url::parse(raw)
        .or_else(|_| Url::parse(&format!("https://{raw}")))
        .ok()?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return None;
    }

    let host = parsed.host_str()?.to_ascii_lowercase();
    let mut segments = parsed.path_segments()?;

    if host == "youtu.be" {
        return segments.next().and_then(id_token);
    }

    if host != "youtube.com" && !host.ends_with(".youtube.com") {
        return None;
    }

    match segments.next()? {
        "shorts" | "embed" | "v" => segments.next().and_then(id_token),
        "watch" => parsed
            .query_pairs()
            .find(|(key, _)| key == "v")
            .and_then(|(_, value)| id_token(&value)),
        _ => None,
    }
}

/// Takes the leading identifier token from a path segment or query value.
///
/// Trailing characters after the first 11 are ignored, matching how
/// players resolve `youtu.be/{id}extra` links.
fn id_token(segment: &str) -> Option<String> {
    let token: String = segment.chars().take(ID_LEN).collect();
    let valid = token.chars().count() == ID_LEN
        && token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    valid.then_some(token)
}

/// Builds the embeddable player URL for a video identifier.
pub fn embed_url(video_id: &str, autoplay: bool, muted: bool) -> String {
    format!(
        "https://www.youtube.com/embed/{}?autoplay={}&mute={}&playsinline=1",
        video_id,
        u8::from(autoplay),
        u8::from(muted)
    )
}
