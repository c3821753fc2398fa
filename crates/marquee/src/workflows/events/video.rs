use serde::{Deserialize, Serialize};

const YOUTUBE_EMBED_PREFIX: &str = "https://www.youtube.com/embed/";
const VIMEO_EMBED_PREFIX: &str = "https://player.vimeo.com/video/";
const FACEBOOK_EMBED_PREFIX: &str = "https://www.facebook.com/video/embed?video_id=";

const YOUTUBE_HOSTS: [&str; 7] = [
    "youtube.com",
    "www.youtube.com",
    "m.youtube.com",
    "music.youtube.com",
    "youtube-nocookie.com",
    "www.youtube-nocookie.com",
    "youtu.be",
];

const VIMEO_HOSTS: [&str; 3] = ["vimeo.com", "www.vimeo.com", "player.vimeo.com"];

const FACEBOOK_HOSTS: [&str; 7] = [
    "facebook.com",
    "www.facebook.com",
    "m.facebook.com",
    "web.facebook.com",
    "fb.com",
    "www.fb.com",
    "fb.watch",
];

const YOUTUBE_ID_LEN: usize = 11;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VideoPlatform {
    Youtube,
    Vimeo,
    Facebook,
}

impl VideoPlatform {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Youtube => "YouTube",
            Self::Vimeo => "Vimeo",
            Self::Facebook => "Facebook",
        }
    }
}

/// A resolved, embeddable video.
///
/// `embed_url` is always a fixed platform template plus the validated id;
/// no other part of the submitted url reaches the rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoReference {
    pub platform: VideoPlatform,
    pub video_id: String,
    pub embed_url: String,
    pub source_url: String,
}

/// Resolve an organizer-submitted video url into an embeddable reference.
///
/// Hosts are matched against an exact allow-list, so lookalike domains such
/// as `youtube.com.evil.example` never resolve. Returns `None` for anything
/// that is not a recognized watch-page shape on a recognized host.
pub fn resolve_video(url: &str) -> Option<VideoReference> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return None;
    }

    let remainder = strip_scheme(trimmed)?;
    let (raw_host, rest) = split_host(remainder);
    let host = normalize_host(raw_host)?;

    if YOUTUBE_HOSTS.contains(&host.as_str()) {
        let video_id = youtube_reference(&host, rest)?;
        return Some(VideoReference {
            platform: VideoPlatform::Youtube,
            embed_url: format!("{YOUTUBE_EMBED_PREFIX}{video_id}"),
            video_id,
            source_url: trimmed.to_owned(),
        });
    }

    if VIMEO_HOSTS.contains(&host.as_str()) {
        let video_id = vimeo_reference(rest)?;
        return Some(VideoReference {
            platform: VideoPlatform::Vimeo,
            embed_url: format!("{VIMEO_EMBED_PREFIX}{video_id}"),
            video_id,
            source_url: trimmed.to_owned(),
        });
    }

    if FACEBOOK_HOSTS.contains(&host.as_str()) {
        let video_id = facebook_reference(&host, rest)?;
        return Some(VideoReference {
            platform: VideoPlatform::Facebook,
            embed_url: format!("{FACEBOOK_EMBED_PREFIX}{video_id}"),
            video_id,
            source_url: trimmed.to_owned(),
        });
    }

    None
}

/// Strip an optional scheme, accepting only http and https.
///
/// Scheme-less and protocol-relative forms are common in pasted urls and
/// are treated as https.
fn strip_scheme(url: &str) -> Option<&str> {
    if let Some((scheme, rest)) = url.split_once("://") {
        if scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https") {
            return Some(rest);
        }
        return None;
    }
    // Reject other scheme forms like `javascript:alert(1)`.
    if let Some(colon) = url.find(':') {
        let before = &url[..colon];
        if !before.contains('/') && !before.contains('?') && !before.contains('#') {
            return None;
        }
    }
    Some(url.strip_prefix("//").unwrap_or(url))
}

/// Split the authority from the path, query, and fragment that follow it.
fn split_host(remainder: &str) -> (&str, &str) {
    match remainder.find(['/', '?', '#']) {
        Some(index) => remainder.split_at(index),
        None => (remainder, ""),
    }
}

/// Validate and lowercase the authority.
///
/// Userinfo is rejected outright; explicit ports are tolerated only when
/// they name the default for http or https.
fn normalize_host(raw: &str) -> Option<String> {
    if raw.is_empty() || raw.contains('@') {
        return None;
    }
    let host = match raw.rsplit_once(':') {
        Some((host, port)) => {
            if port != "80" && port != "443" {
                return None;
            }
            host
        }
        None => raw,
    };
    if host.is_empty() {
        return None;
    }
    Some(host.to_ascii_lowercase())
}

/// Path, query, and fragment split helpers shared by the platform matchers.
fn split_query(rest: &str) -> (&str, Option<&str>) {
    let without_fragment = match rest.split_once('#') {
        Some((before, _)) => before,
        None => rest,
    };
    match without_fragment.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (without_fragment, None),
    }
}

fn query_param<'a>(query: &'a str, name: &str) -> Option<&'a str> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}

fn path_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

fn is_youtube_id(candidate: &str) -> bool {
    candidate.len() == YOUTUBE_ID_LEN
        && candidate
            .bytes()
            .all(|byte| byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_')
}

fn is_numeric_id(candidate: &str) -> bool {
    !candidate.is_empty() && candidate.bytes().all(|byte| byte.is_ascii_digit())
}

fn youtube_reference(host: &str, rest: &str) -> Option<String> {
    let (path, query) = split_query(rest);
    let mut segments = path_segments(path);

    let candidate = if host == "youtu.be" {
        segments.next()?
    } else {
        match segments.next()? {
            "watch" => query_param(query?, "v")?,
            "embed" | "shorts" | "live" | "v" => segments.next()?,
            _ => return None,
        }
    };

    is_youtube_id(candidate).then(|| candidate.to_owned())
}

fn vimeo_reference(rest: &str) -> Option<String> {
    let (path, _) = split_query(rest);
    let segments: Vec<&str> = path_segments(path).collect();

    // The id is positional; a numeric channel or group slug never stands in
    // for it. Trailing segments (unlisted-hash links) are tolerated.
    let candidate = match segments.as_slice() {
        ["video", id, ..] => *id,
        ["channels", _, id, ..] => *id,
        ["groups", _, "videos", id, ..] => *id,
        [id, ..] => *id,
        [] => return None,
    };

    is_numeric_id(candidate).then(|| candidate.to_owned())
}

fn facebook_reference(host: &str, rest: &str) -> Option<String> {
    // fb.watch short links carry an opaque token, not the video id, so they
    // cannot be resolved without a network round trip.
    if host == "fb.watch" {
        return None;
    }

    let (path, query) = split_query(rest);
    let segments: Vec<&str> = path_segments(path).collect();

    let candidate = match segments.as_slice() {
        ["watch"] | ["video.php"] => query_param(query?, "v")?,
        ["reel", id] => *id,
        _ => {
            let videos = segments.iter().position(|segment| *segment == "videos")?;
            segments
                .get(videos + 1..)?
                .iter()
                .rev()
                .find(|segment| is_numeric_id(segment))
                .copied()?
        }
    };

    is_numeric_id(candidate).then(|| candidate.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(url: &str) -> VideoReference {
        resolve_video(url).unwrap_or_else(|| panic!("expected {url} to resolve"))
    }

    #[test]
    fn resolves_youtube_watch_urls() {
        let reference = resolve("https://www.youtube.com/watch?v=dQw4w9WgXcQ");
        assert_eq!(reference.platform, VideoPlatform::Youtube);
        assert_eq!(reference.video_id, "dQw4w9WgXcQ");
        assert_eq!(
            reference.embed_url,
            "https://www.youtube.com/embed/dQw4w9WgXcQ"
        );
    }

    #[test]
    fn resolves_youtube_path_shapes() {
        for url in [
            "https://youtu.be/dQw4w9WgXcQ",
            "https://www.youtube.com/embed/dQw4w9WgXcQ",
            "https://m.youtube.com/shorts/dQw4w9WgXcQ",
            "https://www.youtube.com/live/dQw4w9WgXcQ?feature=share",
            "https://www.youtube-nocookie.com/v/dQw4w9WgXcQ",
        ] {
            assert_eq!(resolve(url).video_id, "dQw4w9WgXcQ", "url: {url}");
        }
    }

    #[test]
    fn resolves_watch_urls_with_extra_parameters() {
        let reference = resolve("https://www.youtube.com/watch?t=42&v=dQw4w9WgXcQ&list=PL1");
        assert_eq!(reference.video_id, "dQw4w9WgXcQ");
    }

    #[test]
    fn rejects_youtube_ids_of_the_wrong_shape() {
        assert_eq!(resolve_video("https://youtu.be/short"), None);
        assert_eq!(
            resolve_video("https://www.youtube.com/watch?v=dQw4w9WgXcQtoolong"),
            None
        );
        assert_eq!(
            resolve_video("https://www.youtube.com/watch?v=dQw4w9Wg<c5"),
            None
        );
    }

    #[test]
    fn resolves_vimeo_urls() {
        let reference = resolve("https://vimeo.com/76979871");
        assert_eq!(reference.platform, VideoPlatform::Vimeo);
        assert_eq!(reference.embed_url, "https://player.vimeo.com/video/76979871");

        let channel = resolve("https://vimeo.com/channels/staffpicks/76979871");
        assert_eq!(channel.video_id, "76979871");

        let player = resolve("https://player.vimeo.com/video/76979871");
        assert_eq!(player.video_id, "76979871");

        let unlisted = resolve("https://vimeo.com/76979871/9a8b7c6d5e");
        assert_eq!(unlisted.video_id, "76979871");
    }

    #[test]
    fn vimeo_ids_are_positional_within_each_path_shape() {
        let grouped = resolve("https://vimeo.com/groups/123/videos/76979871");
        assert_eq!(grouped.video_id, "76979871");
        assert_eq!(grouped.embed_url, "https://player.vimeo.com/video/76979871");

        let channel = resolve("https://vimeo.com/channels/123/76979871");
        assert_eq!(channel.video_id, "76979871");

        assert_eq!(resolve_video("https://vimeo.com/staffpicks/76979871"), None);
    }

    #[test]
    fn rejects_vimeo_urls_without_a_numeric_segment() {
        assert_eq!(resolve_video("https://vimeo.com/upgrade"), None);
        assert_eq!(resolve_video("https://vimeo.com/"), None);
    }

    #[test]
    fn resolves_facebook_page_video_urls() {
        let reference = resolve("https://www.facebook.com/citypulse/videos/1234567890");
        assert_eq!(reference.platform, VideoPlatform::Facebook);
        assert_eq!(
            reference.embed_url,
            "https://www.facebook.com/video/embed?video_id=1234567890"
        );

        let titled = resolve("https://www.facebook.com/citypulse/videos/summer-launch/987654321/");
        assert_eq!(titled.video_id, "987654321");
    }

    #[test]
    fn resolves_facebook_watch_and_reel_urls() {
        assert_eq!(
            resolve("https://www.facebook.com/watch?v=1234567890").video_id,
            "1234567890"
        );
        assert_eq!(
            resolve("https://m.facebook.com/watch/?v=1234567890").video_id,
            "1234567890"
        );
        assert_eq!(
            resolve("https://www.facebook.com/video.php?v=1234567890").video_id,
            "1234567890"
        );
        assert_eq!(
            resolve("https://www.facebook.com/reel/1234567890").video_id,
            "1234567890"
        );
    }

    #[test]
    fn rejects_fb_watch_short_links() {
        assert_eq!(resolve_video("https://fb.watch/abc123xyz/"), None);
    }

    #[test]
    fn rejects_facebook_video_queries_without_a_watch_path() {
        assert_eq!(resolve_video("https://www.facebook.com/?v=1234567890"), None);
        assert_eq!(resolve_video("https://facebook.com?v=1234567890"), None);
    }

    #[test]
    fn rejects_facebook_ids_that_are_not_digits() {
        assert_eq!(
            resolve_video("https://www.facebook.com/reel/not-a-number"),
            None
        );
        assert_eq!(
            resolve_video("https://www.facebook.com/citypulse/videos/launch-party"),
            None
        );
    }

    #[test]
    fn accepts_scheme_less_and_protocol_relative_urls() {
        assert_eq!(resolve("youtu.be/dQw4w9WgXcQ").video_id, "dQw4w9WgXcQ");
        assert_eq!(
            resolve("//www.youtube.com/watch?v=dQw4w9WgXcQ").video_id,
            "dQw4w9WgXcQ"
        );
        assert_eq!(resolve("vimeo.com/76979871").video_id, "76979871");
    }

    #[test]
    fn accepts_default_ports_and_uppercase_hosts() {
        assert_eq!(
            resolve("https://WWW.YOUTUBE.COM/watch?v=dQw4w9WgXcQ").video_id,
            "dQw4w9WgXcQ"
        );
        assert_eq!(
            resolve("https://vimeo.com:443/76979871").video_id,
            "76979871"
        );
    }

    #[test]
    fn rejects_non_default_ports_and_userinfo() {
        assert_eq!(resolve_video("https://vimeo.com:8080/76979871"), None);
        assert_eq!(
            resolve_video("https://attacker@vimeo.com/76979871"),
            None
        );
    }

    #[test]
    fn rejects_lookalike_hosts() {
        for url in [
            "https://youtube.com.evil.example/watch?v=dQw4w9WgXcQ",
            "https://notvimeo.com/76979871",
            "https://fakefacebook.com/watch?v=1234567890",
            "https://youtu.be.evil.example/dQw4w9WgXcQ",
        ] {
            assert_eq!(resolve_video(url), None, "url: {url}");
        }
    }

    #[test]
    fn rejects_dangerous_schemes() {
        assert_eq!(resolve_video("javascript:alert(1)"), None);
        assert_eq!(resolve_video("data:text/html,<script></script>"), None);
        assert_eq!(resolve_video("ftp://vimeo.com/76979871"), None);
    }

    #[test]
    fn rejects_unrelated_and_empty_input() {
        assert_eq!(resolve_video(""), None);
        assert_eq!(resolve_video("   "), None);
        assert_eq!(resolve_video("https://example.com/watch?v=dQw4w9WgXcQ"), None);
    }

    #[test]
    fn embed_url_is_built_only_from_the_template_and_id() {
        let reference = resolve("https://www.youtube.com/watch?v=dQw4w9WgXcQ&autoplay=1");
        assert!(!reference.embed_url.contains("autoplay"));
        assert_eq!(
            reference.embed_url,
            format!("https://www.youtube.com/embed/{}", reference.video_id)
        );
    }
}
