//! Video-id recognition for the URL shapes YouTube hands out.

use std::sync::OnceLock;

use regex::Regex;

fn patterns() -> &'static [Regex; 3] {
    static PATTERNS: OnceLock<[Regex; 3]> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            // watch?v=ID or /ID, terminated by ?, & or end
            Regex::new(r"(?:v=|/)([\w-]{11})(?:\?|&|$)").expect("valid watch pattern"),
            Regex::new(r"youtu\.be/([\w-]{11})").expect("valid short-link pattern"),
            Regex::new(r"embed/([\w-]{11})").expect("valid embed pattern"),
        ]
    })
}

/// Pull the 11-character video id out of a URL, or pass `input` through.
///
/// A bare id (11 characters, no `/`) is returned as is; unrecognised input
/// is returned unchanged.
pub fn extract_video_id(input: &str) -> String {
    if input.chars().count() == 11 && !input.contains('/') {
        return input.to_string();
    }
    patterns()
        .iter()
        .find_map(|re| re.captures(input))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| input.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "dQw4w9WgXcQ";

    #[test]
    fn raw_id_is_idempotent() {
        assert_eq!(extract_video_id(ID), ID);
        assert_eq!(extract_video_id("a-b_c-d_e-f"), "a-b_c-d_e-f");
    }

    #[test]
    fn url_shapes() {
        for url in [
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42s",
            "https://youtu.be/dQw4w9WgXcQ",
            "https://youtu.be/dQw4w9WgXcQ?si=abcdef",
            "https://www.youtube.com/embed/dQw4w9WgXcQ",
            "https://www.youtube.com/shorts/dQw4w9WgXcQ",
        ] {
            assert_eq!(extract_video_id(url), ID, "{}", url);
        }
    }

    #[test]
    fn unrecognised_input_passes_through() {
        assert_eq!(extract_video_id("some_random_string"), "some_random_string");
        assert_eq!(extract_video_id(""), "");
    }
}
