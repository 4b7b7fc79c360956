//! Body marker grammar
//!
//! This module recognizes the shortcode-style directives that carry explicit
//! asset ids inside post bodies:
//! - image embeds: `[image id=50]`, `[image id="50" size=full]`
//! - native gallery invocations: `[gallery ids="12,13,14"]`
//! - custom gallery invocations: `[media_gallery ids="12,13"]`
//!
//! Matching is exact-id, never substring: a gallery listing `123` does not
//! reference asset `12`. Each id token is parsed individually, and tokens
//! that are not well-formed numbers are dropped rather than failing the
//! whole marker.

use std::sync::LazyLock;

use regex::Regex;

use mediaref_core::PostId;

static MARKER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\[(image|gallery|media_gallery)\s+([^\]]*)\]"#).expect("marker regex")
});

static ID_ATTR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\bids?\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s\]]+))"#).expect("id attribute regex")
});

/// Kind of content construct a marker represents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    /// Single-asset inline image embed
    ImageEmbed,
    /// Native multi-image gallery
    NativeGallery,
    /// Extended gallery construct
    CustomGallery,
}

/// One recognized marker in a post body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    /// Construct kind
    pub kind: MarkerKind,
    /// Asset ids the marker enumerates, in written order
    pub ids: Vec<PostId>,
    /// Byte offset of the marker in the body
    pub offset: usize,
}

impl Marker {
    /// Check whether the marker references the given asset
    ///
    /// Exact-id membership over the enumerated list.
    pub fn references(&self, asset_id: PostId) -> bool {
        self.ids.contains(&asset_id)
    }
}

/// Extract all recognized markers from a body text
///
/// Markers without a parseable id attribute are skipped entirely; a marker
/// whose list mixes valid and malformed tokens keeps the valid ones.
pub fn extract_markers(body: &str) -> Vec<Marker> {
    let mut markers = Vec::new();

    for cap in MARKER_REGEX.captures_iter(body) {
        let full_match = cap.get(0).expect("match group");
        let kind = match cap.get(1).expect("tag group").as_str() {
            "image" => MarkerKind::ImageEmbed,
            "gallery" => MarkerKind::NativeGallery,
            "media_gallery" => MarkerKind::CustomGallery,
            _ => unreachable!("regex alternation"),
        };

        let attrs = cap.get(2).expect("attrs group").as_str();
        let ids = parse_id_attribute(attrs);
        if ids.is_empty() {
            continue;
        }

        markers.push(Marker {
            kind,
            ids,
            offset: full_match.start(),
        });
    }

    markers
}

/// Parse the `id=` / `ids=` attribute out of a marker's attribute text
fn parse_id_attribute(attrs: &str) -> Vec<PostId> {
    let Some(cap) = ID_ATTR_REGEX.captures(attrs) else {
        return Vec::new();
    };

    let raw = cap
        .get(1)
        .or_else(|| cap.get(2))
        .or_else(|| cap.get(3))
        .map(|m| m.as_str())
        .unwrap_or_default();

    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .filter_map(|token| token.parse::<PostId>().ok())
        .collect()
}
