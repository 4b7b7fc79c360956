//! Asset Reference Report
//!
//! The where-used report for one media asset. A report is a value object:
//! built once per request, never mutated afterwards, shared read-only by every
//! presentation component that asks about the same asset.
//!
//! Alongside the primary [`ParentState`] classification the report retains the
//! underlying booleans (`found_parent`, `found_any_reference`,
//! `is_unattached`) so display layers can combine badges the way the legacy
//! admin screen did: an asset can be both an orphan and unattached.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::post::{Post, PostId};

/// One referencing content item
///
/// Equality is by referencing post id: two references to the same post are
/// the same reference regardless of snapshot titles.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct Reference {
    /// Id of the referencing post
    pub post_id: PostId,
    /// Content type of the referencing post
    pub post_type: String,
    /// Title of the referencing post
    pub title: String,
}

impl Reference {
    /// Build a reference from a post snapshot
    pub fn from_post(post: &Post) -> Self {
        Self {
            post_id: post.id,
            post_type: post.post_type.clone(),
            title: post.title.clone(),
        }
    }
}

impl PartialEq for Reference {
    fn eq(&self, other: &Self) -> bool {
        self.post_id == other.post_id
    }
}

/// Lightweight gallery owner entry
///
/// Same shape as [`Reference`] but a distinct type: gallery membership comes
/// from precomputed metadata, not from a body scan.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct GalleryMembership {
    /// Id of the gallery-owning post
    pub post_id: PostId,
    /// Content type of the owning post
    pub post_type: String,
    /// Title of the owning post
    pub title: String,
}

impl GalleryMembership {
    /// Build a membership entry from a post snapshot
    pub fn from_post(post: &Post) -> Self {
        Self {
            post_id: post.id,
            post_type: post.post_type.clone(),
            title: post.title.clone(),
        }
    }
}

impl PartialEq for GalleryMembership {
    fn eq(&self, other: &Self) -> bool {
        self.post_id == other.post_id
    }
}

/// Primary classification of an asset's declared parent linkage
///
/// The decision table is evaluated in order (first match wins):
/// unattached, then dangling pointer, then unsubstantiated parent, then
/// valid. `Orphan` never wins the primary slot because a parentless asset is
/// already `Unattached` or `InvalidParent`; it appears in the combined badge
/// set produced by [`AssetReferenceReport::badges`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParentState {
    /// Declared parent exists and uses the asset
    AttachedValid,
    /// Asset is referenced nowhere and has no valid owner
    Orphan,
    /// Parent id is zero: deliberately unattached
    Unattached,
    /// Parent resolves to a post that does not use the asset
    BadParent,
    /// Parent pointer is dangling
    InvalidParent,
}

impl ParentState {
    /// Badge text as the legacy screen printed it
    pub fn badge(&self) -> &'static str {
        match self {
            ParentState::AttachedValid => "ATTACHED",
            ParentState::Orphan => "ORPHAN",
            ParentState::Unattached => "UNATTACHED",
            ParentState::BadParent => "BAD PARENT",
            ParentState::InvalidParent => "INVALID PARENT",
        }
    }
}

/// Where-used report for one media asset
///
/// Built by the resolver from scanner output plus parent validation; see the
/// crate-level docs of `mediaref-resolver` for construction. All collections
/// are deterministically ordered (ascending post id; body keys in lexical
/// order) so an unchanged corpus yields a byte-identical serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetReferenceReport {
    /// The asset being queried
    pub asset_id: PostId,

    /// The asset's declared parent pointer at query time
    pub declared_parent_id: PostId,

    /// Primary parent-linkage classification
    pub parent_state: ParentState,

    /// `"(post_type) title"` of the resolved parent
    ///
    /// Populated for `AttachedValid` and for `BadParent` (the post resolved,
    /// its title is known, the linkage is merely unsubstantiated).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_summary: Option<String>,

    /// Declared parent resolved *and* uses the asset
    pub found_parent: bool,

    /// At least one reference of any kind was discovered
    pub found_any_reference: bool,

    /// Declared parent id is zero
    pub is_unattached: bool,

    /// Posts that designate the asset as their featured/cover image
    pub featured: Vec<Reference>,

    /// Inline references, keyed by the containing post's body text
    ///
    /// Each occurrence of a matching marker pushes one entry, so a body that
    /// embeds the asset twice lists the containing post twice under its key.
    pub inserted: BTreeMap<String, Vec<Reference>>,

    /// Native gallery constructs containing the asset
    pub native_galleries: Vec<GalleryMembership>,

    /// Custom gallery constructs containing the asset
    pub custom_galleries: Vec<GalleryMembership>,
}

impl AssetReferenceReport {
    /// Check whether any discovered reference names the given post
    pub fn references_post(&self, post_id: PostId) -> bool {
        self.featured.iter().any(|r| r.post_id == post_id)
            || self
                .inserted
                .values()
                .any(|refs| refs.iter().any(|r| r.post_id == post_id))
            || self.native_galleries.iter().any(|g| g.post_id == post_id)
            || self.custom_galleries.iter().any(|g| g.post_id == post_id)
    }

    /// Combined badge set, legacy-style
    ///
    /// The legacy screen showed every qualifying badge, not just the primary
    /// classification: an unused, unattached asset was `(ORPHAN) (UNATTACHED)`.
    /// An empty set means the parent linkage is valid.
    pub fn badges(&self) -> Vec<ParentState> {
        let mut badges = Vec::new();

        if self.found_parent {
            return badges;
        }

        if !self.found_any_reference {
            badges.push(ParentState::Orphan);
        }

        if self.is_unattached {
            badges.push(ParentState::Unattached);
        } else if self.parent_summary.is_some() {
            badges.push(ParentState::BadParent);
        } else {
            badges.push(ParentState::InvalidParent);
        }

        badges
    }

    /// Parent-info line as the legacy screen rendered it
    ///
    /// `"(page) Home"` for a valid parent, otherwise the concatenated badge
    /// list, e.g. `"(ORPHAN) (UNATTACHED) "`.
    pub fn parent_info(&self) -> String {
        if self.found_parent {
            return self.parent_summary.clone().unwrap_or_default();
        }

        self.badges()
            .iter()
            .map(|b| format!("({}) ", b.badge()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_report(asset_id: PostId, parent_id: PostId) -> AssetReferenceReport {
        AssetReferenceReport {
            asset_id,
            declared_parent_id: parent_id,
            parent_state: ParentState::Unattached,
            parent_summary: None,
            found_parent: false,
            found_any_reference: false,
            is_unattached: parent_id == 0,
            featured: Vec::new(),
            inserted: BTreeMap::new(),
            native_galleries: Vec::new(),
            custom_galleries: Vec::new(),
        }
    }

    #[test]
    fn test_reference_equality_is_by_post_id() {
        let a = Reference {
            post_id: 9,
            post_type: "post".to_string(),
            title: "Trip".to_string(),
        };
        let b = Reference {
            post_id: 9,
            post_type: "post".to_string(),
            title: "Renamed Trip".to_string(),
        };
        assert_eq!(a, b);
    }

    #[test]
    fn test_orphan_and_unattached_badges_combine() {
        let report = empty_report(50, 0);

        assert_eq!(
            report.badges(),
            vec![ParentState::Orphan, ParentState::Unattached]
        );
        assert_eq!(report.parent_info(), "(ORPHAN) (UNATTACHED) ");
    }

    #[test]
    fn test_bad_parent_badge_requires_summary() {
        let mut report = empty_report(50, 7);
        report.is_unattached = false;
        report.parent_state = ParentState::BadParent;
        report.parent_summary = Some("(page) Home".to_string());
        report.found_any_reference = true;

        assert_eq!(report.badges(), vec![ParentState::BadParent]);
        assert_eq!(report.parent_info(), "(BAD PARENT) ");
    }

    #[test]
    fn test_invalid_parent_badge_without_summary() {
        let mut report = empty_report(50, 999);
        report.is_unattached = false;
        report.parent_state = ParentState::InvalidParent;

        assert_eq!(
            report.badges(),
            vec![ParentState::Orphan, ParentState::InvalidParent]
        );
    }

    #[test]
    fn test_valid_parent_has_no_badges() {
        let mut report = empty_report(50, 9);
        report.is_unattached = false;
        report.found_parent = true;
        report.found_any_reference = true;
        report.parent_state = ParentState::AttachedValid;
        report.parent_summary = Some("(post) Trip".to_string());

        assert!(report.badges().is_empty());
        assert_eq!(report.parent_info(), "(post) Trip");
    }

    #[test]
    fn test_references_post_searches_all_kinds() {
        let mut report = empty_report(50, 0);
        report.inserted.insert(
            "body text".to_string(),
            vec![Reference {
                post_id: 11,
                post_type: "post".to_string(),
                title: "Notes".to_string(),
            }],
        );
        report.native_galleries.push(GalleryMembership {
            post_id: 12,
            post_type: "page".to_string(),
            title: "Album".to_string(),
        });

        assert!(report.references_post(11));
        assert!(report.references_post(12));
        assert!(!report.references_post(13));
    }
}
