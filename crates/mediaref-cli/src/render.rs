//! Report rendering
//!
//! Prints the report the way the legacy admin screen laid it out: a Parent
//! Info line, then one pane per reference kind. Lines owned by the declared
//! parent get a `PARENT ` prefix, matching the old display.

use mediaref_core::{AssetReferenceReport, GalleryMembership, Post, PostId, Reference};

/// Longest body-key excerpt shown as an inserted-pane heading
const BODY_KEY_WIDTH: usize = 60;

/// Render the full report
pub fn render_report(report: &AssetReferenceReport, asset: Option<&Post>) -> String {
    let mut out = String::new();

    out.push_str(&format!("Asset: {}\n", report.asset_id));
    if let Some(asset) = asset {
        out.push_str(&format!("Title: {}\n", asset.title));
        out.push_str(&format!(
            "Last modified: {}\n",
            asset.updated_at.format("%b %e, %Y @ %H:%M")
        ));
    }
    out.push('\n');

    out.push_str("== Parent Info ==\n");
    out.push_str(&format!(
        "{} {}\n\n",
        report.declared_parent_id,
        report.parent_info().trim_end()
    ));

    out.push_str("== Featured in ==\n");
    for reference in &report.featured {
        out.push_str(&reference_line(reference, report.declared_parent_id, ""));
    }
    out.push('\n');

    out.push_str("== Inserted in ==\n");
    for (body, references) in &report.inserted {
        out.push_str(&format!("{}\n", body_key_label(body)));
        for reference in references {
            out.push_str(&reference_line(reference, report.declared_parent_id, "  "));
        }
    }
    out.push('\n');

    out.push_str("== Gallery in ==\n");
    for gallery in &report.native_galleries {
        out.push_str(&gallery_line(gallery, report.declared_parent_id));
    }
    out.push('\n');

    out.push_str("== Custom Gallery in ==\n");
    for gallery in &report.custom_galleries {
        out.push_str(&gallery_line(gallery, report.declared_parent_id));
    }

    out
}

fn reference_line(reference: &Reference, declared_parent: PostId, indent: &str) -> String {
    format!(
        "{}{}({} {}), {}\n",
        indent,
        parent_prefix(reference.post_id, declared_parent),
        reference.post_type,
        reference.post_id,
        reference.title
    )
}

fn gallery_line(gallery: &GalleryMembership, declared_parent: PostId) -> String {
    format!(
        "{}({} {}), {}\n",
        parent_prefix(gallery.post_id, declared_parent),
        gallery.post_type,
        gallery.post_id,
        gallery.title
    )
}

fn parent_prefix(post_id: PostId, declared_parent: PostId) -> &'static str {
    if post_id == declared_parent {
        "PARENT "
    } else {
        ""
    }
}

/// Shorten a body key to a single readable heading line
fn body_key_label(body: &str) -> String {
    let flat = body.replace(['\n', '\r'], " ");
    if flat.chars().count() <= BODY_KEY_WIDTH {
        return flat;
    }
    let excerpt: String = flat.chars().take(BODY_KEY_WIDTH).collect();
    format!("{}...", excerpt)
}
