//! schema.org JSON-LD structured data.

use serde_json::json;

use super::{PageKind, ResolvedSeo, DEFAULT_JOB_TITLE, KNOWS_ABOUT};

/// Build the JSON-LD script tag for a resolved SEO record.
///
/// Articles become a `BlogPosting`, everything else a `Person`. The JSON is
/// embedded verbatim inside the script tag — values are trusted not to
/// contain `</script>`, a known limitation of this format.
pub fn structured_data_script(seo: &ResolvedSeo) -> String {
    let mut data = json!({
        "@context": "https://schema.org",
        "@type": match seo.kind {
            PageKind::Article => "BlogPosting",
            PageKind::Website => "Person",
        },
        "name": seo.title,
        "description": seo.description,
        "url": seo.url,
    });

    match seo.kind {
        PageKind::Article => {
            data["headline"] = json!(seo.title);
            if let Some(published) = &seo.published_time {
                data["datePublished"] = json!(published);
            }
            // Articles without an explicit modification date reuse the
            // publication date.
            if let Some(modified) = seo.modified_time.as_ref().or(seo.published_time.as_ref()) {
                data["dateModified"] = json!(modified);
            }
            data["author"] = json!({
                "@type": "Person",
                "name": seo.author,
            });
        }
        PageKind::Website => {
            data["jobTitle"] = json!(DEFAULT_JOB_TITLE);
            data["knowsAbout"] = json!(KNOWS_ABOUT);
        }
    }

    format!(r#"<script type="application/ld+json">{}</script>"#, data)
}
