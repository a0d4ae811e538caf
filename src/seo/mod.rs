//! SEO meta-tag generation for server-rendered pages.
//!
//! Pure string assembly: an [`SeoData`] record goes in, an ordered block of
//! `<title>`/meta/link/JSON-LD tags comes out. Nothing here touches the
//! network, which keeps the whole pipeline unit-testable.

mod structured;

pub use structured::structured_data_script;

/// Public origin the site is served from; canonical URLs are built on top.
pub const SITE_ORIGIN: &str = "https://dotunlonge.vercel.app";
/// Site owner, used for author metas and blog post titles.
pub const SITE_AUTHOR: &str = "Oludotun Longe";
/// Open Graph site_name value.
pub const SITE_NAME: &str = "Oludotun Longe Portfolio";

const DEFAULT_TITLE: &str = "Oludotun Longe - Senior Software Engineer";
const DEFAULT_DESCRIPTION: &str = "Senior Software Engineer with 8+ years experience building \
high-performance systems, full-stack applications, and AI/Web3 products.";
const DEFAULT_IMAGE: &str = "https://dotunlonge.vercel.app/og-image.jpg";

pub(crate) const DEFAULT_JOB_TITLE: &str = "Senior Software Engineer";
pub(crate) const KNOWS_ABOUT: [&str; 5] = [
    "TypeScript",
    "Rust",
    "AI/LLMs",
    "Web3",
    "Full Stack Development",
];

/// Whether a page is the portfolio itself or a blog article. Articles unlock
/// the `article:*` meta block and the BlogPosting structured-data shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PageKind {
    #[default]
    Website,
    Article,
}

impl PageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PageKind::Website => "website",
            PageKind::Article => "article",
        }
    }
}

/// SEO record for one page. Every field is optional; [`SeoData::resolve`]
/// applies the site defaults.
#[derive(Debug, Clone, Default)]
pub struct SeoData {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub url: Option<String>,
    pub kind: PageKind,
    pub author: Option<String>,
    pub published_time: Option<String>,
    pub modified_time: Option<String>,
    pub tags: Vec<String>,
}

/// [`SeoData`] with defaults applied; what the tag generators consume.
#[derive(Debug, Clone)]
pub struct ResolvedSeo {
    pub title: String,
    pub description: String,
    pub image: String,
    pub url: String,
    pub kind: PageKind,
    pub author: String,
    pub published_time: Option<String>,
    pub modified_time: Option<String>,
    pub tags: Vec<String>,
}

impl SeoData {
    /// Default-resolution: each unset field falls back to the site-wide value.
    /// Publication timestamps have no default; absent means "do not emit".
    pub fn resolve(&self) -> ResolvedSeo {
        ResolvedSeo {
            title: self.title.clone().unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            description: self
                .description
                .clone()
                .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
            image: self.image.clone().unwrap_or_else(|| DEFAULT_IMAGE.to_string()),
            url: self.url.clone().unwrap_or_else(|| SITE_ORIGIN.to_string()),
            kind: self.kind,
            author: self.author.clone().unwrap_or_else(|| SITE_AUTHOR.to_string()),
            published_time: self.published_time.clone(),
            modified_time: self.modified_time.clone(),
            tags: self.tags.clone(),
        }
    }
}

/// Replace the five HTML-reserved characters with named entities.
///
/// Not idempotent: escaping an already-escaped string double-escapes the `&`
/// in each entity. Callers escape raw content exactly once, at the point of
/// interpolation.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            other => out.push(other),
        }
    }
    out
}

/// Generate the full ordered meta-tag block for one page.
///
/// Order: title, description, author, keywords, Open Graph, Twitter Card,
/// article block (articles only), canonical link, JSON-LD script. Empty
/// intermediates are filtered out before joining.
pub fn generate_meta_tags(data: &SeoData) -> String {
    let seo = data.resolve();

    let mut tags: Vec<String> = vec![
        format!("<title>{}</title>", escape_html(&seo.title)),
        format!(
            r#"<meta name="description" content="{}">"#,
            escape_html(&seo.description)
        ),
        format!(r#"<meta name="author" content="{}">"#, escape_html(&seo.author)),
    ];
    tags.extend(
        seo.tags
            .iter()
            .map(|tag| format!(r#"<meta name="keywords" content="{}">"#, escape_html(tag))),
    );

    // Open Graph
    tags.push(format!(
        r#"<meta property="og:title" content="{}">"#,
        escape_html(&seo.title)
    ));
    tags.push(format!(
        r#"<meta property="og:description" content="{}">"#,
        escape_html(&seo.description)
    ));
    tags.push(format!(
        r#"<meta property="og:type" content="{}">"#,
        seo.kind.as_str()
    ));
    tags.push(format!(
        r#"<meta property="og:url" content="{}">"#,
        escape_html(&seo.url)
    ));
    tags.push(format!(
        r#"<meta property="og:image" content="{}">"#,
        escape_html(&seo.image)
    ));
    tags.push(format!(
        r#"<meta property="og:site_name" content="{}">"#,
        SITE_NAME
    ));

    // Twitter Card
    tags.push(r#"<meta name="twitter:card" content="summary_large_image">"#.to_string());
    tags.push(format!(
        r#"<meta name="twitter:title" content="{}">"#,
        escape_html(&seo.title)
    ));
    tags.push(format!(
        r#"<meta name="twitter:description" content="{}">"#,
        escape_html(&seo.description)
    ));
    tags.push(format!(
        r#"<meta name="twitter:image" content="{}">"#,
        escape_html(&seo.image)
    ));

    // Article metas only exist for blog posts; timestamps are emitted as-is.
    if seo.kind == PageKind::Article {
        if let Some(published) = &seo.published_time {
            tags.push(format!(
                r#"<meta property="article:published_time" content="{}">"#,
                published
            ));
        }
        if let Some(modified) = &seo.modified_time {
            tags.push(format!(
                r#"<meta property="article:modified_time" content="{}">"#,
                modified
            ));
        }
        tags.extend(seo.tags.iter().map(|tag| {
            format!(r#"<meta property="article:tag" content="{}">"#, escape_html(tag))
        }));
    }

    tags.push(format!(
        r#"<link rel="canonical" href="{}">"#,
        escape_html(&seo.url)
    ));
    tags.push(structured_data_script(&seo));

    tags.retain(|tag| !tag.is_empty());
    tags.join("\n  ")
}
