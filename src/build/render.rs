use std::path::Path;

use serde::Serialize;
use tera::{Context, Tera};

use super::aggregate::TagGroup;
use super::paths::{root_prefix, tag_slug, tag_url};
use super::summary::PageSummary;

/// Templates compiled into the binary. A theme directory may override any
/// of them by name.
const DEFAULT_TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("../../themes/default/templates/base.html")),
    ("post.html", include_str!("../../themes/default/templates/post.html")),
    ("index.html", include_str!("../../themes/default/templates/index.html")),
    ("tag.html", include_str!("../../themes/default/templates/tag.html")),
    ("tags.html", include_str!("../../themes/default/templates/tags.html")),
];

#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    #[error("template error: {0}")]
    Template(#[from] tera::Error),

    #[error("theme not found: {0}")]
    ThemeNotFound(String),
}

/// The page renderer, wrapping Tera.
///
/// Rendering is pure: every method takes a context and returns the page
/// as a string. Writing it anywhere is the caller's job.
pub struct Renderer {
    tera: Tera,
}

impl Renderer {
    /// Create a renderer using only the built-in templates.
    pub fn embedded() -> Result<Self, RenderError> {
        let mut tera = Tera::default();
        tera.add_raw_templates(DEFAULT_TEMPLATES.to_vec())?;
        Ok(Self { tera })
    }

    /// Create a renderer loading templates from the given theme directory.
    ///
    /// Templates the theme doesn't provide fall back to the built-in ones.
    pub fn from_theme(theme_path: &Path) -> Result<Self, RenderError> {
        let templates_path = theme_path.join("templates");
        if !templates_path.is_dir() {
            return Err(RenderError::ThemeNotFound(
                theme_path.display().to_string(),
            ));
        }

        let glob = templates_path.join("**/*.html");
        let glob_str = glob.to_string_lossy();
        let mut tera = Tera::new(&glob_str)?;
        tera.extend(&Self::embedded()?.tera)?;

        Ok(Self { tera })
    }

    fn render<C: Serialize>(&self, template: &str, context: &C) -> Result<String, RenderError> {
        let context = Context::from_serialize(context)?;
        Ok(self.tera.render(template, &context)?)
    }

    /// Render a single post page.
    pub fn render_post(&self, context: &PostContext) -> Result<String, RenderError> {
        self.render("post.html", context)
    }

    /// Render the home page listing every post.
    pub fn render_index(&self, context: &IndexContext) -> Result<String, RenderError> {
        self.render("index.html", context)
    }

    /// Render the listing for one tag.
    pub fn render_tag(&self, context: &TagContext) -> Result<String, RenderError> {
        self.render("tag.html", context)
    }

    /// Render the list of all tags.
    pub fn render_tag_index(&self, context: &TagIndexContext) -> Result<String, RenderError> {
        self.render("tags.html", context)
    }
}

/// Site-level information.
#[derive(Debug, Clone, Serialize)]
pub struct SiteContext {
    pub title: String,
    pub tagline: Option<String>,
    pub description: String,
    /// Absolute base URL, used for feed links
    pub url: Option<String>,
    pub language: String,
    /// Site-relative feed location, when the feed is enabled
    pub feed_path: Option<String>,
}

/// A link to a tag page.
#[derive(Debug, Clone, Serialize)]
pub struct TagLink {
    pub name: String,
    pub url: String,
}

impl TagLink {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            url: tag_url(&tag_slug(name)),
        }
    }
}

/// Information about the current post.
#[derive(Debug, Serialize)]
pub struct PostInfo {
    pub title: String,
    pub date: String,
    pub url: String,
    pub tags: Vec<TagLink>,
}

impl PostInfo {
    pub fn from_summary(summary: &PageSummary) -> Self {
        Self {
            title: summary.title.clone(),
            date: summary.date.clone(),
            url: summary.url.clone(),
            tags: summary.tags.iter().map(|t| TagLink::new(t)).collect(),
        }
    }
}

/// Context passed to the post template.
#[derive(Debug, Serialize)]
pub struct PostContext {
    pub site: SiteContext,
    /// Relative prefix from this page back to the site root
    pub root: String,
    pub page: PostInfo,
    /// Converted body markup
    pub content: String,
}

impl PostContext {
    pub fn new(site: SiteContext, summary: &PageSummary, content: String) -> Self {
        Self {
            site,
            root: root_prefix(&summary.url),
            page: PostInfo::from_summary(summary),
            content,
        }
    }
}

/// Context passed to the index template.
#[derive(Debug, Serialize)]
pub struct IndexContext {
    pub site: SiteContext,
    pub root: String,
    pub posts: Vec<PageSummary>,
    /// JSON array of every summary, embedded for client-side search
    pub search_index: String,
}

/// Context passed to the tag template.
#[derive(Debug, Serialize)]
pub struct TagContext {
    pub site: SiteContext,
    pub root: String,
    pub tag: String,
    pub posts: Vec<PageSummary>,
}

impl TagContext {
    pub fn new(site: SiteContext, group: &TagGroup) -> Self {
        Self {
            site,
            root: root_prefix(&group.url()),
            tag: group.name.clone(),
            posts: group.posts.clone(),
        }
    }
}

/// One row of the tag index.
#[derive(Debug, Serialize)]
pub struct TagEntry {
    pub name: String,
    /// URL relative to the tag index page
    pub url: String,
    pub count: usize,
}

/// Context passed to the tag index template.
#[derive(Debug, Serialize)]
pub struct TagIndexContext {
    pub site: SiteContext,
    pub root: String,
    pub tags: Vec<TagEntry>,
}
