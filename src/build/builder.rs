use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::config::Config;

use super::document::Document;
use super::pipeline::{DateStage, Pipeline, PipelineContext, PipelineError, ProcessingDocument};
use super::render::{RenderError, Renderer, SiteContext};
use super::source::{PostsSource, SourceError};
use super::summary::PageSummary;

#[derive(thiserror::Error, Debug)]
pub enum BuildError {
    #[error("source error: {0}")]
    Source(#[from] SourceError),

    #[error("render error: {0}")]
    Render(#[from] RenderError),

    #[error("pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    #[error("posts {first} and {second} both map to 'posts/{slug}.html'")]
    DuplicateSlug {
        slug: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("failed to create output directory {path}: {source}")]
    CreateOutput {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug)]
pub struct BuildResult {
    pub output_dir: PathBuf,
    pub documents: usize,
    pub tags: usize,
    pub feed_entries: usize,
    /// Every file written, in write order
    pub files: Vec<PathBuf>,
}

pub struct Builder {
    config: Config,
    /// Base path for resolving relative paths (typically the config file's directory)
    base_path: PathBuf,
    /// Date given to documents without one
    today: NaiveDate,
}

impl Builder {
    pub fn new(config: Config, base_path: PathBuf) -> Self {
        Self {
            config,
            base_path,
            today: chrono::Local::now().date_naive(),
        }
    }

    /// Fix the build date, making the output independent of when it runs.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn build(&self) -> Result<BuildResult, BuildError> {
        // Build pipeline:
        // 1. Resolve the posts directory and load documents
        // 2. Load renderer (templates)
        // 3. Summarize each document
        // 4. Run the stages, aggregate, run the finalize stages

        let source = PostsSource::resolve(&self.resolve(&self.config.content.posts))?;
        let documents = source.load_documents()?;
        tracing::info!(
            "found {} post(s) in {}",
            documents.len(),
            source.local_path.display()
        );
        check_unique_slugs(&documents)?;

        let renderer = match &self.config.theme.path {
            Some(theme) => Renderer::from_theme(&self.resolve(theme))?,
            None => Renderer::embedded()?,
        };

        let output_dir = self.resolve(&self.config.site.output);
        std::fs::create_dir_all(&output_dir).map_err(|source| BuildError::CreateOutput {
            path: output_dir.clone(),
            source,
        })?;

        let site = self.site_context();
        let excerpt_length = self.config.build.excerpt_length;
        let mut docs: Vec<ProcessingDocument> = documents
            .into_iter()
            .map(|doc| {
                let summary = PageSummary::from_document(&doc, self.today, excerpt_length);
                ProcessingDocument::new(doc, summary)
            })
            .collect();

        let mut pipeline = Pipeline::default_pipeline();
        if self.config.build.require_date {
            pipeline.insert_before("markdown", DateStage);
        }
        tracing::debug!("stages: {}", pipeline.stage_names().join(" → "));

        let mut ctx = PipelineContext::new(&output_dir, &site, &renderer, self.config.feed.limit);
        let aggregate = pipeline.run(&mut docs, &mut ctx)?;
        let files = ctx.written;

        Ok(BuildResult {
            output_dir,
            documents: docs.len(),
            tags: aggregate.tags.len(),
            feed_entries: if site.feed_path.is_some() {
                aggregate.feed.len()
            } else {
                0
            },
            files,
        })
    }

    /// Resolve a configured path against base_path.
    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_relative() {
            self.base_path.join(path)
        } else {
            path.to_path_buf()
        }
    }

    fn site_context(&self) -> SiteContext {
        let site = &self.config.site;
        SiteContext {
            title: site.title.clone(),
            tagline: site.tagline.clone(),
            description: site.description.clone(),
            url: site.url.clone(),
            language: site.language.clone(),
            feed_path: self
                .config
                .feed
                .enabled
                .then(|| self.config.feed.path.clone()),
        }
    }
}

/// Two files whose names sanitize to the same slug would overwrite each other.
fn check_unique_slugs(documents: &[Document]) -> Result<(), BuildError> {
    let mut seen: HashMap<&str, &Path> = HashMap::new();
    for doc in documents {
        if let Some(first) = seen.insert(&doc.slug, &doc.source_path) {
            return Err(BuildError::DuplicateSlug {
                slug: doc.slug.clone(),
                first: first.to_path_buf(),
                second: doc.source_path.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn date(value: &str) -> NaiveDate {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
    }

    struct Site {
        dir: tempfile::TempDir,
    }

    impl Site {
        fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            fs::create_dir(dir.path().join("_posts")).unwrap();
            Self { dir }
        }

        fn post(&self, name: &str, contents: &str) -> &Self {
            fs::write(self.dir.path().join("_posts").join(name), contents).unwrap();
            self
        }

        fn build_with(&self, config: Config) -> Result<BuildResult, BuildError> {
            Builder::new(config, self.dir.path().to_path_buf())
                .with_today(date("2025-06-30"))
                .build()
        }

        fn build(&self) -> BuildResult {
            self.build_with(Config::default()).unwrap()
        }

        fn read(&self, path: &str) -> String {
            fs::read_to_string(self.dir.path().join("_site").join(path)).unwrap()
        }

        fn exists(&self, path: &str) -> bool {
            self.dir.path().join("_site").join(path).is_file()
        }
    }

    fn search_index(index_html: &str) -> serde_json::Value {
        let start_tag = r#"<script type="application/json" id="posts-data">"#;
        let start = index_html.find(start_tag).unwrap() + start_tag.len();
        let end = start + index_html[start..].find("</script>").unwrap();
        serde_json::from_str(&index_html[start..end]).unwrap()
    }

    #[test]
    fn test_single_post() {
        let site = Site::new();
        site.post(
            "hello.md",
            "---\ntitle: Hello\ndate: 2024-01-01\ntags: [intro]\n---\n# Hi\nBody text.",
        );
        let result = site.build();

        assert_eq!(result.documents, 1);
        assert_eq!(result.tags, 1);
        assert_eq!(result.feed_entries, 1);

        let page = site.read("posts/hello.html");
        assert!(page.contains("<h1>Hi</h1>"));
        assert!(page.contains("<p>Body text.</p>"));
        assert!(page.contains("Hello"));
        assert!(page.contains("2024-01-01"));
        assert!(page.contains("intro"));

        let index = search_index(&site.read("index.html"));
        assert_eq!(index[0]["title"], "Hello");
        assert_eq!(index[0]["excerpt"], "# Hi");
        assert_eq!(index[0]["url"], "posts/hello.html");
    }

    #[test]
    fn test_index_newest_first() {
        let site = Site::new();
        site.post("a.md", "---\ntitle: January\ndate: 2024-01-01\n---\nJan")
            .post("b.md", "---\ntitle: February\ndate: 2024-02-01\n---\nFeb");
        site.build();

        let index = site.read("index.html");
        let feb = index.find("February").unwrap();
        let jan = index.find("January").unwrap();
        assert!(feb < jan);

        let titles: Vec<_> = search_index(&index)
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["title"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(titles, vec!["February", "January"]);
    }

    #[test]
    fn test_equal_dates_keep_file_order() {
        let site = Site::new();
        site.post("b.md", "---\ntitle: Second\ndate: 2024-01-01\n---\n")
            .post("a.md", "---\ntitle: First\ndate: 2024-01-01\n---\n");
        site.build();

        let titles: Vec<_> = search_index(&site.read("index.html"))
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["title"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(titles, vec!["First", "Second"]);
    }

    #[test]
    fn test_tag_pages() {
        let site = Site::new();
        site.post("post.md", "---\ntitle: Both\ndate: 2024-01-01\ntags: [go, rust]\n---\nx");
        let result = site.build();
        assert_eq!(result.tags, 2);

        assert!(site.read("tags/go.html").contains("Both"));
        assert!(site.read("tags/rust.html").contains("Both"));

        let tag_index = site.read("tags/index.html");
        assert!(tag_index.contains("go.html"));
        assert!(tag_index.contains("rust.html"));
        assert_eq!(tag_index.matches("(1)").count(), 2);
    }

    #[test]
    fn test_index_tag_keeps_its_own_page() {
        let site = Site::new();
        site.post("alpha.md", "---\ntitle: Alpha\ndate: 2024-01-01\ntags: [index, rust]\n---\nx");
        let result = site.build();
        assert_eq!(result.tags, 2);

        let index_tag = site.read("tags/index-.html");
        assert!(index_tag.contains("Tag: index"));
        assert!(index_tag.contains("Alpha"));

        let tag_index = site.read("tags/index.html");
        assert!(tag_index.contains("<h2>Tags</h2>"));
        assert!(tag_index.contains(r#"href="index-.html""#));
        assert!(tag_index.contains(r#"href="rust.html""#));

        assert!(site.read("posts/alpha.html").contains("../tags/index-.html"));
    }

    #[test]
    fn test_missing_date_uses_build_date() {
        let site = Site::new();
        site.post("undated.md", "---\ntitle: Undated\n---\nBody");
        site.build();

        let index = search_index(&site.read("index.html"));
        assert_eq!(index[0]["date"], "2025-06-30");
    }

    #[test]
    fn test_feed_has_twenty_most_recent() {
        let site = Site::new();
        for day in 1..=25 {
            site.post(
                &format!("p{day:02}.md"),
                &format!("---\ntitle: Post {day}\ndate: 2024-03-{day:02}\n---\nBody"),
            );
        }
        let result = site.build();
        assert_eq!(result.feed_entries, 20);

        let channel = rss::Channel::read_from(site.read("feed.xml").as_bytes()).unwrap();
        let links: Vec<_> = channel.items().iter().filter_map(|i| i.link()).collect();
        assert_eq!(links.len(), 20);
        assert_eq!(links[0], "posts/p25.html");
        assert_eq!(links[19], "posts/p06.html");
    }

    #[test]
    fn test_feed_disabled() {
        let site = Site::new();
        site.post("a.md", "---\ntitle: A\ndate: 2024-01-01\n---\n");
        let mut config = Config::default();
        config.feed.enabled = false;
        let result = site.build_with(config).unwrap();

        assert_eq!(result.feed_entries, 0);
        assert!(!site.exists("feed.xml"));
        assert!(!site.read("index.html").contains("feed.xml"));
    }

    #[test]
    fn test_feed_cannot_replace_a_page() {
        let site = Site::new();
        site.post("a.md", "---\ntitle: A\ndate: 2024-01-01\n---\n");
        let mut config = Config::default();
        config.feed.path = "index.html".to_string();

        assert!(matches!(
            site.build_with(config),
            Err(BuildError::Pipeline(PipelineError::Overwrite { .. }))
        ));
        assert!(site.read("index.html").contains("posts/a.html"));
    }

    #[test]
    fn test_builds_are_byte_identical() {
        let site = Site::new();
        site.post("a.md", "---\ntitle: A\ntags: [x, y]\n---\n# A\n- one\n- two")
            .post("b.md", "---\ntitle: B\ndate: 2024-05-05\ntags: [y]\n---\n```\ncode\n```");

        let first = site.build();
        let snapshot: Vec<(PathBuf, Vec<u8>)> = first
            .files
            .iter()
            .map(|p| (p.clone(), fs::read(p).unwrap()))
            .collect();

        let second = site.build();
        assert_eq!(first.files, second.files);
        for (path, bytes) in snapshot {
            assert_eq!(fs::read(&path).unwrap(), bytes, "{} changed", path.display());
        }
    }

    #[test]
    fn test_index_links_resolve() {
        let site = Site::new();
        site.post("one.md", "---\ntitle: One\ntags: [a b, c/d]\n---\n")
            .post("two words.md", "---\ntitle: Two\n---\n");
        site.build();

        let index = site.read("index.html");
        for summary in search_index(&index).as_array().unwrap() {
            let url = summary["url"].as_str().unwrap();
            assert!(index.contains(url));
            assert!(site.exists(url), "missing {url}");
        }
        assert!(site.exists("tags/a-b.html"));
        assert!(site.exists("tags/c-d.html"));
        assert!(site.exists("posts/two-words.html"));
    }

    #[test]
    fn test_empty_posts_directory() {
        let site = Site::new();
        let result = site.build();

        assert_eq!(result.documents, 0);
        assert!(site.exists("index.html"));
        assert!(site.exists("tags/index.html"));
        assert!(site.exists("feed.xml"));
    }

    #[test]
    fn test_missing_posts_directory() {
        let dir = tempfile::tempdir().unwrap();
        let result = Builder::new(Config::default(), dir.path().to_path_buf()).build();

        assert!(matches!(
            result,
            Err(BuildError::Source(SourceError::PathNotFound(_)))
        ));
        assert!(!dir.path().join("_site").exists());
    }

    #[test]
    fn test_require_date() {
        let site = Site::new();
        site.post("undated.md", "---\ntitle: Undated\n---\nBody");
        let mut config = Config::default();
        config.build.require_date = true;

        assert!(matches!(
            site.build_with(config.clone()),
            Err(BuildError::Pipeline(PipelineError::Stage { .. }))
        ));

        site.post("undated.md", "---\ntitle: Dated\ndate: 2024-1-1\n---\nBody");
        assert!(site.build_with(config.clone()).is_err());

        site.post("undated.md", "---\ntitle: Dated\ndate: 2024-01-01\n---\nBody");
        assert!(site.build_with(config).is_ok());
    }

    #[test]
    fn test_duplicate_slugs_fail() {
        let site = Site::new();
        site.post("a b.md", "x").post("a-b.md", "y");

        assert!(matches!(
            site.build_with(Config::default()),
            Err(BuildError::DuplicateSlug { .. })
        ));
    }

    #[test]
    fn test_theme_overrides_template() {
        let site = Site::new();
        site.post("a.md", "---\ntitle: A\n---\nbody");
        let templates = site.dir.path().join("theme/templates");
        fs::create_dir_all(&templates).unwrap();
        fs::write(templates.join("post.html"), "CUSTOM {{ page.title }}").unwrap();

        let mut config = Config::default();
        config.theme.path = Some(PathBuf::from("theme"));
        site.build_with(config).unwrap();

        assert_eq!(site.read("posts/a.html"), "CUSTOM A");
        assert!(site.read("index.html").contains("posts/a.html"));
    }
}
