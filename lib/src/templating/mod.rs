pub mod minijinja;

use std::fmt::Debug;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{Chainable, Result};
use crate::lesson::{Category, LessonData, LessonId};
use crate::manifest::Manifest;
use crate::value::Sink;

pub const LESSON_TEMPLATE: &str = "lesson.html";
pub const INDEX_TEMPLATE: &str = "index.html";

/// The templates every engine starts with, by name.
pub const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    (LESSON_TEMPLATE, include_str!("../../templates/lesson.html")),
    (INDEX_TEMPLATE, include_str!("../../templates/index.html")),
];

pub fn builtin_template(name: &str) -> Option<&'static str> {
    BUILTIN_TEMPLATES.iter()
        .find(|(n, _)| *n == name)
        .map(|(_, source)| *source)
}

/// Writes each built-in template into `dir` unless a file with its name is
/// already there. Returns the paths written.
pub fn ensure_templates<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let mut written = vec![];
    for (name, source) in BUILTIN_TEMPLATES {
        let path = dir.join(name);
        if path.exists() {
            tracing::debug!(path = %path.display(), "keeping existing template");
            continue;
        }

        path.write(source).chain_with(|| error! {
            "failed to write default template",
            "template" => name,
        })?;

        written.push(path);
    }

    Ok(written)
}

/// Course-wide values available to every template as `course`.
#[derive(Debug, Clone, Serialize)]
pub struct CourseInfo {
    pub title: String,
    pub lang: String,
    pub copyright: String,
    pub icons: String,
}

/// Everything needed to render one lesson page.
#[derive(Debug)]
pub struct LessonPage<'a> {
    pub id: LessonId,
    pub data: &'a LessonData,
    /// Rendered body, see [`content_html`](crate::render::content_html).
    pub content: String,
    /// Rendered links, see [`navigation_html`](crate::render::navigation_html).
    pub navigation: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexEntry {
    pub id: String,
    pub number: u32,
    pub title: String,
    pub category: Category,
    pub file: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryGroup {
    pub category: Category,
    pub lessons: Vec<IndexEntry>,
}

/// The table of contents: every recorded lesson in number order, and the
/// same lessons grouped by category. Groups are ordered by their first
/// lesson.
#[derive(Debug, Clone, Serialize)]
pub struct IndexPage {
    pub lessons: Vec<IndexEntry>,
    pub categories: Vec<CategoryGroup>,
    #[serde(skip)]
    pub date: NaiveDate,
}

impl IndexPage {
    pub fn from_manifest(manifest: &Manifest, date: NaiveDate) -> Self {
        let lessons: Vec<_> = manifest.lessons_in_order()
            .map(|(id, record)| IndexEntry {
                id: id.to_string(),
                number: id.number(),
                title: record.title.clone(),
                category: record.category.clone(),
                file: id.file_name(),
            })
            .collect();

        let mut categories: Vec<CategoryGroup> = vec![];
        for entry in &lessons {
            match categories.iter_mut().find(|g| g.category == entry.category) {
                Some(group) => group.lessons.push(entry.clone()),
                None => categories.push(CategoryGroup {
                    category: entry.category.clone(),
                    lessons: vec![entry.clone()],
                }),
            }
        }

        IndexPage { lessons, categories, date }
    }
}

pub trait EngineInit {
    type Engine: Engine + 'static;

    /// Builds an engine. Templates found in `templates` replace the built-in
    /// templates of the same name. `globals` are exposed as `G`.
    fn init<G: Serialize>(
        templates: Option<&Path>,
        course: &CourseInfo,
        globals: G,
    ) -> Result<Self::Engine>;
}

pub trait Engine: Send + Sync + Debug {
    fn render_lesson(&self, page: &LessonPage<'_>) -> Result<String>;

    fn render_index(&self, page: &IndexPage) -> Result<String>;
}
