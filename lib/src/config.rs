//! Course configuration, read from `course.toml` in the course directory.

use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{Chainable, Result};
use crate::lesson::Category;
use crate::render::DEFAULT_TOTAL_LESSONS;
use crate::research::{CatalogResearcher, Overrides};
use crate::templating::CourseInfo;
use crate::value::{Format, Toml};

pub const CONFIG_FILE: &str = "course.toml";
pub const METADATA_FILE: &str = "course_metadata.json";
pub const INDEX_FILE: &str = "index.html";
pub const LESSONS_DIR: &str = "lessons";
pub const ASSETS_DIR: &str = "assets";
pub const SCREENSHOTS_DIR: &str = "screenshots";
pub const TEMPLATES_DIR: &str = "templates";

const BUILTIN_CONFIG: &str = include_str!("../defaults/course.toml");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "defaults::title")]
    pub title: String,
    #[serde(default = "defaults::lang")]
    pub lang: String,
    #[serde(default = "defaults::copyright")]
    pub copyright: String,
    #[serde(default = "defaults::icons")]
    pub icons: String,
    #[serde(default = "defaults::total_lessons")]
    pub total_lessons: u32,
    #[serde(default, rename = "track")]
    pub tracks: Vec<Track>,
    #[serde(default, rename = "lesson")]
    pub lessons: Vec<SingleLesson>,
    /// Every other top-level key, available to templates as `G`.
    #[serde(flatten)]
    pub globals: FxHashMap<String, toml::Value>,
}

mod defaults {
    pub fn title() -> String { "옵시디언 마스터 클래스".into() }
    pub fn lang() -> String { "ko".into() }
    pub fn copyright() -> String { "2025 옵시디언 마스터 클래스".into() }
    pub fn total_lessons() -> u32 { super::DEFAULT_TOTAL_LESSONS }
    pub fn start() -> u32 { 1 }

    pub fn icons() -> String {
        "https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.0.0/css/all.min.css".into()
    }
}

/// A run of consecutive lessons in one category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub category: Category,
    #[serde(default = "defaults::start")]
    pub start: u32,
    #[serde(default)]
    pub topics: Vec<Topic>,
}

/// A topic is either just its title or a table with a `title` and any
/// research [`Overrides`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Topic {
    Title(String),
    Detailed {
        title: String,
        #[serde(flatten)]
        overrides: Overrides,
    },
}

impl Topic {
    pub fn title(&self) -> &str {
        match self {
            Topic::Title(title) | Topic::Detailed { title, .. } => title,
        }
    }

    pub fn overrides(&self) -> Option<&Overrides> {
        match self {
            Topic::Title(_) => None,
            Topic::Detailed { overrides, .. } => Some(overrides),
        }
    }
}

impl AsRef<str> for Topic {
    fn as_ref(&self) -> &str {
        self.title()
    }
}

impl From<&str> for Topic {
    fn from(title: &str) -> Self {
        Topic::Title(title.to_string())
    }
}

/// An entry in the single-lesson table: generated on demand by number.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SingleLesson {
    pub number: u32,
    pub topic: String,
    #[serde(default)]
    pub category: Category,
    #[serde(flatten)]
    pub overrides: Overrides,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            title: defaults::title(),
            lang: defaults::lang(),
            copyright: defaults::copyright(),
            icons: defaults::icons(),
            total_lessons: defaults::total_lessons(),
            tracks: vec![],
            lessons: vec![],
            globals: FxHashMap::default(),
        }
    }
}

impl Settings {
    /// The default course: ten basics lessons and the single-lesson table
    /// for lessons 32 through 35.
    pub fn builtin() -> Result<Self> {
        Self::parse(BUILTIN_CONFIG).chain(error!("built-in course configuration is invalid"))
    }

    pub fn parse(string: &str) -> Result<Self> {
        let settings: Settings = Toml::read(string)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let settings: Settings = Toml::read(path).chain_with(|| error! {
            "failed to parse course configuration",
            "config file" => path.display(),
        })?;

        settings.validate().chain_with(|| error! {
            "invalid course configuration",
            "config file" => path.display(),
        })?;

        Ok(settings)
    }

    /// Finds the settings for the course in `base`: the explicit `config`
    /// file if one is given, otherwise `base/course.toml` if it exists,
    /// otherwise the built-in course.
    pub fn discover<P: AsRef<Path>>(base: P, config: Option<&Path>) -> Result<Self> {
        match config {
            Some(path) if !path.is_file() => err! {
                "configuration file does not exist",
                "config file" => path.display(),
            },
            Some(path) => Self::read(path),
            None => {
                let path = base.as_ref().join(CONFIG_FILE);
                if path.is_file() {
                    Self::read(&path)
                } else {
                    tracing::debug!(path = %path.display(), "no course configuration; using built-in course");
                    Self::builtin()
                }
            }
        }
    }

    /// Logs a warning for every override key that names no lesson field.
    fn warn_unknown_keys(&self) {
        let topics = self.tracks.iter()
            .flat_map(|t| t.topics.iter())
            .filter_map(|t| Some((t.title(), t.overrides()?)));

        let lessons = self.lessons.iter().map(|l| (l.topic.as_str(), &l.overrides));
        for (topic, overrides) in topics.chain(lessons) {
            for key in overrides.unknown_keys() {
                tracing::warn!(topic, key, "ignoring unknown lesson field in course configuration");
            }
        }
    }

    fn validate(&self) -> Result<()> {
        self.warn_unknown_keys();
        if self.total_lessons == 0 {
            return err!("`total_lessons` must be at least 1");
        }

        if let Some(track) = self.tracks.iter().find(|t| t.start == 0) {
            return err! {
                "lesson numbers start at 1",
                "track category" => &track.category,
            };
        }

        for track in &self.tracks {
            if let Some(last) = track.topics.len().checked_sub(1) {
                crate::generator::lesson_id(track.start, last).chain_with(|| error! {
                    "track does not fit in the lesson numbers",
                    "track category" => &track.category,
                })?;
            }
        }

        if let Some(lesson) = self.lessons.iter().find(|l| l.number == 0) {
            return err! {
                "lesson numbers start at 1",
                "lesson topic" => &lesson.topic,
            };
        }

        for (i, lesson) in self.lessons.iter().enumerate() {
            if self.lessons[..i].iter().any(|l| l.number == lesson.number) {
                return err! {
                    "duplicate entry in the single-lesson table",
                    "lesson number" => lesson.number,
                };
            }
        }

        Ok(())
    }

    pub fn course_info(&self) -> CourseInfo {
        CourseInfo {
            title: self.title.clone(),
            lang: self.lang.clone(),
            copyright: self.copyright.clone(),
            icons: self.icons.clone(),
        }
    }

    /// The single-lesson table entry for `number`, if any.
    pub fn lesson(&self, number: u32) -> Option<&SingleLesson> {
        self.lessons.iter().find(|l| l.number == number)
    }

    /// A researcher that knows every topic override in these settings.
    pub fn researcher(&self) -> CatalogResearcher {
        let mut researcher = CatalogResearcher::new();
        for track in &self.tracks {
            for topic in &track.topics {
                if let Some(overrides) = topic.overrides() {
                    researcher.insert(track.category.clone(), topic.title(), overrides.clone());
                }
            }
        }

        for lesson in &self.lessons {
            researcher.insert(lesson.category.clone(), &*lesson.topic, lesson.overrides.clone());
        }

        researcher
    }
}

/// Where everything lives inside a course directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub base: PathBuf,
}

impl Layout {
    pub fn new<P: AsRef<Path>>(base: P) -> Self {
        Layout { base: base.as_ref().to_path_buf() }
    }

    pub fn lessons_dir(&self) -> PathBuf { self.base.join(LESSONS_DIR) }
    pub fn assets_dir(&self) -> PathBuf { self.base.join(ASSETS_DIR) }
    pub fn screenshots_dir(&self) -> PathBuf { self.base.join(SCREENSHOTS_DIR) }
    pub fn templates_dir(&self) -> PathBuf { self.base.join(TEMPLATES_DIR) }
    pub fn metadata_file(&self) -> PathBuf { self.base.join(METADATA_FILE) }
    pub fn index_file(&self) -> PathBuf { self.base.join(INDEX_FILE) }

    pub fn lesson_file(&self, id: crate::lesson::LessonId) -> PathBuf {
        self.lessons_dir().join(id.file_name())
    }

    /// Creates every directory the generator writes to.
    pub fn create_dirs(&self) -> Result<()> {
        let dirs = [self.lessons_dir(), self.screenshots_dir(), self.templates_dir(), self.assets_dir()];
        for dir in dirs {
            std::fs::create_dir_all(&dir).chain_with(|| error! {
                "failed to create course directory",
                "directory" => dir.display(),
            })?;
        }

        Ok(())
    }
}
