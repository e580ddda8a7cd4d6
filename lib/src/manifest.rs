//! The metadata index: a JSON file recording every generated lesson.
//!
//! ```json
//! {
//!   "lessons": {
//!     "lesson01": {
//!       "title": "옵시디언 첫걸음",
//!       "category": "basics",
//!       "created": "2025-03-14T09:30:00.000000+09:00",
//!       "file": "course/lessons/lesson01.html"
//!     }
//!   },
//!   "categories": {
//!     "basics": { "lessons": ["lesson01"], "updated": "2025-03-14T09:30:00.000000+09:00" }
//!   },
//!   "last_updated": "2025-03-14T09:30:01.000000+09:00"
//! }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::error::{Chainable, Result};
use crate::lesson::{Category, LessonId};
use crate::value::{Format, Json};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonRecord {
    pub title: String,
    pub category: Category,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub created: DateTime<Local>,
    pub file: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRecord {
    #[serde(default)]
    pub lessons: Vec<LessonId>,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub updated: DateTime<Local>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub lessons: BTreeMap<LessonId, LessonRecord>,
    #[serde(default)]
    pub categories: BTreeMap<String, CategoryRecord>,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub last_updated: DateTime<Local>,
}

/// Timestamps are written as RFC 3339. Older metadata files carry local
/// times without an offset, which are read in the local time zone.
mod timestamp {
    use chrono::{DateTime, Local, NaiveDateTime};
    use serde::{de, Deserialize, Deserializer};

    const NAIVE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

    pub fn parse(string: &str) -> Option<DateTime<Local>> {
        if let Ok(time) = DateTime::parse_from_rfc3339(string) {
            return Some(time.with_timezone(&Local));
        }

        NaiveDateTime::parse_from_str(string, NAIVE_FORMAT).ok()?
            .and_local_timezone(Local)
            .earliest()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Local>, D::Error> {
        let string = String::deserialize(deserializer)?;
        parse(&string).ok_or_else(|| de::Error::custom(format!("invalid timestamp `{string}`")))
    }
}

impl Default for Manifest {
    fn default() -> Self {
        Manifest {
            lessons: BTreeMap::new(),
            categories: BTreeMap::new(),
            last_updated: Local::now(),
        }
    }
}

impl Manifest {
    /// Reads the manifest at `path`, or returns an empty one if there is no
    /// file there yet.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no metadata file; starting fresh");
            return Ok(Manifest::default());
        }

        Json::read(path).chain_with(|| error! {
            "failed to read lesson metadata",
            "metadata file" => path.display(),
        })
    }

    /// Stamps `last_updated` and writes the manifest to `path`.
    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        self.last_updated = Local::now();
        Json::write(&*self, path).chain_with(|| error! {
            "failed to save lesson metadata",
            "metadata file" => path.display(),
        })
    }

    /// Records `record` as lesson `id`, replacing any previous record. If the
    /// lesson moved to a different category it is removed from the old one.
    pub fn record(&mut self, id: LessonId, record: LessonRecord) {
        let now = record.created;
        let previous = self.lessons.insert(id, record.clone());
        if let Some(previous) = previous.filter(|p| p.category != record.category) {
            if let Some(old) = self.categories.get_mut(previous.category.as_str()) {
                old.lessons.retain(|l| *l != id);
                old.updated = now;
            }
        }

        let category = self.categories
            .entry(record.category.to_string())
            .or_insert_with(|| CategoryRecord { lessons: vec![], updated: now });

        if !category.lessons.contains(&id) {
            category.lessons.push(id);
            category.lessons.sort();
        }

        category.updated = now;
    }

    pub fn get(&self, id: LessonId) -> Option<&LessonRecord> {
        self.lessons.get(&id)
    }

    /// Every recorded lesson, by ascending lesson number.
    pub fn lessons_in_order(&self) -> impl Iterator<Item = (LessonId, &LessonRecord)> + '_ {
        self.lessons.iter().map(|(id, record)| (*id, record))
    }

    pub fn len(&self) -> usize {
        self.lessons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, category: Category) -> LessonRecord {
        LessonRecord {
            title: title.into(),
            category,
            created: Local::now(),
            file: PathBuf::from("lessons/x.html"),
        }
    }

    #[test]
    fn missing_file_is_empty_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = Manifest::load(dir.path().join("course_metadata.json")).unwrap();
        assert!(manifest.is_empty());
        assert!(manifest.categories.is_empty());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("course_metadata.json");
        std::fs::write(&path, "{ not json").unwrap();

        let error = Manifest::load(&path).unwrap_err();
        assert_eq!(error.message(), "failed to read lesson metadata");
        assert!(error.to_string().contains("course_metadata.json"));
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("course_metadata.json");

        let mut manifest = Manifest::default();
        manifest.record(LessonId(2), record("볼트(Vault)의 이해", Category::Basics));
        manifest.record(LessonId(1), record("옵시디언 첫걸음", Category::Basics));
        manifest.save(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"lesson01\": {"));
        assert!(text.contains("\"title\": \"옵시디언 첫걸음\""));
        assert!(text.find("lesson01").unwrap() < text.find("lesson02").unwrap());

        let loaded = Manifest::load(&path).unwrap();
        assert_eq!(loaded, manifest);
        assert_eq!(loaded.categories["basics"].lessons, [LessonId(1), LessonId(2)]);
    }

    #[test]
    fn timestamps_without_offset_are_local() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("course_metadata.json");
        std::fs::write(&path, r#"{
  "lessons": {
    "lesson32": {
      "title": "AI 콘텐츠 생성 능력",
      "category": "advanced",
      "created": "2025-07-01T10:20:30.123456",
      "file": "obsidian_course/lessons/lesson32.html"
    }
  },
  "categories": {},
  "last_updated": "2025-07-01T10:20:31"
}"#).unwrap();

        let manifest = Manifest::load(&path).unwrap();
        let record = manifest.get(LessonId(32)).unwrap();
        assert_eq!(record.category, Category::Advanced);

        let created = record.created.naive_local();
        assert_eq!(created.to_string(), "2025-07-01 10:20:30.123456");
        assert_eq!(manifest.last_updated.naive_local().to_string(), "2025-07-01 10:20:31");
        assert!(manifest.categories.is_empty());
    }

    #[test]
    fn timestamps_must_be_dates() {
        assert!(timestamp::parse("2025-03-14T09:30:00+09:00").is_some());
        assert!(timestamp::parse("2025-03-14T09:30:00.5").is_some());
        assert!(timestamp::parse("yesterday").is_none());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("course_metadata.json");
        std::fs::write(&path, r#"{ "lessons": {}, "last_updated": "yesterday" }"#).unwrap();
        assert!(Manifest::load(&path).unwrap_err().to_string().contains("invalid timestamp `yesterday`"));
    }

    #[test]
    fn rerecording_replaces_and_moves_category() {
        let mut manifest = Manifest::default();
        manifest.record(LessonId(7), record("파일 임베드", Category::Basics));
        manifest.record(LessonId(7), record("파일 임베드", Category::Basics));
        assert_eq!(manifest.categories["basics"].lessons, [LessonId(7)]);

        manifest.record(LessonId(7), record("고급 임베드", Category::Intermediate));
        assert_eq!(manifest.len(), 1);
        assert_eq!(manifest.get(LessonId(7)).unwrap().title, "고급 임베드");
        assert!(manifest.categories["basics"].lessons.is_empty());
        assert_eq!(manifest.categories["intermediate"].lessons, [LessonId(7)]);
    }

    #[test]
    fn lessons_are_ordered_numerically() {
        let mut manifest = Manifest::default();
        for n in [12, 3, 100, 35] {
            manifest.record(LessonId(n), record("t", Category::Advanced));
        }

        let order: Vec<_> = manifest.lessons_in_order().map(|(id, _)| id.number()).collect();
        assert_eq!(order, [3, 12, 35, 100]);
    }
}
