//! Topic research.
//!
//! No research actually happens: each category maps to a fixed set of key
//! concepts, learning objectives, and sections. The [`Research`] trait is the
//! seam where a real source could be plugged in.

use std::collections::BTreeMap;
use std::fmt::Debug;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::lesson::{Category, Exercise, LessonData, Section};

pub trait Research: Send + Sync + Debug {
    fn research(&self, category: &Category, topic: &str) -> Result<LessonData>;
}

/// The built-in lookup table.
#[derive(Debug, Default, Clone, Copy)]
pub struct StaticResearcher;

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

impl StaticResearcher {
    fn basics(data: &mut LessonData) {
        data.key_concepts = strings(&["기본 개념 이해", "인터페이스 익히기", "첫 번째 노트 작성"]);
        data.learning_objectives = strings(&[
            "옵시디언의 기본 기능 이해",
            "마크다운 문법 익히기",
            "노트 작성과 관리",
        ]);

        data.content_sections = ["소개", "기본 개념", "실습", "요약"]
            .into_iter()
            .map(Section::titled)
            .collect();
    }

    fn intermediate(data: &mut LessonData) {
        data.key_concepts = strings(&["플러그인 활용", "고급 기능", "워크플로우 최적화"]);
        data.learning_objectives = strings(&["플러그인 설치와 설정", "고급 검색 기능 활용", "자동화 구현"]);
    }

    fn advanced(data: &mut LessonData) {
        data.key_concepts = strings(&["API 활용", "커스텀 개발", "시스템 통합"]);
        data.learning_objectives = strings(&["플러그인 개발", "API 활용", "대규모 지식 관리"]);
    }
}

impl Research for StaticResearcher {
    fn research(&self, category: &Category, topic: &str) -> Result<LessonData> {
        tracing::debug!(%category, topic, "researching topic");

        let mut data = LessonData::new(category.clone(), topic);
        match category {
            Category::Basics => Self::basics(&mut data),
            Category::Intermediate => Self::intermediate(&mut data),
            Category::Advanced => Self::advanced(&mut data),
            Category::Other(_) => { }
        }

        Ok(data)
    }
}

/// Per-topic replacements for any researched field. Fields left unset keep
/// the researched value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Overrides {
    pub key_concepts: Option<Vec<String>>,
    pub learning_objectives: Option<Vec<String>>,
    pub prerequisites: Option<Vec<String>>,
    #[serde(alias = "sections")]
    pub content_sections: Option<Vec<Section>>,
    #[serde(alias = "exercises")]
    pub practice_exercises: Option<Vec<Exercise>>,
    pub resources: Option<Vec<String>>,
    pub screenshots_needed: Option<Vec<String>>,
    /// Keys that name no field. Collected so they can be reported.
    #[serde(flatten, skip_serializing)]
    pub unknown: BTreeMap<String, toml::Value>,
}

impl Overrides {
    /// True if no field is replaced. Unknown keys are not counted.
    pub fn is_empty(&self) -> bool {
        self.key_concepts.is_none()
            && self.learning_objectives.is_none()
            && self.prerequisites.is_none()
            && self.content_sections.is_none()
            && self.practice_exercises.is_none()
            && self.resources.is_none()
            && self.screenshots_needed.is_none()
    }

    pub fn unknown_keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.unknown.keys().map(|k| k.as_str())
    }

    pub fn apply(&self, data: &mut LessonData) {
        macro_rules! apply {
            ($($field:ident),*) => ($(
                if let Some(value) = &self.$field {
                    data.$field = value.clone();
                }
            )*)
        }

        apply!(key_concepts, learning_objectives, prerequisites, content_sections,
            practice_exercises, resources, screenshots_needed);
    }
}

/// Research backed by another researcher, with per-topic overrides layered
/// on top. Overrides are keyed by category and topic title.
#[derive(Debug, Default)]
pub struct CatalogResearcher<R = StaticResearcher> {
    base: R,
    overrides: FxHashMap<(Category, String), Overrides>,
}

impl CatalogResearcher {
    pub fn new() -> Self {
        CatalogResearcher::with_base(StaticResearcher)
    }
}

impl<R: Research> CatalogResearcher<R> {
    pub fn with_base(base: R) -> Self {
        CatalogResearcher { base, overrides: FxHashMap::default() }
    }

    /// Registers `overrides` for `topic` in `category`. Empty overrides are
    /// ignored; a later registration for the same topic replaces an earlier.
    pub fn insert(&mut self, category: Category, topic: impl Into<String>, overrides: Overrides) {
        if !overrides.is_empty() {
            self.overrides.insert((category, topic.into()), overrides);
        }
    }

    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }
}

impl<R: Research> Research for CatalogResearcher<R> {
    fn research(&self, category: &Category, topic: &str) -> Result<LessonData> {
        let mut data = self.base.research(category, topic)?;
        if let Some(overrides) = self.overrides.get(&(category.clone(), topic.to_string())) {
            tracing::debug!(%category, topic, "applying topic overrides");
            overrides.apply(&mut data);
        }

        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basics_have_four_empty_sections() {
        let data = StaticResearcher.research(&Category::Basics, "기본 노트 작성").unwrap();
        assert_eq!(data.topic, "기본 노트 작성");
        assert_eq!(data.category, Category::Basics);
        assert_eq!(data.key_concepts, ["기본 개념 이해", "인터페이스 익히기", "첫 번째 노트 작성"]);
        assert_eq!(data.learning_objectives[1], "마크다운 문법 익히기");

        let titles: Vec<_> = data.content_sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, ["소개", "기본 개념", "실습", "요약"]);
        assert!(data.content_sections.iter().all(|s| s.content.is_empty() && s.screenshot.is_none()));
        assert!(data.practice_exercises.is_empty());
    }

    #[test]
    fn intermediate_and_advanced_have_no_sections() {
        let mid = StaticResearcher.research(&Category::Intermediate, "플러그인").unwrap();
        assert_eq!(mid.key_concepts, ["플러그인 활용", "고급 기능", "워크플로우 최적화"]);
        assert_eq!(mid.learning_objectives, ["플러그인 설치와 설정", "고급 검색 기능 활용", "자동화 구현"]);
        assert!(mid.content_sections.is_empty());

        let adv = StaticResearcher.research(&Category::Advanced, "Cursor 마스터되기").unwrap();
        assert_eq!(adv.key_concepts, ["API 활용", "커스텀 개발", "시스템 통합"]);
        assert_eq!(adv.learning_objectives, ["플러그인 개발", "API 활용", "대규모 지식 관리"]);
        assert!(adv.content_sections.is_empty());
    }

    #[test]
    fn unknown_category_is_empty() {
        let category = Category::Other("expert".into());
        let data = StaticResearcher.research(&category, "anything").unwrap();
        assert_eq!(data, LessonData::new(category, "anything"));
    }

    #[test]
    fn overrides_replace_only_given_fields() {
        let mut researcher = CatalogResearcher::new();
        researcher.insert(Category::Basics, "검색과 필터링", Overrides {
            practice_exercises: Some(vec![Exercise {
                title: "검색 연습".into(),
                description: "태그로 노트를 찾아보세요".into(),
            }]),
            ..Default::default()
        });

        researcher.insert(Category::Basics, "ignored", Overrides::default());
        assert_eq!(researcher.len(), 1);

        let data = researcher.research(&Category::Basics, "검색과 필터링").unwrap();
        assert_eq!(data.practice_exercises.len(), 1);
        assert_eq!(data.content_sections.len(), 4);

        let other = researcher.research(&Category::Advanced, "검색과 필터링").unwrap();
        assert!(other.practice_exercises.is_empty());
    }
}
