use std::fmt;
use std::str::FromStr;
use std::convert::Infallible;

use derive_more::From;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The difficulty track a lesson belongs to.
///
/// The three known categories have built-in research data. Any other name is
/// accepted and kept verbatim as [`Category::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Basics,
    Intermediate,
    Advanced,
    Other(String),
}

impl Category {
    pub fn as_str(&self) -> &str {
        match self {
            Category::Basics => "basics",
            Category::Intermediate => "intermediate",
            Category::Advanced => "advanced",
            Category::Other(name) => name,
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::Advanced
    }
}

impl FromStr for Category {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "basics" => Category::Basics,
            "intermediate" => Category::Intermediate,
            "advanced" => Category::Advanced,
            other => Category::Other(other.to_string()),
        })
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(category) => category,
            Err(e) => match e {},
        }
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        match value {
            Category::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_str().fmt(f)
    }
}

/// A lesson's position in the course. Displayed as `lessonNN`, which is also
/// its key in the metadata file and the stem of its page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, From)]
pub struct LessonId(pub u32);

impl LessonId {
    pub fn number(self) -> u32 {
        self.0
    }

    /// The page file name, e.g. `lesson07.html`.
    pub fn file_name(self) -> String {
        format!("{self}.html")
    }
}

impl fmt::Display for LessonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "lesson{:02}", self.0)
    }
}

impl FromStr for LessonId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix("lesson")
            .and_then(|n| n.parse().ok())
            .map(LessonId)
            .ok_or_else(|| format!("invalid lesson id `{s}`: expected `lessonNN`"))
    }
}

impl Serialize for LessonId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for LessonId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let string = String::deserialize(deserializer)?;
        string.parse().map_err(serde::de::Error::custom)
    }
}

/// Everything known about a lesson before it is rendered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LessonData {
    pub category: Category,
    pub topic: String,
    pub key_concepts: Vec<String>,
    pub learning_objectives: Vec<String>,
    pub prerequisites: Vec<String>,
    pub content_sections: Vec<Section>,
    pub practice_exercises: Vec<Exercise>,
    pub resources: Vec<String>,
    pub screenshots_needed: Vec<String>,
}

impl LessonData {
    /// An empty lesson: only the category and topic are set.
    pub fn new(category: Category, topic: impl Into<String>) -> Self {
        LessonData { category, topic: topic.into(), ..Default::default() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    /// Markdown.
    #[serde(default)]
    pub content: String,
    /// A file name under the screenshots directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshot: Option<String>,
}

impl Section {
    pub fn titled(title: impl Into<String>) -> Self {
        Section { title: title.into(), ..Default::default() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub title: String,
    #[serde(default)]
    pub description: String,
}
