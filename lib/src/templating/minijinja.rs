use std::path::Path;

use minijinja::{path_loader, Environment};
use minijinja::value::Value;
use serde::Serialize;

use crate::error::{Chainable, Result};
use crate::lesson::LessonData;
use crate::templating::{builtin_template, CourseInfo, Engine, EngineInit, IndexPage, LessonPage};
use crate::templating::{INDEX_TEMPLATE, LESSON_TEMPLATE};

/// An [`Engine`] backed by `minijinja`.
///
/// Pages are rendered with HTML auto-escaping. The pre-rendered `content`
/// and `navigation` fragments must be emitted with the `safe` filter.
#[derive(Debug)]
pub struct MiniJinjaEngine {
    env: Environment<'static>,
}

#[derive(Serialize)]
struct LessonContext<'a> {
    id: String,
    title: &'a str,
    lesson_number: u32,
    category: &'a str,
    content: &'a str,
    navigation: &'a str,
    timestamp: String,
    lesson: &'a LessonData,
}

#[derive(Serialize)]
struct IndexContext<'a> {
    #[serde(flatten)]
    page: &'a IndexPage,
    timestamp: String,
}

const DATE_FORMAT: &str = "%Y-%m-%d";

impl EngineInit for MiniJinjaEngine {
    type Engine = Self;

    fn init<G: Serialize>(
        templates: Option<&Path>,
        course: &CourseInfo,
        globals: G,
    ) -> Result<Self::Engine> {
        let mut env = Environment::new();
        let files = templates.map(path_loader);
        env.set_loader(move |name| {
            if let Some(files) = &files {
                if let Some(source) = files(name)? {
                    return Ok(Some(source));
                }
            }

            Ok(builtin_template(name).map(String::from))
        });

        env.add_global("course", Value::from_serializable(course));
        env.add_global("G", Value::from_serializable(&globals));
        env.add_filter("lesson_id", ext::lesson_id);
        Ok(MiniJinjaEngine { env })
    }
}

impl MiniJinjaEngine {
    /// An engine with only the built-in templates and no globals.
    pub fn builtin(course: &CourseInfo) -> Result<Self> {
        Self::init(None, course, ())
    }
}

impl Engine for MiniJinjaEngine {
    fn render_lesson(&self, page: &LessonPage<'_>) -> Result<String> {
        let template = self.env.get_template(LESSON_TEMPLATE)?;
        let context = LessonContext {
            id: page.id.to_string(),
            title: &page.data.topic,
            lesson_number: page.id.number(),
            category: page.data.category.as_str(),
            content: &page.content,
            navigation: &page.navigation,
            timestamp: page.date.format(DATE_FORMAT).to_string(),
            lesson: page.data,
        };

        template.render(context).chain_with(|| error! {
            "failed to render lesson template",
            "lesson" => page.id,
        })
    }

    fn render_index(&self, page: &IndexPage) -> Result<String> {
        let template = self.env.get_template(INDEX_TEMPLATE)?;
        let context = IndexContext {
            page,
            timestamp: page.date.format(DATE_FORMAT).to_string(),
        };

        template.render(context).chain(error!("failed to render index template"))
    }
}

mod ext {
    use crate::lesson::LessonId;

    pub fn lesson_id(number: u32) -> String {
        LessonId(number).to_string()
    }
}
