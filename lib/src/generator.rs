use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use derive_more::Debug;
use rayon::prelude::*;

use crate::assets::write_assets;
use crate::config::{Layout, Settings, Track};
use crate::error::{Chainable, Error, Result};
use crate::lesson::{Category, LessonId};
use crate::manifest::{LessonRecord, Manifest};
use crate::render::{content_html, navigation_html};
use crate::research::Research;
use crate::templating::{ensure_templates, Engine, EngineInit, IndexPage, LessonPage};
use crate::value::Sink;

/// Drives lesson generation for one course directory.
#[derive(Debug)]
pub struct CourseGenerator {
    pub layout: Layout,
    pub settings: Settings,
    engine: Arc<dyn Engine>,
    researcher: Arc<dyn Research>,
    #[debug(ignore)]
    manifest: Manifest,
}

/// What [`CourseGenerator::build()`] produced.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct BuildSummary {
    pub lessons: Vec<LessonRecord>,
    pub assets: Vec<PathBuf>,
    pub index: Option<PathBuf>,
}

impl CourseGenerator {
    /// Prepares the course directory at `base`: creates its directories,
    /// writes default templates that are missing, and loads the metadata.
    pub fn open<E, P>(base: P, settings: Settings) -> Result<Self>
        where E: EngineInit, P: AsRef<Path>
    {
        let layout = Layout::new(base);
        layout.create_dirs()?;

        let templates = layout.templates_dir();
        for path in ensure_templates(&templates)? {
            tracing::info!(path = %path.display(), "wrote default template");
        }

        let engine = E::init(Some(templates.as_path()), &settings.course_info(), &settings.globals)
            .chain(error!("failed to initialize template engine"))?;

        let manifest = Manifest::load(layout.metadata_file())?;
        Ok(CourseGenerator {
            researcher: Arc::new(settings.researcher()),
            engine: Arc::new(engine),
            manifest,
            settings,
            layout,
        })
    }

    /// Replaces the researcher built from the settings.
    pub fn with_researcher<R: Research + 'static>(mut self, researcher: R) -> Self {
        self.researcher = Arc::new(researcher);
        self
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Writes the stylesheet and script into the assets directory.
    pub fn create_assets(&self) -> Result<Vec<PathBuf>> {
        let written = write_assets(self.layout.assets_dir())?;
        tracing::info!(written = written.len(), "assets ready");
        Ok(written)
    }

    fn render_page(&self, id: LessonId, category: &Category, topic: &str, date: NaiveDate) -> Result<String> {
        let data = self.researcher.research(category, topic)
            .chain_with(|| error!("topic research failed", "topic" => topic))?;

        let page = LessonPage {
            id,
            data: &data,
            content: content_html(&data),
            navigation: navigation_html(id.number(), self.settings.total_lessons),
            date,
        };

        self.engine.render_lesson(&page)
    }

    fn write_page(&mut self, id: LessonId, category: &Category, topic: &str, html: &str) -> Result<LessonRecord> {
        let file = self.layout.lesson_file(id);
        file.write(html).chain_with(|| error! {
            "failed to write lesson page",
            "lesson" => id,
        })?;

        let record = LessonRecord {
            title: topic.to_string(),
            category: category.clone(),
            created: Local::now(),
            file,
        };

        self.manifest.record(id, record.clone());
        tracing::info!(lesson = id.number(), topic, "generated lesson");
        Ok(record)
    }

    /// Generates lesson `number` and records it. The metadata file is not
    /// saved; see [`CourseGenerator::save()`].
    pub fn generate_lesson(&mut self, number: u32, category: &Category, topic: &str) -> Result<LessonRecord> {
        let id = LessonId(number);
        let html = self.render_page(id, category, topic, Local::now().date_naive())?;
        self.write_page(id, category, topic, &html)
    }

    /// Generates one lesson per topic, numbered from `start`, then saves the
    /// metadata file.
    ///
    /// Pages are researched and rendered in parallel. They are written and
    /// recorded in topic order.
    pub fn generate_course<T>(&mut self, category: &Category, topics: &[T], start: u32) -> Result<Vec<LessonRecord>>
        where T: AsRef<str> + Sync
    {
        tracing::info!(%category, topics = topics.len(), start, "generating course");
        if let Some(last) = topics.len().checked_sub(1) {
            lesson_id(start, last)?;
        }

        let date = Local::now().date_naive();
        let this = &*self;
        let pages = topics.par_iter()
            .enumerate()
            .map(|(i, topic)| {
                let id = lesson_id(start, i)?;
                let html = this.render_page(id, category, topic.as_ref(), date)?;
                Ok::<_, Error>((id, topic.as_ref(), html))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut records = Vec::with_capacity(pages.len());
        for (id, topic, html) in pages {
            records.push(self.write_page(id, category, topic, &html)?);
        }

        self.save()?;
        tracing::info!(%category, generated = records.len(), "course generated");
        Ok(records)
    }

    /// Generates one lesson and saves the metadata file.
    pub fn generate_single(&mut self, number: u32, category: &Category, topic: &str) -> Result<LessonRecord> {
        let record = self.generate_lesson(number, category, topic)?;
        self.save()?;
        Ok(record)
    }

    /// Generates the lesson in the single-lesson table with this `number`.
    pub fn generate_listed(&mut self, number: u32) -> Result<LessonRecord> {
        let Some(lesson) = self.settings.lesson(number) else {
            return err! {
                format!("no topic defined for lesson {number}"),
                "hint" => "add a [[lesson]] entry to the course configuration or pass a topic",
            };
        };

        let (category, topic) = (lesson.category.clone(), lesson.topic.clone());
        self.generate_single(number, &category, &topic)
    }

    pub fn save(&mut self) -> Result<()> {
        self.manifest.save(self.layout.metadata_file())
    }

    /// Renders the table of contents from the metadata.
    pub fn write_index(&self) -> Result<PathBuf> {
        let page = IndexPage::from_manifest(&self.manifest, Local::now().date_naive());
        let html = self.engine.render_index(&page)?;
        let path = self.layout.index_file();
        path.write(html).chain(error!("failed to write course index"))?;
        Ok(path)
    }

    /// Writes the assets, generates every configured track, and writes the
    /// course index.
    pub fn build(&mut self) -> Result<BuildSummary> {
        crate::time!("course build", {
            let mut summary = BuildSummary { assets: self.create_assets()?, ..Default::default() };
            let tracks: Vec<Track> = self.settings.tracks.clone();
            for track in &tracks {
                let records = self.generate_course(&track.category, &track.topics, track.start)?;
                summary.lessons.extend(records);
            }

            if tracks.is_empty() {
                tracing::warn!("course configuration has no tracks");
                self.save()?;
            }

            summary.index = Some(self.write_index()?);
            Ok(summary)
        })
    }
}

/// The id of the lesson `offset` places after lesson `start`.
pub(crate) fn lesson_id(start: u32, offset: usize) -> Result<LessonId> {
    u32::try_from(offset).ok()
        .and_then(|offset| start.checked_add(offset))
        .map(LessonId)
        .ok_or_else(|| error! {
            "lesson number is out of range",
            "first lesson" => start,
            "offset" => offset,
        })
}
