#![doc = svgbobdoc::transform!(
//! A toolkit for generating static lesson pages for a course.
//!
//! # Overview
//!
//! Lectern turns a list of topics into a directory of static HTML lesson
//! pages, one page per topic, plus a metadata index recording what was
//! generated. Each topic passes through the same pipeline:
//!
//! ```svgbob
//!  +-------+   research   +-------------+   render   +-----------+   record   +----------+
//!  | topic |------------->| lesson data |----------->| HTML page |----------->| metadata |
//!  +-------+              +-------------+            +-----+-----+            +----------+
//!                                                          |
//!                                                          v
//!                                               lessons/lessonNN.html
//! ```
//!
//!   * **Research** ([`research`]) maps a topic and its [`Category`] to
//!     [`LessonData`]: key concepts, objectives, sections, and exercises.
//!     The built-in researcher uses a fixed table per category; a course
//!     configuration may override any field for a given topic.
//!
//!   * **Rendering** ([`render`], [`templating`]) produces the body and
//!     navigation fragments and places them into a page template.
//!
//!   * **Recording** ([`manifest`]) keeps a JSON index of every generated
//!     lesson, which also drives the course's table of contents.
//!
//! A [`CourseGenerator`] runs the pipeline over the tracks of a course
//! [`Settings`](config::Settings) and writes the stylesheet and script every
//! page links to.
//!
//! ```no_run
//! use lectern::{CourseGenerator, Category};
//! use lectern::config::Settings;
//! use lectern::templating::minijinja::MiniJinjaEngine;
//!
//! # fn main() -> lectern::error::Result<()> {
//! let settings = Settings::discover("course", None)?;
//! let mut generator = CourseGenerator::open::<MiniJinjaEngine, _>("course", settings)?;
//! generator.create_assets()?;
//! generator.generate_course(&Category::Basics, &["옵시디언 첫걸음", "볼트(Vault)의 이해"], 1)?;
//! # Ok(())
//! # }
//! ```
)]

#[macro_use]
pub mod error;
pub mod util;
pub mod value;
pub mod lesson;
pub mod research;
pub mod render;
pub mod templating;
pub mod manifest;
pub mod assets;
pub mod config;
pub mod generator;

pub use lesson::{Category, Exercise, LessonData, LessonId, Section};
pub use generator::{BuildSummary, CourseGenerator};

pub use rayon;
