use std::path::{Path, PathBuf};
use std::process::ExitCode;

use lectern::{Category, CourseGenerator};
use lectern::config::Settings;
use lectern::error::Result;
use lectern::templating::minijinja::MiniJinjaEngine;
use tracing_subscriber::EnvFilter;

use crate::flags::{Chalkboard, ChalkboardCmd};

mod flags;

fn init_logging(verbose: u32) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let mut filter = EnvFilter::from_default_env();
    for krate in ["lectern", "chalkboard"] {
        if let Ok(directive) = format!("{krate}={level}").parse() {
            filter = filter.add_directive(directive);
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn open(dir: &Path, config: Option<&Path>) -> Result<CourseGenerator> {
    let settings = Settings::discover(dir, config)?;
    CourseGenerator::open::<MiniJinjaEngine, _>(dir, settings)
}

/// The category and topic a `lesson` command names, or `None` when the
/// lesson comes from the single-lesson table.
fn requested_topic(lesson: flags::Lesson) -> Result<Option<(Category, String)>> {
    match (lesson.topic, lesson.category) {
        (Some(topic), category) => {
            Ok(Some((category.map(Category::from).unwrap_or_default(), topic)))
        }
        (None, Some(category)) => lectern::err! {
            "`--category` requires `--topic`",
            "category" => category,
            "hint" => "lessons from the single-lesson table use the category configured there",
        },
        (None, None) => Ok(None),
    }
}

fn run(flags: Chalkboard) -> Result<()> {
    let dir = flags.dir.unwrap_or_else(|| PathBuf::from("."));
    tracing::debug!(dir = %dir.display(), "opening course");
    let mut generator = open(&dir, flags.config.as_deref())?;

    match flags.subcommand {
        ChalkboardCmd::Build(_) => {
            let summary = generator.build()?;
            println!("generated {} lessons in {}", summary.lessons.len(), generator.layout.lessons_dir().display());
            if let Some(index) = summary.index {
                println!("index: {}", index.display());
            }
        }
        ChalkboardCmd::Lesson(lesson) => {
            let number = lesson.number;
            let record = match requested_topic(lesson)? {
                Some((category, topic)) => generator.generate_single(number, &category, &topic)?,
                None => generator.generate_listed(number)?,
            };

            generator.write_index()?;
            println!("{}", record.file.display());
        }
        ChalkboardCmd::Assets(_) => {
            for path in generator.create_assets()? {
                println!("{}", path.display());
            }
        }
        ChalkboardCmd::List(_) => {
            for (id, record) in generator.manifest().lessons_in_order() {
                println!("{id}\t{}\t{}", record.category, record.title);
            }
        }
    }

    Ok(())
}

pub fn main() -> ExitCode {
    let flags = Chalkboard::from_env_or_exit();
    init_logging(flags.verbose);

    match run(flags) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
