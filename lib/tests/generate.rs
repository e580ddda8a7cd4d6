use std::fs;
use std::path::Path;

use lectern::{Category, CourseGenerator, LessonData, LessonId};
use lectern::config::Settings;
use lectern::error::Result;
use lectern::manifest::Manifest;
use lectern::research::Research;
use lectern::templating::minijinja::MiniJinjaEngine;

fn open(dir: &Path, settings: Settings) -> CourseGenerator {
    CourseGenerator::open::<MiniJinjaEngine, _>(dir, settings).unwrap()
}

#[test]
fn builtin_course_builds() {
    let dir = tempfile::tempdir().unwrap();
    let mut generator = open(dir.path(), Settings::builtin().unwrap());
    let summary = generator.build().unwrap();

    assert_eq!(summary.lessons.len(), 10);
    assert_eq!(summary.assets.len(), 2);
    assert_eq!(summary.index.as_deref(), Some(dir.path().join("index.html").as_path()));

    for n in 1..=10 {
        let page = dir.path().join(format!("lessons/lesson{n:02}.html"));
        assert!(page.is_file(), "missing {}", page.display());
    }

    assert!(!dir.path().join("lessons/lesson11.html").exists());

    let first = fs::read_to_string(dir.path().join("lessons/lesson01.html")).unwrap();
    assert!(first.contains("<h1>제1강: 옵시디언 첫걸음</h1>"));
    assert!(!first.contains("nav-prev"));
    assert!(first.contains(r#"<a href="lesson02.html" class="nav-next">"#));

    let tenth = fs::read_to_string(dir.path().join("lessons/lesson10.html")).unwrap();
    assert!(tenth.contains("<title>필수 커뮤니티 플러그인 - 옵시디언 마스터 클래스</title>"));
    assert!(tenth.contains(r#"<a href="lesson09.html" class="nav-prev">"#));

    let manifest = Manifest::load(dir.path().join("course_metadata.json")).unwrap();
    assert_eq!(manifest.len(), 10);
    assert_eq!(manifest.get(LessonId(2)).unwrap().title, "볼트(Vault)의 이해");
    assert_eq!(manifest.categories["basics"].lessons.len(), 10);

    let index = fs::read_to_string(dir.path().join("index.html")).unwrap();
    assert!(index.contains(r#"<a href="lessons/lesson01.html">제1강: 옵시디언 첫걸음</a>"#));
    assert!(index.contains("<h2>basics</h2>"));
}

#[test]
fn rebuilding_keeps_one_record_per_lesson() {
    let dir = tempfile::tempdir().unwrap();
    open(dir.path(), Settings::builtin().unwrap()).build().unwrap();

    let mut again = open(dir.path(), Settings::builtin().unwrap());
    assert_eq!(again.manifest().len(), 10);

    let summary = again.build().unwrap();
    assert!(summary.assets.is_empty());
    assert_eq!(again.manifest().len(), 10);
    assert_eq!(again.manifest().categories["basics"].lessons.len(), 10);
}

#[test]
fn single_lessons_accumulate() {
    let dir = tempfile::tempdir().unwrap();
    let mut generator = open(dir.path(), Settings::builtin().unwrap());
    generator.generate_listed(32).unwrap();

    let mut generator = open(dir.path(), Settings::builtin().unwrap());
    generator.generate_single(35, &Category::Advanced, "Cursor 마스터되기").unwrap();

    let manifest = Manifest::load(dir.path().join("course_metadata.json")).unwrap();
    let ids: Vec<_> = manifest.lessons_in_order().map(|(id, _)| id.to_string()).collect();
    assert_eq!(ids, ["lesson32", "lesson35"]);

    let last = fs::read_to_string(dir.path().join("lessons/lesson35.html")).unwrap();
    assert!(last.contains(r#"<a href="lesson34.html" class="nav-prev">"#));
    assert!(!last.contains("nav-next"));
    assert!(last.contains(r#"<div class="concept-card">시스템 통합</div>"#));
}

#[test]
fn empty_topic_list_still_saves_metadata() {
    let dir = tempfile::tempdir().unwrap();
    let mut generator = open(dir.path(), Settings::default());
    let records = generator.generate_course::<&str>(&Category::Intermediate, &[], 11).unwrap();

    assert!(records.is_empty());
    assert!(dir.path().join("course_metadata.json").is_file());
    assert_eq!(fs::read_dir(dir.path().join("lessons")).unwrap().count(), 0);
}

#[test]
fn configured_overrides_and_templates() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("course.toml"), r#"
        title = "Rust 강좌"
        total_lessons = 2
        edition = "초판"

        [[track]]
        category = "workshop"
        start = 1
        topics = [
            { title = "소유권", sections = [{ title = "규칙", content = "값에는 **하나의** 소유자가 있다", screenshot = "owner.png" }] },
            "빌림",
        ]
    "#).unwrap();

    fs::create_dir_all(dir.path().join("templates")).unwrap();
    fs::write(
        dir.path().join("templates/lesson.html"),
        "<h1>{{ course.title }} {{ G.edition }}: {{ title }}</h1>\n{{ navigation|safe }}\n{{ content|safe }}",
    ).unwrap();

    let settings = Settings::discover(dir.path(), None).unwrap();
    let mut generator = open(dir.path(), settings);
    generator.build().unwrap();

    let first = fs::read_to_string(dir.path().join("lessons/lesson01.html")).unwrap();
    assert!(first.starts_with("<h1>Rust 강좌 초판: 소유권</h1>"));
    assert!(first.contains("<p>값에는 <strong>하나의</strong> 소유자가 있다</p>"));
    assert!(first.contains(r#"<img src="../screenshots/owner.png" alt="규칙">"#));
    assert!(first.contains("lesson02.html"));

    let second = fs::read_to_string(dir.path().join("lessons/lesson02.html")).unwrap();
    assert!(!second.contains("nav-next"));
    assert!(!second.contains("content-section"));
}

#[derive(Debug)]
struct Failing;

impl Research for Failing {
    fn research(&self, _: &Category, topic: &str) -> Result<LessonData> {
        lectern::err!("research source unavailable", "topic" => topic)
    }
}

#[test]
fn research_failures_write_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut generator = open(dir.path(), Settings::builtin().unwrap()).with_researcher(Failing);

    let error = generator.generate_course(&Category::Basics, &["a", "b"], 1).unwrap_err();
    assert_eq!(error.message(), "topic research failed");
    assert!(error.to_string().contains("research source unavailable"));

    assert!(generator.manifest().is_empty());
    assert!(!dir.path().join("lessons/lesson01.html").exists());
    assert!(!dir.path().join("course_metadata.json").exists());
}
