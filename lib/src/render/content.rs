use pulldown_cmark_escape::escape_html;

use crate::lesson::LessonData;
use crate::render::{markdown_to_html, Fragments};

/// Renders the body of a lesson page.
///
/// Each non-empty part of `data` becomes a `<section>`, in this order:
/// prerequisites, learning objectives, key concepts, one section per content
/// section, practice exercises, and resources. Plain-text values are escaped;
/// section content is Markdown.
pub fn content_html(data: &LessonData) -> String {
    let mut html = Fragments::default();
    bullet_section(&mut html, "prerequisites", "📋 사전 준비", &data.prerequisites);
    bullet_section(&mut html, "learning-objectives", "🎯 학습 목표", &data.learning_objectives);

    if !data.key_concepts.is_empty() {
        html.push(r#"<section class="key-concepts">"#)
            .push("<h2>💡 주요 개념</h2>")
            .push(r#"<div class="concepts-grid">"#);

        for concept in &data.key_concepts {
            html.push(format!(r#"<div class="concept-card">{}</div>"#, escape(concept)));
        }

        html.push("</div>").push("</section>");
    }

    for section in &data.content_sections {
        let title = escape(&section.title);
        html.push(r#"<section class="content-section">"#)
            .push(format!("<h2>{title}</h2>"))
            .push(format!(r#"<div class="section-content">{}</div>"#, markdown_to_html(&section.content)));

        if let Some(screenshot) = section.screenshot.as_deref().filter(|s| !s.is_empty()) {
            html.push(r#"<div class="screenshot-container">"#)
                .push(format!(r#"<img src="../screenshots/{}" alt="{title}">"#, escape(screenshot)))
                .push("</div>");
        }

        html.push("</section>");
    }

    if !data.practice_exercises.is_empty() {
        html.push(r#"<section class="practice">"#).push("<h2>✍️ 실습하기</h2>");
        for exercise in &data.practice_exercises {
            html.push(r#"<div class="exercise">"#)
                .push(format!("<h3>{}</h3>", escape(&exercise.title)))
                .push(format!("<p>{}</p>", escape(&exercise.description)))
                .push("</div>");
        }

        html.push("</section>");
    }

    bullet_section(&mut html, "resources", "📚 참고 자료", &data.resources);
    html.finish()
}

fn escape(text: &str) -> String {
    let mut html = String::with_capacity(text.len());
    // Writing to a `String` cannot fail.
    let _ = escape_html(&mut html, text);
    html
}

fn bullet_section(html: &mut Fragments, class: &str, heading: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }

    html.push(format!(r#"<section class="{class}">"#))
        .push(format!("<h2>{heading}</h2>"))
        .push("<ul>");

    for item in items {
        html.push(format!("<li>{}</li>", escape(item)));
    }

    html.push("</ul>").push("</section>");
}
