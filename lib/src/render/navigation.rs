use crate::lesson::LessonId;
use crate::render::Fragments;

/// The lesson count navigation assumes when none is configured.
pub const DEFAULT_TOTAL_LESSONS: u32 = 35;

/// Renders the previous / index / next links for lesson `number` of a course
/// with `total` lessons. Lessons live side by side in one directory; the
/// index page lives one directory up.
pub fn navigation_html(number: u32, total: u32) -> String {
    let mut html = Fragments::default();
    if number > 1 {
        let previous = LessonId(number - 1).file_name();
        html.push(format!(r#"<a href="{previous}" class="nav-prev">"#))
            .push(r#"<i class="fas fa-arrow-left"></i> 이전 강의</a>"#);
    }

    html.push(r#"<a href="../index.html" class="nav-index">"#)
        .push(r#"<i class="fas fa-list"></i> 목차</a>"#);

    if number < total {
        let next = LessonId(number + 1).file_name();
        html.push(format!(r#"<a href="{next}" class="nav-next">"#))
            .push(r#"다음 강의 <i class="fas fa-arrow-right"></i></a>"#);
    }

    html.finish()
}
