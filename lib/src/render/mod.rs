//! Lesson data to HTML fragments.
//!
//! The fragments produced here are inserted, unescaped, into the page
//! templates by the [`templating`](crate::templating) engine.

mod content;
mod navigation;
mod markdown;

pub use content::*;
pub use navigation::*;
pub use markdown::*;

/// Lines of HTML, joined with newlines when finished.
#[derive(Debug, Default)]
pub(crate) struct Fragments(Vec<String>);

impl Fragments {
    pub fn push(&mut self, line: impl Into<String>) -> &mut Self {
        self.0.push(line.into());
        self
    }

    pub fn finish(self) -> String {
        self.0.join("\n")
    }
}
