use std::path::{Path, PathBuf};

use crate::error::{Chainable, Result};
use crate::value::{Sink, Source};

pub const STYLESHEET: &str = "lesson-style.css";
pub const SCRIPT: &str = "lesson-script.js";

/// The static files every lesson page links to, by file name.
pub const ASSETS: &[(&str, &str)] = &[
    (STYLESHEET, include_str!("../assets/lesson-style.css")),
    (SCRIPT, include_str!("../assets/lesson-script.js")),
];

/// Writes the built-in assets into `dir`, creating it if needed.
///
/// A file that already holds the expected contents is left alone. Returns the
/// paths that were actually written.
pub fn write_assets<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let mut written = vec![];
    for (name, contents) in ASSETS {
        let path = dir.join(name);
        if is_current(&path, contents) {
            tracing::debug!(path = %path.display(), "asset is up to date");
            continue;
        }

        path.write(contents).chain_with(|| error! {
            "failed to write asset",
            "asset" => name,
        })?;

        written.push(path);
    }

    Ok(written)
}

fn is_current(path: &Path, contents: &str) -> bool {
    path.is_file() && path.read().map_or(false, |existing| existing == contents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_once() {
        let dir = tempfile::tempdir().unwrap();
        let assets = dir.path().join("assets");

        let written = write_assets(&assets).unwrap();
        assert_eq!(written, vec![assets.join(STYLESHEET), assets.join(SCRIPT)]);

        let css = std::fs::read_to_string(assets.join(STYLESHEET)).unwrap();
        assert!(css.contains(".lesson-container {"));
        assert!(css.contains(".concept-card:hover"));

        let js = std::fs::read_to_string(assets.join(SCRIPT)).unwrap();
        assert!(js.contains("function trackProgress()"));

        assert!(write_assets(&assets).unwrap().is_empty());
    }

    #[test]
    fn stale_assets_are_rewritten() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(SCRIPT), "// old").unwrap();

        let written = write_assets(dir.path()).unwrap();
        assert_eq!(written.len(), 2);

        let js = std::fs::read_to_string(dir.path().join(SCRIPT)).unwrap();
        assert_eq!(js, ASSETS[1].1);
    }
}
