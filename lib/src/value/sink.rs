use std::{fs, io};
use std::path::{Path, PathBuf};
use std::fmt::Debug;

use crate::error::{Result, Chainable};

/// Something text can be written to.
pub trait Sink: Debug {
    fn write<S: AsRef<str>>(&self, value: S) -> Result<()> {
        self.write_str(value.as_ref())
    }

    fn write_str(&self, value: &str) -> Result<()>;
}

impl Sink for fs::File {
    fn write_str(&self, value: &str) -> Result<()> {
        use io::Write;

        let mut file = io::BufWriter::new(self);
        file.write_all(value.as_bytes())?;
        Ok(file.flush()?)
    }
}

/// Writing to a path creates missing parent directories and truncates any
/// existing file.
impl Sink for &Path {
    fn write_str(&self, value: &str) -> Result<()> {
        if let Some(parent) = self.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).chain_with(|| error! {
                "failed to create output directory",
                "directory" => parent.display()
            })?;
        }

        fs::File::create(self)
            .chain(error! {
                "failed to open/create file for writing",
                "file path" => self.display()
            })?
            .write_str(value)
    }
}

impl Sink for PathBuf {
    fn write_str(&self, value: &str) -> Result<()> {
        self.as_path().write_str(value)
    }
}

impl<T: Sink> Sink for &T {
    fn write_str(&self, value: &str) -> Result<()> {
        <T as Sink>::write_str(self, value)
    }
}

/// An in-memory sink, mostly useful in tests.
#[derive(Debug, Default)]
pub struct Buffer(std::sync::Mutex<String>);

impl Buffer {
    pub fn into_string(self) -> String {
        self.0.into_inner().unwrap_or_else(|e| e.into_inner())
    }
}

impl Sink for Buffer {
    fn write_str(&self, value: &str) -> Result<()> {
        let mut buffer = self.0.lock().unwrap_or_else(|e| e.into_inner());
        buffer.push_str(value);
        Ok(())
    }
}
