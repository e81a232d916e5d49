use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{info, warn};

/// Destination of rendered map documents.
///
/// Showing a document replaces whatever was shown before.
pub trait MapSink {
    fn show(&mut self, html: &str) -> io::Result<()>;
}

/// Writes the current map document to a file that a browser can open.
#[derive(Debug, Clone)]
pub struct FileMapSink {
    path: PathBuf,
    writes: usize,
}

impl FileMapSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            writes: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub const fn writes(&self) -> usize {
        self.writes
    }

    /// Opens the last written document with the system browser.
    pub fn open_in_browser(&self) -> io::Result<()> {
        if !self.path.exists() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no map written yet at {}", self.path.display()),
            ));
        }
        webbrowser::open(&self.path.display().to_string()).map_err(|e| {
            warn!("Failed to open {} in browser: {e}", self.path.display());
            e
        })
    }
}

impl MapSink for FileMapSink {
    fn show(&mut self, html: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, html)?;
        self.writes += 1;
        info!("Map written to {} ({} bytes)", self.path.display(), html.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn show_replaces_previous_document() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let mut sink = FileMapSink::new(dir.path().join("nested").join("map.html"));

        sink.show("<html>first</html>")?;
        sink.show("<html>second</html>")?;

        assert_eq!(fs::read_to_string(sink.path())?, "<html>second</html>");
        assert_eq!(sink.writes(), 2);
        Ok(())
    }

    #[test]
    fn opening_before_any_write_fails() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let sink = FileMapSink::new(dir.path().join("map.html"));
        let err = sink.open_in_browser().err().map(|e| e.kind());
        assert_eq!(err, Some(io::ErrorKind::NotFound));
        Ok(())
    }
}
