//! Containers for the headless watcher: each refresh cycle replaces the whole
//! output, just like `innerHTML` in the browser.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::domain::services::NewsContainer;

/// Writes each fragment to a file, replacing it atomically (temp file + rename)
/// so readers never see a half-written fragment.
#[derive(Debug, Clone)]
pub struct FileContainer {
    path: PathBuf,
}

impl FileContainer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, html: &str) -> std::io::Result<()> {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        std::fs::write(&tmp, html)?;
        std::fs::rename(&tmp, &self.path)
    }
}

impl NewsContainer for FileContainer {
    fn replace_html(&self, html: &str) {
        if let Err(e) = self.write(html) {
            tracing::error!(
                path = %self.path.display(),
                error = %e,
                "Failed to write news fragment"
            );
        }
    }
}

/// Prints each fragment to stdout, separated by a marker line.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutContainer;

pub const STDOUT_SEPARATOR: &str = "<!-- news-pulse: refreshed -->";

impl NewsContainer for StdoutContainer {
    fn replace_html(&self, html: &str) {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        if let Err(e) = writeln!(out, "{STDOUT_SEPARATOR}\n{html}").and_then(|_| out.flush()) {
            tracing::error!(error = %e, "Failed to write news fragment to stdout");
        }
    }
}

/// Either output target, picked at startup from the CLI flags
#[derive(Debug, Clone)]
pub enum OutputContainer {
    Stdout(StdoutContainer),
    File(FileContainer),
}

impl OutputContainer {
    pub fn from_path(path: Option<PathBuf>) -> Self {
        match path {
            Some(path) => OutputContainer::File(FileContainer::new(path)),
            None => OutputContainer::Stdout(StdoutContainer),
        }
    }
}

impl NewsContainer for OutputContainer {
    fn replace_html(&self, html: &str) {
        match self {
            OutputContainer::Stdout(c) => c.replace_html(html),
            OutputContainer::File(c) => c.replace_html(html),
        }
    }
}
