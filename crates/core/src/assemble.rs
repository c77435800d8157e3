//! Book assembly.
//!
//! [`Assembler`] drives a whole run: one index fetch, then one chapter fetch
//! per table-of-contents entry in listing order, each persisted as
//! `<chapters_dir>/<id>.tex` and referenced from the master document with
//! `\input`. Chapters are fetched one at a time so ids and reference order
//! always match the index page.
//!
//! # Example
//!
//! ```rust,no_run
//! use chapbook_core::{Assembler, BookConfig, HttpSource, parse_url};
//!
//! # async fn run() -> chapbook_core::Result<()> {
//! let config = BookConfig::builder().output_dir("out").build();
//! let source = HttpSource::new(&config.fetch)?;
//! let assembler = Assembler::new(source, config)?;
//!
//! let report = assembler.assemble_book(&parse_url("http://www.example.com/book/42/")?).await?;
//! println!("wrote {}", report.master_path.display());
//! # Ok(())
//! # }
//! ```

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use url::Url;

use crate::chapter::{chapter_file_name, fetch_chapter};
use crate::config::BookConfig;
use crate::fetch::PageSource;
use crate::index::{BookMeta, fetch_index};
use crate::sanitize::Sanitizer;
use crate::template::{render_template, tex_path};
use crate::Result;

/// Font settings template looked up in the template directory.
pub const FONT_TEMPLATE: &str = "fontssetting_template.tex";
/// Rendered font settings, written next to the template.
pub const FONT_SETTINGS: &str = "fontssetting.tex";

/// Characters that are invalid in file names on common filesystems.
const INVALID_FILENAME_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Summary of a finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookReport {
    /// Path of the master document.
    pub master_path: PathBuf,
    /// Number of chapters referenced from the master document.
    pub chapters: usize,
    /// Ids of chapters written title-only.
    pub degraded: Vec<usize>,
}

/// Orchestrates index retrieval, chapter retrieval and document emission.
pub struct Assembler<S> {
    source: S,
    config: BookConfig,
    sanitizer: Sanitizer,
}

impl<S: PageSource> Assembler<S> {
    /// Creates an assembler over `source`.
    ///
    /// # Errors
    ///
    /// Returns [`ChapbookError::ConfigError`](crate::ChapbookError::ConfigError)
    /// if the sanitization rules do not compile.
    pub fn new(source: S, config: BookConfig) -> Result<Self> {
        let sanitizer = Sanitizer::new(&config.sanitize)?;
        Ok(Self { source, config, sanitizer })
    }

    /// Gets the configuration.
    pub fn config(&self) -> &BookConfig {
        &self.config
    }

    /// Fetches the table of contents without downloading any chapter.
    pub async fn fetch_index(&self, index_url: &Url) -> Result<BookMeta> {
        fetch_index(&self.source, index_url, &self.config.selectors, &self.sanitizer).await
    }

    /// Downloads the book at `index_url` and writes the master document.
    ///
    /// Index failures abort the run before anything is written. A chapter
    /// that never yields content is written title-only and the run goes on.
    pub async fn assemble_book(&self, index_url: &Url) -> Result<BookReport> {
        let book = self.fetch_index(index_url).await?;
        info!(book = %book.name, author = %book.author, chapters = book.chapters.len(), "Fetched index");

        let output_dir = &self.config.output_dir;
        let chapters_dir = output_dir.join(&self.config.chapters_dir);
        fs::create_dir_all(&chapters_dir)?;
        if let Some(path) = self.write_font_settings()? {
            info!(path = %path.display(), "Rendered font settings");
        }

        let master_path = master_path(output_dir, &book);
        let mut master = BufWriter::new(File::create(&master_path)?);
        master.write_all(self.front_matter(&book).as_bytes())?;

        let mut degraded = Vec::new();
        for (i, chapter) in book.chapters.iter().enumerate() {
            let id = i + 1;
            let output = fetch_chapter(
                &self.source,
                id,
                &chapter.name,
                &chapter.url,
                self.config.max_retries,
                &self.config.selectors.content,
                &self.sanitizer,
            )
            .await?;

            output.write_to(&chapters_dir)?;
            if output.degraded {
                degraded.push(id);
            }

            master.write_all(self.chapter_input(id).as_bytes())?;
        }

        master.write_all(b"\\end{document}\n")?;
        master.flush()?;

        Ok(BookReport { master_path, chapters: book.chapters.len(), degraded })
    }

    /// Everything before the first chapter reference.
    fn front_matter(&self, book: &BookMeta) -> String {
        let mut out = self.config.preamble.render();
        out.push_str(&format!("\\title{{{}}}\n", self.sanitizer.escape(&book.name)));
        out.push_str(&format!("\\author{{{}}}\n", self.sanitizer.escape(&book.author)));
        out.push_str("\\begin{document}\n");
        out.push_str("\\maketitle\n");
        out.push_str("\\tableofcontents\n");
        out
    }

    fn chapter_input(&self, id: usize) -> String {
        let path = self.config.chapters_dir.join(chapter_file_name(id));
        format!("\\input{{{}}}\n", tex_path(&path))
    }

    /// Renders the font settings template when the operator supplied one.
    fn write_font_settings(&self) -> Result<Option<PathBuf>> {
        let template_dir = self.config.output_dir.join(&self.config.template_dir);
        let template_path = template_dir.join(FONT_TEMPLATE);

        if !template_path.is_file() {
            debug!(path = %template_path.display(), "no font settings template, skipping");
            return Ok(None);
        }

        let template = fs::read_to_string(&template_path)?;
        let settings_path = template_dir.join(FONT_SETTINGS);
        fs::write(&settings_path, render_template(&template, &self.config.fonts))?;
        Ok(Some(settings_path))
    }
}

/// File stem for the master document, derived from the book title.
///
/// Path separators and other characters rejected by common filesystems become
/// `_`; CJK and other non-ASCII text is kept as-is.
pub fn book_file_stem(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| if INVALID_FILENAME_CHARS.contains(&c) || c.is_control() { '_' } else { c })
        .collect();

    let trimmed = replaced.trim_matches(|c: char| c == '.' || c.is_whitespace());
    if trimmed.is_empty() { "book".to_string() } else { trimmed.to_string() }
}

/// Path of the master document for `book` under `output_dir`.
pub fn master_path(output_dir: &Path, book: &BookMeta) -> PathBuf {
    output_dir.join(format!("{}.tex", book_file_stem(&book.name)))
}
