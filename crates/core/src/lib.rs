pub mod assemble;
pub mod chapter;
pub mod config;
pub mod error;
pub mod fetch;
pub mod index;
pub mod parse;
pub mod sanitize;
pub mod template;

#[cfg(test)]
mod test_helpers;

pub use assemble::{Assembler, BookReport, book_file_stem, master_path};
pub use chapter::{ChapterOutput, fetch_chapter};
pub use config::{BookConfig, BookConfigBuilder, PageSelectors};
pub use error::{ChapbookError, Result};
#[cfg(feature = "fetch")]
pub use fetch::HttpSource;
pub use fetch::{FetchConfig, PageSource, fetch_file, parse_url};
pub use index::{BookMeta, ChapterRef, fetch_index, parse_index};
pub use parse::Document;
pub use sanitize::{EscapeTable, SanitizeConfig, Sanitizer};
pub use template::{FontConfig, Preamble, render_template};
