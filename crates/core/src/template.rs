//! Preamble and font settings for the master document.

use std::path::PathBuf;

/// Placeholder for the CJK font family in the font settings template.
pub const CJK_FONT_PLACEHOLDER: &str = "#zhfont#";
/// Placeholder for the Latin body font.
pub const MAIN_FONT_PLACEHOLDER: &str = "#enmainfont#";
/// Placeholder for the Latin sans font.
pub const SANS_FONT_PLACEHOLDER: &str = "#ensansfont#";

/// Font families substituted into the font settings template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontConfig {
    pub cjk: String,
    pub main: String,
    pub sans: String,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            cjk: "PingFang SC".to_string(),
            main: "Times New Roman".to_string(),
            sans: "Helvetica".to_string(),
        }
    }
}

/// How the master document gets its document class and packages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preamble {
    /// `\input{path}` of a header file kept next to the book, relative to the output directory.
    Input(PathBuf),
    /// Literal preamble text written at the top of the master document.
    Inline(String),
}

impl Default for Preamble {
    fn default() -> Self {
        Preamble::Input(PathBuf::from("template").join("header.tex"))
    }
}

impl Preamble {
    /// Renders the preamble as it appears in the master document, newline-terminated.
    pub fn render(&self) -> String {
        match self {
            Preamble::Input(path) => format!("\\input{{{}}}\n", tex_path(path)),
            Preamble::Inline(text) if text.ends_with('\n') => text.clone(),
            Preamble::Inline(text) => format!("{}\n", text),
        }
    }
}

/// Fills the font placeholders of a font settings template.
pub fn render_template(template: &str, fonts: &FontConfig) -> String {
    template
        .replace(CJK_FONT_PLACEHOLDER, &fonts.cjk)
        .replace(MAIN_FONT_PLACEHOLDER, &fonts.main)
        .replace(SANS_FONT_PLACEHOLDER, &fonts.sans)
}

/// Path as written inside `\input{}`: forward slashes on every platform.
pub(crate) fn tex_path(path: &std::path::Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
