//! Conversion of extracted prose into text that is safe inside a LaTeX document.
//!
//! Every character of unknown provenance goes through [`Sanitizer`] before it
//! is written out. The reserved LaTeX characters are rewritten through an
//! [`EscapeTable`], stray Unicode spacing characters become plain spaces, and
//! full-width compatibility forms (which the target site leaks from broken
//! encodings) are dropped.
//!
//! # Example
//!
//! ```rust
//! use chapbook_core::Sanitizer;
//!
//! let sanitizer = Sanitizer::default();
//! assert_eq!(sanitizer.sanitize("  Cost: 50% & rising"), r"Cost: 50\% \& rising");
//! ```

use std::collections::HashMap;
use std::ops::RangeInclusive;

use regex::Regex;

use crate::{ChapbookError, Result};

/// Unicode space and format characters that are rewritten to an ASCII space.
const UNICODE_SPACES: &[char] = &[
    '\u{1680}', '\u{180e}', '\u{2000}', '\u{2001}', '\u{2002}', '\u{2003}', '\u{2004}', '\u{2005}', '\u{2006}',
    '\u{2007}', '\u{2008}', '\u{2009}', '\u{200a}', '\u{200b}', '\u{202f}', '\u{205f}', '\u{3000}', '\u{feff}',
];

/// Default band of characters removed from every line.
pub const FULL_WIDTH_BAND: RangeInclusive<char> = '\u{ff00}'..='\u{ffff}';

/// Default pattern for inline script calls leaking into chapter text.
pub const SCRIPT_REMNANT_PATTERN: &str = r"\w+\(\);";

/// Ordered mapping from reserved characters to their LaTeX replacements.
///
/// The backslash entry always comes first. Replacement is a single pass over
/// the input, so backslashes introduced by later entries are never escaped
/// a second time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EscapeTable {
    entries: Vec<(char, String)>,
}

impl EscapeTable {
    /// Table for XeLaTeX with fontspec.
    ///
    /// `^` is dropped: `\textcircumflex` trips the fontspec EU1 encoding bug.
    pub fn xelatex() -> Self {
        Self::with_circumflex("")
    }

    /// Table that keeps `^` as `\textasciicircum`.
    pub fn standard() -> Self {
        Self::with_circumflex(r"\textasciicircum ")
    }

    fn with_circumflex(circumflex: &str) -> Self {
        let mut entries: Vec<(char, String)> = vec![
            ('\\', r"\textbackslash ".to_string()),
            ('#', r"\#".to_string()),
            ('$', r"\$".to_string()),
            ('%', r"\%".to_string()),
            ('&', r"\&".to_string()),
            ('^', circumflex.to_string()),
            ('_', r"\_".to_string()),
            ('{', r"\{".to_string()),
            ('}', r"\}".to_string()),
            ('~', r"\textasciitilde ".to_string()),
            ('[', "【".to_string()),
            (']', "】".to_string()),
        ];
        entries.extend(UNICODE_SPACES.iter().map(|&c| (c, " ".to_string())));
        Self { entries }
    }

    /// Adds or overrides a single entry, keeping the original position when overriding.
    pub fn with_entry(mut self, from: char, to: impl Into<String>) -> Self {
        let to = to.into();
        match self.entries.iter_mut().find(|(c, _)| *c == from) {
            Some(entry) => entry.1 = to,
            None => self.entries.push((from, to)),
        }
        self
    }

    /// Characters this table rewrites, in table order.
    pub fn reserved(&self) -> impl Iterator<Item = char> + '_ {
        self.entries.iter().map(|(c, _)| *c)
    }

    /// Replacement for `c`, if `c` is reserved.
    pub fn replacement(&self, c: char) -> Option<&str> {
        self.entries.iter().find(|(from, _)| *from == c).map(|(_, to)| to.as_str())
    }
}

impl Default for EscapeTable {
    fn default() -> Self {
        Self::xelatex()
    }
}

/// Sanitization rules.
///
/// The strip band and the script-remnant pattern encode quirks of one
/// content source, so both can be switched off.
#[derive(Debug, Clone)]
pub struct SanitizeConfig {
    /// Reserved-character table.
    pub table: EscapeTable,
    /// Characters removed from every line (default: U+FF00..=U+FFFF).
    pub strip_band: Option<RangeInclusive<char>>,
    /// Regex removed from the first fragment of a chapter (empty disables).
    pub script_remnant: String,
}

impl Default for SanitizeConfig {
    fn default() -> Self {
        Self {
            table: EscapeTable::default(),
            strip_band: Some(FULL_WIDTH_BAND),
            script_remnant: SCRIPT_REMNANT_PATTERN.to_string(),
        }
    }
}

/// Compiled sanitization rules.
#[derive(Debug, Clone)]
pub struct Sanitizer {
    replacements: HashMap<char, String>,
    strip_band: Option<RangeInclusive<char>>,
    script_remnant: Option<Regex>,
}

impl Sanitizer {
    /// Compiles a sanitizer from its configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ChapbookError::ConfigError`] if the script-remnant pattern is not a valid regex.
    pub fn new(config: &SanitizeConfig) -> Result<Self> {
        let script_remnant = if config.script_remnant.is_empty() {
            None
        } else {
            let re = Regex::new(&config.script_remnant)
                .map_err(|e| ChapbookError::ConfigError(format!("invalid script remnant pattern: {}", e)))?;
            Some(re)
        };

        Ok(Self {
            replacements: compile_table(&config.table),
            strip_band: config.strip_band.clone(),
            script_remnant,
        })
    }

    /// Rewrites reserved characters only; leading whitespace and empty
    /// lines are kept.
    pub fn escape(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for c in text.chars() {
            match self.replacements.get(&c) {
                Some(replacement) => out.push_str(replacement),
                None => out.push(c),
            }
        }
        out
    }

    /// Sanitizes one line: escape, drop the strip band, strip leading whitespace.
    ///
    /// The band is removed before trimming so that whitespace uncovered by
    /// the removal is trimmed too. The result may be empty; callers drop
    /// empty lines.
    pub fn sanitize_line(&self, line: &str) -> String {
        let mut escaped = self.escape(line);
        if let Some(band) = &self.strip_band {
            escaped.retain(|c| !band.contains(&c));
        }
        escaped.trim_start().to_string()
    }

    /// Sanitizes every line of `text`, dropping lines that end up empty.
    pub fn sanitize_lines(&self, text: &str) -> Vec<String> {
        text.lines()
            .map(|line| self.sanitize_line(line))
            .filter(|line| !line.is_empty())
            .collect()
    }

    /// Sanitizes `text`, returning the surviving lines joined with `\n`.
    pub fn sanitize(&self, text: &str) -> String {
        self.sanitize_lines(text).join("\n")
    }

    /// Sanitizes `text` into a single line, for titles and other directive arguments.
    pub fn sanitize_inline(&self, text: &str) -> String {
        self.sanitize_lines(text).join(" ")
    }

    /// Removes inline script calls such as `loadAd();` from a fragment.
    pub fn strip_script_remnants<'a>(&self, fragment: &'a str) -> std::borrow::Cow<'a, str> {
        match &self.script_remnant {
            Some(re) => re.replace_all(fragment, ""),
            None => std::borrow::Cow::Borrowed(fragment),
        }
    }
}

impl Default for Sanitizer {
    fn default() -> Self {
        let config = SanitizeConfig::default();
        Self {
            replacements: compile_table(&config.table),
            strip_band: config.strip_band,
            script_remnant: Regex::new(SCRIPT_REMNANT_PATTERN).ok(),
        }
    }
}

/// First entry wins when a character is listed twice.
fn compile_table(table: &EscapeTable) -> HashMap<char, String> {
    let mut replacements = HashMap::with_capacity(table.entries.len());
    for (from, to) in &table.entries {
        replacements.entry(*from).or_insert_with(|| to.clone());
    }
    replacements
}
