//! Reading files as sequences of lines.

use std::fs;
use std::path::Path;

use anyhow::Context;

/// File content split into lines, plus the layout needed to write it back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextFile {
    /// Lines without terminators.
    pub lines: Vec<String>,
    /// `true` if the file uses `\r\n` line endings.
    pub crlf: bool,
    /// `true` if the last line is followed by a line ending.
    pub trailing_newline: bool,
}

impl TextFile {
    /// Split `text` into lines.
    ///
    /// The ending of the first line decides the style for the whole file; a
    /// file mixing `\n` and `\r\n` is written back in that one style. An empty
    /// file counts as newline-terminated so added lines get a final newline.
    pub fn parse(text: &str) -> Self {
        let crlf = text
            .find('\n')
            .is_some_and(|at| text[..at].ends_with('\r'));
        Self {
            lines: text.lines().map(str::to_owned).collect(),
            crlf,
            trailing_newline: text.is_empty() || text.ends_with('\n'),
        }
    }

    /// Render `lines` with this file's line ending and trailing-newline state.
    pub fn render(&self, lines: &[String]) -> String {
        let ending = if self.crlf { "\r\n" } else { "\n" };
        let mut out = lines.join(ending);
        if self.trailing_newline && !lines.is_empty() {
            out.push_str(ending);
        }
        out
    }
}

/// Read `path` as a [`TextFile`].
pub fn read_text(path: &Path) -> anyhow::Result<TextFile> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    Ok(TextFile::parse(&text))
}
