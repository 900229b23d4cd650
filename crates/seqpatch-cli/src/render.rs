//! Text rendering of a patch in the classic `diff` normal format.

use colored::Colorize;

use seqpatch_core::{Delta, Patch};

/// 1-based line range: `5` for a single line, `5,7` for several.
fn range(position: usize, len: usize) -> String {
    if len <= 1 {
        format!("{}", position + 1)
    } else {
        format!("{},{}", position + 1, position + len)
    }
}

/// Render `patch` as `2c2` / `< old` / `---` / `> new` blocks.
pub fn render_text(patch: &Patch<String>, color: bool) -> String {
    let mut out = String::new();
    for delta in patch {
        let header = match delta {
            Delta::Insert { original, revised } => format!(
                "{}a{}",
                original.position,
                range(revised.position, revised.len())
            ),
            Delta::Delete { original, revised } => format!(
                "{}d{}",
                range(original.position, original.len()),
                revised.position
            ),
            Delta::Change { original, revised } => format!(
                "{}c{}",
                range(original.position, original.len()),
                range(revised.position, revised.len())
            ),
        };
        push_line(&mut out, header, color, |s| s.cyan().to_string());

        for line in &delta.original().elements {
            push_line(&mut out, format!("< {line}"), color, |s| s.red().to_string());
        }
        if matches!(delta, Delta::Change { .. }) {
            push_line(&mut out, "---".to_string(), color, |s| s);
        }
        for line in &delta.revised().elements {
            push_line(&mut out, format!("> {line}"), color, |s| s.green().to_string());
        }
    }
    out
}

/// One-line summary such as `2 changes: +3 -1`.
pub fn render_summary(patch: &Patch<String>) -> String {
    let noun = if patch.len() == 1 { "change" } else { "changes" };
    format!(
        "{} {noun}: +{} -{}",
        patch.len(),
        patch.insertions(),
        patch.deletions()
    )
}

fn push_line(out: &mut String, line: String, color: bool, paint: impl Fn(String) -> String) {
    let line = if color { paint(line) } else { line };
    out.push_str(&line);
    out.push('\n');
}
