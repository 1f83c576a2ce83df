// SPDX-License-Identifier: MIT

use lazy_static::lazy_static;
use termcolor::{Color, ColorSpec, WriteColor};

use crate::diff::{word_diff, DiffItem};
use crate::utils::{CancelToken, Progress, Result};

#[derive(Default)]
struct Colors {
    default: ColorSpec,
    added: ColorSpec,
    added_emphasis: ColorSpec,
    removed: ColorSpec,
    removed_emphasis: ColorSpec,
}
impl Colors {
    fn new() -> Self {
        let mut colors = Colors {
            ..Default::default()
        };
        colors.added.set_fg(Some(Color::Green));
        colors.added_emphasis.set_fg(Some(Color::Green)).set_bold(true);
        colors.removed.set_fg(Some(Color::Red));
        colors.removed_emphasis.set_fg(Some(Color::Red)).set_bold(true);
        colors
    }
}
lazy_static! {
    static ref COLORS: Colors = Colors::new();
}

#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Re-diff changed blocks at word granularity and emphasize the words
    /// that actually differ.
    pub word_level: bool,
}

/// Render a line-level change script as colored terminal output.
pub fn render_script(
    script: &[DiffItem<String>],
    options: &RenderOptions,
    cancel: &CancelToken,
    out: &mut dyn WriteColor,
) -> Result<()> {
    for item in script {
        match item {
            DiffItem::Matched { content } => {
                out.set_color(&COLORS.default)?;
                for line in content {
                    writeln!(out, " {}", line)?;
                }
            }
            DiffItem::Changed {
                deletions,
                additions,
            } => {
                if options.word_level && !deletions.is_empty() && !additions.is_empty() {
                    let words = word_diff(
                        &deletions.join("\n"),
                        &additions.join("\n"),
                        cancel,
                        &mut Progress::none(),
                    )?;
                    render_word_side(&words, true, out)?;
                    render_word_side(&words, false, out)?;
                } else {
                    out.set_color(&COLORS.removed)?;
                    for line in deletions {
                        writeln!(out, "-{}", line)?;
                    }
                    out.set_color(&COLORS.added)?;
                    for line in additions {
                        writeln!(out, "+{}", line)?;
                    }
                }
            }
        }
    }
    out.reset()?;
    Ok(())
}

/// Print one side of a word-level script, emphasizing the tokens that belong
/// to changed segments. Tokens may contain embedded newlines (the separator
/// tokens of a multi-line block), so the line prefix is re-emitted after each
/// one.
fn render_word_side(
    words: &[DiffItem<String>],
    old: bool,
    out: &mut dyn WriteColor,
) -> Result<()> {
    let (plain, emphasis, prefix) = if old {
        (&COLORS.removed, &COLORS.removed_emphasis, '-')
    } else {
        (&COLORS.added, &COLORS.added_emphasis, '+')
    };

    let mut at_line_start = true;
    for item in words {
        let (tokens, spec) = match item {
            DiffItem::Matched { content } => (content, plain),
            DiffItem::Changed {
                deletions,
                additions,
            } => (if old { deletions } else { additions }, emphasis),
        };

        out.set_color(spec)?;
        for token in tokens {
            for piece in token.split_inclusive('\n') {
                if at_line_start {
                    write!(out, "{}", prefix)?;
                    at_line_start = false;
                }
                write!(out, "{}", piece)?;
                if piece.ends_with('\n') {
                    at_line_start = true;
                }
            }
        }
    }
    if !at_line_start {
        writeln!(out)?;
    }
    out.reset()?;
    Ok(())
}
