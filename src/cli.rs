// SPDX-License-Identifier: MIT

use std::io::IsTerminal;

use clap::Args;
use termcolor::{ColorChoice, StandardStream};

#[derive(Debug, Clone, Default, Args)]
pub struct Options {
    /// Whether the output should be colored
    #[clap(long)]
    pub color: Option<bool>,
}

/// Stdout as a color-capable stream, honoring `--color` and defaulting to
/// colored output only on a terminal.
pub fn stdout_stream(options: &Options) -> StandardStream {
    let use_color = options
        .color
        .unwrap_or_else(|| std::io::stdout().is_terminal());
    let choice = if use_color {
        ColorChoice::Always
    } else {
        ColorChoice::Never
    };
    StandardStream::stdout(choice)
}
