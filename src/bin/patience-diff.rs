// SPDX-License-Identifier: MIT

use std::io::Write;

use clap::Parser;

use patience_diff::*;
use utils::Result;

#[derive(Parser, Debug)]
struct Cli {
    old: std::path::PathBuf,
    new: std::path::PathBuf,

    /// Highlight the changed words within changed blocks
    #[clap(long)]
    word_diff: bool,

    /// Report diff progress on stderr
    #[clap(long)]
    progress: bool,

    #[clap(flatten)]
    output: cli::Options,
}

fn do_main() -> Result<()> {
    let args = Cli::parse();

    let old = utils::read_lines(&args.old)?;
    let new = utils::read_lines(&args.new)?;

    let cancel = utils::CancelToken::new();
    let show_progress = args.progress;
    let mut report = move |percent: u32| {
        if show_progress {
            eprint!("\r{}%", percent);
            let _ = std::io::stderr().flush();
        }
    };
    let mut progress = utils::Progress::new(&mut report);

    let script = diff::diff_lines(&old, &new, &cancel, &mut progress)?;
    if show_progress {
        eprintln!();
    }

    let options = diff_color::RenderOptions {
        word_level: args.word_diff,
    };
    let mut stream = cli::stdout_stream(&args.output);
    diff_color::render_script(&script, &options, &cancel, &mut stream)?;

    Ok(())
}

fn main() {
    if let Err(err) = do_main() {
        println!("{}", err);
        std::process::exit(1);
    }
}
