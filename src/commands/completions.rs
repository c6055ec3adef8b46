//! # Completions Command Implementation
//!
//! Prints a completion script for `pom-enrich` in the requested shell's
//! dialect. The script is generated from the same `clap` definition the
//! binary parses with, so `enrich` flags and their value hints stay in step.
//!
//! ```bash
//! pom-enrich completions bash > ~/.local/share/bash-completion/completions/pom-enrich
//! pom-enrich completions zsh > ~/.zfunc/_pom-enrich
//! ```

use anyhow::Result;
use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};
use std::io::{self, Write};

use crate::cli::Cli;

/// Generate shell completion scripts
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// The shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Write the completion script for the requested shell to stdout.
pub fn execute(args: CompletionsArgs) -> Result<()> {
    write_completions(args.shell, &mut io::stdout());
    Ok(())
}

fn write_completions(shell: Shell, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, out);
}
