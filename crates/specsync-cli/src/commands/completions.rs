//! Shell completions generation command
//!
//! Generates shell completions for bash, zsh, fish, elvish, and powershell.
//! Usage: `specsync completions bash > ~/.local/share/bash-completion/completions/specsync`

use std::io::{self, Write};

use anyhow::Result;
use clap::CommandFactory;
use clap_complete::Shell;

/// Name completions are registered under
const BIN_NAME: &str = "specsync";

/// Arguments for the completions subcommand
#[derive(Debug, clap::Args)]
pub struct CompletionsCommand {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

impl CompletionsCommand {
    /// Execute the completions command, printing completions to stdout
    pub fn execute(&self) -> Result<()> {
        let mut stdout = io::stdout().lock();
        self.write_to(&mut stdout);
        stdout.flush()?;
        Ok(())
    }

    fn write_to(&self, out: &mut dyn Write) {
        let mut cmd = crate::Cli::command();
        clap_complete::generate(self.shell, &mut cmd, BIN_NAME, out);
    }
}
