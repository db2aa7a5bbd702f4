use clap::CommandFactory;
use clap_complete::{generate, shells};

use crate::cli::{Cli, CompletionShell};
use crate::error::CliError;

pub fn run_completions(shell: CompletionShell) -> Result<(), CliError> {
    let mut command = Cli::command();
    let mut out = std::io::stdout();

    match shell {
        CompletionShell::Bash => generate(shells::Bash, &mut command, "postbox", &mut out),
        CompletionShell::Zsh => generate(shells::Zsh, &mut command, "postbox", &mut out),
        CompletionShell::Fish => generate(shells::Fish, &mut command, "postbox", &mut out),
    }

    Ok(())
}
