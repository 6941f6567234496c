//! Shell completion generation.

use std::io;

use clap::CommandFactory;
use clap_complete::{generate, shells};

use crate::cli::{Cli, CompletionsArgs, Shell};

const BIN_NAME: &str = "packout";

pub fn execute(args: CompletionsArgs) -> crate::error::CliResult<()> {
    write_completions(args.shell, &mut io::stdout());
    Ok(())
}

fn write_completions(shell: Shell, buf: &mut dyn io::Write) {
    let mut cmd = Cli::command();

    match shell {
        Shell::Bash => generate(shells::Bash, &mut cmd, BIN_NAME, buf),
        Shell::Zsh => generate(shells::Zsh, &mut cmd, BIN_NAME, buf),
        Shell::Fish => generate(shells::Fish, &mut cmd, BIN_NAME, buf),
        Shell::PowerShell => generate(shells::PowerShell, &mut cmd, BIN_NAME, buf),
        Shell::Elvish => generate(shells::Elvish, &mut cmd, BIN_NAME, buf),
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bash_completions_mention_render() {
        let mut buf = Vec::new();
        write_completions(Shell::Bash, &mut buf);
        let script = String::from_utf8(buf).unwrap();
        assert!(script.contains("packout"));
        assert!(script.contains("render"));
    }
}
