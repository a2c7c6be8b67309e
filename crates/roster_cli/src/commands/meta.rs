//! Meta commands that never touch the network.

use clap::CommandFactory;

use crate::Cli;

/// Print shell completions for `shell` to stdout.
pub(crate) fn handle_completions(shell: clap_complete::Shell) {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
}
