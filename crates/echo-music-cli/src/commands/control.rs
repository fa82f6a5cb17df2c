//! Playback transport commands (play, pause, next, ...).

use echo_music_core::{CommandId, Dispatch, DispatchClient};

use crate::error::CliError;
use crate::output::get_formatter;

use super::execute;

/// Run a transport command
pub async fn run_control(client: &DispatchClient, command: CommandId, json: bool) -> Result<(), CliError> {
    let formatter = get_formatter(json);
    let body = execute(client, Dispatch::Transport(command)).await?;
    println!("{}", formatter.format_command_result(command.as_str(), &body));

    Ok(())
}
