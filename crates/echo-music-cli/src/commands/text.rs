//! Free-text command.

use echo_music_core::types::CommandSpec;
use echo_music_core::{CommandId, Dispatch, DispatchClient};

use crate::cli::TextArgs;
use crate::error::CliError;
use crate::output::get_formatter;

use super::execute;

/// Run the text command
pub async fn run_text(client: &DispatchClient, args: TextArgs, json: bool) -> Result<(), CliError> {
    let formatter = get_formatter(json);

    let spec = CommandSpec::new(CommandId::TextCommand, args.words);
    let request = Dispatch::from_spec(client.translator(), &spec)?;

    let body = execute(client, request).await?;
    println!("{}", formatter.format_command_result("text", &body));

    Ok(())
}
