//! Status command implementation.

use echo_music_core::{Dispatch, DispatchClient, MusicStatus};
use tracing::warn;

use crate::error::CliError;
use crate::output::get_formatter;

use super::execute;

/// Run the status command
pub async fn run_status(client: &DispatchClient, json: bool) -> Result<(), CliError> {
    let formatter = get_formatter(json);

    let body = execute(client, Dispatch::StatusQuery).await?;

    match serde_json::from_value::<MusicStatus>(body.clone()) {
        Ok(status) => println!("{}", formatter.format_music_status(&status)),
        Err(e) => {
            warn!(error = %e, "unexpected music status shape");
            println!("{}", formatter.format_command_result("status", &body));
        }
    }

    Ok(())
}
