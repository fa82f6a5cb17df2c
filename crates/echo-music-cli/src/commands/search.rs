//! Music search command.

use echo_music_core::protocol::commands::search_operation;
use echo_music_core::types::CommandSpec;
use echo_music_core::{CommandId, Dispatch, DispatchClient};
use tracing::debug;

use crate::cli::SearchArgs;
use crate::error::CliError;
use crate::output::get_formatter;

use super::execute;

/// Build the search request from CLI arguments.
///
/// With `--provider` every positional token is part of the phrase; otherwise
/// the translator decides whether the first token names a provider.
pub(crate) fn search_request(client: &DispatchClient, args: &SearchArgs) -> Result<Dispatch, CliError> {
    match &args.provider {
        Some(provider) => {
            let operation = search_operation(provider, &args.query.join(" "))?;
            Ok(Dispatch::Search {
                provider: operation.field("provider").unwrap_or_default().to_string(),
                phrase: operation.field("searchPhrase").unwrap_or_default().to_string(),
            })
        }
        None => {
            let spec = CommandSpec::new(CommandId::Search, args.query.clone());
            Ok(Dispatch::from_spec(client.translator(), &spec)?)
        }
    }
}

/// Run the search command
pub async fn run_search(client: &DispatchClient, args: SearchArgs, json: bool) -> Result<(), CliError> {
    let formatter = get_formatter(json);

    let request = search_request(client, &args)?;
    if let Dispatch::Search { provider, phrase } = &request {
        debug!(%provider, %phrase, "searching");
    }

    let body = execute(client, request).await?;
    println!("{}", formatter.format_command_result("search", &body));

    Ok(())
}
