//! HTTP client for the local proxy.

use std::future::Future;

use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, warn};

use super::{Dispatch, DispatchResult, Stage};
use crate::config::HarnessConfig;
use crate::device::resolve;
use crate::error::{CommandError, CoreError};
use crate::protocol::commands::{search_operation, text_operation, CommandTranslator, Translation};
use crate::protocol::response::normalize_response;
use crate::protocol::sequence::{self, SequenceDocument};
use crate::types::{CommandId, CommandSpec, DeviceIdentity, DeviceRecord, ProxyStatus};

const STATUS_PATH: &str = "/api/status";
const MUSIC_STATUS_PATH: &str = "/api/music";
const CONTROL_PATH: &str = "/api/music/control";
const SEARCH_PATH: &str = "/api/music/play";
const TEXT_COMMAND_PATH: &str = "/api/music/text-command";

/// Client for the proxy's music endpoints.
///
/// Validation and device resolution errors come back as `Err` before any
/// request is sent. Transport and upstream failures are folded into
/// [`DispatchResult::Failed`].
#[derive(Debug, Clone)]
pub struct DispatchClient {
    http: Client,
    base_url: String,
    translator: CommandTranslator,
    family: Option<String>,
    identity: DeviceIdentity,
}

fn build_client(config: &HarnessConfig) -> Result<Client, CoreError> {
    Client::builder()
        .timeout(config.timeout())
        .build()
        .map_err(|e| CoreError::Transport(format!("HTTP client error: {}", e)))
}

fn stage(next: Stage) {
    debug!(stage = %next, "command lifecycle");
}

impl DispatchClient {
    pub fn new(config: &HarnessConfig) -> Result<Self, CoreError> {
        config.validate()?;

        Ok(Self {
            http: build_client(config)?,
            base_url: config.proxy_url.trim_end_matches('/').to_string(),
            translator: CommandTranslator::new(config.default_provider.clone()),
            family: config.family_filter().map(str::to_string),
            identity: config.identity(),
        })
    }

    pub fn translator(&self) -> &CommandTranslator {
        &self.translator
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Perform one request and return the status code and raw body.
    async fn exchange(&self, path: &str, body: Option<&Value>) -> Result<(u16, String), CoreError> {
        let url = self.url(path);
        let request = match body {
            Some(b) => {
                debug!(%url, body = %b, "POST");
                self.http.post(&url).json(b)
            }
            None => {
                debug!(%url, "GET");
                self.http.get(&url)
            }
        };

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                CoreError::Transport(format!("Request to {} timed out", url))
            } else {
                CoreError::Transport(format!("Request to {} failed: {}", url, e))
            }
        })?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| CoreError::Transport(format!("Failed to read response from {}: {}", url, e)))?;

        Ok((status, text))
    }

    async fn send(&self, path: &str, body: Option<&Value>) -> DispatchResult {
        stage(Stage::Dispatching);
        let result = match self.exchange(path, body).await {
            Ok((status, text)) => normalize_response(status, &text),
            Err(e) => DispatchResult::Failed(e.to_string()),
        };

        if let DispatchResult::Failed(reason) = &result {
            warn!(path, %reason, "dispatch failed");
        }
        stage(Stage::from(&result));
        result
    }

    /// Fetch the proxy's connection state and device snapshot.
    pub async fn fetch_proxy_status(&self) -> Result<ProxyStatus, CoreError> {
        let (status, text) = self.exchange(STATUS_PATH, None).await?;
        match normalize_response(status, &text) {
            DispatchResult::Completed(value) => serde_json::from_value(value)
                .map_err(|e| CoreError::Transport(format!("Malformed status response: {}", e))),
            DispatchResult::Failed(reason) => Err(CoreError::Upstream(reason)),
            DispatchResult::Interrupted => Err(CoreError::Transport("interrupted".to_string())),
        }
    }

    /// Resolve the device that device-scoped commands should target.
    pub async fn resolve_device(&self) -> Result<DeviceRecord, CoreError> {
        stage(Stage::Resolving);
        let status = self.fetch_proxy_status().await?;
        Ok(resolve(&status, self.family.as_deref())?)
    }

    /// Read the current playback status. No device resolution is needed.
    pub async fn query_status(&self) -> DispatchResult {
        self.send(MUSIC_STATUS_PATH, None).await
    }

    pub async fn send_transport_command(&self, command: CommandId) -> Result<DispatchResult, CoreError> {
        if !command.is_transport() {
            return Err(CommandError::UnknownCommand(command.to_string()).into());
        }

        let device = match self.resolve_device().await {
            Ok(device) => device,
            Err(CoreError::Transport(reason)) | Err(CoreError::Upstream(reason)) => {
                stage(Stage::Failed);
                return Ok(DispatchResult::Failed(reason));
            }
            Err(e) => return Err(e),
        };

        stage(Stage::Translating);
        let no_args: [&str; 0] = [];
        let operation = self
            .translator
            .translate(command, &no_args)?
            .into_operation()
            .ok_or_else(|| CommandError::UnknownCommand(command.to_string()))?
            .scoped_to(&device, &self.identity);
        debug!(
            device = %device.display_name(),
            operation = %operation.type_tag,
            "sending transport command"
        );

        Ok(self
            .send(CONTROL_PATH, Some(&json!({ "command": command.as_str() })))
            .await)
    }

    pub async fn send_search(&self, provider: &str, phrase: &str) -> Result<DispatchResult, CoreError> {
        stage(Stage::Translating);
        let operation = search_operation(provider, phrase)?;
        let body = json!({
            "searchPhrase": operation.field("searchPhrase"),
            "provider": operation.field("provider"),
        });
        Ok(self.send(SEARCH_PATH, Some(&body)).await)
    }

    pub async fn send_text_command(&self, text: &str) -> Result<DispatchResult, CoreError> {
        stage(Stage::Translating);
        let operation = text_operation(text)?;
        let body = json!({ "text": operation.field("text") });
        Ok(self.send(TEXT_COMMAND_PATH, Some(&body)).await)
    }

    /// Dispatch a request through the endpoint serving its command family.
    pub async fn dispatch(&self, request: Dispatch) -> Result<DispatchResult, CoreError> {
        stage(Stage::Idle);
        match request {
            Dispatch::StatusQuery => Ok(self.query_status().await),
            Dispatch::Transport(command) => self.send_transport_command(command).await,
            Dispatch::Search { provider, phrase } => self.send_search(&provider, &phrase).await,
            Dispatch::Text(text) => self.send_text_command(&text).await,
        }
    }

    /// Dispatch, giving up with [`DispatchResult::Interrupted`] once `cancel`
    /// completes.
    pub async fn dispatch_until<F>(&self, request: Dispatch, cancel: F) -> Result<DispatchResult, CoreError>
    where
        F: Future<Output = ()>,
    {
        tokio::select! {
            biased;
            _ = cancel => {
                stage(Stage::Interrupted);
                Ok(DispatchResult::Interrupted)
            }
            result = self.dispatch(request) => result,
        }
    }

    /// Resolve, translate and wrap a command as a behavior sequence.
    pub async fn build_preview(&self, spec: &CommandSpec) -> Result<SequenceDocument, CoreError> {
        let translation = self.translator.translate_spec(spec)?;
        let operation = match translation {
            Translation::StatusQuery => None,
            Translation::Operation(op) => {
                let device = self.resolve_device().await?;
                Some(op.scoped_to(&device, &self.identity))
            }
        };
        Ok(sequence::build(operation)?)
    }

    /// Submit a behavior sequence for preview execution.
    ///
    /// The proxy serves music commands through dedicated endpoints only, so
    /// this path always fails without sending anything.
    pub fn preview_behavior(&self, document: &SequenceDocument) -> DispatchResult {
        match document.to_behavior_command() {
            Ok(command) => debug!(sequence = %command.sequence_json, "preview behavior requested"),
            Err(e) => warn!(error = %e, "could not encode behavior sequence"),
        }
        stage(Stage::Failed);
        DispatchResult::Failed(
            "behavior preview dispatch is not supported by the proxy; use the dedicated music endpoints"
                .to_string(),
        )
    }
}
