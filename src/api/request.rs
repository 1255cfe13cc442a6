use crate::api::OcapiResponse;
use crate::config::HttpConfig;
use crate::error::SyncError;
use backoff::backoff::Backoff;
use backoff::{ExponentialBackoff, ExponentialBackoffBuilder};
use log::{debug, warn};
use std::time::Duration;

const SYSTEM_OBJECT_DEFINITIONS: &str = "/system_object_definitions";
const PAGE_ALL: &str = "start=0&count=1000";

/// Header carrying the resource state on update calls
pub const RESOURCE_STATE_HEADER: &str = "x-dw-resource-state";

pub fn system_object_definitions_path() -> String {
    format!("{}?{}", SYSTEM_OBJECT_DEFINITIONS, PAGE_ALL)
}

pub fn attribute_definitions_path(object_type: &str) -> String {
    format!(
        "{}/{}/attribute_definitions?{}&select=(**)",
        SYSTEM_OBJECT_DEFINITIONS, object_type, PAGE_ALL
    )
}

pub fn attribute_definition_path(object_type: &str, attribute_id: &str) -> String {
    format!(
        "{}/{}/attribute_definitions/{}",
        SYSTEM_OBJECT_DEFINITIONS, object_type, attribute_id
    )
}

pub fn attribute_groups_path(object_type: &str) -> String {
    format!(
        "{}/{}/attribute_groups?{}&select=(**)",
        SYSTEM_OBJECT_DEFINITIONS, object_type, PAGE_ALL
    )
}

pub fn attribute_group_path(object_type: &str, group_id: &str) -> String {
    format!(
        "{}/{}/attribute_groups/{}",
        SYSTEM_OBJECT_DEFINITIONS, object_type, group_id
    )
}

pub fn group_assignment_path(object_type: &str, group_id: &str, attribute_id: &str) -> String {
    format!(
        "{}/attribute_definitions/{}",
        attribute_group_path(object_type, group_id),
        attribute_id
    )
}

/// Send a request, retrying network failures and 5xx answers with
/// exponential backoff.
///
/// Any status below 500 resolves to an [`OcapiResponse`], failing ones
/// included. Once `max_retries` retries are spent the call fails with
/// [`SyncError::Transport`].
pub async fn send_with_retry<F>(config: &HttpConfig, url: &str, build: F) -> Result<OcapiResponse, SyncError>
where
    F: Fn() -> reqwest::RequestBuilder,
{
    let mut backoff = create_backoff(config);
    let max_attempts = config.max_retries.saturating_add(1);
    let mut attempts = 0;

    loop {
        attempts += 1;

        let failure = match build().send().await {
            Ok(response) if !response.status().is_server_error() => {
                return OcapiResponse::from_http(response)
                    .await
                    .map_err(|e| transport_error(url, e.to_string()));
            }
            Ok(response) => format!("server responded with {}", response.status()),
            Err(e) => e.to_string(),
        };

        if attempts >= max_attempts {
            warn!("Request to {} failed after {} attempts: {}", url, attempts, failure);
            return Err(transport_error(url, failure));
        }

        match backoff.next_backoff() {
            Some(delay) => {
                warn!("{}", failure);
                warn!(
                    "Retrying request | attempt {} of {} in {}ms",
                    attempts,
                    config.max_retries,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }
            None => return Err(transport_error(url, failure)),
        }
        debug!("Re-sending request to {}", url);
    }
}

fn create_backoff(config: &HttpConfig) -> ExponentialBackoff {
    ExponentialBackoffBuilder::new()
        .with_initial_interval(Duration::from_millis(config.retry_delay_ms))
        .with_multiplier(2.0)
        .with_max_elapsed_time(None) // Bounded by max_retries instead
        .build()
}

fn transport_error(url: &str, message: String) -> SyncError {
    SyncError::Transport {
        url: url.to_string(),
        message,
    }
}
