use crate::api::request::{self, send_with_retry, RESOURCE_STATE_HEADER};
use crate::api::token::fetch_access_token;
use crate::api::{OcapiResponse, SystemObjectApi};
use crate::config::AppConfig;
use crate::error::SyncError;
use anyhow::{Context, Result};
use log::debug;
use reqwest::header::{CACHE_CONTROL, CONTENT_TYPE};
use reqwest::Method;
use std::time::Duration;
use tokio::sync::OnceCell;

/// OCAPI Data API client for system object metadata.
///
/// The access token is requested on the first call and reused for the rest
/// of the process.
#[derive(Debug)]
pub struct OcapiClient {
    http: reqwest::Client,
    config: AppConfig,
    base_url: String,
    token: OnceCell<String>,
}

impl OcapiClient {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let base_url = config.data_api_base()?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http.timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http,
            config: config.clone(),
            base_url,
            token: OnceCell::new(),
        })
    }

    pub async fn access_token(&self) -> Result<&str, SyncError> {
        self.token
            .get_or_try_init(|| fetch_access_token(&self.http, &self.config))
            .await
            .map(String::as_str)
    }

    async fn call(
        &self,
        method: Method,
        path: &str,
        body: Option<&[u8]>,
        resource_state: Option<&str>,
    ) -> Result<OcapiResponse> {
        let token = self.access_token().await?;
        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, url);

        let build = || {
            let mut builder = self
                .http
                .request(method.clone(), &url)
                .bearer_auth(token)
                .header(CONTENT_TYPE, "application/json")
                .header(CACHE_CONTROL, "no-cache");

            if let Some(state) = resource_state {
                builder = builder.header(RESOURCE_STATE_HEADER, state);
            }
            if let Some(body) = body {
                builder = builder.body(body.to_vec());
            }
            builder
        };

        let response = send_with_retry(&self.config.http, &url, build).await?;
        debug!("{} {} -> {}", method, url, response.status);
        Ok(response)
    }
}

#[async_trait::async_trait]
impl SystemObjectApi for OcapiClient {
    async fn get_system_object_definitions(&self) -> Result<OcapiResponse> {
        self.call(Method::GET, &request::system_object_definitions_path(), None, None)
            .await
    }

    async fn get_attribute_definitions(&self, object_type: &str) -> Result<OcapiResponse> {
        self.call(Method::GET, &request::attribute_definitions_path(object_type), None, None)
            .await
    }

    async fn get_attribute_definition(&self, object_type: &str, attribute_id: &str) -> Result<OcapiResponse> {
        let path = format!(
            "{}?expand=value",
            request::attribute_definition_path(object_type, attribute_id)
        );
        self.call(Method::GET, &path, None, None).await
    }

    async fn create_attribute_definition(&self, object_type: &str, attribute_id: &str, body: &[u8]) -> Result<OcapiResponse> {
        let path = request::attribute_definition_path(object_type, attribute_id);
        self.call(Method::PUT, &path, Some(body), None).await
    }

    async fn update_attribute_definition(
        &self,
        object_type: &str,
        attribute_id: &str,
        resource_state: Option<&str>,
        body: &[u8],
    ) -> Result<OcapiResponse> {
        let path = request::attribute_definition_path(object_type, attribute_id);
        self.call(Method::PATCH, &path, Some(body), resource_state).await
    }

    async fn delete_attribute_definition(&self, object_type: &str, attribute_id: &str) -> Result<OcapiResponse> {
        let path = request::attribute_definition_path(object_type, attribute_id);
        self.call(Method::DELETE, &path, None, None).await
    }

    async fn get_attribute_groups(&self, object_type: &str) -> Result<OcapiResponse> {
        self.call(Method::GET, &request::attribute_groups_path(object_type), None, None)
            .await
    }

    async fn get_attribute_group(&self, object_type: &str, group_id: &str, only_definitions: bool) -> Result<OcapiResponse> {
        let mut path = request::attribute_group_path(object_type, group_id);
        if only_definitions {
            path.push_str("?expand=definition&select=(attribute_definitions.(id))");
        }
        self.call(Method::GET, &path, None, None).await
    }

    async fn create_attribute_group(&self, object_type: &str, group_id: &str, body: &[u8]) -> Result<OcapiResponse> {
        let path = request::attribute_group_path(object_type, group_id);
        self.call(Method::PUT, &path, Some(body), None).await
    }

    async fn update_attribute_group(
        &self,
        object_type: &str,
        group_id: &str,
        resource_state: Option<&str>,
        body: &[u8],
    ) -> Result<OcapiResponse> {
        let path = request::attribute_group_path(object_type, group_id);
        self.call(Method::PATCH, &path, Some(body), resource_state).await
    }

    async fn delete_attribute_group(&self, object_type: &str, group_id: &str) -> Result<OcapiResponse> {
        let path = request::attribute_group_path(object_type, group_id);
        self.call(Method::DELETE, &path, None, None).await
    }

    async fn assign_attribute_to_group(&self, object_type: &str, group_id: &str, attribute_id: &str) -> Result<OcapiResponse> {
        let path = request::group_assignment_path(object_type, group_id, attribute_id);
        self.call(Method::PUT, &path, None, None).await
    }

    async fn unassign_attribute_from_group(&self, object_type: &str, group_id: &str, attribute_id: &str) -> Result<OcapiResponse> {
        let path = request::group_assignment_path(object_type, group_id, attribute_id);
        self.call(Method::DELETE, &path, None, None).await
    }
}
