use serde_json::Value;

/// Fallback text when a response carries no usable fault
pub const NO_FAULT_MESSAGE: &str = "No Fault Message.";

/// Highest status code still treated as success (204 No Content on delete)
const LAST_SUCCESS_STATUS: u16 = 204;

/// A completed OCAPI call: status plus the decoded body, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct OcapiResponse {
    pub status: u16,
    pub data: Option<Value>,
}

impl OcapiResponse {
    pub fn new(status: u16, data: Option<Value>) -> Self {
        Self { status, data }
    }

    /// Decode a transport response. Bodies that are empty or not JSON become `None`.
    pub async fn from_http(response: reqwest::Response) -> reqwest::Result<Self> {
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;
        let data = if bytes.is_empty() {
            None
        } else {
            serde_json::from_slice(&bytes).ok()
        };
        Ok(Self::new(status, data))
    }

    pub fn is_success(&self) -> bool {
        self.status <= LAST_SUCCESS_STATUS
    }

    /// `data.fault.message` on failure, otherwise [`NO_FAULT_MESSAGE`]
    pub fn fault_message(&self) -> &str {
        if self.is_success() {
            return NO_FAULT_MESSAGE;
        }

        self.data
            .as_ref()
            .and_then(|data| data.get("fault"))
            .and_then(|fault| fault.get("message"))
            .and_then(Value::as_str)
            .filter(|message| !message.is_empty())
            .unwrap_or(NO_FAULT_MESSAGE)
    }

    /// Concurrency token required by update calls
    pub fn resource_state(&self) -> Option<&str> {
        self.data
            .as_ref()
            .and_then(|data| data.get("_resource_state"))
            .and_then(Value::as_str)
    }

    /// Body of the response, `Null` when there was none
    pub fn body(&self) -> &Value {
        self.data.as_ref().unwrap_or(&Value::Null)
    }

    /// Entries of a paged list response (`data.data`)
    pub fn list_items(&self) -> &[Value] {
        self.body()
            .get("data")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
