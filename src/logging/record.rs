use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A record of one upstream API call.
#[derive(Debug, Clone)]
pub struct ApiCallRecord {
    pub request_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub endpoint: String,
    pub method: String,
    pub url: String,
    pub signed: bool,
    pub response_status: Option<u16>,
    pub response_time_ms: i64,
    pub content_length: Option<u64>,
    pub error_type: Option<String>,
    pub error_message: Option<String>,
}

impl ApiCallRecord {
    pub fn new(endpoint: &str, method: &str, url: &str) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            endpoint: endpoint.to_string(),
            method: method.to_string(),
            url: url.to_string(),
            signed: false,
            response_status: None,
            response_time_ms: 0,
            content_length: None,
            error_type: None,
            error_message: None,
        }
    }

    pub fn with_signed(mut self, signed: bool) -> Self {
        self.signed = signed;
        self
    }

    pub fn with_response(mut self, status: u16, time_ms: i64, length: Option<u64>) -> Self {
        self.response_status = Some(status);
        self.response_time_ms = time_ms;
        self.content_length = length;
        self
    }

    pub fn with_error(mut self, error_type: &str, message: &str, time_ms: i64) -> Self {
        self.error_type = Some(error_type.to_string());
        self.error_message = Some(message.to_string());
        self.response_time_ms = time_ms;
        self
    }

    pub fn is_failure(&self) -> bool {
        self.error_type.is_some()
    }

    /// Write the record to the current `tracing` subscriber.
    pub fn emit(&self) {
        if self.is_failure() {
            tracing::warn!(
                request_id = %self.request_id,
                timestamp = %self.timestamp.to_rfc3339(),
                endpoint = %self.endpoint,
                method = %self.method,
                signed = self.signed,
                elapsed_ms = self.response_time_ms,
                error_type = self.error_type.as_deref().unwrap_or_default(),
                "API call failed: {}",
                self.error_message.as_deref().unwrap_or_default()
            );
        } else {
            tracing::debug!(
                request_id = %self.request_id,
                timestamp = %self.timestamp.to_rfc3339(),
                endpoint = %self.endpoint,
                method = %self.method,
                signed = self.signed,
                status = self.response_status.unwrap_or_default(),
                elapsed_ms = self.response_time_ms,
                content_length = self.content_length,
                "API call {}",
                self.url
            );
        }
    }
}
