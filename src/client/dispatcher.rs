use std::{
    sync::{Arc, PoisonError, RwLock},
    time::Instant,
};

use reqwest::{Client, Method};
use serde_json::Value;

use super::{
    endpoint::{BaseUrls, Endpoint},
    headers::default_headers,
};
use crate::{
    Error, Result,
    config::ClientConfig,
    logging::ApiCallRecord,
    sign::{Clock, Params, SignedQuery, Signer, SigningKeys, SystemClock},
};

/// An upstream response, whatever its status.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub url: String,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parse the body as JSON.
    ///
    /// A non-2xx response whose body is still a JSON envelope parses fine, so
    /// the caller can read the platform's own error fields.
    pub fn json(&self) -> Result<Value> {
        serde_json::from_str(&self.body).map_err(|e| {
            if self.is_success() {
                Error::Decode(format!("{}: {e}", self.url))
            } else {
                Error::HttpStatus {
                    url: self.url.clone(),
                    status: self.status,
                }
            }
        })
    }
}

/// HTTP client for the platform API.
///
/// Holds one cookie jar for its lifetime, so a session established through
/// QR login carries over to later calls on the same instance.
pub struct ApiClient {
    client: Client,
    bases: BaseUrls,
    signer: RwLock<Arc<Signer>>,
    clock: Arc<dyn Clock>,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: &ClientConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        let client = Client::builder()
            .default_headers(default_headers(config)?)
            .cookie_store(true)
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            bases: BaseUrls::parse(&config.api_base_url, &config.passport_base_url)?,
            signer: RwLock::new(Arc::new(Signer::new(config.signing_keys.clone()))),
            clock,
        })
    }

    /// Current signer. Cheap to clone; a key refresh swaps in a new one.
    pub fn signer(&self) -> Arc<Signer> {
        self.signer
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the signing keys. The mixin key is derived once here.
    pub fn set_signing_keys(&self, keys: SigningKeys) {
        let signer = Arc::new(Signer::new(keys));
        *self.signer.write().unwrap_or_else(PoisonError::into_inner) = signer;
    }

    pub fn bases(&self) -> &BaseUrls {
        &self.bases
    }

    /// GET `endpoint`, signing when the endpoint requires it, and parse the body.
    pub async fn get_json(&self, endpoint: &Endpoint, params: &Params) -> Result<Value> {
        self.execute(endpoint, Method::GET, params, endpoint.signed, None)
            .await?
            .json()
    }

    /// Send one request.
    ///
    /// Parameters always travel in the query string, signed or not. A body,
    /// if any, is sent as JSON and is never part of the signature. Non-2xx
    /// responses are returned, not turned into errors.
    pub async fn execute(
        &self,
        endpoint: &Endpoint,
        method: Method,
        params: &Params,
        signed: bool,
        body: Option<&Value>,
    ) -> Result<RawResponse> {
        let mut url = endpoint.url(&self.bases)?;
        let query = if signed {
            self.signer().sign(params, self.clock.now_epoch_seconds())
        } else {
            SignedQuery::unsigned(params)
        };
        if !query.is_empty() {
            url.set_query(Some(&query.to_query_string()));
        }

        let record = ApiCallRecord::new(endpoint.name, method.as_str(), url.as_str())
            .with_signed(signed);
        let start = Instant::now();

        let mut request = self.client.request(method, url.clone());
        if let Some(body) = body {
            request = request.json(body);
        }

        let result = async move {
            let response = request.send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok::<_, Error>((status, body))
        }
        .await;

        let elapsed_ms = i64::try_from(start.elapsed().as_millis()).unwrap_or(i64::MAX);
        match result {
            Ok((status, body)) => {
                record
                    .with_response(status, elapsed_ms, Some(body.len() as u64))
                    .emit();
                Ok(RawResponse {
                    status,
                    url: url.to_string(),
                    body,
                })
            }
            Err(e) => {
                record
                    .with_error(e.error_code(), &e.to_string(), elapsed_ms)
                    .emit();
                Err(e)
            }
        }
    }
}
