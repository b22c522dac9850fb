//! HTTP client for the event field service.
//!
//! Endpoints, relative to the base URL:
//! - `GET  event-fields/{id}` returns `{"value": record}`, 404 if missing
//! - `POST event-fields` creates a record
//! - `PUT  event-fields/{id}` replaces a record
//! - `GET  event-fields/check?value=V` returns `{"value": bool}`
//!
//! Error responses may carry a JSON body with a `synopsis` string.

use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::model::EventField;

use super::{EventFieldService, ServiceError, ServiceResult};

/// Resource name of event fields on the service.
pub const RESOURCE: &str = "event-fields";

/// Request timeout used unless configured otherwise.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Deserialize)]
struct ValueBody<T> {
    value: Option<T>,
}

#[derive(Deserialize)]
struct ErrorBody {
    synopsis: Option<String>,
}

/// Event field service reached over HTTP.
pub struct HttpEventFieldService {
    client: Client,
    base_url: Url,
    timeout: Duration,
}

impl HttpEventFieldService {
    /// Create a client with the default timeout.
    pub fn new(base_url: &str) -> ServiceResult<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a client with a custom timeout.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> ServiceResult<Self> {
        let parsed = Url::parse(base_url)
            .map_err(|e| ServiceError::Config(format!("invalid URL '{}': {}", base_url, e)))?;
        if parsed.cannot_be_a_base() {
            return Err(ServiceError::Config(format!(
                "URL '{}' cannot have a path",
                base_url
            )));
        }

        let client = Client::builder()
            .user_agent(concat!("evfield/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: parsed,
            timeout,
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Get the configured timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn endpoint(&self, segments: &[&str]) -> ServiceResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ServiceError::Config(format!("URL '{}' cannot have a path", self.base_url))
            })?
            .pop_if_empty()
            .push(RESOURCE)
            .extend(segments);
        Ok(url)
    }
}

impl EventFieldService for HttpEventFieldService {
    fn get(&self, id: &str) -> ServiceResult<Option<EventField>> {
        let url = self.endpoint(&[id])?;
        tracing::debug!("GET {}", url);

        let response = self.client.get(url).send()?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let body: ValueBody<EventField> = read_json(ensure_success(response)?)?;
        Ok(body.value)
    }

    fn create(&self, record: &EventField) -> ServiceResult<()> {
        let url = self.endpoint(&[])?;
        tracing::debug!("POST {}", url);

        let response = self.client.post(url).json(record).send()?;
        ensure_success(response)?;
        Ok(())
    }

    fn update(&self, id: &str, record: &EventField) -> ServiceResult<()> {
        let url = self.endpoint(&[id])?;
        tracing::debug!("PUT {}", url);

        let response = self.client.put(url).json(record).send()?;
        ensure_success(response)?;
        Ok(())
    }

    fn check(&self, value: &str) -> ServiceResult<bool> {
        let mut url = self.endpoint(&["check"])?;
        url.query_pairs_mut().append_pair("value", value);
        tracing::debug!("GET {}", url);

        let response = self.client.get(url).send()?;
        let body: ValueBody<bool> = read_json(ensure_success(response)?)?;
        body.value
            .ok_or_else(|| ServiceError::Decode("check response has no 'value'".to_string()))
    }
}

fn ensure_success(response: Response) -> ServiceResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let synopsis = response
        .json::<ErrorBody>()
        .ok()
        .and_then(|body| body.synopsis);
    Err(ServiceError::Status {
        status: status.as_u16(),
        synopsis,
    })
}

fn read_json<T: DeserializeOwned>(response: Response) -> ServiceResult<T> {
    response
        .json::<T>()
        .map_err(|e| ServiceError::Decode(e.to_string()))
}
