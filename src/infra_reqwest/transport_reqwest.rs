use crate::domain_model::HttpMethod;
use crate::domain_port::*;
use reqwest::header::ACCEPT;
use reqwest::{Client, Method, Url};
use serde_json::Value;
use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// `HttpTransport` over a pooled `reqwest` client.
pub struct ReqwestTransport {
    client: Client,
    base_url: String,
}

impl ReqwestTransport {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, TransportError> {
        Url::parse(base_url).map_err(|e| TransportError::Other(format!("bad base url: {e}")))?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Other(e.to_string()))?;
        Ok(ReqwestTransport {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    // Plain concatenation: `Url::join` with an absolute path would drop any
    // path prefix configured in the base url.
    fn url(&self, path: &str) -> Result<Url, TransportError> {
        // The query travels separately, and dot segments would be folded
        // away by the url parser, landing on another endpoint.
        if path.contains(['?', '#']) || path.split('/').any(|s| s == "." || s == "..") {
            return Err(TransportError::Other(format!("refusing ambiguous path {path}")));
        }
        let url = if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        };
        Url::parse(&url).map_err(|e| TransportError::Other(format!("bad url {url}: {e}")))
    }
}

fn to_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Patch => Method::PATCH,
        HttpMethod::Delete => Method::DELETE,
    }
}

fn map_error(error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::Timeout
    } else if error.is_connect() {
        TransportError::Connect(error.to_string())
    } else {
        TransportError::Other(error.to_string())
    }
}

fn parse_body(bytes: &[u8]) -> Option<Value> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return None;
    }
    match serde_json::from_slice(bytes) {
        Ok(value) => Some(value),
        Err(_) => Some(Value::String(String::from_utf8_lossy(bytes).into_owned())),
    }
}

#[async_trait::async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = self.url(&request.path)?;
        let mut builder = self
            .client
            .request(to_method(request.method), url)
            .header(ACCEPT, "application/json");
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(map_error)?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await.map_err(map_error)?;
        Ok(HttpResponse::new(status, parse_body(&bytes)))
    }
}
