//! HTTP adapter backed by `reqwest`.
//!
//! Implements [`HttpPort`] against the dashboard server.  Every status the
//! server answers with is returned as an [`HttpResponse`]; only connection,
//! TLS and body-read failures become [`FetchError::Transport`].
//! Redirects are followed (reqwest's default policy).  No request timeout
//! is configured.
//!
//! The client needs a tokio reactor: the runner polls every request from
//! inside a current-thread tokio runtime.

use core::future::Future;

use log::debug;
use reqwest::header::{COOKIE, HeaderValue};

use crate::app::ports::{HttpPort, HttpResponse};
use crate::error::FetchError;

pub struct ReqwestHttp {
    client: reqwest::Client,
    base_url: String,
    cookie: Option<HeaderValue>,
}

impl ReqwestHttp {
    /// `base_url` has no trailing slash; paths start with `/`.
    ///
    /// Fails if `session_cookie` is not a valid header value.
    pub fn new(base_url: &str, session_cookie: Option<&str>) -> Result<Self, FetchError> {
        let cookie = session_cookie
            .map(HeaderValue::from_str)
            .transpose()
            .map_err(|e| FetchError::Transport(format!("invalid session cookie: {e}")))?;
        Ok(Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
            cookie,
        })
    }

    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl HttpPort for ReqwestHttp {
    fn get(&self, path: &str) -> impl Future<Output = Result<HttpResponse, FetchError>> {
        let url = self.url_for(path);
        let mut request = self.client.get(&url);
        if let Some(cookie) = &self.cookie {
            request = request.header(COOKIE, cookie.clone());
        }

        async move {
            debug!("HTTP: GET {}", url);
            let response = request
                .send()
                .await
                .map_err(|e| FetchError::Transport(e.to_string()))?;
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .map_err(|e| FetchError::Transport(e.to_string()))?;
            debug!("HTTP: {} -> {} ({} bytes)", url, status, body.len());
            Ok(HttpResponse { status, body })
        }
    }
}
