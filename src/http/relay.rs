//! The relay handler.
//!
//! One linear pipeline per request: route → build outbound → dispatch →
//! translate. The handler holds only immutable state, so concurrent requests
//! share it without locks.

use std::future::Future;
use std::time::Duration;

use axum::body::{Body, HttpBody};
use axum::http::Request;
use axum::response::{IntoResponse, Response};
use futures_util::{stream, Stream, StreamExt};
use tokio::sync::oneshot;

use crate::config::{TimeoutConfig, UpstreamConfig};
use crate::error::RelayError;
use crate::http::request::UpstreamHeaders;
use crate::http::response::relay_response;
use crate::routing::Router;

/// Error building a [`RelayHandler`].
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    #[error("invalid upstream header value: {0}")]
    Header(#[from] axum::http::header::InvalidHeaderValue),

    #[error("failed to build upstream client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Forwards routed requests to the fixed upstream.
#[derive(Debug, Clone)]
pub struct RelayHandler {
    router: Router,
    upstream: UpstreamConfig,
    headers: UpstreamHeaders,
    client: reqwest::Client,
    response_timeout: Duration,
}

impl RelayHandler {
    pub fn new(upstream: UpstreamConfig, timeouts: &TimeoutConfig) -> Result<Self, HandlerError> {
        let headers = UpstreamHeaders::new(&upstream)?;
        let client = reqwest::Client::builder()
            .connect_timeout(timeouts.connect())
            .build()?;

        Ok(Self {
            router: Router::default(),
            upstream,
            headers,
            client,
            response_timeout: timeouts.response(),
        })
    }

    /// Handle one inbound request. Never fails: every fault becomes a response.
    pub async fn handle(&self, request: Request<Body>) -> Response {
        match self.forward(request).await {
            Ok(response) => response,
            Err(err) => err.into_response(),
        }
    }

    async fn forward(&self, request: Request<Body>) -> Result<Response, RelayError> {
        let route = self
            .router
            .match_request(&request)
            .ok_or_else(|| RelayError::RouteNotFound {
                path: request.uri().path().to_string(),
            })?;

        let target = self.upstream.target_url(route.upstream_suffix);
        let (parts, body) = request.into_parts();

        tracing::debug!(
            route = route.name,
            method = %parts.method,
            target = %target,
            "Relaying request"
        );

        let mut outbound = self
            .client
            .request(parts.method, &target)
            .headers(self.headers.build(&parts.headers));
        // A known-empty body is left off so bodiless requests are not sent chunked.
        let mut body_sent = None;
        if !body.is_end_stream() {
            let (data, done) = notify_on_end(body.into_data_stream());
            outbound = outbound.body(reqwest::Body::wrap_stream(data));
            body_sent = Some(done);
        }

        let upstream = self
            .await_response(outbound.send(), body_sent, &target)
            .await?;

        tracing::debug!(
            route = route.name,
            status = %upstream.status(),
            "Upstream responded"
        );

        Ok(relay_response(upstream))
    }

    /// Wait for the upstream response. The response timeout starts only once
    /// the request body has been handed over in full, so slow uploads are
    /// never cut.
    async fn await_response<F>(
        &self,
        send: F,
        body_sent: Option<oneshot::Receiver<()>>,
        target: &str,
    ) -> Result<reqwest::Response, RelayError>
    where
        F: Future<Output = reqwest::Result<reqwest::Response>>,
    {
        let dispatch_error = |source: reqwest::Error| RelayError::UpstreamDispatch {
            target: target.to_string(),
            source,
        };

        tokio::pin!(send);
        if let Some(body_sent) = body_sent {
            tokio::select! {
                result = &mut send => return result.map_err(dispatch_error),
                // Resolves on end of body, or when the body is dropped.
                _ = body_sent => {}
            }
        }

        match tokio::time::timeout(self.response_timeout, send).await {
            Ok(result) => result.map_err(dispatch_error),
            Err(_) => Err(RelayError::UpstreamTimeout {
                target: target.to_string(),
                after: self.response_timeout,
            }),
        }
    }
}

/// Pass `inner` through unchanged and fire the receiver once it is exhausted.
fn notify_on_end<S>(inner: S) -> (impl Stream<Item = S::Item>, oneshot::Receiver<()>)
where
    S: Stream + Unpin,
{
    let (tx, rx) = oneshot::channel();
    let data = stream::unfold((inner, Some(tx)), |(mut inner, tx)| async move {
        match inner.next().await {
            Some(item) => Some((item, (inner, tx))),
            None => {
                if let Some(tx) = tx {
                    let _ = tx.send(());
                }
                None
            }
        }
    });
    (data, rx)
}
