//! Response capture.
//!
//! A handler's output is drained into a [`ResponseRecorder`] instead of going
//! straight to the client. The decorator inspects the recorded status, decides
//! whether to store or invalidate, then replays the recording exactly once
//! onto the real sink.

use axum::{
    body::Body,
    http::{Extensions, HeaderMap, HeaderName, HeaderValue, StatusCode, response::Parts},
    response::Response,
};
use bytes::{Bytes, BytesMut};
use http_body_util::BodyExt;
use tracing::debug;

use super::error::CacheError;

/// The write surface a handler's output is replayed through.
pub trait ResponseSink {
    fn set_status(&mut self, status: StatusCode);
    fn append_header(&mut self, name: HeaderName, value: HeaderValue);
    fn write(&mut self, chunk: &[u8]);
}

/// In-memory sink owned by a single request.
///
/// Mirrors HTTP server semantics: the first body write commits a `200` status
/// if none was set, and once the status is committed later status or header
/// changes are dropped.
#[derive(Debug, Default)]
pub struct ResponseRecorder {
    status: Option<StatusCode>,
    headers: HeaderMap,
    body: BytesMut,
    wrote_header: bool,
    // Carried through untouched so outer layers still see diagnostics.
    extensions: Extensions,
}

impl ResponseRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain a handler response into a fresh recorder.
    ///
    /// A body stream that fails is returned as an error rather than recorded
    /// as a truncated success.
    pub async fn record(response: Response) -> Result<Self, CacheError> {
        let (parts, body) = response.into_parts();
        Self::record_parts(parts, body).await
    }

    /// Like [`ResponseRecorder::record`] for a response already split by the
    /// caller.
    pub async fn record_parts(parts: Parts, body: Body) -> Result<Self, CacheError> {
        let mut recorder = Self {
            extensions: parts.extensions,
            ..Self::default()
        };

        for (name, value) in parts.headers.iter() {
            recorder.append_header(name.clone(), value.clone());
        }
        recorder.set_status(parts.status);

        let collected = BodyExt::collect(body)
            .await
            .map_err(|err| CacheError::Body(err.to_string()))?;
        recorder.write(&collected.to_bytes());

        Ok(recorder)
    }

    /// Recorded status; `200` when the handler never set one.
    pub fn status(&self) -> StatusCode {
        self.status.unwrap_or(StatusCode::OK)
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Copy of the recorded body, suitable for storing.
    pub fn body_bytes(&self) -> Bytes {
        Bytes::copy_from_slice(&self.body)
    }

    /// Replay headers, status and body onto `sink`. Consumes the recording.
    pub fn replay<S: ResponseSink>(self, sink: &mut S) {
        let status = self.status();
        for (name, value) in self.headers.iter() {
            sink.append_header(name.clone(), value.clone());
        }
        sink.set_status(status);
        sink.write(&self.body);
    }

    pub fn into_response(mut self) -> Response {
        let extensions = std::mem::take(&mut self.extensions);
        let mut sink = ResponseBuilderSink::new();
        self.replay(&mut sink);
        let mut response = sink.into_response();
        *response.extensions_mut() = extensions;
        response
    }
}

impl ResponseSink for ResponseRecorder {
    fn set_status(&mut self, status: StatusCode) {
        if self.wrote_header {
            debug!(
                target = "folio::cache::capture",
                ignored = status.as_u16(),
                "status already committed"
            );
            return;
        }
        self.status = Some(status);
        self.wrote_header = true;
    }

    fn append_header(&mut self, name: HeaderName, value: HeaderValue) {
        if self.wrote_header {
            return;
        }
        self.headers.append(name, value);
    }

    fn write(&mut self, chunk: &[u8]) {
        if !self.wrote_header {
            self.set_status(StatusCode::OK);
        }
        self.body.extend_from_slice(chunk);
    }
}

/// Sink that assembles the outgoing [`Response`].
#[derive(Debug)]
pub struct ResponseBuilderSink {
    status: StatusCode,
    headers: HeaderMap,
    body: BytesMut,
}

impl Default for ResponseBuilderSink {
    fn default() -> Self {
        Self {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: BytesMut::new(),
        }
    }
}

impl ResponseBuilderSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.body.freeze()));
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers;
        response
    }
}

impl ResponseSink for ResponseBuilderSink {
    fn set_status(&mut self, status: StatusCode) {
        self.status = status;
    }

    fn append_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers.append(name, value);
    }

    fn write(&mut self, chunk: &[u8]) {
        self.body.extend_from_slice(chunk);
    }
}
