//! Platform-neutral HTTP request/response model and the transport seam.
//!
//! DESIGN
//! ======
//! Request decisions (which header, which body) are made on these plain
//! types so they can be tested on the host. The browser implementation of
//! [`Transport`] lives in `browser::transport`.
//!
//! Multipart bodies are opaque to this layer: each transport names its own
//! native form payload type (`web_sys::FormData` in the browser).

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use std::rc::Rc;

use url::form_urlencoded;

use crate::error::ClientError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    /// GET is the only method sent without a CSRF token.
    pub fn is_safe(self) -> bool {
        matches!(self, Self::Get)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }

    /// Case-insensitive parse of an HTML/HTTP method name.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        [Self::Get, Self::Post, Self::Put, Self::Patch, Self::Delete]
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(raw))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Body<M> {
    Empty,
    /// Sent as `application/x-www-form-urlencoded`.
    Form(Vec<(String, String)>),
    /// Native multipart payload; the transport sets the boundary header.
    Multipart(M),
}

/// Encode form fields as an `application/x-www-form-urlencoded` string.
pub fn encode_form(fields: &[(String, String)]) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(fields.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .finish()
}

#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest<M> {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Body<M>,
}

impl<M> HttpRequest<M> {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: Body::Empty,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::Get, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::Post, url)
    }

    #[must_use]
    pub fn with_body(mut self, body: Body<M>) -> Self {
        self.body = body;
        self
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Set a header, replacing any existing value with the same name.
    pub fn set_header(&mut self, name: &str, value: &str) {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((name.to_owned(), value.to_owned()));
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    /// Whether the response is the result of following one or more redirects.
    pub redirected: bool,
    /// Final URL after redirects.
    pub url: String,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one request and returns the final response, following redirects.
/// Never retries.
#[async_trait::async_trait(?Send)]
pub trait Transport {
    /// Native multipart payload carried by [`Body::Multipart`].
    type Multipart: 'static;

    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] when no response is reachable and
    /// [`ClientError::Malformed`] when the response body cannot be read.
    async fn send(&self, request: HttpRequest<Self::Multipart>) -> Result<HttpResponse, ClientError>;
}

#[async_trait::async_trait(?Send)]
impl<T: Transport> Transport for Rc<T> {
    type Multipart = T::Multipart;

    async fn send(&self, request: HttpRequest<Self::Multipart>) -> Result<HttpResponse, ClientError> {
        (**self).send(request).await
    }
}
