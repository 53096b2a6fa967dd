//! Request dispatch with CSRF header injection.
//!
//! Every non-GET request leaving the client goes through
//! [`RequestDispatcher`], which copies the page token into the configured
//! header. Bodies are forwarded untouched; native forms keep using their
//! hidden field.
//!
//! ERROR HANDLING
//! ==============
//! A missing token is logged and the request is sent anyway: the backend
//! rejects it if the path is protected. Transport errors propagate to the
//! caller unchanged. Nothing is retried.

#[cfg(test)]
#[path = "dispatch_test.rs"]
mod dispatch_test;

use std::rc::Rc;

use super::csrf::{CsrfToken, TokenLocator, TokenSource};
use super::transport::{HttpRequest, HttpResponse, Transport};
use crate::error::ClientError;

pub struct RequestDispatcher<T, S> {
    transport: T,
    tokens: Rc<TokenLocator<S>>,
    header_name: String,
}

impl<T: Transport, S: TokenSource> RequestDispatcher<T, S> {
    pub fn new(transport: T, tokens: Rc<TokenLocator<S>>, header_name: impl Into<String>) -> Self {
        Self { transport, tokens, header_name: header_name.into() }
    }

    pub fn tokens(&self) -> &TokenLocator<S> {
        &self.tokens
    }

    /// Attach the page token (for non-GET methods) and send.
    ///
    /// # Errors
    ///
    /// Propagates the transport's error when no response is reachable.
    pub async fn dispatch(
        &self,
        request: HttpRequest<T::Multipart>,
    ) -> Result<HttpResponse, ClientError> {
        let request = self.attach_token(request);
        log::debug!("dispatch: {} {}", request.method.as_str(), request.url);
        self.transport.send(request).await
    }

    /// Send with an already-resolved token, regardless of method.
    ///
    /// # Errors
    ///
    /// Propagates the transport's error when no response is reachable.
    pub async fn dispatch_with_token(
        &self,
        mut request: HttpRequest<T::Multipart>,
        token: &CsrfToken,
    ) -> Result<HttpResponse, ClientError> {
        request.set_header(&self.header_name, token.as_str());
        log::debug!("dispatch: {} {} (token attached)", request.method.as_str(), request.url);
        self.transport.send(request).await
    }

    pub(crate) fn attach_token(&self, mut request: HttpRequest<T::Multipart>) -> HttpRequest<T::Multipart> {
        if request.method.is_safe() {
            return request;
        }
        match self.tokens.token() {
            Some(token) => request.set_header(&self.header_name, token.as_str()),
            None => log::warn!(
                "dispatch: sending {} {} without `{}` header",
                request.method.as_str(),
                request.url,
                self.header_name
            ),
        }
        request
    }
}
