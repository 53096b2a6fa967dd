//! Interception and replay of multipart (file-upload) form submissions.
//!
//! SYSTEM CONTEXT
//! ==============
//! The backend's CSRF middleware only reads the hidden token field from
//! urlencoded bodies; multipart bodies must carry the token in the header.
//! One document-level submit listener hands every submitted form to
//! [`MultipartInterceptor::on_submit`]. Qualifying forms are taken over:
//! native submission is prevented, and the snapshot is replayed with the
//! token header by [`MultipartInterceptor::transmit`].
//!
//! DESIGN
//! ======
//! `on_submit` is synchronous so `preventDefault` runs inside the event
//! handler before anything suspends. The qualifying predicate is injectable
//! through [`MultipartInterceptor::with_filter`].
//!
//! Redirects are followed by the transport; a redirected 2xx outcome
//! navigates to the final URL, any other 2xx reloads the page.
//!
//! TRADE-OFFS
//! ==========
//! Repeated submits of the same form are neither queued nor deduplicated,
//! and nothing is retried automatically.

#[cfg(test)]
#[path = "multipart_test.rs"]
mod multipart_test;

use std::rc::Rc;

use url::Url;

use super::csrf::{CsrfToken, TokenSource};
use super::dispatch::RequestDispatcher;
use super::transport::{Body, HttpRequest, Method, Transport};
use crate::config::{ClientConfig, Messages};
use crate::error::ClientError;
use crate::util::format::truncate_chars;
use crate::util::page::{Notifier, PreventDefault, Resync};

const MULTIPART_ENCTYPE: &str = "multipart/form-data";

/// Raw attributes of a submitted form, as written in the markup.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormAttrs {
    pub enctype: Option<String>,
    pub method: Option<String>,
    pub action: Option<String>,
}

/// A form element at the moment it was submitted.
pub trait SubmittedForm {
    type Body;

    fn attrs(&self) -> FormAttrs;

    /// Encode the form's current contents.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Dom`] if the platform cannot encode the form.
    fn snapshot(&self) -> Result<Self::Body, ClientError>;
}

pub type FormFilter = Box<dyn Fn(&FormAttrs) -> bool>;

/// Default predicate: the form's `enctype` is `multipart/form-data`.
///
/// The method plays no part. Every multipart form is replayed, whatever it
/// declares.
pub fn is_multipart(attrs: &FormAttrs) -> bool {
    attrs
        .enctype
        .as_deref()
        .is_some_and(|e| e.trim().eq_ignore_ascii_case(MULTIPART_ENCTYPE))
}

/// Replay method for an intercepted form.
///
/// A multipart body cannot travel with GET and a `dialog` form has no
/// network method, so those resolve to POST along with absent and unknown
/// values.
pub fn resolve_method(raw: Option<&str>) -> Method {
    match raw.and_then(Method::parse) {
        Some(method) if !method.is_safe() => method,
        _ => {
            if let Some(raw) = raw.filter(|r| !r.trim().is_empty()) {
                log::debug!("multipart: form method `{raw}` replayed as POST");
            }
            Method::Post
        }
    }
}

/// Resolve a form `action` against the page URL.
///
/// An empty or absent action targets the page itself. A same-host `http`
/// target on an `https` page is upgraded to `https`.
///
/// # Errors
///
/// Returns [`ClientError::InvalidUrl`] if the action cannot be joined.
pub fn resolve_target(action: Option<&str>, page: &Url) -> Result<Url, ClientError> {
    let action = action.map(str::trim).unwrap_or_default();
    let mut target = if action.is_empty() { page.clone() } else { page.join(action)? };

    if page.scheme() == "https" && target.scheme() == "http" && target.host_str() == page.host_str() {
        if target.set_scheme("https").is_err() {
            log::warn!("multipart: could not upgrade {target} to https");
        } else {
            log::debug!("multipart: upgraded same-origin target to {target}");
        }
    }
    Ok(target)
}

/// One in-flight intercepted submission.
#[derive(Debug)]
pub struct PendingSubmission<B> {
    pub url: Url,
    pub method: Method,
    pub token: CsrfToken,
    pub body: B,
}

#[derive(Debug)]
pub enum SubmitDecision<B> {
    /// Not a qualifying form; native submission continues.
    PassThrough,
    /// Native submission was prevented and nothing will be sent.
    Aborted,
    Intercepted(PendingSubmission<B>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InterceptOutcome {
    Resync(Resync),
    /// Non-2xx response; the user has been notified.
    Rejected { status: u16 },
    /// No response reachable; the user has been notified.
    NetworkError,
}

pub struct MultipartInterceptor<T, S, N> {
    dispatcher: Rc<RequestDispatcher<T, S>>,
    notifier: N,
    filter: FormFilter,
    messages: Messages,
    snippet_chars: usize,
}

impl<T: Transport, S: TokenSource, N: Notifier> MultipartInterceptor<T, S, N> {
    pub fn new(dispatcher: Rc<RequestDispatcher<T, S>>, notifier: N, config: &ClientConfig) -> Self {
        Self {
            dispatcher,
            notifier,
            filter: Box::new(is_multipart),
            messages: config.messages.clone(),
            snippet_chars: config.body_snippet_chars,
        }
    }

    /// Replace the qualifying predicate.
    #[must_use]
    pub fn with_filter(mut self, filter: impl Fn(&FormAttrs) -> bool + 'static) -> Self {
        self.filter = Box::new(filter);
        self
    }

    pub fn should_intercept(&self, attrs: &FormAttrs) -> bool {
        (self.filter)(attrs)
    }

    /// Synchronous half of a submit event: filter, prevent, resolve.
    pub fn on_submit<F, E>(&self, form: &F, event: &E, page: &Url) -> SubmitDecision<T::Multipart>
    where
        F: SubmittedForm<Body = T::Multipart>,
        E: PreventDefault,
    {
        let attrs = form.attrs();
        if !self.should_intercept(&attrs) {
            return SubmitDecision::PassThrough;
        }
        event.prevent_default();

        let Some(token) = self.dispatcher.tokens().token() else {
            log::error!("multipart: no CSRF token on page; submission aborted");
            self.notifier.notify(&self.messages.missing_token);
            return SubmitDecision::Aborted;
        };

        let prepared = form
            .snapshot()
            .and_then(|body| Ok((resolve_target(attrs.action.as_deref(), page)?, body)));
        let (url, body) = match prepared {
            Ok(prepared) => prepared,
            Err(e) => {
                log::error!("multipart: could not prepare submission: {e}");
                self.notifier.notify(&self.messages.upload_failed);
                return SubmitDecision::Aborted;
            }
        };

        let method = resolve_method(attrs.method.as_deref());
        log::debug!("multipart: intercepted {} {url}", method.as_str());
        SubmitDecision::Intercepted(PendingSubmission { url, method, token, body })
    }

    /// Asynchronous half: send once and decide what the page should do.
    pub async fn transmit(&self, pending: PendingSubmission<T::Multipart>) -> InterceptOutcome {
        let PendingSubmission { url, method, token, body } = pending;
        let request = HttpRequest::new(method, url.as_str()).with_body(Body::Multipart(body));

        match self.dispatcher.dispatch_with_token(request, &token).await {
            Ok(response) if response.is_success() => {
                if response.redirected && !response.url.is_empty() {
                    log::debug!("multipart: redirected to {}", response.url);
                    InterceptOutcome::Resync(Resync::Navigate(response.url))
                } else {
                    InterceptOutcome::Resync(Resync::Reload)
                }
            }
            Ok(response) => {
                log::error!(
                    "multipart: {} {url} rejected with status {}: {}",
                    method.as_str(),
                    response.status,
                    truncate_chars(&response.body, self.snippet_chars)
                );
                self.notifier.notify(&self.messages.upload_failed);
                InterceptOutcome::Rejected { status: response.status }
            }
            Err(e) => {
                log::error!("multipart: {} {url} failed: {e}", method.as_str());
                self.notifier.notify(&self.messages.upload_network_error);
                InterceptOutcome::NetworkError
            }
        }
    }
}
