//! Typed session operations over the auth endpoints.
//!
//! Login and register post `application/x-www-form-urlencoded` bodies (the
//! backend reads them as form fields); logout posts an empty body; the
//! current-user call is a plain GET.
//!
//! ERROR HANDLING
//! ==============
//! Every failure is folded into [`SessionResult::Failed`] with a localized
//! message before it leaves this module. Unparseable bodies count as
//! connectivity failures, except a 403 plain-text body, which is the CSRF
//! middleware's rejection and maps to the session-expired message.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::rc::Rc;

use super::csrf::TokenSource;
use super::dispatch::RequestDispatcher;
use super::transport::{Body, HttpRequest, HttpResponse, Transport};
use super::types::{SessionEnvelope, SessionResult};
use crate::config::{Endpoints, Messages};

const STATUS_FORBIDDEN: u16 = 403;
const STATUS_TOO_MANY_REQUESTS: u16 = 429;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub email: String,
    pub username: String,
    pub password: String,
    pub full_name: Option<String>,
}

impl LoginForm {
    fn fields(&self) -> Vec<(String, String)> {
        vec![
            ("email".to_owned(), self.email.clone()),
            ("password".to_owned(), self.password.clone()),
        ]
    }
}

impl RegisterForm {
    fn fields(&self) -> Vec<(String, String)> {
        let mut fields = vec![
            ("email".to_owned(), self.email.clone()),
            ("username".to_owned(), self.username.clone()),
            ("password".to_owned(), self.password.clone()),
        ];
        if let Some(full_name) = self.full_name.as_deref().filter(|n| !n.trim().is_empty()) {
            fields.push(("full_name".to_owned(), full_name.to_owned()));
        }
        fields
    }
}

/// Session operations the UI controllers depend on. Enables mocking in tests.
#[async_trait::async_trait(?Send)]
pub trait SessionService {
    async fn register(&self, form: &RegisterForm) -> SessionResult;
    async fn login(&self, form: &LoginForm) -> SessionResult;
    async fn logout(&self) -> SessionResult;
    async fn current_user(&self) -> SessionResult;
}

pub struct SessionApi<T, S> {
    dispatcher: Rc<RequestDispatcher<T, S>>,
    endpoints: Endpoints,
    messages: Messages,
}

impl<T: Transport, S: TokenSource> SessionApi<T, S> {
    pub fn new(dispatcher: Rc<RequestDispatcher<T, S>>, endpoints: Endpoints, messages: Messages) -> Self {
        Self { dispatcher, endpoints, messages }
    }

    async fn call(&self, operation: &str, request: HttpRequest<T::Multipart>) -> SessionResult {
        match self.dispatcher.dispatch(request).await {
            Ok(response) => self.interpret(operation, &response),
            Err(e) => {
                log::warn!("session: {operation} unreachable: {e}");
                SessionResult::failed(self.messages.network_error.clone())
            }
        }
    }

    fn interpret(&self, operation: &str, response: &HttpResponse) -> SessionResult {
        let envelope = match serde_json::from_str::<SessionEnvelope>(&response.body) {
            Ok(envelope) => envelope,
            Err(e) => {
                log::warn!("session: {operation} returned unparseable body (status {}): {e}", response.status);
                let message = if response.status == STATUS_FORBIDDEN {
                    &self.messages.session_expired
                } else {
                    &self.messages.network_error
                };
                return SessionResult::failed(message.clone());
            }
        };

        if envelope.success {
            return SessionResult::Ok { user: envelope.user, message: envelope.message };
        }

        let message = match envelope.failure_text() {
            Some(text) => text.to_owned(),
            None if response.status == STATUS_TOO_MANY_REQUESTS => self.messages.rate_limited.clone(),
            None => self.messages.generic_error.clone(),
        };
        log::warn!("session: {operation} failed (status {}): {message}", response.status);
        SessionResult::failed(message)
    }
}

#[async_trait::async_trait(?Send)]
impl<T: Transport, S: TokenSource> SessionService for SessionApi<T, S> {
    async fn register(&self, form: &RegisterForm) -> SessionResult {
        let request = HttpRequest::post(&self.endpoints.register).with_body(Body::Form(form.fields()));
        self.call("register", request).await
    }

    async fn login(&self, form: &LoginForm) -> SessionResult {
        let request = HttpRequest::post(&self.endpoints.login).with_body(Body::Form(form.fields()));
        self.call("login", request).await
    }

    async fn logout(&self) -> SessionResult {
        self.call("logout", HttpRequest::post(&self.endpoints.logout)).await
    }

    async fn current_user(&self) -> SessionResult {
        self.call("current_user", HttpRequest::get(&self.endpoints.me)).await
    }
}
