//! Login/register form submission wired into the auth modal.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser glue prevents the native submit, collects the form entries
//! and hands a [`FormSubmission`] to [`FormBindingController::submit`].
//! Failures land in the submitting form's error slot with the modal left
//! open and the typed values untouched.

#[cfg(test)]
#[path = "form_binding_test.rs"]
mod form_binding_test;

use std::rc::Rc;

use crate::config::Messages;
use crate::net::session::{LoginForm, RegisterForm, SessionService};
use crate::net::types::SessionResult;
use crate::state::auth_modal::{AuthModalController, AuthModalView, AuthTab, AuthTrigger};
use crate::util::page::Resync;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormSubmission {
    Login(LoginForm),
    Register(RegisterForm),
}

fn field(fields: &[(String, String)], name: &str) -> String {
    fields
        .iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.clone())
        .unwrap_or_default()
}

impl FormSubmission {
    /// Build a login submission from raw form entries.
    pub fn login(fields: &[(String, String)]) -> Self {
        Self::Login(LoginForm { email: field(fields, "email"), password: field(fields, "password") })
    }

    /// Build a register submission from raw form entries.
    pub fn register(fields: &[(String, String)]) -> Self {
        let full_name = field(fields, "full_name");
        Self::Register(RegisterForm {
            email: field(fields, "email"),
            username: field(fields, "username"),
            password: field(fields, "password"),
            full_name: (!full_name.trim().is_empty()).then_some(full_name),
        })
    }

    pub fn form(&self) -> AuthTab {
        match self {
            Self::Login(_) => AuthTab::Login,
            Self::Register(_) => AuthTab::Register,
        }
    }

    /// Trim identity fields and reject submissions missing required ones.
    fn validated(self) -> Option<Self> {
        match self {
            Self::Login(form) => {
                let email = form.email.trim().to_owned();
                (!email.is_empty() && !form.password.is_empty())
                    .then(|| Self::Login(LoginForm { email, password: form.password }))
            }
            Self::Register(form) => {
                let email = form.email.trim().to_owned();
                let username = form.username.trim().to_owned();
                let full_name = form.full_name.map(|n| n.trim().to_owned());
                (!email.is_empty() && !username.is_empty() && !form.password.is_empty()).then(|| {
                    Self::Register(RegisterForm { email, username, password: form.password, full_name })
                })
            }
        }
    }
}

pub struct FormBindingController<A, V> {
    api: Rc<A>,
    auth: Rc<AuthModalController<V>>,
    messages: Messages,
}

impl<A: SessionService, V: AuthModalView> FormBindingController<A, V> {
    pub fn new(api: Rc<A>, auth: Rc<AuthModalController<V>>, messages: Messages) -> Self {
        Self { api, auth, messages }
    }

    /// Run one login or register submission.
    ///
    /// Returns [`Resync::Reload`] after a successful login.
    pub async fn submit(&self, submission: FormSubmission) -> Option<Resync> {
        let form = submission.form();
        let Some(submission) = submission.validated() else {
            self.auth.show_error(form, &self.messages.required_fields);
            return None;
        };
        self.auth.clear_error(form);

        match submission {
            FormSubmission::Login(login) => match self.api.login(&login).await {
                SessionResult::Ok { .. } => {
                    log::info!("auth: login succeeded; reloading");
                    self.auth.reset_form(AuthTab::Login);
                    self.auth.dispatch(AuthTrigger::Close);
                    Some(Resync::Reload)
                }
                SessionResult::Failed { message } => {
                    self.auth.show_error(AuthTab::Login, &message);
                    None
                }
            },
            FormSubmission::Register(register) => match self.api.register(&register).await {
                SessionResult::Ok { .. } => {
                    log::info!("auth: registration succeeded; switching to login");
                    self.auth.dispatch(AuthTrigger::SwitchTab(AuthTab::Login));
                    self.auth.reset_form(AuthTab::Register);
                    self.auth.prefill_login_email(&register.email);
                    None
                }
                SessionResult::Failed { message } => {
                    self.auth.show_error(AuthTab::Register, &message);
                    None
                }
            },
        }
    }
}
