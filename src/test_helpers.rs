//! Shared fakes for unit tests: token source, transport, views, session.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::net::csrf::{TokenLocator, TokenSource};
use crate::net::dispatch::RequestDispatcher;
use crate::net::multipart::{FormAttrs, SubmittedForm};
use crate::net::session::{LoginForm, RegisterForm, SessionService};
use crate::net::transport::{HttpRequest, HttpResponse, Transport};
use crate::net::types::{SessionResult, UserProfile};
use crate::state::auth_modal::{AuthModalView, AuthTab};
use crate::state::profile_modal::{ProfileCard, ProfileModalView};
use crate::util::page::{Notifier, PreventDefault};

pub const PAGE_URL: &str = "https://site.test/admin/news/";

/// Multipart payload used by the fake transport: name/value pairs.
pub type TestBody = Vec<(String, String)>;

// =============================================================
// Tokens
// =============================================================

#[derive(Default)]
struct TokenState {
    hidden: Option<String>,
    meta: Option<String>,
    queried_fields: Vec<String>,
}

#[derive(Clone, Default)]
pub struct StaticTokens {
    state: Rc<RefCell<TokenState>>,
}

impl StaticTokens {
    pub fn new(hidden: Option<&str>, meta: Option<&str>) -> Self {
        let tokens = Self::default();
        {
            let mut state = tokens.state.borrow_mut();
            state.hidden = hidden.map(str::to_owned);
            state.meta = meta.map(str::to_owned);
        }
        tokens
    }

    pub fn with_token(token: &str) -> Self {
        Self::new(Some(token), None)
    }

    pub fn set_hidden(&self, hidden: Option<&str>) {
        self.state.borrow_mut().hidden = hidden.map(str::to_owned);
    }

    pub fn queried_fields(&self) -> Vec<String> {
        self.state.borrow().queried_fields.clone()
    }
}

impl TokenSource for StaticTokens {
    fn hidden_field(&self, field_name: &str) -> Option<String> {
        let mut state = self.state.borrow_mut();
        state.queried_fields.push(field_name.to_owned());
        state.hidden.clone()
    }

    fn meta_content(&self, _meta_name: &str) -> Option<String> {
        self.state.borrow().meta.clone()
    }
}

// =============================================================
// Transport
// =============================================================

pub struct MockTransport {
    responses: RefCell<VecDeque<Result<HttpResponse, ClientError>>>,
    sent: RefCell<Vec<HttpRequest<TestBody>>>,
}

impl MockTransport {
    pub fn new(responses: Vec<Result<HttpResponse, ClientError>>) -> Rc<Self> {
        Rc::new(Self { responses: RefCell::new(responses.into()), sent: RefCell::new(Vec::new()) })
    }

    pub fn sent(&self) -> Vec<HttpRequest<TestBody>> {
        self.sent.borrow().clone()
    }
}

#[async_trait::async_trait(?Send)]
impl Transport for MockTransport {
    type Multipart = TestBody;

    async fn send(&self, request: HttpRequest<TestBody>) -> Result<HttpResponse, ClientError> {
        self.sent.borrow_mut().push(request);
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ClientError::Transport("no scripted response".to_owned())))
    }
}

pub fn response(status: u16, body: &str) -> Result<HttpResponse, ClientError> {
    Ok(HttpResponse { status, redirected: false, url: PAGE_URL.to_owned(), body: body.to_owned() })
}

pub fn json_response(status: u16, body: serde_json::Value) -> Result<HttpResponse, ClientError> {
    response(status, &body.to_string())
}

pub fn redirected_response(status: u16, final_url: &str) -> Result<HttpResponse, ClientError> {
    Ok(HttpResponse { status, redirected: true, url: final_url.to_owned(), body: String::new() })
}

pub fn network_error() -> Result<HttpResponse, ClientError> {
    Err(ClientError::Transport("connection refused".to_owned()))
}

pub type TestDispatcher = RequestDispatcher<Rc<MockTransport>, StaticTokens>;

pub fn dispatcher(transport: &Rc<MockTransport>, tokens: StaticTokens) -> Rc<TestDispatcher> {
    let config = ClientConfig::default();
    let locator = Rc::new(TokenLocator::new(tokens, &config.csrf));
    Rc::new(RequestDispatcher::new(Rc::clone(transport), locator, config.csrf.header_name))
}

// =============================================================
// Page
// =============================================================

#[derive(Clone, Default)]
pub struct RecordingNotifier {
    notices: Rc<RefCell<Vec<String>>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<String> {
        self.notices.borrow().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.notices.borrow_mut().push(message.to_owned());
    }
}

#[derive(Default)]
pub struct RecordingEvent {
    prevented: Cell<u32>,
}

impl RecordingEvent {
    pub fn prevented(&self) -> u32 {
        self.prevented.get()
    }
}

impl PreventDefault for RecordingEvent {
    fn prevent_default(&self) {
        self.prevented.set(self.prevented.get() + 1);
    }
}

pub struct FakeForm {
    pub attrs: FormAttrs,
    pub fields: TestBody,
    pub fail_snapshot: bool,
}

impl FakeForm {
    pub fn new(enctype: Option<&str>, method: Option<&str>, action: Option<&str>) -> Self {
        Self {
            attrs: FormAttrs {
                enctype: enctype.map(str::to_owned),
                method: method.map(str::to_owned),
                action: action.map(str::to_owned),
            },
            fields: vec![("title".to_owned(), "Новость".to_owned())],
            fail_snapshot: false,
        }
    }

    pub fn upload(action: &str) -> Self {
        Self::new(Some("multipart/form-data"), Some("post"), Some(action))
    }
}

impl SubmittedForm for FakeForm {
    type Body = TestBody;

    fn attrs(&self) -> FormAttrs {
        self.attrs.clone()
    }

    fn snapshot(&self) -> Result<TestBody, ClientError> {
        if self.fail_snapshot {
            return Err(ClientError::Dom("FormData construction failed".to_owned()));
        }
        Ok(self.fields.clone())
    }
}

// =============================================================
// Views
// =============================================================

#[derive(Default)]
pub struct FakeAuthView {
    pub visible: Cell<bool>,
    pub tab: Cell<Option<AuthTab>>,
    pub scroll_locked: Cell<bool>,
    pub scroll_changes: Cell<u32>,
    pub login_error: RefCell<Option<String>>,
    pub register_error: RefCell<Option<String>>,
    pub resets: RefCell<Vec<AuthTab>>,
    pub login_email: RefCell<Option<String>>,
}

impl FakeAuthView {
    pub fn error(&self, form: AuthTab) -> Option<String> {
        match form {
            AuthTab::Login => self.login_error.borrow().clone(),
            AuthTab::Register => self.register_error.borrow().clone(),
        }
    }
}

impl AuthModalView for FakeAuthView {
    fn set_visible(&self, visible: bool) {
        self.visible.set(visible);
    }

    fn set_active_tab(&self, tab: AuthTab) {
        self.tab.set(Some(tab));
    }

    fn set_scroll_locked(&self, locked: bool) {
        self.scroll_locked.set(locked);
        self.scroll_changes.set(self.scroll_changes.get() + 1);
    }

    fn set_error(&self, form: AuthTab, message: Option<&str>) {
        let slot = match form {
            AuthTab::Login => &self.login_error,
            AuthTab::Register => &self.register_error,
        };
        *slot.borrow_mut() = message.map(str::to_owned);
    }

    fn reset_form(&self, form: AuthTab) {
        self.resets.borrow_mut().push(form);
    }

    fn set_login_email(&self, email: &str) {
        *self.login_email.borrow_mut() = Some(email.to_owned());
    }
}

#[derive(Default)]
pub struct FakeProfileView {
    pub visible: Cell<bool>,
    pub scroll_locked: Cell<bool>,
    pub loading: RefCell<Option<String>>,
    pub error: RefCell<Option<String>>,
    pub card: RefCell<Option<ProfileCard>>,
    pub admin_link: RefCell<Option<String>>,
}

impl ProfileModalView for FakeProfileView {
    fn set_visible(&self, visible: bool) {
        self.visible.set(visible);
    }

    fn set_scroll_locked(&self, locked: bool) {
        self.scroll_locked.set(locked);
    }

    fn show_loading(&self, placeholder: &str) {
        *self.loading.borrow_mut() = Some(placeholder.to_owned());
        *self.error.borrow_mut() = None;
        *self.card.borrow_mut() = None;
    }

    fn render_profile(&self, card: &ProfileCard) {
        *self.loading.borrow_mut() = None;
        *self.card.borrow_mut() = Some(card.clone());
    }

    fn set_admin_link(&self, href: Option<&str>) {
        *self.admin_link.borrow_mut() = href.map(str::to_owned);
    }

    fn show_error(&self, message: &str) {
        *self.loading.borrow_mut() = None;
        *self.error.borrow_mut() = Some(message.to_owned());
    }
}

// =============================================================
// Session
// =============================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionCall {
    Register(RegisterForm),
    Login(LoginForm),
    Logout,
    CurrentUser,
}

#[derive(Default)]
pub struct ScriptedSession {
    results: RefCell<VecDeque<SessionResult>>,
    calls: RefCell<Vec<SessionCall>>,
}

impl ScriptedSession {
    pub fn new(results: Vec<SessionResult>) -> Rc<Self> {
        Rc::new(Self { results: RefCell::new(results.into()), calls: RefCell::new(Vec::new()) })
    }

    pub fn calls(&self) -> Vec<SessionCall> {
        self.calls.borrow().clone()
    }

    fn next(&self, call: SessionCall) -> SessionResult {
        self.calls.borrow_mut().push(call);
        self.results
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| SessionResult::failed("unscripted call"))
    }
}

#[async_trait::async_trait(?Send)]
impl SessionService for ScriptedSession {
    async fn register(&self, form: &RegisterForm) -> SessionResult {
        self.next(SessionCall::Register(form.clone()))
    }

    async fn login(&self, form: &LoginForm) -> SessionResult {
        self.next(SessionCall::Login(form.clone()))
    }

    async fn logout(&self) -> SessionResult {
        self.next(SessionCall::Logout)
    }

    async fn current_user(&self) -> SessionResult {
        self.next(SessionCall::CurrentUser)
    }
}

pub fn user(email: &str, is_superuser: bool) -> UserProfile {
    UserProfile {
        id: Some(1),
        email: email.to_owned(),
        username: "ivan".to_owned(),
        full_name: Some("Иван Петров".to_owned()),
        is_active: true,
        is_superuser,
        created_at: Some("2024-05-01T12:30:00.123456".to_owned()),
    }
}
