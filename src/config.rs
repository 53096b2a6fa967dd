//! Client configuration embedded in the server-rendered page.
//!
//! DESIGN
//! ======
//! Every field defaults to the backend's conventions, so a page without a
//! config block behaves correctly. A page may override any subset by
//! rendering `<script type="application/json" id="client-config">`; missing
//! keys keep their defaults.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

use crate::error::ClientError;

/// Element id of the optional JSON config block.
pub const CONFIG_ELEMENT_ID: &str = "client-config";

pub const DEFAULT_CSRF_FIELD: &str = "csrf_token";
pub const DEFAULT_CSRF_META: &str = "csrf-token";
pub const DEFAULT_CSRF_HEADER: &str = "x-csrf-token";
pub const DEFAULT_BODY_SNIPPET_CHARS: usize = 300;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub csrf: CsrfConfig,
    pub endpoints: Endpoints,
    pub dom: DomIds,
    pub messages: Messages,
    /// One of `error`, `warn`, `info`, `debug`, `trace`.
    pub log_level: String,
    /// Maximum characters of a rejected response body copied into logs.
    pub body_snippet_chars: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            csrf: CsrfConfig::default(),
            endpoints: Endpoints::default(),
            dom: DomIds::default(),
            messages: Messages::default(),
            log_level: "info".to_owned(),
            body_snippet_chars: DEFAULT_BODY_SNIPPET_CHARS,
        }
    }
}

impl ClientConfig {
    /// Parse a config block, keeping defaults for every absent key.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] if `raw` is not a JSON object of the
    /// expected shape.
    pub fn from_json(raw: &str) -> Result<Self, ClientError> {
        serde_json::from_str(raw).map_err(ClientError::Config)
    }

    /// Configured log level, falling back to `Info` for unknown names.
    pub fn log_level(&self) -> log::Level {
        self.log_level.trim().parse().unwrap_or(log::Level::Info)
    }
}

/// Names the backend's CSRF middleware uses.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CsrfConfig {
    pub field_name: String,
    pub meta_name: String,
    pub header_name: String,
}

impl Default for CsrfConfig {
    fn default() -> Self {
        Self {
            field_name: DEFAULT_CSRF_FIELD.to_owned(),
            meta_name: DEFAULT_CSRF_META.to_owned(),
            header_name: DEFAULT_CSRF_HEADER.to_owned(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub register: String,
    pub login: String,
    pub logout: String,
    pub me: String,
    pub admin: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            register: "/auth/register".to_owned(),
            login: "/auth/login".to_owned(),
            logout: "/auth/logout".to_owned(),
            me: "/auth/me".to_owned(),
            admin: "/admin/".to_owned(),
        }
    }
}

/// Element ids the browser glue binds to.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DomIds {
    pub auth_modal: String,
    pub login_form: String,
    pub register_form: String,
    pub login_error: String,
    pub register_error: String,
    pub profile_modal: String,
    pub profile_status: String,
    pub profile_details: String,
    pub profile_email: String,
    pub profile_username: String,
    pub profile_full_name: String,
    pub profile_created_at: String,
    pub profile_account_status: String,
    pub profile_admin_link: String,
    pub logout_button: String,
}

impl Default for DomIds {
    fn default() -> Self {
        Self {
            auth_modal: "authModal".to_owned(),
            login_form: "loginForm".to_owned(),
            register_form: "registerForm".to_owned(),
            login_error: "loginError".to_owned(),
            register_error: "registerError".to_owned(),
            profile_modal: "profileModal".to_owned(),
            profile_status: "profileStatus".to_owned(),
            profile_details: "profileDetails".to_owned(),
            profile_email: "profileEmail".to_owned(),
            profile_username: "profileUsername".to_owned(),
            profile_full_name: "profileFullName".to_owned(),
            profile_created_at: "profileCreatedAt".to_owned(),
            profile_account_status: "profileAccountStatus".to_owned(),
            profile_admin_link: "profileAdminLink".to_owned(),
            logout_button: "logoutButton".to_owned(),
        }
    }
}

/// User-facing strings. The site is Russian-language.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub network_error: String,
    pub generic_error: String,
    pub rate_limited: String,
    pub session_expired: String,
    pub missing_token: String,
    pub upload_failed: String,
    pub upload_network_error: String,
    pub required_fields: String,
    pub profile_loading: String,
    pub profile_load_failed: String,
    pub logout_failed: String,
    pub status_active: String,
    pub status_blocked: String,
    pub role_admin: String,
    pub role_user: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            network_error: "Ошибка соединения с сервером. Проверьте подключение и попробуйте снова.".to_owned(),
            generic_error: "Произошла ошибка. Попробуйте позже.".to_owned(),
            rate_limited: "Слишком много запросов. Пожалуйста, попробуйте позже.".to_owned(),
            session_expired: "Сессия устарела. Обновите страницу и попробуйте снова.".to_owned(),
            missing_token: "Ошибка безопасности: CSRF-токен не найден. Обновите страницу.".to_owned(),
            upload_failed: "Не удалось отправить форму. Попробуйте снова.".to_owned(),
            upload_network_error: "Ошибка сети при отправке формы. Проверьте подключение.".to_owned(),
            required_fields: "Заполните все обязательные поля.".to_owned(),
            profile_loading: "Загрузка...".to_owned(),
            profile_load_failed: "Не удалось загрузить профиль.".to_owned(),
            logout_failed: "Не удалось выйти из системы.".to_owned(),
            status_active: "Активен".to_owned(),
            status_blocked: "Заблокирован".to_owned(),
            role_admin: "Администратор".to_owned(),
            role_user: "Пользователь".to_owned(),
        }
    }
}
