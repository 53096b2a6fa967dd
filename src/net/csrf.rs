//! CSRF token lookup from the rendered page.
//!
//! SYSTEM CONTEXT
//! ==============
//! The backend embeds one token per render, either as a hidden field inside
//! its forms or as a page-level meta tag. The token rotates on every render,
//! so the cached value is only valid for the current page instance and is
//! never carried across a navigation.
//!
//! ERROR HANDLING
//! ==============
//! A missing token is not an error: pages without protected forms
//! legitimately have none. Lookup returns `None` and logs a warning.

#[cfg(test)]
#[path = "csrf_test.rs"]
mod csrf_test;

use std::cell::OnceCell;
use std::fmt;

use crate::config::CsrfConfig;

/// Per-render anti-forgery token. Never empty.
#[derive(Clone, PartialEq, Eq)]
pub struct CsrfToken(String);

impl CsrfToken {
    /// Wrap a raw value, rejecting empty and whitespace-only strings.
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for CsrfToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CsrfToken(<redacted>)")
    }
}

/// Read access to the places a rendered page may carry the token.
pub trait TokenSource {
    /// Value of the first form-scoped hidden input named `field_name`.
    fn hidden_field(&self, field_name: &str) -> Option<String>;
    /// `content` attribute of the meta tag named `meta_name`.
    fn meta_content(&self, meta_name: &str) -> Option<String>;
}

pub struct TokenLocator<S> {
    source: S,
    field_name: String,
    meta_name: String,
    cached: OnceCell<Option<CsrfToken>>,
}

impl<S: TokenSource> TokenLocator<S> {
    pub fn new(source: S, config: &CsrfConfig) -> Self {
        Self {
            source,
            field_name: config.field_name.clone(),
            meta_name: config.meta_name.clone(),
            cached: OnceCell::new(),
        }
    }

    /// Run the lookup once at page load and remember the outcome.
    pub fn prime(&self) {
        self.token();
    }

    /// Token for the current page, looked up on first use.
    pub fn token(&self) -> Option<CsrfToken> {
        self.cached.get_or_init(|| self.lookup()).clone()
    }

    /// Uncached lookup: hidden field first, then meta tag.
    pub fn lookup(&self) -> Option<CsrfToken> {
        let found = self
            .source
            .hidden_field(&self.field_name)
            .and_then(|v| CsrfToken::new(&v))
            .or_else(|| self.source.meta_content(&self.meta_name).and_then(|v| CsrfToken::new(&v)));
        if found.is_none() {
            log::warn!(
                "csrf: no token on page (field `{}`, meta `{}`)",
                self.field_name,
                self.meta_name
            );
        }
        found
    }
}
