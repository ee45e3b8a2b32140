//! Global application state

use leptos::prelude::*;

use crate::api::ApiClient;
use crate::config::ClientConfig;
use crate::session::SessionStore;
use crate::storage::BrowserStorage;
use crate::theme::{Theme, ThemePreference};
use crate::transport::BrowserTransport;

pub type BrowserApi = ApiClient<BrowserTransport>;

/// Process-wide state, created once at startup and handed down through
/// context. The signals mirror the stores so views can react to them.
#[derive(Clone)]
pub struct AppState {
    /// Session token, kept in step with `session`
    pub token: RwSignal<Option<String>>,
    /// Active colour theme
    pub theme: RwSignal<Theme>,
    pub api: BrowserApi,
    session: SessionStore<BrowserStorage>,
}

impl AppState {
    pub fn new(config: ClientConfig) -> Self {
        let session = SessionStore::restore(BrowserStorage);
        let theme = ThemePreference::load(BrowserStorage).current();
        apply_theme(theme);

        let api = ApiClient::new(BrowserTransport::new(config), session.auth_header());

        Self {
            token: RwSignal::new(session.token()),
            theme: RwSignal::new(theme),
            api,
            session,
        }
    }

    /// Store the token from a successful login or registration
    pub fn sign_in(&self, token: String) {
        self.session.set_token(Some(token));
        self.token.set(self.session.token());
    }

    /// Drop the session. The theme preference is left alone.
    pub fn logout(&self) {
        self.session.clear();
        self.token.set(None);
        tracing::info!("Signed out");
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.get().is_some()
    }

    pub fn toggle_theme(&self) {
        let mut pref = ThemePreference::load(BrowserStorage);
        let theme = pref.toggle();
        apply_theme(theme);
        self.theme.set(theme);
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}

/// Mark the document root so the stylesheet can switch palettes
fn apply_theme(theme: Theme) {
    let root = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element());
    if let Some(root) = root {
        if let Err(e) = root.set_attribute("data-theme", theme.as_str()) {
            tracing::warn!("Failed to apply theme: {:?}", e);
        }
    }
}
