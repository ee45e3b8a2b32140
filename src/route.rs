//! Page routes and the authentication guard

pub const LOGIN_PATH: &str = "/login";
pub const REGISTER_PATH: &str = "/register";
pub const CHATS_PATH: &str = "/chats";

/// Known pages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Chats,
    Chat(i64),
}

impl Route {
    /// Match a location path; query string and trailing slash are ignored
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = path.trim_end_matches('/');

        match path {
            LOGIN_PATH => Some(Route::Login),
            REGISTER_PATH => Some(Route::Register),
            CHATS_PATH => Some(Route::Chats),
            _ => path
                .strip_prefix("/chat/")
                .and_then(|id| id.parse::<i64>().ok())
                .map(Route::Chat),
        }
    }

    pub fn is_protected(&self) -> bool {
        matches!(self, Route::Chats | Route::Chat(_))
    }
}

pub fn chat_path(id: i64) -> String {
    format!("/chat/{}", id)
}

/// Outcome of the guard for one navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Allow(Route),
    Redirect(&'static str),
}

/// Decide where a navigation ends up given whether a token is present
pub fn guard(path: &str, authenticated: bool) -> Navigation {
    match Route::parse(path) {
        None => Navigation::Redirect(LOGIN_PATH),
        Some(route) if route.is_protected() && !authenticated => Navigation::Redirect(LOGIN_PATH),
        Some(Route::Login | Route::Register) if authenticated => Navigation::Redirect(CHATS_PATH),
        Some(route) => Navigation::Allow(route),
    }
}
