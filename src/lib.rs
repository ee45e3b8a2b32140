//! meChat web client
//!
//! Leptos frontend for the meChat conversation server: login and
//! registration, a conversation sidebar and the message thread of the
//! selected conversation.
//!
//! Everything below `pages` and `components` is plain Rust and does not
//! need a browser to run.

pub mod api;
pub mod components;
pub mod config;
pub mod controllers;
pub mod error;
pub mod markdown;
pub mod pages;
pub mod route;
pub mod session;
pub mod state;
pub mod storage;
pub mod theme;
pub mod transport;
pub mod types;

use leptos::prelude::*;
use leptos_meta::{provide_meta_context, Title};
use leptos_router::{
    components::{Redirect, Route, Router, Routes},
    path,
};

use config::ClientConfig;
use pages::{
    chat::ChatPage,
    login::{LoginPage, RegisterPage},
};
use route::LOGIN_PATH;
use state::AppState;

/// Main application component
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    // Session and theme are read from storage once, here
    let app_state = AppState::new(ClientConfig::from_build_env());
    provide_context(app_state);

    view! {
        <Title text="meChat" />
        <Router>
            <main class="min-h-screen bg-[var(--bg-primary)] text-[var(--text-primary)]">
                <Routes fallback=|| view! { <Redirect path=LOGIN_PATH /> }>
                    <Route path=path!("/login") view=LoginPage />
                    <Route path=path!("/register") view=RegisterPage />
                    <Route path=path!("/chats") view=ChatPage />
                    <Route path=path!("/chat/:id") view=ChatPage />
                </Routes>
            </main>
        </Router>
    }
}
