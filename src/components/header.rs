//! Header component

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::route::LOGIN_PATH;
use crate::state::AppState;

/// Top bar with brand, theme toggle and logout
#[component]
pub fn Header() -> impl IntoView {
    let state = expect_context::<AppState>();
    let navigate = use_navigate();

    let theme = state.theme;
    let is_dark = Signal::derive(move || theme.get().is_dark());

    let toggle_theme = {
        let state = state.clone();
        move |_| state.toggle_theme()
    };

    let logout = move |_| {
        state.logout();
        navigate(LOGIN_PATH, Default::default());
    };

    view! {
        <header class="header h-16 sticky top-0 z-40 mb-4">
            <div class="h-full max-w-5xl mx-auto px-4 flex items-center justify-between">
                <a href="/chats" class="logo hover:opacity-80 transition-opacity">
                    <h1 class="text-xl font-bold tracking-wide">
                        <span class="text-[var(--accent-primary)]">"me"</span>
                        "Chat"
                    </h1>
                </a>

                <nav class="flex items-center gap-2">
                    <button
                        on:click=toggle_theme
                        class="btn btn-ghost p-2"
                        title=move || if is_dark.get() { "Светлая тема" } else { "Темная тема" }
                    >
                        {move || if is_dark.get() { "☀️" } else { "🌙" }}
                    </button>
                    <button on:click=logout class="btn btn-ghost font-semibold">
                        "Выйти"
                    </button>
                </nav>
            </div>
        </header>
    }
}
