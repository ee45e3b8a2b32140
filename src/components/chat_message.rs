//! Chat message component

use leptos::prelude::*;

use crate::markdown;
use crate::types::Message;

/// Render a single chat bubble
#[component]
pub fn ChatMessage(message: Message) -> impl IntoView {
    let is_user = message.is_user();
    let time = message
        .timestamp
        .map(|t| t.with_timezone(&chrono::Local).format("%H:%M").to_string());

    let body = if is_user {
        view! { <p class="whitespace-pre-line break-words">{message.content}</p> }.into_any()
    } else {
        view! { <div class="markdown break-words" inner_html={markdown::render(&message.content)}></div> }
            .into_any()
    };

    view! {
        <div class=format!(
            "flex items-end gap-3 mb-3 message-appear {}",
            if is_user { "flex-row-reverse" } else { "" }
        )>
            <div class={if is_user { "avatar avatar-user" } else { "avatar avatar-assistant" }}>
                {if is_user { "Я" } else { "🤖" }}
            </div>

            <div class=format!(
                "flex flex-col gap-1 max-w-[70%] {}",
                if is_user { "items-end" } else { "items-start" }
            )>
                <div class={if is_user { "bubble bubble-user" } else { "bubble bubble-assistant" }}>
                    {body}
                </div>
                {time.map(|t| view! {
                    <span class="text-xs text-[var(--text-muted)]">{t}</span>
                })}
            </div>
        </div>
    }
}
