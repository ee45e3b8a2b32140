//! Chat input component

use leptos::prelude::*;

/// Message box with auto-resize textarea
#[component]
pub fn ChatInput(
    /// Current input value
    value: RwSignal<String>,
    /// Called when user submits
    on_submit: impl Fn() + 'static + Clone,
    /// Whether input is disabled
    #[prop(into)]
    disabled: Signal<bool>,
    /// Placeholder text
    #[prop(default = "Введите сообщение...")]
    placeholder: &'static str,
) -> impl IntoView {
    let textarea_ref = NodeRef::<leptos::html::Textarea>::new();

    let resize_textarea = move || {
        if let Some(el) = textarea_ref.get() {
            let height = el.scroll_height().min(200);
            let _ = el.set_attribute("style", &format!("height: {}px; max-height: 200px;", height));
        }
    };

    let on_input = move |ev: web_sys::Event| {
        value.set(event_target_value(&ev));
        resize_textarea();
    };

    // Enter submits, Shift+Enter inserts a newline
    let on_keydown = {
        let on_submit = on_submit.clone();
        move |ev: web_sys::KeyboardEvent| {
            if ev.key() == "Enter" && !ev.shift_key() {
                ev.prevent_default();
                if !disabled.get_untracked() && !value.get_untracked().trim().is_empty() {
                    on_submit();
                }
            }
        }
    };

    let on_button_click = move |_| {
        if !value.get_untracked().trim().is_empty() {
            on_submit();
        }
    };

    let is_empty = Signal::derive(move || value.get().trim().is_empty());

    view! {
        <div class="flex items-end gap-3 pt-3 border-t border-[var(--border-default)]">
            <textarea
                node_ref=textarea_ref
                prop:value=move || value.get()
                on:input=on_input
                on:keydown=on_keydown
                placeholder=placeholder
                disabled=move || disabled.get()
                rows="1"
                autofocus=true
                class="input flex-1 resize-none disabled:opacity-50 disabled:cursor-not-allowed"
                style="max-height: 200px;"
            ></textarea>

            <button
                on:click=on_button_click
                disabled=move || disabled.get() || is_empty.get()
                class="btn btn-primary p-3 disabled:cursor-not-allowed"
                title="Отправить"
            >
                <svg
                    xmlns="http://www.w3.org/2000/svg"
                    class="w-5 h-5"
                    viewBox="0 0 24 24"
                    fill="none"
                    stroke="currentColor"
                    stroke-width="2"
                    stroke-linecap="round"
                    stroke-linejoin="round"
                >
                    <line x1="22" y1="2" x2="11" y2="13"></line>
                    <polygon points="22 2 15 22 11 13 2 9 22 2"></polygon>
                </svg>
            </button>
        </div>
    }
}
