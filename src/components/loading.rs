//! Loading indicators

use leptos::prelude::*;

/// Animated loading dots
#[component]
pub fn LoadingDots() -> impl IntoView {
    view! {
        <div class="flex items-center gap-1">
            <span class="w-2 h-2 bg-[var(--accent-primary)] rounded-full dot-bounce-1"></span>
            <span class="w-2 h-2 bg-[var(--accent-primary)] rounded-full dot-bounce-2"></span>
            <span class="w-2 h-2 bg-[var(--accent-primary)] rounded-full dot-bounce-3"></span>
        </div>
    }
}

/// Spinner loading indicator
#[component]
pub fn LoadingSpinner(
    #[prop(default = "w-5 h-5")] size: &'static str,
) -> impl IntoView {
    view! {
        <div class="flex justify-center my-8">
            <svg
                class=format!("{} animate-spin text-[var(--accent-primary)]", size)
                xmlns="http://www.w3.org/2000/svg"
                fill="none"
                viewBox="0 0 24 24"
            >
                <circle
                    class="opacity-25"
                    cx="12"
                    cy="12"
                    r="10"
                    stroke="currentColor"
                    stroke-width="4"
                ></circle>
                <path
                    class="opacity-75"
                    fill="currentColor"
                    d="M4 12a8 8 0 018-8V0C5.373 0 0 5.373 0 12h4zm2 5.291A7.962 7.962 0 014 12H0c0 3.042 1.135 5.824 3 7.938l3-2.647z"
                ></path>
            </svg>
        </div>
    }
}

/// Shown in place of the assistant's reply while a send is outstanding
#[component]
pub fn TypingIndicator() -> impl IntoView {
    view! {
        <div class="flex items-end gap-3 message-appear">
            <div class="avatar avatar-assistant">"🤖"</div>
            <div class="bubble bubble-assistant">
                <LoadingDots />
            </div>
        </div>
    }
}
