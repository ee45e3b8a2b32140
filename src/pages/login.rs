//! Login/Register pages

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::Title;
use leptos_router::hooks::use_navigate;

use crate::controllers::{LoginForm, RegisterForm, Submission};
use crate::pages::use_route_guard;
use crate::route::{CHATS_PATH, LOGIN_PATH, REGISTER_PATH};
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AuthMode {
    Login,
    Register,
}

#[component]
pub fn LoginPage() -> impl IntoView {
    view! { <AuthCard mode=AuthMode::Login /> }
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    view! { <AuthCard mode=AuthMode::Register /> }
}

/// Shared form for both pages
#[component]
fn AuthCard(mode: AuthMode) -> impl IntoView {
    let state = expect_context::<AppState>();
    let navigate = use_navigate();
    use_route_guard();

    let is_register = mode == AuthMode::Register;

    // Form state
    let email = RwSignal::new(String::new());
    let name = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let submission = RwSignal::new(Submission::default());
    let error = RwSignal::new(Option::<String>::None);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        // Claim the form before the task starts so a double click sends once
        if !submission.try_update(|s| s.begin()).unwrap_or(false) {
            return;
        }
        error.set(None);

        let email_val = email.get_untracked();
        let name_val = name.get_untracked();
        let password_val = password.get_untracked();
        let state = state.clone();
        let navigate = navigate.clone();

        spawn_local(async move {
            let result = match mode {
                AuthMode::Login => {
                    LoginForm {
                        email: email_val,
                        password: password_val,
                    }
                    .submit(&state.api)
                    .await
                }
                AuthMode::Register => {
                    RegisterForm {
                        email: email_val,
                        name: name_val,
                        password: password_val,
                    }
                    .submit(&state.api)
                    .await
                }
            };

            submission.try_update(|s| s.finish());

            match result {
                Ok(token) => {
                    state.sign_in(token);
                    navigate(CHATS_PATH, Default::default());
                }
                Err(e) => error.set(Some(e.to_string())),
            }
        });
    };

    view! {
        <Title text={if is_register { "Регистрация · meChat" } else { "Вход · meChat" }} />
        <main class="auth-container min-h-screen flex items-center justify-center">
            <div class="w-full max-w-md px-4">
                <div class="auth-card">
                    <h1 class="auth-title text-center mb-4">
                        {if is_register { "Регистрация" } else { "Вход" }}
                    </h1>

                    <form on:submit=on_submit class="auth-form">
                        <div class="auth-input-group">
                            <label class="auth-label">"Email"</label>
                            <input
                                type="email"
                                prop:value=move || email.get()
                                on:input=move |ev| email.set(event_target_value(&ev))
                                required=true
                                class="input"
                            />
                        </div>

                        <Show when=move || is_register>
                            <div class="auth-input-group">
                                <label class="auth-label">"Имя"</label>
                                <input
                                    type="text"
                                    prop:value=move || name.get()
                                    on:input=move |ev| name.set(event_target_value(&ev))
                                    required=true
                                    class="input"
                                />
                            </div>
                        </Show>

                        <div class="auth-input-group">
                            <label class="auth-label">"Пароль"</label>
                            <input
                                type="password"
                                prop:value=move || password.get()
                                on:input=move |ev| password.set(event_target_value(&ev))
                                required=true
                                class="input"
                            />
                        </div>

                        {move || error.get().map(|msg| view! {
                            <p class="text-sm text-[var(--accent-error)] animate-fade-in">{msg}</p>
                        })}

                        <button
                            type="submit"
                            disabled=move || submission.with(|s| s.is_busy())
                            class="btn btn-primary w-full py-3 mt-2"
                        >
                            {if is_register { "Зарегистрироваться" } else { "Войти" }}
                        </button>
                    </form>

                    <div class="auth-footer text-center mt-4">
                        {if is_register {
                            view! { <a href=LOGIN_PATH class="auth-link">"Уже есть аккаунт? Войти"</a> }.into_any()
                        } else {
                            view! { <a href=REGISTER_PATH class="auth-link">"Нет аккаунта? Зарегистрироваться"</a> }.into_any()
                        }}
                    </div>
                </div>
            </div>
        </main>
    }
}
