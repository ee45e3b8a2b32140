//! Chat page - sidebar plus the active conversation

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::Title;
use leptos_router::hooks::{use_navigate, use_params_map};
use web_sys::{ScrollBehavior, ScrollIntoViewOptions};

use crate::components::{ChatInput, ChatMessage, Header, LoadingSpinner, Sidebar, TypingIndicator};
use crate::controllers::{ConversationList, MessageThread, SelectionChange, DEFAULT_TITLE};
use crate::pages::use_route_guard;
use crate::route::{chat_path, CHATS_PATH};
use crate::state::AppState;
use crate::types::Message;

/// Serves both `/chats` and `/chat/:id`
#[component]
pub fn ChatPage() -> impl IntoView {
    let state = expect_context::<AppState>();
    let navigate = use_navigate();
    let params = use_params_map();
    use_route_guard();

    let active_id = Memo::new(move |_| {
        params
            .read()
            .get("id")
            .and_then(|id| id.parse::<i64>().ok())
    });

    // Load the sidebar on mount
    let mut initial = ConversationList::new();
    let ticket = initial.begin_load();
    let list = RwSignal::new(initial);
    {
        let api = state.api.clone();
        spawn_local(async move {
            let result = api.list_conversations().await;
            list.try_update(|l| l.finish_load(ticket, result));
        });
    }

    // Keep the highlighted row in step with the URL
    Effect::new(move |_| match active_id.get() {
        Some(id) => list.update(|l| l.select(id)),
        None => list.update(|l| l.clear_selection()),
    });

    let on_select = {
        let navigate = navigate.clone();
        move |id: i64| {
            list.update(|l| l.select(id));
            navigate(&chat_path(id), Default::default());
        }
    };

    let on_create = {
        let api = state.api.clone();
        let navigate = navigate.clone();
        move || {
            if !list.try_update(|l| l.begin_create()).unwrap_or(false) {
                return;
            }
            let api = api.clone();
            let navigate = navigate.clone();
            spawn_local(async move {
                let result = api.create_conversation(DEFAULT_TITLE).await;
                if let Some(Some(id)) = list.try_update(|l| l.finish_create(result)) {
                    navigate(&chat_path(id), Default::default());
                }
            });
        }
    };

    let on_delete = {
        let api = state.api.clone();
        let navigate = navigate.clone();
        move |id: i64| {
            let api = api.clone();
            let navigate = navigate.clone();
            spawn_local(async move {
                let result = api.delete_conversation(id).await;
                match list.try_update(|l| l.finish_delete(id, result)) {
                    Some(SelectionChange::Selected(next)) => {
                        navigate(&chat_path(next), Default::default())
                    }
                    Some(SelectionChange::Cleared) => navigate(CHATS_PATH, Default::default()),
                    _ => {}
                }
            });
        }
    };

    let on_commit_rename = {
        let api = state.api.clone();
        move || {
            let Some(Some(commit)) = list.try_update(|l| l.commit_edit()) else {
                return;
            };
            let api = api.clone();
            spawn_local(async move {
                let result = api.rename_conversation(commit.id, &commit.title).await;
                list.try_update(|l| l.finish_rename(commit, result));
            });
        }
    };

    let title = move || {
        let name = active_id.get().and_then(|id| {
            list.with(|l| {
                l.conversations()
                    .iter()
                    .find(|c| c.id == id)
                    .map(|c| c.title.clone())
            })
        });
        match name {
            Some(name) => format!("{} · meChat", name),
            None => "meChat".to_string(),
        }
    };

    view! {
        <Title text=title />
        <div class="min-h-screen flex flex-col bg-[var(--bg-primary)]">
            <Header />

            <div class="flex-1 w-full max-w-5xl mx-auto px-4 pb-6 flex flex-col sm:flex-row gap-6">
                <Sidebar
                    list=list
                    on_select=on_select
                    on_create=on_create
                    on_delete=on_delete
                    on_commit_rename=on_commit_rename
                />

                <main class="flex-1 min-w-0">
                    <Show
                        when=move || active_id.get().is_some()
                        fallback=|| view! { <NoConversation /> }
                    >
                        <Thread conversation_id=active_id />
                    </Show>
                </main>
            </div>
        </div>
    }
}

/// Placeholder shown on `/chats`
#[component]
fn NoConversation() -> impl IntoView {
    view! {
        <div class="card min-h-[400px] flex items-start justify-center pt-24 text-[var(--text-muted)]">
            "Выберите чат слева или создайте новый"
        </div>
    }
}

/// Messages of one conversation plus the input box
#[component]
fn Thread(#[prop(into)] conversation_id: Signal<Option<i64>>) -> impl IntoView {
    let state = expect_context::<AppState>();
    let thread = RwSignal::new(MessageThread::new());
    let input = RwSignal::new(String::new());
    let messages_end_ref = NodeRef::<leptos::html::Div>::new();

    // Reload on every conversation switch; late answers for the old one are dropped
    {
        let api = state.api.clone();
        Effect::new(move |_| {
            let id = conversation_id.get();
            let Some(ticket) = thread.try_update(|t| t.open(id)).flatten() else {
                return;
            };
            input.set(String::new());
            let api = api.clone();
            spawn_local(async move {
                let result = api.list_messages(ticket.conversation_id).await;
                thread.try_update(|t| t.finish_load(ticket, result));
            });
        });
    }

    // Scroll to the newest message once the DOM has caught up
    Effect::new(move |_| {
        thread.with(|t| t.messages().len());
        Timeout::new(0, move || {
            if let Some(el) = messages_end_ref.get_untracked() {
                let options = ScrollIntoViewOptions::new();
                options.set_behavior(ScrollBehavior::Smooth);
                el.scroll_into_view_with_scroll_into_view_options(&options);
            }
        })
        .forget();
    });

    let send_message = {
        let api = state.api.clone();
        move || {
            let text = input.get_untracked();
            let ticket = match thread.try_update(|t| t.begin_send(&text)) {
                Some(Ok(ticket)) => ticket,
                Some(Err(e)) => {
                    tracing::debug!("Not sending: {}", e);
                    return;
                }
                None => return,
            };
            input.set(String::new());

            let api = api.clone();
            spawn_local(async move {
                let result = api.send_message(ticket.conversation_id, &ticket.text).await;
                thread.try_update(|t| t.finish_send(ticket, result));
            });
        }
    };

    let is_sending = Signal::derive(move || thread.with(|t| t.is_sending()));
    let is_loading = move || thread.with(|t| t.load_state().is_loading());
    let error = move || thread.with(|t| t.error().map(str::to_string));

    view! {
        <section class="card p-4 min-h-[400px] flex flex-col">
            <h2 class="text-lg font-semibold text-center mb-3">
                {move || conversation_id.get().map(|id| format!("Чат #{}", id)).unwrap_or_default()}
            </h2>

            <div class="flex-1 overflow-y-auto max-h-[400px] mb-2 px-1">
                <Show when=is_loading fallback=move || view! {
                    <Show when=move || thread.with(|t| t.messages().is_empty())>
                        <p class="text-center text-[var(--text-muted)] mt-8">"Нет сообщений"</p>
                    </Show>
                    <For
                        each=move || thread.with(|t| t.messages().to_vec())
                        key=|message: &Message| message.id
                        children=|message: Message| view! { <ChatMessage message=message /> }
                    />
                    <Show when=move || is_sending.get()>
                        <TypingIndicator />
                    </Show>
                }>
                    <LoadingSpinner size="w-8 h-8" />
                </Show>
                <div node_ref=messages_end_ref></div>
            </div>

            {move || error().map(|msg| view! {
                <p class="text-sm text-center text-[var(--accent-error)] mb-2">{msg}</p>
            })}

            <ChatInput value=input on_submit=send_message disabled=is_sending />
        </section>
    }
}
