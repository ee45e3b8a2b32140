//! Sidebar component

use leptos::prelude::*;

use crate::components::LoadingSpinner;
use crate::controllers::ConversationList;
use crate::types::Conversation;

/// Sidebar with the conversation list.
///
/// Owns only the rename draft text; every list transition goes through the
/// callbacks so the page can pair it with the matching API call.
#[component]
pub fn Sidebar(
    list: RwSignal<ConversationList>,
    on_select: impl Fn(i64) + 'static,
    on_create: impl Fn() + 'static,
    on_delete: impl Fn(i64) + 'static,
    /// Called after the draft has been copied into the list
    on_commit_rename: impl Fn() + 'static,
) -> impl IntoView {
    // Kept outside the list so typing does not re-render every row
    let draft = RwSignal::new(String::new());

    // Row rendering is reactive and must be Send; the callbacks need not be
    let on_select = StoredValue::new_local(on_select);
    let on_delete = StoredValue::new_local(on_delete);
    let on_commit_rename = StoredValue::new_local(on_commit_rename);

    let is_creating = move || list.with(|l| l.is_creating());
    let error = move || list.with(|l| l.error().map(str::to_string));

    let rows = move || {
        let (loading, conversations, editing) = list.with(|l| {
            (
                l.load_state().is_loading(),
                l.conversations().to_vec(),
                l.editing_id(),
            )
        });

        if loading {
            return view! { <LoadingSpinner size="w-8 h-8" /> }.into_any();
        }
        if conversations.is_empty() {
            return view! {
                <p class="text-center text-[var(--text-muted)] mt-8">"Нет чатов"</p>
            }
            .into_any();
        }

        conversations
            .into_iter()
            .map(|conversation| {
                let id = conversation.id;
                let on_commit = move || {
                    let value = draft.get_untracked();
                    list.update(|l| l.set_draft(value));
                    on_commit_rename.with_value(|f| f());
                };
                view! {
                    <ConversationRow
                        conversation=conversation
                        is_selected=Signal::derive(move || list.with(|l| l.selected()) == Some(id))
                        is_editing={editing == Some(id)}
                        is_renaming=Signal::derive(move || list.with(|l| l.is_renaming()))
                        draft=draft
                        on_select=move || on_select.with_value(|f| f(id))
                        on_edit=move || {
                            list.update(|l| l.start_edit(id));
                            draft.set(list.with_untracked(|l| l.draft().unwrap_or_default().to_string()));
                        }
                        on_commit=on_commit
                        on_cancel=move || list.update(|l| l.cancel_edit())
                        on_delete=move || on_delete.with_value(|f| f(id))
                    />
                }
            })
            .collect_view()
            .into_any()
    };

    view! {
        <aside class="sidebar w-full sm:w-72 shrink-0 flex flex-col p-4 min-h-[400px] max-h-[600px]">
            <button
                on:click=move |_| on_create()
                disabled=is_creating
                class="btn btn-primary w-full mb-3 font-semibold"
            >
                "+ Новый чат"
            </button>

            {move || error().map(|msg| view! {
                <p class="text-sm text-[var(--accent-error)] mb-2 animate-fade-in">{msg}</p>
            })}

            <div class="flex-1 overflow-y-auto space-y-1 pr-1">
                {rows}
            </div>
        </aside>
    }
}

#[component]
fn ConversationRow(
    conversation: Conversation,
    is_selected: Signal<bool>,
    is_editing: bool,
    /// Locks the field while the new title is on its way to the server
    is_renaming: Signal<bool>,
    draft: RwSignal<String>,
    on_select: impl Fn() + 'static,
    on_edit: impl Fn() + 'static,
    on_commit: impl Fn() + Clone + 'static,
    on_cancel: impl Fn() + 'static,
    on_delete: impl Fn() + 'static,
) -> impl IntoView {
    let initial = conversation.initial();

    let title = if is_editing {
        let on_commit_key = on_commit.clone();
        view! {
            <input
                type="text"
                prop:value=move || draft.get()
                on:input=move |ev| draft.set(event_target_value(&ev))
                disabled=move || is_renaming.get()
                on:blur=move |_| on_commit()
                on:keydown=move |ev: web_sys::KeyboardEvent| match ev.key().as_str() {
                    "Enter" => on_commit_key(),
                    "Escape" => on_cancel(),
                    _ => {}
                }
                on:click=|ev: web_sys::MouseEvent| ev.stop_propagation()
                autofocus=true
                class="input py-1 px-2 text-sm min-w-0 w-28"
            />
        }
        .into_any()
    } else {
        view! { <span class="flex-1 truncate">{conversation.title}</span> }.into_any()
    };

    view! {
        <div
            on:click=move |_| on_select()
            class=move || format!(
                "sidebar-item flex items-center gap-3 cursor-pointer {}",
                if is_selected.get() { "sidebar-item-active" } else { "" }
            )
        >
            <span class="avatar avatar-user shrink-0">{initial}</span>
            {title}
            <button
                on:click=move |ev: web_sys::MouseEvent| {
                    ev.stop_propagation();
                    on_edit();
                }
                class="btn btn-ghost p-1 text-sm"
                title="Переименовать"
            >
                "✎"
            </button>
            <button
                on:click=move |ev: web_sys::MouseEvent| {
                    ev.stop_propagation();
                    on_delete();
                }
                class="btn btn-ghost p-1 text-[var(--accent-error)]"
                title="Удалить"
            >
                "×"
            </button>
        </div>
    }
}
