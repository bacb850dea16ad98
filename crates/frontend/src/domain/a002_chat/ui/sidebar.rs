use leptos::prelude::*;
use thaw::*;

use super::view_model::ChatVm;
use crate::domain::a002_chat::model::SessionSummary;

#[component]
#[allow(non_snake_case)]
pub fn ChatSidebar(vm: ChatVm) -> impl IntoView {
    let is_empty = move || vm.state.with(|s| s.history.is_empty());
    let is_loading = move || vm.state.with(|s| s.is_loading_history);

    view! {
        <aside class="chat-sidebar">
            <div class="sidebar-header">
                <Button appearance=ButtonAppearance::Primary on_click=move |_| vm.new_chat()>
                    "+ New Chat"
                </Button>
            </div>
            {move || (is_loading() && is_empty()).then(|| view! { <div class="history-loading"><Spinner /></div> })}
            {move || {
                (!is_loading() && is_empty())
                    .then(|| view! { <p class="history-empty">"No conversations yet"</p> })
            }}
            <ul class="history-list">
                <For
                    each=move || vm.state.with(|s| s.history.clone())
                    key=|entry| (entry.session_id.clone(), entry.title.clone())
                    children=move |entry| view! { <HistoryItem vm=vm entry=entry /> }
                />
            </ul>
        </aside>
    }
}

#[component]
#[allow(non_snake_case)]
fn HistoryItem(vm: ChatVm, entry: SessionSummary) -> impl IntoView {
    let is_active = {
        let id = entry.session_id.clone();
        move || vm.state.with(|s| s.is_active(&id))
    };
    let deleting = entry.is_deleting();
    let select_id = entry.session_id.clone();
    let delete_id = entry.session_id.clone();

    view! {
        <li
            class="history-item"
            class:active=is_active
            class:deleting=deleting
            on:click=move |_| vm.select(select_id.clone())
        >
            <div class="history-title">{entry.title}</div>
            <div class="history-snippet">{entry.last_message}</div>
            <div class="history-date">{entry.display_timestamp}</div>
            <button
                class="icon-button history-delete"
                title="Delete chat"
                disabled=deleting
                on:click=move |ev| {
                    ev.stop_propagation();
                    vm.delete(delete_id.clone());
                }
            >
                "🗑"
            </button>
        </li>
    }
}
