use leptos::prelude::*;
use thaw::*;

use super::view_model::ChatVm;
use crate::domain::a002_chat::attachment::UploadStatus;

/// Banner style and text for an upload status.
pub fn banner_text(status: UploadStatus, file_name: Option<&str>) -> Option<(&'static str, String)> {
    let name = file_name.unwrap_or("document");
    match status {
        UploadStatus::None => None,
        UploadStatus::Uploading => Some(("upload-banner uploading", format!("Uploading {}...", name))),
        UploadStatus::Success => Some((
            "upload-banner success",
            format!("{} uploaded. Ask me anything about it.", name),
        )),
        UploadStatus::Fail => Some(("upload-banner fail", format!("Could not upload {}.", name))),
    }
}

#[component]
#[allow(non_snake_case)]
pub fn UploadBanner(vm: ChatVm) -> impl IntoView {
    move || {
        vm.state
            .with(|s| {
                let a = &s.attachment;
                if a.banner_visible {
                    banner_text(a.status, a.file_name.as_deref())
                } else {
                    None
                }
            })
            .map(|(class, text)| view! { <div class=class>{text}</div> })
    }
}

#[component]
#[allow(non_snake_case)]
pub fn Composer(vm: ChatVm) -> impl IntoView {
    let file_input = NodeRef::<leptos::html::Input>::new();
    let typing = move || vm.state.with(|s| s.is_typing);
    let uploading = move || vm.state.with(|s| s.attachment.is_uploading());
    let send_disabled =
        Signal::derive(move || vm.state.with(|s| !s.can_send() || s.attachment.is_uploading()));
    let attach_disabled = Signal::derive(move || typing() || uploading());
    let attached = move || vm.state.with(|s| s.attachment.attached_name.clone());

    view! {
        <div class="composer">
            {move || {
                vm.pending_file_name
                    .get()
                    .map(|name| {
                        view! {
                            <div class="file-preview">
                                <span class="file-name">"🔗 " {name}</span>
                                <Button
                                    size=ButtonSize::Small
                                    appearance=ButtonAppearance::Primary
                                    disabled=Signal::derive(uploading)
                                    on_click=move |_| vm.upload_pending()
                                >
                                    {move || if uploading() { "Uploading..." } else { "Upload" }}
                                </Button>
                                <Button size=ButtonSize::Small on_click=move |_| vm.clear_file()>
                                    "Remove"
                                </Button>
                            </div>
                        }
                    })
            }}
            <Flex align=FlexAlign::Center style="gap: 8px;">
                <input
                    class="composer-input"
                    type="text"
                    placeholder="Type your message..."
                    prop:value=move || vm.state.with(|s| s.input.clone())
                    disabled=typing
                    on:input=move |ev| vm.set_input(event_target_value(&ev))
                    on:keydown=move |ev: web_sys::KeyboardEvent| {
                        if ev.key() == "Enter" && !ev.shift_key() {
                            ev.prevent_default();
                            vm.send();
                        }
                    }
                />
                {move || attached().map(|name| view! { <span class="attached-file">"✓ " {name}</span> })}
                <input
                    node_ref=file_input
                    type="file"
                    accept=".pdf,.docx,.txt"
                    style="display: none;"
                    on:change=move |ev| {
                        let input: web_sys::HtmlInputElement = event_target(&ev);
                        if let Some(file) = input.files().and_then(|files| files.get(0)) {
                            vm.choose_file(file);
                        }
                        input.set_value("");
                    }
                />
                <Button
                    appearance=ButtonAppearance::Secondary
                    disabled=attach_disabled
                    on_click=move |_| {
                        if let Some(input) = file_input.get_untracked() {
                            input.click();
                        }
                    }
                >
                    "🔗"
                </Button>
                <Button appearance=ButtonAppearance::Primary disabled=send_disabled on_click=move |_| vm.send()>
                    {move || if typing() { "Sending..." } else { "Send" }}
                </Button>
            </Flex>
        </div>
    }
}
