use contracts::system::contact::ContactMessage;
use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::layout::SiteLayout;
use crate::shared::config::AppConfig;
use crate::system::contact::api::HttpContactApi;
use crate::system::contact::form::{submit, SENT_TEXT};

/// Outcome line shown above the form until it times out.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Notice {
    success: bool,
    text: String,
}

#[component]
pub fn ContactPage() -> impl IntoView {
    let config = StoredValue::new(expect_context::<AppConfig>().contact);
    let available = config.with_value(|c| c.is_configured());

    let form = RwSignal::new(ContactMessage::default());
    let sending = RwSignal::new(false);
    let notice = RwSignal::new(Option::<Notice>::None);
    let clear_timer = StoredValue::new_local(Option::<Timeout>::None);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if sending.get_untracked() {
            return;
        }
        let message = form.get_untracked();
        let config = config.get_value();
        sending.set(true);
        notice.set(None);

        spawn_local(async move {
            let api = HttpContactApi::new(config.endpoint.clone());
            let result = submit(&api, &config, &message).await;
            let _ = sending.try_set(false);
            let shown = match result {
                Ok(()) => {
                    let _ = form.try_set(ContactMessage::default());
                    Notice {
                        success: true,
                        text: SENT_TEXT.to_string(),
                    }
                }
                Err(e) => Notice {
                    success: false,
                    text: e.to_string(),
                },
            };
            if notice.try_set(Some(shown)).is_none() {
                let timer = Timeout::new(config.status_clear_ms, move || {
                    let _ = notice.try_set(None);
                });
                let _ = clear_timer.try_set_value(Some(timer));
            }
        });
    };

    let disabled = move || sending.get() || !available;

    view! {
        <SiteLayout>
            <section class="page-hero">
                <h1>"Get In Touch"</h1>
                <p>"Have questions? I'd love to hear from you."</p>
            </section>

            {move || {
                notice
                    .get()
                    .map(|n| {
                        let class = if n.success { "notice success" } else { "notice error" };
                        view! { <div class=class>{n.text}</div> }
                    })
            }}
            {(!available)
                .then(|| {
                    view! {
                        <div class="notice error">
                            "The contact form is not available right now."
                        </div>
                    }
                })}

            <form class="contact-form" on:submit=on_submit>
                <label>
                    "Name"
                    <input
                        type="text"
                        name="name"
                        required
                        prop:value=move || form.with(|m| m.name.clone())
                        on:input=move |ev| form.update(|m| m.name = event_target_value(&ev))
                    />
                </label>
                <label>
                    "Email"
                    <input
                        type="email"
                        name="email"
                        required
                        prop:value=move || form.with(|m| m.email.clone())
                        on:input=move |ev| form.update(|m| m.email = event_target_value(&ev))
                    />
                </label>
                <label>
                    "Subject"
                    <input
                        type="text"
                        name="subject"
                        required
                        prop:value=move || form.with(|m| m.subject.clone())
                        on:input=move |ev| form.update(|m| m.subject = event_target_value(&ev))
                    />
                </label>
                <label>
                    "Message"
                    <textarea
                        name="message"
                        rows="6"
                        required
                        prop:value=move || form.with(|m| m.message.clone())
                        on:input=move |ev| form.update(|m| m.message = event_target_value(&ev))
                    ></textarea>
                </label>
                <button class="primary-button" type="submit" prop:disabled=disabled>
                    {move || if sending.get() { "Sending..." } else { "Send Message" }}
                </button>
            </form>
        </SiteLayout>
    }
}
