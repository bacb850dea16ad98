use leptos::prelude::*;

use crate::domain::a001_personality::preferences;
use crate::domain::a001_personality::{all, Personality};
use crate::shared::storage::BrowserStorage;

/// Card grid of all personas. Picking one persists it as the preferred persona.
#[component]
#[allow(non_snake_case)]
pub fn PersonalityPicker(selected: RwSignal<&'static str>) -> impl IntoView {
    let pick = move |id: &'static str| {
        selected.set(id);
        preferences::save_selected(&BrowserStorage, id);
        log::debug!("selected personality: {}", id);
    };

    view! {
        <div class="personality-grid">
            {all()
                .iter()
                .map(|p| view! { <PersonalityCard personality=p selected=selected on_pick=pick /> })
                .collect_view()}
        </div>
    }
}

#[component]
#[allow(non_snake_case)]
fn PersonalityCard(
    personality: &'static Personality,
    selected: RwSignal<&'static str>,
    on_pick: impl Fn(&'static str) + 'static,
) -> impl IntoView {
    let is_selected = move || selected.get() == personality.id;

    view! {
        <div
            class="personality-card"
            class:selected=is_selected
            on:click=move |_| on_pick(personality.id)
        >
            <div class=format!("persona-avatar bg-gradient-to-br {}", personality.color)>
                {personality.icon}
            </div>
            <h3>{personality.name}</h3>
            <p class="persona-description">{personality.short_description}</p>
            <div class="persona-traits">
                {personality
                    .traits
                    .iter()
                    .map(|t| view! { <span class="persona-trait">{*t}</span> })
                    .collect_view()}
            </div>
            {move || is_selected().then(|| view! { <span class="persona-selected">"✨ Currently Selected"</span> })}
        </div>
    }
}
