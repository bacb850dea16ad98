use leptos::prelude::*;

use super::layout::SiteLayout;

pub const FEATURES: [(&str, &str); 4] = [
    (
        "Six Unique Personalities",
        "Choose from Scholar, Blaze, Buddy, Quest, Research, and Sassy AI personalities.",
    ),
    (
        "Natural Conversations",
        "Experience fluid, context-aware conversations that feel genuinely human.",
    ),
    (
        "Instant Responses",
        "Get immediate, thoughtful responses tailored to your chosen personality.",
    ),
    (
        "Privacy First",
        "Your conversations are tied to your account and can be deleted at any time.",
    ),
];

#[component]
pub fn FeaturesPage() -> impl IntoView {
    view! {
        <SiteLayout>
            <section class="page-hero">
                <h1>"Powerful Features"</h1>
                <p>"Discover what makes NeuraChat the perfect AI companion for every conversation"</p>
            </section>
            <div class="feature-grid">
                {FEATURES
                    .iter()
                    .map(|(title, description)| {
                        view! {
                            <div class="feature-card">
                                <h3>{*title}</h3>
                                <p>{*description}</p>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
        </SiteLayout>
    }
}
