use leptos::prelude::*;

use super::layout::SiteLayout;

#[component]
pub fn AboutPage() -> impl IntoView {
    view! {
        <SiteLayout>
            <section class="page-hero">
                <h1>"About NeuraChat"</h1>
                <p>"Revolutionizing conversations through AI-powered personalities"</p>
            </section>
            <div class="feature-grid">
                <div class="feature-card">
                    <h3>"Our Mission"</h3>
                    <p>
                        "To make AI conversations more human, engaging, and tailored to individual needs through distinct personality-driven interactions."
                    </p>
                </div>
                <div class="feature-card">
                    <h3>"Our Vision"</h3>
                    <p>
                        "To create a world where AI assistants understand context, emotion, and individual preferences to provide truly personalized experiences."
                    </p>
                </div>
            </div>
        </SiteLayout>
    }
}
