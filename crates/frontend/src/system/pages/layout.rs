use leptos::prelude::*;

use crate::shared::theme::ThemeToggle;

/// Links between the public pages.
#[component]
pub fn SiteNav() -> impl IntoView {
    view! {
        <nav class="site-nav">
            <a href="/">"Home"</a>
            <a href="/features">"Features"</a>
            <a href="/about">"About"</a>
            <a href="/contact">"Contact"</a>
        </nav>
    }
}

/// Header and content column shared by the informational pages.
#[component]
pub fn SiteLayout(children: Children) -> impl IntoView {
    view! {
        <div class="site-page">
            <header class="landing-header">
                <a class="brand" href="/">"NeuraChat"</a>
                <SiteNav />
                <ThemeToggle />
            </header>
            <main class="site-content">{children()}</main>
        </div>
    }
}
