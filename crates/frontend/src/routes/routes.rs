use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

use crate::domain::a002_chat::ui::ChatPage;
use crate::system::auth::guard::RequireAuth;
use crate::system::pages::about::AboutPage;
use crate::system::pages::auth_redirect::AuthRedirectPage;
use crate::system::pages::contact::ContactPage;
use crate::system::pages::features::FeaturesPage;
use crate::system::pages::landing::LandingPage;
use crate::system::pages::login::LoginPage;

#[component]
#[allow(non_snake_case)]
fn ProtectedChat() -> impl IntoView {
    view! {
        <RequireAuth>
            <ChatPage />
        </RequireAuth>
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Router>
            <Routes fallback=|| view! { <LandingPage /> }>
                <Route path=path!("/") view=LandingPage />
                <Route path=path!("/home") view=LandingPage />
                <Route path=path!("/login") view=LoginPage />
                <Route path=path!("/google") view=AuthRedirectPage />
                <Route path=path!("/chat") view=ProtectedChat />
                <Route path=path!("/about") view=AboutPage />
                <Route path=path!("/features") view=FeaturesPage />
                <Route path=path!("/contact") view=ContactPage />
            </Routes>
        </Router>
    }
}
