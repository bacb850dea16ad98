use crate::routes::routes::AppRoutes;
use crate::shared::config::AppConfig;
use crate::shared::theme::ThemeProvider;
use crate::system::auth::context::AuthProvider;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Configuration first: the auth store reads the backend URL from it.
    let config = AppConfig::load();
    log::info!("backend: {}", config.backend_base());
    provide_context(config);

    view! {
        <ThemeProvider>
            <AuthProvider>
                <AppRoutes />
            </AuthProvider>
        </ThemeProvider>
    }
}
