//! Chassis Records Frontend App
//!
//! Provides the store and navigation context, restores a stored session
//! and renders the current screen.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::commands;
use crate::components::{
    CmhDetail, FileViewer, HomeScreen, LoginScreen, PlanDetail, PlanDocument, RecordDetail, RecordListing,
    RegisterScreen, WeightCertDetail,
};
use crate::context::AppContext;
use crate::models::Screen;
use crate::store::{store_sign_in, AppState, AppStateStoreFields, AppStore};

#[component]
pub fn App() -> impl IntoView {
    let config = commands::config();
    let store: AppStore = Store::new(AppState::new(&config.version));

    let initial = match commands::current_session() {
        Some(session) => {
            log::info!("Restored session for {}", session.username().unwrap_or("unknown user"));
            store_sign_in(&store, session.user);
            Screen::Home
        }
        None => Screen::Login,
    };
    let ctx = AppContext::new(signal(initial));

    provide_context(store);
    provide_context(ctx);

    // Anything behind the login needs a session
    Effect::new(move |_| {
        let screen = ctx.screen.get();
        if !screen.is_public() && !store.authenticated().get() {
            log::info!("No session, redirecting to login");
            ctx.replace(Screen::Login);
        }
    });

    view! {
        <div class="app-layout">
            {move || match ctx.screen.get() {
                Screen::Login => view! { <LoginScreen /> }.into_any(),
                Screen::Register => view! { <RegisterScreen /> }.into_any(),
                Screen::Home => view! { <HomeScreen /> }.into_any(),
                Screen::Listing(kind) => view! { <RecordListing kind=kind /> }.into_any(),
                Screen::PlanDetail(plan) => view! { <PlanDetail plan=plan /> }.into_any(),
                Screen::PlanDocument(plan) => view! { <PlanDocument plan=plan /> }.into_any(),
                Screen::WeightCertDetail(cert) => view! { <WeightCertDetail cert=cert /> }.into_any(),
                Screen::ChassisDetail(chassis) => view! { <CmhDetail chassis=chassis /> }.into_any(),
                Screen::RecordDetail { title, record } => view! { <RecordDetail title=title record=record /> }.into_any(),
                Screen::FileViewer(file) => view! { <FileViewer file=file /> }.into_any(),
            }}
        </div>
    }
}
