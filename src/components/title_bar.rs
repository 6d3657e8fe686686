//! Title Bar Component
//!
//! Screen header with a back button when there is somewhere to go back to.

use leptos::prelude::*;

use crate::context::use_app_context;

#[component]
pub fn TitleBar(
    #[prop(into)] title: String,
    #[prop(optional, into)] subtitle: Option<Signal<String>>,
) -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <div class="custom-titlebar">
            <Show when=move || ctx.can_go_back()>
                <button class="titlebar-btn back" title="Back" on:click=move |_| ctx.back()>
                    "←"
                </button>
            </Show>
            <div class="titlebar-text">
                <span class="titlebar-title">{title}</span>
                {subtitle.map(|s| view! { <span class="titlebar-subtitle">{move || s.get()}</span> })}
            </div>
        </div>
    }
}
