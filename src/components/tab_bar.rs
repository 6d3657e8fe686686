//! Tab Bar Component
//!
//! Horizontal tabs for the detail screens.

use leptos::prelude::*;

#[component]
pub fn TabBar(
    labels: Vec<&'static str>,
    active: ReadSignal<usize>,
    set_active: WriteSignal<usize>,
) -> impl IntoView {
    view! {
        <div class="tab-bar">
            {labels
                .into_iter()
                .enumerate()
                .map(|(index, label)| {
                    let tab_class = move || {
                        if active.get() == index { "tab active" } else { "tab" }
                    };
                    view! {
                        <button class=tab_class on:click=move |_| set_active.set(index)>
                            {label}
                        </button>
                    }
                })
                .collect_view()}
        </div>
    }
}
