//! Record Listing Component
//!
//! One screen for every listing. The `PagedSearch` controller owns the
//! pagination and search state; this component only renders snapshots of
//! it and forwards user actions. The controller is cancelled on unmount so
//! late responses never touch disposed signals.

use std::collections::BTreeMap;
use std::rc::Rc;

use chassis_core::controller::{ListSnapshot, Outcome, PagedSearch, SearchMode};
use chassis_core::repository::ApiClient;
use chassis_core::Record;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::components::TitleBar;
use crate::context::use_app_context;
use crate::models::ListingKind;

/// Distance from the bottom (px) at which the next page is requested
const LOAD_MORE_THRESHOLD: i32 = 120;

/// A user action forwarded to the controller
enum ListOp {
    Page(u32),
    LoadMore,
    Submit(Option<&'static str>, String),
    Combined(Vec<(&'static str, String)>),
    ClearField(&'static str),
    Reset,
    Mode(SearchMode),
}

async fn run(controller: &PagedSearch<ApiClient>, op: ListOp) -> Outcome {
    match op {
        ListOp::Page(page) => controller.fetch_page(page, false).await,
        ListOp::LoadMore => controller.load_more().await,
        ListOp::Submit(field, query) => controller.submit(field, &query).await,
        ListOp::Combined(queries) => {
            let pairs: Vec<(&str, &str)> = queries.iter().map(|(f, q)| (*f, q.as_str())).collect();
            controller.combined_search(&pairs).await
        }
        ListOp::ClearField(name) => controller.clear_field(name).await,
        ListOp::Reset => controller.reset().await,
        ListOp::Mode(mode) => controller.set_mode(mode).await,
    }
}

#[component]
pub fn RecordListing(kind: ListingKind) -> impl IntoView {
    let ctx = use_app_context();

    let controller = StoredValue::new_local(Rc::new(commands::listing_controller(kind)));
    let (spec_fields, has_advanced) = controller.with_value(|c| {
        let spec = c.spec();
        (
            spec.fields.iter().map(|f| (f.name, f.label)).collect::<Vec<_>>(),
            spec.has_advanced_search(),
        )
    });

    let (snapshot, set_snapshot) = signal(ListSnapshot::default());
    let (pending, set_pending) = signal(0u32);
    let (simple_text, set_simple_text) = signal(String::new());
    let field_text = RwSignal::new(BTreeMap::<&'static str, String>::new());

    let dispatch = move |op: ListOp| {
        let Some(c) = controller.try_get_value() else { return };
        if c.is_cancelled() { return; }
        set_pending.update(|n| *n += 1);
        spawn_local(async move {
            let outcome = run(&c, op).await;
            // The screen is gone; its signals may be disposed
            if c.is_cancelled() { return; }
            match &outcome {
                Outcome::Failed(e) => log::warn!("{}: {}", kind.title(), e),
                Outcome::Stale => log::debug!("{}: stale response dropped", kind.title()),
                _ => {}
            }
            set_snapshot.set(c.snapshot());
            set_pending.update(|n| *n = n.saturating_sub(1));
        });
    };

    on_cleanup(move || {
        controller.try_with_value(|c| c.cancel());
    });

    dispatch(ListOp::Page(1));

    let busy = move || pending.get() > 0;

    let on_scroll = move |ev: web_sys::Event| {
        let el = event_target::<web_sys::Element>(&ev);
        let remaining = el.scroll_height() - el.scroll_top() - el.client_height();
        if remaining < LOAD_MORE_THRESHOLD && snapshot.with(|s| s.has_more) && !busy() {
            dispatch(ListOp::LoadMore);
        }
    };

    let submit_simple = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        dispatch(ListOp::Submit(None, simple_text.get()));
    };

    let submit_combined = move |_| {
        let queries = field_text.with(|m| m.iter().map(|(f, q)| (*f, q.clone())).collect());
        dispatch(ListOp::Combined(queries));
    };

    let reset = move |_| {
        set_simple_text.set(String::new());
        field_text.set(BTreeMap::new());
        dispatch(ListOp::Reset);
    };

    let switch_mode = move |mode: SearchMode| {
        if snapshot.with(|s| s.mode) == mode { return; }
        set_simple_text.set(String::new());
        field_text.set(BTreeMap::new());
        dispatch(ListOp::Mode(mode));
    };

    let open = move |record: Record| ctx.navigate(kind.detail_screen(record));

    view! {
        <div class="listing-screen">
            <TitleBar
                title=kind.title()
                subtitle=Signal::derive(move || snapshot.with(|s| format!("{} records", s.records.len())))
            />

            <Show when=move || has_advanced>
                <div class="mode-toggle">
                    <button
                        class=move || if snapshot.with(|s| s.mode == SearchMode::Simple) { "type-btn active" } else { "type-btn" }
                        on:click=move |_| switch_mode(SearchMode::Simple)
                    >"Simple"</button>
                    <button
                        class=move || if snapshot.with(|s| s.mode == SearchMode::Advanced) { "type-btn active" } else { "type-btn" }
                        on:click=move |_| switch_mode(SearchMode::Advanced)
                    >"Advanced"</button>
                </div>
            </Show>

            {move || if snapshot.with(|s| s.mode) == SearchMode::Advanced {
                let fields = spec_fields.clone();
                view! {
                    <div class="advanced-search">
                        {fields.into_iter().map(|(name, label)| {
                            let submit_field = move |ev: web_sys::SubmitEvent| {
                                ev.prevent_default();
                                let query = field_text.with(|m| m.get(name).cloned().unwrap_or_default());
                                dispatch(ListOp::Submit(Some(name), query));
                            };
                            let clear_field = move |_| {
                                field_text.update(|m| { m.remove(name); });
                                dispatch(ListOp::ClearField(name));
                            };
                            view! {
                                <form class="search-row" on:submit=submit_field>
                                    <input
                                        type="text"
                                        placeholder=label
                                        prop:value=move || field_text.with(|m| m.get(name).cloned().unwrap_or_default())
                                        on:input=move |ev| {
                                            let value = event_target_value(&ev);
                                            field_text.update(|m| { m.insert(name, value); });
                                        }
                                    />
                                    <button
                                        type="button"
                                        class="clear-btn"
                                        title="Clear"
                                        prop:hidden=move || {
                                            field_text.with(|m| m.get(name).map_or(true, |q| q.is_empty()))
                                                && snapshot.with(|s| !s.field_queries.contains_key(name))
                                        }
                                        on:click=clear_field
                                    >"×"</button>
                                    <button type="submit">"Search"</button>
                                </form>
                            }
                        }).collect_view()}
                        <button class="primary-btn" on:click=submit_combined>"Combined Search"</button>
                    </div>
                }.into_any()
            } else {
                view! {
                    <form class="search-row" on:submit=submit_simple>
                        <input
                            type="text"
                            placeholder="Search..."
                            prop:value=move || simple_text.get()
                            on:input=move |ev| set_simple_text.set(event_target_value(&ev))
                        />
                        <button type="submit">"Search"</button>
                    </form>
                }.into_any()
            }}

            <Show when=move || snapshot.with(|s| s.search_performed)>
                <div class="active-search">
                    <span>
                        {move || snapshot.with(|s| {
                            let mut parts: Vec<String> = s.field_queries.iter().map(|(f, q)| format!("{}: {}", f, q)).collect();
                            if !s.simple_query.is_empty() {
                                parts.insert(0, s.simple_query.clone());
                            }
                            parts.join(", ")
                        })}
                    </span>
                    <button class="reset-btn" on:click=reset>"Reset Search"</button>
                </div>
            </Show>

            {move || snapshot.with(|s| s.error.clone()).map(|e| view! { <p class="error-banner">{e}</p> })}

            <div class="record-list" on:scroll=on_scroll>
                {move || snapshot.with(|s| {
                    s.records.iter().cloned().map(|record| {
                        let (label, value, badge) = kind.card_heading(&record);
                        let rows = kind.card_rows(&record);
                        view! {
                            <div class="record-card" on:click=move |_| open(record.clone())>
                                <div class="card-header">
                                    <span class="card-id">{label} ": " {value}</span>
                                    <span class="card-badge">{badge}</span>
                                </div>
                                {rows.into_iter().map(|(l, v)| view! {
                                    <div class="card-row">
                                        <span class="card-label">{l}</span>
                                        <span class="card-value">{v}</span>
                                    </div>
                                }).collect_view()}
                                <span class="view-details">"View Details"</span>
                            </div>
                        }
                    }).collect_view()
                })}

                <Show when=move || !busy() && snapshot.with(|s| s.records.is_empty())>
                    <div class="empty-state">
                        <p>{kind.empty_text()}</p>
                        <button on:click=reset>"Refresh"</button>
                    </div>
                </Show>

                {move || if busy() {
                    view! { <p class="loading">"Loading..."</p> }.into_any()
                } else if snapshot.with(|s| s.has_more) {
                    view! {
                        <button class="load-more-btn" on:click=move |_| dispatch(ListOp::LoadMore)>"Load More"</button>
                    }.into_any()
                } else {
                    ().into_any()
                }}
            </div>
        </div>
    }
}
