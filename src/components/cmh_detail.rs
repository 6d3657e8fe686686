//! Chassis Detail Component
//!
//! Movements, sales orders, quotations and files load in parallel, each
//! into its own slot; whichever answers first renders first.

use chassis_core::controller::{ChassisDetail, ChassisTab, ScreenLifetime, Slot, CHASSIS_FIELDS};
use chassis_core::domain::format::format_date;
use chassis_core::repository::{DocumentKind, CHILD_COLLECTIONS};
use chassis_core::Record;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::components::{detail_rows, FieldTable, TabBar, TitleBar};
use crate::context::use_app_context;
use crate::models::Screen;

fn date_cell(record: &Record, key: &str) -> String {
    record
        .get(key)
        .and_then(format_date)
        .unwrap_or_else(|| record.display(key))
}

fn generate_pdf(kind: DocumentKind, id: String) {
    spawn_local(async move {
        match commands::generate_document(kind, &id).await {
            Ok(url) => commands::open_in_new_tab(&url),
            Err(message) => commands::alert(&message),
        }
    });
}

/// Loading / failed / empty / rows
fn slot_view(
    slot: &Slot<Vec<Record>>,
    empty_text: &'static str,
    rows: impl FnOnce(&[Record]) -> AnyView,
) -> AnyView {
    match slot {
        Slot::Loading => view! { <p class="loading">"Loading..."</p> }.into_any(),
        Slot::Failed(message) => view! { <p class="error-banner">{message.clone()}</p> }.into_any(),
        Slot::Loaded(records) if records.is_empty() => view! { <p class="no-data">{empty_text}</p> }.into_any(),
        Slot::Loaded(records) => rows(records),
    }
}

#[component]
pub fn CmhDetail(chassis: Record) -> impl IntoView {
    let ctx = use_app_context();
    let detail = RwSignal::new(ChassisDetail::new(chassis.clone()));
    let (active, set_active) = signal(0usize);

    let lifetime = ScreenLifetime::new();
    let guard = StoredValue::new_local(lifetime.clone());
    on_cleanup(move || {
        guard.try_with_value(|l| l.end());
    });

    match detail.with_untracked(ChassisDetail::stock_id) {
        Some(stock_id) => {
            for collection in CHILD_COLLECTIONS {
                let lifetime = lifetime.clone();
                let stock_id = stock_id.clone();
                spawn_local(async move {
                    let result = commands::list_children(collection, &stock_id).await;
                    if lifetime.is_alive() {
                        detail.update(|d| d.apply(collection, result));
                    }
                });
            }
        }
        None => {
            log::warn!("Chassis record has no stock_id");
            for collection in CHILD_COLLECTIONS {
                detail.update(|d| d.apply(collection, Ok::<_, String>(Vec::new())));
            }
        }
    }

    let open = move |screen: Screen| ctx.navigate(screen);
    let labels = ChassisTab::ALL.iter().map(ChassisTab::label).collect();
    let title = chassis.text("stock_id").unwrap_or_else(|| "Chassis".to_string());

    let chassis_tab = move || {
        let record = detail.with(|d| d.chassis.clone());
        let rows = detail_rows(&record, &CHASSIS_FIELDS);
        view! {
            <section class="detail-section">
                <h2 class="section-title">"Chassis Details"</h2>
                <FieldTable rows=rows />
                <button class="secondary-btn" on:click=move |_| open(Screen::RecordDetail {
                    title: "Chassis Item".to_string(),
                    record: record.clone(),
                })>
                    "All Fields"
                </button>
            </section>
        }
        .into_any()
    };

    let history_tab = move || {
        let movements = detail.with(|d| {
            slot_view(&d.movements, "No Movement Records", |rows| {
                let rows = rows.to_vec();
                view! {
                    <table class="data-table">
                        <thead>
                            <tr>
                                <th>"Date"</th>
                                <th>"Location"</th>
                                <th>"Info1"</th>
                                <th>"Info2"</th>
                                <th>"CreateBy"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {rows.into_iter().map(|m| view! {
                                <tr>
                                    <td>{date_cell(&m, "ddate")}</td>
                                    <td>{m.display("location")}</td>
                                    <td>{m.display("info1")}</td>
                                    <td>{m.display("info2")}</td>
                                    <td>{m.display("createby")}</td>
                                </tr>
                            }).collect_view()}
                        </tbody>
                    </table>
                }
                .into_any()
            })
        });

        let quotations = detail.with(|d| {
            slot_view(&d.quotations, "No data", |rows| {
                rows.iter()
                    .map(|q| {
                        let id = q.display("quot_id");
                        let date = if q.has("valid_fr") { date_cell(q, "valid_fr") } else { date_cell(q, "ddate") };
                        let target = id.clone();
                        view! {
                            <button class="doc-row" on:click=move |_| generate_pdf(DocumentKind::Quotation, target.clone())>
                                <span class="doc-id">{id}</span>
                                <span class="doc-date">{date}</span>
                            </button>
                        }
                    })
                    .collect_view()
                    .into_any()
            })
        });

        let sales_orders = detail.with(|d| {
            slot_view(&d.sales_orders, "No data", |rows| {
                rows.iter()
                    .cloned()
                    .map(|so| {
                        let id = so.display("so_id");
                        let date = date_cell(&so, "ddate");
                        let target = id.clone();
                        view! {
                            <div class="doc-row">
                                <button class="doc-link" on:click=move |_| generate_pdf(DocumentKind::SalesOrder, target.clone())>
                                    <span class="doc-id">{id}</span>
                                    <span class="doc-date">{date}</span>
                                </button>
                                <button class="secondary-btn" on:click=move |_| open(Screen::RecordDetail {
                                    title: "Sales Order".to_string(),
                                    record: so.clone(),
                                })>
                                    "Details"
                                </button>
                            </div>
                        }
                    })
                    .collect_view()
                    .into_any()
            })
        });

        view! {
            <section class="detail-section">
                <h2 class="section-title">"Movement Records"</h2>
                {movements}
            </section>
            <section class="detail-section">
                <h2 class="section-title">"Quot"</h2>
                {quotations}
            </section>
            <section class="detail-section">
                <h2 class="section-title">"SO"</h2>
                {sales_orders}
            </section>
        }
        .into_any()
    };

    let picture_tab = move || {
        let config = commands::config();
        detail.with(|d| {
            let attachments = d.attachments(&config);
            let files = slot_view(&d.files, "No documentation files available", |_| {
                attachments
                    .into_iter()
                    .map(|file| {
                        let stored = file.stored_path.clone();
                        let name = file.name.clone();
                        let url = file.url.clone();
                        if file.is_pdf {
                            view! {
                                <button class="file-row pdf" on:click=move |_| commands::open_in_new_tab(&url)>
                                    <span class="file-name">{name}</span>
                                    <span class="file-path">{stored}</span>
                                </button>
                            }
                            .into_any()
                        } else {
                            view! {
                                <button class="file-row image" on:click=move |_| open(Screen::FileViewer(file.clone()))>
                                    <img class="file-thumb" src=url alt=name />
                                    <span class="file-path">{stored}</span>
                                </button>
                            }
                            .into_any()
                        }
                    })
                    .collect_view()
                    .into_any()
            });
            view! {
                <section class="detail-section">
                    <h2 class="section-title">"Documentation file"</h2>
                    {files}
                </section>
            }
            .into_any()
        })
    };

    view! {
        <div class="detail-screen">
            <TitleBar title=title subtitle=chassis.display("mgroup_id") />
            <TabBar labels=labels active=active set_active=set_active />
            {move || match ChassisTab::ALL[active.get()] {
                ChassisTab::Chassis => chassis_tab(),
                ChassisTab::History => history_tab(),
                ChassisTab::Picture => picture_tab(),
            }}
        </div>
    }
}
