//! Analyst reservation table with revenue total and raw CSV export.
//!
//! SYSTEM CONTEXT
//! ==============
//! Both analyst pages load the report through [`report_resource`]; the table
//! shows the CSV headers verbatim and a blank cell where a row was short.

#[cfg(test)]
#[path = "analyst_table_test.rs"]
mod analyst_table_test;

use booking::model::format_money;
use booking::report::{REPORT_FILE_NAME, Report, fetch_report};
use booking::{BookingError, Capability};
use leptos::prelude::*;

use crate::components::guard::RequireCapability;
use crate::net::api::GlooApi;
use crate::state::app::AppState;
use crate::util::download;

/// Report download tied to the current session.
pub fn report_resource(app: AppState) -> LocalResource<Result<Report, BookingError>> {
    LocalResource::new(move || {
        let session = app.session.get();
        async move { fetch_report(&GlooApi::from_config(), &session).await }
    })
}

/// Cells of every record in header order.
fn table_rows(report: &Report) -> Vec<Vec<String>> {
    report
        .records()
        .iter()
        .map(|record| {
            report
                .headers()
                .iter()
                .map(|h| record.get(h).unwrap_or_default().to_owned())
                .collect()
        })
        .collect()
}

#[component]
pub fn AnalystTablePage(app: AppState) -> impl IntoView {
    view! {
        <RequireCapability app capability=Capability::ViewReports>
            <ReportTable app/>
        </RequireCapability>
    }
}

#[component]
fn ReportTable(app: AppState) -> impl IntoView {
    let report = report_resource(app);

    view! {
        <section class="page page--analyst">
            <header class="page__header">
                <h1>"Reservations report"</h1>
                <a class="btn" href="/analyst/charts">"Charts"</a>
            </header>
            <Suspense fallback=move || view! { <p class="page__loading">"Loading report..."</p> }>
                {move || {
                    report.get().map(|loaded| match loaded {
                        Ok(report) => view! { <ReportView app report/> }.into_any(),
                        Err(err) => {
                            log::warn!("report load failed: {err}");
                            view! { <p class="page__error">{err.user_message()}</p> }.into_any()
                        }
                    })
                }}
            </Suspense>
        </section>
    }
}

#[component]
fn ReportView(app: AppState, report: Report) -> impl IntoView {
    let total = format_money(report.revenue_total());
    let count = report.records().len();
    let rows = table_rows(&report);
    let headers = report.headers().to_vec();
    let raw = report.raw().to_owned();

    let export = move |_| {
        if let Err(err) = download::download_text(REPORT_FILE_NAME, "text/csv", &raw) {
            log::warn!("report export failed: {err}");
            app.fail(&BookingError::Report(err));
        }
    };

    view! {
        <div class="report__totals">
            <span>{format!("{count} reservations")}</span>
            <span>"Revenue: "{total}</span>
            <button class="btn btn--primary" on:click=export>"Export CSV"</button>
        </div>
        <Show when=move || { count > 0 } fallback=|| view! { <p class="page__empty">"The report is empty."</p> }>
            <div class="table-scroll">
                <table class="table">
                    <thead>
                        <tr>{headers.iter().map(|h| view! { <th>{h.clone()}</th> }).collect_view()}</tr>
                    </thead>
                    <tbody>
                        {rows
                            .iter()
                            .map(|row| view! { <tr>{row.iter().map(|cell| view! { <td>{cell.clone()}</td> }).collect_view()}</tr> })
                            .collect_view()}
                    </tbody>
                </table>
            </div>
        </Show>
    }
}
