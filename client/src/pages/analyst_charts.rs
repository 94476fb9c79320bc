//! Analyst charts: reservations and revenue per room type, revenue per month.

#[cfg(test)]
#[path = "analyst_charts_test.rs"]
mod analyst_charts_test;

use booking::Capability;
use booking::model::format_money;
use booking::report::ReportSummary;
use leptos::prelude::*;

use crate::components::bar_chart::{BarChart, bar_layout};
use crate::components::guard::RequireCapability;
use crate::pages::analyst_table::report_resource;
use crate::state::app::AppState;

#[allow(clippy::cast_precision_loss)]
fn count_series(summary: &ReportSummary) -> Vec<(String, f64)> {
    summary.count_by_type.iter().map(|(k, v)| (k.clone(), *v as f64)).collect()
}

fn money_series(values: &std::collections::BTreeMap<String, f64>) -> Vec<(String, f64)> {
    values.iter().map(|(k, v)| (k.clone(), *v)).collect()
}

/// Average revenue per reservation for each room type.
fn average_series(summary: &ReportSummary) -> Vec<(String, f64)> {
    summary
        .count_by_type
        .keys()
        .filter_map(|t| summary.average_for(t).map(|avg| (t.clone(), avg)))
        .collect()
}

#[component]
pub fn AnalystChartsPage(app: AppState) -> impl IntoView {
    view! {
        <RequireCapability app capability=Capability::ViewReports>
            <Charts app/>
        </RequireCapability>
    }
}

#[component]
fn Charts(app: AppState) -> impl IntoView {
    let report = report_resource(app);

    view! {
        <section class="page page--charts">
            <header class="page__header">
                <h1>"Reservation charts"</h1>
                <a class="btn" href="/analyst">"Table"</a>
            </header>
            <Suspense fallback=move || view! { <p class="page__loading">"Loading report..."</p> }>
                {move || {
                    report.get().map(|loaded| match loaded {
                        Ok(report) => {
                            let summary = report.summary();
                            let count = |v: f64| format!("{v:.0}");
                            view! {
                                <p class="report__totals">
                                    {format!("{} reservations · revenue {}", summary.reservations, format_money(summary.revenue))}
                                </p>
                                <div class="chart-grid">
                                    <BarChart title="Reservations by room type" bars=bar_layout(&count_series(&summary), count)/>
                                    <BarChart
                                        title="Revenue by room type"
                                        bars=bar_layout(&money_series(&summary.revenue_by_type), format_money)
                                    />
                                    <BarChart
                                        title="Average revenue per reservation"
                                        bars=bar_layout(&average_series(&summary), format_money)
                                    />
                                    <BarChart
                                        title="Revenue by month"
                                        bars=bar_layout(&money_series(&summary.revenue_by_month), format_money)
                                    />
                                </div>
                            }
                            .into_any()
                        }
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
