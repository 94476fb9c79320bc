//! Horizontal bar chart rendered with plain elements.

#[cfg(test)]
#[path = "bar_chart_test.rs"]
mod bar_chart_test;

use leptos::prelude::*;

/// One bar: label, raw value, formatted value, and width as a percentage of
/// the largest bar.
#[derive(Clone, Debug, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    pub display: String,
    pub percent: f64,
}

/// Scale `series` so the largest value spans the full width.
pub fn bar_layout<F>(series: &[(String, f64)], format: F) -> Vec<Bar>
where
    F: Fn(f64) -> String,
{
    let max = series.iter().map(|(_, v)| *v).fold(0.0_f64, f64::max);
    series
        .iter()
        .map(|(label, value)| Bar {
            label: label.clone(),
            value: *value,
            display: format(*value),
            percent: if max > 0.0 { (value / max * 100.0).clamp(0.0, 100.0) } else { 0.0 },
        })
        .collect()
}

#[component]
pub fn BarChart(title: &'static str, bars: Vec<Bar>) -> impl IntoView {
    let empty = bars.is_empty();
    view! {
        <figure class="chart">
            <figcaption class="chart__title">{title}</figcaption>
            <Show when=move || empty>
                <p class="chart__empty">"No data"</p>
            </Show>
            <ul class="chart__bars">
                {bars
                    .into_iter()
                    .map(|bar| {
                        view! {
                            <li class="chart__row">
                                <span class="chart__label">{bar.label}</span>
                                <span class="chart__track">
                                    <span class="chart__bar" style=format!("width: {:.1}%", bar.percent)></span>
                                </span>
                                <span class="chart__value">{bar.display}</span>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
        </figure>
    }
}
