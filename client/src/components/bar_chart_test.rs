use super::*;

fn series(values: &[(&str, f64)]) -> Vec<(String, f64)> {
    values.iter().map(|(l, v)| ((*l).to_owned(), *v)).collect()
}

#[test]
fn largest_bar_spans_full_width() {
    let bars = bar_layout(&series(&[("simple", 2.0), ("suite", 8.0)]), |v| format!("{v}"));
    assert!((bars[0].percent - 25.0).abs() < 1e-9);
    assert!((bars[1].percent - 100.0).abs() < 1e-9);
    assert_eq!(bars[1].display, "8");
}

#[test]
fn all_zero_series_has_empty_bars() {
    let bars = bar_layout(&series(&[("a", 0.0), ("b", 0.0)]), |v| format!("{v}"));
    assert!(bars.iter().all(|b| b.percent.abs() < f64::EPSILON));
}

#[test]
fn order_is_preserved() {
    let bars = bar_layout(&series(&[("2025-02", 1.0), ("2025-01", 3.0)]), |v| format!("{v}"));
    let labels: Vec<_> = bars.iter().map(|b| b.label.as_str()).collect();
    assert_eq!(labels, ["2025-02", "2025-01"]);
}
