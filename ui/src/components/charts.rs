use dioxus::prelude::*;

use crate::context::use_dashboard;
use crate::core::chart::{bubble_radius, scale_linear, scatter_bounds, LinePlot, SeriesPath};
use crate::core::format::format_rating;
use crate::pages::{BarPanel, LinePanel, ScatterPanel};

/// Horizontal rating bars; widths are shares of the chart's domain.
#[component]
pub fn BarChartView(panel: BarPanel, empty_label: String) -> Element {
    let locale = (use_dashboard().locale)();

    if panel.chart.is_empty() {
        return rsx! {
            p { class: "chart-empty", "{empty_label}" }
        };
    }

    let rows: Vec<(String, String, f64)> = panel
        .chart
        .bars
        .iter()
        .map(|bar| {
            (
                bar.label.clone(),
                format_rating(Some(bar.value), locale),
                panel.chart.fraction(bar.value) * 100.0,
            )
        })
        .collect();

    rsx! {
        ul { class: "bar-chart",
            for (index, (label, value, width)) in rows.into_iter().enumerate() {
                li {
                    key: "{index}",
                    class: "bar-chart__row",
                    title: "{panel.value_label}: {value}",
                    span { class: "bar-chart__label", "{label}" }
                    span { class: "bar-chart__track",
                        span { class: "bar-chart__bar", style: "width: {width:.1}%" }
                    }
                    span { class: "bar-chart__value", "{value}" }
                }
            }
        }
    }
}

/// SVG line chart over a pivot table. Missing values break a series' line.
#[component]
pub fn LineChartView(panel: LinePanel, empty_label: String) -> Element {
    if panel.table.rows.is_empty() || panel.table.series.is_empty() {
        return rsx! {
            p { class: "chart-empty", "{empty_label}" }
        };
    }

    let plot = LinePlot::default();
    let paths = plot.paths(&panel.table, panel.domain);
    let x_ticks = plot.ticks(&panel.table);
    let left = plot.padding;
    let right = plot.width - plot.padding;
    let tick_x = plot.padding - 4.0;
    let label_y = plot.height - plot.padding + 16.0;
    let y_ticks: Vec<(f64, String)> = panel
        .value_ticks
        .iter()
        .map(|(value, label)| (plot.y(*value, panel.domain), label.clone()))
        .collect();
    // Label every other year once the axis gets crowded.
    let stride = if x_ticks.len() > 12 { 2 } else { 1 };

    rsx! {
        div { class: "line-chart",
            svg {
                class: "line-chart__plot",
                view_box: "0 0 {plot.width} {plot.height}",
                preserve_aspect_ratio: "none",
                "role": "img",
                "aria-label": "{panel.text.title}",

                g { class: "line-chart__grid",
                    for (index, (y, label)) in y_ticks.iter().enumerate() {
                        g { key: "y{index}",
                            line { x1: "{left}", x2: "{right}", y1: "{y:.1}", y2: "{y:.1}" }
                            text { class: "line-chart__tick line-chart__tick--y", x: "{tick_x}", y: "{y:.1}", "{label}" }
                        }
                    }
                }
                g { class: "line-chart__axis",
                    for (index, (x, label)) in x_ticks.iter().enumerate() {
                        if index % stride == 0 {
                            text {
                                key: "x{index}",
                                class: "line-chart__tick line-chart__tick--x",
                                x: "{x:.1}",
                                y: "{label_y}",
                                "{label}"
                            }
                        }
                    }
                }
                for (series_index, path) in paths.iter().enumerate() {
                    g {
                        key: "{path.name}",
                        class: series_class(series_index, path.primary),
                        for (segment, polyline) in path.polylines.iter().enumerate() {
                            polyline {
                                key: "{segment}",
                                fill: "none",
                                points: SeriesPath::points_attr(polyline),
                            }
                        }
                    }
                }
            }
            ul { class: "line-chart__legend",
                for (series_index, path) in paths.iter().enumerate() {
                    li { key: "{path.name}", class: series_class(series_index, path.primary),
                        span { class: "line-chart__swatch", aria_hidden: "true" }
                        "{path.name}"
                    }
                }
            }
        }
    }
}

fn series_class(index: usize, primary: bool) -> String {
    let mut class = format!("line-chart__series line-chart__series--{}", index % 6);
    if primary {
        class.push_str(" line-chart__series--primary");
    }
    class
}

/// Bubble scatter; radius grows with each point's weight.
#[component]
pub fn ScatterView(panel: ScatterPanel, empty_label: String) -> Element {
    let Some((x_domain, y_domain)) = scatter_bounds(&panel.points) else {
        return rsx! {
            p { class: "chart-empty", "{empty_label}" }
        };
    };

    let plot = LinePlot::default();
    let x_range = (plot.padding, plot.width - plot.padding);
    let y_range = (plot.height - plot.padding, plot.padding);
    let max_weight = panel
        .points
        .iter()
        .map(|p| p.weight)
        .filter(|w| w.is_finite())
        .fold(0.0_f64, f64::max);
    let axis_x = plot.width / 2.0;
    let axis_y = plot.height - 4.0;
    let mid_y = plot.height / 2.0;
    let bubbles: Vec<(String, f64, f64, f64)> = panel
        .points
        .iter()
        .filter(|p| p.x.is_finite() && p.y.is_finite())
        .map(|p| {
            (
                p.label.clone(),
                scale_linear(p.x, x_domain, x_range),
                scale_linear(p.y, y_domain, y_range),
                bubble_radius(p.weight, max_weight),
            )
        })
        .collect();

    rsx! {
        div { class: "scatter",
            svg {
                class: "scatter__plot",
                view_box: "0 0 {plot.width} {plot.height}",
                "role": "img",
                "aria-label": "{panel.text.title}",
                for (index, (label, cx, cy, r)) in bubbles.iter().enumerate() {
                    circle {
                        key: "{index}",
                        class: "scatter__point",
                        cx: "{cx:.1}",
                        cy: "{cy:.1}",
                        r: "{r:.1}",
                        title { "{label}" }
                    }
                }
                text { class: "scatter__axis scatter__axis--x", x: "{axis_x}", y: "{axis_y}", "{panel.x_label}" }
                text {
                    class: "scatter__axis scatter__axis--y",
                    x: "12",
                    y: "{mid_y}",
                    transform: "rotate(-90 12 {mid_y})",
                    "{panel.y_label}"
                }
            }
        }
    }
}
