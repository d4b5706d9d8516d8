//! Chart Components
//!
//! Mood trend line chart and mood summary pie, drawn on HTML5 Canvas.

use leptos::*;
use std::f64::consts::PI;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::api::{MoodSummary, TrendPoint};

/// Y axis bounds of the trend chart
pub const SCORE_AXIS: (f64, f64) = (0.0, 10.0);

const LINE_COLOR: &str = "#8884d8";

/// Positive, negative, neutral
pub const SUMMARY_COLORS: [&str; 3] = ["#4CAF50", "#F44336", "#FFC107"];

/// Daily average mood over time
#[component]
pub fn TrendChart(
    #[prop(into)]
    points: Signal<Vec<TrendPoint>>,
) -> impl IntoView {
    let canvas_ref = create_node_ref::<html::Canvas>();

    create_effect(move |_| {
        let points = points.get();
        if let Some(canvas) = canvas_ref.get() {
            draw_trend(&canvas, &points);
        }
    });

    view! {
        <div class="relative">
            <canvas
                node_ref=canvas_ref
                width="600"
                height="300"
                class="w-full h-64 md:h-80"
            />
            <div class="flex justify-center items-center space-x-2 mt-2">
                <div class="w-3 h-3 rounded-full" style=format!("background-color: {}", LINE_COLOR) />
                <span class="text-sm text-gray-600">"average_score"</span>
            </div>
        </div>
    }
}

/// Share of positive, negative and neutral entries
#[component]
pub fn SummaryPie(
    summary: MoodSummary,
) -> impl IntoView {
    let canvas_ref = create_node_ref::<html::Canvas>();

    create_effect(move |_| {
        if let Some(canvas) = canvas_ref.get() {
            draw_pie(&canvas, &summary);
        }
    });

    view! {
        <div class="flex flex-col md:flex-row items-center md:space-x-8">
            <canvas node_ref=canvas_ref width="300" height="300" class="w-64 h-64" />
            <ul class="space-y-2 mt-4 md:mt-0">
                {summary.slices().into_iter().zip(SUMMARY_COLORS).map(|((label, count), color)| view! {
                    <li class="flex items-center space-x-2">
                        <div class="w-3 h-3 rounded-full" style=format!("background-color: {}", color) />
                        <span class="text-gray-700">{format!("{}: {}", label, count)}</span>
                    </li>
                }).collect_view()}
            </ul>
        </div>
    }
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()?
        .dyn_into::<CanvasRenderingContext2d>()
        .ok()
}

/// Canvas y for a score, with the axis fixed to 0..=10
fn score_to_y(score: f64, top: f64, height: f64) -> f64 {
    let (min, max) = SCORE_AXIS;
    let clamped = score.clamp(min, max);
    top + ((max - clamped) / (max - min)) * height
}

/// Canvas x for the i-th of `count` evenly spaced points
fn index_to_x(index: usize, count: usize, left: f64, width: f64) -> f64 {
    if count <= 1 {
        left + width / 2.0
    } else {
        left + (index as f64 / (count - 1) as f64) * width
    }
}

fn draw_trend(canvas: &HtmlCanvasElement, points: &[TrendPoint]) {
    let Some(ctx) = context_2d(canvas) else {
        return;
    };

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;

    let margin_left = 40.0;
    let margin_right = 20.0;
    let margin_top = 20.0;
    let margin_bottom = 40.0;

    let chart_width = width - margin_left - margin_right;
    let chart_height = height - margin_top - margin_bottom;

    ctx.set_fill_style(&"#ffffff".into());
    ctx.fill_rect(0.0, 0.0, width, height);

    // Dashed grid, one line every two points of score
    ctx.set_stroke_style(&"#e5e7eb".into());
    ctx.set_line_width(1.0);
    let dash = js_sys::Array::of2(&3.0.into(), &3.0.into());
    let _ = ctx.set_line_dash(&dash);

    ctx.set_fill_style(&"#6b7280".into());
    ctx.set_font("12px sans-serif");
    for step in 0..=5 {
        let score = step as f64 * 2.0;
        let y = score_to_y(score, margin_top, chart_height);
        ctx.begin_path();
        ctx.move_to(margin_left, y);
        ctx.line_to(width - margin_right, y);
        ctx.stroke();
        let _ = ctx.fill_text(&format!("{}", score), 10.0, y + 4.0);
    }
    let _ = ctx.set_line_dash(&js_sys::Array::new());

    if points.is_empty() {
        return;
    }

    ctx.set_stroke_style(&LINE_COLOR.into());
    ctx.set_line_width(2.0);
    ctx.begin_path();
    for (i, point) in points.iter().enumerate() {
        let x = index_to_x(i, points.len(), margin_left, chart_width);
        let y = score_to_y(point.average_score, margin_top, chart_height);
        if i == 0 {
            ctx.move_to(x, y);
        } else {
            ctx.line_to(x, y);
        }
    }
    ctx.stroke();

    ctx.set_fill_style(&LINE_COLOR.into());
    for (i, point) in points.iter().enumerate() {
        let x = index_to_x(i, points.len(), margin_left, chart_width);
        let y = score_to_y(point.average_score, margin_top, chart_height);
        ctx.begin_path();
        let _ = ctx.arc(x, y, 3.0, 0.0, PI * 2.0);
        ctx.fill();
    }

    // Date labels, thinned so they never overlap
    ctx.set_fill_style(&"#6b7280".into());
    let every = (points.len() / 6).max(1);
    for (i, point) in points.iter().enumerate().step_by(every) {
        let x = index_to_x(i, points.len(), margin_left, chart_width);
        let _ = ctx.fill_text(&point.date, x - 30.0, height - 12.0);
    }
}

/// Start and end angle of each slice, starting at twelve o'clock
fn slice_angles(summary: &MoodSummary) -> Vec<(f64, f64)> {
    let total = summary.total() as f64;
    let mut start = -PI / 2.0;

    summary
        .slices()
        .iter()
        .map(|(_, count)| {
            let sweep = if total > 0.0 { *count as f64 / total * PI * 2.0 } else { 0.0 };
            let slice = (start, start + sweep);
            start += sweep;
            slice
        })
        .collect()
}

fn draw_pie(canvas: &HtmlCanvasElement, summary: &MoodSummary) {
    let Some(ctx) = context_2d(canvas) else {
        return;
    };

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;
    let (cx, cy) = (width / 2.0, height / 2.0);
    let radius = (width.min(height) / 2.0 - 10.0).max(0.0);

    ctx.clear_rect(0.0, 0.0, width, height);

    if summary.total() == 0 {
        ctx.set_stroke_style(&"#d1d5db".into());
        ctx.begin_path();
        let _ = ctx.arc(cx, cy, radius, 0.0, PI * 2.0);
        ctx.stroke();
        return;
    }

    for ((start, end), color) in slice_angles(summary).into_iter().zip(SUMMARY_COLORS) {
        if end <= start {
            continue;
        }
        ctx.set_fill_style(&color.into());
        ctx.begin_path();
        ctx.move_to(cx, cy);
        let _ = ctx.arc(cx, cy, radius, start, end);
        ctx.close_path();
        ctx.fill();
    }
}
