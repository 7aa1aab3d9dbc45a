use std::f64::consts::PI;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use yew::prelude::*;

use super::wheel_utils::Rgb;

#[derive(Properties, PartialEq)]
pub struct WheelCanvasProps {
    pub items: Vec<String>,
    pub colors: Vec<Rgb>,
    pub rotation: f64,
}

fn to_rad(deg: f64) -> f64 {
    deg * (PI / 180.0)
}

fn draw(canvas: &HtmlCanvasElement, items: &[String], colors: &[Rgb], rotation: f64) {
    let context = match canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
    {
        Some(context) => context,
        None => return,
    };

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;
    let center_x = width / 2.0;
    let center_y = height / 2.0;
    // Leave room below the disc for the indicator triangle.
    let radius = width / 2.0 - 30.0;

    context.clear_rect(0.0, 0.0, width, height);

    if items.is_empty() {
        context.set_font("20px Arial");
        context.set_text_align("center");
        context.set_fill_style_str("#000");
        let _ = context.fill_text("Add names to spin!", center_x, center_y);
        return;
    }

    // Backing disc.
    context.begin_path();
    context.set_fill_style_str("#212121");
    let _ = context.arc(center_x, center_y, radius, 0.0, 2.0 * PI);
    context.fill();

    let step = 360.0 / items.len() as f64;
    let mut start_deg = rotation.rem_euclid(360.0);

    for (i, label) in items.iter().enumerate() {
        let end_deg = start_deg + step;
        let color = colors.get(i).copied().unwrap_or_default();

        context.begin_path();
        context.move_to(center_x, center_y);
        let _ = context.arc(
            center_x,
            center_y,
            radius - 5.0,
            to_rad(start_deg),
            to_rad(end_deg),
        );
        context.close_path();
        context.set_fill_style_str(&color.css());
        context.fill();

        context.save();
        let _ = context.translate(center_x, center_y);
        let _ = context.rotate(to_rad((start_deg + end_deg) / 2.0));
        context.set_fill_style_str(if color.is_bright() { "#000" } else { "#fff" });
        context.set_font("bold 18px sans-serif");
        context.set_text_align("center");
        let _ = context.fill_text(label, radius / 2.0, 8.0);
        context.restore();

        start_deg += step;
    }

    // Indicator triangle at 270 degrees, the bottom of the disc.
    context.begin_path();
    context.move_to(center_x, center_y + radius);
    context.line_to(center_x - 10.0, center_y + radius + 20.0);
    context.line_to(center_x + 10.0, center_y + radius + 20.0);
    context.close_path();
    context.set_fill_style_str("#FF0000");
    context.fill();
}

#[function_component(WheelCanvas)]
pub fn wheel_canvas(props: &WheelCanvasProps) -> Html {
    let canvas_ref = use_node_ref();

    {
        let canvas_ref = canvas_ref.clone();
        let items = props.items.clone();
        let colors = props.colors.clone();
        let rotation = props.rotation;

        use_effect_with((items, colors, rotation), move |(items, colors, rotation)| {
            if let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() {
                draw(&canvas, items, colors, *rotation);
            }
            || ()
        });
    }

    html! {
        <canvas
            ref={canvas_ref}
            width="450"
            height="450"
            class="w-full max-w-[450px] h-auto"
        />
    }
}
