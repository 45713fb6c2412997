use std::f64::consts::PI;

use shared::catalog::Slice;
use shared::shared_wheel_game::POINTER_ANGLE;
use wasm_bindgen::JsCast;
use web_sys::{window, CanvasRenderingContext2d, HtmlCanvasElement};
use yew::prelude::*;

const CANVAS_SIZE: u32 = 450;

#[derive(Properties, PartialEq)]
pub struct WheelCanvasProps {
    pub slices: Vec<Slice>,
    pub rotation: f64,
    pub is_spinning: bool,
}

/// Glyph drawn next to a slice label. Unknown icon names get a plain dot.
pub fn icon_glyph(icon: &str) -> &'static str {
    match icon {
        "Mountain" => "⛰",
        "Trees" => "🌲",
        "Waves" => "🌊",
        "Flower" => "🌷",
        "Tent" => "⛺",
        "Bird" => "🐦",
        "Cherry" => "🌸",
        "Sun" => "☀",
        "Coffee" => "☕",
        _ => "•",
    }
}

/// Start and end angle of slice `index` in the unrotated wheel, in radians.
/// Angles grow clockwise from 3 o'clock, matching the canvas frame.
pub fn slice_arc(index: usize, count: usize) -> (f64, f64) {
    let arc = 2.0 * PI / count as f64;
    (index as f64 * arc, (index + 1) as f64 * arc)
}

fn is_dark_mode() -> bool {
    window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
        .map(|el| el.class_list().contains("dark"))
        .unwrap_or(false)
}

fn draw_wheel(context: &CanvasRenderingContext2d, slices: &[Slice], rotation: f64, is_spinning: bool) {
    let size = CANVAS_SIZE as f64;
    let center = size / 2.0;
    let radius = center - 30.0;
    let dark = is_dark_mode();

    context.clear_rect(0.0, 0.0, size, size);

    // Outer glow, stronger while turning
    let glow = if is_spinning { 0.25 } else { 0.12 };
    context.begin_path();
    context.set_fill_style_str(&format!("rgba(100, 130, 255, {})", glow));
    let _ = context.arc(center, center, radius + 12.0, 0.0, 2.0 * PI);
    context.fill();

    if slices.is_empty() {
        context.begin_path();
        context.set_fill_style_str(if dark { "#1a1c2e" } else { "#f0f2ff" });
        let _ = context.arc(center, center, radius, 0.0, 2.0 * PI);
        context.fill();
        return;
    }

    context.save();
    let _ = context.translate(center, center);
    let _ = context.rotate(rotation * PI / 180.0);

    for (index, slice) in slices.iter().enumerate() {
        let (start, end) = slice_arc(index, slices.len());

        context.begin_path();
        context.set_fill_style_str(&slice.color);
        context.move_to(0.0, 0.0);
        let _ = context.arc(0.0, 0.0, radius, start, end);
        context.close_path();
        context.fill();

        context.set_stroke_style_str("rgba(255, 255, 255, 0.8)");
        context.set_line_width(2.0);
        context.stroke();

        // Label runs along the slice bisector, reading outwards
        context.save();
        let _ = context.rotate((start + end) / 2.0);
        context.set_text_align("right");
        context.set_text_baseline("middle");
        context.set_fill_style_str(&slice.text_color);
        context.set_font("bold 16px 'Segoe UI', Roboto, system-ui, sans-serif");
        let _ = context.fill_text(slice.label(), radius - 18.0, 0.0);
        context.set_font("18px system-ui, sans-serif");
        let _ = context.fill_text(icon_glyph(&slice.icon), radius * 0.38, 0.0);
        context.restore();
    }

    context.restore();

    // Hub
    context.begin_path();
    context.set_fill_style_str(if dark { "#2d3142" } else { "#ffffff" });
    let _ = context.arc(center, center, radius * 0.14, 0.0, 2.0 * PI);
    context.fill();
    context.set_stroke_style_str("rgba(0, 0, 0, 0.15)");
    context.set_line_width(2.0);
    context.stroke();

    // Fixed pointer at the top, tip pointing into the wheel
    let pointer_rad = POINTER_ANGLE * PI / 180.0;
    let tip_x = center + (radius - 10.0) * pointer_rad.cos();
    let tip_y = center + (radius - 10.0) * pointer_rad.sin();
    context.set_shadow_color("rgba(0, 0, 0, 0.3)");
    context.set_shadow_blur(if is_spinning { 8.0 } else { 4.0 });
    context.begin_path();
    context.move_to(tip_x, tip_y);
    context.line_to(tip_x - 16.0, tip_y - 36.0);
    context.line_to(tip_x + 16.0, tip_y - 36.0);
    context.close_path();
    context.set_fill_style_str(if is_spinning { "#ffd700" } else { "#f59e0b" });
    context.fill();
    context.set_shadow_color("rgba(0, 0, 0, 0)");
    context.set_shadow_blur(0.0);
}

#[function_component(WheelCanvas)]
pub fn wheel_canvas(props: &WheelCanvasProps) -> Html {
    let canvas_ref = use_node_ref();

    {
        let canvas_ref = canvas_ref.clone();
        use_effect_with(
            (props.slices.clone(), props.rotation, props.is_spinning),
            move |(slices, rotation, is_spinning)| {
                let context = canvas_ref
                    .cast::<HtmlCanvasElement>()
                    .and_then(|canvas| canvas.get_context("2d").ok().flatten())
                    .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok());

                match context {
                    Some(context) => draw_wheel(&context, slices, *rotation, *is_spinning),
                    None => log::warn!("Wheel canvas has no 2d context"),
                }
                || ()
            },
        );
    }

    html! {
        <div class="relative">
            <canvas
                ref={canvas_ref}
                width={CANVAS_SIZE.to_string()}
                height={CANVAS_SIZE.to_string()}
                class="w-full max-w-[450px] h-auto rounded-full transition-all duration-300"
                style={if props.is_spinning {
                    "filter: drop-shadow(0px 5px 20px rgba(130, 100, 255, 0.4));"
                } else {
                    "filter: drop-shadow(0px 5px 15px rgba(0, 0, 0, 0.2));"
                }}
            />
        </div>
    }
}

/// Easing function for smooth deceleration: 1 - (1-t)^3
pub fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t.clamp(0.0, 1.0)).powi(3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::shared_wheel_game::winning_index;

    #[test]
    fn test_ease_out_cubic_bounds() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert_eq!(ease_out_cubic(2.0), 1.0);
        assert!(ease_out_cubic(0.5) > 0.5);
    }

    #[test]
    fn test_drawn_slice_under_pointer_is_the_winner() {
        // After rotating by `rotation` degrees, the slice whose arc covers the
        // pointer angle is the one the engine reports.
        let count = 10;
        for rotation in [0.0, 45.0, 270.0, 1234.5, 3599.0] {
            let index = winning_index(rotation, count);
            let (start, end) = slice_arc(index, count);
            let pointer = ((POINTER_ANGLE - rotation) % 360.0 + 360.0) % 360.0 * PI / 180.0;
            assert!(pointer >= start - 1e-9 && pointer < end + 1e-9, "rotation {}", rotation);
        }
    }
}
