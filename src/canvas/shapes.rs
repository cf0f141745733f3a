use web_sys::CanvasRenderingContext2d;

use crate::constants::*;
use crate::models::DagNode;

/// Node body: rounded rect with a drop shadow, selected nodes get a glow.
pub fn draw_node_rect(context: &CanvasRenderingContext2d, node: &DagNode, selected: bool) {
    let pos = node.position();
    let color = match node {
        DagNode::Agent { .. } => AGENT_NODE_COLOR,
        DagNode::Human { .. } => HUMAN_NODE_COLOR,
    };

    context.save();

    context.set_shadow_color(SHADOW_COLOR);
    context.set_shadow_blur(8.0);
    context.set_shadow_offset_x(0.0);
    context.set_shadow_offset_y(2.0);

    context.set_fill_style_str(color);
    rounded_rect_path(
        context,
        pos.x,
        pos.y,
        DEFAULT_NODE_WIDTH,
        DEFAULT_NODE_HEIGHT,
        10.0,
    );
    context.fill();

    context.set_shadow_blur(0.0);
    context.set_shadow_offset_y(0.0);

    if selected {
        context.set_stroke_style_str(NODE_BORDER_SELECTED);
        context.set_line_width(2.5);
        context.set_shadow_color(NODE_BORDER_SELECTED);
        context.set_shadow_blur(4.0);
    } else {
        context.set_stroke_style_str(NODE_BORDER_DEFAULT);
        context.set_line_width(1.5);
    }
    context.stroke();

    context.restore();
}

/// The strip along the bottom edge the user drags to start an edge.
pub fn draw_connect_handle(context: &CanvasRenderingContext2d, node: &DagNode) {
    let pos = node.position();
    context.save();
    context.set_fill_style_str("rgba(0, 0, 0, 0.08)");
    context.fill_rect(
        pos.x,
        pos.y + DEFAULT_NODE_HEIGHT - CONNECT_HANDLE_HEIGHT,
        DEFAULT_NODE_WIDTH,
        CONNECT_HANDLE_HEIGHT,
    );
    context.restore();
}

/// Edge between two anchors: a vertical-ish cubic with an arrowhead at the
/// target end.
pub fn draw_edge(context: &CanvasRenderingContext2d, from: (f64, f64), to: (f64, f64)) {
    let (x1, y1) = from;
    let (x2, y2) = to;
    let bend = ((y2 - y1).abs() / 2.0).max(30.0);

    context.save();
    context.set_stroke_style_str(EDGE_COLOR);
    context.set_line_width(2.0);
    context.begin_path();
    context.move_to(x1, y1);
    context.bezier_curve_to(x1, y1 + bend, x2, y2 - bend, x2, y2);
    context.stroke();
    context.restore();

    draw_arrow_head(context, x2, y2, 0.0, 1.0, EDGE_COLOR);
}

/// Dashed preview while the user is dragging a connection out.
pub fn draw_connection_preview(
    context: &CanvasRenderingContext2d,
    from: (f64, f64),
    to: (f64, f64),
) {
    context.save();
    context.set_stroke_style_str(CONNECTION_PREVIEW_COLOR);
    context.set_line_width(1.5);
    let _ = context.set_line_dash(&js_sys::Array::of2(
        &wasm_bindgen::JsValue::from_f64(6.0),
        &wasm_bindgen::JsValue::from_f64(4.0),
    ));
    context.begin_path();
    context.move_to(from.0, from.1);
    context.line_to(to.0, to.1);
    context.stroke();
    context.restore();
}

fn draw_arrow_head(
    context: &CanvasRenderingContext2d,
    x: f64,
    y: f64,
    dx: f64,
    dy: f64,
    color: &str,
) {
    let head_len = 8.0;
    let angle = f64::atan2(dy, dx);

    context.save();
    context.set_fill_style_str(color);
    context.begin_path();
    context.move_to(x, y);
    context.line_to(
        x - head_len * f64::cos(angle - std::f64::consts::PI / 6.0),
        y - head_len * f64::sin(angle - std::f64::consts::PI / 6.0),
    );
    context.line_to(
        x - head_len * f64::cos(angle + std::f64::consts::PI / 6.0),
        y - head_len * f64::sin(angle + std::f64::consts::PI / 6.0),
    );
    context.close_path();
    context.fill();
    context.restore();
}

fn rounded_rect_path(
    context: &CanvasRenderingContext2d,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    radius: f64,
) {
    context.begin_path();
    context.move_to(x + radius, y);
    context.line_to(x + width - radius, y);
    context.quadratic_curve_to(x + width, y, x + width, y + radius);
    context.line_to(x + width, y + height - radius);
    context.quadratic_curve_to(x + width, y + height, x + width - radius, y + height);
    context.line_to(x + radius, y + height);
    context.quadratic_curve_to(x, y + height, x, y + height - radius);
    context.line_to(x, y + radius);
    context.quadratic_curve_to(x, y, x + radius, y);
    context.close_path();
}
