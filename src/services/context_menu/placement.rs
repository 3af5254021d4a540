//! Viewport clamping for the context menu rectangle.

use egui::{Pos2, Rect, Vec2};

/// Place a menu of `size` at `anchor`, keeping at least `margin` between the
/// menu and every viewport edge.
///
/// A menu that would overflow the right or bottom edge is shifted back inside.
/// If the menu is larger than the viewport, the left/top margin wins.
pub fn clamp_to_viewport(anchor: Pos2, size: Vec2, viewport: Rect, margin: f32) -> Rect {
    let x = clamp_axis(anchor.x, size.x, viewport.left(), viewport.right(), margin);
    let y = clamp_axis(anchor.y, size.y, viewport.top(), viewport.bottom(), margin);
    Rect::from_min_size(Pos2::new(x, y), size)
}

fn clamp_axis(origin: f32, extent: f32, low: f32, high: f32, margin: f32) -> f32 {
    let max_origin = high - margin - extent;
    let min_origin = low + margin;
    origin.min(max_origin).max(min_origin)
}
