//! Vector icon geometry, drawn into a supersampled [`IconSpace`].
//!
//! Pedal and wheel shapes are defined on a 24×24 grid centred at (12, 12); the blinker arrow is
//! sized in target pixels.

use vello_cpu::kurbo as vk;

use crate::foundation::core::Rgba8;
use crate::render::shapes::{polygon, polyline, rect_outline, ring};
use crate::render::supersample::IconSpace;

/// Half height of the blinker arrow in target pixels.
const ARROW_HALF: f64 = 14.0;

/// Which way an arrow points.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ArrowDir {
    Left,
    Right,
}

pub(crate) fn arrow(ctx: &mut vello_cpu::RenderContext, space: IconSpace, dir: ArrowDir, color: Rgba8) {
    let c = space.center();
    let a = ARROW_HALF * space.factor;
    let sign = match dir {
        ArrowDir::Left => 1.0,
        ArrowDir::Right => -1.0,
    };
    let points = [
        vk::Point::new(c.x + sign * a * 0.65, c.y - a),
        vk::Point::new(c.x - sign * a * 0.85, c.y),
        vk::Point::new(c.x + sign * a * 0.65, c.y + a),
    ];
    polygon(ctx, &points, color);
}

pub(crate) fn brake_pedal(ctx: &mut vello_cpu::RenderContext, space: IconSpace, color: Rgba8) {
    let outline = [(6.0, 7.0), (18.0, 7.0), (20.0, 16.0), (12.0, 19.0), (4.0, 16.0)]
        .map(|(x, y)| space.pt(x, y));
    polyline(ctx, &outline, true, color, space.line_width(2.0, 2.0));

    let bar_w = space.line_width(1.4, 1.0);
    for x in [8.0, 10.0, 12.0, 14.0, 16.0] {
        polyline(
            ctx,
            &[space.pt(x, 9.0), space.pt(x, 14.0)],
            false,
            color,
            bar_w,
        );
    }
}

pub(crate) fn throttle_pedal(ctx: &mut vello_cpu::RenderContext, space: IconSpace, color: Rgba8) {
    let outline = [(9.0, 4.0), (15.0, 4.0), (16.0, 18.0), (12.0, 20.0), (8.0, 18.0)]
        .map(|(x, y)| space.pt(x, y));
    let w = space.line_width(2.0, 2.0);
    polyline(ctx, &outline, true, color, w);

    let top = space.pt(9.0, 2.0);
    let bottom = space.pt(15.0, 4.0);
    rect_outline(ctx, vk::Rect::new(top.x, top.y, bottom.x, bottom.y), color, w);
}

/// Steering wheel: rim, spoke bar, lower spoke and hub.
pub(crate) fn wheel(ctx: &mut vello_cpu::RenderContext, space: IconSpace, color: Rgba8) {
    let c = space.center();
    let u = space.unit();
    ring(ctx, c, 8.0 * u, color, space.line_width(1.4, 2.0));

    let spoke_w = space.line_width(2.0, 2.0);
    polyline(
        ctx,
        &[space.pt(6.8, 9.8), space.pt(17.2, 9.8)],
        false,
        color,
        spoke_w,
    );
    polyline(
        ctx,
        &[space.pt(12.0, 9.8), space.pt(12.0, 16.8)],
        false,
        color,
        spoke_w,
    );

    ring(ctx, c, 1.8 * u, color, space.line_width(1.4, 1.0));
}

#[cfg(test)]
#[path = "../../tests/unit/render/icons.rs"]
mod tests;
