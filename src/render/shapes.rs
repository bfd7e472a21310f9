use vello_cpu::kurbo::{self as vk, Shape};

use crate::foundation::core::{Rect, Rgba8};
use crate::render::frame::rect_to_cpu;

const PATH_TOLERANCE: f64 = 0.1;

/// Fill and/or outline of a rounded rectangle.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct BoxStyle {
    pub(crate) fill: Option<Rgba8>,
    pub(crate) outline: Option<Rgba8>,
    pub(crate) outline_width: f64,
}

impl BoxStyle {
    pub(crate) fn filled(fill: Rgba8) -> Self {
        Self {
            fill: Some(fill),
            ..Self::default()
        }
    }

    pub(crate) fn outlined(fill: Rgba8, outline: Rgba8, width: f64) -> Self {
        Self {
            fill: Some(fill),
            outline: Some(outline),
            outline_width: width,
        }
    }
}

/// Radius actually used for a box: never more than half the smaller side.
pub(crate) fn effective_radius(rect: Rect, radius: f64) -> f64 {
    radius
        .min(rect.width() / 2.0)
        .min(rect.height() / 2.0)
        .max(0.0)
}

/// Draw a pixel-snapped rounded rectangle. The outline lies inside the box.
pub(crate) fn rounded_rect(
    ctx: &mut vello_cpu::RenderContext,
    rect: Rect,
    radius: f64,
    style: BoxStyle,
) {
    let r = effective_radius(rect, radius).round();
    let rect = Rect::new(
        rect.x0.round(),
        rect.y0.round(),
        rect.x1.round(),
        rect.y1.round(),
    );
    ctx.set_transform(vk::Affine::IDENTITY);

    if let Some(fill) = style.fill {
        ctx.set_paint(fill.to_cpu_color());
        let shape = vk::RoundedRect::from_rect(rect_to_cpu(rect), r);
        ctx.fill_path(&shape.to_path(PATH_TOLERANCE));
    }

    if let Some(outline) = style.outline
        && style.outline_width > 0.0
    {
        let half = style.outline_width / 2.0;
        let inner = rect.inset(-half);
        if inner.width() > 0.0 && inner.height() > 0.0 {
            let inner_r = effective_radius(inner, r - half);
            ctx.set_paint(outline.to_cpu_color());
            ctx.set_stroke(vk::Stroke::new(style.outline_width));
            let shape = vk::RoundedRect::from_rect(rect_to_cpu(inner), inner_r);
            ctx.stroke_path(&shape.to_path(PATH_TOLERANCE));
        }
    }
}

/// Stroke an open or closed polyline with butt caps.
pub(crate) fn polyline(
    ctx: &mut vello_cpu::RenderContext,
    points: &[vk::Point],
    closed: bool,
    color: Rgba8,
    width: f64,
) {
    let Some((first, rest)) = points.split_first() else {
        return;
    };
    let mut path = vk::BezPath::new();
    path.move_to(*first);
    for p in rest {
        path.line_to(*p);
    }
    if closed {
        path.close_path();
    }
    ctx.set_paint(color.to_cpu_color());
    ctx.set_stroke(vk::Stroke::new(width).with_join(vk::Join::Miter));
    ctx.stroke_path(&path);
}

/// Fill a closed polygon.
pub(crate) fn polygon(ctx: &mut vello_cpu::RenderContext, points: &[vk::Point], color: Rgba8) {
    let Some((first, rest)) = points.split_first() else {
        return;
    };
    let mut path = vk::BezPath::new();
    path.move_to(*first);
    for p in rest {
        path.line_to(*p);
    }
    path.close_path();
    ctx.set_paint(color.to_cpu_color());
    ctx.fill_path(&path);
}

/// Circle outline whose stroke stays inside `radius`.
pub(crate) fn ring(
    ctx: &mut vello_cpu::RenderContext,
    center: vk::Point,
    radius: f64,
    color: Rgba8,
    width: f64,
) {
    let r = (radius - width / 2.0).max(0.0);
    ctx.set_paint(color.to_cpu_color());
    ctx.set_stroke(vk::Stroke::new(width));
    ctx.stroke_path(&vk::Circle::new(center, r).to_path(PATH_TOLERANCE));
}

/// Rectangle outline whose stroke stays inside `rect`.
pub(crate) fn rect_outline(
    ctx: &mut vello_cpu::RenderContext,
    rect: vk::Rect,
    color: Rgba8,
    width: f64,
) {
    let inner = rect.inset(-width / 2.0);
    ctx.set_paint(color.to_cpu_color());
    ctx.set_stroke(vk::Stroke::new(width).with_join(vk::Join::Miter));
    ctx.stroke_path(&inner.to_path(PATH_TOLERANCE));
}

#[cfg(test)]
#[path = "../../tests/unit/render/shapes.rs"]
mod tests;
