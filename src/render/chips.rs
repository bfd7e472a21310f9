//! Painters for the speed block and the six HUD chips.

use crate::foundation::core::{Point, Rect, Rgba8};
use crate::foundation::error::HudResult;
use crate::foundation::math::clamp_finite;
use crate::layout::{CHIP_SIZE, HudLayout};
use crate::render::icons::{self, ArrowDir};
use crate::render::shapes::{BoxStyle, rounded_rect};
use crate::render::supersample::rasterize_icon;
use crate::render::text::{FONT_SIZE_GEAR, FONT_SIZE_SPEED, FONT_SIZE_UNIT, TextPainter};
use crate::telemetry::{AutopilotState, Gear, MAX_STEER_DEG};

pub(crate) const HUD_BORDER: Rgba8 = Rgba8::new(255, 255, 255, 42);
pub(crate) const HUD_TEXT: Rgba8 = Rgba8::new(245, 245, 245, 255);

const CHIP_RADIUS: f64 = 12.0;
const CHIP_INNER_RADIUS: f64 = 10.0;
const CHIP_OUTLINE: f64 = 2.0;

const BLINKER: Rgba8 = Rgba8::new(120, 255, 140, 220);
const BRAKE: Rgba8 = Rgba8::new(255, 90, 90, 230);
const THROTTLE: Rgba8 = Rgba8::new(120, 255, 120, 220);
const AUTOPILOT: Rgba8 = Rgba8::new(100, 170, 255, 230);

const PEDAL_INSET: f64 = 7.0;
const PEDAL_ICON_PX: u32 = 24;

const SPEED_RADIUS: f64 = 22.0;
const SPEED_TEXT_INSET: f64 = 4.0;

/// Which pedal a chip shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Pedal {
    Brake,
    Throttle,
}

const CHIP_PX: u32 = CHIP_SIZE as u32;

fn chip_background(ctx: &mut vello_cpu::RenderContext, rect: Rect, fill: Rgba8, outline: Rgba8) {
    rounded_rect(
        ctx,
        rect,
        CHIP_RADIUS,
        BoxStyle::outlined(fill, outline, CHIP_OUTLINE),
    );
}

/// Blinker chip; `pulse` in [0, 1] drives the active highlight.
pub(crate) fn blinker_chip(
    ctx: &mut vello_cpu::RenderContext,
    rect: Rect,
    dir: ArrowDir,
    active: bool,
    pulse: f64,
    factor: u32,
) -> HudResult<()> {
    let pulse = clamp_finite(pulse, 0.0, 1.0);
    let mut fill = Rgba8::new(22, 24, 26, 175);
    let mut outline = HUD_BORDER;
    let arrow_base = Rgba8::new(210, 210, 210, 170);
    let mut arrow_color = arrow_base;
    if active {
        fill = fill.lerp(Rgba8::new(24, 36, 26, 210), 0.65 + 0.25 * pulse);
        outline = outline.lerp(Rgba8::new(140, 255, 170, 180), 0.4 + 0.4 * pulse);
        arrow_color = arrow_base.lerp(BLINKER, 0.65 + 0.35 * pulse);
    }
    chip_background(ctx, rect, fill, outline);

    let icon = rasterize_icon(CHIP_PX, factor, None, |c, space| {
        icons::arrow(c, space, dir, arrow_color);
    })?;
    icon.composite(ctx, rect.x0, rect.y0);
    Ok(())
}

fn gear_color(gear: Gear) -> Rgba8 {
    match gear {
        Gear::Park => Rgba8::new(240, 240, 240, 255),
        Gear::Reverse => Rgba8::new(255, 160, 160, 255),
        Gear::Neutral => Rgba8::new(180, 210, 255, 255),
        Gear::Drive | Gear::Unknown(_) => HUD_TEXT,
    }
}

pub(crate) fn gear_chip<T: TextPainter + ?Sized>(
    ctx: &mut vello_cpu::RenderContext,
    rect: Rect,
    gear: Gear,
    text: &mut T,
) -> HudResult<()> {
    chip_background(ctx, rect, Rgba8::new(20, 20, 22, 200), HUD_BORDER);

    let label = gear.label().to_string();
    let ext = text.measure(&label, FONT_SIZE_GEAR)?;
    let c = rect.center();
    // nudged up 3px to sit optically centred
    let origin = Point::new(
        (c.x - ext.width / 2.0).round(),
        (c.y - ext.height / 2.0 - 3.0).round(),
    );
    text.draw(ctx, &label, FONT_SIZE_GEAR, origin, gear_color(gear))
}

/// Pedal chip with a level gauge filled to `value` (clamped to [0, 1]).
pub(crate) fn pedal_chip(
    ctx: &mut vello_cpu::RenderContext,
    rect: Rect,
    pedal: Pedal,
    value: f64,
    factor: u32,
) -> HudResult<()> {
    let active = value > 0.0;
    let (mut fill, mut outline, mut icon_color) = (
        Rgba8::new(24, 24, 26, 200),
        HUD_BORDER,
        Rgba8::new(235, 235, 235, 230),
    );
    if pedal == Pedal::Brake && active {
        fill = Rgba8::new(40, 16, 16, 210);
        outline = Rgba8::new(255, 120, 120, 220);
        icon_color = Rgba8::new(255, 190, 190, 240);
    }
    chip_background(ctx, rect, fill, outline);

    let inner = rect.inset(-PEDAL_INSET);
    rounded_rect(
        ctx,
        inner,
        CHIP_INNER_RADIUS,
        BoxStyle::outlined(Rgba8::new(8, 8, 10, 190), Rgba8::new(255, 255, 255, 24), 1.0),
    );

    let level = clamp_finite(value, 0.0, 1.0);
    let fill_h = (inner.height() * level).trunc();
    if fill_h > 0.0 {
        let gauge = Rect::new(inner.x0 + 1.0, inner.y1 - fill_h, inner.x1 - 1.0, inner.y1);
        let color = match pedal {
            Pedal::Brake => BRAKE,
            Pedal::Throttle => THROTTLE,
        };
        rounded_rect(ctx, gauge, CHIP_INNER_RADIUS, BoxStyle::filled(color));
    }

    let icon = rasterize_icon(PEDAL_ICON_PX, factor, None, |c, space| match pedal {
        Pedal::Brake => icons::brake_pedal(c, space, icon_color),
        Pedal::Throttle => icons::throttle_pedal(c, space, icon_color),
    })?;
    let half = f64::from(icon.size()) / 2.0;
    let center = inner.center();
    icon.composite(ctx, (center.x - half).trunc(), (center.y - half).trunc());
    Ok(())
}

/// Steering wheel chip; `angle_deg` turns the wheel clockwise for positive values.
pub(crate) fn wheel_chip(
    ctx: &mut vello_cpu::RenderContext,
    rect: Rect,
    angle_deg: f64,
    autopilot: &AutopilotState,
    factor: u32,
) -> HudResult<()> {
    let mut fill = Rgba8::new(22, 24, 26, 200);
    let mut outline = HUD_BORDER;
    let mut icon_color = Rgba8::new(225, 225, 225, 240);
    if autopilot.is_steering() {
        icon_color = AUTOPILOT;
    } else if autopilot.is_cruise() {
        fill = Rgba8::new(18, 28, 42, 200);
        outline = Rgba8::new(90, 160, 255, 170);
    }
    chip_background(ctx, rect, fill, outline);

    let angle = clamp_finite(angle_deg, -MAX_STEER_DEG, MAX_STEER_DEG);
    let icon = rasterize_icon(CHIP_PX, factor, Some(angle), |c, space| {
        icons::wheel(c, space, icon_color);
    })?;
    icon.composite(ctx, rect.x0, rect.y0);
    Ok(())
}

/// Speed readout with its unit label underneath.
pub(crate) fn speed_block<T: TextPainter + ?Sized>(
    ctx: &mut vello_cpu::RenderContext,
    layout: &HudLayout,
    speed_label: &str,
    unit_label: &str,
    text: &mut T,
) -> HudResult<()> {
    let bx = layout.speed_box;
    rounded_rect(
        ctx,
        bx,
        SPEED_RADIUS,
        BoxStyle::outlined(Rgba8::new(18, 20, 24, 185), HUD_BORDER, CHIP_OUTLINE),
    );

    let cx = layout.speed_center.x;
    let speed = text.measure(speed_label, FONT_SIZE_SPEED)?;
    let speed_y = bx.y0 + SPEED_TEXT_INSET;
    text.draw(
        ctx,
        speed_label,
        FONT_SIZE_SPEED,
        Point::new(cx - (speed.width / 2.0).floor(), speed_y),
        HUD_TEXT,
    )?;

    let unit = text.measure(unit_label, FONT_SIZE_UNIT)?;
    let unit_y = (bx.y1 - unit.height - SPEED_TEXT_INSET).max(speed_y + speed.height + SPEED_TEXT_INSET);
    text.draw(
        ctx,
        unit_label,
        FONT_SIZE_UNIT,
        Point::new(cx - (unit.width / 2.0).floor(), unit_y),
        Rgba8::new(210, 210, 210, 210),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/render/chips.rs"]
mod tests;
