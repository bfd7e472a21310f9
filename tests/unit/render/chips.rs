use super::*;
use crate::foundation::core::Canvas;
use crate::render::FrameRGBA;
use crate::test_support::{RecordingText, render_with, straight_px};

fn chip_rect() -> Rect {
    Rect::new(10.0, 10.0, 52.0, 52.0)
}

fn chip(draw: impl FnOnce(&mut vello_cpu::RenderContext)) -> FrameRGBA {
    render_with(64, 64, draw)
}

#[test]
fn active_blinker_turns_the_arrow_green() {
    let idle = chip(|ctx| {
        blinker_chip(ctx, chip_rect(), ArrowDir::Left, false, 1.0, 2).unwrap();
    });
    let lit = chip(|ctx| {
        blinker_chip(ctx, chip_rect(), ArrowDir::Left, true, 1.0, 2).unwrap();
    });
    let [r, g, _, _] = straight_px(&idle, 31, 31);
    assert!(r.abs_diff(g) < 10);
    let [r, g, _, _] = straight_px(&lit, 31, 31);
    assert!(g > r + 60, "lit arrow ({r},{g})");
}

#[test]
fn blinker_pulse_only_matters_when_active() {
    let a = chip(|ctx| blinker_chip(ctx, chip_rect(), ArrowDir::Right, false, 0.0, 2).unwrap());
    let b = chip(|ctx| blinker_chip(ctx, chip_rect(), ArrowDir::Right, false, 1.0, 2).unwrap());
    assert_eq!(a.data, b.data);

    let dim = chip(|ctx| blinker_chip(ctx, chip_rect(), ArrowDir::Right, true, 0.0, 2).unwrap());
    let bright = chip(|ctx| blinker_chip(ctx, chip_rect(), ArrowDir::Right, true, 1.0, 2).unwrap());
    assert_ne!(dim.data, bright.data);
}

#[test]
fn pedal_gauge_height_follows_value() {
    let empty = chip(|ctx| pedal_chip(ctx, chip_rect(), Pedal::Throttle, 0.0, 2).unwrap());
    let full = chip(|ctx| pedal_chip(ctx, chip_rect(), Pedal::Throttle, 1.0, 2).unwrap());
    let half = chip(|ctx| pedal_chip(ctx, chip_rect(), Pedal::Throttle, 0.5, 2).unwrap());

    assert!(straight_px(&empty, 31, 44)[1] < 80);
    assert!(straight_px(&full, 31, 44)[1] > 150);
    assert!(straight_px(&full, 22, 22)[1] > 150);
    // a half gauge fills the lower 14px of the 28px well only
    assert!(straight_px(&half, 22, 40)[1] > 150);
    assert!(straight_px(&half, 22, 22)[1] < 80);
}

#[test]
fn pedal_values_out_of_range_are_clamped() {
    let full = chip(|ctx| pedal_chip(ctx, chip_rect(), Pedal::Throttle, 1.0, 2).unwrap());
    let over = chip(|ctx| pedal_chip(ctx, chip_rect(), Pedal::Throttle, 3.0, 2).unwrap());
    assert_eq!(full.data, over.data);
    let nan = chip(|ctx| pedal_chip(ctx, chip_rect(), Pedal::Brake, f64::NAN, 2).unwrap());
    let off = chip(|ctx| pedal_chip(ctx, chip_rect(), Pedal::Brake, 0.0, 2).unwrap());
    assert_eq!(nan.data, off.data);
}

#[test]
fn applied_brake_gets_a_red_outline() {
    let off = chip(|ctx| pedal_chip(ctx, chip_rect(), Pedal::Brake, 0.0, 2).unwrap());
    let on = chip(|ctx| pedal_chip(ctx, chip_rect(), Pedal::Brake, 1.0, 2).unwrap());
    let [r, g, _, _] = straight_px(&off, 10, 31);
    assert!(r.abs_diff(g) < 10);
    let [r, g, _, _] = straight_px(&on, 10, 31);
    assert!(r > g + 80, "outline ({r},{g})");
}

fn bluish(f: &FrameRGBA) -> usize {
    f.to_straight_rgba()
        .chunks_exact(4)
        .filter(|p| p[3] > 0 && i32::from(p[2]) > i32::from(p[0]) + 40)
        .count()
}

#[test]
fn wheel_colors_follow_autopilot_state() {
    let plain = chip(|ctx| wheel_chip(ctx, chip_rect(), 0.0, &AutopilotState::None, 2).unwrap());
    let steer =
        chip(|ctx| wheel_chip(ctx, chip_rect(), 0.0, &AutopilotState::Autosteer, 2).unwrap());
    let tacc = chip(|ctx| wheel_chip(ctx, chip_rect(), 0.0, &AutopilotState::Tacc, 2).unwrap());
    let other = chip(|ctx| {
        wheel_chip(ctx, chip_rect(), 0.0, &AutopilotState::Other("X".into()), 2).unwrap()
    });
    assert_eq!(bluish(&plain), 0);
    assert!(bluish(&steer) > 20);
    assert!(bluish(&tacc) > 20);
    assert_eq!(plain.data, other.data);
}

#[test]
fn wheel_angle_is_clamped_before_rotation() {
    let at_limit = chip(|ctx| wheel_chip(ctx, chip_rect(), 540.0, &AutopilotState::None, 2).unwrap());
    let beyond = chip(|ctx| wheel_chip(ctx, chip_rect(), 900.0, &AutopilotState::None, 2).unwrap());
    let upright = chip(|ctx| wheel_chip(ctx, chip_rect(), 0.0, &AutopilotState::None, 2).unwrap());
    assert_eq!(at_limit.data, beyond.data);
    assert_ne!(at_limit.data, upright.data);
}

#[test]
fn gear_label_is_centred_nudged_and_colored() {
    let mut text = RecordingText::default();
    chip(|ctx| gear_chip(ctx, chip_rect(), Gear::Drive, &mut text).unwrap());
    chip(|ctx| gear_chip(ctx, chip_rect(), Gear::Reverse, &mut text).unwrap());
    chip(|ctx| gear_chip(ctx, chip_rect(), Gear::Unknown('S'), &mut text).unwrap());

    assert_eq!(text.texts(), vec!["D", "R", "S"]);
    let d = &text.drawn[0];
    assert_eq!(d.size_px, FONT_SIZE_GEAR);
    // 10px wide, 20px tall label in a chip centred at (31, 31)
    assert_eq!(d.origin, Point::new(26.0, 18.0));
    assert_eq!(d.color, HUD_TEXT);
    assert_eq!(text.drawn[1].color, Rgba8::new(255, 160, 160, 255));
    assert_eq!(text.drawn[2].color, HUD_TEXT);
}

#[test]
fn speed_block_places_value_and_unit() {
    let layout = HudLayout::compute(Canvas {
        width: 1920,
        height: 1080,
    });
    let mut text = RecordingText::default();
    let f = render_with(1920, 80, |ctx| {
        speed_block(ctx, &layout, "36", "km/h", &mut text).unwrap();
    });

    assert_eq!(text.texts(), vec!["36", "km/h"]);
    let speed = &text.drawn[0];
    assert_eq!(speed.size_px, FONT_SIZE_SPEED);
    assert_eq!(speed.origin, Point::new(960.0 - 17.0, 9.0));
    assert_eq!(speed.color, HUD_TEXT);

    let unit = &text.drawn[1];
    assert_eq!(unit.size_px, FONT_SIZE_UNIT);
    // the unit is pushed below the value rather than overlapping it
    assert_eq!(unit.origin, Point::new(960.0 - 11.0, 9.0 + 34.0 + 4.0));

    assert_eq!(f.pixel(960, 33).map(|p| p[3]), Some(185));
}
