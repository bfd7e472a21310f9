use super::*;
use crate::test_support::render_with;

fn white() -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 255)
}

fn composited(icon: &IconRaster, w: u16, h: u16, x: f64, y: f64) -> crate::render::FrameRGBA {
    render_with(w, h, |ctx| icon.composite(ctx, x, y))
}

#[test]
fn icon_space_maps_the_24_unit_grid() {
    let space = IconSpace {
        size: 48.0,
        factor: 2.0,
    };
    assert_eq!(space.unit(), 2.0);
    assert_eq!(space.center(), vk::Point::new(24.0, 24.0));
    assert_eq!(space.pt(12.0, 12.0), vk::Point::new(24.0, 24.0));
    assert_eq!(space.pt(0.0, 24.0), vk::Point::new(0.0, 48.0));
    assert_eq!(space.line_width(1.4, 1.0), 2.0);
    assert_eq!(space.line_width(0.2, 1.0), 1.0);
    assert_eq!(space.line_width(2.0, 2.0), 4.0);
}

#[test]
fn rejects_degenerate_sizes() {
    assert!(rasterize_icon(0, 2, None, |_, _| {}).is_err());
    assert!(rasterize_icon(24, 0, None, |_, _| {}).is_err());
    assert!(rasterize_icon(42, 2_000, None, |_, _| {}).is_err());
}

#[test]
fn draw_closure_sees_the_supersampled_surface() {
    let mut seen = None;
    let icon = rasterize_icon(24, 3, None, |_, space| seen = Some(space)).unwrap();
    assert_eq!(icon.size(), 24);
    assert_eq!(
        seen,
        Some(IconSpace {
            size: 72.0,
            factor: 3.0
        })
    );
}

#[test]
fn downsampled_solid_icon_stays_solid_and_lands_on_floored_offset() {
    let icon = rasterize_icon(4, 4, None, |ctx, space| {
        ctx.set_paint(white());
        ctx.fill_rect(&vk::Rect::new(0.0, 0.0, space.size, space.size));
    })
    .unwrap();

    let f = composited(&icon, 12, 12, 2.7, 3.2);
    for y in 3..7 {
        for x in 2..6 {
            let a = f.pixel(x, y).map_or(0, |p| p[3]);
            assert!(a >= 250, "pixel ({x},{y}) alpha {a}");
        }
    }
    assert_eq!(f.pixel(1, 4).map(|p| p[3]), Some(0));
    assert_eq!(f.pixel(6, 4).map(|p| p[3]), Some(0));
    assert_eq!(f.pixel(3, 2).map(|p| p[3]), Some(0));
    assert_eq!(f.pixel(3, 7).map(|p| p[3]), Some(0));
}

#[test]
fn downsample_keeps_color_within_alpha() {
    let icon = rasterize_icon(10, 4, None, |ctx, _| {
        ctx.set_paint(white());
        ctx.fill_rect(&vk::Rect::new(12.0, 12.0, 28.0, 28.0));
    })
    .unwrap();
    let f = composited(&icon, 10, 10, 0.0, 0.0);
    assert!(!f.is_blank());
    for px in f.data.chunks_exact(4) {
        assert!(px[0] <= px[3] && px[1] <= px[3] && px[2] <= px[3]);
    }
}

fn top_half_bar(angle: Option<f64>) -> crate::render::FrameRGBA {
    let icon = rasterize_icon(20, 2, angle, |ctx, space| {
        ctx.set_paint(white());
        ctx.fill_rect(&vk::Rect::new(0.0, 0.0, space.size, space.size / 2.0));
    })
    .unwrap();
    composited(&icon, 20, 20, 0.0, 0.0)
}

fn alpha(f: &crate::render::FrameRGBA, x: u32, y: u32) -> u8 {
    f.pixel(x, y).map_or(0, |p| p[3])
}

#[test]
fn rotation_is_clockwise_about_the_centre() {
    let upright = top_half_bar(None);
    assert!(alpha(&upright, 10, 4) > 240);
    assert!(alpha(&upright, 10, 15) < 10);

    let half_turn = top_half_bar(Some(180.0));
    assert!(alpha(&half_turn, 10, 15) > 240);
    assert!(alpha(&half_turn, 10, 4) < 10);

    // clockwise quarter turn moves the top half to the right
    let quarter = top_half_bar(Some(90.0));
    assert!(alpha(&quarter, 15, 10) > 240);
    assert!(alpha(&quarter, 4, 10) < 10);

    let counter = top_half_bar(Some(-90.0));
    assert!(alpha(&counter, 4, 10) > 240);
    assert!(alpha(&counter, 15, 10) < 10);
}

#[test]
fn zero_or_non_finite_rotation_is_identity() {
    let upright = top_half_bar(None);
    assert_eq!(top_half_bar(Some(0.0)).data, upright.data);
    assert_eq!(top_half_bar(Some(f64::NAN)).data, upright.data);
}
