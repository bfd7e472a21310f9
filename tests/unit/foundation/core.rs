use super::*;

#[test]
fn lerp_endpoints_and_clamping() {
    let a = Rgba8::new(0, 10, 200, 100);
    let b = Rgba8::new(255, 20, 100, 200);
    assert_eq!(a.lerp(b, 0.0), a);
    assert_eq!(a.lerp(b, 1.0), b);
    assert_eq!(a.lerp(b, -3.0), a);
    assert_eq!(a.lerp(b, 7.5), b);
}

#[test]
fn lerp_rounds_each_channel() {
    let a = Rgba8::new(22, 24, 26, 175);
    let b = Rgba8::new(24, 36, 26, 210);
    // halfway: 23, 30, 26, 192.5 rounds to the even neighbour
    assert_eq!(a.lerp(b, 0.5), Rgba8::new(23, 30, 26, 192));
}

#[test]
fn lerp_ties_round_to_even() {
    let a = Rgba8::new(0, 1, 2, 3);
    let b = Rgba8::new(1, 2, 3, 4);
    // 0.5, 1.5, 2.5, 3.5
    assert_eq!(a.lerp(b, 0.5), Rgba8::new(0, 2, 2, 4));
}

#[test]
fn canvas_dims_reject_zero_and_oversize() {
    assert!(
        Canvas {
            width: 0,
            height: 10
        }
        .dims_u16()
        .is_err()
    );
    assert!(
        Canvas {
            width: 70_000,
            height: 10
        }
        .dims_u16()
        .is_err()
    );
    assert_eq!(
        Canvas {
            width: 1920,
            height: 1080
        }
        .dims_u16()
        .unwrap(),
        (1920, 1080)
    );
}
