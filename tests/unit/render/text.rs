use super::*;

#[test]
fn from_bytes_keeps_bytes_without_origin() {
    let src = FontSource::from_bytes(vec![1, 2, 3]);
    assert_eq!(src.bytes(), &[1, 2, 3]);
    assert!(src.origin().is_none());
}

#[test]
fn from_path_reports_missing_file_as_font_error() {
    let err = FontSource::from_path("/nonexistent/dashcam-hud/font.ttf").unwrap_err();
    assert!(matches!(err, HudError::Font(_)), "{err}");
}

#[test]
fn from_path_rejects_empty_file() {
    let dir = std::env::temp_dir().join(format!("dashcam-hud-font-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("empty.ttf");
    std::fs::write(&path, b"").unwrap();

    let err = FontSource::from_path(&path).unwrap_err();
    assert!(err.to_string().contains("empty"), "{err}");
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn discover_in_skips_unreadable_candidates() {
    let dir = std::env::temp_dir().join(format!("dashcam-hud-discover-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let good = dir.join("font.bin");
    std::fs::write(&good, b"not really a font").unwrap();

    let src = FontSource::discover_in(&[dir.join("missing.ttf"), good.clone()]).unwrap();
    assert_eq!(src.origin(), Some(good.as_path()));
    assert_eq!(src.bytes(), b"not really a font");
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn discover_in_without_candidates_fails() {
    let err = FontSource::discover_in(&[]).unwrap_err();
    assert!(matches!(err, HudError::Font(_)));

    let err = FontSource::discover_in(&[PathBuf::from("/nonexistent/a.ttf")]).unwrap_err();
    assert!(err.to_string().contains("tried 1 locations"), "{err}");
}

#[test]
fn parley_rejects_bytes_that_are_not_a_font() {
    let src = FontSource::from_bytes(b"garbage garbage garbage".to_vec());
    assert!(matches!(ParleyText::new(&src), Err(HudError::Font(_))));
}

#[test]
fn system_font_measures_and_draws_when_available() {
    let Ok(src) = FontSource::discover() else {
        return;
    };
    let mut text = ParleyText::new(&src).unwrap();
    assert!(!text.family_name().is_empty());

    let narrow = text.measure("1", FONT_SIZE_SPEED).unwrap();
    let wide = text.measure("188", FONT_SIZE_SPEED).unwrap();
    assert!(wide.width > narrow.width);
    assert!(narrow.height > 0.0);
    assert!(text.measure("1", 0.0).is_err());

    let frame = crate::test_support::render_with(120, 60, |ctx| {
        text.draw(
            ctx,
            "88",
            FONT_SIZE_SPEED,
            Point::new(4.0, 4.0),
            Rgba8::new(255, 255, 255, 255),
        )
        .unwrap();
    });
    assert!(!frame.is_blank());
}
