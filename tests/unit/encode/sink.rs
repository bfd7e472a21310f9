use super::*;

fn cfg(width: u32, height: u32, frames: usize) -> SinkConfig {
    SinkConfig {
        width,
        height,
        frame_rate: 30.0,
        frames,
    }
}

// 2x1: one half-transparent red pixel, one transparent pixel.
fn frame() -> FrameRGBA {
    FrameRGBA {
        width: 2,
        height: 1,
        data: vec![128, 0, 0, 128, 0, 0, 0, 0],
        premultiplied: true,
    }
}

fn temp_dir(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!("dashcam-hud-{tag}-{}", std::process::id()))
}

#[test]
fn in_memory_sink_restarts_on_begin() {
    let mut sink = InMemorySink::new();
    sink.begin(cfg(2, 1, 1)).unwrap();
    sink.push_frame(FrameIndex(0), &frame()).unwrap();
    sink.end().unwrap();
    assert!(sink.ended());
    assert_eq!(sink.frames().len(), 1);

    sink.begin(cfg(2, 1, 3)).unwrap();
    assert!(!sink.ended());
    assert!(sink.frames().is_empty());
    assert_eq!(sink.config().unwrap().frames, 3);
}

#[test]
fn png_paths_are_zero_padded() {
    let sink = PngSequenceSink::new("/out");
    assert_eq!(
        sink.frame_path(FrameIndex(7)),
        Path::new("/out/frame_000007.png")
    );
    assert_eq!(
        sink.frame_path(FrameIndex(1_234_567)),
        Path::new("/out/frame_1234567.png")
    );
}

#[test]
fn png_sink_writes_straight_alpha_frames() {
    let dir = temp_dir("png");
    let _ = std::fs::remove_dir_all(&dir);
    let mut sink = PngSequenceSink::new(dir.join("nested"));
    sink.begin(cfg(2, 1, 2)).unwrap();
    sink.push_frame(FrameIndex(0), &frame()).unwrap();
    sink.push_frame(FrameIndex(1), &frame()).unwrap();
    sink.end().unwrap();

    let img = image::open(sink.frame_path(FrameIndex(1))).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (2, 1));
    assert_eq!(img.get_pixel(0, 0).0, [255, 0, 0, 128]);
    assert_eq!(img.get_pixel(1, 0).0, [0, 0, 0, 0]);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn png_sink_reports_unwritable_directory() {
    let dir = temp_dir("png-blocked");
    std::fs::create_dir_all(&dir).unwrap();
    let blocker = dir.join("file");
    std::fs::write(&blocker, b"x").unwrap();

    let mut sink = PngSequenceSink::new(blocker.join("sub"));
    let err = sink.begin(cfg(2, 1, 1)).unwrap_err();
    assert!(matches!(err, HudError::Output(_)), "{err}");
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn raw_sink_streams_straight_bytes() {
    let mut sink = RawRgbaSink::new(Vec::new());
    sink.begin(cfg(2, 1, 2)).unwrap();
    sink.push_frame(FrameIndex(0), &frame()).unwrap();
    sink.push_frame(FrameIndex(1), &frame()).unwrap();
    sink.end().unwrap();

    let out = sink.into_inner();
    assert_eq!(out.len(), 16);
    assert_eq!(&out[..8], &[255, 0, 0, 128, 0, 0, 0, 0]);
    assert_eq!(out[..8], out[8..]);
}

#[test]
fn raw_sink_rejects_frames_of_the_wrong_size() {
    let mut sink = RawRgbaSink::new(Vec::new());
    sink.begin(cfg(4, 4, 1)).unwrap();
    let err = sink.push_frame(FrameIndex(0), &frame()).unwrap_err();
    assert!(matches!(err, HudError::Output(_)));
    assert!(sink.into_inner().is_empty());
}
