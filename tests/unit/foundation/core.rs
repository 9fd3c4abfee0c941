use super::*;

#[test]
fn fps_rejects_zero_parts() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
    assert_eq!(Fps::new(30, 1).unwrap().as_f64(), 30.0);
}

#[test]
fn fps_default_is_sixty() {
    assert_eq!(Fps::default(), Fps { num: 60, den: 1 });
    assert_eq!(Fps::default().secs_to_frames_ceil(1.5), 90);
    assert_eq!(Fps::default().secs_to_frames_ceil(0.0), 0);
}

#[test]
fn canvas_inner_size_removes_margin_on_both_sides() {
    let c = Canvas::default();
    assert_eq!(c.inner_size(100.0), Size::new(600.0, 600.0));
    assert_eq!(c.center(), Point::new(400.0, 400.0));
    assert_eq!(c.inner_size(500.0), Size::new(0.0, 0.0));
}

#[test]
fn rgb8_serializes_as_triple() {
    let c: Rgb8 = serde_json::from_str("[255, 10, 0]").unwrap();
    assert_eq!(c, Rgb8::new(255, 10, 0));
    assert_eq!(serde_json::to_string(&c).unwrap(), "[255,10,0]");
    assert!(serde_json::from_str::<Rgb8>("[256, 0, 0]").is_err());
    assert!(serde_json::from_str::<Rgb8>("[1, 2]").is_err());
}
