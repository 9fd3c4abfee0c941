use super::*;

fn cfg(width: u32, height: u32) -> SinkConfig {
    SinkConfig {
        width,
        height,
        fps: Fps::default(),
    }
}

#[test]
fn odd_dimensions_are_rejected_before_spawning() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new("target/unit_ffmpeg/odd.mp4"));
    let err = sink.begin(cfg(801, 800)).unwrap_err();
    assert!(err.to_string().contains("must be even"));
}

#[test]
fn push_before_begin_fails() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new("target/unit_ffmpeg/none.mp4"));
    let frame = FrameRGBA {
        width: 2,
        height: 2,
        data: vec![0; 16],
        premultiplied: true,
    };
    let err = sink.push_frame(FrameIndex(0), &frame).unwrap_err();
    assert!(err.to_string().contains("not started"));
    assert!(sink.end().is_err());
}
