use super::*;

#[test]
fn frame_range_iterates_in_order() {
    let r = FrameRange::first(3);
    let got: Vec<u64> = r.iter().map(|f| f.0).collect();
    assert_eq!(got, vec![0, 1, 2]);
    assert_eq!(FrameRange::first(0).iter().count(), 0);
}

#[test]
fn fps_validation_and_conversions() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());

    let fps = Fps::whole(15).unwrap();
    assert_eq!(fps.as_f64(), 15.0);
    assert!((fps.frames_to_secs(30) - 2.0).abs() < 1e-12);

    let ntsc = Fps::new(30000, 1001).unwrap();
    assert!((ntsc.as_f64() - 29.97).abs() < 0.01);
}

#[test]
fn frame_index_converts_to_usize() {
    assert_eq!(FrameIndex(7).as_usize().unwrap(), 7);
    assert_eq!(FrameIndex(7).to_string(), "7");
}

#[test]
fn fps_serde_shape_is_num_den() {
    let fps = Fps::whole(15).unwrap();
    let json = serde_json::to_string(&fps).unwrap();
    assert_eq!(json, r#"{"num":15,"den":1}"#);
    let back: Fps = serde_json::from_str(&json).unwrap();
    assert_eq!(back, fps);
}

#[test]
fn canvas_pads_to_even() {
    let c = Canvas {
        width: 401,
        height: 433,
    }
    .padded_even();
    assert_eq!((c.width, c.height), (402, 434));
    assert_eq!(c.rgba8_len(), 402 * 434 * 4);

    let even = Canvas {
        width: 64,
        height: 32,
    };
    assert_eq!(even.padded_even(), even);
}
