use super::*;

#[test]
fn canvas_wraps_image_title_and_margins() {
    let l = FrameLayout::new(400, 400, 1, 32, 8).unwrap();
    assert_eq!(l.canvas.width, 416);
    assert_eq!(l.canvas.height, 440);
    assert_eq!(l.image_origin, (8, 32));
    assert_eq!(l.image_rect(), Rect::new(8.0, 32.0, 408.0, 432.0));
    assert_eq!(l.title_rect().height(), 32.0);
}

#[test]
fn odd_sizes_are_padded_even() {
    let l = FrameLayout::new(3, 5, 1, 7, 0).unwrap();
    assert_eq!((l.canvas.width, l.canvas.height), (6, 10));
}

#[test]
fn scale_multiplies_image_area() {
    let l = FrameLayout::new(2, 3, 4, 0, 0).unwrap();
    assert_eq!((l.canvas.width, l.canvas.height), (12, 8));
    assert_eq!(l.image_rect().width(), 12.0);
}

#[test]
fn rejects_degenerate_inputs() {
    assert!(FrameLayout::new(0, 4, 1, 0, 0).is_err());
    assert!(FrameLayout::new(4, 4, 0, 0, 0).is_err());
    assert!(FrameLayout::new(40_000, 4, 2, 0, 0).is_err());
}
