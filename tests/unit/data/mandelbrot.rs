use std::io::Cursor;

use super::*;

fn tiny() -> MandelbrotZoom {
    MandelbrotZoom {
        width: 16,
        height: 12,
        frames: 3,
        max_iterations: 50,
        ..MandelbrotZoom::default()
    }
}

#[test]
fn escape_value_inside_and_outside() {
    // Origin never escapes.
    assert_eq!(escape_value(0.0, 0.0, 100), 255);
    // Far outside escapes immediately after one step.
    assert_eq!(escape_value(10.0, 10.0, 100), 2);
}

#[test]
fn window_converges_to_focus() {
    let z = MandelbrotZoom::default();
    let (ll0, ur0) = z.window(0);
    assert_eq!(ll0, z.lower_left);
    assert_eq!(ur0, z.upper_right);

    let (ll, ur) = z.window(200);
    assert!((ll[0] - z.focus[0]).abs() < 1e-6);
    assert!((ur[1] - z.focus[1]).abs() < 1e-6);
    assert!(ur[0] > ll[0]);
}

#[test]
fn precision_grows_with_zoom_depth() {
    let z = MandelbrotZoom::default();
    assert_eq!(z.precision_bits(0), 32);
    assert_eq!(z.precision_bits(299), 92);
    assert!(matches!(z.pixel_axes(0), PixelAxes::Fast { .. }));
    assert!(matches!(z.pixel_axes(150), PixelAxes::Precise { .. }));

    let flat = MandelbrotZoom {
        zoom_factor: 1.0,
        ..MandelbrotZoom::default()
    };
    assert_eq!(flat.precision_bits(10_000), 32);
}

#[test]
fn pixel_coordinates_stay_distinct_through_deep_frames() {
    let z = MandelbrotZoom::default();
    for frame in [0, 60, 104, 105, 180, 230, 250, 280, 299] {
        match z.pixel_axes(frame) {
            PixelAxes::Fast { xs, ys } => {
                assert_eq!((xs.len(), ys.len()), (400, 400));
                assert!(xs.windows(2).all(|w| w[0] < w[1]), "frame {frame} columns");
                assert!(ys.windows(2).all(|w| w[0] < w[1]), "frame {frame} rows");
            }
            PixelAxes::Precise { xs, ys, .. } => {
                assert_eq!((xs.len(), ys.len()), (400, 400));
                assert!(xs.windows(2).all(|w| w[0] < w[1]), "frame {frame} columns");
                assert!(ys.windows(2).all(|w| w[0] < w[1]), "frame {frame} rows");
            }
        }
    }
}

#[test]
fn precise_escape_matches_f64_on_clear_points() {
    for (x, y) in [(0.0, 0.0), (10.0, 10.0), (-1.0, 0.0), (1.0, 1.0), (-2.5, 0.0)] {
        let bx = Float::with_val(80, x);
        let by = Float::with_val(80, y);
        assert_eq!(
            escape_value_precise(&bx, &by, 100, 80),
            escape_value(x, y, 100),
            "({x}, {y})"
        );
    }
}

#[test]
fn deep_frames_render_deterministically() {
    let z = tiny();
    assert!(z.precision_bits(150) > f64::MANTISSA_DIGITS);
    let f = z.render_frame(150);
    assert_eq!(f.dim(), (12, 16));
    assert_eq!(f, z.render_frame(150));
}

#[test]
fn render_frame_shape_is_rows_by_cols() {
    let z = tiny();
    let f = z.render_frame(0);
    assert_eq!(f.dim(), (12, 16));
    assert_eq!(f, z.render_frame(0));
}

#[test]
fn validate_rejects_degenerate_configs() {
    assert!(tiny().validate().is_ok());
    assert!(MandelbrotZoom { frames: 0, ..tiny() }.validate().is_err());
    assert!(MandelbrotZoom { width: 0, ..tiny() }.validate().is_err());
    assert!(
        MandelbrotZoom {
            zoom_factor: 0.5,
            ..tiny()
        }
        .validate()
        .is_err()
    );
}

#[test]
fn archive_round_trips_through_loader_in_order() {
    let z = tiny();
    let mut cursor = z.write_npz(Cursor::new(Vec::new())).unwrap();
    cursor.set_position(0);

    let seq = crate::data::loader::read_npz(cursor).unwrap();
    assert_eq!(seq.len(), 3);
    assert_eq!(seq.names(), ["0", "1", "2"]);
    assert_eq!(seq.dims(), (12, 16));
    for (k, frame) in seq.frames().iter().enumerate() {
        assert_eq!(*frame, z.render_frame(k).mapv(f64::from));
    }
}
