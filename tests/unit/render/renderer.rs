use ndarray::array;

use crate::palette::colormap::PaletteName;

use super::*;

fn gray() -> Palette {
    Palette::named(PaletteName::Gray)
}

fn bare_opts() -> RenderOpts {
    RenderOpts {
        title_band_px: 4,
        margin_px: 0,
        ..RenderOpts::default()
    }
}

fn seq3() -> FrameSequence {
    FrameSequence::from_frames(vec![
        array![[0.0, 1.0], [2.0, 3.0]],
        array![[3.0, 2.0], [1.0, 0.0]],
        array![[10.0, -10.0], [f64::NAN, 1.5]],
    ])
    .unwrap()
}

#[test]
fn starts_on_frame_zero() {
    let seq = seq3();
    let r = FrameRenderer::new(&seq, gray(), bare_opts(), None).unwrap();
    assert_eq!(r.state().index, FrameIndex(0));
    assert_eq!(r.state().title, "Frame 0");
    assert_eq!(r.len(), 3);
    // 2x2 image + 4px band, already even.
    assert_eq!(r.state().frame.canvas(), r.layout().canvas);
    assert_eq!((r.layout().canvas.width, r.layout().canvas.height), (2, 6));
}

#[test]
fn update_sets_pixels_and_title() {
    let seq = seq3();
    let mut r = FrameRenderer::new(&seq, gray(), bare_opts(), None).unwrap();

    // Frame 0 spans 0..3, so 0 is black and 3 is white.
    assert_eq!(r.state().frame.pixel(0, 4), Some([0, 0, 0, 255]));
    assert_eq!(r.state().frame.pixel(1, 5), Some([255, 255, 255, 255]));

    let s = r.update(FrameIndex(1)).unwrap();
    assert_eq!(s.title, "Frame 1");
    assert_eq!(s.frame.pixel(0, 4), Some([255, 255, 255, 255]));
    assert_eq!(s.frame.pixel(1, 5), Some([0, 0, 0, 255]));
}

#[test]
fn later_frames_use_frame_zero_scale_and_clip() {
    let seq = seq3();
    let mut r = FrameRenderer::new(&seq, gray(), bare_opts(), None).unwrap();
    assert_eq!((r.normalize().vmin(), r.normalize().vmax()), (0.0, 3.0));

    let bg = RenderOpts::default().bg_rgba;
    let s = r.update(FrameIndex(2)).unwrap();
    assert_eq!(s.frame.pixel(0, 4), Some([255, 255, 255, 255]));
    assert_eq!(s.frame.pixel(1, 4), Some([0, 0, 0, 255]));
    // NaN shows the background.
    assert_eq!(s.frame.pixel(0, 5), Some(bg));
    // 1.5 / 3.0 = 0.5 -> bin 128.
    assert_eq!(s.frame.pixel(1, 5), Some([128, 128, 128, 255]));
}

#[test]
fn same_frame_renders_identically() {
    let seq = seq3();
    let mut r = FrameRenderer::new(&seq, gray(), bare_opts(), None).unwrap();
    let a = r.update(FrameIndex(1)).unwrap().frame.clone();
    r.update(FrameIndex(2)).unwrap();
    let b = r.update(FrameIndex(1)).unwrap().frame.clone();
    assert_eq!(a, b);
}

#[test]
fn out_of_range_index_is_rejected() {
    let seq = seq3();
    let mut r = FrameRenderer::new(&seq, gray(), bare_opts(), None).unwrap();
    let err = r.update(FrameIndex(3)).unwrap_err();
    assert!(matches!(err, ReelError::Validation(_)), "{err}");
    // The display keeps the last good frame.
    assert_eq!(r.state().index, FrameIndex(0));
}

#[test]
fn scale_upsamples_nearest_neighbour() {
    let seq = FrameSequence::from_frames(vec![array![[0.0, 1.0]]]).unwrap();
    let opts = RenderOpts {
        scale: 3,
        title_band_px: 0,
        margin_px: 0,
        ..RenderOpts::default()
    };
    let r = FrameRenderer::new(&seq, gray(), opts, None).unwrap();
    let f = &r.state().frame;
    assert_eq!((f.width, f.height), (6, 4));
    for y in 0..3 {
        for x in 0..3 {
            assert_eq!(f.pixel(x, y), Some([0, 0, 0, 255]));
            assert_eq!(f.pixel(x + 3, y), Some([255, 255, 255, 255]));
        }
    }
    // Padding row is background.
    assert_eq!(f.pixel(0, 3), Some([255, 255, 255, 255]));
}

#[test]
fn smaller_later_frames_leave_background() {
    let seq =
        FrameSequence::from_frames(vec![array![[0.0, 1.0], [1.0, 0.0]], array![[1.0]]]).unwrap();
    let bg = [10, 20, 30, 255];
    let opts = RenderOpts {
        bg_rgba: bg,
        ..bare_opts()
    };
    let mut r = FrameRenderer::new(&seq, gray(), opts, None).unwrap();
    let s = r.update(FrameIndex(1)).unwrap();
    assert_eq!(s.frame.pixel(0, 4), Some([255, 255, 255, 255]));
    assert_eq!(s.frame.pixel(1, 4), Some(bg));
    assert_eq!(s.frame.pixel(1, 5), Some(bg));
}

#[test]
fn translucent_background_is_rejected() {
    let seq = seq3();
    let opts = RenderOpts {
        bg_rgba: [0, 0, 0, 10],
        ..RenderOpts::default()
    };
    assert!(FrameRenderer::new(&seq, gray(), opts, None).is_err());
}

#[test]
fn system_font_title_band_changes_with_frame() {
    let Some(font) = TitleFont::system_sans() else {
        return;
    };
    let seq = seq3();
    let opts = RenderOpts {
        scale: 60,
        title_band_px: 32,
        margin_px: 0,
        ..RenderOpts::default()
    };
    let mut r = FrameRenderer::new(&seq, gray(), opts, Some(&font)).unwrap();
    let band = |f: &FrameRGBA| f.data[..(f.width as usize) * 32 * 4].to_vec();

    let first = band(&r.state().frame);
    let bg = RenderOpts::default().bg_rgba;
    assert!(first.chunks_exact(4).any(|px| px != bg), "no title ink");

    let second = band(&r.update(FrameIndex(1)).unwrap().frame);
    assert_ne!(first, second);

    let again = band(&r.update(FrameIndex(0)).unwrap().frame);
    assert_eq!(first, again);
}
