use super::*;

#[test]
fn names_round_trip_through_from_str() {
    for name in PaletteName::ALL {
        assert_eq!(name.as_str().parse::<PaletteName>().unwrap(), name);
    }
    assert!("jet".parse::<PaletteName>().is_err());
    assert_eq!(PaletteName::default(), PaletteName::Twilight);
}

#[test]
fn twilight_is_cyclic() {
    let p = Palette::named(PaletteName::Twilight);
    assert_eq!(p.entry(0), p.entry(LUT_SIZE - 1));
    assert_eq!(p.entry(0), [226, 217, 226]);
    // Dark in the middle.
    let mid = p.entry(LUT_SIZE / 2);
    assert!(mid.iter().all(|&c| c < 80), "{mid:?}");
}

#[test]
fn reversal_swaps_ends() {
    let p = Palette::named(PaletteName::Gray);
    let r = p.clone().reversed();
    assert!(r.is_reversed());
    assert_eq!(r.lookup(0.0), p.lookup(1.0));
    assert_eq!(r.lookup(1.0), p.lookup(0.0));
    assert_eq!(r.lookup(0.0), [255, 255, 255, 255]);

    let twice = r.reversed();
    assert!(!twice.is_reversed());
    assert_eq!(twice, p);
}

#[test]
fn lookup_clips_and_flags_nan() {
    let p = Palette::named(PaletteName::Gray);
    assert_eq!(p.lookup(-3.0), [0, 0, 0, 255]);
    assert_eq!(p.lookup(7.0), [255, 255, 255, 255]);
    assert_eq!(p.lookup(f64::NAN), [0, 0, 0, 0]);
    assert_eq!(p.lookup(1.0), p.lookup(0.9999));
}

#[test]
fn lookup_is_monotonic_for_gray() {
    let p = Palette::named(PaletteName::Gray);
    let mut prev = 0u8;
    for i in 0..=100 {
        let [r, g, b, a] = p.lookup(i as f64 / 100.0);
        assert_eq!((r, a), (g, 255));
        assert_eq!(g, b);
        assert!(r >= prev);
        prev = r;
    }
}

#[test]
fn twilight_shifted_is_dark_at_both_ends() {
    let p = Palette::named(PaletteName::TwilightShifted);
    for c in [p.entry(0), p.entry(LUT_SIZE - 1)] {
        assert!(c.iter().all(|&v| v < 80), "{c:?}");
    }
}

#[test]
fn names_serialize_as_snake_case() {
    let json = serde_json::to_string(&PaletteName::TwilightShifted).unwrap();
    assert_eq!(json, r#""twilight_shifted""#);
    let back: PaletteName = serde_json::from_str(r#""gray""#).unwrap();
    assert_eq!(back, PaletteName::Gray);
}
