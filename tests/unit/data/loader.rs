use std::io::Cursor;

use ndarray::{Array3, array};
use ndarray_npy::NpzWriter;

use super::*;

fn archive(build: impl FnOnce(&mut NpzWriter<Cursor<Vec<u8>>>)) -> Cursor<Vec<u8>> {
    let mut npz = NpzWriter::new(Cursor::new(Vec::new()));
    build(&mut npz);
    let mut cursor = npz.finish().unwrap();
    cursor.set_position(0);
    cursor
}

#[test]
fn keeps_storage_order_not_name_order() {
    let bytes = archive(|npz| {
        npz.add_array("zeta", &array![[1.0f64, 2.0]]).unwrap();
        npz.add_array("alpha", &array![[3.0f64, 4.0]]).unwrap();
        npz.add_array("mid", &array![[5.0f64, 6.0]]).unwrap();
    });

    let seq = read_npz(bytes).unwrap();
    assert_eq!(seq.len(), 3);
    assert_eq!(seq.names(), ["zeta", "alpha", "mid"]);
    assert_eq!(seq.frames()[0], array![[1.0, 2.0]]);
    assert_eq!(seq.frames()[1], array![[3.0, 4.0]]);
    assert_eq!(seq.frames()[2], array![[5.0, 6.0]]);
}

#[test]
fn converts_integer_and_float_dtypes() {
    let bytes = archive(|npz| {
        npz.add_array("0", &array![[0u8, 255u8], [7u8, 9u8]]).unwrap();
        npz.add_array("1", &array![[0.5f32, -1.5f32], [2.0, 3.0]])
            .unwrap();
        npz.add_array("2", &array![[-4i64, 10i64], [0, 1]]).unwrap();
        npz.add_array("3", &array![[true, false], [false, true]])
            .unwrap();
    });

    let seq = read_npz(bytes).unwrap();
    assert_eq!(seq.dims(), (2, 2));
    assert_eq!(seq.frames()[0], array![[0.0, 255.0], [7.0, 9.0]]);
    assert_eq!(seq.frames()[1], array![[0.5, -1.5], [2.0, 3.0]]);
    assert_eq!(seq.frames()[2], array![[-4.0, 10.0], [0.0, 1.0]]);
    assert_eq!(seq.frames()[3], array![[1.0, 0.0], [0.0, 1.0]]);
}

#[test]
fn empty_archive_is_rejected() {
    let bytes = archive(|_| {});
    let err = read_npz(bytes).unwrap_err();
    assert!(matches!(err, ReelError::Validation(_)), "{err}");
}

#[test]
fn non_2d_array_is_rejected() {
    let bytes = archive(|npz| {
        npz.add_array("cube", &Array3::<f64>::zeros((2, 2, 2)))
            .unwrap();
    });
    let err = read_npz(bytes).unwrap_err();
    assert!(err.to_string().contains("cube"), "{err}");
}

#[test]
fn garbage_bytes_are_a_load_error() {
    let err = read_npz(Cursor::new(b"definitely not a zip".to_vec())).unwrap_err();
    assert!(matches!(err, ReelError::Load(_)), "{err}");
}

#[test]
fn missing_file_is_a_load_error() {
    let err = load_npz(Path::new("target/does/not/exist.npz")).unwrap_err();
    assert!(matches!(err, ReelError::Load(_)), "{err}");
}

#[test]
fn from_frames_requires_at_least_one_frame() {
    assert!(FrameSequence::from_frames(Vec::new()).is_err());

    let seq = FrameSequence::from_frames(vec![array![[1.0]], array![[2.0]]]).unwrap();
    assert_eq!(seq.names(), ["0", "1"]);
    assert_eq!(seq.range().iter().count(), 2);
    assert_eq!(seq.get(FrameIndex(1)), Some(&array![[2.0]]));
    assert!(seq.get(FrameIndex(2)).is_none());
}
