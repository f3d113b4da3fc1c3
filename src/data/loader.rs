use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use ndarray::{Array2, Ix2, OwnedRepr};
use ndarray_npy::{NpzReader, ReadNpyError, ReadNpzError};

use crate::foundation::core::{FrameIndex, FrameRange};
use crate::foundation::error::{ReelError, ReelResult};

/// Ordered, non-empty sequence of 2D frames.
///
/// Order is the storage order of the source archive. Array names are kept for diagnostics only;
/// frames are addressed by position.
#[derive(Clone, Debug)]
pub struct FrameSequence {
    names: Vec<String>,
    frames: Vec<Array2<f64>>,
}

impl FrameSequence {
    /// Build a sequence from unnamed frames. Names default to `"0"`, `"1"`, ...
    pub fn from_frames(frames: Vec<Array2<f64>>) -> ReelResult<Self> {
        let names = (0..frames.len()).map(|i| i.to_string()).collect();
        Self::from_parts(names, frames)
    }

    /// Build a sequence from `(name, frame)` pairs, keeping their order.
    pub fn from_named(named: Vec<(String, Array2<f64>)>) -> ReelResult<Self> {
        let (names, frames) = named.into_iter().unzip();
        Self::from_parts(names, frames)
    }

    fn from_parts(names: Vec<String>, frames: Vec<Array2<f64>>) -> ReelResult<Self> {
        if frames.is_empty() {
            return Err(ReelError::validation(
                "frame sequence is empty (the archive contains no arrays)",
            ));
        }
        Ok(Self { names, frames })
    }

    /// Number of frames (always at least one).
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frame range `[0, len)`.
    pub fn range(&self) -> FrameRange {
        FrameRange::first(self.frames.len())
    }

    /// Borrow frame `idx`, if present.
    pub fn get(&self, idx: FrameIndex) -> Option<&Array2<f64>> {
        idx.as_usize().ok().and_then(|i| self.frames.get(i))
    }

    /// The first frame. It fixes the canvas size and the color scale.
    pub fn first(&self) -> &Array2<f64> {
        &self.frames[0]
    }

    /// `(rows, cols)` of the first frame.
    pub fn dims(&self) -> (usize, usize) {
        self.first().dim()
    }

    /// Borrow all frames in order.
    pub fn frames(&self) -> &[Array2<f64>] {
        &self.frames
    }

    /// Array names in order.
    pub fn names(&self) -> &[String] {
        &self.names
    }
}

/// Load every array of an `.npz` archive at `path`.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn load_npz(path: &Path) -> ReelResult<FrameSequence> {
    let file = File::open(path).map_err(|e| {
        ReelError::load(format!("failed to open archive '{}': {e}", path.display()))
    })?;
    let seq = read_npz(BufReader::new(file))?;
    tracing::info!(
        frames = seq.len(),
        rows = seq.dims().0,
        cols = seq.dims().1,
        "loaded frame sequence"
    );
    Ok(seq)
}

/// Read every array of an `.npz` archive from `reader`, in storage order.
pub fn read_npz<R: Read + Seek>(reader: R) -> ReelResult<FrameSequence> {
    let mut npz = NpzReader::new(reader)
        .map_err(|e| ReelError::load(format!("not a readable npz archive: {e}")))?;
    let names = npz
        .names()
        .map_err(|e| ReelError::load(format!("failed to list archive entries: {e}")))?;

    let mut named = Vec::with_capacity(names.len());
    for (index, name) in names.into_iter().enumerate() {
        let frame = read_entry(&mut npz, index, &name)?;
        tracing::debug!(%name, rows = frame.nrows(), cols = frame.ncols(), "read array");
        named.push((name, frame));
    }
    FrameSequence::from_named(named)
}

fn read_entry<R: Read + Seek>(
    npz: &mut NpzReader<R>,
    index: usize,
    name: &str,
) -> ReelResult<Array2<f64>> {
    // Element types are tried in turn; a descriptor mismatch moves on to the next one.
    macro_rules! try_dtype {
        ($t:ty, $conv:expr) => {
            match npz.by_index::<OwnedRepr<$t>, Ix2>(index) {
                Ok(a) => return Ok(a.mapv($conv)),
                Err(e) if is_wrong_descriptor(&e) => {}
                Err(e) => return Err(entry_error(name, e)),
            }
        };
    }

    try_dtype!(f64, |v| v);
    try_dtype!(f32, f64::from);
    try_dtype!(u8, f64::from);
    try_dtype!(u16, f64::from);
    try_dtype!(u32, f64::from);
    try_dtype!(u64, |v| v as f64);
    try_dtype!(i8, f64::from);
    try_dtype!(i16, f64::from);
    try_dtype!(i32, f64::from);
    try_dtype!(i64, |v| v as f64);
    try_dtype!(bool, |v| if v { 1.0 } else { 0.0 });

    Err(ReelError::load(format!(
        "array '{name}' has an unsupported element type"
    )))
}

fn is_wrong_descriptor(err: &ReadNpzError) -> bool {
    matches!(err, ReadNpzError::Npy(ReadNpyError::WrongDescriptor(_)))
}

fn entry_error(name: &str, err: ReadNpzError) -> ReelError {
    match err {
        ReadNpzError::Npy(ReadNpyError::WrongNdim(_, actual)) => ReelError::validation(format!(
            "array '{name}' is {actual}-dimensional; frames must be 2-D"
        )),
        other => ReelError::load(format!("failed to read array '{name}': {other}")),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/data/loader.rs"]
mod tests;
