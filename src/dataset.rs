use crate::{KMeansError, Primitive, Result};
use std::slice::ChunksExact;

/// Read-only sample matrix a [`crate::KMeans`] model is fitted on and queried with.
///
/// Samples are stored row-major: `[<sample0>,<sample1>,<sample2>,...]`, every sample
/// having exactly `sample_dims` coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset<T: Primitive> {
    samples: Vec<T>,
    sample_cnt: usize,
    sample_dims: usize
}
impl<T: Primitive> Dataset<T> {
    /// Take over a row-major sample buffer.
    ///
    /// ## Arguments
    /// - **samples**: Vector of samples [row-major] = [<sample0>,<sample1>,<sample2>,...]
    /// - **sample_cnt**: Amount of samples, contained in the passed **samples** vector
    /// - **sample_dims**: Amount of dimensions each sample from the **samples** vector has
    pub fn new(samples: Vec<T>, sample_cnt: usize, sample_dims: usize) -> Result<Self> {
        if sample_dims == 0 {
            return Err(KMeansError::InvalidDataset("samples need at least one dimension"));
        }
        if samples.len() != sample_cnt * sample_dims {
            return Err(KMeansError::DimensionMismatch { expected: sample_cnt * sample_dims, found: samples.len() });
        }
        Ok(Self { samples, sample_cnt, sample_dims })
    }

    /// Build a dataset from one slice per sample. All rows must share the first row's length.
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> Result<Self> {
        let sample_dims = rows.first()
            .map(|r| r.as_ref().len())
            .ok_or(KMeansError::InvalidDataset("dataset contains no samples"))?;
        let mut samples = Vec::with_capacity(rows.len() * sample_dims);
        for row in rows {
            let row = row.as_ref();
            if row.len() != sample_dims {
                return Err(KMeansError::DimensionMismatch { expected: sample_dims, found: row.len() });
            }
            samples.extend_from_slice(row);
        }
        Self::new(samples, rows.len(), sample_dims)
    }

    pub fn sample_cnt(&self) -> usize { self.sample_cnt }
    pub fn sample_dims(&self) -> usize { self.sample_dims }

    /// The raw row-major buffer.
    pub fn samples(&self) -> &[T] { &self.samples }

    /// Coordinates of the sample at **idx**.
    ///
    /// ## Panics
    /// If `idx >= sample_cnt`.
    pub fn sample(&self, idx: usize) -> &[T] {
        &self.samples[idx * self.sample_dims..(idx + 1) * self.sample_dims]
    }

    /// Iterate over all samples in dataset order.
    pub fn iter(&self) -> ChunksExact<'_, T> {
        self.samples.chunks_exact(self.sample_dims)
    }

    pub(crate) fn check_dims(&self, sample_dims: usize) -> Result<()> {
        if self.sample_dims != sample_dims {
            return Err(KMeansError::DimensionMismatch { expected: sample_dims, found: self.sample_dims });
        }
        Ok(())
    }
}
