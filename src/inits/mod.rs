use crate::{Dataset, KMeansState, Primitive, Result};
use rand::RngCore;

pub(crate) mod precomputed;
pub(crate) mod randomsample;

/// Centroid initialization methods.
#[derive(Clone, Debug, PartialEq)]
pub enum Init<T: Primitive> {
    /// Random sample initialization (a.k.a. Forgy)
    ///
    /// ## Description
    /// This initialization method selects k distinct samples uniformly at random (without replacement)
    /// and copies them as initial centroids. The selection only depends on the configured seed.
    RandomSample,
    /// Precomputed initialization
    ///
    /// ## Description
    /// Starts from the given centroids [row-major] = [<centroid0>,<centroid1>,...]. The vector has to
    /// contain exactly `k * sample_dims` values.
    Precomputed(Vec<T>)
}
impl<T: Primitive> Default for Init<T> {
    fn default() -> Self { Init::RandomSample }
}
impl<T: Primitive> Init<T> {
    pub(crate) fn calculate(&self, data: &Dataset<T>, state: &mut KMeansState<T>, rnd: &mut dyn RngCore) -> Result<()> {
        match self {
            Init::RandomSample => randomsample::calculate(data, state, rnd),
            Init::Precomputed(centroids) => precomputed::calculate(data, state, centroids)
        }
    }
}
