use crate::{Dataset, KMeansState, Primitive};

/// Visualization collaborator consuming a fitted result, e.g. a 2-D scatter plot with samples
/// colored by label and the centroids marked. Rendering lives outside this crate; implementors
/// are invoked through [`crate::KMeans::plot`], which guarantees that **data** matches **result**.
pub trait ClusterPlot<T: Primitive> {
    type Error;

    fn plot(&mut self, data: &Dataset<T>, result: &KMeansState<T>) -> Result<(), Self::Error>;
}
