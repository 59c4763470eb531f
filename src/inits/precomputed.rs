use crate::{Dataset, KMeansError, KMeansState, Primitive, Result};

#[inline(always)] pub fn calculate<T: Primitive>(data: &Dataset<T>, state: &mut KMeansState<T>, computed: &[T]) -> Result<()> {
    let expected = state.k * data.sample_dims();
    if computed.len() != expected {
        return Err(KMeansError::DimensionMismatch { expected, found: computed.len() });
    }
    computed.chunks_exact(data.sample_dims()).enumerate().for_each(|(ci, c)| {
        state.set_centroid_from_iter(ci, c.iter().cloned());
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::*;

    #[test]
    fn train_with_precomputed_centroids() {
        let data = Dataset::new(vec![0.0f32, 1.0, 10.0, 11.0, 20.0, 21.0], 6, 1).unwrap();
        let conf = KMeansConfig::build().max_iter(200).init(Init::Precomputed(vec![0.0, 21.0])).build();
        let mut kmean = KMeans::new(2, conf).unwrap();
        kmean.fit(&data).unwrap();

        // 10 is closer to 0 than to 21, 11 is not
        assert_eq!(kmean.assignments().unwrap(), &[0, 0, 0, 1, 1, 1]);
        assert_eq!(kmean.centroids().unwrap(), &[11.0 / 3.0, 52.0 / 3.0]);
        assert!(kmean.state().unwrap().converged);
    }

    #[test]
    fn centroid_count_must_match_k() {
        let data = Dataset::new(vec![0.0f64, 1.0, 10.0, 11.0], 2, 2).unwrap();
        let conf = KMeansConfig::build().init(Init::Precomputed(vec![0.0, 1.0, 2.0])).build();
        let mut kmean = KMeans::new(2, conf).unwrap();
        assert_eq!(kmean.fit(&data), Err(KMeansError::DimensionMismatch { expected: 4, found: 3 }));
    }
}
