use crate::{Dataset, KMeansError, KMeansState, Primitive, Result};
use rand::{seq::index, RngCore};

#[inline(always)] pub fn calculate<T: Primitive>(data: &Dataset<T>, state: &mut KMeansState<T>, rnd: &mut dyn RngCore) -> Result<()> {
    if state.k > data.sample_cnt() {
        return Err(KMeansError::InvalidClusterCount { k: state.k, sample_cnt: data.sample_cnt() });
    }
    index::sample(rnd, data.sample_cnt(), state.k).into_iter()
        .enumerate()
        .for_each(|(ci, si)| { // Copy randomly chosen samples into state.centroids
            state.set_centroid_from_iter(ci, data.sample(si).iter().cloned());
        });
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::testing;
    use rand::prelude::*;

    #[test]
    fn picks_distinct_samples() {
        let data = testing::uniform::<f64>(5, 50, 3);
        for seed in 0..20 {
            let mut state = KMeansState::new(data.sample_cnt(), data.sample_dims(), 50);
            calculate(&data, &mut state, &mut StdRng::seed_from_u64(seed)).unwrap();

            // k == n: every sample is chosen exactly once
            let mut chosen: Vec<usize> = state.centroids.chunks_exact(3)
                .map(|c| data.iter().position(|s| s == c).unwrap())
                .collect();
            chosen.sort_unstable();
            assert_eq!(chosen, (0..50).collect::<Vec<_>>());
        }
    }

    #[test]
    fn is_reproducible_per_seed() {
        let data = testing::uniform::<f32>(9, 100, 2);
        let run = |seed| {
            let mut state = KMeansState::new(data.sample_cnt(), data.sample_dims(), 4);
            calculate(&data, &mut state, &mut StdRng::seed_from_u64(seed)).unwrap();
            state.centroids
        };
        assert_eq!(run(1), run(1));
        assert_ne!(run(1), run(2));
    }

    #[test]
    fn copies_instead_of_aliasing() {
        let data = Dataset::from_rows(&[[1.0f64, 2.0]]).unwrap();
        let mut state = KMeansState::new(1, 2, 1);
        calculate(&data, &mut state, &mut StdRng::seed_from_u64(0)).unwrap();
        state.centroids[0] = 7.0;
        assert_eq!(data.sample(0), &[1.0, 2.0]);
    }

    #[test]
    fn rejects_k_above_sample_count() {
        let data = testing::uniform::<f64>(1, 3, 2);
        let mut state = KMeansState::new(3, 2, 4);
        assert_eq!(calculate(&data, &mut state, &mut StdRng::seed_from_u64(0)),
            Err(KMeansError::InvalidClusterCount { k: 4, sample_cnt: 3 }));
    }
}
