use crate::{distance, Dataset, EmptyClusterPolicy, KMeansConfig, KMeansError, KMeansState, Primitive, Result};
use rand::prelude::*;
use tracing::{debug, trace};

/// Count the samples per cluster, returning the amount of clusters with more than 0 samples.
fn update_cluster_frequencies(assignments: &[usize], centroid_frequency: &mut [usize]) -> usize {
    centroid_frequency.iter_mut().for_each(|v| *v = 0);
    let mut used_centroids_cnt = 0;
    assignments.iter().cloned()
        .for_each(|centroid_id| {
            if centroid_frequency[centroid_id] == 0 {
                used_centroids_cnt += 1;
            }
            centroid_frequency[centroid_id] += 1;
        });
    used_centroids_cnt
}

pub(crate) struct Lloyd<T: Primitive> {
	_p: std::marker::PhantomData<T>
}
impl<T: Primitive> Lloyd<T> {
    fn update_centroids(data: &Dataset<T>, state: &mut KMeansState<T>, policy: EmptyClusterPolicy, iteration: usize) -> Result<()> {
        let sample_dims = data.sample_dims();
        // Sum all samples in a cluster together into new_centroids
        // Count non-empty clusters
        let mut used_centroids_cnt = 0;
        let mut new_centroids = vec![T::zero();state.centroids.len()];

        let (centroid_frequency, assignments) = (&mut state.centroid_frequency, &state.assignments);
        rayon::scope(|s| {
            s.spawn(|_| {
                used_centroids_cnt = update_cluster_frequencies(assignments, centroid_frequency);
            });
            s.spawn(|_| {
                data.iter()
                    .zip(assignments.iter().cloned())
                    .for_each(|(sample, centroid_id)| {
                        new_centroids[centroid_id * sample_dims..(centroid_id + 1) * sample_dims].iter_mut()
                            .zip(sample.iter().cloned())
                            .for_each(|(c, v)| *c += v);
                    });
            });
        });

        if used_centroids_cnt != state.k {
            let empty = state.centroid_frequency.iter().position(|&f| f == 0).unwrap_or_default();
            match policy {
                EmptyClusterPolicy::Fail => return Err(KMeansError::EmptyCluster { cluster: empty, iteration }),
                EmptyClusterPolicy::Freeze => debug!(
                    iteration, empty_clusters = state.k - used_centroids_cnt, first = empty,
                    "keeping previous centroids of empty clusters"),
            }
        }
        // Calculate new centroids from updated cluster_assignments. Empty clusters keep their centroid.
        state.centroids.chunks_exact_mut(sample_dims)
            .zip(new_centroids.chunks_exact(sample_dims))
            .zip(state.centroid_frequency.iter().cloned())
            .filter(|(_, cfreq)| *cfreq != 0)
            .for_each(|((c, nc), cfreq)| {
                let cfreq = T::from_count(cfreq);
                c.iter_mut().zip(nc.iter().cloned()).for_each(|(c, nc)| *c = nc / cfreq);
            });
        Ok(())
    }

    /// Validated, freshly initialized state. The random number generator is seeded here, so every
    /// call gives the same centroids for the same input.
    pub fn initial_state(data: &Dataset<T>, k: usize, config: &KMeansConfig<'_, T>) -> Result<KMeansState<T>> {
        if k > data.sample_cnt() {
            return Err(KMeansError::InvalidClusterCount { k, sample_cnt: data.sample_cnt() });
        }
        let mut state = KMeansState::new(data.sample_cnt(), data.sample_dims(), k);
        let mut rnd = StdRng::seed_from_u64(config.seed);
        config.init.calculate(data, &mut state, &mut rnd)?;
        Ok(state)
    }

    pub fn calculate(data: &Dataset<T>, k: usize, config: &KMeansConfig<'_, T>) -> Result<KMeansState<T>> {
        let mut state = Self::initial_state(data, k, config)?;

        // Notify subscriber about finished initialization
        debug!(k, sample_cnt = data.sample_cnt(), sample_dims = data.sample_dims(), seed = config.seed, "centroids initialized");
        (config.init_done)(&state);

        for i in 1..=config.max_iter {
            distance::update_cluster_assignments(data, &mut state);
            let old_centroids = state.centroids.clone();
            Self::update_centroids(data, &mut state, config.empty_cluster, i)?;
            distance::update_centroid_distances(data, &mut state);
            let new_distsum = state.centroid_distances.iter().cloned().sum();
            state.iterations = i;
            // Exact comparison; NaN coordinates never compare equal
            state.converged = state.centroids == old_centroids;

            // Notify subscriber about finished iteration
            (config.iteration_done)(&state, i, new_distsum);
            trace!(iteration = i, wcss = %new_distsum, previous = %state.distsum, "iteration done");
            state.distsum = new_distsum;
            if state.converged {
                debug!(iterations = i, wcss = %state.distsum, "converged");
                break;
            }
        }
        if !state.converged {
            debug!(max_iter = config.max_iter, wcss = %state.distsum, "iteration limit reached without convergence");
        }
        Ok(state)
    }
}




#[cfg(test)]
mod tests {
    use super::*;
    use crate::{helpers::testing, Init, KMeans};
    use std::cell::RefCell;

    #[test]
    fn frequencies_count_used_clusters() {
        let mut freq = vec![9usize;4];
        assert_eq!(update_cluster_frequencies(&[0, 2, 2, 0, 2], &mut freq), 2);
        assert_eq!(freq, vec![2, 0, 3, 0]);
    }

    #[test]
    fn empty_cluster_is_frozen() {
        let data = Dataset::new(vec![1.0f64, 0.0, 2.0, 0.0, 3.0, 0.0], 3, 2).unwrap();
        let conf = KMeansConfig::build()
            .init(Init::Precomputed(vec![2.0, 0.0, 1337.0, 0.0]))
            .build();
        let res = Lloyd::calculate(&data, 2, &conf).unwrap();

        assert_eq!(&res.assignments, &[0, 0, 0]);
        assert_eq!(&res.centroids, &[2.0, 0.0, 1337.0, 0.0]);
        assert_eq!(&res.centroid_frequency, &[3, 0]);
        assert_eq!(&res.centroid_distances, &[1.0, 0.0, 1.0]);
        assert_eq!(res.distsum, 2.0);
        assert!(res.converged);
        assert_eq!(res.iterations, 1);
    }

    #[test]
    fn empty_cluster_fails_when_requested() {
        let data = Dataset::new(vec![1.0f64, 0.0, 2.0, 0.0, 3.0, 0.0], 3, 2).unwrap();
        let conf = KMeansConfig::build()
            .init(Init::Precomputed(vec![2.0, 0.0, 1337.0, 0.0]))
            .empty_cluster(EmptyClusterPolicy::Fail)
            .build();
        assert_eq!(Lloyd::calculate(&data, 2, &conf), Err(KMeansError::EmptyCluster { cluster: 1, iteration: 1 }));
    }

    #[test]
    fn k_equals_n_gives_one_sample_per_cluster() {
        let data = testing::uniform::<f64>(21, 12, 3);
        for seed in 0..8 {
            let res = Lloyd::calculate(&data, 12, &KMeansConfig::build().seed(seed).build()).unwrap();
            assert_eq!(res.distsum, 0.0);
            assert!(res.centroid_frequency.iter().all(|&f| f == 1));
            assert!(res.converged);
            assert_eq!(res.iterations, 1);
        }
    }

    #[test]
    fn k_equals_n_with_duplicate_samples_runs_into_empty_cluster() {
        // two identical samples -> two identical initial centroids, the lower index takes both samples
        let data = Dataset::from_rows(&[[1.0f64, 1.0], [1.0, 1.0], [5.0, 5.0]]).unwrap();

        let res = Lloyd::calculate(&data, 3, &KMeansConfig::default()).unwrap();
        assert_eq!(res.distsum, 0.0);
        assert_eq!(res.centroid_frequency.iter().filter(|&&f| f == 0).count(), 1);
        assert_eq!(res.assignments[0], res.assignments[1]);
        assert_ne!(res.assignments[0], res.assignments[2]);
        let empty = res.centroid_frequency.iter().position(|&f| f == 0).unwrap();
        assert_eq!(res.centroid(empty), &[1.0, 1.0]);
        assert!(empty > res.assignments[0]);

        let conf = KMeansConfig::build().empty_cluster(EmptyClusterPolicy::Fail).build();
        assert!(matches!(Lloyd::calculate(&data, 3, &conf), Err(KMeansError::EmptyCluster { iteration: 1, .. })));
    }

    #[test]
    fn iteration_limit_is_not_an_error() {
        let data = Dataset::from_rows(&[[0.0f64, 0.0], [0.0, 1.0], [10.0, 0.0], [10.0, 1.0]]).unwrap();
        let conf = KMeansConfig::build()
            .max_iter(1)
            .init(Init::Precomputed(vec![0.0, 0.0, 0.0, 1.0]))
            .build();
        let res = Lloyd::calculate(&data, 2, &conf).unwrap();
        assert_eq!(res.iterations, 1);
        assert!(!res.converged);
        assert_eq!(res.centroids, vec![5.0, 0.0, 5.0, 1.0]);
    }

    #[test]
    fn wcss_is_non_increasing() {
        wcss_is_non_increasing_for::<f64>(1e-12);
        wcss_is_non_increasing_for::<f32>(1e-4);
    }

    fn wcss_is_non_increasing_for<T: Primitive>(rel_tol: f64) {
        let data = testing::uniform::<T>(1337, 2000, 4);
        let trace = RefCell::new(Vec::new());
        let iteration_done = |s: &KMeansState<T>, nr: usize, new_distsum: T| {
            trace.borrow_mut().push((nr, s.distsum, new_distsum));
        };
        let conf = KMeansConfig::build().iteration_done(&iteration_done).build();
        let mut kmean = KMeans::new(8, conf).unwrap();
        kmean.fit(&data).unwrap();

        let trace = trace.borrow();
        assert!(trace.len() > 1);
        assert_eq!(trace.len(), kmean.state().unwrap().iterations);
        assert!(trace[0].1.is_infinite());
        for (idx, w) in trace.windows(2).enumerate() {
            assert_eq!(w[0].0, idx + 1);
            assert_eq!(w[1].1, w[0].2); // state carries the previous distsum
            let (prev, next) = (w[0].2.to_f64().unwrap(), w[1].2.to_f64().unwrap());
            assert!(next <= prev + prev.abs() * rel_tol, "WCSS increased from {} to {} in iteration {}", prev, next, idx + 2);
        }
        assert_eq!(trace.last().unwrap().2, kmean.state().unwrap().distsum);
    }

    #[test]
    fn runs_are_deterministic() {
        let data = testing::blobs::<f64>(99, 5, 40, 3);
        let conf = || KMeansConfig::build().seed(7).max_iter(50).build();
        let a = Lloyd::calculate(&data, 5, &conf()).unwrap();
        let b = Lloyd::calculate(&data, 5, &conf()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.centroids.len(), 5 * 3);
        assert!(a.assignments.iter().all(|&l| l < 5));
    }

    #[test]
    fn callbacks_are_called() {
        let data = testing::blobs::<f32>(4, 2, 10, 2);
        let init_calls = RefCell::new(0);
        let init_done = |s: &KMeansState<f32>| {
            assert_eq!(s.iterations, 0);
            *init_calls.borrow_mut() += 1;
        };
        let conf = KMeansConfig::build().init_done(&init_done).build();
        let res = Lloyd::calculate(&data, 2, &conf).unwrap();
        assert_eq!(*init_calls.borrow(), 1);
        assert!(res.iterations >= 1);
    }
}
