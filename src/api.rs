use crate::{distance, plot::ClusterPlot, Dataset, Init, KMeansError, Primitive, Result};
use tracing::debug;

pub type InitDoneCallbackFn<'a, T> = &'a dyn Fn(&KMeansState<T>);
pub type IterationDoneCallbackFn<'a, T> = &'a dyn Fn(&KMeansState<T>, usize, T);

/// What the update step does with a cluster that received no samples.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum EmptyClusterPolicy {
    /// Keep the cluster's centroid at its value from the previous iteration.
    #[default]
    Freeze,
    /// Abort the calculation with [`KMeansError::EmptyCluster`].
    Fail
}

/// This is a structure holding the configuration options for a k-means calculation, such as the
/// iteration limit, the seed of the random number generator, or a couple of callbacks, that can be
/// set to get status information from a running k-means calculation.
///
/// For a more detailed information about all possible options, have a look at [`KMeansConfigBuilder`].
pub struct KMeansConfig<'a, T: Primitive> {
    /// Upper bound for the amount of assignment/update iterations
    pub(crate) max_iter: usize,
    /// Seed of the random number generator, that is created freshly for every fit
    pub(crate) seed: u64,
    /// Initialization method for the centroids
    pub(crate) init: Init<T>,
    /// Handling of clusters without any samples
    pub(crate) empty_cluster: EmptyClusterPolicy,
    /// Callback that is called, when the initialization phase finished
    /// ## Arguments
    /// - **state**: Current [`KMeansState`] after the initialization
    pub(crate) init_done: InitDoneCallbackFn<'a, T>,
    /// Callback that is called after each iteration
    /// ## Arguments
    /// - **state**: Current[`KMeansState`] after the iteration
    /// - **iteration_id**: Number of the current iteration
    /// - **distsum**: New distance sum (**state** contains the distsum from the previous iteration)
    pub(crate) iteration_done: IterationDoneCallbackFn<'a, T>
}
impl<'a, T: Primitive> KMeansConfig<'a, T> {
    pub const DEFAULT_MAX_ITER: usize = 100;
    pub const DEFAULT_SEED: u64 = 42;

    /// Use the [`KMeansConfigBuilder`] to build a [`KMeansConfig`] instance.
    pub fn build() -> KMeansConfigBuilder<'a, T> {
        KMeansConfigBuilder { config: KMeansConfig::default() }
    }
}
impl<'a, T: Primitive> Default for KMeansConfig<'a, T> {
    fn default() -> Self {
        Self {
            max_iter: Self::DEFAULT_MAX_ITER,
            seed: Self::DEFAULT_SEED,
            init: Init::RandomSample,
            empty_cluster: EmptyClusterPolicy::Freeze,
            init_done: &|_| {},
            iteration_done: &|_,_,_| {}
        }
    }
}
impl<'a, T: Primitive> std::fmt::Debug for KMeansConfig<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KMeansConfig")
            .field("max_iter", &self.max_iter)
            .field("seed", &self.seed)
            .field("init", &self.init)
            .field("empty_cluster", &self.empty_cluster)
            .finish_non_exhaustive()
    }
}

pub struct KMeansConfigBuilder<'a, T: Primitive> {
    config: KMeansConfig<'a, T>
}
impl<'a, T: Primitive> KMeansConfigBuilder<'a, T> {
    /// Limit the maximum amount of iterations. Reaching the limit is not an error.
    /// ## Default
    /// `100`
    pub fn max_iter(mut self, max_iter: usize) -> Self {
        self.config.max_iter = max_iter; self
    }
    /// Set the seed of the random number generator used by the initialization.
    /// Equal seeds on equal input give identical results.
    /// ## Default
    /// `42`
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed; self
    }
    /// Set the centroid initialization method.
    /// ## Default
    /// [`Init::RandomSample`]
    pub fn init(mut self, init: Init<T>) -> Self {
        self.config.init = init; self
    }
    /// Set the handling of clusters that end up without samples during an update.
    /// ## Default
    /// [`EmptyClusterPolicy::Freeze`]
    pub fn empty_cluster(mut self, policy: EmptyClusterPolicy) -> Self {
        self.config.empty_cluster = policy; self
    }
    /// Set the callback that should be called after the centroid initialization, before the iteration starts.
    pub fn init_done(mut self, init_done: InitDoneCallbackFn<'a, T>) -> Self {
        self.config.init_done = init_done; self
    }
    /// Set the callback that should be called after each iteration during a running k-means calculation.
    pub fn iteration_done(mut self, iteration_done: IterationDoneCallbackFn<'a, T>) -> Self {
        self.config.iteration_done = iteration_done; self
    }
    /// Return the internally built configuration structure.
    pub fn build(self) -> KMeansConfig<'a, T> { self.config }
}


/// This is the data-structure, storing the current state during calculation, as well as the
/// final result of a fit.
///
/// ## Generics
/// - **T**: Underlying primitive type that was used for the calculation
///
/// ## Fields
/// - **k**: The amount of clusters that were requested when calculating this k-means result
/// - **distsum**: The total sum of squared distances from all samples to their respective centroids (WCSS)
/// - **centroids**: Calculated cluster centers [row-major] = [<centroid0>,<centroid1>,<centroid2>,...]
/// - **centroid_frequency**: Amount of samples in each centroid
/// - **assignments**: Vector mapping each sample to its respective nearest cluster
/// - **centroid_distances**: Vector containing each sample's (squared) distance to its centroid
/// - **iterations**: Amount of completed iterations
/// - **converged**: Whether the last iteration left all centroids unchanged
#[derive(Clone, Debug, PartialEq)]
pub struct KMeansState<T: Primitive> {
    pub k: usize,
    pub distsum: T,
    pub centroids: Vec<T>,
    pub centroid_frequency: Vec<usize>,
    pub assignments: Vec<usize>,
    pub centroid_distances: Vec<T>,
    pub iterations: usize,
    pub converged: bool,

    pub(crate) sample_dims: usize
}
impl<T: Primitive> KMeansState<T> {
    pub(crate) fn new(sample_cnt: usize, sample_dims: usize, k: usize) -> Self {
        Self {
            k,
            distsum: T::infinity(),
            centroids: vec![T::zero();sample_dims * k],
            centroid_frequency: vec![0usize;k],
            assignments: vec![0usize;sample_cnt],
            centroid_distances: vec![T::infinity();sample_cnt],
            iterations: 0,
            converged: false,
            sample_dims
        }
    }
    pub(crate) fn set_centroid_from_iter(&mut self, idx: usize, src: impl Iterator<Item = T>) {
        self.centroids.iter_mut().skip(self.sample_dims * idx).take(self.sample_dims)
                .zip(src)
                .for_each(|(c,s)| *c = s);
    }

    /// Dimensionality of the samples and centroids.
    pub fn sample_dims(&self) -> usize { self.sample_dims }

    /// Coordinates of the centroid of cluster **idx**.
    pub fn centroid(&self, idx: usize) -> &[T] {
        &self.centroids[idx * self.sample_dims..(idx + 1) * self.sample_dims]
    }
}




/// Entrypoint of this crate's API-Surface, the clusterer.
///
/// A [`KMeans`] instance is created with the amount of clusters and a [`KMeansConfig`]. It starts out
/// unfitted; [`KMeans::fit`] runs the Lloyd iteration on a [`Dataset`] and stores the resulting
/// [`KMeansState`]. Every further `fit` starts over from initialization.
///
/// Result queries ([`KMeans::assign_clusters`], [`KMeans::distances`], [`KMeans::compute_wcss`],
/// [`KMeans::state`], ...) fail with [`KMeansError::NotFitted`] until a fit completed.
#[derive(Debug)]
pub struct KMeans<'a, T: Primitive> {
    k: usize,
    config: KMeansConfig<'a, T>,
    state: Option<KMeansState<T>>
}
impl<'a, T: Primitive> KMeans<'a, T> {
    /// Create a new, unfitted clusterer.
    ///
    /// ## Arguments
    /// - **k**: Amount of clusters to search for
    /// - **config**: [`KMeansConfig`] instance, containing several configuration options for the calculation.
    ///
    /// ## Errors
    /// [`KMeansError::InvalidParameter`] when `k` or the configured `max_iter` is zero.
    pub fn new(k: usize, config: KMeansConfig<'a, T>) -> Result<Self> {
        if k == 0 {
            return Err(KMeansError::InvalidParameter { name: "k", message: "must be at least 1" });
        }
        if config.max_iter == 0 {
            return Err(KMeansError::InvalidParameter { name: "max_iter", message: "must be at least 1" });
        }
        Ok(Self { k, config, state: None })
    }

    /// Shortcut for [`KMeans::new`] with the default configuration.
    pub fn with_k(k: usize) -> Result<Self> {
        Self::new(k, KMeansConfig::default())
    }

    pub fn k(&self) -> usize { self.k }
    pub fn max_iter(&self) -> usize { self.config.max_iter }
    pub fn seed(&self) -> u64 { self.config.seed }
    pub fn config(&self) -> &KMeansConfig<'a, T> { &self.config }
    pub fn is_fitted(&self) -> bool { self.state.is_some() }

    /// Normal K-Means algorithm implementation (Lloyd).
    ///
    /// Initializes the centroids, then alternates assignment and update steps until an update leaves
    /// every centroid coordinate exactly unchanged, or `max_iter` iterations are done. Both outcomes
    /// are a successful fit, see [`KMeansState::converged`].
    ///
    /// ## Errors
    /// - [`KMeansError::InvalidClusterCount`] when `k` exceeds the sample count
    /// - [`KMeansError::DimensionMismatch`] when precomputed centroids do not fit the dataset
    /// - [`KMeansError::EmptyCluster`] when a cluster runs empty under [`EmptyClusterPolicy::Fail`]
    ///
    /// On error the previous state (fitted or not) is kept.
    ///
    /// ## Example
    /// ```rust
    /// use lloyd_kmeans::*;
    ///
    /// let data = Dataset::from_rows(&[[0.0f64, 0.0], [0.0, 1.0], [10.0, 0.0], [10.0, 1.0]]).unwrap();
    /// let mut kmean = KMeans::new(2, KMeansConfig::build().max_iter(10).build()).unwrap();
    /// kmean.fit(&data).unwrap();
    ///
    /// println!("Centroids: {:?}", kmean.centroids().unwrap());
    /// println!("Cluster-Assignments: {:?}", kmean.assignments().unwrap());
    /// println!("WCSS: {}", kmean.compute_wcss(&data).unwrap());
    /// ```
    pub fn fit(&mut self, data: &Dataset<T>) -> Result<()> {
        let state = crate::variants::Lloyd::calculate(data, self.k, &self.config)?;
        self.state = Some(state);
        Ok(())
    }

    /// Run only the configured initialization method on **data**, returning the initial centroids
    /// [row-major]. Does not change the state of this clusterer.
    pub fn initialize(&self, data: &Dataset<T>) -> Result<Vec<T>> {
        crate::variants::Lloyd::initial_state(data, self.k, &self.config).map(|s| s.centroids)
    }

    /// The state of the last successful fit.
    pub fn state(&self) -> Result<&KMeansState<T>> {
        self.state.as_ref().ok_or(KMeansError::NotFitted)
    }

    /// Fitted centroids [row-major] = [<centroid0>,<centroid1>,...]
    pub fn centroids(&self) -> Result<&[T]> {
        self.state().map(|s| s.centroids.as_slice())
    }

    /// Cluster label of every sample of the fitted dataset.
    pub fn assignments(&self) -> Result<&[usize]> {
        self.state().map(|s| s.assignments.as_slice())
    }

    /// Label every sample of **data** with its nearest fitted centroid. Equidistant centroids
    /// resolve to the lowest cluster index.
    pub fn assign_clusters(&self, data: &Dataset<T>) -> Result<Vec<usize>> {
        let state = self.state()?;
        data.check_dims(state.sample_dims)?;
        let mut assignments = vec![0usize;data.sample_cnt()];
        let mut centroid_distances = vec![T::zero();data.sample_cnt()];
        distance::assign(data, &state.centroids, &mut assignments, &mut centroid_distances);
        Ok(assignments)
    }

    /// Euclidean distance of every sample of **data** to every fitted centroid [row-major N×K].
    pub fn distances(&self, data: &Dataset<T>) -> Result<Vec<T>> {
        let state = self.state()?;
        data.check_dims(state.sample_dims)?;
        Ok(distance::distance_matrix(data, &state.centroids))
    }

    /// Within-cluster sum of squares of **data** under the stored assignment and centroids.
    ///
    /// **data** has to be the dataset the model was fitted on (same sample count and dimensionality).
    pub fn compute_wcss(&self, data: &Dataset<T>) -> Result<T> {
        let state = self.state()?;
        data.check_dims(state.sample_dims)?;
        if data.sample_cnt() != state.assignments.len() {
            return Err(KMeansError::SampleCountMismatch { expected: state.assignments.len(), found: data.sample_cnt() });
        }
        let wcss = data.iter()
            .zip(state.assignments.iter().cloned())
            .map(|(s, assignment)| distance::squared_euclidean(s, state.centroid(assignment)))
            .sum();
        debug!(wcss = %wcss, "computed within-cluster sum of squares");
        Ok(wcss)
    }

    /// Hand the fitted result over to a visualization collaborator.
    pub fn plot<P: ClusterPlot<T>>(&self, data: &Dataset<T>, plotter: &mut P) -> std::result::Result<(), P::Error>
            where P::Error: From<KMeansError> {
        let state = self.state()?;
        data.check_dims(state.sample_dims)?;
        if data.sample_cnt() != state.assignments.len() {
            return Err(KMeansError::SampleCountMismatch { expected: state.assignments.len(), found: data.sample_cnt() }.into());
        }
        plotter.plot(data, state)
    }
}
