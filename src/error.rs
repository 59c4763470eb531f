use thiserror::Error;

/// Errors returned by the k-means calculation and the queries on a fitted model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KMeansError {
    /// A configuration value is out of range (`k == 0`, `max_iter == 0`).
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: &'static str,
    },

    /// More clusters were requested than there are samples to pick centroids from.
    #[error("invalid cluster count: requested {k}, but dataset has {sample_cnt} samples")]
    InvalidClusterCount {
        /// Requested number of clusters.
        k: usize,
        /// Number of samples in the dataset.
        sample_cnt: usize,
    },

    /// A cluster received no samples while [`crate::EmptyClusterPolicy::Fail`] was configured.
    #[error("cluster {cluster} received no samples in iteration {iteration}")]
    EmptyCluster {
        /// Index of the empty cluster.
        cluster: usize,
        /// 1-based iteration in which the cluster ran empty.
        iteration: usize,
    },

    /// Results were queried before [`crate::KMeans::fit`] completed.
    #[error("k-means model is not fitted yet")]
    NotFitted,

    /// Sample (or centroid) dimensionality does not match.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Expected dimensionality (or buffer length).
        expected: usize,
        /// Found dimensionality (or buffer length).
        found: usize,
    },

    /// A query dataset does not have the sample count the model was fitted on.
    #[error("sample count mismatch: model was fitted on {expected} samples, found {found}")]
    SampleCountMismatch {
        /// Sample count of the fitted dataset.
        expected: usize,
        /// Sample count of the passed dataset.
        found: usize,
    },

    /// The dataset cannot be clustered at all.
    #[error("invalid dataset: {0}")]
    InvalidDataset(&'static str),
}

impl KMeansError {
    /// Whether this error belongs to the configuration class (bad `k`, `max_iter`, or `k > n`).
    pub fn is_configuration(&self) -> bool {
        matches!(self, KMeansError::InvalidParameter{..} | KMeansError::InvalidClusterCount{..})
    }
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, KMeansError>;
