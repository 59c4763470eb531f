//! # lloyd_kmeans - API documentation
//!
//! lloyd_kmeans is a small rust library for reproducible k-means clustering (Lloyd's algorithm).
//!
//! ## Design target
//! Given a [`Dataset`] of N samples and a cluster count k, the samples are partitioned into k groups
//! by alternating an assignment step (every sample goes to its nearest centroid under the euclidean
//! distance) and an update step (every centroid becomes the mean of its samples), until an update
//! leaves all centroids exactly unchanged or the iteration limit is hit.
//!
//! Runs are deterministic: the initialization draws from a random number generator that is seeded
//! from the configuration at every fit, and ties in the assignment step always resolve to the lowest
//! cluster index. The assignment step is parallelized over the samples using rayon.
//!
//! ## Supported primitive types
//! - [`f32`]
//! - [`f64`]
//!
//! ## Example
//! ```rust
//! use lloyd_kmeans::*;
//!
//! let (sample_cnt, sample_dims, k) = (2000, 8, 4);
//!
//! // Generate some data
//! let samples: Vec<f64> = (0..sample_cnt * sample_dims).map(|i| ((i * 7919) % 1000) as f64 / 1000.0).collect();
//! let data = Dataset::new(samples, sample_cnt, sample_dims).unwrap();
//!
//! let mut kmean = KMeans::new(k, KMeansConfig::build().max_iter(100).seed(42).build()).unwrap();
//! kmean.fit(&data).unwrap();
//!
//! println!("Centroids: {:?}", kmean.centroids().unwrap());
//! println!("Cluster-Assignments: {:?}", kmean.assignments().unwrap());
//! println!("WCSS: {}", kmean.compute_wcss(&data).unwrap());
//! ```
//!
//! ## Example (using the status event callbacks)
//! ```rust
//! use lloyd_kmeans::*;
//!
//! let data = Dataset::from_rows(&[[1.0f32, 0.0], [1.5, 0.5], [8.0, 9.0], [9.0, 8.5], [0.5, 1.0]]).unwrap();
//!
//! let conf: KMeansConfig<f32> = KMeansConfig::build()
//!     .init_done(&|_| println!("Initialization completed."))
//!     .iteration_done(&|s, nr, new_distsum|
//!         println!("Iteration {} - WCSS: {:.2} -> {:.2}", nr, s.distsum, new_distsum))
//!     .build();
//!
//! let mut kmean = KMeans::new(2, conf).unwrap();
//! kmean.fit(&data).unwrap();
//! assert!(kmean.state().unwrap().converged);
//! ```
//!
//! ## Short API-Overview / Description
//! Entry-point of the library is the [`KMeans`] struct (the clusterer). It is created with the amount
//! of clusters and a [`KMeansConfig`] built via [`KMeansConfig::build`], and starts out unfitted.
//! [`KMeans::fit`] stores the final [`KMeansState`], which can then be inspected or queried through
//! [`KMeans::assign_clusters`], [`KMeans::distances`] and [`KMeans::compute_wcss`].
//!
//! Clusters that run empty keep their previous centroid by default; see [`EmptyClusterPolicy`].
//! All failures are reported as [`KMeansError`].

#[macro_use] mod helpers;
mod memory;
mod error;
mod dataset;
mod distance;
mod api;
mod variants;
mod inits;
mod plot;

pub use api::{EmptyClusterPolicy, InitDoneCallbackFn, IterationDoneCallbackFn, KMeans, KMeansConfig, KMeansConfigBuilder, KMeansState};
pub use dataset::Dataset;
pub use error::{KMeansError, Result};
pub use inits::Init;
pub use memory::Primitive;
pub use plot::ClusterPlot;
