//! Renders a fitted 2-D clustering as a text scatter plot: samples are drawn with their cluster
//! label, centroids with `X`.
use lloyd_kmeans::{ClusterPlot, Dataset, KMeans, KMeansConfig, KMeansError, KMeansState};
use rand::prelude::*;
use std::io::Write;
use thiserror::Error;

#[derive(Debug, Error)]
enum PlotError {
    #[error(transparent)]
    KMeans(#[from] KMeansError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("scatter plots need 2-dimensional samples, got {0}")]
    NotTwoDimensional(usize),
}

struct TextScatter<W: Write> {
    out: W,
    width: usize,
    height: usize,
}
impl<W: Write> ClusterPlot<f64> for TextScatter<W> {
    type Error = PlotError;

    fn plot(&mut self, data: &Dataset<f64>, result: &KMeansState<f64>) -> Result<(), PlotError> {
        if data.sample_dims() != 2 {
            return Err(PlotError::NotTwoDimensional(data.sample_dims()));
        }
        let points = data.iter().chain(result.centroids.chunks_exact(2));
        let (mut min, mut max) = ([f64::INFINITY; 2], [f64::NEG_INFINITY; 2]);
        for p in points {
            for d in 0..2 {
                min[d] = min[d].min(p[d]);
                max[d] = max[d].max(p[d]);
            }
        }
        let cell = |p: &[f64]| {
            let scale = |v: f64, d: usize, cells: usize| {
                let span = (max[d] - min[d]).max(f64::EPSILON);
                (((v - min[d]) / span) * (cells - 1) as f64).round() as usize
            };
            (scale(p[0], 0, self.width), self.height - 1 - scale(p[1], 1, self.height))
        };

        let mut grid = vec![vec![' '; self.width]; self.height];
        for (sample, &label) in data.iter().zip(result.assignments.iter()) {
            let (x, y) = cell(sample);
            grid[y][x] = std::char::from_digit((label % 36) as u32, 36).unwrap_or('?');
        }
        for centroid in result.centroids.chunks_exact(2) {
            let (x, y) = cell(centroid);
            grid[y][x] = 'X';
        }

        writeln!(self.out, "K-Means Clustering (k = {}, WCSS = {:.3})", result.k, result.distsum)?;
        for row in grid {
            writeln!(self.out, "|{}|", row.into_iter().collect::<String>())?;
        }
        Ok(())
    }
}

fn main() -> Result<(), PlotError> {
    // three blobs around (0, 0), (10, 0) and (5, 8)
    let mut rnd = StdRng::seed_from_u64(3);
    let mut rows = Vec::new();
    for &(cx, cy) in &[(0.0f64, 0.0f64), (10.0, 0.0), (5.0, 8.0)] {
        for _ in 0..60 {
            rows.push([cx + rnd.gen_range(-2.0f64, 2.0), cy + rnd.gen_range(-2.0f64, 2.0)]);
        }
    }
    let data = Dataset::from_rows(&rows)?;

    let mut kmean = KMeans::new(3, KMeansConfig::build().max_iter(10).build())?;
    kmean.fit(&data)?;

    let stdout = std::io::stdout();
    let mut plot = TextScatter { out: stdout.lock(), width: 60, height: 24 };
    kmean.plot(&data, &mut plot)
}
