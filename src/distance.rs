use crate::{helpers, Dataset, KMeansState, Primitive};
use rayon::prelude::*;

#[inline(always)]
pub(crate) fn squared_euclidean<T: Primitive>(a: &[T], b: &[T]) -> T {
    a.iter().zip(b.iter())
        .map(|(&av, &bv)| av - bv)      // <sample> - <centroid>
        .map(|v| v * v)                 // <vec_components> ^2
        .sum()                          // sum(<vec_components>^2)
}

#[inline(always)]
pub(crate) fn euclidean<T: Primitive>(a: &[T], b: &[T]) -> T {
    squared_euclidean(a, b).sqrt()
}

/// Nearest centroid of **sample**, scanning centroids in index order so that the lowest index wins ties.
/// Returns the centroid index and the squared distance to it.
#[inline(always)]
pub(crate) fn nearest_centroid<T: Primitive>(sample: &[T], centroids: &[T]) -> (usize, T) {
    let dists = centroids.chunks_exact(sample.len())
        .map(|c| squared_euclidean(sample, c))
        .map(|sq| DistancePair(sq.sqrt(), sq));
    helpers::first_min_index(dists)
        .map(|(idx, d)| (idx, d.1))
        .unwrap_or((0, T::infinity())) // only NaN distances
}

/// Compared by the plain L2 distance only; the squared distance is carried along.
#[derive(Clone, Copy)]
struct DistancePair<T>(T, T);
impl<T: PartialEq> PartialEq for DistancePair<T> {
    fn eq(&self, other: &Self) -> bool { self.0 == other.0 }
}
impl<T: PartialOrd> PartialOrd for DistancePair<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> { self.0.partial_cmp(&other.0) }
}

// rayon does not do static scheduling (which is more appropriate here), so the work-packet size is set manually
fn work_packet_size(sample_cnt: usize) -> usize {
    (sample_cnt / rayon::current_num_threads()).max(1)
}

/// Euclidean distance of every sample to every centroid, row-major N×K.
pub(crate) fn distance_matrix<T: Primitive>(data: &Dataset<T>, centroids: &[T]) -> Vec<T> {
    let k = centroids.len() / data.sample_dims();
    let mut dist = vec![T::zero();data.sample_cnt() * k];
    if k == 0 {
        return dist;
    }
    data.samples().par_chunks(data.sample_dims())
        .with_min_len(work_packet_size(data.sample_cnt()))
        .zip(dist.par_chunks_mut(k))
        .for_each(|(s, row)| {
            row.iter_mut()
                .zip(centroids.chunks_exact(data.sample_dims()))
                .for_each(|(d, c)| *d = euclidean(s, c));
        });
    dist
}

/// Label every sample of **data** with its nearest centroid.
pub(crate) fn assign<T: Primitive>(data: &Dataset<T>, centroids: &[T], assignments: &mut [usize], centroid_distances: &mut [T]) {
    data.samples().par_chunks(data.sample_dims())
        .with_min_len(work_packet_size(data.sample_cnt()))
        .zip(assignments.par_iter_mut())
        .zip(centroid_distances.par_iter_mut())
        .for_each(|((s, assignment), centroid_dist)| {
            let (best_idx, best_dist) = nearest_centroid(s, centroids);
            *assignment = best_idx;
            *centroid_dist = best_dist;
        });
}

pub(crate) fn update_cluster_assignments<T: Primitive>(data: &Dataset<T>, state: &mut KMeansState<T>) {
    let KMeansState { centroids, assignments, centroid_distances, .. } = state;
    assign(data, centroids, assignments, centroid_distances);
}

/// Refresh each sample's squared distance to its (unchanged) assigned centroid.
pub(crate) fn update_centroid_distances<T: Primitive>(data: &Dataset<T>, state: &mut KMeansState<T>) {
    let sample_dims = data.sample_dims();
    let centroids = &state.centroids;
    data.samples().par_chunks(sample_dims)
        .with_min_len(work_packet_size(data.sample_cnt()))
        .zip(state.assignments.par_iter().cloned())
        .zip(state.centroid_distances.par_iter_mut())
        .for_each(|((s, assignment), centroid_dist)| {
            let centroid = &centroids[assignment * sample_dims..(assignment + 1) * sample_dims];
            *centroid_dist = squared_euclidean(s, centroid);
        });
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::testing;

    #[test]
    fn euclidean_distance_is_l2() {
        assert_eq!(squared_euclidean(&[0.0f64, 0.0], &[3.0, 4.0]), 25.0);
        assert_eq!(euclidean(&[0.0f64, 0.0], &[3.0, 4.0]), 5.0);
        assert_eq!(euclidean(&[1.0f32, 2.0, 3.0], &[1.0, 2.0, 3.0]), 0.0);
    }

    #[test]
    fn ties_go_to_lowest_cluster_index() {
        // (0,0) is exactly 1 away from all three centroids
        let centroids = [1.0f64, 0.0, -1.0, 0.0, 0.0, 1.0];
        assert_eq!(nearest_centroid(&[0.0, 0.0], &centroids), (0, 1.0));
        assert_eq!(nearest_centroid(&[-0.9, 0.0], &centroids).0, 1);
    }

    #[test]
    fn distance_matrix_layout() {
        let data = Dataset::from_rows(&[[0.0f64, 0.0], [3.0, 4.0]]).unwrap();
        let centroids = [0.0, 0.0, 0.0, 4.0, 6.0, 8.0];
        assert_eq!(distance_matrix(&data, &centroids), vec![0.0, 4.0, 10.0, 5.0, 3.0, 5.0]);
    }

    #[test]
    fn parallel_assignment_matches_sequential_scan() {
        assignment_matches_sequential_scan::<f64>(1);
        assignment_matches_sequential_scan::<f64>(7);
        assignment_matches_sequential_scan::<f32>(3);
        assignment_matches_sequential_scan::<f32>(64);
    }

    fn assignment_matches_sequential_scan<T: Primitive>(sample_dims: usize) {
        let data = testing::uniform::<T>(7, 1000, sample_dims);
        let k = 5;
        let centroids: Vec<T> = data.samples()[..k * sample_dims].to_vec();

        let mut assignments = vec![0usize;data.sample_cnt()];
        let mut centroid_distances = vec![T::zero();data.sample_cnt()];
        assign(&data, &centroids, &mut assignments, &mut centroid_distances);

        let matrix = distance_matrix(&data, &centroids);
        for (i, row) in matrix.chunks_exact(k).enumerate() {
            let mut should = 0;
            for c in 1..k {
                if row[c] < row[should] {
                    should = c;
                }
            }
            assert_eq!(assignments[i], should);
            assert_eq!(centroid_distances[i], squared_euclidean(data.sample(i), &centroids[should * sample_dims..(should + 1) * sample_dims]));
        }
        // The first k samples are centroids themselves
        for i in 0..k {
            assert_eq!(centroid_distances[i], T::zero());
        }
    }
}
