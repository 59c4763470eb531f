/// Index of the first minimum. NaN values never win.
pub(crate) fn first_min_index<T: PartialOrd + Copy>(values: impl Iterator<Item = T>) -> Option<(usize, T)> {
    values.enumerate().fold(None, |best, (idx, v)| match best {
        Some((_, best_v)) if !(v < best_v) => best,
        None if v.partial_cmp(&v).is_none() => None, // NaN
        _ => Some((idx, v))
    })
}

#[cfg(test)]
macro_rules! assert_approx_eq {
	($left: expr, $right: expr, $tol: expr) => ({
		match ($left, $right, $tol) {
			(left_val , right_val, tol_val) => {
				let delta = (left_val - right_val).abs();
				if !(delta < tol_val) {
					panic!(
						"assertion failed: `(left ≈ right)` \
						(left: `{}`, right: `{}`) \
						with ∆={:1.1e} (allowed ∆={:e})",
						left_val , right_val, delta, tol_val
					)
				}
			}
		}
	});
	($left: expr, $right: expr) => (assert_approx_eq!(($left), ($right), 1e-15))
}

#[cfg(test)]
pub(crate) mod testing {
	use rand::prelude::*;
	use crate::{Dataset, Primitive};

	/// `blobs` well separated gaussian-ish blobs of `per_blob` samples each, in `sample_dims` dimensions.
	pub fn blobs<T: Primitive>(seed: u64, blobs: usize, per_blob: usize, sample_dims: usize) -> Dataset<T> {
		let mut rnd = StdRng::seed_from_u64(seed);
		let mut samples = Vec::with_capacity(blobs * per_blob * sample_dims);
		for b in 0..blobs {
			let center = T::from_count(b * 10);
			for _ in 0..per_blob * sample_dims {
				samples.push(center + rnd.gen_range(T::zero(), T::one()));
			}
		}
		Dataset::new(samples, blobs * per_blob, sample_dims).unwrap()
	}

	/// Uniform random samples in `[0, 1)`.
	pub fn uniform<T: Primitive>(seed: u64, sample_cnt: usize, sample_dims: usize) -> Dataset<T> {
		let mut rnd = StdRng::seed_from_u64(seed);
		let mut samples = vec![T::zero();sample_cnt * sample_dims];
		samples.iter_mut().for_each(|v| *v = rnd.gen_range(T::zero(), T::one()));
		Dataset::new(samples, sample_cnt, sample_dims).unwrap()
	}
}
