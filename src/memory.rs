use num::{Float, NumCast, Zero};
use rand::distributions::uniform::SampleUniform;
use std::{
    fmt::{Debug, Display, LowerExp},
    iter::Sum,
    ops::{AddAssign, SubAssign},
};

/// Floating point primitive a calculation runs on.
pub trait Primitive: AddAssign + SubAssign + Sum + Zero + Float + NumCast + SampleUniform
                + PartialOrd + Copy + Default + Display + Debug + Sync + Send + LowerExp + 'static {
    /// Lossless-enough conversion of a sample count, used as the divisor of cluster means.
    fn from_count(cnt: usize) -> Self;
}
impl Primitive for f32 {
    #[inline(always)] fn from_count(cnt: usize) -> Self { cnt as f32 }
}
impl Primitive for f64 {
    #[inline(always)] fn from_count(cnt: usize) -> Self { cnt as f64 }
}
