use core::fmt::Debug;
use num_traits::{Num, Signed};

/// Element type stored in [`Vector`](crate::vector::Vector) and the matrix types.
///
/// Blanket-implemented for every signed numeric type, which covers `f32`,
/// `f64` and the signed integers. `Signed` supplies the `abs` used by the
/// diagonal-dominance predicate and the L1 norm.
pub trait Scalar: Copy + PartialOrd + Debug + Num + Signed {}

impl<T: Copy + PartialOrd + Debug + Num + Signed> Scalar for T {}
