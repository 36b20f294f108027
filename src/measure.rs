//! The numeric bound used for edge costs, capacities, and heuristics.
//!
//! The original single-crate `petgraph` defined its own `Measure` trait for
//! exactly this purpose (see `src/dijkstra.rs`/`src/scored.rs` in the
//! teacher repo); the modern workspace split moved the equivalent bound
//! into the internal `numi` crate, which is a path-only dependency never
//! published to a registry. This crate restores the original, published
//! dependency instead of inventing a vendored substitute: `num-traits`.

use num_traits::{Bounded, Zero};

/// A totally-ordered numeric type usable as an edge cost, a flow capacity,
/// or an A* heuristic value.
pub trait Measure:
    Copy
    + PartialOrd
    + Zero
    + Bounded
    + core::ops::Add<Self, Output = Self>
    + core::ops::Sub<Self, Output = Self>
    + core::fmt::Debug
{
    /// Whether this value is strictly negative. Used to enforce Dijkstra's
    /// `Sum`-mode nonnegative-cost precondition and the nonnegative-capacity
    /// precondition of flow algorithms.
    fn is_negative(&self) -> bool;
}

macro_rules! impl_measure_signed {
    ($($t:ty),*) => {
        $(
            impl Measure for $t {
                #[inline]
                fn is_negative(&self) -> bool {
                    *self < <$t as Zero>::zero()
                }
            }
        )*
    };
}

macro_rules! impl_measure_unsigned {
    ($($t:ty),*) => {
        $(
            impl Measure for $t {
                #[inline]
                fn is_negative(&self) -> bool {
                    false
                }
            }
        )*
    };
}

impl_measure_signed!(i8, i16, i32, i64, isize, f32, f64);
impl_measure_unsigned!(u8, u16, u32, u64, usize);
