//! Integration with `rand` (v0.8) crate.

use super::{RandSource, SequenceGenerator};
use crate::Layout;
use rand::RngCore;

/// An adapter that implements [`RandSource`] for [`RngCore`] types.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Adapter<T>(/** The wrapped [`RngCore`] type. */ pub T);

impl<T: RngCore> RandSource for Adapter<T> {
    fn next_u64(&mut self) -> u64 {
        self.0.next_u64()
    }
}

impl<T: RngCore> SequenceGenerator<Adapter<T>> {
    /// Creates a generator object with a specified random number generator that implements
    /// [`RngCore`] from `rand` (v0.8) crate.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuidnext::{Layout, SequenceGenerator};
    ///
    /// let mut g = SequenceGenerator::with_rand08(Layout::SqlServerV8, rand::thread_rng());
    /// println!("{}", g.generate());
    /// ```
    pub const fn with_rand08(layout: Layout, rng: T) -> Self {
        Self::new(layout, Adapter(rng))
    }
}
