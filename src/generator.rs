//! Monotonic sequence generator and related types.

use std::time;

use crate::{Layout, Sequence, Uuid};

pub mod with_rand08;

/// A trait that defines the minimum random number generator interface for
/// [`SequenceGenerator`].
pub trait RandSource {
    /// Returns the next random `u64`.
    fn next_u64(&mut self) -> u64;
}

/// A trait that defines the minimum system clock interface for [`SequenceGenerator`].
pub trait TimeSource {
    /// Returns the current Unix timestamp in milliseconds.
    fn unix_ts_ms(&mut self) -> u64;
}

/// The default [`TimeSource`] that uses [`std::time::SystemTime`].
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct StdSystemTime;

impl TimeSource for StdSystemTime {
    fn unix_ts_ms(&mut self) -> u64 {
        // a clock set before 1970 reads as zero, which the generator treats as a rollback
        time::SystemTime::now()
            .duration_since(time::UNIX_EPOCH)
            .map_or(0, |d| d.as_millis() as u64)
    }
}

/// Represents a generator that encapsulates a timestamp and counter pair and guarantees the
/// monotonic order of time-ordered UUIDs generated within the same millisecond.
///
/// This type provides the interface to customize the random number generator and system clock of
/// a generator. It also helps control the scope of guaranteed order of the generated UUIDs. The
/// following example guarantees the process-wide (cross-thread) monotonicity using Rust's
/// standard synchronization mechanism.
///
/// # Examples
///
/// ```rust
/// use rand::rngs::OsRng;
/// use std::{sync, thread};
/// use uuidnext::{Layout, SequenceGenerator};
///
/// let g = sync::Arc::new(sync::Mutex::new(SequenceGenerator::with_rand08(Layout::V7, OsRng)));
/// thread::scope(|s| {
///     for i in 0..4 {
///         let g = sync::Arc::clone(&g);
///         s.spawn(move || {
///             for _ in 0..8 {
///                 println!("{} by thread {}", g.lock().unwrap().generate(), i);
///                 thread::yield_now();
///             }
///         });
///     }
/// });
/// ```
///
/// # Clock handling
///
/// When the timestamp given is greater than the last one, the counter is reinitialized with a
/// random number whose most significant bit is cleared. Otherwise, including when the clock moves
/// backwards, the generator goes on with the last timestamp and increments the counter. When the
/// counter reaches the maximum value of the [`Layout`], the timestamp is incremented, so the
/// issued timestamp may run ahead of the real-time clock under sustained extreme call rates or
/// after a clock rollback. The generator never resets its state to break the order.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct SequenceGenerator<R, T = StdSystemTime> {
    timestamp: u64,
    counter: u64,
    layout: Layout,

    /// The random number generator used by the generator.
    rng: R,

    /// The system clock used by the generator.
    time: T,
}

impl<R: RandSource> SequenceGenerator<R> {
    /// Creates a generator instance that reads the system clock.
    pub const fn new(layout: Layout, rng: R) -> Self {
        Self::with_rand_and_time_sources(layout, rng, StdSystemTime)
    }
}

impl<R: RandSource, T: TimeSource> SequenceGenerator<R, T> {
    /// Creates a generator instance with specified random number generator and system clock.
    pub const fn with_rand_and_time_sources(layout: Layout, rng: R, time: T) -> Self {
        Self {
            timestamp: 0,
            counter: 0,
            layout,
            rng,
            time,
        }
    }

    /// Returns the layout of UUIDs the generator produces.
    pub const fn layout(&self) -> Layout {
        self.layout
    }

    /// Generates a new UUID from the current timestamp.
    pub fn generate(&mut self) -> Uuid {
        let unix_ts_ms = self.time.unix_ts_ms();
        self.generate_core(unix_ts_ms)
    }

    /// Generates a new UUID from the `unix_ts_ms` passed.
    ///
    /// See the [`SequenceGenerator`] type documentation for the description.
    ///
    /// # Panics
    ///
    /// Panics if `unix_ts_ms` is not a 48-bit integer.
    pub fn generate_core(&mut self, unix_ts_ms: u64) -> Uuid {
        let seq = self.next_sequence_core(unix_ts_ms);
        self.layout.encode(seq, self.rng.next_u64())
    }

    /// Issues the next timestamp and counter pair from the current timestamp.
    pub fn next_sequence(&mut self) -> Sequence {
        let unix_ts_ms = self.time.unix_ts_ms();
        self.next_sequence_core(unix_ts_ms)
    }

    /// Issues the next timestamp and counter pair from the `unix_ts_ms` passed.
    ///
    /// # Panics
    ///
    /// Panics if `unix_ts_ms` is not a 48-bit integer.
    pub fn next_sequence_core(&mut self, unix_ts_ms: u64) -> Sequence {
        assert!(
            unix_ts_ms < 1 << 48,
            "`unix_ts_ms` must be a 48-bit integer"
        );

        if unix_ts_ms > self.timestamp {
            self.timestamp = unix_ts_ms;
            self.counter = self.seed_counter();
        } else {
            if unix_ts_ms < self.timestamp {
                log::trace!(
                    "clock is {} ms behind last timestamp {}",
                    self.timestamp - unix_ts_ms,
                    self.timestamp
                );
            }
            self.counter += 1;
            if self.counter > self.layout.max_counter() {
                // increment timestamp at counter overflow
                self.timestamp += 1;
                self.counter = self.seed_counter();
                log::debug!(
                    "{:?} counter overflowed; timestamp advanced to {}",
                    self.layout,
                    self.timestamp
                );
            }
        }

        Sequence {
            timestamp: self.timestamp,
            counter: self.counter,
        }
    }

    fn seed_counter(&mut self) -> u64 {
        self.rng.next_u64() & (self.layout.max_counter() >> 1)
    }

    /// Generates a new UUIDv4 object utilizing the random number generator inside.
    #[cfg(feature = "global_gen")]
    pub(crate) fn generate_v4(&mut self) -> Uuid {
        let mut bytes = [0u8; 16];
        bytes[..8].copy_from_slice(&self.rng.next_u64().to_be_bytes());
        bytes[8..].copy_from_slice(&self.rng.next_u64().to_be_bytes());
        crate::bits::set_version_and_variant(bytes, 4)
    }
}

/// Supports operations as an infinite iterator that produces a new UUID object for each call of
/// `next()`.
///
/// # Examples
///
/// ```rust
/// use uuidnext::{Layout, SequenceGenerator};
///
/// SequenceGenerator::with_rand08(Layout::V7, rand::thread_rng())
///     .enumerate()
///     .skip(4)
///     .take(4)
///     .for_each(|(i, e)| println!("[{i}] {e}"));
/// ```
impl<R: RandSource, T: TimeSource> Iterator for SequenceGenerator<R, T> {
    type Item = Uuid;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.generate())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

impl<R: RandSource, T: TimeSource> std::iter::FusedIterator for SequenceGenerator<R, T> {}
