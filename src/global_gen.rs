//! Default generators and entry point functions.

#![cfg(feature = "global_gen")]
#![cfg_attr(docsrs, doc(cfg(feature = "global_gen")))]

use std::sync;

use crate::{Database, Layout, Uuid};
use inner::GlobalGenInner;

/// Returns the lock handle of process-wide global generators, creating them if none exist.
fn lock_global_gen() -> sync::MutexGuard<'static, GlobalGenInner> {
    static G: sync::OnceLock<sync::Mutex<GlobalGenInner>> = sync::OnceLock::new();
    // the state stays consistent even if a holder panicked
    G.get_or_init(Default::default)
        .lock()
        .unwrap_or_else(sync::PoisonError::into_inner)
}

/// Generates a UUIDv4 object from a cryptographically strong random number generator.
///
/// # Examples
///
/// ```rust
/// let uuid = uuidnext::new_random();
/// println!("{uuid}"); // e.g., "2ca4b2ce-6c13-40d4-bccf-37d222820f6f"
/// ```
pub fn new_random() -> Uuid {
    lock_global_gen().get_mut(Layout::V7).generate_v4()
}

/// Generates a UUIDv7 object.
///
/// This function employs a global generator and guarantees the process-wide monotonic order of
/// UUIDs generated within the same millisecond. On Unix, this function resets the generator when
/// the process ID changes (i.e., upon process forks) to prevent collisions across processes.
///
/// # Examples
///
/// ```rust
/// let uuid = uuidnext::new_sequential();
/// println!("{uuid}"); // e.g., "01809424-3e59-7c05-9219-566f82fff672"
/// println!("{:?}", uuid.as_bytes()); // as 16-byte big-endian array
/// ```
pub fn new_sequential() -> Uuid {
    lock_global_gen().get_mut(Layout::V7).generate()
}

/// Generates a UUID that sorts chronologically as a primary key of `database`.
///
/// PostgreSQL, SQLite and other databases get a UUIDv7 from the same generator as
/// [`new_sequential`], while SQL Server gets a UUIDv8 of [`Layout::SqlServerV8`] from a generator
/// of its own.
///
/// # Examples
///
/// ```rust
/// use uuidnext::{new_database_friendly, Database};
///
/// let uuid = new_database_friendly(Database::SqlServer);
/// assert_eq!(uuid.version(), Some(8));
/// ```
pub fn new_database_friendly(database: Database) -> Uuid {
    lock_global_gen().get_mut(database.layout()).generate()
}

mod inner {
    use rand::rngs::{adapter::ReseedingRng, OsRng};
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Core;

    use crate::generator::{RandSource, SequenceGenerator};
    use crate::Layout;

    /// The type alias for the random number generator of the global generators.
    ///
    /// The global generators currently employ [`ChaCha12Core`] with [`ReseedingRng`] wrapper to
    /// emulate the strategy used by [`rand::rngs::ThreadRng`].
    #[derive(Debug)]
    pub struct GlobalGenRng(ReseedingRng<ChaCha12Core, OsRng>);

    impl GlobalGenRng {
        fn new() -> Self {
            let core = ChaCha12Core::from_rng(OsRng)
                .expect("uuidnext: could not initialize global generator");
            Self(ReseedingRng::new(core, 1024 * 64, OsRng))
        }
    }

    impl RandSource for GlobalGenRng {
        fn next_u64(&mut self) -> u64 {
            rand::RngCore::next_u64(&mut self.0)
        }
    }

    /// A thin wrapper to reset the state when the process ID changes (i.e., upon Unix forks).
    #[derive(Debug)]
    pub struct GlobalGenInner {
        #[cfg(unix)]
        pid: u32,
        v7: SequenceGenerator<GlobalGenRng>,
        sql_server: SequenceGenerator<GlobalGenRng>,
    }

    impl Default for GlobalGenInner {
        fn default() -> Self {
            log::trace!("initializing global generators");
            Self {
                #[cfg(unix)]
                pid: std::process::id(),
                v7: SequenceGenerator::new(Layout::V7, GlobalGenRng::new()),
                sql_server: SequenceGenerator::new(Layout::SqlServerV8, GlobalGenRng::new()),
            }
        }
    }

    impl GlobalGenInner {
        /// Returns a mutable reference to the inner [`SequenceGenerator`] of `layout`, resetting
        /// the generator state on Unix if the process ID has changed.
        pub fn get_mut(&mut self, layout: Layout) -> &mut SequenceGenerator<GlobalGenRng> {
            #[cfg(unix)]
            if self.pid != std::process::id() {
                log::debug!("process ID changed; resetting global generators");
                *self = Default::default();
            }
            match layout {
                Layout::V7 => &mut self.v7,
                Layout::SqlServerV8 => &mut self.sql_server,
            }
        }
    }
}

/// Counts '1' of each bit of canonical strings
#[cfg(test)]
fn count_bits(samples: &[String]) -> [u32; 128] {
    let mut bins = [0u32; 128];
    for e in samples {
        let mut it = bins.iter_mut().rev();
        for c in e.chars().rev() {
            if let Some(mut num) = c.to_digit(16) {
                for _ in 0..4 {
                    *it.next().unwrap() += num & 1;
                    num >>= 1;
                }
            }
        }
    }
    bins
}


#[cfg(test)]
mod tests_sql_server {
    use super::{count_bits, new_database_friendly};
    use crate::{layout::sql_server_order, try_decode_sequence, Database, Variant};

    /// Sorts 10k identifiers chronologically under SQL Server comparison
    #[test]
    fn sorts_10k_identifiers_chronologically_under_sql_server_comparison() {
        let samples: Vec<_> = (0..10_000)
            .map(|_| new_database_friendly(Database::SqlServer))
            .collect();

        let mut sorted = samples.clone();
        sorted.sort_by_key(sql_server_order);
        assert_eq!(sorted, samples);

        for e in &samples {
            assert_eq!(e.variant(), Variant::Var10);
            assert_eq!(e.version(), Some(8));
            assert!(try_decode_sequence(e).is_some());
        }
    }

    /// Fills timestamp into last six bytes
    #[test]
    fn fills_timestamp_into_last_six_bytes() {
        use std::time;
        let ts_now = time::SystemTime::now()
            .duration_since(time::UNIX_EPOCH)
            .expect("clock may have gone backwards")
            .as_millis() as u64;
        let e = new_database_friendly(Database::SqlServer);
        let ts = e.as_bytes()[10..]
            .iter()
            .fold(0u64, |acc, b| (acc << 8) | *b as u64);
        assert!(ts.abs_diff(ts_now) < 16);
    }

    /// Sets constant bits and random bits properly
    #[test]
    fn sets_constant_bits_and_random_bits_properly() {
        const N_SAMPLES: usize = 100_000;
        let samples: Vec<String> = (0..N_SAMPLES)
            .map(|_| new_database_friendly(Database::SqlServer).into())
            .collect();
        let bins = count_bits(&samples);

        let n = N_SAMPLES as u32;
        assert_eq!(bins[48], n, "version bit 48");
        assert_eq!(bins[49], 0, "version bit 49");
        assert_eq!(bins[50], 0, "version bit 50");
        assert_eq!(bins[51], 0, "version bit 51");
        assert_eq!(bins[64], n, "variant bit 64");
        assert_eq!(bins[65], 0, "variant bit 65");

        let margin = 4.417173 * (0.5 * 0.5 / N_SAMPLES as f64).sqrt();
        for i in 0..48 {
            let p = bins[i] as f64 / N_SAMPLES as f64;
            assert!((p - 0.5).abs() < margin, "random bit {i}: {p}");
        }
    }
}

#[cfg(test)]
mod tests_v4 {
    use super::{count_bits, new_random};
    use crate::{try_decode_sequence, try_decode_timestamp, Variant};

    const N_SAMPLES: usize = 100_000;
    thread_local!(static SAMPLES: Vec<String> = (0..N_SAMPLES).map(|_| new_random().into()).collect());

    /// Generates canonical string
    #[test]
    fn generates_canonical_string() {
        let pattern = r"^[0-9a-f]{8}-[0-9a-f]{4}-4[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$";
        let re = regex::Regex::new(pattern).unwrap();
        SAMPLES.with(|samples| {
            for e in samples {
                assert!(re.is_match(e));
            }
        });
    }

    /// Generates 100k identifiers without collision
    #[test]
    fn generates_100k_identifiers_without_collision() {
        use std::collections::HashSet;
        SAMPLES.with(|samples| {
            let s: HashSet<&String> = samples.iter().collect();
            assert_eq!(s.len(), N_SAMPLES);
        });
    }

    /// Sets constant bits and random bits properly
    #[test]
    fn sets_constant_bits_and_random_bits_properly() {
        let bins = SAMPLES.with(|samples| count_bits(samples));

        // test if constant bits are all set to 1 or 0
        let n = N_SAMPLES as u32;
        assert_eq!(bins[48], 0, "version bit 48");
        assert_eq!(bins[49], n, "version bit 49");
        assert_eq!(bins[50], 0, "version bit 50");
        assert_eq!(bins[51], 0, "version bit 51");
        assert_eq!(bins[64], n, "variant bit 64");
        assert_eq!(bins[65], 0, "variant bit 65");

        // test if random bits are set to 1 at ~50% probability
        // set margin based on binom dist 99.999% confidence interval
        let margin = 4.417173 * (0.5 * 0.5 / N_SAMPLES as f64).sqrt();
        for i in (0..48).chain(52..64).chain(66..128) {
            let p = bins[i] as f64 / N_SAMPLES as f64;
            assert!((p - 0.5).abs() < margin, "random bit {i}: {p}");
        }
    }

    /// Sets correct variant and version bits
    #[test]
    fn sets_correct_variant_and_version_bits() {
        for _ in 0..1_000 {
            let e = new_random();
            assert_eq!(e.variant(), Variant::Var10);
            assert_eq!(e.version(), Some(4));
            assert_eq!(try_decode_timestamp(&e), None);
            assert_eq!(try_decode_sequence(&e), None);
        }
    }
}
