//! Sequential identifier generator and process-scoped signatures.

use std::sync::atomic::{AtomicI32, Ordering};
use std::time;

use crate::SeqId;

/// Represents the generation context of sequential identifiers: a machine signature, a
/// process identifier, and the shared counter that keeps same-second identifiers distinct.
///
/// The signatures are computed eagerly at construction and stay constant for the lifetime
/// of the generator; only the counter advances, through an atomic fetch-and-increment, so a
/// single generator can be shared freely across threads. The process-wide instance behind
/// [`seqid()`](crate::seqid) covers virtually all programs; construct additional generators
/// to control the signatures and counter seed in tests.
///
/// # Examples
///
/// ```rust
/// use std::thread;
/// use seqid::SeqIdGenerator;
///
/// let g = SeqIdGenerator::new();
/// thread::scope(|s| {
///     for i in 0..4 {
///         let g = &g;
///         s.spawn(move || {
///             for _ in 0..8 {
///                 println!("{} by thread {}", g.generate(), i);
///             }
///         });
///     }
/// });
/// ```
#[derive(Debug)]
pub struct SeqIdGenerator {
    machine: i32,
    pid: i32,

    /// The counter handed out to newly constructed identifiers, wrapping on overflow.
    counter: AtomicI32,
}

impl SeqIdGenerator {
    /// Creates a generator with the host-derived machine signature, the current process
    /// identifier, and a randomly seeded counter.
    pub fn new() -> Self {
        Self::with_signature(
            machine_signature(),
            std::process::id() as i32,
            rand::random(),
        )
    }

    /// Creates a generator with explicit signatures and counter seed.
    pub const fn with_signature(machine: i32, pid: i32, counter_seed: i32) -> Self {
        Self {
            machine,
            pid,
            counter: AtomicI32::new(counter_seed),
        }
    }

    /// Machine signature stamped into every identifier this generator produces.
    pub const fn machine(&self) -> i32 {
        self.machine
    }

    /// Process identifier stamped into every identifier this generator produces.
    pub const fn pid(&self) -> i32 {
        self.pid
    }

    /// Generates an identifier from the current time, truncated to whole seconds since the
    /// Unix epoch, drawing the next counter value.
    pub fn generate(&self) -> SeqId {
        self.generate_from_timestamp(unix_ts_secs())
    }

    /// Generates an identifier for an explicit epoch-seconds value, drawing the next
    /// counter value.
    pub fn generate_from_timestamp(&self, timestamp: i32) -> SeqId {
        self.generate_with_random(timestamp, self.next_counter())
    }

    /// Generates an identifier with both timestamp and random value explicit, bypassing
    /// the shared counter.
    pub fn generate_with_random(&self, timestamp: i32, random: i32) -> SeqId {
        SeqId::from_fields(timestamp, self.machine, self.pid, random)
    }

    fn next_counter(&self) -> i32 {
        self.counter.fetch_add(1, Ordering::Relaxed).wrapping_add(1)
    }
}

impl Default for SeqIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Supports operations as an infinite iterator that produces a new identifier for each
/// call of `next()`.
///
/// # Examples
///
/// ```rust
/// use seqid::SeqIdGenerator;
///
/// SeqIdGenerator::new()
///     .enumerate()
///     .skip(4)
///     .take(4)
///     .for_each(|(i, e)| println!("[{}] {}", i, e));
/// ```
impl Iterator for SeqIdGenerator {
    type Item = SeqId;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.generate())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

impl std::iter::FusedIterator for SeqIdGenerator {}

fn unix_ts_secs() -> i32 {
    time::SystemTime::now()
        .duration_since(time::UNIX_EPOCH)
        .expect("clock may have gone backwards")
        .as_secs() as i32
}

/// Derives the process-lifetime machine signature from a hash of the host name.
fn machine_signature() -> i32 {
    use std::hash::{Hash, Hasher};

    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    host_name::get().hash(&mut hasher);
    hasher.finish() as i32
}

#[cfg(unix)]
mod host_name {
    use std::ffi::OsString;

    pub fn get() -> OsString {
        // best-effort: an unresolvable host name degrades to a constant signature
        nix::unistd::gethostname().unwrap_or_default()
    }
}

#[cfg(not(unix))]
mod host_name {
    use std::env;
    use std::ffi::OsString;

    pub fn get() -> OsString {
        env::var_os("COMPUTERNAME")
            .or_else(|| env::var_os("HOSTNAME"))
            .unwrap_or_default()
    }
}
