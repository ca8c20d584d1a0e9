use tracing::warn;

use crate::{error::RuntimeError, interpreter::evaluator::core::EvalResult};

/// Resource ceilings a run is governed by.
///
/// Loops count their passes and stop with an error once `max_iterations` is
/// exceeded. Resident memory is sampled through `memory_probe` and compared
/// against `max_memory_bytes`: on every pass of a classic `for` loop, and
/// every `memory_check_interval` passes of a `while` loop.
///
/// # Example
/// ```
/// use brickengine::Limits;
///
/// let limits = Limits::default().with_max_iterations(10_000)
///                               .with_max_memory_bytes(None);
///
/// assert_eq!(limits.max_iterations, 10_000);
/// assert_eq!(limits.max_memory_bytes, None);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Limits {
    /// Passes a single loop may make before it is aborted.
    pub max_iterations:        u64,
    /// Resident memory ceiling in bytes; `None` disables the check.
    pub max_memory_bytes:      Option<u64>,
    /// How many `while` passes go by between memory samples.
    pub memory_check_interval: u64,
    /// Nested closure calls allowed before the run is aborted.
    pub max_call_depth:        usize,
    /// Reports the process's resident memory, or `None` if unknown.
    pub memory_probe:          fn() -> Option<u64>,
}

impl Limits {
    /// Default ceiling on passes per loop.
    pub const DEFAULT_MAX_ITERATIONS: u64 = 100_000_000;
    /// Default resident memory ceiling (512 MiB).
    pub const DEFAULT_MAX_MEMORY_BYTES: u64 = 512 * 1024 * 1024;
    /// Default number of `while` passes between memory samples.
    pub const DEFAULT_MEMORY_CHECK_INTERVAL: u64 = 1000;
    /// Default ceiling on nested closure calls.
    pub const DEFAULT_MAX_CALL_DEPTH: usize = 128;

    /// Sets the ceiling on passes per loop.
    #[must_use]
    pub const fn with_max_iterations(mut self, max_iterations: u64) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the resident memory ceiling; `None` disables the check.
    #[must_use]
    pub const fn with_max_memory_bytes(mut self, max_memory_bytes: Option<u64>) -> Self {
        self.max_memory_bytes = max_memory_bytes;
        self
    }

    /// Sets how many `while` passes go by between memory samples. Zero is
    /// treated as one.
    #[must_use]
    pub const fn with_memory_check_interval(mut self, interval: u64) -> Self {
        self.memory_check_interval = interval;
        self
    }

    /// Sets the ceiling on nested closure calls.
    #[must_use]
    pub const fn with_max_call_depth(mut self, max_call_depth: usize) -> Self {
        self.max_call_depth = max_call_depth;
        self
    }

    /// Replaces the function used to sample resident memory.
    #[must_use]
    pub const fn with_memory_probe(mut self, probe: fn() -> Option<u64>) -> Self {
        self.memory_probe = probe;
        self
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self { max_iterations:        Self::DEFAULT_MAX_ITERATIONS,
               max_memory_bytes:      Some(Self::DEFAULT_MAX_MEMORY_BYTES),
               memory_check_interval: Self::DEFAULT_MEMORY_CHECK_INTERVAL,
               max_call_depth:        Self::DEFAULT_MAX_CALL_DEPTH,
               memory_probe:          resident_memory_bytes, }
    }
}

/// Resident set size of the current process, read from `/proc/self/status`.
///
/// Returns `None` where that file does not exist or cannot be parsed, which
/// turns the memory ceiling off.
#[must_use]
pub fn resident_memory_bytes() -> Option<u64> {
    let status = std::fs::read_to_string("/proc/self/status").ok()?;
    let line = status.lines().find(|line| line.starts_with("VmRSS:"))?;
    let kib: u64 = line.split_whitespace().nth(1)?.parse().ok()?;
    kib.checked_mul(1024)
}

/// Per-loop bookkeeping against [`Limits`].
pub(crate) struct Governor<'l> {
    limits:     &'l Limits,
    iterations: u64,
    line:       usize,
}

impl<'l> Governor<'l> {
    pub(crate) const fn new(limits: &'l Limits, line: usize) -> Self {
        Self { limits,
               iterations: 0,
               line }
    }

    /// Counts one pass.
    ///
    /// # Errors
    /// `IterationLimit` once the count goes past `max_iterations`.
    pub(crate) fn tick(&mut self) -> EvalResult<()> {
        self.iterations += 1;
        if self.iterations > self.limits.max_iterations {
            warn!(limit = self.limits.max_iterations,
                  line = self.line,
                  "loop aborted: iteration limit exceeded");
            return Err(RuntimeError::IterationLimit { limit: self.limits.max_iterations,
                                                      line:  self.line, });
        }
        Ok(())
    }

    /// Samples memory if this pass falls on the check interval.
    pub(crate) fn check_memory_periodically(&self) -> EvalResult<()> {
        let interval = self.limits.memory_check_interval.max(1);
        if self.iterations % interval == 0 {
            self.check_memory()?;
        }
        Ok(())
    }

    /// Samples resident memory and compares it with the ceiling.
    ///
    /// # Errors
    /// `MemoryLimit` if the probe reports more than `max_memory_bytes`.
    pub(crate) fn check_memory(&self) -> EvalResult<()> {
        let Some(limit) = self.limits.max_memory_bytes else {
            return Ok(());
        };
        let Some(used) = (self.limits.memory_probe)() else {
            return Ok(());
        };
        if used > limit {
            warn!(used, limit, line = self.line, "loop aborted: memory limit exceeded");
            return Err(RuntimeError::MemoryLimit { used,
                                                   limit,
                                                   line: self.line });
        }
        Ok(())
    }
}
