//! Bounded retry for transient gateway failures.
//!
//! The only suspension point in the core: between attempts it yields to
//! the scheduler instead of sleeping, and the bound is strict — at most
//! `max_attempts` calls, never indefinite.

use crate::gateway::GatewayError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
}

impl RetryPolicy {
    pub const fn new(max_attempts: u32) -> Self {
        Self { max_attempts }
    }

    /// Run `op`, retrying transient failures up to the attempt bound.
    ///
    /// Non-transient failures abort immediately; the last transient error
    /// is returned once attempts are exhausted.
    pub fn run<T>(
        &self,
        mut op: impl FnMut() -> Result<T, GatewayError>,
    ) -> Result<T, GatewayError> {
        debug_assert!(self.max_attempts > 0, "retry policy needs at least one attempt");
        let mut attempt = 0;
        loop {
            attempt += 1;
            match op() {
                Ok(value) => return Ok(value),
                Err(err) if err.is_transient() && attempt < self.max_attempts => {
                    tracing::warn!(
                        attempt,
                        max_attempts = self.max_attempts,
                        error = %err,
                        "transient gateway failure, retrying"
                    );
                    std::thread::yield_now();
                }
                Err(err) => return Err(err),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn succeeds_first_try_without_retrying() {
        let calls = Cell::new(0);
        let result = RetryPolicy::new(3).run(|| {
            calls.set(calls.get() + 1);
            Ok::<_, GatewayError>(42.0)
        });
        assert_eq!(result.unwrap(), 42.0);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn retries_transient_failures_up_to_bound() {
        let calls = Cell::new(0);
        let result = RetryPolicy::new(3).run(|| {
            calls.set(calls.get() + 1);
            if calls.get() < 3 {
                Err(GatewayError::Connectivity("reset".into()))
            } else {
                Ok(99_000.0)
            }
        });
        assert_eq!(result.unwrap(), 99_000.0);
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn exhausts_after_max_attempts() {
        let calls = Cell::new(0);
        let result: Result<f64, _> = RetryPolicy::new(3).run(|| {
            calls.set(calls.get() + 1);
            Err(GatewayError::Connectivity("reset".into()))
        });
        assert!(result.is_err());
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn non_transient_aborts_immediately() {
        let calls = Cell::new(0);
        let result: Result<f64, _> = RetryPolicy::new(3).run(|| {
            calls.set(calls.get() + 1);
            Err(GatewayError::Rejected("bad account".into()))
        });
        assert!(matches!(result, Err(GatewayError::Rejected(_))));
        assert_eq!(calls.get(), 1);
    }
}
