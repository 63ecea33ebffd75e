//! Fail-fast error reporting for callers that cannot recover.
//!
//! The safe API returns [`Result`]. Callers that follow the reference BLAS
//! contract (the `ffi` entry points, graph executors that validate shapes up
//! front) have nowhere to send an error, so they route it here: the
//! diagnostic is logged and written to stderr, then the process aborts.

use crate::{BlasError, Result};

/// Report `err` and abort the process.
#[cold]
pub fn fatal_error(err: &BlasError) -> ! {
    let report = report(err);
    log::error!("{report}");
    eprintln!("strided-blas: fatal error: {report}");
    std::process::abort()
}

/// `err` followed by each of its causes, one per line.
fn report(err: &BlasError) -> String {
    let mut out = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        out.push_str("\n  caused by: ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}

/// Unwrap a driver result, aborting through [`fatal_error`] on failure.
pub trait OrFatal<T> {
    fn or_fatal(self) -> T;
}

impl<T> OrFatal<T> for Result<T> {
    #[inline]
    fn or_fatal(self) -> T {
        match self {
            Ok(value) => value,
            Err(err) => fatal_error(&err),
        }
    }
}
