// SPDX-License-Identifier: MIT

use std::fs::File;
use std::io::prelude::*;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Run `f` and prefix any errors with the string returned by `prefix`.
pub fn try_forward<'a, F, R, C, S>(f: F, prefix: C) -> Result<R>
where
    F: FnOnce() -> Result<R>,
    C: 'a + Fn() -> S,
    S: Into<String>,
{
    #[derive(Debug)]
    struct WrappedError {
        prefix: String,
        cause: Box<dyn std::error::Error>,
    }
    impl std::fmt::Display for WrappedError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{}: {}", self.prefix, self.cause)
        }
    }
    impl std::error::Error for WrappedError {}

    match f() {
        Err(err) => Err(Box::new(WrappedError {
            prefix: prefix().into(),
            cause: err,
        })),
        Ok(result) => Ok(result),
    }
}

fn read_lines_impl(path: &Path) -> Result<Vec<String>> {
    try_forward(
        || -> Result<Vec<String>> {
            let mut file = File::open(path)?;
            let mut buffer: Vec<u8> = Vec::new();
            file.read_to_end(&mut buffer)?;
            let text = String::from_utf8_lossy(&buffer);
            Ok(text.lines().map(str::to_owned).collect())
        },
        || path.display().to_string(),
    )
}

/// Read a text file as a sequence of lines, replacing invalid UTF-8.
pub fn read_lines<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    read_lines_impl(path.as_ref())
}

/// Error signalling that an in-flight diff computation was cancelled via its
/// [`CancelToken`]. Callers are expected to discard the computation, not log
/// this as a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cancelled;

impl std::fmt::Display for Cancelled {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "diff computation cancelled")
    }
}
impl std::error::Error for Cancelled {}

/// Cooperative cancellation signal for a diff computation.
///
/// Clones share the same flag, so one clone can be handed to another thread
/// (e.g. behind a "Cancel" button) while the computation polls its own.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    pub fn check(&self) -> std::result::Result<(), Cancelled> {
        if self.is_cancelled() {
            Err(Cancelled)
        } else {
            Ok(())
        }
    }
}

/// Advisory progress reporting for a diff computation.
///
/// A `Progress` covers a sub-range of the overall percentage budget; child
/// indicators created with [`Progress::child`] cover a fraction of their
/// parent's range, so recursive calls can be apportioned an estimated share
/// of the total work. Reported percentages are non-decreasing.
pub struct Progress<'a> {
    report: Option<&'a mut dyn FnMut(u32)>,
    begin: f64,
    span: f64,
    last_percent: u32,
}

impl<'a> Progress<'a> {
    /// A progress indicator that reports nothing.
    pub fn none() -> Progress<'static> {
        Progress {
            report: None,
            begin: 0.0,
            span: 100.0,
            last_percent: 0,
        }
    }

    /// Covers the full 0-100% range, calling `report` whenever the integer
    /// percentage advances.
    pub fn new(report: &'a mut dyn FnMut(u32)) -> Progress<'a> {
        Progress {
            report: Some(report),
            begin: 0.0,
            span: 100.0,
            last_percent: 0,
        }
    }

    /// A child indicator covering the `from..to` fraction of this
    /// indicator's range. Siblings must be created in increasing,
    /// non-overlapping order to keep reports monotonic.
    pub fn child(&mut self, from: f64, to: f64) -> Progress<'_> {
        debug_assert!(0.0 <= from && from <= to && to <= 1.0);
        // The match reborrows the callback at a coercion site; a plain
        // `as_deref_mut()` keeps the trait object's 'a bound and fails to
        // shorten to the reborrow lifetime.
        Progress {
            report: match self.report.as_deref_mut() {
                Some(report) => Some(report),
                None => None,
            },
            begin: self.begin + self.span * from,
            span: self.span * (to - from),
            last_percent: self.last_percent,
        }
    }

    /// Report that `value` out of `max` units of this indicator's work are
    /// complete. `max == 0` counts as complete.
    pub fn report(&mut self, value: u64, max: u64) {
        let fraction = if max == 0 {
            1.0
        } else {
            (value as f64 / max as f64).min(1.0)
        };
        let percent = (self.begin + self.span * fraction) as u32;
        if percent > self.last_percent {
            self.last_percent = percent;
            if let Some(report) = self.report.as_deref_mut() {
                report(percent);
            }
        }
    }

    pub fn done(&mut self) {
        self.report(1, 1);
    }
}

#[cfg(test)]
mod test {
    use crate::utils::*;

    #[test]
    fn progress_reports_monotonic_percentages() {
        let mut percents: Vec<u32> = Vec::new();
        let mut report = |percent| percents.push(percent);
        let mut progress = Progress::new(&mut report);

        progress.report(1, 4);
        progress.report(2, 4);
        progress.report(2, 4);
        progress.done();

        assert_eq!(percents, vec![25, 50, 100]);
    }

    #[test]
    fn progress_child_covers_a_sub_range() {
        let mut percents: Vec<u32> = Vec::new();
        let mut report = |percent| percents.push(percent);
        let mut progress = Progress::new(&mut report);

        {
            let mut first = progress.child(0.0, 0.5);
            first.report(1, 2);
            first.done();
        }
        {
            let mut second = progress.child(0.5, 1.0);
            second.done();
        }

        assert_eq!(percents, vec![25, 50, 100]);
    }

    #[test]
    fn progress_children_nest() {
        let mut percents: Vec<u32> = Vec::new();
        let mut report = |percent| percents.push(percent);
        let mut progress = Progress::new(&mut report);

        {
            let mut outer = progress.child(0.0, 0.5);
            let mut inner = outer.child(0.5, 1.0);
            inner.report(1, 2);
            inner.done();
        }
        progress.done();

        assert_eq!(percents, vec![37, 50, 100]);
    }

    #[test]
    fn cancel_token_is_shared_between_clones() {
        let token = CancelToken::new();
        let clone = token.clone();
        assert!(token.check().is_ok());

        clone.cancel();
        assert!(token.is_cancelled());
        assert_eq!(token.check(), Err(Cancelled));
    }
}
