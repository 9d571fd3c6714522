// SPDX-License-Identifier: MPL-2.0

//! Debug tracing of the resolution steps.
//!
//! Tracing is a capability handed to the [Resolver](crate::resolver::Resolver):
//! nothing is traced unless a [Tracer] doing something is supplied.
//! [from_env] picks the [LogTracer] when the [DEBUG_ENV_VAR] variable
//! lists `semver-resolve`, as in `DEBUG=http,semver-resolve`.
//! Node's `NODE_DEBUG` is not consulted, it has no meaning outside a Node
//! process and `DEBUG` is the common selector for that syntax elsewhere.

use std::fmt;
use std::sync::OnceLock;

/// Environment variable read by [from_env].
pub const DEBUG_ENV_VAR: &str = "DEBUG";

/// Target of the records emitted by [LogTracer].
pub const LOG_TARGET: &str = "semver_resolve";

/// Sink for debug traces.
pub trait Tracer {
    /// Record one trace line.
    fn trace(&self, message: fmt::Arguments<'_>);
}

/// Tracer discarding everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTracer;

impl Tracer for NoopTracer {
    fn trace(&self, _message: fmt::Arguments<'_>) {}
}

/// Tracer forwarding to the [log] facade at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogTracer;

impl Tracer for LogTracer {
    fn trace(&self, message: fmt::Arguments<'_>) {
        log::debug!(target: LOG_TARGET, "SEMVER-RESOLVE {}", message);
    }
}

impl<T: Tracer + ?Sized> Tracer for Box<T> {
    fn trace(&self, message: fmt::Arguments<'_>) {
        (**self).trace(message)
    }
}

impl<T: Tracer + ?Sized> Tracer for &T {
    fn trace(&self, message: fmt::Arguments<'_>) {
        (**self).trace(message)
    }
}

/// Whether a debug selector such as `net,semver-resolve` enables tracing.
///
/// Matches `semver-resolve`, `semver_resolve` or `semverresolve` as a whole
/// word, ignoring case.
pub fn enabled_by(selector: &str) -> bool {
    let selector = selector.to_ascii_lowercase();
    let bytes = selector.as_bytes();
    let is_word = |i: usize| bytes.get(i).is_some_and(|b| b.is_ascii_alphanumeric() || *b == b'_');

    let mut from = 0;
    while let Some(found) = selector[from..].find("semver") {
        let start = from + found;
        from = start + "semver".len();
        if start > 0 && is_word(start - 1) {
            continue;
        }
        let mut rest = from;
        if matches!(bytes.get(rest), Some(b'-' | b'_')) {
            rest += 1;
        }
        if selector[rest..].starts_with("resolve") && !is_word(rest + "resolve".len()) {
            return true;
        }
    }
    false
}

/// Tracer selected by the [DEBUG_ENV_VAR] environment variable.
pub fn from_env() -> Box<dyn Tracer + Send + Sync> {
    match std::env::var(DEBUG_ENV_VAR) {
        Ok(selector) if enabled_by(&selector) => Box::new(LogTracer),
        _ => Box::new(NoopTracer),
    }
}

/// The [from_env] tracer, read from the environment once per process.
pub fn from_env_once() -> &'static (dyn Tracer + Send + Sync) {
    static TRACER: OnceLock<Box<dyn Tracer + Send + Sync>> = OnceLock::new();
    TRACER.get_or_init(from_env).as_ref()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selectors() {
        assert!(enabled_by("semver-resolve"));
        assert!(enabled_by("SEMVER_RESOLVE"));
        assert!(enabled_by("semverresolve"));
        assert!(enabled_by("http,semver-resolve,fs"));
        assert!(enabled_by("semver semver-resolve"));
        assert!(!enabled_by(""));
        assert!(!enabled_by("semver"));
        assert!(!enabled_by("semver-resolver"));
        assert!(!enabled_by("mysemver-resolve"));
        assert!(!enabled_by("semver--resolve"));
    }

    #[test]
    fn environment_is_read_once() {
        let first = from_env_once() as *const (dyn Tracer + Send + Sync) as *const ();
        let second = from_env_once() as *const (dyn Tracer + Send + Sync) as *const ();
        assert_eq!(first, second);
    }
}
