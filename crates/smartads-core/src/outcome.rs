//! Dual-path operation result.
//!
//! Every network-backed operation tries the remote authority first and
//! falls back to the local roster. The outcome records which branch
//! produced the value so callers and tests can tell them apart.

/// Which branch of the remote-first/local-fallback pipeline succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// The remote authority handled the operation; the local roster was
    /// reconciled to match.
    Remote,
    /// The remote authority was unreachable or errored; the local
    /// roster handled the operation alone.
    Local,
}

/// A successful operation result tagged with its originating branch.
#[derive(Debug, Clone)]
pub struct Outcome<T> {
    pub value: T,
    pub source: Source,
}

impl<T> Outcome<T> {
    pub fn remote(value: T) -> Self {
        Self {
            value,
            source: Source::Remote,
        }
    }

    pub fn local(value: T) -> Self {
        Self {
            value,
            source: Source::Local,
        }
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}
