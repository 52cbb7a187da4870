use thiserror::Error;

/// Errors produced by the counter core.
///
/// The core never logs or prints; failures are reported to the caller as typed
/// errors and presentation is left to the surrounding layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CounterError {
    /// Bitmap backing storage could not be allocated at construction.
    /// Fatal: no partially constructed counter is returned.
    #[error("failed to allocate bitmap of {bits} bits")]
    Allocation { bits: u64 },

    /// The requested domain size is not representable.
    #[error("domain size {domain_size} must be in [1, 2^32]")]
    InvalidDomain { domain_size: u64 },

    /// An observed value falls outside the configured domain. Recoverable per
    /// call: the counter state is unchanged and the caller decides whether to
    /// skip the value or abort the stream.
    #[error("value {value} is outside the domain [0, {domain_size})")]
    OutOfRange { value: u32, domain_size: u64 },

    /// Counters built over different domains cannot be merged.
    #[error("cannot merge counters with domain sizes {left} and {right}")]
    DomainMismatch { left: u64, right: u64 },
}
