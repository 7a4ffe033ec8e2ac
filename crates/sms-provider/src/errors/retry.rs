/// Classification for retry policy.
///
/// Providers perform exactly one network attempt per call; this tells the
/// caller whether issuing another call could change the outcome.
///
/// # Behavior Summary
///
/// | Class | Retry the same request? |
/// |-------|-------------------------|
/// | `Never` | No |
/// | `Retryable` | Yes, ideally with backoff |
/// | `CallerPolicy` | Depends on the vendor code carried by the error |
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RetryClass {
    /// Never retry - misconfiguration, unsupported operation or API drift.
    /// The request is fundamentally invalid and retrying won't help.
    Never,

    /// The request never got a verdict from the vendor (network failure or
    /// timeout). Sending again may succeed.
    Retryable,

    /// The vendor answered and declined the request.
    ///
    /// Some vendor codes are transient (throttling), others are terminal
    /// (illegal destination). The library does not decide; the caller
    /// inspects the code.
    CallerPolicy,
}
