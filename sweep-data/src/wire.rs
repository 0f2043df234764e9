use crate::measurement::Measurement;
use serde::{Deserialize, Serialize};

/// Wire code for a frame that failed checksum verification. Retryable.
pub const CHECKSUM_INVALID: u8 = 1;
/// Wire code for a frame whose return strength was below the trusted
/// threshold. Retryable.
pub const SIGNAL_TOO_WEAK: u8 = 2;
/// Wire code for a request the station could not serve at all, such as a
/// target outside the servo range. Not retryable.
pub const REQUEST_FAILED: u8 = 3;

/// One station response: either a measurement payload or a numeric fault
/// code. Exactly one response is sent per request, newline terminated.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Response {
    Reading(Measurement),
    Fault { error_code: u8 },
}
