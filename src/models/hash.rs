// Entropy hash sample

use serde::Serialize;

/// Output of one entropy hash pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntropyHash {
    /// Lowercase hex of `bytes`.
    pub hash: String,
    /// Raw SHA-256 digest.
    pub bytes: Vec<u8>,
    pub rounds: u32,
}
