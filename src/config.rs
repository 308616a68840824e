//! Codec configuration

use crate::width::WidthPolicy;

/// Default upper bound on a declared PDU body length (4 GiB)
pub const DEFAULT_MAX_PDU_BODY: u64 = 1 << 32;

/// Tunables shared by the encoder and the PDU framer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Width selection for integers and length fields inside the body
    pub width_policy: WidthPolicy,
    /// Largest body length a PDU header may declare
    pub max_pdu_body: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// Minimal widths, [`DEFAULT_MAX_PDU_BODY`]
    pub const fn new() -> Self {
        Self {
            width_policy: WidthPolicy::Minimal,
            max_pdu_body: DEFAULT_MAX_PDU_BODY,
        }
    }

    /// Set the width policy
    pub const fn with_width_policy(mut self, width_policy: WidthPolicy) -> Self {
        self.width_policy = width_policy;
        self
    }

    /// Set the body length limit
    pub const fn with_max_pdu_body(mut self, max_pdu_body: u64) -> Self {
        self.max_pdu_body = max_pdu_body;
        self
    }
}
