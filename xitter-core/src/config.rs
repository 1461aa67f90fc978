/*
    config.rs - Core configuration

    Tunables consumed by the distribution engine. Deployments override
    the signing key; the default exists for tests and local demos.
*/

use serde::{Deserialize, Serialize};

/// Development-only signing key; production supplies its own
const DEV_SIGNING_KEY: [u8; 32] = *b"xitter-dev-signing-key-32-bytes!";

/// Configuration for the distribution core
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Maximum post length in Unicode code points
    pub max_post_chars: usize,

    /// Key for the keyed hash attached to posts as their signature
    pub signing_key: [u8; 32],
}

impl Default for CoreConfig {
    fn default() -> Self {
        CoreConfig {
            max_post_chars: 280,
            signing_key: DEV_SIGNING_KEY,
        }
    }
}

impl CoreConfig {
    pub fn with_signing_key(mut self, key: [u8; 32]) -> Self {
        self.signing_key = key;
        self
    }
}
