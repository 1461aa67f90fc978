/*
    signature.rs - Post signing

    Produces the opaque authenticity token attached to each post: a
    keyed blake3 hash over (id, author, text), hex-encoded. The token
    is pass-through downstream; nothing in this core verifies it.
    Fields are length-prefixed so no two inputs share an encoding.
*/

use crate::model::{PostId, Signature, UserId};

/// Signs posts with a deployment-scoped key
#[derive(Debug, Clone)]
pub struct Signer {
    key: [u8; 32],
}

impl Signer {
    pub fn new(key: [u8; 32]) -> Self {
        Signer { key }
    }

    /// Produce the authenticity token for a post
    pub fn sign(&self, id: &PostId, author_id: &UserId, text: &str) -> Signature {
        let mut payload = Vec::new();
        for field in [id.0.as_bytes(), author_id.0.as_bytes(), text.as_bytes()] {
            payload.extend_from_slice(&(field.len() as u64).to_le_bytes());
            payload.extend_from_slice(field);
        }
        let hash = blake3::keyed_hash(&self.key, &payload);
        Signature::new(hex::encode(hash.as_bytes()))
    }
}
