/*
    id_gen.rs - Post id generation

    Ids follow the `{username}-{millis}-{seq}` shape. The per-author
    sequence makes two creates in the same millisecond distinct, so id
    generation plus append never collides. The sequence map is behind a
    mutex; taking the next value is a single atomic step.
*/

use crate::error::{CoreError, CoreResult};
use crate::model::{PostId, Timestamp, Username};
use std::collections::HashMap;
use std::sync::Mutex;

/// Generator for globally unique post ids
#[derive(Debug, Default)]
pub struct PostIdGenerator {
    sequences: Mutex<HashMap<String, u64>>,
}

impl PostIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint the next id for an author at the given instant
    pub fn next(&self, author: &Username, at: Timestamp) -> CoreResult<PostId> {
        let mut sequences = self.sequences.lock().map_err(|_| {
            CoreError::Internal("Lock poisoned: a thread panicked while holding the lock".to_string())
        })?;
        let seq = sequences.entry(author.normalized()).or_insert(0);
        let id = PostId::new(format!("{}-{}-{}", author.normalized(), at.as_millis(), seq));
        *seq += 1;
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn test_ids_unique_within_same_millisecond() {
        let generator = PostIdGenerator::new();
        let at = Timestamp::from_millis(1675916490);
        let alice = Username::new("Alice");

        let a = generator.next(&alice, at).unwrap();
        let b = generator.next(&alice, at).unwrap();
        assert_ne!(a, b);
        assert_eq!(a, PostId::new("alice-1675916490-0"));
        assert_eq!(b, PostId::new("alice-1675916490-1"));
    }

    #[test]
    fn test_ids_scoped_per_author() {
        let generator = PostIdGenerator::new();
        let at = Timestamp::from_millis(100);

        let a = generator.next(&Username::new("alice"), at).unwrap();
        let b = generator.next(&Username::new("ben"), at).unwrap();
        assert_eq!(a, PostId::new("alice-100-0"));
        assert_eq!(b, PostId::new("ben-100-0"));
    }

    #[test]
    fn test_concurrent_generation_never_collides() {
        let generator = Arc::new(PostIdGenerator::new());
        let at = Timestamp::from_millis(100);

        let mut handles = Vec::new();
        for _ in 0..8 {
            let generator = generator.clone();
            handles.push(std::thread::spawn(move || {
                let alice = Username::new("alice");
                (0..100)
                    .map(|_| generator.next(&alice, at).unwrap())
                    .collect::<Vec<_>>()
            }));
        }

        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(seen.insert(id));
            }
        }
        assert_eq!(seen.len(), 800);
    }
}
