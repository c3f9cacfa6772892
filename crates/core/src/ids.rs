//! Id generation for manually created records

use rand::Rng;

/// Length of ids produced by [`RandomIds`]
pub const ID_LENGTH: usize = 9;

const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Source of candidate ids
///
/// Uniqueness is not required of the generator; the store rejects and
/// retries candidates that collide.
pub trait IdGenerator {
    fn generate(&mut self) -> String;
}

/// Random lowercase base-36 ids
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn generate(&mut self) -> String {
        generate_id(ID_LENGTH)
    }
}

impl<F> IdGenerator for F
where
    F: FnMut() -> String,
{
    fn generate(&mut self) -> String {
        self()
    }
}

/// Generate a random base-36 id of `length` characters
pub fn generate_id(length: usize) -> String {
    let mut rng = rand::rng();
    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id_length() {
        assert_eq!(generate_id(ID_LENGTH).len(), ID_LENGTH);
    }

    #[test]
    fn test_generate_id_charset() {
        let id = generate_id(100);
        assert!(id.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_random_ids_differ() {
        let mut ids = RandomIds;
        assert_ne!(ids.generate(), ids.generate());
    }

    #[test]
    fn test_closure_generator() {
        let mut n = 0;
        let mut counter = || {
            n += 1;
            format!("id_{}", n)
        };
        assert_eq!(counter.generate(), "id_1");
        assert_eq!(counter.generate(), "id_2");
    }
}
