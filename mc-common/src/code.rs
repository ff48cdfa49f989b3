//! Room code generation
//!
//! Room codes are short join tokens handed out to guests: six characters
//! drawn uniformly from `A-Z`.

use rand::Rng;

/// Number of characters in a room code
pub const CODE_LENGTH: usize = 6;

const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Generate a random room code using the supplied RNG
///
/// Uniqueness is not checked here; see
/// [`generate_unique_code`](crate::db::rooms::generate_unique_code).
pub fn generate_code<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..CODE_LENGTH)
        .map(|_| CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}

/// Check that a string has the shape of a room code
pub fn is_valid_code(code: &str) -> bool {
    code.len() == CODE_LENGTH && code.bytes().all(|b| b.is_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generated_code_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let code = generate_code(&mut rng);
            assert_eq!(code.len(), CODE_LENGTH);
            assert!(is_valid_code(&code), "bad code: {}", code);
        }
    }

    #[test]
    fn test_same_seed_same_code() {
        let a = generate_code(&mut StdRng::seed_from_u64(42));
        let b = generate_code(&mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_is_valid_code_rejects_bad_input() {
        assert!(is_valid_code("ABCDEF"));
        assert!(!is_valid_code(""));
        assert!(!is_valid_code("ABCDE"));
        assert!(!is_valid_code("ABCDEFG"));
        assert!(!is_valid_code("abcdef"));
        assert!(!is_valid_code("ABC1EF"));
    }
}
