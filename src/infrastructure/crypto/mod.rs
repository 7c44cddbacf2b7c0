use std::fmt::Write as _;

use rand::RngCore;

const TOKEN_KEY_BYTES: usize = 20;

/// Generates an opaque API token: 20 random bytes as 40 lower-case hex chars.
pub fn generate_token_key() -> String {
    let mut bytes = [0u8; TOKEN_KEY_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    let mut key = String::with_capacity(TOKEN_KEY_BYTES * 2);
    for b in bytes {
        let _ = write!(key, "{:02x}", b);
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_keys_are_forty_hex_chars() {
        let key = generate_token_key();
        assert_eq!(key.len(), 40);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn token_keys_differ() {
        assert_ne!(generate_token_key(), generate_token_key());
    }
}
