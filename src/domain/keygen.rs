use std::iter;

const KEY_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

pub const KEY_LENGTH: usize = 5;
const SECRET_SUFFIX_LENGTH: usize = 8;

pub fn random_key(length: usize) -> String {
    iter::repeat_with(|| KEY_CHARS[rand::random_range(0..KEY_CHARS.len())] as char)
        .take(length)
        .collect()
}

/// The admin key for a short key: the key itself plus a longer random suffix.
pub fn secret_key_for(key: &str) -> String {
    format!("{}_{}", key, random_key(SECRET_SUFFIX_LENGTH))
}
