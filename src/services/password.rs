//! Salted SHA-256 password hashes stored as `hex(salt):hex(digest)`.

use rand::RngCore;
use sha2::{Digest, Sha256};

pub const SALT_LEN: usize = 16;
const SEPARATOR: char = ':';

/// Hashes `password` with a fresh random salt.
pub fn hash_password(password: &str) -> String {
    let mut salt = [0u8; SALT_LEN];
    rand::thread_rng().fill_bytes(&mut salt);
    hash_password_with_salt(password, &salt)
}

/// Digest is taken over the password bytes followed by the salt bytes.
pub fn hash_password_with_salt(password: &str, salt: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hasher.update(salt);
    let digest = hasher.finalize();

    format!("{}{}{}", hex::encode(salt), SEPARATOR, hex::encode(digest))
}

/// Returns false for a wrong password and for stored values that do not parse.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let Some((salt_hex, digest_hex)) = stored.split_once(SEPARATOR) else {
        return false;
    };
    let Ok(salt) = hex::decode(salt_hex) else {
        return false;
    };
    if salt.len() != SALT_LEN || digest_hex.is_empty() {
        return false;
    }

    let expected = hash_password_with_salt(password, &salt);
    let Some((_, expected_digest)) = expected.split_once(SEPARATOR) else {
        return false;
    };

    // Compare every byte so timing does not reveal the matching prefix
    expected_digest.len() == digest_hex.len()
        && expected_digest
            .bytes()
            .zip(digest_hex.to_ascii_lowercase().bytes())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
}
