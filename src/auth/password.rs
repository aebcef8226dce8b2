use pbkdf2::pbkdf2_hmac;
use rand::Rng;
use sha2::Sha256;

pub const PBKDF2_ITERATIONS: u32 = 100_000;
const SCHEME: &str = "pbkdf2-sha256";

pub fn generate_salt() -> String {
    let mut salt = [0u8; 16];
    rand::rng().fill(&mut salt);
    hex::encode(salt)
}

fn derive_key(password: &str, salt: &str, iterations: u32) -> [u8; 32] {
    let mut key = [0u8; 32];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt.as_bytes(), iterations, &mut key);
    key
}

/// Stored form `pbkdf2-sha256$<iterations>$<hex key>`.
pub fn hash_password_with(salt: &str, password: &str, iterations: u32) -> String {
    format!(
        "{SCHEME}${iterations}${}",
        hex::encode(derive_key(password, salt, iterations))
    )
}

pub fn hash_password(salt: &str, password: &str) -> String {
    hash_password_with(salt, password, PBKDF2_ITERATIONS)
}

/// Re-derives with the iteration count recorded in `stored`.
pub fn verify_password(salt: &str, password: &str, stored: &str) -> bool {
    let mut parts = stored.split('$');
    let (Some(SCHEME), Some(iter), Some(expected), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return false;
    };
    let Ok(iterations) = iter.parse::<u32>() else {
        return false;
    };
    let Ok(expected) = hex::decode(expected) else {
        return false;
    };
    if iterations == 0 {
        return false;
    }

    constant_time_eq(&derive_key(password, salt, iterations), &expected)
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Random 256-bit session token, hex encoded.
pub fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill(&mut bytes);
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_password_different_salt_differs() {
        let a = hash_password_with(&generate_salt(), "secret1", 1_000);
        let b = hash_password_with(&generate_salt(), "secret1", 1_000);
        assert_ne!(a, b);
        assert!(a.starts_with("pbkdf2-sha256$1000$"));
    }

    #[test]
    fn verification_matches_only_the_right_password() {
        let salt = generate_salt();
        let hash = hash_password(&salt, "correct horse");
        assert!(verify_password(&salt, "correct horse", &hash));
        assert!(!verify_password(&salt, "wrong horse", &hash));
    }

    #[test]
    fn changed_iterations_or_salt_fail() {
        let salt = generate_salt();
        let hash = hash_password_with(&salt, "secret1", 2_000);
        assert!(verify_password(&salt, "secret1", &hash));

        let tampered = hash.replacen("$2000$", "$2001$", 1);
        assert!(!verify_password(&salt, "secret1", &tampered));
        assert!(!verify_password(&generate_salt(), "secret1", &hash));
        assert!(!verify_password(&salt, "secret1", "garbage"));
    }

    #[test]
    fn comparison_checks_every_byte() {
        assert!(constant_time_eq(b"abc", b"abc"));
        assert!(!constant_time_eq(b"abc", b"abd"));
        assert!(!constant_time_eq(b"abc", b"ab"));
    }
}
