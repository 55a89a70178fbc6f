use rand::{Rng, seq::SliceRandom};

pub const GENERATED_PASSWORD_LENGTH: usize = 20;

const LOWERCASE: &[u8] = b"abcdefghijkmnopqrstuvwxyz";
const UPPERCASE: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ";
const DIGITS: &[u8] = b"23456789";
const SYMBOLS: &[u8] = b"!@#$%^&*-_=+?";

/// Generate a random password for accounts created from the command line
///
/// Uses the thread-local CSPRNG. The result always holds at least one
/// character from each class; look-alike characters (l, I, O, 0, 1) are left out.
pub fn generate_password(length: usize) -> String {
    let classes = [LOWERCASE, UPPERCASE, DIGITS, SYMBOLS];
    let all: Vec<u8> = classes.concat();
    let mut rng = rand::rng();

    let mut chars: Vec<u8> = classes
        .iter()
        .map(|class| class[rng.random_range(0..class.len())])
        .collect();
    while chars.len() < length {
        chars.push(all[rng.random_range(0..all.len())]);
    }
    chars.shuffle(&mut rng);
    chars.truncate(length.max(classes.len()));

    chars.into_iter().map(char::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_password_length() {
        assert_eq!(generate_password(GENERATED_PASSWORD_LENGTH).len(), 20);
        assert_eq!(generate_password(32).len(), 32);
    }

    #[test]
    fn test_generated_password_has_every_class() {
        for _ in 0..20 {
            let password = generate_password(GENERATED_PASSWORD_LENGTH);
            let bytes = password.as_bytes();

            assert!(bytes.iter().any(|b| LOWERCASE.contains(b)));
            assert!(bytes.iter().any(|b| UPPERCASE.contains(b)));
            assert!(bytes.iter().any(|b| DIGITS.contains(b)));
            assert!(bytes.iter().any(|b| SYMBOLS.contains(b)));
        }
    }

    #[test]
    fn test_generated_passwords_differ() {
        assert_ne!(
            generate_password(GENERATED_PASSWORD_LENGTH),
            generate_password(GENERATED_PASSWORD_LENGTH)
        );
    }
}
