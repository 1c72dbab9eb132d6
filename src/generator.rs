use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &[u8] = b"0123456789";
const PUNCTUATION: &[u8] = b"!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

pub const MIN_LENGTH: usize = 8;
pub const MAX_LENGTH: usize = 32;
pub const DEFAULT_LENGTH: usize = 16;

const SUGGEST_MIN_LENGTH: usize = 16;
const SUGGEST_MAX_LENGTH: usize = 20;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("Password length must be between 8 and 32, got {0}")]
    InvalidLength(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordOptions {
    pub length: usize,
    pub use_digits: bool,
    pub use_special_chars: bool,
}

impl Default for PasswordOptions {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH,
            use_digits: true,
            use_special_chars: true,
        }
    }
}

impl PasswordOptions {
    pub fn validate(&self) -> Result<(), GeneratorError> {
        if !(MIN_LENGTH..=MAX_LENGTH).contains(&self.length) {
            return Err(GeneratorError::InvalidLength(self.length));
        }
        Ok(())
    }
}

/// Letters always, digits and punctuation on request.
pub fn charset(use_digits: bool, use_special_chars: bool) -> Vec<u8> {
    let mut chars = Vec::with_capacity(94);
    chars.extend_from_slice(LOWERCASE);
    chars.extend_from_slice(UPPERCASE);
    if use_digits {
        chars.extend_from_slice(DIGITS);
    }
    if use_special_chars {
        chars.extend_from_slice(PUNCTUATION);
    }
    chars
}

pub fn generate_password(options: &PasswordOptions) -> Result<String, GeneratorError> {
    generate_password_with(&mut rand::thread_rng(), options)
}

pub fn generate_password_with<R: Rng + ?Sized>(
    rng: &mut R,
    options: &PasswordOptions,
) -> Result<String, GeneratorError> {
    options.validate()?;

    let chars = charset(options.use_digits, options.use_special_chars);
    Ok((0..options.length)
        .map(|_| {
            let idx = rng.gen_range(0..chars.len());
            chars[idx] as char
        })
        .collect())
}

pub fn suggest_strong_password() -> String {
    suggest_strong_password_with(&mut rand::thread_rng())
}

/// Builds a 16 to 20 character password holding at least one lowercase
/// letter, uppercase letter, digit and punctuation character.
pub fn suggest_strong_password_with<R: Rng + ?Sized>(rng: &mut R) -> String {
    let length = rng.gen_range(SUGGEST_MIN_LENGTH..=SUGGEST_MAX_LENGTH);

    let mut password: Vec<u8> = [LOWERCASE, UPPERCASE, DIGITS, PUNCTUATION]
        .iter()
        .filter_map(|class| class.choose(&mut *rng).copied())
        .collect();

    let all = charset(true, true);
    let remaining = length - password.len();
    password.extend((0..remaining).filter_map(|_| all.choose(&mut *rng).copied()));
    password.shuffle(rng);

    password.into_iter().map(char::from).collect()
}

/// Regenerates with the caller's options only when they already ask for
/// every character class, otherwise hands back a suggested strong password.
pub fn generate_another(options: &PasswordOptions) -> Result<String, GeneratorError> {
    if options.use_digits && options.use_special_chars {
        generate_password(options)
    } else {
        Ok(suggest_strong_password())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn options(length: usize, use_digits: bool, use_special_chars: bool) -> PasswordOptions {
        PasswordOptions {
            length,
            use_digits,
            use_special_chars,
        }
    }

    #[test]
    fn test_charset_sizes() {
        assert_eq!(charset(false, false).len(), 52);
        assert_eq!(charset(true, false).len(), 62);
        assert_eq!(charset(false, true).len(), 84);
        assert_eq!(charset(true, true).len(), 94);
    }

    #[test]
    fn test_punctuation_matches_ascii_punctuation() {
        let expected: Vec<u8> = (0u8..128).filter(|b| b.is_ascii_punctuation()).collect();
        let mut actual = PUNCTUATION.to_vec();
        actual.sort_unstable();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_letters_only_generation() {
        let password = generate_password(&options(20, false, false)).unwrap();

        assert_eq!(password.len(), 20);
        assert!(password.chars().all(|c| c.is_ascii_alphabetic()));
    }

    #[test]
    fn test_generation_stays_in_charset() {
        let mut rng = StdRng::seed_from_u64(7);
        let allowed = charset(true, false);
        for _ in 0..50 {
            let password = generate_password_with(&mut rng, &options(32, true, false)).unwrap();
            assert!(password.bytes().all(|b| allowed.contains(&b)));
        }
    }

    #[test]
    fn test_length_bounds() {
        assert!(generate_password(&options(MIN_LENGTH, true, true)).is_ok());
        assert!(generate_password(&options(MAX_LENGTH, true, true)).is_ok());
        assert_eq!(
            generate_password(&options(7, true, true)),
            Err(GeneratorError::InvalidLength(7))
        );
        assert_eq!(
            generate_password(&options(33, false, false)),
            Err(GeneratorError::InvalidLength(33))
        );
    }

    #[test]
    fn test_suggestion_covers_every_class() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let password = suggest_strong_password_with(&mut rng);
            let len = password.chars().count();

            assert!((16..=20).contains(&len), "unexpected length {len}");
            assert!(password.chars().any(|c| c.is_ascii_lowercase()));
            assert!(password.chars().any(|c| c.is_ascii_uppercase()));
            assert!(password.chars().any(|c| c.is_ascii_digit()));
            assert!(password.chars().any(|c| c.is_ascii_punctuation()));
        }
    }

    #[test]
    fn test_generate_another_respects_full_options() {
        let password = generate_another(&options(9, true, true)).unwrap();
        assert_eq!(password.len(), 9);
    }

    #[test]
    fn test_generate_another_falls_back_to_suggestion() {
        // Length 8 is ignored once the fallback kicks in.
        let password = generate_another(&options(8, true, false)).unwrap();
        assert!(password.len() >= 16);
        assert!(password.chars().any(|c| c.is_ascii_punctuation()));
    }
}
