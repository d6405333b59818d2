//! Random password generation.

use rand::rngs::OsRng;
use rand::Rng;

pub const MIN_GENERATED_LENGTH: usize = 8;
pub const MAX_GENERATED_LENGTH: usize = 64;

const LETTERS: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &str = "0123456789";
const PUNCTUATION: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";
const CONFUSABLE: [char; 4] = ['l', 'I', 'O', '0'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Clamped to `8..=64` when generating.
    pub length: usize,
    pub symbols: bool,
    pub numbers: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self { length: 16, symbols: true, numbers: true }
    }
}

fn alphabet(options: &GeneratorOptions) -> Vec<char> {
    let mut chars: Vec<char> = LETTERS.chars().collect();
    if options.numbers {
        chars.extend(DIGITS.chars());
    }
    if options.symbols {
        chars.extend(PUNCTUATION.chars());
    }
    chars.retain(|c| !CONFUSABLE.contains(c));
    chars
}

/// Generates a random password from the operating system RNG.
pub fn generate_password(options: &GeneratorOptions) -> String {
    generate_password_with_rng(options, &mut OsRng)
}

pub fn generate_password_with_rng<R: Rng>(options: &GeneratorOptions, rng: &mut R) -> String {
    let length = options.length.clamp(MIN_GENERATED_LENGTH, MAX_GENERATED_LENGTH);
    let chars = alphabet(options);
    (0..length)
        .map(|_| chars[rng.gen_range(0..chars.len())])
        .collect()
}
