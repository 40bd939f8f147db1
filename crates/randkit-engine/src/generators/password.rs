//! Character pools, passwords and PINs.

use super::Draw;
use crate::error::GeneratorError;
use crate::shuffle::shuffle;
use crate::source::RandomSource;
use randkit_core::{
    GeneratedValue, GenerationMeta, PasswordParams, PinParams, SecretMeta, Strength,
};
use std::collections::HashSet;

pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const DIGITS: &str = "0123456789";
pub const SYMBOLS: &str = "!@#$%^&*()-_=+[]{};:,.<>?/~";

/// Characters easily confused with one another in print.
pub const AMBIGUOUS: &str = "Il1|O0o`'\"";

/// Largest PIN length drawn as a single integer (10^18 < 2^64).
const MAX_PIN_WORD_DIGITS: usize = 18;

/// One enabled character category after exclusions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: &'static str,
    pub chars: Vec<char>,
}

/// An ordered, de-duplicated character pool with its categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Charset {
    categories: Vec<Category>,
    pool: Vec<char>,
    fallback: bool,
}

impl Charset {
    /// Build the pool from the category flags, minus the ambiguous set (if
    /// requested) and the explicit excludes.
    ///
    /// If nothing survives, the full default pool is used instead and
    /// [`Charset::is_fallback`] reports it.
    pub fn build(params: &PasswordParams) -> Self {
        let enabled = [
            ("lowercase", LOWERCASE, params.lowercase),
            ("uppercase", UPPERCASE, params.uppercase),
            ("digits", DIGITS, params.digits),
            ("symbols", SYMBOLS, params.symbols),
        ];
        let removed = |c: &char| {
            (params.exclude_ambiguous && AMBIGUOUS.contains(*c)) || params.exclude.contains(*c)
        };

        let categories: Vec<Category> = enabled
            .iter()
            .filter(|(_, _, on)| *on)
            .filter_map(|(name, chars, _)| {
                let chars: Vec<char> = chars.chars().filter(|c| !removed(c)).collect();
                (!chars.is_empty()).then_some(Category { name: *name, chars })
            })
            .collect();

        if categories.is_empty() {
            return Self::from_categories(Self::default_categories(), true);
        }
        Self::from_categories(categories, false)
    }

    /// The default "strong" pool: every category, nothing excluded.
    pub fn strong() -> Self {
        Self::from_categories(Self::default_categories(), false)
    }

    fn default_categories() -> Vec<Category> {
        [
            ("lowercase", LOWERCASE),
            ("uppercase", UPPERCASE),
            ("digits", DIGITS),
            ("symbols", SYMBOLS),
        ]
        .into_iter()
        .map(|(name, chars)| Category {
            name,
            chars: chars.chars().collect(),
        })
        .collect()
    }

    fn from_categories(categories: Vec<Category>, fallback: bool) -> Self {
        let mut seen = HashSet::new();
        let pool = categories
            .iter()
            .flat_map(|category| category.chars.iter().copied())
            .filter(|c| seen.insert(*c))
            .collect();
        Self {
            categories,
            pool,
            fallback,
        }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn pool(&self) -> &[char] {
        &self.pool
    }

    pub fn pool_size(&self) -> usize {
        self.pool.len()
    }

    pub fn is_fallback(&self) -> bool {
        self.fallback
    }

    /// `length * log2(pool size)`; zero for a single-character pool.
    pub fn entropy_bits(&self, length: usize) -> f64 {
        entropy_bits(self.pool_size(), length)
    }
}

fn entropy_bits(pool_size: usize, length: usize) -> f64 {
    if pool_size <= 1 {
        0.0
    } else {
        length as f64 * (pool_size as f64).log2()
    }
}

/// Generate one password of `length` characters from `charset`.
///
/// With `ensure_each`, one character from every category is placed first,
/// the rest are drawn from the whole pool, and the result is shuffled so the
/// guaranteed characters do not sit at fixed positions.
pub fn generate_password<S: RandomSource + ?Sized>(
    source: &mut S,
    charset: &Charset,
    length: usize,
    ensure_each: bool,
) -> Result<String, GeneratorError> {
    let mut chars = Vec::with_capacity(length);
    if ensure_each {
        for category in charset.categories().iter().take(length) {
            chars.push(category.chars[source.uniform_index(category.chars.len())?]);
        }
    }
    let pool = charset.pool();
    while chars.len() < length {
        chars.push(pool[source.uniform_index(pool.len())?]);
    }
    if ensure_each {
        shuffle(source, &mut chars)?;
    }
    Ok(chars.into_iter().collect())
}

pub fn passwords<S: RandomSource + ?Sized>(
    source: &mut S,
    params: &PasswordParams,
) -> Result<Draw, GeneratorError> {
    let charset = Charset::build(params);
    let mut warnings = Vec::new();
    if charset.is_fallback() {
        warnings.push(
            "No characters left after exclusions; using the default character pool".to_string(),
        );
    } else if charset.pool_size() == 1 {
        warnings.push("Character pool has a single character; passwords carry no entropy".to_string());
    }

    let values = (0..params.count)
        .map(|_| {
            generate_password(source, &charset, params.length, params.ensure_each)
                .map(GeneratedValue::Text)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let entropy = charset.entropy_bits(params.length);
    Ok(Draw::new(values)
        .with_meta(GenerationMeta::Secret(SecretMeta {
            pool_size: charset.pool_size(),
            entropy_bits: entropy,
            strength: Strength::from_bits(entropy),
            fallback_pool: charset.is_fallback(),
        }))
        .with_warnings(warnings))
}

/// Generate one PIN: a uniform number in `0..10^length`, zero padded.
pub fn generate_pin<S: RandomSource + ?Sized>(
    source: &mut S,
    length: usize,
) -> Result<String, GeneratorError> {
    if length <= MAX_PIN_WORD_DIGITS {
        let n = source.uniform_int(10u64.pow(length as u32))?;
        return Ok(format!("{n:0length$}"));
    }
    let digits: Vec<char> = DIGITS.chars().collect();
    (0..length)
        .map(|_| source.uniform_index(digits.len()).map(|i| digits[i]))
        .collect()
}

pub fn pins<S: RandomSource + ?Sized>(
    source: &mut S,
    params: &PinParams,
) -> Result<Draw, GeneratorError> {
    let values = (0..params.count)
        .map(|_| generate_pin(source, params.length).map(GeneratedValue::Text))
        .collect::<Result<Vec<_>, _>>()?;

    let entropy = entropy_bits(DIGITS.len(), params.length);
    Ok(Draw::new(values).with_meta(GenerationMeta::Secret(SecretMeta {
        pool_size: DIGITS.len(),
        entropy_bits: entropy,
        strength: Strength::from_bits(entropy),
        fallback_pool: false,
    })))
}

/// Insert `separator` between blocks of four characters.
pub fn group_chars(value: &str, separator: char) -> String {
    let chars: Vec<char> = value.chars().collect();
    chars
        .chunks(4)
        .map(|block| block.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(&separator.to_string())
}
