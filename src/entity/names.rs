//! Dwarf name generator
//!
//! Names are a prefix, a stem and a suffix glued together and capitalized.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const PREFIXES: &[&str] = &["", "bel", "nar", "xan", "bell", "natr", "ev"];
const STEMS: &[&str] = &[
    "adur", "aes", "anim", "apoll", "imac", "educ", "equis", "extr", "guius", "hann", "equi",
    "amora", "hum", "iace", "ille", "inept", "iuv", "obe", "ocul", "orbis",
];
const SUFFIXES: &[&str] = &[
    "", "us", "ix", "ox", "ith", "ath", "um", "ator", "or", "axia", "imus", "ais", "itur", "orex",
    "o", "y",
];

/// Seeded generator so a scenario always produces the same names
#[derive(Debug, Clone)]
pub struct NameGenerator {
    rng: ChaCha8Rng,
}

impl NameGenerator {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn generate(&mut self) -> String {
        let mut name = String::new();
        for part in [PREFIXES, STEMS, SUFFIXES] {
            if let Some(piece) = part.choose(&mut self.rng) {
                name.push_str(piece);
            }
        }
        capitalize(&name)
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_capitalized() {
        let mut names = NameGenerator::with_seed(7);
        for _ in 0..50 {
            let name = names.generate();
            assert!(!name.is_empty());
            assert!(name.chars().next().unwrap().is_uppercase());
        }
    }

    #[test]
    fn test_same_seed_same_names() {
        let mut a = NameGenerator::with_seed(42);
        let mut b = NameGenerator::with_seed(42);
        for _ in 0..10 {
            assert_eq!(a.generate(), b.generate());
        }
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("adurus"), "Adurus");
        assert_eq!(capitalize(""), "");
    }
}
