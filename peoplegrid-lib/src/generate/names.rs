//! Single-word synthetic name tokens.

use rand::Rng;

const ONSETS: [&str; 24] = [
    "b", "br", "c", "ch", "d", "dr", "f", "g", "gr", "h", "j", "k", "l", "m", "n", "p", "pr",
    "r", "s", "sh", "st", "t", "v", "w",
];
const VOWELS: [&str; 10] = ["a", "e", "i", "o", "u", "ai", "ea", "ie", "oo", "ou"];
const CODAS: [&str; 12] = ["", "", "", "n", "r", "l", "s", "m", "ck", "nd", "rt", "x"];

/// Draws a lower-case pronounceable word of two or three syllables.
pub fn name_token<R: Rng + ?Sized>(rng: &mut R) -> String {
    let syllables = rng.random_range(2..=3);
    let mut word = String::new();
    for _ in 0..syllables {
        word.push_str(pick(rng, &ONSETS));
        word.push_str(pick(rng, &VOWELS));
        word.push_str(pick(rng, &CODAS));
    }
    word
}

fn pick<R: Rng + ?Sized>(rng: &mut R, parts: &[&'static str]) -> &'static str {
    parts[rng.random_range(0..parts.len())]
}
