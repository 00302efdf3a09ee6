//! Procedural settlement names

use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

const LETTERS: [char; 26] = [
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r',
    's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
];

/// Generate a settlement name: 5 to 12 distinct letters, capitalized.
pub fn settlement_name(rng: &mut ChaCha8Rng) -> String {
    let length = rng.gen_range(5..=12);
    let mut name: String = LETTERS.choose_multiple(rng, length).collect();
    if let Some(first) = name.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    name
}
