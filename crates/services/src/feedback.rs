//! Spoken feedback lines. Picked at random so repeated answers do not sound
//! canned.

use rand::rng;
use rand::seq::IndexedRandom;

const PRAISE: &[&str] = &[
    "That's right!",
    "Excellent spelling!",
    "You got it!",
    "Nailed it!",
    "Perfect. On to the next one.",
];

const ENCOURAGEMENT: &[&str] = &[
    "Not quite.",
    "So close. Give it another look.",
    "That one is tricky. Try again.",
    "Almost. Check the definition.",
];

/// A line for a correct answer.
#[must_use]
pub fn praise() -> &'static str {
    PRAISE.choose(&mut rng()).copied().unwrap_or("Correct!")
}

/// A line for a wrong answer.
#[must_use]
pub fn encouragement() -> &'static str {
    ENCOURAGEMENT
        .choose(&mut rng())
        .copied()
        .unwrap_or("Not quite. Try again.")
}

/// The one hint a word gets: its opening letter.
#[must_use]
pub fn hint_phrase(letter: char) -> String {
    format!("It starts with the letter {}.", letter.to_uppercase())
}
