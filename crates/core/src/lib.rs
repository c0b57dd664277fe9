//! Core domain types for spelling practice: words and difficulty tiers,
//! answer normalization and judging, per-word attempt state, and study
//! progress.
//!
//! Everything in this crate is pure and synchronous. Persistence, speech,
//! and networking live in the crates layered on top.

#![forbid(unsafe_code)]

pub mod error;
pub mod judge;
pub mod model;
pub mod normalize;
pub mod time;
pub mod wordlist;

pub use error::Error;
pub use judge::{Judgment, judge};
pub use normalize::normalize_answer;
pub use time::Clock;
pub use wordlist::{WordListError, parse_word_list};
