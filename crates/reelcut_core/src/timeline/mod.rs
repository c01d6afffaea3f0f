//! Timeline synthesis.

mod synthesizer;

pub use synthesizer::synthesize;
