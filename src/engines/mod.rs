pub mod detection;
pub mod disaggregation;
pub mod matching;
