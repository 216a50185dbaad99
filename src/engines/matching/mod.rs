pub mod overlap;
pub mod tag_matcher;

pub use overlap::overlap_score;
pub use tag_matcher::{TagMatch, TagMatcher};
