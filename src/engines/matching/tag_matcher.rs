use super::overlap::overlap_score;
use crate::config::MatchingConfig;
use crate::types::{Cycle, Phase, Tag};

/// The detected cycle chosen for a tag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TagMatch {
    pub phase: Phase,
    pub cycle: Cycle,
    pub score: f64,
}

/// Pairs ground-truth tags with detected cycles by overlap score.
pub struct TagMatcher {
    config: MatchingConfig,
}

impl TagMatcher {
    pub fn new(config: MatchingConfig) -> Self {
        Self { config }
    }

    /// Tag window shifted to where the appliance actually draws power.
    pub fn widened_window(&self, tag: &Tag) -> (f64, f64) {
        let duration = tag.duration();
        (
            tag.on_time + self.config.on_shift_ratio * duration,
            tag.off_time + self.config.off_extension_ratio * duration,
        )
    }

    /// Best-overlapping cycle for `tag`; `None` when nothing overlaps.
    pub fn best_cycle(&self, cycles: &[Cycle], tag: &Tag) -> Option<(Cycle, f64)> {
        let window = self.widened_window(tag);

        cycles
            .iter()
            .map(|cycle| (*cycle, overlap_score(cycle.window(), window)))
            .fold(None, |best: Option<(Cycle, f64)>, candidate| match best {
                Some(b) if b.1 >= candidate.1 => Some(b),
                _ => Some(candidate),
            })
            .filter(|(_, score)| *score > 0.0)
    }

    /// Best cycle across phases. On equal scores the earlier phase wins.
    pub fn best_match(&self, detected: &[(Phase, Vec<Cycle>)], tag: &Tag) -> Option<TagMatch> {
        detected
            .iter()
            .filter_map(|(phase, cycles)| {
                self.best_cycle(cycles, tag).map(|(cycle, score)| TagMatch {
                    phase: *phase,
                    cycle,
                    score,
                })
            })
            .fold(None, |best: Option<TagMatch>, candidate| match best {
                Some(b) if b.score >= candidate.score => Some(b),
                _ => Some(candidate),
            })
    }
}
