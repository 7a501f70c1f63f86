/// Fraction of the remaining distance to the stage cap covered per tick.
pub const APPROACH_RATE: f64 = 0.03;
/// Smallest step, so the bar keeps visibly creeping near the cap.
pub const MIN_STEP: f64 = 0.05;

/// Coarse milestones of an audit. Each stage owns a band of the bar: entering
/// it lifts progress to the band's floor, and ticks approach the band's cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ProgressStage {
    /// Record created, request not yet sent upstream.
    Starting,
    /// Both strategy calls in flight.
    Requesting,
    /// One strategy has been scored.
    PartiallyScored,
    /// Both strategies scored; the result is being assembled.
    Finalizing,
}

impl ProgressStage {
    /// `(floor, cap)` of the stage, both clamped to `ceiling`.
    pub fn band(self, ceiling: f64) -> (f64, f64) {
        let (floor, cap): (f64, f64) = match self {
            ProgressStage::Starting => (0.0, 10.0),
            ProgressStage::Requesting => (10.0, 60.0),
            ProgressStage::PartiallyScored => (60.0, 80.0),
            ProgressStage::Finalizing => (80.0, ceiling),
        };
        (floor.min(ceiling), cap.min(ceiling))
    }

    /// The stage reached once another strategy is scored.
    pub fn after_strategy_scored(self) -> Self {
        match self {
            ProgressStage::Starting | ProgressStage::Requesting => ProgressStage::PartiallyScored,
            ProgressStage::PartiallyScored | ProgressStage::Finalizing => ProgressStage::Finalizing,
        }
    }
}

/// Decelerating schedule: big steps right after a stage starts, shrinking
/// steps as progress approaches the stage cap, which it never passes. Never
/// decreases `current`.
pub fn next_progress(current: f64, stage: ProgressStage, ceiling: f64) -> f64 {
    let (floor, cap) = stage.band(ceiling);
    let base = current.max(floor);
    if base >= cap {
        return base;
    }
    let step = ((cap - base) * APPROACH_RATE).max(MIN_STEP);
    (base + step).min(cap)
}

#[cfg(test)]
mod tests {
    use super::*;

    const STAGES: [ProgressStage; 4] = [
        ProgressStage::Starting,
        ProgressStage::Requesting,
        ProgressStage::PartiallyScored,
        ProgressStage::Finalizing,
    ];

    #[test]
    fn steps_shrink_as_progress_grows() {
        let first = next_progress(10.0, ProgressStage::Requesting, 95.0) - 10.0;
        let later = next_progress(55.0, ProgressStage::Requesting, 95.0) - 55.0;
        assert!(first > later);
        assert!(later > 0.0);
    }

    #[test]
    fn never_passes_the_stage_cap() {
        for stage in STAGES {
            let (_, cap) = stage.band(95.0);
            let mut value = 0.0;
            for _ in 0..10_000 {
                let next = next_progress(value, stage, 95.0);
                assert!(next >= value);
                assert!(next <= cap);
                value = next;
            }
            assert_eq!(value, cap);
        }
    }

    #[test]
    fn stage_floors_rise_and_stay_below_the_ceiling() {
        for ceiling in [95.0, 70.0, 99.9, 5.0] {
            let mut previous = (0.0, 0.0);
            for stage in STAGES {
                let (floor, cap) = stage.band(ceiling);
                assert!(floor <= cap, "{stage:?} at {ceiling}");
                assert!(cap <= ceiling, "{stage:?} at {ceiling}");
                assert!(floor >= previous.0 && cap >= previous.1, "{stage:?} at {ceiling}");
                previous = (floor, cap);
            }
        }
    }

    #[test]
    fn entering_a_stage_jumps_to_its_floor() {
        assert!(next_progress(3.0, ProgressStage::PartiallyScored, 95.0) > 60.0);
        assert!(next_progress(3.0, ProgressStage::Finalizing, 95.0) > 80.0);
    }

    #[test]
    fn values_above_the_cap_are_left_alone() {
        assert_eq!(next_progress(97.0, ProgressStage::Finalizing, 95.0), 97.0);
        assert_eq!(next_progress(50.0, ProgressStage::Starting, 95.0), 50.0);
    }

    #[test]
    fn scored_strategies_walk_the_stages_forward() {
        let stage = ProgressStage::Requesting.after_strategy_scored();
        assert_eq!(stage, ProgressStage::PartiallyScored);
        assert_eq!(stage.after_strategy_scored(), ProgressStage::Finalizing);
        assert_eq!(
            ProgressStage::Finalizing.after_strategy_scored(),
            ProgressStage::Finalizing
        );
    }
}
