//! BonusSource - Trait for anything that contributes bonus stats

mod accumulator;

pub use accumulator::BonusAccumulator;

/// A contributor to an entity's Bonus fields.
///
/// Implemented by the static item aggregate, every item and trait effect
/// component, and team-wide trait bonuses.
pub trait BonusSource {
    /// Identifier used in logs
    fn id(&self) -> &str;

    /// Application order (lower first). Order does not change the result since
    /// every contribution is additive.
    fn priority(&self) -> i32 {
        0
    }

    /// Add this source's contribution
    fn apply(&self, bonuses: &mut BonusAccumulator);
}

/// Accumulate a set of sources in priority order
pub fn accumulate(sources: &[&dyn BonusSource]) -> BonusAccumulator {
    let mut sorted: Vec<&&dyn BonusSource> = sources.iter().collect();
    sorted.sort_by_key(|s| s.priority());

    let mut bonuses = BonusAccumulator::new();
    for source in sorted {
        source.apply(&mut bonuses);
    }
    bonuses
}
