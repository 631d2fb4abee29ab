use crate::stats::Stats;

/// Read-only view shared by characters and monsters
pub trait Combatant {
    fn name(&self) -> &str;
    fn level(&self) -> u32;
    fn stats(&self) -> &Stats;

    fn max_health(&self) -> f64 {
        self.stats().max_health()
    }

    fn max_mana(&self) -> f64 {
        self.stats().max_mana()
    }
}
