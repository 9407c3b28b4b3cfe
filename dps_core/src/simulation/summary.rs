//! Simulation summary - per-unit results of one combat

use crate::components::{Attack, ChampionInfo, Crit, DamageStats, Health, Spell};
use crate::ecs::{ComponentKind, Entity, World};
use serde::Serialize;
use std::fmt;

/// Why the tick loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TerminationReason {
    TimeLimit,
    /// Every unit of this team is dead
    TeamEliminated(u8),
}

impl fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerminationReason::TimeLimit => f.write_str("time limit reached"),
            TerminationReason::TeamEliminated(team) => write!(f, "team {team} eliminated"),
        }
    }
}

/// Final state and damage of one unit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChampionReport {
    pub entity: Entity,
    pub name: String,
    pub team: u8,
    pub star_level: u8,
    pub alive: bool,
    pub current_hp: f64,
    pub max_hp: f64,
    pub armor: f64,
    pub magic_resist: f64,
    pub attack_damage: f64,
    pub attack_speed: f64,
    pub ability_power: f64,
    pub crit_chance: f64,
    pub crit_multiplier: f64,
    pub damage: DamageStats,
    pub dps: f64,
}

impl ChampionReport {
    /// Snapshot one unit. Returns None for entities without Health.
    pub fn collect(world: &World, entity: Entity, elapsed: f64) -> Option<Self> {
        let health = world.get::<Health>(entity)?;
        let info = world.get::<ChampionInfo>(entity);
        let attack = world.get::<Attack>(entity);
        let crit = world.get::<Crit>(entity);
        let damage = world.get::<DamageStats>(entity).cloned().unwrap_or_default();

        Some(ChampionReport {
            entity,
            name: info.map_or_else(|| entity.to_string(), |i| i.display_name.clone()),
            team: world.team_of(entity).unwrap_or_default(),
            star_level: info.map_or(1, |i| i.star_level),
            alive: health.is_alive(),
            current_hp: health.current_hp,
            max_hp: health.final_max_hp,
            armor: health.final_armor,
            magic_resist: health.final_mr,
            attack_damage: attack.map_or(0.0, |a| a.final_ad),
            attack_speed: attack.map_or(0.0, |a| a.final_as),
            ability_power: world.get::<Spell>(entity).map_or(0.0, |s| s.final_ap),
            crit_chance: crit.map_or(0.0, |c| c.final_crit_chance),
            crit_multiplier: crit.map_or(1.0, |c| c.final_crit_multiplier),
            dps: damage.dps(elapsed),
            damage,
        })
    }
}

/// Outcome of a combat
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationSummary {
    pub end_time: f64,
    pub events_processed: u64,
    pub termination: TerminationReason,
    pub champions: Vec<ChampionReport>,
}

impl SimulationSummary {
    /// Snapshot every unit with Health and a Team, in creation order
    pub fn collect(
        world: &World,
        end_time: f64,
        events_processed: u64,
        termination: TerminationReason,
    ) -> Self {
        let champions = world
            .entities_with(&[ComponentKind::Health, ComponentKind::Team])
            .into_iter()
            .filter_map(|e| ChampionReport::collect(world, e, end_time))
            .collect();
        SimulationSummary {
            end_time,
            events_processed,
            termination,
            champions,
        }
    }

    pub fn report(&self, entity: Entity) -> Option<&ChampionReport> {
        self.champions.iter().find(|r| r.entity == entity)
    }

    /// Damage dealt by all units of a team
    pub fn team_damage(&self, team: u8) -> f64 {
        self.champions
            .iter()
            .filter(|r| r.team == team)
            .map(|r| r.damage.total_damage())
            .sum()
    }

    pub fn team_dps(&self, team: u8) -> f64 {
        if self.end_time <= 0.0 {
            return 0.0;
        }
        self.team_damage(team) / self.end_time
    }
}

impl fmt::Display for SimulationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Combat ended at {:.2}s ({}), {} events processed",
            self.end_time, self.termination, self.events_processed
        )?;
        writeln!(
            f,
            "{:<24} {:>4} {:>4} {:>13} {:>7} {:>6} {:>6} {:>10} {:>10} {:>8} {:>8}",
            "Unit", "Team", "Star", "HP", "AD", "AS", "AP", "Attack", "Spell", "Burn", "DPS"
        )?;
        for r in &self.champions {
            let hp = format!("{:.0}/{:.0}", r.current_hp.max(0.0), r.max_hp);
            writeln!(
                f,
                "{:<24} {:>4} {:>4} {:>13} {:>7.1} {:>6.3} {:>6.0} {:>10.1} {:>10.1} {:>8.1} {:>8.1}",
                r.name,
                r.team,
                r.star_level,
                hp,
                r.attack_damage,
                r.attack_speed,
                r.ability_power,
                r.damage.attack_damage,
                r.damage.spell_damage,
                r.damage.burn_damage,
                r.dps
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::ChampionBuilder;
    use crate::events::DamageApplied;
    use crate::systems::stats::recalculate;
    use crate::types::DamageKind;

    #[test]
    fn test_collect_and_team_totals() {
        let mut world = World::new();
        let shooter = ChampionBuilder::new("Shooter")
            .team(0)
            .attack(60.0, 1.0, 4.0)
            .build(&mut world);
        let dummy = ChampionBuilder::training_dummy(2000.0, 0.0, 0.0).build(&mut world);
        recalculate(&mut world, shooter);
        recalculate(&mut world, dummy);
        world
            .get_mut::<DamageStats>(shooter)
            .unwrap()
            .record_dealt(&DamageApplied::true_damage(shooter, dummy, DamageKind::Attack, 300.0));

        let summary = SimulationSummary::collect(&world, 10.0, 42, TerminationReason::TimeLimit);
        assert_eq!(summary.champions.len(), 2);
        let report = summary.report(shooter).unwrap();
        assert_eq!(report.name, "Shooter");
        assert!((report.dps - 30.0).abs() < 1e-9);
        assert!((summary.team_damage(0) - 300.0).abs() < 1e-9);
        assert!((summary.team_dps(0) - 30.0).abs() < 1e-9);
        assert_eq!(summary.team_damage(1), 0.0);

        let text = summary.to_string();
        assert!(text.contains("time limit reached"));
        assert!(text.contains("Shooter"));
    }
}
