//! ChampionBuilder - hand-made units that bypass the catalogue

use crate::components::{
    Attack, ChampionInfo, Crit, DamageStats, Equipment, Health, Mana, Position, Spell, State, Team,
    Traits,
};
use crate::ecs::{Entity, World};

/// Fluent builder for units such as training dummies.
///
/// Defaults: 1000 HP, no resists, no attack, no crit, no mana, team 1.
#[derive(Debug, Clone)]
pub struct ChampionBuilder {
    name: String,
    star_level: u8,
    team: u8,
    position: Position,
    max_hp: f64,
    armor: f64,
    mr: f64,
    ad: f64,
    attack_speed: f64,
    range: f64,
    attack_startup: f64,
    attack_recovery: f64,
    crit_chance: f64,
    crit_multiplier: f64,
    max_mana: f64,
    initial_mana: f64,
    spell: Option<Spell>,
    traits: Vec<String>,
}

impl ChampionBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        ChampionBuilder {
            name: name.into(),
            star_level: 1,
            team: 1,
            position: Position::default(),
            max_hp: 1000.0,
            armor: 0.0,
            mr: 0.0,
            ad: 0.0,
            attack_speed: 0.0,
            range: 1.0,
            attack_startup: 0.0,
            attack_recovery: 0.0,
            crit_chance: 0.0,
            crit_multiplier: Crit::default().base_crit_multiplier,
            max_mana: 0.0,
            initial_mana: 0.0,
            spell: None,
            traits: Vec::new(),
        }
    }

    /// A target that never acts
    pub fn training_dummy(max_hp: f64, armor: f64, mr: f64) -> Self {
        Self::new("Training Dummy").health(max_hp).resists(armor, mr)
    }

    pub fn team(mut self, team: u8) -> Self {
        self.team = team;
        self
    }

    pub fn star_level(mut self, star_level: u8) -> Self {
        self.star_level = star_level;
        self
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.position = Position::new(x, y);
        self
    }

    pub fn health(mut self, max_hp: f64) -> Self {
        self.max_hp = max_hp;
        self
    }

    pub fn resists(mut self, armor: f64, mr: f64) -> Self {
        self.armor = armor;
        self.mr = mr;
        self
    }

    pub fn attack(mut self, ad: f64, attack_speed: f64, range: f64) -> Self {
        self.ad = ad;
        self.attack_speed = attack_speed;
        self.range = range;
        self
    }

    pub fn attack_timings(mut self, startup: f64, recovery: f64) -> Self {
        self.attack_startup = startup;
        self.attack_recovery = recovery;
        self
    }

    pub fn crit(mut self, chance: f64, multiplier: f64) -> Self {
        self.crit_chance = chance;
        self.crit_multiplier = multiplier;
        self
    }

    pub fn mana(mut self, max: f64, initial: f64) -> Self {
        self.max_mana = max;
        self.initial_mana = initial;
        self
    }

    pub fn spell(mut self, spell: Spell) -> Self {
        self.spell = Some(spell);
        self
    }

    pub fn traits(mut self, traits: Vec<String>) -> Self {
        self.traits = traits;
        self
    }

    /// Create the entity with every component a combat participant needs
    pub fn build(self, world: &mut World) -> Entity {
        let entity = world.create_entity();
        world.add_component(entity, Health::new(self.max_hp, self.armor, self.mr));
        world.add_component(
            entity,
            Attack::new(self.ad, self.attack_speed, self.range)
                .with_timings(self.attack_startup, self.attack_recovery),
        );
        world.add_component(entity, Crit::new(self.crit_chance, self.crit_multiplier));
        world.add_component(entity, Mana::new(self.max_mana, self.initial_mana));
        let spell = self
            .spell
            .unwrap_or_else(|| Spell::new(format!("{} ability", self.name), self.max_mana));
        world.add_component(entity, spell);
        world.add_component(
            entity,
            ChampionInfo::new(self.name.clone(), self.name, 0, self.star_level),
        );
        world.add_component(entity, Traits::new(self.traits));
        world.add_component(entity, Equipment::new());
        world.add_component(entity, self.position);
        world.add_component(entity, Team::new(self.team));
        world.add_component(entity, State::new());
        world.add_component(entity, DamageStats::new());
        entity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dummy_defaults() {
        let mut world = World::new();
        let dummy = ChampionBuilder::training_dummy(2000.0, 50.0, 20.0).build(&mut world);

        let health = world.get::<Health>(dummy).unwrap();
        assert!((health.current_hp - 2000.0).abs() < f64::EPSILON);
        assert!((health.final_mr - 20.0).abs() < f64::EPSILON);
        assert_eq!(world.get::<Attack>(dummy).unwrap().final_as, 0.0);
        assert_eq!(world.team_of(dummy), Some(1));
        assert_eq!(world.get::<ChampionInfo>(dummy).unwrap().display_name, "Training Dummy");
    }

    #[test]
    fn test_builder_chain() {
        let mut world = World::new();
        let unit = ChampionBuilder::new("Attacker")
            .team(0)
            .at(1.0, 2.0)
            .attack(50.0, 0.5, 1.0)
            .crit(0.25, 1.5)
            .mana(60.0, 20.0)
            .build(&mut world);

        assert!((world.get::<Crit>(unit).unwrap().final_crit_multiplier - 1.5).abs() < 1e-12);
        assert!((world.get::<Mana>(unit).unwrap().current - 20.0).abs() < 1e-12);
        assert_eq!(world.get::<Position>(unit).copied(), Some(Position::new(1.0, 2.0)));
        assert_eq!(world.get::<Spell>(unit).unwrap().mana_cost, 60.0);
    }
}
