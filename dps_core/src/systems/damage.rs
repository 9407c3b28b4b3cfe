//! Damage system - mitigation formulas and hit resolution
//!
//! `AttackLanded` and `SpellCast` are turned into `DamageApplied` events;
//! `DamageApplied` subtracts HP, raises Death/Kill and grants attack mana.
//! Burn ticks arrive here already resolved as true damage.

use crate::components::{
    Attack, CanAbilityCritFromItems, CanAbilityCritFromTraits, ChampionInfo, Crit, DamageStats,
    Health, Mana, Spell,
};
use crate::ecs::{Entity, World};
use crate::events::{CombatEvent, DamageApplied, EventHandler, EventKind, EventSink, ScheduledEvent};
use crate::systems::targeting::nearest_enemy;
use crate::types::{DamageKind, MANA_PER_ATTACK};
use tracing::{debug, info, warn};

/// Expected crit multiplier: `(1 - p) + p * m`
pub fn crit_expected_value(crit_chance: f64, crit_multiplier: f64) -> f64 {
    (1.0 - crit_chance) + crit_chance * crit_multiplier
}

/// Damage multiplier from armor or magic resist
///
/// Uses `100 / (100 + resist)`. Zero or negative resist (and NaN) gives 1.0,
/// infinite resist gives 0.0.
///
/// # Arguments
/// * `resist` - The defender's final armor or magic resist
pub fn resistance_multiplier(resist: f64) -> f64 {
    if resist.is_nan() || resist <= 0.0 {
        return 1.0;
    }
    if resist.is_infinite() {
        return 0.0;
    }
    100.0 / (100.0 + resist)
}

/// Damage multiplier from durability (fraction of damage ignored)
pub fn durability_multiplier(durability: f64) -> f64 {
    (1.0 - durability).max(0.0)
}

/// Pre- and post-mitigation damage of one hit
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DamageBreakdown {
    pub pre_mitigation_physical: f64,
    pub pre_mitigation_magic: f64,
    pub final_physical: f64,
    pub final_magic: f64,
}

impl DamageBreakdown {
    pub fn final_total(&self) -> f64 {
        self.final_physical + self.final_magic
    }

    pub fn into_event(self, source: Entity, target: Entity, kind: DamageKind) -> DamageApplied {
        DamageApplied {
            source,
            target,
            kind,
            pre_mitigation_physical: self.pre_mitigation_physical,
            pre_mitigation_magic: self.pre_mitigation_magic,
            final_physical: self.final_physical,
            final_magic: self.final_magic,
            final_true: 0.0,
            final_total: self.final_total(),
        }
    }
}

/// Defensive stats of the hit target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Defense {
    pub armor: f64,
    pub mr: f64,
    pub durability: f64,
}

impl From<&Health> for Defense {
    fn from(health: &Health) -> Self {
        Defense {
            armor: health.final_armor,
            mr: health.final_mr,
            durability: health.final_durability,
        }
    }
}

/// Resolve raw physical and magic damage against a defender
pub fn mitigate(
    raw_physical: f64,
    raw_magic: f64,
    crit_ev: f64,
    damage_amp: f64,
    defense: Defense,
) -> DamageBreakdown {
    let amp = 1.0 + damage_amp;
    let durability = durability_multiplier(defense.durability);
    let pre_physical = raw_physical * crit_ev * amp;
    let pre_magic = raw_magic * crit_ev * amp;
    DamageBreakdown {
        pre_mitigation_physical: pre_physical,
        pre_mitigation_magic: pre_magic,
        final_physical: pre_physical * resistance_multiplier(defense.armor) * durability,
        final_magic: pre_magic * resistance_multiplier(defense.mr) * durability,
    }
}

/// Raw (physical, magic) damage of a spell before crit, amp and mitigation.
///
/// Recognised variables at the caster's star index:
/// `BaseDamage`/`MagicDamage` flat magic, `Damage` magic scaled by AP/100,
/// `APRatio` magic per point of AP, `PhysicalDamage` flat physical,
/// `ADRatio`/`PercentAD` physical per point of AD. A spell with none of
/// these deals its AP as magic damage.
pub fn spell_raw_damage(spell: &Spell, star_index: usize, final_ad: f64) -> (f64, f64) {
    let var = |name: &str| spell.var_value_for_star(name, star_index);
    let mut recognised = false;
    let mut physical = 0.0;
    let mut magic = 0.0;

    for name in ["BaseDamage", "MagicDamage"] {
        if let Some(value) = var(name) {
            magic += value;
            recognised = true;
        }
    }
    if let Some(value) = var("Damage") {
        magic += value * spell.final_ap / 100.0;
        recognised = true;
    }
    if let Some(value) = var("APRatio") {
        magic += value * spell.final_ap;
        recognised = true;
    }
    if let Some(value) = var("PhysicalDamage") {
        physical += value;
        recognised = true;
    }
    for name in ["ADRatio", "PercentAD"] {
        if let Some(value) = var(name) {
            physical += value * final_ad;
            recognised = true;
        }
    }

    if !recognised {
        magic = spell.final_ap;
    }
    (physical, magic)
}

/// Resolves attacks and spells into damage
#[derive(Debug, Default)]
pub struct DamageSystem;

impl DamageSystem {
    pub fn new() -> Self {
        DamageSystem
    }

    fn on_attack_landed(
        &self,
        source: Entity,
        target: Entity,
        base_damage: f64,
        world: &mut World,
        sink: &mut EventSink<'_>,
    ) {
        if !world.is_alive(source) || !world.is_alive(target) {
            return;
        }
        let Some(attack) = world.get::<Attack>(source) else {
            warn!("DamageSystem: {source} has no Attack component");
            return;
        };
        let Some(health) = world.get::<Health>(target) else {
            return;
        };
        let crit_ev = world
            .get::<Crit>(source)
            .map_or(1.0, Crit::expected_multiplier);
        let breakdown = mitigate(
            base_damage,
            0.0,
            crit_ev,
            attack.final_damage_amp,
            Defense::from(health),
        );

        if let Some(attack) = world.get_mut::<Attack>(source) {
            attack.last_attack_time = sink.now();
        }
        if let Some(stats) = world.get_mut::<DamageStats>(source) {
            stats.crit_damage += crit_portion(breakdown.final_total(), crit_ev);
        }

        debug!(
            "{} attacks {} for {:.2} physical",
            source,
            target,
            breakdown.final_physical
        );
        sink.enqueue_now(CombatEvent::DamageApplied(
            breakdown.into_event(source, target, DamageKind::Attack),
        ));
    }

    fn on_spell_cast(
        &self,
        source: Entity,
        target: Option<Entity>,
        world: &mut World,
        sink: &mut EventSink<'_>,
    ) {
        if !world.is_alive(source) {
            return;
        }
        let target = match target.filter(|&t| world.is_alive(t)) {
            Some(target) => target,
            None => match nearest_enemy(world, source) {
                Some(target) => target,
                None => return,
            },
        };
        let (Some(spell), Some(attack), Some(health)) = (
            world.get::<Spell>(source),
            world.get::<Attack>(source),
            world.get::<Health>(target),
        ) else {
            warn!("DamageSystem: missing Spell/Attack on {source} or Health on {target}");
            return;
        };

        let star_index = world
            .get::<ChampionInfo>(source)
            .map_or(0, ChampionInfo::star_index);
        let (raw_physical, raw_magic) = spell_raw_damage(spell, star_index, attack.final_ad);

        let can_crit = world.has::<CanAbilityCritFromItems>(source)
            || world.has::<CanAbilityCritFromTraits>(source);
        let crit_ev = if can_crit {
            world
                .get::<Crit>(source)
                .map_or(1.0, Crit::expected_multiplier)
        } else {
            1.0
        };

        let breakdown = mitigate(
            raw_physical,
            raw_magic,
            crit_ev,
            attack.final_damage_amp,
            Defense::from(health),
        );
        if let Some(stats) = world.get_mut::<DamageStats>(source) {
            stats.crit_damage += crit_portion(breakdown.final_total(), crit_ev);
        }

        debug!(
            "{} casts on {} for {:.2} ({:.2} physical, {:.2} magic)",
            source,
            target,
            breakdown.final_total(),
            breakdown.final_physical,
            breakdown.final_magic
        );
        sink.enqueue_now(CombatEvent::DamageApplied(
            breakdown.into_event(source, target, DamageKind::Spell),
        ));
    }

    fn on_damage_applied(&self, damage: &DamageApplied, world: &mut World, sink: &mut EventSink<'_>) {
        let Some(health) = world.get_mut::<Health>(damage.target) else {
            return;
        };
        // Damage on an already dead target is absorbed without further events
        if !health.is_alive() {
            return;
        }
        health.take_damage(damage.final_total);
        let died = !health.is_alive();

        if let Some(stats) = world.get_mut::<DamageStats>(damage.target) {
            stats.damage_taken += damage.final_total;
        }
        if let Some(stats) = world.get_mut::<DamageStats>(damage.source) {
            stats.record_dealt(damage);
        }

        if died {
            info!("{} killed {} at t={:.2}", damage.source, damage.target, sink.now());
            if let Some(stats) = world.get_mut::<DamageStats>(damage.source) {
                stats.kills += 1;
            }
            sink.enqueue_now(CombatEvent::Death {
                entity: damage.target,
            });
            sink.enqueue_now(CombatEvent::Kill {
                killer: damage.source,
                victim: damage.target,
            });
        }

        // Only the attacker gains mana, and only from attacks
        if damage.kind.grants_mana() && world.is_alive(damage.source) {
            if let Some(mana) = world.get_mut::<Mana>(damage.source) {
                mana.gain(MANA_PER_ATTACK);
            }
        }
    }
}

/// Share of `total` that comes from crits at expected value `crit_ev`
fn crit_portion(total: f64, crit_ev: f64) -> f64 {
    if crit_ev <= 1.0 {
        0.0
    } else {
        total * (1.0 - 1.0 / crit_ev)
    }
}

impl EventHandler for DamageSystem {
    fn name(&self) -> &str {
        "DamageSystem"
    }

    fn can_handle(&self, kind: EventKind) -> bool {
        matches!(
            kind,
            EventKind::AttackLanded | EventKind::SpellCast | EventKind::DamageApplied
        )
    }

    fn handle(&mut self, event: &ScheduledEvent, world: &mut World, sink: &mut EventSink<'_>) {
        match &event.event {
            CombatEvent::AttackLanded {
                source,
                target,
                base_damage,
            } => self.on_attack_landed(*source, *target, *base_damage, world, sink),
            CombatEvent::SpellCast { source, target } => {
                self.on_spell_cast(*source, *target, world, sink)
            }
            CombatEvent::DamageApplied(damage) => self.on_damage_applied(damage, world, sink),
            _ => {}
        }
    }
}
