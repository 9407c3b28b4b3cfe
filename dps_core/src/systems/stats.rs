//! Stat calculation - derives Final fields from Base and Bonus
//!
//! Each pass zeroes every Bonus field, re-accumulates all bonus sources on
//! the entity, then writes the Final fields. Nothing carries over from the
//! previous pass.

use crate::bonus::{accumulate, BonusAccumulator, BonusSource};
use crate::components::{
    ArchangelsStaffEffect, Attack, BlueBuffEffect, CanAbilityCritFromTraits, Crit, Equipment,
    EvenshroudEffect, FlickerbladeEffect, GuinsoosRagebladeEffect, Health, ItemStaticEffect,
    KrakensFuryEffect, NashorsToothEffect, QuicksilverEffect, RapidfireEffect, ShredEffect,
    SunderEffect, TitansResolveEffect, TraitBonuses,
};
use crate::data::item_names;
use crate::ecs::{ComponentKind, Entity, World};
use crate::events::{CombatEvent, EventHandler, EventKind, EventSink, ScheduledEvent};
use tracing::trace;

/// Runs the stat pass. Item and trait contributions can be switched off.
#[derive(Debug, Clone, Copy)]
pub struct StatCalculationSystem {
    include_items: bool,
    include_traits: bool,
}

impl Default for StatCalculationSystem {
    fn default() -> Self {
        StatCalculationSystem {
            include_items: true,
            include_traits: true,
        }
    }
}

impl StatCalculationSystem {
    pub fn new(include_items: bool, include_traits: bool) -> Self {
        StatCalculationSystem {
            include_items,
            include_traits,
        }
    }

    /// Recalculate every entity holding Health, Attack and Mana
    pub fn update(&self, world: &mut World) {
        let entities =
            world.entities_with(&[ComponentKind::Health, ComponentKind::Attack, ComponentKind::Mana]);
        for entity in entities {
            self.calculate(world, entity);
        }
    }

    /// Sum every bonus source present on the entity
    pub fn collect_bonuses(&self, world: &World, entity: Entity) -> BonusAccumulator {
        let mut sources: Vec<&dyn BonusSource> = Vec::new();
        if self.include_items {
            push_source::<ItemStaticEffect>(world, entity, &mut sources);
            push_source::<ArchangelsStaffEffect>(world, entity, &mut sources);
            push_source::<QuicksilverEffect>(world, entity, &mut sources);
            push_source::<TitansResolveEffect>(world, entity, &mut sources);
            push_source::<GuinsoosRagebladeEffect>(world, entity, &mut sources);
            push_source::<BlueBuffEffect>(world, entity, &mut sources);
            push_source::<FlickerbladeEffect>(world, entity, &mut sources);
            push_source::<NashorsToothEffect>(world, entity, &mut sources);
            push_source::<KrakensFuryEffect>(world, entity, &mut sources);
            push_source::<EvenshroudEffect>(world, entity, &mut sources);
        }
        if self.include_traits {
            push_source::<TraitBonuses>(world, entity, &mut sources);
            push_source::<RapidfireEffect>(world, entity, &mut sources);
        }
        // Debuffs come from enemies and apply regardless of the switches
        push_source::<ShredEffect>(world, entity, &mut sources);
        push_source::<SunderEffect>(world, entity, &mut sources);
        accumulate(&sources)
    }

    /// Recalculate one entity. Entities without Health, Attack and Mana are skipped.
    pub fn calculate(&self, world: &mut World, entity: Entity) {
        let bonuses = self.collect_bonuses(world, entity);
        let crit_items = if self.include_items {
            world.get::<Equipment>(entity).map_or(0, |equipment| {
                equipment.item_count(item_names::INFINITY_EDGE)
                    + equipment.item_count(item_names::JEWELED_GAUNTLET)
            })
        } else {
            0
        };
        let trait_ability_crit = world.has::<CanAbilityCritFromTraits>(entity);

        let Some(mut stats) = world.stat_components_mut(entity) else {
            return;
        };
        bonuses.write_to(
            stats.health,
            stats.attack,
            stats.crit.as_deref_mut(),
            stats.mana,
            stats.spell.as_deref_mut(),
        );

        derive_health(stats.health);
        derive_attack(stats.attack);
        if let Some(crit) = stats.crit {
            derive_crit(crit, crit_items, trait_ability_crit);
        }
        stats.mana.final_initial = stats.mana.base_initial + stats.mana.bonus_initial;
        if let Some(spell) = stats.spell {
            spell.final_ap = spell.base_ap + spell.bonus_ap;
        }

        trace!(
            "{entity}: HP {:.0}/{:.0} AD {:.1} AS {:.3}",
            stats.health.current_hp,
            stats.health.final_max_hp,
            stats.attack.final_ad,
            stats.attack.final_as
        );
    }
}

fn push_source<'w, C>(world: &'w World, entity: Entity, sources: &mut Vec<&'w dyn BonusSource>)
where
    C: crate::ecs::Component + BonusSource,
{
    if let Some(source) = world.get::<C>(entity) {
        sources.push(source);
    }
}

fn derive_health(health: &mut Health) {
    health.final_max_hp = (health.base_max_hp + health.bonus_max_hp) * (1.0 + health.bonus_percent_hp);
    health.final_armor =
        (health.base_armor + health.bonus_armor) * (1.0 - health.armor_reduction.clamp(0.0, 1.0));
    health.final_mr =
        (health.base_mr + health.bonus_mr) * (1.0 - health.mr_reduction.clamp(0.0, 1.0));
    health.final_durability = health.bonus_durability;
    health.current_hp = health.current_hp.min(health.final_max_hp);
}

fn derive_attack(attack: &mut Attack) {
    attack.final_ad = (attack.base_ad + attack.bonus_ad) * (1.0 + attack.bonus_percent_ad);
    attack.final_as = attack.base_as * (1.0 + attack.bonus_percent_as);
    attack.final_range = attack.base_range + attack.bonus_range;
    attack.final_damage_amp = attack.base_damage_amp + attack.bonus_damage_amp;

    // Wind-up and follow-through shrink with attack speed
    let scale = if attack.final_as > 0.0 && attack.base_as > 0.0 {
        attack.base_as / attack.final_as
    } else {
        1.0
    };
    attack.final_attack_startup = attack.base_attack_startup * scale;
    attack.final_attack_recovery = attack.base_attack_recovery * scale;
}

/// Crit chance above 100% converts to crit multiplier at half rate. With
/// Infinity Edge / Jeweled Gauntlet equipped, their crit damage is granted
/// only for copies beyond the one that enables ability crit, unless a trait
/// already enables it.
fn derive_crit(crit: &mut Crit, crit_items: usize, trait_ability_crit: bool) {
    let mut chance = crit.base_crit_chance + crit.bonus_crit_chance;
    let mut from_excess = 0.0;
    if chance > 1.0 {
        from_excess = (chance - 1.0) / 2.0;
        chance = 1.0;
    }
    crit.final_crit_chance = chance.max(0.0);

    let conditional = if crit_items > 0 {
        let granted = if trait_ability_crit {
            crit_items
        } else {
            crit_items - 1
        };
        granted as f64 / crit_items as f64 * crit.bonus_crit_damage_to_give
    } else {
        0.0
    };

    crit.final_crit_multiplier =
        crit.base_crit_multiplier + crit.bonus_crit_multiplier + conditional + from_excess;
}

impl EventHandler for StatCalculationSystem {
    fn name(&self) -> &str {
        "StatCalculationSystem"
    }

    fn can_handle(&self, kind: EventKind) -> bool {
        kind == EventKind::RecalculateStats
    }

    fn handle(&mut self, event: &ScheduledEvent, world: &mut World, sink: &mut EventSink<'_>) {
        if let CombatEvent::RecalculateStats { entity } = event.event {
            self.calculate(world, entity);
            sink.enqueue_now(CombatEvent::StatsRecalculated { entity });
        }
    }
}

/// Convenience for the common case: stats of one entity with everything on
pub fn recalculate(world: &mut World, entity: Entity) {
    StatCalculationSystem::default().calculate(world, entity);
}
