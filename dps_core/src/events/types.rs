//! Combat event payloads

use crate::components::DebuffKind;
use crate::ecs::Entity;
use crate::types::DamageKind;
use serde::Serialize;
use std::fmt;

/// Resolved damage from one hit, mitigation already applied
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DamageApplied {
    pub source: Entity,
    pub target: Entity,
    pub kind: DamageKind,
    pub pre_mitigation_physical: f64,
    pub pre_mitigation_magic: f64,
    pub final_physical: f64,
    pub final_magic: f64,
    /// Unmitigated damage, e.g. burn
    pub final_true: f64,
    pub final_total: f64,
}

impl DamageApplied {
    /// True damage that ignores resists, amp and durability
    pub fn true_damage(source: Entity, target: Entity, kind: DamageKind, amount: f64) -> Self {
        DamageApplied {
            source,
            target,
            kind,
            pre_mitigation_physical: 0.0,
            pre_mitigation_magic: 0.0,
            final_physical: 0.0,
            final_magic: 0.0,
            final_true: amount,
            final_total: amount,
        }
    }

    pub fn is_spell(&self) -> bool {
        self.kind == DamageKind::Spell
    }
}

/// Request to put a debuff on a unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DebuffApplication {
    pub target: Entity,
    pub source: Entity,
    pub kind: DebuffKind,
    /// Fraction: resist removed, healing removed or max HP burned per tick
    pub value: f64,
    pub duration: f64,
    /// Api name of the item or trait that applied it
    pub origin: &'static str,
}

/// Everything that can happen during combat
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum CombatEvent {
    /// Ask the action decision system what the entity does next
    ChampionAction { entity: Entity },
    AttackStart { entity: Entity },
    AttackLanded {
        source: Entity,
        target: Entity,
        base_damage: f64,
    },
    AttackRecoveryEnd { entity: Entity },
    AttackCooldownEnd { entity: Entity },
    SpellCastStart { entity: Entity },
    SpellCast {
        source: Entity,
        target: Option<Entity>,
    },
    SpellRecoveryEnd { entity: Entity },
    DamageApplied(DamageApplied),
    Death { entity: Entity },
    Kill { killer: Entity, victim: Entity },
    RecalculateStats { entity: Entity },
    StatsRecalculated { entity: Entity },
    CrowdControlEnd { entity: Entity },
    ApplyDebuff(DebuffApplication),
    /// Fires at a debuff's end time; ignored if it was extended since
    DebuffExpired { target: Entity, kind: DebuffKind },
    BurnTick { target: Entity },
    /// A timed item buff runs out. Stale when `activation` no longer
    /// matches the item's latest activation.
    ItemBuffExpired {
        entity: Entity,
        item: &'static str,
        activation: u32,
    },
}

/// Discriminant of a [`CombatEvent`], used for handler filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EventKind {
    ChampionAction,
    AttackStart,
    AttackLanded,
    AttackRecoveryEnd,
    AttackCooldownEnd,
    SpellCastStart,
    SpellCast,
    SpellRecoveryEnd,
    DamageApplied,
    Death,
    Kill,
    RecalculateStats,
    StatsRecalculated,
    CrowdControlEnd,
    ApplyDebuff,
    DebuffExpired,
    BurnTick,
    ItemBuffExpired,
}

impl CombatEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            CombatEvent::ChampionAction { .. } => EventKind::ChampionAction,
            CombatEvent::AttackStart { .. } => EventKind::AttackStart,
            CombatEvent::AttackLanded { .. } => EventKind::AttackLanded,
            CombatEvent::AttackRecoveryEnd { .. } => EventKind::AttackRecoveryEnd,
            CombatEvent::AttackCooldownEnd { .. } => EventKind::AttackCooldownEnd,
            CombatEvent::SpellCastStart { .. } => EventKind::SpellCastStart,
            CombatEvent::SpellCast { .. } => EventKind::SpellCast,
            CombatEvent::SpellRecoveryEnd { .. } => EventKind::SpellRecoveryEnd,
            CombatEvent::DamageApplied(_) => EventKind::DamageApplied,
            CombatEvent::Death { .. } => EventKind::Death,
            CombatEvent::Kill { .. } => EventKind::Kill,
            CombatEvent::RecalculateStats { .. } => EventKind::RecalculateStats,
            CombatEvent::StatsRecalculated { .. } => EventKind::StatsRecalculated,
            CombatEvent::CrowdControlEnd { .. } => EventKind::CrowdControlEnd,
            CombatEvent::ApplyDebuff(_) => EventKind::ApplyDebuff,
            CombatEvent::DebuffExpired { .. } => EventKind::DebuffExpired,
            CombatEvent::BurnTick { .. } => EventKind::BurnTick,
            CombatEvent::ItemBuffExpired { .. } => EventKind::ItemBuffExpired,
        }
    }

    /// The entity that acts or originates the event
    pub fn source(&self) -> Entity {
        match *self {
            CombatEvent::ChampionAction { entity }
            | CombatEvent::AttackStart { entity }
            | CombatEvent::AttackRecoveryEnd { entity }
            | CombatEvent::AttackCooldownEnd { entity }
            | CombatEvent::SpellCastStart { entity }
            | CombatEvent::SpellRecoveryEnd { entity }
            | CombatEvent::Death { entity }
            | CombatEvent::RecalculateStats { entity }
            | CombatEvent::StatsRecalculated { entity }
            | CombatEvent::CrowdControlEnd { entity }
            | CombatEvent::ItemBuffExpired { entity, .. } => entity,
            CombatEvent::DebuffExpired { target, .. } | CombatEvent::BurnTick { target } => target,
            CombatEvent::ApplyDebuff(debuff) => debuff.source,
            CombatEvent::AttackLanded { source, .. } | CombatEvent::SpellCast { source, .. } => {
                source
            }
            CombatEvent::DamageApplied(damage) => damage.source,
            CombatEvent::Kill { killer, .. } => killer,
        }
    }
}

impl fmt::Display for CombatEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CombatEvent::AttackLanded {
                source,
                target,
                base_damage,
            } => write!(f, "AttackLanded {} -> {} ({base_damage:.1})", source.id(), target.id()),
            CombatEvent::SpellCast { source, target } => match target {
                Some(target) => write!(f, "SpellCast {} -> {}", source.id(), target.id()),
                None => write!(f, "SpellCast {} (no target)", source.id()),
            },
            CombatEvent::DamageApplied(d) => write!(
                f,
                "DamageApplied {} -> {} ({:.1}, {})",
                d.source.id(),
                d.target.id(),
                d.final_total,
                d.kind
            ),
            CombatEvent::ApplyDebuff(d) => write!(
                f,
                "ApplyDebuff {:?} {} -> {} ({:.2} for {:.1}s)",
                d.kind,
                d.source.id(),
                d.target.id(),
                d.value,
                d.duration
            ),
            CombatEvent::ItemBuffExpired { entity, item, .. } => {
                write!(f, "ItemBuffExpired {} ({item})", entity.id())
            }
            CombatEvent::Kill { killer, victim } => {
                write!(f, "Kill {} -> {}", killer.id(), victim.id())
            }
            other => write!(f, "{:?} {}", other.kind(), other.source().id()),
        }
    }
}
