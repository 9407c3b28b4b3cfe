//! Event-driven item effects

use super::ItemRegistry;
use crate::components::Equipment;
use crate::ecs::{Entity, World};
use crate::events::{CombatEvent, EventHandler, EventKind, EventSink, ScheduledEvent};
use std::sync::Arc;

/// Routes combat events to the item handlers of the entities involved:
/// attacker and target, caster and target, killer, or buff holder
#[derive(Debug, Clone)]
pub struct DynamicEventItemSystem {
    registry: Arc<ItemRegistry>,
}

impl DynamicEventItemSystem {
    pub fn new(registry: Arc<ItemRegistry>) -> Self {
        DynamicEventItemSystem { registry }
    }

    fn involved(event: &CombatEvent) -> Vec<Entity> {
        match event {
            CombatEvent::AttackLanded { source, target, .. } => vec![*source, *target],
            CombatEvent::DamageApplied(damage) => vec![damage.source, damage.target],
            CombatEvent::SpellCast { source, target } => {
                std::iter::once(*source).chain(*target).collect()
            }
            CombatEvent::SpellRecoveryEnd { entity } | CombatEvent::ItemBuffExpired { entity, .. } => {
                vec![*entity]
            }
            CombatEvent::Kill { killer, .. } => vec![*killer],
            _ => Vec::new(),
        }
    }
}

impl EventHandler for DynamicEventItemSystem {
    fn name(&self) -> &str {
        "DynamicEventItemSystem"
    }

    fn can_handle(&self, kind: EventKind) -> bool {
        matches!(
            kind,
            EventKind::AttackLanded
                | EventKind::DamageApplied
                | EventKind::SpellCast
                | EventKind::SpellRecoveryEnd
                | EventKind::Kill
                | EventKind::ItemBuffExpired
        )
    }

    fn handle(&mut self, event: &ScheduledEvent, world: &mut World, sink: &mut EventSink<'_>) {
        let mut entities = Self::involved(&event.event);
        entities.dedup();
        for entity in entities {
            if !world.has::<Equipment>(entity) {
                continue;
            }
            for handler in self.registry.equipped_handlers(world, entity) {
                if handler.is_event_based() {
                    handler.handle_event(entity, event, world, sink);
                }
            }
        }
    }
}
