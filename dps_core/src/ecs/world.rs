//! World - Entity registry and one typed store per component variant

use super::{ComponentStore, Entity};
use crate::components::{
    ArchangelsStaffEffect, Attack, BlueBuffEffect, BurnEffect, CanAbilityCritFromItems,
    CanAbilityCritFromTraits, ChampionInfo, Crit, DamageStats, Equipment, EvenshroudEffect,
    FlickerbladeEffect, GuinsoosRagebladeEffect, Health, ItemStaticEffect, KrakensFuryEffect,
    Mana, NashorsToothEffect, Position, QuicksilverEffect, RapidfireEffect, RedBuffEffect,
    ShredEffect, Spell, SpearOfShojinEffect, SpiritVisageEffect, State, SunderEffect, Team,
    TitansResolveEffect, TraitBonuses, Traits, VoidStaffEffect, WoundEffect,
};
use crate::error::{SimError, SimResult};

/// A component type stored in the world.
///
/// Implemented for every component variant by `world_stores!`; systems reach
/// into the matching store through it, there is no dynamic dispatch.
pub trait Component: Sized + 'static {
    const KIND: ComponentKind;
    const NAME: &'static str;

    fn store(world: &World) -> &ComponentStore<Self>;
    fn store_mut(world: &mut World) -> &mut ComponentStore<Self>;
}

macro_rules! world_stores {
    ($($field:ident: $ty:ty => $kind:ident),* $(,)?) => {
        /// Identifies a component variant in queries
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum ComponentKind {
            $($kind,)*
        }

        /// All entities and their components
        #[derive(Debug, Clone, Default)]
        pub struct World {
            next_entity: u32,
            entities: Vec<Entity>,
            $($field: ComponentStore<$ty>,)*
        }

        $(
            impl Component for $ty {
                const KIND: ComponentKind = ComponentKind::$kind;
                const NAME: &'static str = stringify!($kind);

                fn store(world: &World) -> &ComponentStore<Self> {
                    &world.$field
                }

                fn store_mut(world: &mut World) -> &mut ComponentStore<Self> {
                    &mut world.$field
                }
            }
        )*

        impl World {
            /// Whether an entity holds a component of the given kind
            pub fn has_kind(&self, entity: Entity, kind: ComponentKind) -> bool {
                match kind {
                    $(ComponentKind::$kind => self.$field.contains(entity),)*
                }
            }

            /// Drop every component of an entity. The id itself stays allocated.
            pub fn clear_components(&mut self, entity: Entity) {
                $(self.$field.remove(entity);)*
            }
        }
    };
}

world_stores! {
    health: Health => Health,
    attack: Attack => Attack,
    crit: Crit => Crit,
    mana: Mana => Mana,
    spell: Spell => Spell,
    position: Position => Position,
    team: Team => Team,
    traits: Traits => Traits,
    equipment: Equipment => Equipment,
    champion_info: ChampionInfo => ChampionInfo,
    state: State => State,
    damage_stats: DamageStats => DamageStats,
    item_static: ItemStaticEffect => ItemStaticEffect,
    archangels: ArchangelsStaffEffect => ArchangelsStaff,
    quicksilver: QuicksilverEffect => Quicksilver,
    titans: TitansResolveEffect => TitansResolve,
    guinsoos: GuinsoosRagebladeEffect => GuinsoosRageblade,
    blue_buff: BlueBuffEffect => BlueBuff,
    red_buff: RedBuffEffect => RedBuff,
    shojin: SpearOfShojinEffect => SpearOfShojin,
    flickerblade: FlickerbladeEffect => Flickerblade,
    nashors: NashorsToothEffect => NashorsTooth,
    void_staff: VoidStaffEffect => VoidStaff,
    spirit_visage: SpiritVisageEffect => SpiritVisage,
    krakens: KrakensFuryEffect => KrakensFury,
    evenshroud: EvenshroudEffect => Evenshroud,
    burn: BurnEffect => Burn,
    wound: WoundEffect => Wound,
    shred: ShredEffect => Shred,
    sunder: SunderEffect => Sunder,
    rapidfire: RapidfireEffect => Rapidfire,
    trait_bonuses: TraitBonuses => TraitBonuses,
    ability_crit_items: CanAbilityCritFromItems => CanAbilityCritFromItems,
    ability_crit_traits: CanAbilityCritFromTraits => CanAbilityCritFromTraits,
}

/// Mutable view of the stat components touched by a stat pass
pub struct StatComponentsMut<'a> {
    pub health: &'a mut Health,
    pub attack: &'a mut Attack,
    pub crit: Option<&'a mut Crit>,
    pub mana: &'a mut Mana,
    pub spell: Option<&'a mut Spell>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preallocate the entity list
    pub fn with_capacity(capacity: usize) -> Self {
        World {
            entities: Vec::with_capacity(capacity),
            ..Default::default()
        }
    }

    /// Allocate a fresh entity id
    pub fn create_entity(&mut self) -> Entity {
        let entity = Entity::from_raw(self.next_entity);
        self.next_entity += 1;
        self.entities.push(entity);
        entity
    }

    /// Every entity in creation order
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Insert or replace a component, returning the previous value
    pub fn add_component<C: Component>(&mut self, entity: Entity, component: C) -> Option<C> {
        C::store_mut(self).insert(entity, component)
    }

    pub fn get<C: Component>(&self, entity: Entity) -> Option<&C> {
        C::store(self).get(entity)
    }

    pub fn get_mut<C: Component>(&mut self, entity: Entity) -> Option<&mut C> {
        C::store_mut(self).get_mut(entity)
    }

    /// Remove a component. Idempotent.
    pub fn remove<C: Component>(&mut self, entity: Entity) -> Option<C> {
        C::store_mut(self).remove(entity)
    }

    pub fn has<C: Component>(&self, entity: Entity) -> bool {
        C::store(self).contains(entity)
    }

    /// Get a component that must be present
    pub fn require<C: Component>(&self, entity: Entity) -> SimResult<&C> {
        self.get::<C>(entity).ok_or(SimError::MissingComponent {
            entity,
            component: C::NAME,
        })
    }

    pub fn require_mut<C: Component>(&mut self, entity: Entity) -> SimResult<&mut C> {
        C::store_mut(self)
            .get_mut(entity)
            .ok_or(SimError::MissingComponent {
                entity,
                component: C::NAME,
            })
    }

    /// Entities holding every listed kind, in creation order
    pub fn entities_with(&self, kinds: &[ComponentKind]) -> Vec<Entity> {
        self.entities
            .iter()
            .copied()
            .filter(|&e| kinds.iter().all(|&kind| self.has_kind(e, kind)))
            .collect()
    }

    /// Entities holding component `C`, in creation order
    pub fn query<C: Component>(&self) -> Vec<Entity> {
        self.entities_with(&[C::KIND])
    }

    /// Whether the entity has Health with HP above zero
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.health.get(entity).is_some_and(Health::is_alive)
    }

    pub fn team_of(&self, entity: Entity) -> Option<u8> {
        self.team.get(entity).map(|t| t.id)
    }

    /// Borrow the stat components of one entity at once.
    /// Returns None unless Health, Attack and Mana are all present.
    pub fn stat_components_mut(&mut self, entity: Entity) -> Option<StatComponentsMut<'_>> {
        let health = self.health.get_mut(entity)?;
        let attack = self.attack.get_mut(entity)?;
        let mana = self.mana.get_mut(entity)?;
        Some(StatComponentsMut {
            health,
            attack,
            crit: self.crit.get_mut(entity),
            mana,
            spell: self.spell.get_mut(entity),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_get_replace() {
        let mut world = World::new();
        let e = world.create_entity();
        assert!(world.add_component(e, Team::new(0)).is_none());
        let previous = world.add_component(e, Team::new(1));
        assert_eq!(previous, Some(Team::new(0)));
        assert_eq!(world.team_of(e), Some(1));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut world = World::new();
        let e = world.create_entity();
        world.add_component(e, CanAbilityCritFromItems);
        assert!(world.remove::<CanAbilityCritFromItems>(e).is_some());
        assert!(world.remove::<CanAbilityCritFromItems>(e).is_none());
        assert!(!world.has::<CanAbilityCritFromItems>(e));
    }

    #[test]
    fn test_entities_with_intersection() {
        let mut world = World::new();
        let a = world.create_entity();
        let b = world.create_entity();
        let c = world.create_entity();
        world.add_component(a, Health::new(100.0, 0.0, 0.0));
        world.add_component(a, Team::new(0));
        world.add_component(b, Team::new(1));
        world.add_component(c, Health::new(100.0, 0.0, 0.0));
        world.add_component(c, Team::new(1));

        let found = world.entities_with(&[ComponentKind::Health, ComponentKind::Team]);
        assert_eq!(found, vec![a, c]);
        assert_eq!(found, world.entities_with(&[ComponentKind::Team, ComponentKind::Health]));
        assert_eq!(world.query::<Team>(), vec![a, b, c]);
    }

    #[test]
    fn test_require_reports_component_name() {
        let mut world = World::new();
        let e = world.create_entity();
        match world.require::<Mana>(e) {
            Err(SimError::MissingComponent { component, .. }) => assert_eq!(component, "Mana"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_stat_components_need_core_stats() {
        let mut world = World::new();
        let e = world.create_entity();
        world.add_component(e, Health::new(100.0, 0.0, 0.0));
        world.add_component(e, Attack::new(50.0, 0.7, 1.0));
        assert!(world.stat_components_mut(e).is_none());

        world.add_component(e, Mana::new(60.0, 0.0));
        let stats = world.stat_components_mut(e).unwrap();
        assert!(stats.crit.is_none());
        assert!(stats.spell.is_none());
    }
}
