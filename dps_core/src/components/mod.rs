//! Components - Plain data records attached to entities

mod attack;
mod champion;
mod damage_stats;
mod debuffs;
mod equipment;
mod health;
mod item_effects;
mod item_procs;
mod mana;
mod markers;
mod state;
mod trait_effects;

pub use attack::{Attack, Crit};
pub use champion::{ChampionInfo, Position, Team, Traits};
pub use damage_stats::DamageStats;
pub use debuffs::{
    BurnEffect, Debuff, DebuffKind, DebuffTimer, ShredEffect, SunderEffect, WoundEffect,
};
pub use equipment::{EquipRejection, Equipment, MAX_ITEMS};
pub use health::Health;
pub use item_effects::{
    ArchangelsStaffEffect, GuinsoosRagebladeEffect, ItemStaticEffect, QuicksilverEffect,
    StackOutcome, TitansResolveEffect,
};
pub use item_procs::{
    BlueBuffEffect, EvenshroudEffect, FlickerbladeEffect, KrakensFuryEffect, NashorsToothEffect,
    RedBuffEffect, SpearOfShojinEffect, SpiritVisageEffect, TimedBuff, VoidStaffEffect,
};
pub use mana::{Mana, Spell, SpellVariable};
pub use markers::{CanAbilityCritFromItems, CanAbilityCritFromTraits};
pub use state::{ActionState, State};
pub use trait_effects::{RapidfireEffect, TraitBonuses};
