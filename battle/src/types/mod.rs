//! Domain types for a battle in progress

mod log;
mod pokemon;
mod side;
mod stats;
mod type_chart;

pub use log::{BattleLog, LogEntry, LogKind};
pub use pokemon::{ActiveEffect, AnimKind, AnimMarker, BattlePokemon};
pub use side::{BattleSide, Side};
pub use stats::StatModifiers;
pub use type_chart::{Effectiveness, TYPE_CHART, effectiveness, effectiveness_multi};
