use crate::inventory::Inventory;
use crate::log::{LogEntry, LogSink};
use crate::rng::RngSource;

/// Collaborators a battle borrows while it advances.
///
/// Nothing in here is owned by the battle: the caller decides where
/// randomness comes from, which inventory items are drawn from, and where
/// log entries end up.
pub struct BattleContext<'a> {
    pub rng: &'a mut dyn RngSource,
    pub inventory: &'a mut dyn Inventory,
    pub sink: &'a mut dyn LogSink,
}

impl<'a> BattleContext<'a> {
    pub fn new(
        rng: &'a mut dyn RngSource,
        inventory: &'a mut dyn Inventory,
        sink: &'a mut dyn LogSink,
    ) -> Self {
        Self {
            rng,
            inventory,
            sink,
        }
    }

    pub fn emit(&mut self, entry: LogEntry) {
        self.sink.push(entry);
    }
}
