//! Effect contracts.
//!
//! An effect reads the user, the target and the context and describes what
//! should happen as an [`EffectOutcome`]. It never mutates a combatant; the
//! resolver applies the changes afterwards, in order.

use super::AbilityId;
use crate::action::ActionError;
use crate::combat;
use crate::config::BattleConfig;
use crate::context::BattleContext;
use crate::inventory::ItemId;
use crate::state::{Entity, StatusKind};

/// HP restored by a Potion.
pub const POTION_HEAL: u32 = 50;
/// MP restored by an Ether.
pub const ETHER_RESTORE: u32 = 20;
/// HP a fallen ally returns with after a Phoenix Down.
pub const REVIVE_HP: u32 = 1;

/// One change to the effect's target (or, for items, the inventory).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EffectChange {
    Damage(u32),
    Heal(u32),
    RestoreMp(u32),
    AddStatus { kind: StatusKind, turns: u32 },
    RemoveStatus(StatusKind),
    /// Brings a fallen target back with the given HP.
    Revive(u32),
    MarkScanned,
    ConsumeItem(ItemId),
}

/// Result of an effect contract: the changes to apply and the log message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EffectOutcome {
    pub changes: Vec<EffectChange>,
    pub message: String,
}

impl EffectOutcome {
    fn new(message: impl Into<String>) -> Self {
        Self {
            changes: Vec::new(),
            message: message.into(),
        }
    }

    fn with(mut self, change: EffectChange) -> Self {
        self.changes.push(change);
        self
    }
}

/// Evaluates the effect of `ability` used by `user` on `target`.
///
/// Statuses granted here last `config.default_status_turns`. Passive
/// abilities have no effect and report [`ActionError::PassiveAbility`].
pub fn evaluate(
    ability: AbilityId,
    user: &Entity,
    target: &Entity,
    config: &BattleConfig,
    ctx: &mut BattleContext<'_>,
) -> Result<EffectOutcome, ActionError> {
    if let Some(item) = ability.consumes()
        && ctx.inventory.item_count(item) == 0
    {
        return Err(ActionError::OutOfItems { item });
    }

    if ability.targets_fallen() == target.is_alive() {
        let reason = if target.is_alive() {
            format!("{} is still standing", target.name)
        } else {
            format!("{} has fallen", target.name)
        };
        return Err(ActionError::EffectFailed { ability, reason });
    }

    let (user_name, target_name) = (&user.name, &target.name);

    let outcome = match ability {
        AbilityId::FireSlash => {
            let raw = combat::fire_slash_raw(user.stats.str, ctx.rng.unit());
            let damage = combat::mitigate(raw, target);
            EffectOutcome::new(format!("{user_name} uses Fire Slash for {damage} damage!"))
                .with(EffectChange::Damage(damage))
        }
        AbilityId::Heal => {
            let amount = combat::heal_amount(user.stats.mnd);
            EffectOutcome::new(format!(
                "{user_name} casts Heal! {target_name} recovers {amount} HP!"
            ))
            .with(EffectChange::Heal(amount))
        }
        AbilityId::CurePoison => EffectOutcome::new(format!(
            "{user_name} casts CurePoison! {target_name}'s poison is cured!"
        ))
        .with(EffectChange::RemoveStatus(StatusKind::Poison)),
        AbilityId::Protect => EffectOutcome::new(format!(
            "{user_name} casts Protect! {target_name}'s defense increases!"
        ))
        .with(EffectChange::AddStatus {
            kind: StatusKind::Protect,
            turns: config.default_status_turns,
        }),
        AbilityId::Override => EffectOutcome::new(format!(
            "{user_name} prepares to override {target_name}'s action!"
        )),
        AbilityId::UsePotion => EffectOutcome::new(format!(
            "{user_name} uses a Potion! {target_name} recovers {POTION_HEAL} HP!"
        ))
        .with(EffectChange::ConsumeItem(ItemId::Potion))
        .with(EffectChange::Heal(POTION_HEAL)),
        AbilityId::UseEther => EffectOutcome::new(format!(
            "{user_name} uses an Ether! {target_name} recovers {ETHER_RESTORE} MP!"
        ))
        .with(EffectChange::ConsumeItem(ItemId::Ether))
        .with(EffectChange::RestoreMp(ETHER_RESTORE)),
        AbilityId::UseAntidote => EffectOutcome::new(format!(
            "{user_name} uses an Antidote! {target_name}'s poison is cured!"
        ))
        .with(EffectChange::ConsumeItem(ItemId::Antidote))
        .with(EffectChange::RemoveStatus(StatusKind::Poison)),
        AbilityId::PhoenixDown => EffectOutcome::new(format!(
            "{user_name} uses a Phoenix Down! {target_name} is revived!"
        ))
        .with(EffectChange::ConsumeItem(ItemId::PhoenixDown))
        .with(EffectChange::Revive(REVIVE_HP)),
        AbilityId::Scan => EffectOutcome::new(format!(
            "{user_name} scans {target_name}!\nHP: {}/{}\nWeakness: Fire",
            target.stats.hp, target.stats.max_hp
        ))
        .with(EffectChange::MarkScanned),
        AbilityId::Headstrong | AbilityId::Prayer => {
            return Err(ActionError::PassiveAbility { ability });
        }
    };

    Ok(outcome)
}
