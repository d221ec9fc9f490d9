//! Action resolution.
//!
//! The resolver validates an action, applies its numeric and status effects
//! to the roster and reports what happened as log entries. Invalid actions
//! resolve to a no-op with an explanatory message; nothing is retried and
//! spent MP or items are not given back.

use crate::ability::{self, AbilityId, EffectChange, EffectOutcome, TargetKind};
use crate::action::{Action, ActionError};
use crate::combat;
use crate::config::BattleConfig;
use crate::context::BattleContext;
use crate::error::GameError;
use crate::log::LogEntry;
use crate::state::{CombatFlags, Entity, EntityId, Roster, Side, StatusKind};

/// Applies one action on behalf of the combatant whose turn it is.
#[derive(Clone, Copy, Debug)]
pub struct ActionResolver<'a> {
    config: &'a BattleConfig,
}

impl<'a> ActionResolver<'a> {
    pub fn new(config: &'a BattleConfig) -> Self {
        Self { config }
    }

    /// Resolves `action` for `actor`. Failures become log entries.
    pub fn resolve(
        &self,
        roster: &mut Roster,
        actor: EntityId,
        action: &Action,
        ctx: &mut BattleContext<'_>,
    ) -> Vec<LogEntry> {
        match self.try_resolve(roster, actor, action, ctx) {
            Ok(messages) => messages,
            Err(err) if err.severity().is_internal() => vec![LogEntry::error(err.to_string())],
            Err(err) => vec![LogEntry::info(err.to_string())],
        }
    }

    fn try_resolve(
        &self,
        roster: &mut Roster,
        actor_id: EntityId,
        action: &Action,
        ctx: &mut BattleContext<'_>,
    ) -> Result<Vec<LogEntry>, ActionError> {
        let (actor, side) = acting(roster, actor_id)?;
        let actor_name = actor.name.clone();

        match action {
            Action::Attack { target } => {
                let target = eligible(roster, *target, side.opposing(), false)
                    .ok_or_else(|| no_target(&actor_name, action))?;
                let raw = combat::attack_raw(actor.stats.str, ctx.rng.unit());
                let damage = combat::mitigate(raw, target);
                let target_id = target.id;
                self.attack(roster, &actor_name, target_id, damage)
            }
            Action::Defend => {
                if let Some(actor) = roster.get_mut(actor_id) {
                    actor.set_defending(true);
                }
                Ok(vec![LogEntry::info(format!("{actor_name} defends!"))])
            }
            Action::UseAbility { ability, target } => {
                self.use_ability(roster, actor_id, *ability, *target, ctx)
            }
            Action::Pray => Ok(vec![LogEntry::info(format!(
                "{actor_name} prays... (nothing happens)"
            ))]),
            Action::Override { target, queued } => {
                if !actor.knows(AbilityId::Override) {
                    return Err(ActionError::UnknownAbility {
                        actor: actor_name,
                        ability: AbilityId::Override,
                    });
                }
                let ally = eligible(roster, *target, side, false)
                    .filter(|ally| ally.id != actor_id && !ally.is_player_controlled())
                    .ok_or_else(|| ActionError::OverrideRejected {
                        actor: actor_name.clone(),
                        target: roster.name_of(*target).to_string(),
                    })?;
                let ally_name = ally.name.clone();
                let ally_id = ally.id;

                if let Some(ally) = roster.get_mut(ally_id) {
                    ally.pending_override = Some(queued.clone());
                }
                Ok(vec![LogEntry::info(format!(
                    "{actor_name} will control {ally_name}'s next action!"
                ))])
            }
        }
    }

    fn attack(
        &self,
        roster: &mut Roster,
        actor_name: &str,
        target_id: EntityId,
        damage: u32,
    ) -> Result<Vec<LogEntry>, ActionError> {
        let target = roster
            .get_mut(target_id)
            .ok_or_else(|| ActionError::InvalidTarget {
                actor: actor_name.to_string(),
                action: "attack",
            })?;
        target.stats.lose_hp(damage);

        let mut messages = vec![LogEntry::info(format!(
            "{actor_name} attacks {} for {damage} damage!",
            target.name
        ))];
        if target.remove_status(StatusKind::Sleep) {
            messages.push(LogEntry::info(format!("{} wakes up!", target.name)));
        }
        Ok(messages)
    }

    fn use_ability(
        &self,
        roster: &mut Roster,
        actor_id: EntityId,
        ability: AbilityId,
        target_id: EntityId,
        ctx: &mut BattleContext<'_>,
    ) -> Result<Vec<LogEntry>, ActionError> {
        let (actor, side) = acting(roster, actor_id)?;
        let descriptor = ability.descriptor();

        if !actor.knows(ability) {
            return Err(ActionError::UnknownAbility {
                actor: actor.name.clone(),
                ability,
            });
        }
        if ability.is_passive() {
            return Err(ActionError::PassiveAbility { ability });
        }

        let target = match descriptor.target {
            TargetKind::Enemy => eligible(roster, target_id, side.opposing(), false),
            TargetKind::Ally => eligible(roster, target_id, side, ability.targets_fallen()),
            TargetKind::SelfOnly => Some(actor),
        }
        .ok_or_else(|| ActionError::InvalidTarget {
            actor: actor.name.clone(),
            action: descriptor.name,
        })?;

        if !actor.can_afford(ability) {
            return Err(ActionError::InsufficientMp {
                actor: actor.name.clone(),
                ability,
            });
        }

        let outcome = ability::effect::evaluate(ability, actor, target, self.config, ctx);
        let target_id = target.id;

        // The cost is paid even if the effect then fails.
        if let Some(actor) = roster.get_mut(actor_id) {
            actor.stats.spend_mp(descriptor.cost);
        }

        let EffectOutcome { changes, message } = outcome?;
        let target = roster
            .get_mut(target_id)
            .ok_or_else(|| ActionError::EffectFailed {
                ability,
                reason: "target left the battle".to_string(),
            })?;
        for change in changes {
            apply(target, change, ability, ctx)?;
        }

        Ok(vec![LogEntry::info(message)])
    }
}

/// Applies one effect change to `target`.
fn apply(
    target: &mut Entity,
    change: EffectChange,
    ability: AbilityId,
    ctx: &mut BattleContext<'_>,
) -> Result<(), ActionError> {
    match change {
        EffectChange::Damage(amount) => {
            target.stats.lose_hp(amount);
        }
        EffectChange::Heal(amount) => {
            target.stats.gain_hp(amount);
        }
        EffectChange::RestoreMp(amount) => {
            target.stats.gain_mp(amount);
        }
        EffectChange::AddStatus { kind, turns } => target.add_status(kind, turns),
        EffectChange::RemoveStatus(kind) => {
            target.remove_status(kind);
        }
        EffectChange::Revive(hp) => {
            target.stats.gain_hp(hp.max(1));
        }
        EffectChange::MarkScanned => target.flags.insert(CombatFlags::SCANNED),
        // Stock was checked when the effect was evaluated.
        EffectChange::ConsumeItem(item) => {
            if !ctx.inventory.use_item(item) {
                return Err(ActionError::EffectFailed {
                    ability,
                    reason: format!("the inventory refused to hand over a {item}"),
                });
            }
        }
    }
    Ok(())
}

/// The acting combatant and its side, if it can still act.
fn acting(roster: &Roster, actor: EntityId) -> Result<(&Entity, Side), ActionError> {
    match (roster.get(actor), roster.side_of(actor)) {
        (Some(entity), Some(side)) if entity.is_alive() => Ok((entity, side)),
        _ => Err(ActionError::ActorUnable {
            actor: roster.name_of(actor).to_string(),
        }),
    }
}

/// `id` if it fights on `side` and is alive (or fallen, when `fallen` is set).
fn eligible(roster: &Roster, id: EntityId, side: Side, fallen: bool) -> Option<&Entity> {
    if roster.side_of(id)? != side {
        return None;
    }
    roster.get(id).filter(|e| e.is_alive() != fallen)
}

fn no_target(actor: &str, action: &Action) -> ActionError {
    ActionError::InvalidTarget {
        actor: actor.to_string(),
        action: action.label(),
    }
}
