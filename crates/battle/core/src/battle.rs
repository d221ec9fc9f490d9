//! The battle state machine.
//!
//! [`Battle`] owns the roster and sequences turns through four phases:
//!
//! ```text
//! TurnStart ──► SelectingAction ──(submit_action)──┐
//!     │                                             ▼
//!     ├──────── (policy turn) ──────────────► Executing ──(complete_execution)──► TurnStart
//!     ▼
//! BattleEnd
//! ```
//!
//! It never waits on anything. The two suspension points (player input and
//! the presentation delay after an action) surface as [`Step`] values and are
//! honored by whoever drives the battle.

use crate::action::{Action, TurnError};
use crate::ai::{DecisionContext, Policy};
use crate::config::BattleConfig;
use crate::context::BattleContext;
use crate::engine::{ActionResolver, compute_order, gain_exp, status};
use crate::log::{BattleLog, LogEntry};
use crate::state::{Entity, EntityId, Roster, Side, StatusKind};

/// How a battle ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleResult {
    Victory,
    Defeat,
}

/// Terminal report handed to the caller once the battle is over.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleOutcome {
    pub result: BattleResult,
    /// Experience granted to each surviving party member.
    pub experience: u32,
    /// True when the turn loop stalled and the battle had to be called off.
    pub forced: bool,
}

impl BattleOutcome {
    pub fn is_victory(&self) -> bool {
        self.result == BattleResult::Victory
    }
}

/// Where the state machine currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// Looking for the next combatant able to act.
    TurnStart,
    /// Suspended until the player supplies an action for `actor`.
    SelectingAction { actor: EntityId },
    /// An action has been resolved; the presentation delay is running.
    Executing { actor: EntityId },
    BattleEnd(BattleOutcome),
}

/// What [`Battle::advance`] stopped at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// A player-controlled combatant must choose an action.
    AwaitingInput(EntityId),
    /// A policy-controlled combatant acted; call
    /// [`Battle::complete_execution`] once its outcome has been shown.
    Executed { actor: EntityId },
    Ended(BattleOutcome),
}

/// Answer to [`Battle::submit_action`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Submission {
    /// The action was resolved; the battle is now executing.
    Accepted,
    /// An action is already executing; the submission was ignored.
    Dropped,
    /// The battle is not waiting for this combatant.
    Rejected,
}

/// A battle between a party and a group of enemies.
#[derive(Clone, Debug)]
pub struct Battle {
    roster: Roster,
    config: BattleConfig,
    order: Vec<EntityId>,
    /// Index into `order` of the next combatant the scan visits.
    cursor: usize,
    phase: Phase,
    log: BattleLog,
    started: bool,
    turn: u32,
}

impl Battle {
    pub fn new(roster: Roster, config: BattleConfig) -> Self {
        let log = BattleLog::with_capacity(config.log_capacity);
        Self {
            roster,
            config,
            order: Vec::new(),
            cursor: 0,
            phase: Phase::TurnStart,
            log,
            started: false,
            turn: 0,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Turn order fixed at [`Battle::start`].
    pub fn order(&self) -> &[EntityId] {
        &self.order
    }

    pub fn log(&self) -> &BattleLog {
        &self.log
    }

    /// Number of turns handed out so far.
    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        match self.phase {
            Phase::BattleEnd(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn current_actor(&self) -> Option<EntityId> {
        match self.phase {
            Phase::SelectingAction { actor } | Phase::Executing { actor } => Some(actor),
            _ => None,
        }
    }

    pub fn is_executing(&self) -> bool {
        matches!(self.phase, Phase::Executing { .. })
    }

    /// Maximum combatants visited while looking for one able to act.
    pub fn scan_guard(&self) -> usize {
        self.order.len().saturating_mul(self.config.scan_guard_factor).max(1)
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    /// Announces the battle and fixes the turn order. Calling it twice is a no-op.
    pub fn start(&mut self, ctx: &mut BattleContext<'_>) {
        if self.started {
            return;
        }
        self.started = true;
        self.order = compute_order(&self.roster);
        self.cursor = 0;
        self.phase = Phase::TurnStart;
        self.record(LogEntry::info("Battle Start!"), ctx);
    }

    /// Runs the battle until it needs something from outside.
    ///
    /// From `TurnStart` this finds the next combatant able to act and either
    /// stops for player input or resolves the policy's action. In any other
    /// phase it reports where the battle is waiting without changing anything.
    pub fn advance(&mut self, ctx: &mut BattleContext<'_>) -> Step {
        if !self.started {
            self.start(ctx);
        }

        match self.phase {
            Phase::TurnStart => self.turn_start(ctx),
            Phase::SelectingAction { actor } => Step::AwaitingInput(actor),
            Phase::Executing { actor } => Step::Executed { actor },
            Phase::BattleEnd(outcome) => Step::Ended(outcome),
        }
    }

    /// Delivers the chosen action of the combatant the battle is waiting on.
    ///
    /// While an action is executing further submissions are dropped, so a
    /// double-submitted action is applied exactly once.
    pub fn submit_action(
        &mut self,
        actor: EntityId,
        action: Action,
        ctx: &mut BattleContext<'_>,
    ) -> Submission {
        match self.phase {
            Phase::Executing { .. } => Submission::Dropped,
            Phase::SelectingAction { actor: current } if current == actor => {
                self.execute(actor, &action, ctx);
                Submission::Accepted
            }
            _ => Submission::Rejected,
        }
    }

    /// Ends the presentation of the executed action and returns to `TurnStart`.
    ///
    /// Returns false if nothing was executing.
    pub fn complete_execution(&mut self) -> bool {
        if !self.is_executing() {
            return false;
        }
        self.phase = Phase::TurnStart;
        true
    }

    // ========================================================================
    // Turn start
    // ========================================================================

    fn turn_start(&mut self, ctx: &mut BattleContext<'_>) -> Step {
        if let Some(result) = self.terminal_result() {
            return self.finish(result, false, ctx);
        }
        if self.order.is_empty() {
            return self.finish(BattleResult::Defeat, true, ctx);
        }

        match self.scan(ctx) {
            Ok(Some(actor)) => self.begin_turn(actor, ctx),
            Ok(None) => {
                // Poison finished off a whole side during the scan.
                let result = self.terminal_result().unwrap_or(BattleResult::Defeat);
                self.finish(result, false, ctx)
            }
            Err(err) => self.recover(err, ctx),
        }
    }

    fn terminal_result(&self) -> Option<BattleResult> {
        if self.roster.all_defeated(Side::Enemies) {
            Some(BattleResult::Victory)
        } else if self.roster.all_defeated(Side::Party) {
            Some(BattleResult::Defeat)
        } else {
            None
        }
    }

    /// Visits combatants in order until one is able to act.
    ///
    /// Every living combatant visited is ticked first. Returns `Ok(None)` if
    /// a side was wiped out by status damage along the way.
    fn scan(&mut self, ctx: &mut BattleContext<'_>) -> Result<Option<EntityId>, TurnError> {
        let guard = self.scan_guard();

        for _ in 0..guard {
            let id = self.order[self.cursor % self.order.len()];
            self.cursor = (self.cursor + 1) % self.order.len();

            let Some(entity) = self.roster.get_mut(id) else {
                continue;
            };
            if !entity.is_alive() {
                continue;
            }

            let messages = status::tick(entity, &self.config);
            let name = entity.name.clone();
            let alive = entity.is_alive();
            let asleep = entity.has_status(StatusKind::Sleep);
            let paralyzed = entity.has_status(StatusKind::Paralysis);
            self.record_all(messages, ctx);

            if !alive {
                if self.terminal_result().is_some() {
                    return Ok(None);
                }
                continue;
            }
            if asleep {
                self.record(LogEntry::info(format!("{name} is asleep!")), ctx);
                continue;
            }
            if paralyzed && !ctx.rng.chance(self.config.paralysis_act_chance) {
                self.record(LogEntry::info(format!("{name} is paralyzed!")), ctx);
                continue;
            }

            return Ok(Some(id));
        }

        Err(TurnError::StuckTurnLoop { iterations: guard })
    }

    /// Handles a tripped scan guard: wake the first sleeper, or call the battle off.
    fn recover(&mut self, err: TurnError, ctx: &mut BattleContext<'_>) -> Step {
        let sleeper = self.order.iter().position(|id| {
            self.roster
                .get(*id)
                .is_some_and(|e| e.is_alive() && e.has_status(StatusKind::Sleep))
        });

        let Some(index) = sleeper else {
            self.record(
                LogEntry::error(format!("{err}; nobody can fight on. The party is defeated.")),
                ctx,
            );
            return self.finish(BattleResult::Defeat, true, ctx);
        };

        let id = self.order[index];
        self.cursor = (index + 1) % self.order.len();
        if let Some(entity) = self.roster.get_mut(id) {
            entity.remove_status(StatusKind::Sleep);
        }
        let name = self.roster.name_of(id).to_string();
        self.record(
            LogEntry::error(format!("{err}; {name} is forced awake!")),
            ctx,
        );
        self.begin_turn(id, ctx)
    }

    /// Hands the turn to `actor`.
    fn begin_turn(&mut self, actor: EntityId, ctx: &mut BattleContext<'_>) -> Step {
        self.turn += 1;

        let Some(entity) = self.roster.get_mut(actor) else {
            self.phase = Phase::TurnStart;
            return self.turn_start(ctx);
        };
        entity.set_defending(false);

        if entity.is_player_controlled() {
            self.phase = Phase::SelectingAction { actor };
            return Step::AwaitingInput(actor);
        }

        let action = self.policy_action(actor, ctx);
        self.execute(actor, &action, ctx);
        Step::Executed { actor }
    }

    /// The pending override if it sticks, otherwise the policy's decision.
    fn policy_action(&mut self, actor: EntityId, ctx: &mut BattleContext<'_>) -> Action {
        let Some(entity) = self.roster.get_mut(actor) else {
            return Action::Defend;
        };
        let name = entity.name.clone();
        let headstrong = entity.knows(crate::ability::AbilityId::Headstrong);

        if let Some(action) = entity.take_override() {
            self.record(
                LogEntry::info(format!("[OVERRIDE] {name}'s action is controlled!")),
                ctx,
            );
            if headstrong && ctx.rng.chance(self.config.stubborn_chance) {
                self.record(
                    LogEntry::info(format!("{name} ignores the override! (Headstrong)")),
                    ctx,
                );
            } else {
                return action;
            }
        }

        let Some(side) = self.roster.side_of(actor) else {
            return Action::Defend;
        };
        let Some(me) = self.roster.get(actor) else {
            return Action::Defend;
        };
        let Some(policy) = me.policy() else {
            return Action::Defend;
        };

        let mut decision = DecisionContext {
            rng: &mut *ctx.rng,
            config: &self.config,
        };
        policy.decide(
            me,
            self.roster.side(side),
            self.roster.side(side.opposing()),
            &mut decision,
        )
    }

    // ========================================================================
    // Execution and end
    // ========================================================================

    fn execute(&mut self, actor: EntityId, action: &Action, ctx: &mut BattleContext<'_>) {
        self.phase = Phase::Executing { actor };
        let messages =
            ActionResolver::new(&self.config).resolve(&mut self.roster, actor, action, ctx);
        self.record_all(messages, ctx);
    }

    fn finish(
        &mut self,
        result: BattleResult,
        forced: bool,
        ctx: &mut BattleContext<'_>,
    ) -> Step {
        let mut experience = 0;

        match result {
            BattleResult::Victory => {
                self.record(LogEntry::info("Victory!"), ctx);

                let default_reward = self.config.default_exp_reward;
                experience = self
                    .roster
                    .enemies()
                    .iter()
                    .map(|e| e.exp_reward.unwrap_or(default_reward))
                    .fold(0u32, u32::saturating_add);

                let survivors: Vec<EntityId> =
                    self.roster.living(Side::Party).map(|e| e.id).collect();
                for id in survivors {
                    let Some(member) = self.roster.get_mut(id) else {
                        continue;
                    };
                    let messages = gain_exp(member, experience);
                    self.record_all(messages.into_iter().map(LogEntry::info), ctx);
                }
            }
            BattleResult::Defeat => self.record(LogEntry::info("Defeat..."), ctx),
        }

        for entity in self.roster.iter_mut().filter(|e| e.is_alive()) {
            clear_battle_state(entity);
        }

        let outcome = BattleOutcome {
            result,
            experience,
            forced,
        };
        self.phase = Phase::BattleEnd(outcome);
        Step::Ended(outcome)
    }

    // ========================================================================
    // Log
    // ========================================================================

    fn record(&mut self, entry: LogEntry, ctx: &mut BattleContext<'_>) {
        self.log.push(entry.clone());
        ctx.emit(entry);
    }

    fn record_all(
        &mut self,
        entries: impl IntoIterator<Item = LogEntry>,
        ctx: &mut BattleContext<'_>,
    ) {
        for entry in entries {
            self.record(entry, ctx);
        }
    }
}

/// Drops everything that only lives for one battle. POISON stays.
fn clear_battle_state(entity: &mut Entity) {
    entity.statuses.clear_transient();
    entity.flags = Default::default();
    entity.pending_override = None;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::AbilityId;
    use crate::ai::{AggressivePolicy, HostilePolicy, PolicyKind};
    use crate::inventory::Stockpile;
    use crate::log::LogKind;
    use crate::rng::{RngSource, SequenceRng};
    use crate::state::{Archetype, Stats};

    fn unit(id: u32, name: &str, spd: u32) -> Entity {
        Entity::new(
            EntityId(id),
            name,
            Archetype::Hero,
            Stats::new(80, 20, 25, 0, 5, 5, spd),
        )
    }

    fn hostile(id: u32, name: &str, spd: u32) -> Entity {
        unit(id, name, spd)
            .with_policy(PolicyKind::Hostile(HostilePolicy))
            .with_exp_reward(80)
    }

    struct Rig {
        battle: Battle,
        rng: SequenceRng,
        stock: Stockpile,
        sink: Vec<LogEntry>,
    }

    impl Rig {
        fn new(party: Vec<Entity>, enemies: Vec<Entity>, rng: SequenceRng) -> Self {
            let roster = Roster::new(party, enemies).unwrap();
            Self {
                battle: Battle::new(roster, BattleConfig::default()),
                rng,
                stock: Stockpile::starter(),
                sink: Vec::new(),
            }
        }

        fn advance(&mut self) -> Step {
            let mut ctx = BattleContext::new(&mut self.rng, &mut self.stock, &mut self.sink);
            self.battle.advance(&mut ctx)
        }

        fn submit(&mut self, actor: u32, action: Action) -> Submission {
            let mut ctx = BattleContext::new(&mut self.rng, &mut self.stock, &mut self.sink);
            self.battle.submit_action(EntityId(actor), action, &mut ctx)
        }

        /// Advances until input is needed or the battle ends.
        fn run(&mut self) -> Step {
            loop {
                match self.advance() {
                    Step::Executed { .. } => {
                        self.battle.complete_execution();
                    }
                    other => return other,
                }
            }
        }

        fn messages(&self) -> Vec<&str> {
            self.sink.iter().map(|e| e.message.as_str()).collect()
        }

        fn entity(&self, id: u32) -> &Entity {
            self.battle.roster().get(EntityId(id)).unwrap()
        }

        fn entity_mut(&mut self, id: u32) -> &mut Entity {
            self.battle.roster.get_mut(EntityId(id)).unwrap()
        }
    }

    #[test]
    fn first_turn_goes_to_the_fastest() {
        let mut rig = Rig::new(
            vec![unit(0, "Leo", 10), unit(1, "Eliza", 20)],
            vec![hostile(2, "Beast", 5)],
            SequenceRng::new([0]),
        );

        assert_eq!(rig.advance(), Step::AwaitingInput(EntityId(1)));
        assert_eq!(rig.battle.order(), &[EntityId(1), EntityId(0), EntityId(2)]);
        assert_eq!(rig.messages(), vec!["Battle Start!"]);
    }

    #[test]
    fn player_turns_follow_order_then_policy_acts() {
        let mut rig = Rig::new(
            vec![unit(0, "Leo", 20)],
            vec![hostile(1, "Beast", 10)],
            SequenceRng::new([0]),
        );

        assert_eq!(rig.run(), Step::AwaitingInput(EntityId(0)));
        assert_eq!(rig.submit(0, Action::Defend), Submission::Accepted);
        assert!(rig.battle.is_executing());
        assert!(rig.battle.complete_execution());

        // Beast attacks, then it is Leo's turn again with DEFENDING cleared.
        assert_eq!(rig.advance(), Step::Executed { actor: EntityId(1) });
        assert!(rig.entity(0).is_defending());
        rig.battle.complete_execution();
        assert_eq!(rig.advance(), Step::AwaitingInput(EntityId(0)));
        assert!(!rig.entity(0).is_defending());
        assert_eq!(rig.entity(0).stats.hp, 60);
    }

    #[test]
    fn duplicate_submission_applies_once() {
        let mut rig = Rig::new(
            vec![unit(0, "Leo", 20)],
            vec![hostile(1, "Beast", 10)],
            SequenceRng::new([0]),
        );
        rig.run();

        assert_eq!(rig.submit(0, Action::attack(EntityId(1))), Submission::Accepted);
        assert_eq!(rig.submit(0, Action::attack(EntityId(1))), Submission::Dropped);
        assert_eq!(rig.entity(1).stats.hp, 60);
    }

    #[test]
    fn wrong_actor_is_rejected() {
        let mut rig = Rig::new(
            vec![unit(0, "Leo", 20), unit(1, "Eliza", 10)],
            vec![hostile(2, "Beast", 5)],
            SequenceRng::new([0]),
        );
        rig.run();
        assert_eq!(rig.submit(1, Action::Defend), Submission::Rejected);
        assert_eq!(rig.battle.phase(), Phase::SelectingAction { actor: EntityId(0) });
    }

    #[test]
    fn victory_awards_experience_and_clears_statuses() {
        let mut rig = Rig::new(
            vec![unit(0, "Leo", 20).with_level(1), unit(1, "Eliza", 15)],
            vec![hostile(2, "Beast", 5)],
            SequenceRng::new([0]),
        );
        rig.entity_mut(2).stats.hp = 1;
        rig.entity_mut(0).add_status(StatusKind::Protect, 5);
        rig.entity_mut(0).add_status(StatusKind::Poison, 5);
        rig.entity_mut(1).stats.hp = 0;

        rig.run();
        rig.submit(0, Action::attack(EntityId(2)));
        rig.battle.complete_execution();
        let step = rig.run();

        let outcome = BattleOutcome {
            result: BattleResult::Victory,
            experience: 80,
            forced: false,
        };
        assert_eq!(step, Step::Ended(outcome));
        assert_eq!(rig.battle.outcome(), Some(outcome));
        assert_eq!(rig.entity(0).exp, 80);
        assert_eq!(rig.entity(1).exp, 0, "fallen members get nothing");
        assert!(!rig.entity(0).has_status(StatusKind::Protect));
        assert!(rig.entity(0).has_status(StatusKind::Poison));
        assert!(rig.messages().contains(&"Victory!"));
    }

    #[test]
    fn level_up_is_announced() {
        let mut rig = Rig::new(
            vec![unit(0, "Leo", 20).with_exp(50)],
            vec![hostile(1, "Beast", 5)],
            SequenceRng::new([0]),
        );
        rig.entity_mut(1).stats.hp = 1;
        rig.run();
        rig.submit(0, Action::attack(EntityId(1)));
        rig.battle.complete_execution();
        rig.run();

        assert_eq!(rig.entity(0).level, 2);
        assert_eq!(rig.messages().last(), Some(&"Leo reached Level 2!"));
    }

    #[test]
    fn defeat_when_party_falls() {
        let mut rig = Rig::new(
            vec![unit(0, "Leo", 5)],
            vec![hostile(1, "Beast", 20)],
            SequenceRng::new([0]),
        );
        rig.entity_mut(0).stats.hp = 1;

        let step = rig.run();

        assert!(matches!(step, Step::Ended(o) if o.result == BattleResult::Defeat && !o.forced));
        assert_eq!(rig.messages().last(), Some(&"Defeat..."));
    }

    #[test]
    fn defeat_still_clears_surviving_enemies() {
        let mut rig = Rig::new(
            vec![unit(0, "Leo", 5)],
            vec![hostile(1, "Beast", 20)],
            SequenceRng::new([0]),
        );
        rig.entity_mut(0).stats.hp = 1;
        rig.entity_mut(1).add_status(StatusKind::Protect, 5);
        rig.entity_mut(1).add_status(StatusKind::Poison, 5);

        let step = rig.run();

        assert!(matches!(step, Step::Ended(o) if o.result == BattleResult::Defeat));
        assert!(!rig.entity(1).has_status(StatusKind::Protect));
        assert!(rig.entity(1).has_status(StatusKind::Poison));
    }

    #[test]
    fn sleepers_are_skipped_and_logged() {
        let mut rig = Rig::new(
            vec![unit(0, "Leo", 20), unit(1, "Eliza", 10)],
            vec![hostile(2, "Beast", 5)],
            SequenceRng::new([0]),
        );
        rig.entity_mut(0).add_status(StatusKind::Sleep, 3);

        assert_eq!(rig.run(), Step::AwaitingInput(EntityId(1)));
        assert!(rig.messages().contains(&"Leo is asleep!"));
    }

    #[test]
    fn paralysis_may_cost_the_turn() {
        let mut rig = Rig::new(
            vec![unit(0, "Leo", 20), unit(1, "Eliza", 10)],
            vec![hostile(2, "Beast", 5)],
            SequenceRng::maxed(),
        );
        rig.entity_mut(0).add_status(StatusKind::Paralysis, 3);

        assert_eq!(rig.advance(), Step::AwaitingInput(EntityId(1)));
        assert!(rig.messages().contains(&"Leo is paralyzed!"));
    }

    #[test]
    fn stuck_loop_forces_a_sleeper_awake() {
        let mut rig = Rig::new(
            vec![unit(0, "Leo", 20)],
            vec![hostile(1, "Beast", 10)],
            SequenceRng::new([0]),
        );
        rig.entity_mut(0).add_status(StatusKind::Sleep, 9);
        rig.entity_mut(1).add_status(StatusKind::Sleep, 9);

        let step = rig.advance();

        assert_eq!(step, Step::AwaitingInput(EntityId(0)));
        let errors: Vec<&LogEntry> = rig.sink.iter().filter(|e| e.is_error()).collect();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.ends_with("Leo is forced awake!"));
        assert!(!rig.entity(0).has_status(StatusKind::Sleep));
        // 2 × order length visits, each logging a sleep message
        let asleep = rig.messages().iter().filter(|m| m.ends_with("asleep!")).count();
        assert_eq!(asleep, rig.battle.scan_guard());
    }

    #[test]
    fn stuck_loop_without_sleepers_forces_defeat() {
        let mut rig = Rig::new(
            vec![unit(0, "Leo", 20)],
            vec![hostile(1, "Beast", 10)],
            SequenceRng::maxed(),
        );
        rig.entity_mut(0).add_status(StatusKind::Paralysis, 9);
        rig.entity_mut(1).add_status(StatusKind::Paralysis, 9);

        let step = rig.advance();

        assert!(matches!(step, Step::Ended(o) if o.forced && o.result == BattleResult::Defeat));
        assert!(rig.sink.iter().any(|e| e.kind == LogKind::Error));
    }

    #[test]
    fn override_is_consumed_on_the_allys_next_turn() {
        let blayde = unit(1, "Blayde", 10)
            .with_policy(PolicyKind::Aggressive(AggressivePolicy::new(
                AbilityId::FireSlash,
            )))
            .with_abilities([AbilityId::FireSlash]);
        let leo = unit(0, "Leo", 20).with_abilities([AbilityId::Override]);
        let mut rig = Rig::new(
            vec![leo, blayde],
            vec![hostile(2, "Beast", 5)],
            SequenceRng::new([0]),
        );

        rig.run();
        rig.submit(0, Action::override_with(EntityId(1), Action::Defend));
        rig.battle.complete_execution();
        assert_eq!(rig.advance(), Step::Executed { actor: EntityId(1) });

        assert!(rig.messages().contains(&"[OVERRIDE] Blayde's action is controlled!"));
        assert!(rig.entity(1).is_defending());
        assert_eq!(rig.entity(1).stats.mp, 20, "Fire Slash was not cast");
    }

    #[test]
    fn headstrong_can_ignore_the_override() {
        let blayde = unit(1, "Blayde", 10)
            .with_policy(PolicyKind::Hostile(HostilePolicy))
            .with_abilities([AbilityId::Headstrong]);
        let leo = unit(0, "Leo", 20).with_abilities([AbilityId::Override]);
        let mut rig = Rig::new(
            vec![leo, blayde],
            vec![hostile(2, "Beast", 5)],
            SequenceRng::new([0]),
        );

        rig.run();
        rig.submit(0, Action::override_with(EntityId(1), Action::Defend));
        rig.battle.complete_execution();
        rig.advance();

        assert!(rig.messages().contains(&"Blayde ignores the override! (Headstrong)"));
        assert!(!rig.entity(1).is_defending());
        assert!(rig.entity(2).stats.hp < 80);
    }

    #[test]
    fn ring_log_keeps_the_latest_ten() {
        let mut rig = Rig::new(
            vec![unit(0, "Leo", 20)],
            vec![hostile(1, "Beast", 10)],
            SequenceRng::new([0]),
        );
        rig.entity_mut(0).stats = Stats::new(999, 0, 25, 0, 5, 5, 20);
        for _ in 0..8 {
            rig.run();
            rig.submit(0, Action::Defend);
            rig.battle.complete_execution();
        }

        assert_eq!(rig.battle.log().len(), 10);
        assert!(rig.sink.len() > 10);
        assert_eq!(
            rig.battle.log().last().map(|e| e.message.as_str()),
            rig.messages().last().copied()
        );
    }

    #[test]
    fn pools_stay_in_bounds_over_a_long_fight() {
        let mut rig = Rig::new(
            vec![unit(0, "Leo", 20)],
            vec![hostile(1, "Beast", 10)],
            SequenceRng::new([3, 97, 41, 12, 65]),
        );
        rig.entity_mut(0).add_status(StatusKind::Regen, 4);
        rig.entity_mut(1).add_status(StatusKind::Poison, 4);

        for _ in 0..50 {
            match rig.run() {
                Step::AwaitingInput(actor) => {
                    let foe = rig.rng.below(2);
                    let target = if foe == 0 { EntityId(1) } else { EntityId(0) };
                    rig.submit(actor.0, Action::attack(target));
                    rig.battle.complete_execution();
                }
                Step::Ended(_) => break,
                Step::Executed { .. } => unreachable!(),
            }
            for entity in rig.battle.roster().iter() {
                assert!(entity.stats.in_bounds(), "{} out of bounds", entity.name);
            }
        }
    }
}
