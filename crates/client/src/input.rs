//! Numbered-menu action provider for player-controlled combatants.

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;

use battle_core::{AbilityId, Action, Entity, EntityId, Side, TargetKind};
use runtime::{ActionProvider, BattleSnapshot, RuntimeError};

use crate::render;

/// A top-level menu entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuCommand {
    Attack,
    Ability(AbilityId),
    Defend,
}

impl MenuCommand {
    pub fn label(&self) -> String {
        match self {
            Self::Attack => "Attack".to_string(),
            Self::Ability(ability) => {
                let cost = ability.descriptor().cost;
                if cost > 0 {
                    format!("{ability} ({cost} MP)")
                } else {
                    ability.to_string()
                }
            }
            Self::Defend => "Defend".to_string(),
        }
    }
}

/// Commands `me` can currently use, skipping abilities with no valid target.
pub fn commands(snapshot: &BattleSnapshot, me: &Entity) -> Vec<MenuCommand> {
    let mut commands = Vec::new();
    if !targets(snapshot, me, MenuCommand::Attack).is_empty() {
        commands.push(MenuCommand::Attack);
    }
    for ability in me.available_abilities() {
        if ability.consumes().is_some_and(|item| snapshot.item_count(item) == 0) {
            continue;
        }
        let command = MenuCommand::Ability(ability);
        if !targets(snapshot, me, command).is_empty() {
            commands.push(command);
        }
    }
    commands.push(MenuCommand::Defend);
    commands
}

/// Combatants `command` may be aimed at.
pub fn targets(snapshot: &BattleSnapshot, me: &Entity, command: MenuCommand) -> Vec<EntityId> {
    let roster = &snapshot.roster;
    let side = roster.side_of(me.id).unwrap_or(Side::Party);
    let living = |side: Side| -> Vec<EntityId> { roster.living(side).map(|e| e.id).collect() };

    match command {
        MenuCommand::Attack => living(side.opposing()),
        MenuCommand::Defend => Vec::new(),
        MenuCommand::Ability(AbilityId::Override) => roster
            .living(side)
            .filter(|e| e.id != me.id && !e.is_player_controlled())
            .map(|e| e.id)
            .collect(),
        MenuCommand::Ability(ability) => match ability.descriptor().target {
            TargetKind::Enemy => living(side.opposing()),
            TargetKind::SelfOnly => vec![me.id],
            TargetKind::Ally if ability.targets_fallen() => roster
                .side(side)
                .iter()
                .filter(|e| !e.is_alive())
                .map(|e| e.id)
                .collect(),
            TargetKind::Ally => living(side),
        },
    }
}

/// Prompts on a line-based reader for each decision.
///
/// Invalid answers are asked again; end of input is a provider error.
pub struct PromptProvider<R> {
    lines: Mutex<Lines<R>>,
}

pub type StdinProvider = PromptProvider<BufReader<Stdin>>;

impl StdinProvider {
    pub fn stdin() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()))
    }
}

impl<R> PromptProvider<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    pub fn new(reader: R) -> Self {
        Self {
            lines: Mutex::new(reader.lines()),
        }
    }

    async fn choose(
        lines: &mut Lines<R>,
        title: &str,
        options: &[String],
    ) -> runtime::Result<usize> {
        println!("{title}:");
        for (i, option) in options.iter().enumerate() {
            println!("  {}) {}", i + 1, option);
        }

        loop {
            let line = lines
                .next_line()
                .await
                .map_err(|e| RuntimeError::Provider(e.to_string()))?
                .ok_or_else(|| RuntimeError::Provider("input closed".to_string()))?;

            match line.trim().parse::<usize>() {
                Ok(n) if (1..=options.len()).contains(&n) => return Ok(n - 1),
                _ => println!("Choose 1-{}", options.len()),
            }
        }
    }

    async fn choose_target(
        lines: &mut Lines<R>,
        snapshot: &BattleSnapshot,
        candidates: &[EntityId],
    ) -> runtime::Result<EntityId> {
        if let [only] = candidates {
            return Ok(*only);
        }
        let names: Vec<String> = candidates
            .iter()
            .map(|id| snapshot.roster.name_of(*id).to_string())
            .collect();
        let index = Self::choose(lines, "Target", &names).await?;
        Ok(candidates[index])
    }
}

#[async_trait]
impl<R> ActionProvider for PromptProvider<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    async fn provide_action(
        &self,
        actor: EntityId,
        snapshot: &BattleSnapshot,
    ) -> runtime::Result<Action> {
        let me = snapshot
            .roster
            .get(actor)
            .ok_or(RuntimeError::UnknownActor { actor })?;
        let mut lines = self.lines.lock().await;

        println!("\n== {}'s turn ==", me.name);
        for line in render::roster_lines(snapshot) {
            println!("  {line}");
        }

        let menu = commands(snapshot, me);
        let labels: Vec<String> = menu.iter().map(MenuCommand::label).collect();
        let command = menu[Self::choose(&mut lines, "Command", &labels).await?];

        let action = match command {
            MenuCommand::Defend => Action::Defend,
            MenuCommand::Attack => {
                let target =
                    Self::choose_target(&mut lines, snapshot, &targets(snapshot, me, command))
                        .await?;
                Action::attack(target)
            }
            MenuCommand::Ability(AbilityId::Override) => {
                let ally =
                    Self::choose_target(&mut lines, snapshot, &targets(snapshot, me, command))
                        .await?;
                let queued_menu = [MenuCommand::Attack, MenuCommand::Defend];
                let labels: Vec<String> = queued_menu.iter().map(MenuCommand::label).collect();
                let queued = match queued_menu[Self::choose(&mut lines, "Order", &labels).await?] {
                    MenuCommand::Attack => {
                        let foes = targets(snapshot, me, MenuCommand::Attack);
                        Action::attack(Self::choose_target(&mut lines, snapshot, &foes).await?)
                    }
                    _ => Action::Defend,
                };
                Action::override_with(ally, queued)
            }
            MenuCommand::Ability(ability) => {
                let target =
                    Self::choose_target(&mut lines, snapshot, &targets(snapshot, me, command))
                        .await?;
                Action::ability(ability, target)
            }
        };

        Ok(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_content::roster::{BLAYDE, ELIZA, LEO, SERAPHA, SHADOW_BEAST};
    use battle_core::{ItemId, Phase};

    fn snapshot() -> BattleSnapshot {
        BattleSnapshot {
            roster: battle_content::demo_roster().unwrap(),
            phase: Phase::SelectingAction { actor: LEO },
            order: Vec::new(),
            turn: 1,
            log: Vec::new(),
            items: vec![(ItemId::Potion, 5), (ItemId::PhoenixDown, 1)],
        }
    }

    async fn answer(input: &'static str, actor: EntityId) -> runtime::Result<Action> {
        let provider = PromptProvider::new(input.as_bytes());
        provider.provide_action(actor, &snapshot()).await
    }

    #[test]
    fn menu_lists_usable_commands() {
        let snapshot = snapshot();
        let leo = snapshot.roster.get(LEO).unwrap();

        assert_eq!(
            commands(&snapshot, leo),
            vec![
                MenuCommand::Attack,
                MenuCommand::Ability(AbilityId::Override),
                MenuCommand::Ability(AbilityId::UsePotion),
                MenuCommand::Defend,
            ]
        );
    }

    #[test]
    fn override_targets_policy_allies_only() {
        let snapshot = snapshot();
        let eliza = snapshot.roster.get(ELIZA).unwrap();

        let allies = targets(&snapshot, eliza, MenuCommand::Ability(AbilityId::Override));
        assert_eq!(allies, vec![BLAYDE, SERAPHA]);
    }

    #[test]
    fn potions_are_hidden_when_out_of_stock() {
        let mut snapshot = snapshot();
        snapshot.items = vec![(ItemId::Potion, 0)];
        let leo = snapshot.roster.get(LEO).unwrap().clone();

        assert!(!commands(&snapshot, &leo).contains(&MenuCommand::Ability(AbilityId::UsePotion)));
    }

    #[tokio::test]
    async fn single_target_is_picked_automatically() {
        assert_eq!(answer("1\n", LEO).await.unwrap(), Action::attack(SHADOW_BEAST));
    }

    #[tokio::test]
    async fn override_asks_for_ally_and_order() {
        assert_eq!(
            answer("2\n1\n1\n", LEO).await.unwrap(),
            Action::override_with(BLAYDE, Action::attack(SHADOW_BEAST))
        );
    }

    #[tokio::test]
    async fn invalid_answers_are_asked_again() {
        assert_eq!(answer("9\nfight\n4\n", LEO).await.unwrap(), Action::Defend);
    }

    #[tokio::test]
    async fn end_of_input_is_an_error() {
        let err = answer("", LEO).await.unwrap_err();
        assert!(matches!(err, RuntimeError::Provider(_)));
    }
}
