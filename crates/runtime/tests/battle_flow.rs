//! End-to-end battles driven through the runtime handle.

use battle_core::{
    Action, Archetype, BattleResult, Entity, EntityId, HostilePolicy, PcgRng, Phase, PolicyKind,
    Roster, Stats, Submission,
};
use runtime::{
    AutopilotProvider, BattleEvent, EntropyRng, Event, ImmediateClock, Runtime, RuntimeConfig,
    RuntimeError, Topic, TurnEvent, drive_players,
};
use tokio::sync::broadcast;

const LEO: EntityId = EntityId(0);
const GOLEM: EntityId = EntityId(1);

/// A fast player against a slow enemy that cannot be killed quickly.
fn duel() -> Roster {
    let leo = Entity::new(LEO, "Leo", Archetype::Realist, Stats::new(70, 25, 18, 22, 12, 12, 30));
    let golem = Entity::new(GOLEM, "Golem", Archetype::Monster, Stats::new(999, 0, 5, 10, 5, 5, 5))
        .with_policy(PolicyKind::Hostile(HostilePolicy));
    Roster::new(vec![leo], vec![golem]).unwrap()
}

async fn duel_runtime() -> Runtime {
    Runtime::builder()
        .roster(duel())
        .rng(PcgRng::new(11))
        .clock(ImmediateClock)
        .build()
        .await
        .unwrap()
}

async fn next_awaiting(rx: &mut broadcast::Receiver<Event>) -> (EntityId, u32) {
    loop {
        if let Event::Turn(TurnEvent::AwaitingInput { actor, turn }) = rx.recv().await.unwrap() {
            return (actor, turn);
        }
    }
}

async fn next_executed(rx: &mut broadcast::Receiver<Event>) -> EntityId {
    loop {
        if let Event::Turn(TurnEvent::Executed { actor, .. }) = rx.recv().await.unwrap() {
            return actor;
        }
    }
}

#[tokio::test]
async fn build_requires_a_roster() {
    let err = Runtime::builder().build().await.err().unwrap();
    assert!(matches!(err, RuntimeError::MissingRoster));
}

#[tokio::test]
async fn commands_before_start_are_refused() {
    let runtime = duel_runtime().await;
    let handle = runtime.handle();

    let err = handle
        .submit_action(LEO, Action::attack(GOLEM))
        .await
        .unwrap_err();
    assert!(matches!(err, RuntimeError::NotStarted));

    let snapshot = handle.snapshot().await.unwrap();
    assert!(snapshot.order.is_empty());
    assert_eq!(snapshot.phase, Phase::TurnStart);

    assert_eq!(handle.start().await.unwrap(), vec![LEO, GOLEM]);
    assert!(matches!(
        handle.start().await.unwrap_err(),
        RuntimeError::AlreadyStarted
    ));

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn first_turn_waits_for_the_fastest_player() {
    let runtime = duel_runtime().await;
    let handle = runtime.handle();
    let mut turns = handle.subscribe(Topic::Turn);

    handle.start().await.unwrap();
    assert_eq!(next_awaiting(&mut turns).await, (LEO, 1));

    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.awaiting(), Some(LEO));
    assert_eq!(snapshot.log[0].message, "Battle Start!");

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn rapid_double_submission_applies_once() {
    let runtime = duel_runtime().await;
    let handle = runtime.handle();
    let mut turns = handle.subscribe(Topic::Turn);

    handle.start().await.unwrap();
    next_awaiting(&mut turns).await;

    let (first, second) = tokio::join!(
        handle.submit_action(LEO, Action::attack(GOLEM)),
        handle.submit_action(LEO, Action::attack(GOLEM)),
    );
    let results = [first.unwrap(), second.unwrap()];
    assert_eq!(
        results.iter().filter(|s| **s == Submission::Accepted).count(),
        1
    );
    assert_eq!(
        results.iter().filter(|s| **s == Submission::Dropped).count(),
        1
    );

    assert_eq!(next_executed(&mut turns).await, LEO);
    // Golem acts, then the battle is back on Leo.
    assert_eq!(next_awaiting(&mut turns).await.0, LEO);

    let snapshot = handle.snapshot().await.unwrap();
    let attacks = snapshot
        .log
        .iter()
        .filter(|entry| entry.message.starts_with("Leo attacks"))
        .count();
    assert_eq!(attacks, 1);

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn submissions_for_other_combatants_are_rejected() {
    let runtime = duel_runtime().await;
    let handle = runtime.handle();
    let mut turns = handle.subscribe(Topic::Turn);

    handle.start().await.unwrap();
    next_awaiting(&mut turns).await;

    let err = handle
        .submit_action(GOLEM, Action::attack(LEO))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::NotAwaitingActor {
            expected: Some(LEO),
            provided: GOLEM,
        }
    ));

    let err = handle
        .submit_action(EntityId(99), Action::Defend)
        .await
        .unwrap_err();
    assert!(matches!(err, RuntimeError::UnknownActor { actor: EntityId(99) }));

    // Still waiting on Leo.
    assert_eq!(
        handle.submit_action(LEO, Action::Defend).await.unwrap(),
        Submission::Accepted
    );

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn autopilot_plays_the_demo_battle_to_the_end() {
    let config = RuntimeConfig {
        event_buffer_size: 4096,
        ..RuntimeConfig::default()
    };
    let runtime = Runtime::builder()
        .config(config.clone())
        .roster(battle_content::demo_roster().unwrap())
        .rng(PcgRng::new(2024))
        .clock(ImmediateClock)
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();
    let mut logs = handle.subscribe(Topic::Log);
    let mut battle = handle.subscribe(Topic::Battle);

    let order = handle.start().await.unwrap();
    assert_eq!(order.len(), 5);

    let provider = AutopilotProvider::with_rng(EntropyRng::seeded(5), config.battle);
    let outcome = drive_players(&handle, &provider).await.unwrap();

    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.phase, Phase::BattleEnd(outcome));
    for entity in snapshot.roster.iter() {
        assert!(entity.stats.hp <= entity.stats.max_hp);
        assert!(entity.stats.mp <= entity.stats.max_mp);
    }
    match outcome.result {
        BattleResult::Victory => assert_eq!(outcome.experience, 80),
        BattleResult::Defeat => assert_eq!(outcome.experience, 0),
    }

    let mut expected_seq = 0;
    while let Ok(Event::Log(line)) = logs.try_recv() {
        if expected_seq == 0 {
            assert_eq!(line.entry.message, "Battle Start!");
        }
        assert_eq!(line.seq, expected_seq);
        expected_seq += 1;
    }
    assert!(expected_seq > 1);

    let mut ended = None;
    while let Ok(event) = battle.try_recv() {
        if let Event::Battle(BattleEvent::Ended(outcome)) = event {
            ended = Some(outcome);
        }
    }
    assert_eq!(ended, Some(outcome));

    // Queries still work after the battle, submissions do not.
    let err = handle
        .submit_action(EntityId(2), Action::Defend)
        .await
        .unwrap_err();
    assert!(matches!(err, RuntimeError::BattleOver));

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn journal_records_the_whole_battle() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("journal").join("battle.jsonl");

    let runtime = Runtime::builder()
        .roster(battle_content::demo_roster().unwrap())
        .rng(PcgRng::new(7))
        .clock(ImmediateClock)
        .journal(&path)
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();

    handle.start().await.unwrap();
    let provider = AutopilotProvider::with_rng(EntropyRng::seeded(1), Default::default());
    drive_players(&handle, &provider).await.unwrap();
    runtime.shutdown().await.unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<serde_json::Value> = contents
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert!(lines.iter().any(|line| line["Log"]["entry"]["message"] == "Battle Start!"));
    assert!(lines.iter().any(|line| line["Battle"].get("Started").is_some()));
    assert!(lines.iter().any(|line| line["Battle"].get("Ended").is_some()));
}
