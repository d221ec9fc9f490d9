//! Party and encounter loader.
//!
//! A roster file is a RON list of [`CombatantSpec`]. Policies refer to other
//! combatants by name; those references are resolved against the same file.

use std::path::Path;

use battle_core::{
    AbilityId, AggressivePolicy, Archetype, BattleConfig, ControlMode, Entity, EntityId,
    Equipment, HostilePolicy, PolicyKind, Stats, StatusKind, SupportPolicy,
};
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};

/// Who chooses a combatant's actions, as written in data files.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub enum ControlSpec {
    Player,
    Aggressive {
        signature: AbilityId,
    },
    Support {
        heal: AbilityId,
        buff: AbilityId,
        /// Name of the ally that receives the buff.
        #[serde(default)]
        ward: Option<String>,
    },
    Hostile,
}

/// Stat block as written in data files; current pools default to full.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct StatsSpec {
    pub max_hp: u32,
    pub max_mp: u32,
    pub str: u32,
    pub def: u32,
    pub int: u32,
    pub mnd: u32,
    pub spd: u32,
    #[serde(default)]
    pub hp: Option<u32>,
    #[serde(default)]
    pub mp: Option<u32>,
}

/// A status carried into battle. Without `turns` it lasts
/// [`BattleConfig::default_status_turns`].
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct StatusSpec {
    pub kind: StatusKind,
    #[serde(default)]
    pub turns: Option<u32>,
}

/// One combatant entry of a roster file.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct CombatantSpec {
    pub id: u32,
    pub name: String,
    pub archetype: Archetype,
    #[serde(default = "default_level")]
    pub level: u32,
    #[serde(default)]
    pub exp: u32,
    #[serde(default)]
    pub exp_reward: Option<u32>,
    pub stats: StatsSpec,
    #[serde(default)]
    pub abilities: Vec<AbilityId>,
    pub control: ControlSpec,
    #[serde(default)]
    pub equipment: Equipment,
    #[serde(default)]
    pub statuses: Vec<StatusSpec>,
}

fn default_level() -> u32 {
    1
}

/// Loader for party and encounter files.
pub struct RosterLoader;

impl RosterLoader {
    /// Load one side of a roster from a RON file.
    pub fn load(path: &Path, config: &BattleConfig) -> LoadResult<Vec<Entity>> {
        let content = read_file(path)?;
        Self::parse(&content, config)
            .map_err(|e| anyhow::anyhow!("Failed to load roster {}: {}", path.display(), e))
    }

    pub fn parse(content: &str, config: &BattleConfig) -> LoadResult<Vec<Entity>> {
        let specs: Vec<CombatantSpec> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse roster RON: {}", e))?;

        specs.iter().map(|spec| build(spec, &specs, config)).collect()
    }
}

fn build(
    spec: &CombatantSpec,
    side: &[CombatantSpec],
    config: &BattleConfig,
) -> LoadResult<Entity> {
    if spec.abilities.len() > BattleConfig::MAX_ABILITIES {
        anyhow::bail!(
            "'{}' has {} abilities, at most {} are allowed",
            spec.name,
            spec.abilities.len(),
            BattleConfig::MAX_ABILITIES
        );
    }

    let s = &spec.stats;
    let mut stats = Stats::new(s.max_hp, s.max_mp, s.str, s.def, s.int, s.mnd, s.spd);
    stats = stats.with_current(s.hp.unwrap_or(s.max_hp), s.mp.unwrap_or(s.max_mp));

    let control = match &spec.control {
        ControlSpec::Player => ControlMode::Player,
        ControlSpec::Aggressive { signature } => {
            ControlMode::Policy(PolicyKind::Aggressive(AggressivePolicy::new(*signature)))
        }
        ControlSpec::Support { heal, buff, ward } => {
            let ward = match ward {
                Some(name) => Some(resolve_name(name, side).ok_or_else(|| {
                    anyhow::anyhow!("'{}' wards unknown ally '{}'", spec.name, name)
                })?),
                None => None,
            };
            ControlMode::Policy(PolicyKind::Support(SupportPolicy::new(*heal, *buff, ward)))
        }
        ControlSpec::Hostile => ControlMode::Policy(PolicyKind::Hostile(HostilePolicy)),
    };

    let mut entity = Entity::new(EntityId(spec.id), spec.name.clone(), spec.archetype, stats)
        .with_level(spec.level)
        .with_exp(spec.exp)
        .with_control(control)
        .with_abilities(spec.abilities.iter().copied())
        .with_equipment(spec.equipment.clone());
    if let Some(reward) = spec.exp_reward {
        entity = entity.with_exp_reward(reward);
    }
    for status in &spec.statuses {
        let turns = status.turns.unwrap_or(config.default_status_turns);
        entity.add_status(status.kind, turns);
    }

    Ok(entity)
}

fn resolve_name(name: &str, side: &[CombatantSpec]) -> Option<EntityId> {
    side.iter().find(|s| s.name == name).map(|s| EntityId(s.id))
}
