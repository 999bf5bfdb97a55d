//! Role dispatch.
//!
//! Every unit runs the same turn entry point; the unit's role tag, as reported
//! by the environment, selects what it does with the turn.
mod archon;
mod miner;
mod soldier;

pub use archon::BuildReport;
pub use miner::MineReport;

use arena_core::{
    ActionError, AgentContext, ArenaEnv, EngagementReport, RandomSource, UnitKind,
};

/// What a role did with its turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BehaviorReport {
    Engagement(EngagementReport),
    Build(BuildReport),
    Mine(MineReport),
    Idle,
}

/// Routes the turn to the behavior for the acting unit's role.
pub fn dispatch<R: RandomSource>(
    ctx: &mut AgentContext<R>,
    env: &mut dyn ArenaEnv,
) -> Result<BehaviorReport, ActionError> {
    match env.self_kind() {
        UnitKind::Soldier => soldier::take_turn(ctx, env).map(BehaviorReport::Engagement),
        UnitKind::Archon => archon::take_turn(ctx, env).map(BehaviorReport::Build),
        UnitKind::Miner => miner::take_turn(ctx, env).map(BehaviorReport::Mine),
        UnitKind::Laboratory | UnitKind::Watchtower | UnitKind::Builder | UnitKind::Sage => {
            Ok(BehaviorReport::Idle)
        }
    }
}
