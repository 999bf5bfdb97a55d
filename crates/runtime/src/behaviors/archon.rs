use arena_core::{ActionError, AgentContext, ArenaEnv, Direction, RandomSource, UnitKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuildReport {
    pub kind: UnitKind,
    pub direction: Direction,
    pub built: bool,
}

/// Picks a random direction and flips between a miner and a soldier.
pub(super) fn take_turn<R: RandomSource>(
    ctx: &mut AgentContext<R>,
    env: &mut dyn ArenaEnv,
) -> Result<BuildReport, ActionError> {
    let direction = ctx.rng.compass_direction();
    let kind = if ctx.rng.coin_flip() {
        UnitKind::Miner
    } else {
        UnitKind::Soldier
    };
    env.set_indicator(&format!("Trying to build a {kind}"));

    let built = env.can_build(kind, direction);
    if built {
        env.build(kind, direction)?;
    }
    Ok(BuildReport {
        kind,
        direction,
        built,
    })
}
