use arena_core::{ActionError, AgentContext, ArenaEnv, Direction, Position, RandomSource};

/// Each deposit cell is mined at most this many times per resource per turn.
const MINING_ATTEMPTS_PER_CELL: u32 = 16;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MineReport {
    pub gold: u32,
    pub lead: u32,
    pub moved: Option<Direction>,
}

/// Mines every reachable cell around the unit, then takes one random step.
pub(super) fn take_turn<R: RandomSource>(
    ctx: &mut AgentContext<R>,
    env: &mut dyn ArenaEnv,
) -> Result<MineReport, ActionError> {
    let me = env.self_position();
    let mut report = MineReport::default();

    for dx in -1..=1 {
        for dy in -1..=1 {
            let cell = Position::new(me.x + dx, me.y + dy);
            for _ in 0..MINING_ATTEMPTS_PER_CELL {
                if !env.can_mine_gold(cell) {
                    break;
                }
                env.mine_gold(cell)?;
                report.gold += 1;
            }
            for _ in 0..MINING_ATTEMPTS_PER_CELL {
                if !env.can_mine_lead(cell) {
                    break;
                }
                env.mine_lead(cell)?;
                report.lead += 1;
            }
        }
    }

    let direction = ctx.rng.compass_direction();
    if env.can_move(direction) {
        env.move_to(direction)?;
        report.moved = Some(direction);
    }
    Ok(report)
}
