use arena_core::{ActionError, AgentContext, ArenaEnv, Engagement, EngagementReport, RandomSource};

pub(super) fn take_turn<R: RandomSource>(
    ctx: &mut AgentContext<R>,
    env: &mut dyn ArenaEnv,
) -> Result<EngagementReport, ActionError> {
    let engagement = Engagement::from_profile(ctx.profile());
    engagement.run(env, &mut ctx.patrol, &mut ctx.rng)
}
