use gw_mechanics::ActorId;

use super::{Context, Session};

/// Reset the pool, or move it by `delta`.
pub async fn run(ctx: &Context, actor: &str, pool: &str, delta: Option<i32>) -> Result<(), String> {
    let pool = super::parse_pool(pool)?;
    let session = Session::open(ctx, Vec::new())?;
    let id = ActorId::new(actor);

    let value = match delta {
        Some(delta) => session.engine.adjust_pool(&id, pool, delta).await,
        None => session.engine.reset_pool(&id, pool).await,
    }
    .map_err(|e| e.to_string())?;

    println!("  {id} {pool}: {value}");
    session.finish()
}
