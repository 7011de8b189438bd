use gw_mechanics::ActorId;

use super::{Context, Session};

pub async fn run(ctx: &Context, actor: &str) -> Result<(), String> {
    let session = Session::open(ctx, Vec::new())?;
    session
        .engine
        .roll_power_die(&ActorId::new(actor))
        .await
        .map_err(|e| e.to_string())?;
    session.finish()
}
