use colored::Colorize;

use gw_mechanics::ActorId;

use super::{Context, Session};

pub async fn run(ctx: &Context, actor: &str) -> Result<(), String> {
    let session = Session::open(ctx, Vec::new())?;
    let id = ActorId::new(actor);
    let shifted = session
        .engine
        .toggle_shapeshift(&id)
        .await
        .map_err(|e| e.to_string())?;

    if shifted {
        println!("  {id} {}", "shapeshifts".bold());
    } else {
        println!("  {id} returns to normal form");
    }
    session.finish()
}
