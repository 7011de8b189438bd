use gw_mechanics::{ActorId, ActorSheet};

use super::Context;

pub fn run(ctx: &Context, actor: &str, name: &str) -> Result<(), String> {
    let mut actors = super::load_actors(&ctx.actors)?;
    let id = ActorId::new(actor);
    if actors.contains_key(&id) {
        return Err(format!("actor '{actor}' already exists"));
    }
    actors.insert(id, ActorSheet::new(name));
    super::save_actors(&ctx.actors, &actors)?;

    println!("  Created {name} ({actor}) in {}", ctx.actors.display());
    Ok(())
}
