use gw_mechanics::ActorId;

use super::{Context, Session};

pub enum Action {
    Roll,
    Add,
    Remove,
    Save,
    Reset,
}

pub async fn run(ctx: &Context, actor: &str, action: Action) -> Result<(), String> {
    let session = Session::open(ctx, Vec::new())?;
    let id = ActorId::new(actor);
    let engine = &session.engine;

    let message = match action {
        // The roll is reported through the activity log.
        Action::Roll => engine.roll_destiny_die(&id).await.map(|_| None),
        Action::Add => engine
            .add_destiny(&id)
            .await
            .map(|n| Some(format!("{id} now has {n} destiny dice"))),
        Action::Remove => engine
            .remove_destiny(&id)
            .await
            .map(|n| Some(format!("{id} now has {n} destiny dice"))),
        Action::Save => engine
            .save_destiny(&id)
            .await
            .map(|n| Some(format!("{id} will reset to {n} destiny dice"))),
        Action::Reset => engine
            .reset_destiny(&id)
            .await
            .map(|n| Some(format!("{id} reset to {n} destiny dice"))),
    }
    .map_err(|e| e.to_string())?;

    if let Some(message) = message {
        println!("  {message}");
    }
    session.finish()
}
