use gw_mechanics::DamageRequest;

use super::{Context, Session};

pub async fn run(
    ctx: &Context,
    actor: &str,
    formula: &str,
    extra: bool,
    critical: bool,
) -> Result<(), String> {
    let request = DamageRequest::new(actor, formula)
        .with_extra_die(extra)
        .with_critical_die(critical);

    let session = Session::open(ctx, Vec::new())?;
    session
        .engine
        .resolve_damage(&request)
        .await
        .map_err(|e| e.to_string())?;
    session.finish()
}
