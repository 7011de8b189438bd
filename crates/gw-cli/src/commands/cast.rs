use gw_mechanics::{ActionKind, PoolKind, RollRequest};

use super::{Context, Session};

pub async fn run(
    ctx: &Context,
    actor: &str,
    scroll: bool,
    cost: u32,
    formula: &str,
    label: Option<String>,
) -> Result<(), String> {
    let kind = if scroll {
        ActionKind::CastScroll
    } else {
        ActionKind::CastWand
    };
    let mut request = RollRequest::new(actor, kind, PoolKind::Arcane)
        .with_cost(cost)
        .with_formula(formula);
    if let Some(label) = label {
        request = request.with_label(label);
    }

    let session = Session::open(ctx, Vec::new())?;
    session
        .engine
        .perform(&request)
        .await
        .map_err(|e| e.to_string())?;
    session.finish()
}
