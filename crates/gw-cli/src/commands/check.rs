use gw_mechanics::{ActionKind, RollRequest};

use super::{Context, Session};

pub struct CheckArgs {
    pub pool: String,
    pub kind: String,
    pub modifier: i32,
    pub cost: Option<u32>,
    pub targets: Vec<i32>,
    pub label: Option<String>,
}

pub async fn run(ctx: &Context, actor: &str, args: CheckArgs) -> Result<(), String> {
    let pool = super::parse_pool(&args.pool)?;
    let kind = ActionKind::parse(&args.kind)
        .filter(|kind| !kind.is_item_cast())
        .ok_or_else(|| format!("unknown check kind '{}' (expected weapon, attack or cast)", args.kind))?;

    let mut request = RollRequest::new(actor, kind, pool).with_modifier(args.modifier);
    if let Some(cost) = args.cost {
        request = request.with_cost(cost);
    }
    if let Some(label) = args.label {
        request = request.with_label(label);
    }

    let session = Session::open(ctx, args.targets)?;
    session
        .engine
        .perform(&request)
        .await
        .map_err(|e| e.to_string())?;
    session.finish()
}
