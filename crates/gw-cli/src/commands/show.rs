use comfy_table::{ContentArrangement, Table};

use gw_mechanics::ActorId;

use super::Context;

pub fn run(ctx: &Context, actor: Option<&str>) -> Result<(), String> {
    let actors = super::load_actors(&ctx.actors)?;
    let shown: Vec<_> = match actor {
        Some(id) => {
            let id = ActorId::new(id);
            let sheet = actors
                .get(&id)
                .ok_or_else(|| format!("unknown actor: {id}"))?;
            vec![(id, sheet)]
        }
        None => actors.iter().map(|(id, sheet)| (id.clone(), sheet)).collect(),
    };

    if shown.is_empty() {
        println!("  No actors found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "Id", "Name", "Arcane", "Physical", "Mental", "Destiny", "To Hit", "Move", "Power",
    ]);

    for (id, sheet) in &shown {
        let name = if sheet.shapeshift {
            format!("{} (shifted)", sheet.name)
        } else {
            sheet.name.clone()
        };
        table.add_row(vec![
            id.to_string(),
            name,
            sheet.arcane.to_string(),
            sheet.physical.to_string(),
            sheet.mental.to_string(),
            format!("{} (saved {})", sheet.destiny, sheet.starting_destiny),
            sheet.to_hit.to_string(),
            sheet.movement.to_string(),
            sheet.power_die.to_string(),
        ]);
    }

    println!("{table}");
    Ok(())
}
