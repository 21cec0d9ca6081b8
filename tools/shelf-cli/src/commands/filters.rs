//! List filters offered by the feed.

use anyhow::Result;
use serde::Serialize;

use super::{load_store, FiltersArgs};
use crate::context::Context;

#[derive(Serialize)]
struct FilterView<'a> {
    label: &'a str,
    kind: &'static str,
    products: usize,
}

/// Run the filters command.
pub async fn run(_args: FiltersArgs, ctx: &Context) -> Result<()> {
    let store = load_store(ctx).await?;
    let state = store.state();

    let views: Vec<FilterView> = state
        .filter_labels()
        .iter()
        .map(|label| {
            let kind = label.kind();
            FilterView {
                label: label.as_str(),
                kind: kind.as_str(),
                products: state
                    .products()
                    .iter()
                    .filter(|p| kind.matches(p, state.favorites()))
                    .count(),
            }
        })
        .collect();

    if ctx.output.is_json() {
        ctx.output.json(&views);
        return Ok(());
    }

    ctx.output.header("Filters");
    for view in &views {
        ctx.output.list_item(&format!(
            "{} {} ({} products)",
            view.label,
            console::style(format!("-> {}", view.kind)).dim(),
            view.products
        ));
    }
    Ok(())
}
