//! Show product details.

use anyhow::{Context as _, Result};

use super::{load_store, ShowArgs};
use crate::context::Context;
use crate::render;

/// Run the show command.
pub async fn run(args: ShowArgs, ctx: &Context) -> Result<()> {
    let store = load_store(ctx).await?;

    let product = store
        .state()
        .product(args.id)
        .cloned()
        .with_context(|| format!("Product not found: {}", args.id))?;

    if args.favorite {
        store.toggle_favorite(&product);
    }
    store.select_product(product);

    let state = store.state();
    if let Some(selected) = state.selected_product() {
        render::details(&ctx.output, selected, state.is_favorite(selected.id));
    }
    Ok(())
}
