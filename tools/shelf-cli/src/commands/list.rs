//! List products.

use anyhow::Result;

use super::{load_store, ListArgs};
use crate::context::Context;
use crate::render;

/// Run the list command.
pub async fn run(args: ListArgs, ctx: &Context) -> Result<()> {
    let store = load_store(ctx).await?;

    for id in args.favorites {
        let known = store.state().product(id).is_some();
        if !known {
            ctx.output.warn(&format!("Product {} is not in the feed", id));
        }
        store.toggle_favorite_id(id);
    }

    if let Some(filter) = args.filter {
        store.set_filter(filter);
    }

    render::listing(&ctx.output, &store.state());
    Ok(())
}
