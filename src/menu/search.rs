//! Search menu: videos, playlists or channels.

use anyhow::Result;

use super::{choices, ok_or_report, select_count, Prompter};
use crate::{
    printer::{print_table, render_search_results},
    yutu::YutuCli,
};

pub async fn menu(yutu: &YutuCli, p: &mut Prompter) -> Result<()> {
    let kinds = choices(&[
        ("Search videos", "video"),
        ("Search playlists", "playlist"),
        ("Search channels", "channel"),
    ]);
    while let Some(kind) = p.select("Search YouTube", &kinds)? {
        run_search(yutu, p, kind).await?;
    }
    Ok(())
}

async fn run_search(yutu: &YutuCli, p: &mut Prompter, kind: &str) -> Result<()> {
    let Some(query) = p.required_text(&format!("Search {}s for", kind))? else {
        return Ok(());
    };
    let order = p.select(
        "Order by",
        &choices(&[
            ("relevance", "relevance"),
            ("upload date (newest)", "date"),
            ("view count", "viewCount"),
            ("rating", "rating"),
        ]),
    )?;
    let Some(order) = order else {
        return Ok(());
    };
    let Some(count) = select_count(p)? else {
        return Ok(());
    };
    tracing::info!(%query, kind, order, count, "searching");
    if let Some(result) = ok_or_report(yutu.search(&query, kind, order, Some(count)).await, "search failed") {
        let rendered = result.data.as_ref().and_then(render_search_results);
        print_table(rendered, "no matching results");
    }
    Ok(())
}
