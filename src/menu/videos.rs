//! Video menu: my uploads and single-video details.

use anyhow::Result;

use super::{choices, ok_or_report, select_count, Prompter};
use crate::{
    execution::Payload,
    printer::{display_error, print_panel, print_table, render_videos, search_result_id, video_panel},
    utils::extract_video_id,
    yutu::YutuCli,
};

#[derive(Debug, Clone, Copy)]
enum Action {
    ListMine,
    Details,
}

pub async fn menu(yutu: &YutuCli, p: &mut Prompter) -> Result<()> {
    let actions = choices(&[("List my videos", Action::ListMine), ("Video details", Action::Details)]);
    while let Some(action) = p.select("Videos", &actions)? {
        match action {
            Action::ListMine => list_mine(yutu, p).await?,
            Action::Details => details(yutu, p).await?,
        }
    }
    Ok(())
}

async fn list_mine(yutu: &YutuCli, p: &mut Prompter) -> Result<()> {
    let Some(count) = select_count(p)? else {
        return Ok(());
    };
    let Some(found) = ok_or_report(yutu.list_my_videos(Some(count)).await, "could not load videos") else {
        return Ok(());
    };
    // Search hits carry no statistics; fetch full records for the table.
    let ids: Vec<&str> = found
        .items()
        .iter()
        .map(search_result_id)
        .filter(|id| !id.is_empty())
        .collect();
    if ids.is_empty() {
        print_table(None, "no videos found");
        return Ok(());
    }
    let mut rows = Vec::new();
    for chunk in ids.chunks(50) {
        let Some(details) = ok_or_report(yutu.get_video_details(chunk).await, "could not load video details") else {
            return Ok(());
        };
        rows.extend(details.items().iter().cloned());
    }
    let data = Payload::ItemList(rows);
    print_table(render_videos(&data), "no videos found");
    Ok(())
}

async fn details(yutu: &YutuCli, p: &mut Prompter) -> Result<()> {
    let Some(input) = p.required_text("Video URL or ID")? else {
        return Ok(());
    };
    let id = extract_video_id(&input);
    let Some(result) = ok_or_report(yutu.get_video_details(&[id.as_str()]).await, "could not load video") else {
        return Ok(());
    };
    match result.data.as_ref().and_then(|d| d.first()) {
        Some(video) => print_panel(&video_panel(video)),
        None => display_error(&format!("video not found: {}", id)),
    }
    Ok(())
}
