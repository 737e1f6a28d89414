//! Playlist management menu.

use anyhow::Result;
use serde_json::Value;

use super::{choices, ok_or_report, Prompter};
use crate::{
    printer::{
        display_success, display_warning, field_str, playlist_item_video_id, print_table,
        render_playlist_items, render_playlists,
    },
    utils::{extract_video_id, truncate},
    yutu::{Privacy, YutuCli},
};

#[derive(Debug, Clone, Copy)]
enum Action {
    List,
    View,
    Create,
    AddVideo,
    RemoveVideo,
    Delete,
}

pub async fn menu(yutu: &YutuCli, p: &mut Prompter) -> Result<()> {
    let actions = choices(&[
        ("List my playlists", Action::List),
        ("View playlist contents", Action::View),
        ("Create playlist", Action::Create),
        ("Add video to playlist", Action::AddVideo),
        ("Remove video from playlist", Action::RemoveVideo),
        ("Delete playlist", Action::Delete),
    ]);
    while let Some(action) = p.select("Playlists", &actions)? {
        match action {
            Action::List => {
                list(yutu).await;
            }
            Action::View => view(yutu, p).await?,
            Action::Create => create(yutu, p).await?,
            Action::AddVideo => add_video(yutu, p).await?,
            Action::RemoveVideo => remove_video(yutu, p).await?,
            Action::Delete => delete(yutu, p).await?,
        }
    }
    Ok(())
}

/// Print my playlists and return them for selection.
async fn list(yutu: &YutuCli) -> Vec<Value> {
    let Some(result) = ok_or_report(yutu.list_my_playlists(None).await, "could not load playlists") else {
        return Vec::new();
    };
    if let Some(data) = &result.data {
        print_table(render_playlists(data), "no playlists found");
    } else {
        display_warning("no playlists found");
    }
    result.items().to_vec()
}

/// Returns `(id, title)` of the chosen playlist.
async fn select_playlist(yutu: &YutuCli, p: &mut Prompter, prompt: &str) -> Result<Option<(String, String)>> {
    let items = list(yutu).await;
    if items.is_empty() {
        return Ok(None);
    }
    let options: Vec<(String, (String, String))> = items
        .iter()
        .map(|item| {
            let id = field_str(item, &["id"]).unwrap_or("").to_string();
            let title = field_str(item, &["snippet", "title"]).unwrap_or("(untitled)").to_string();
            (title.clone(), (id, title))
        })
        .collect();
    p.select(prompt, &options)
}

async fn view(yutu: &YutuCli, p: &mut Prompter) -> Result<()> {
    let Some((id, title)) = select_playlist(yutu, p, "Playlist to view").await? else {
        return Ok(());
    };
    if let Some(result) = ok_or_report(yutu.list_playlist_items(&id, None).await, "could not load playlist") {
        match &result.data {
            Some(data) => print_table(render_playlist_items(data, &title), "playlist is empty"),
            None => display_warning("playlist is empty"),
        }
    }
    Ok(())
}

async fn create(yutu: &YutuCli, p: &mut Prompter) -> Result<()> {
    let Some(title) = p.required_text("Playlist title")? else {
        return Ok(());
    };
    let description = p.text("Description (optional)", None)?.unwrap_or_default();
    let privacy = p.select(
        "Privacy",
        &choices(&[
            ("public", Privacy::Public),
            ("unlisted (anyone with the link)", Privacy::Unlisted),
            ("private", Privacy::Private),
        ]),
    )?;
    let Some(privacy) = privacy else {
        return Ok(());
    };
    if let Some(result) = ok_or_report(yutu.create_playlist(&title, &description, privacy).await, "could not create playlist") {
        let id = result
            .data
            .as_ref()
            .and_then(|d| d.get("id"))
            .and_then(Value::as_str)
            .unwrap_or("");
        display_success(&format!("created playlist \"{}\" {}", title, id));
    }
    Ok(())
}

async fn add_video(yutu: &YutuCli, p: &mut Prompter) -> Result<()> {
    let Some((playlist_id, title)) = select_playlist(yutu, p, "Add to which playlist").await? else {
        return Ok(());
    };
    let Some(input) = p.required_text("Video URL or ID")? else {
        return Ok(());
    };
    let video_id = extract_video_id(&input);
    if ok_or_report(yutu.add_to_playlist(&playlist_id, &video_id).await, "could not add video").is_some() {
        display_success(&format!("added {} to \"{}\"", video_id, title));
    }
    Ok(())
}

async fn remove_video(yutu: &YutuCli, p: &mut Prompter) -> Result<()> {
    let Some((playlist_id, title)) = select_playlist(yutu, p, "Remove from which playlist").await? else {
        return Ok(());
    };
    let Some(result) = ok_or_report(yutu.list_playlist_items(&playlist_id, None).await, "could not load playlist") else {
        return Ok(());
    };
    let items = result.items();
    if items.is_empty() {
        display_warning("playlist is empty");
        return Ok(());
    }
    // The delete call needs the playlist-item id, not the video id.
    let options: Vec<(String, (String, String))> = items
        .iter()
        .map(|item| {
            let label = format!(
                "{} ({})",
                truncate(field_str(item, &["snippet", "title"]), 50),
                playlist_item_video_id(item)
            );
            let item_id = field_str(item, &["id"]).unwrap_or("").to_string();
            (label.clone(), (item_id, label))
        })
        .collect();
    let Some((item_id, label)) = p.select("Video to remove", &options)? else {
        return Ok(());
    };
    if !p.confirm(&format!("Remove {} from \"{}\"?", label, title), false)? {
        return Ok(());
    }
    if ok_or_report(yutu.remove_from_playlist(&item_id).await, "could not remove video").is_some() {
        display_success("video removed");
    }
    Ok(())
}

async fn delete(yutu: &YutuCli, p: &mut Prompter) -> Result<()> {
    let Some((id, title)) = select_playlist(yutu, p, "Playlist to delete").await? else {
        return Ok(());
    };
    display_warning("deleting a playlist cannot be undone");
    if !p.confirm(&format!("Delete \"{}\"?", title), false)? {
        return Ok(());
    }
    if ok_or_report(yutu.delete_playlist(&id).await, "could not delete playlist").is_some() {
        display_success(&format!("deleted \"{}\"", title));
    }
    Ok(())
}
