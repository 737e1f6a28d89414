//! Comment management: list, post, reply, edit, delete and moderate.

use anyhow::Result;
use serde_json::Value;

use super::{choices, ok_or_report, select_my_video, video_id_and_title, Prompter};
use crate::{
    printer::{
        comment_detail_panel, display_error, display_success, display_warning, field_str,
        print_panel, print_table, render_comments,
    },
    utils::truncate,
    yutu::{ModerationStatus, YutuCli},
};

#[derive(Debug, Clone, Copy)]
enum Action {
    List,
    Post,
    Reply,
    Edit,
    Delete,
    Moderate,
}

pub async fn menu(yutu: &YutuCli, p: &mut Prompter) -> Result<()> {
    let actions = choices(&[
        ("List video comments", Action::List),
        ("Post a comment", Action::Post),
        ("Reply to a comment", Action::Reply),
        ("Edit a comment", Action::Edit),
        ("Delete a comment", Action::Delete),
        ("Moderate a comment", Action::Moderate),
    ]);
    while let Some(action) = p.select("Comments", &actions)? {
        match action {
            Action::List => list(yutu, p).await?,
            Action::Post => post(yutu, p).await?,
            Action::Reply => reply(yutu, p).await?,
            Action::Edit => edit(yutu, p).await?,
            Action::Delete => delete(yutu, p).await?,
            Action::Moderate => moderate(yutu, p).await?,
        }
    }
    Ok(())
}

fn top_level(thread: &Value) -> (&str, &str, &str) {
    (
        field_str(thread, &["snippet", "topLevelComment", "id"]).unwrap_or(""),
        field_str(thread, &["snippet", "topLevelComment", "snippet", "authorDisplayName"]).unwrap_or(""),
        field_str(thread, &["snippet", "topLevelComment", "snippet", "textDisplay"]).unwrap_or(""),
    )
}

async fn load_threads(yutu: &YutuCli, video_id: &str, title: &str) -> Option<Vec<Value>> {
    let result = ok_or_report(yutu.list_comment_threads(video_id, None).await, "could not load comments")?;
    let rendered = result.data.as_ref().and_then(|d| render_comments(d, title));
    print_table(rendered, "this video has no comments");
    let items = result.items().to_vec();
    (!items.is_empty()).then_some(items)
}

fn select_thread(threads: &[Value], p: &mut Prompter, prompt: &str) -> Result<Option<Value>> {
    let options: Vec<(String, usize)> = threads
        .iter()
        .enumerate()
        .map(|(i, t)| {
            let (_, author, text) = top_level(t);
            (format!("{} - {}", truncate(Some(author), 15), truncate(Some(text), 40)), i)
        })
        .collect();
    Ok(p.select(prompt, &options)?.map(|i| threads[i].clone()))
}

/// Video picker followed by a comment picker; `(video_id, thread)`.
async fn pick_comment(yutu: &YutuCli, p: &mut Prompter, what: &str) -> Result<Option<(String, Value)>> {
    let Some(video) = select_my_video(yutu, p, &format!("Video whose comment to {}", what)).await? else {
        return Ok(None);
    };
    let (video_id, title) = video_id_and_title(&video);
    let Some(threads) = load_threads(yutu, &video_id, &title).await else {
        return Ok(None);
    };
    let Some(thread) = select_thread(&threads, p, &format!("Comment to {}", what))? else {
        return Ok(None);
    };
    Ok(Some((video_id, thread)))
}

async fn my_channel_id(yutu: &YutuCli) -> Option<String> {
    let result = yutu.get_my_channel().await;
    if !result.success {
        return None;
    }
    result
        .items()
        .first()
        .and_then(|c| field_str(c, &["id"]))
        .map(str::to_string)
}

async fn list(yutu: &YutuCli, p: &mut Prompter) -> Result<()> {
    let Some(video) = select_my_video(yutu, p, "Video to show comments for").await? else {
        return Ok(());
    };
    let (video_id, title) = video_id_and_title(&video);
    let Some(threads) = load_threads(yutu, &video_id, &title).await else {
        return Ok(());
    };
    if p.confirm("Show a comment in detail?", false)? {
        if let Some(thread) = select_thread(&threads, p, "Comment to show")? {
            print_panel(&comment_detail_panel(&thread, true));
        }
    }
    Ok(())
}

async fn post(yutu: &YutuCli, p: &mut Prompter) -> Result<()> {
    let Some(video) = select_my_video(yutu, p, "Video to comment on").await? else {
        return Ok(());
    };
    let (video_id, _) = video_id_and_title(&video);
    let Some(text) = p.required_text("Comment text")? else {
        return Ok(());
    };
    let Some(channel_id) = my_channel_id(yutu).await else {
        display_error("could not determine your channel id");
        return Ok(());
    };
    if !p.confirm("Post this comment? (uses 50 quota units)", true)? {
        return Ok(());
    }
    if ok_or_report(yutu.insert_comment_thread(&channel_id, &video_id, &text).await, "could not post comment").is_some() {
        display_success("comment posted");
    }
    Ok(())
}

async fn reply(yutu: &YutuCli, p: &mut Prompter) -> Result<()> {
    let Some((video_id, thread)) = pick_comment(yutu, p, "reply to").await? else {
        return Ok(());
    };
    print_panel(&comment_detail_panel(&thread, true));
    let (parent_id, _, _) = top_level(&thread);
    let Some(text) = p.required_text("Reply text")? else {
        return Ok(());
    };
    let Some(channel_id) = my_channel_id(yutu).await else {
        display_error("could not determine your channel id");
        return Ok(());
    };
    if !p.confirm("Send this reply? (uses 50 quota units)", true)? {
        return Ok(());
    }
    let result = yutu.reply_to_comment(&video_id, parent_id, &text, &channel_id).await;
    if ok_or_report(result, "could not send reply").is_some() {
        display_success("reply sent");
    }
    Ok(())
}

async fn edit(yutu: &YutuCli, p: &mut Prompter) -> Result<()> {
    let Some((_, thread)) = pick_comment(yutu, p, "edit").await? else {
        return Ok(());
    };
    let (comment_id, _, current) = top_level(&thread);
    let Some(text) = p.text("New text", Some(current))? else {
        return Ok(());
    };
    if text == current {
        display_warning("text unchanged");
        return Ok(());
    }
    if ok_or_report(yutu.update_comment(comment_id, &text).await, "could not update comment").is_some() {
        display_success("comment updated");
    }
    Ok(())
}

async fn delete(yutu: &YutuCli, p: &mut Prompter) -> Result<()> {
    let Some((_, thread)) = pick_comment(yutu, p, "delete").await? else {
        return Ok(());
    };
    print_panel(&comment_detail_panel(&thread, false));
    let (comment_id, author, _) = top_level(&thread);
    display_warning("deleting a comment cannot be undone");
    if !p.confirm(&format!("Delete the comment by {}?", author), false)? {
        return Ok(());
    }
    if ok_or_report(yutu.delete_comment(comment_id).await, "could not delete comment").is_some() {
        display_success("comment deleted");
    }
    Ok(())
}

async fn moderate(yutu: &YutuCli, p: &mut Prompter) -> Result<()> {
    let Some((_, thread)) = pick_comment(yutu, p, "moderate").await? else {
        return Ok(());
    };
    print_panel(&comment_detail_panel(&thread, false));
    let (comment_id, _, _) = top_level(&thread);
    let status = p.select(
        "Moderation action",
        &choices(&[
            ("publish", ModerationStatus::Published),
            ("hold for review", ModerationStatus::HeldForReview),
            ("reject", ModerationStatus::Rejected),
        ]),
    )?;
    let Some(status) = status else {
        return Ok(());
    };
    // Banning is only offered together with a rejection.
    let ban_author = status == ModerationStatus::Rejected && p.confirm("Also ban the author?", false)?;
    if !p.confirm(&format!("Set the comment to \"{}\"?", status), true)? {
        return Ok(());
    }
    let result = yutu.set_comment_moderation_status(comment_id, status, ban_author).await;
    if ok_or_report(result, "could not update moderation status").is_some() {
        display_success(&format!("comment set to \"{}\"", status));
    }
    Ok(())
}
