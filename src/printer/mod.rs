//! Printers: markdown tables (termimad), boxed panels and status messages.

use owo_colors::OwoColorize;
use serde_json::Value;
use termimad::MadSkin;

use crate::{
    execution::Payload,
    utils::{
        format_count, format_date, format_duration, truncate,
        unicode::{display_width, pad_to_width},
    },
};

pub struct MarkdownPrinter {
    pub skin: MadSkin,
}

impl Default for MarkdownPrinter {
    fn default() -> Self {
        Self { skin: MadSkin::default() }
    }
}

impl MarkdownPrinter {
    pub fn print(&self, text: &str) {
        self.skin.print_text(text);
        println!();
    }
}

/// Walk nested objects: `field(item, &["snippet", "title"])`.
pub fn field<'a>(item: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(item, |v, key| v.get(key))
}

pub fn field_str<'a>(item: &'a Value, path: &[&str]) -> Option<&'a str> {
    field(item, path).and_then(Value::as_str)
}

/// Escape text for a markdown table cell.
fn cell(text: &str) -> String {
    text.replace('|', "\\|").replace('*', "\\*").replace('`', "'")
}

struct Table {
    title: String,
    header: Vec<&'static str>,
    align: Vec<&'static str>,
    rows: Vec<Vec<String>>,
}

impl Table {
    fn new(title: String, columns: &[(&'static str, &'static str)]) -> Self {
        Self {
            title,
            header: columns.iter().map(|(h, _)| *h).collect(),
            align: columns.iter().map(|(_, a)| *a).collect(),
            rows: Vec::new(),
        }
    }

    fn row(&mut self, cells: Vec<String>) {
        self.rows.push(cells.iter().map(|c| cell(c)).collect());
    }

    fn render(&self) -> String {
        let mut md = format!("**{}**\n\n", cell(&self.title));
        md.push_str(&format!("|{}|\n", self.header.join("|")));
        md.push_str(&format!("|{}|\n", self.align.join("|")));
        for r in &self.rows {
            md.push_str(&format!("|{}|\n", r.join("|")));
        }
        md
    }
}

pub fn privacy_label(status: &str) -> &str {
    match status {
        "public" => "Public",
        "unlisted" => "Unlisted",
        "private" => "Private",
        "" => "unknown",
        other => other,
    }
}

pub fn moderation_label(status: &str) -> &str {
    match status {
        "published" => "published",
        "heldForReview" => "held for review",
        "rejected" => "rejected",
        "likelySpam" => "likely spam",
        other => other,
    }
}

pub fn kind_label(kind: &str) -> &str {
    match kind.trim_start_matches("youtube#") {
        "video" => "video",
        "playlist" => "playlist",
        "channel" => "channel",
        other => other,
    }
}

/// English name for common caption language codes.
pub fn language_name(code: &str) -> &str {
    match code {
        "en" | "en-US" | "en-GB" => "English",
        "zh-TW" | "zh-Hant" => "Chinese (Traditional)",
        "zh-CN" | "zh-Hans" => "Chinese (Simplified)",
        "zh" => "Chinese",
        "ja" => "Japanese",
        "ko" => "Korean",
        "es" => "Spanish",
        "fr" => "French",
        "de" => "German",
        "pt" => "Portuguese",
        "it" => "Italian",
        "ru" => "Russian",
        other => other,
    }
}

pub fn render_playlists(data: &Payload) -> Option<String> {
    let items = data.items();
    if items.is_empty() {
        return None;
    }
    let mut t = Table::new(
        format!("Playlists ({})", items.len()),
        &[("#", ":-:"), ("Title", ":-"), ("Videos", "-:"), ("Privacy", ":-:"), ("ID", ":-")],
    );
    for (i, item) in items.iter().enumerate() {
        t.row(vec![
            (i + 1).to_string(),
            field_str(item, &["snippet", "title"]).unwrap_or("(untitled)").to_string(),
            format_count(field(item, &["contentDetails", "itemCount"])),
            privacy_label(field_str(item, &["status", "privacyStatus"]).unwrap_or("")).to_string(),
            field_str(item, &["id"]).unwrap_or("").to_string(),
        ]);
    }
    Some(t.render())
}

/// Video id of a playlist item, from contentDetails or the snippet's resourceId.
pub fn playlist_item_video_id(item: &Value) -> &str {
    field_str(item, &["contentDetails", "videoId"])
        .or_else(|| field_str(item, &["snippet", "resourceId", "videoId"]))
        .unwrap_or("")
}

pub fn render_playlist_items(data: &Payload, playlist_title: &str) -> Option<String> {
    let items = data.items();
    if items.is_empty() {
        return None;
    }
    let title = if playlist_title.is_empty() { "Playlist contents" } else { playlist_title };
    let mut t = Table::new(
        format!("{} ({} videos)", title, items.len()),
        &[("#", ":-:"), ("Title", ":-"), ("Channel", ":-"), ("Published", ":-:"), ("Video ID", ":-")],
    );
    for (i, item) in items.iter().enumerate() {
        t.row(vec![
            (i + 1).to_string(),
            truncate(Some(field_str(item, &["snippet", "title"]).unwrap_or("(untitled)")), 50),
            truncate(field_str(item, &["snippet", "videoOwnerChannelTitle"]), 20),
            format_date(field_str(item, &["contentDetails", "videoPublishedAt"])),
            playlist_item_video_id(item).to_string(),
        ]);
    }
    Some(t.render())
}

pub fn render_videos(data: &Payload) -> Option<String> {
    let items = data.items();
    if items.is_empty() {
        return None;
    }
    let mut t = Table::new(
        format!("Videos ({})", items.len()),
        &[("#", ":-:"), ("Title", ":-"), ("Views", "-:"), ("Likes", "-:"), ("Duration", ":-:"), ("Published", ":-:")],
    );
    for (i, item) in items.iter().enumerate() {
        t.row(vec![
            (i + 1).to_string(),
            truncate(Some(field_str(item, &["snippet", "title"]).unwrap_or("(untitled)")), 45),
            format_count(field(item, &["statistics", "viewCount"])),
            format_count(field(item, &["statistics", "likeCount"])),
            format_duration(field_str(item, &["contentDetails", "duration"])),
            format_date(field_str(item, &["snippet", "publishedAt"])),
        ]);
    }
    Some(t.render())
}

/// Resource id of a search hit: video, playlist or channel id.
pub fn search_result_id(item: &Value) -> &str {
    match item.get("id") {
        Some(Value::String(s)) => s,
        Some(id) => ["videoId", "playlistId", "channelId"]
            .iter()
            .find_map(|k| id.get(k).and_then(Value::as_str))
            .unwrap_or(""),
        None => "",
    }
}

pub fn render_search_results(data: &Payload) -> Option<String> {
    let items = data.items();
    if items.is_empty() {
        return None;
    }
    let mut t = Table::new(
        format!("Search results (showing {} of {})", items.len(), data.total_results()),
        &[("#", ":-:"), ("Type", ":-:"), ("Title", ":-"), ("Channel", ":-"), ("Published", ":-:"), ("ID", ":-")],
    );
    for (i, item) in items.iter().enumerate() {
        t.row(vec![
            (i + 1).to_string(),
            kind_label(field_str(item, &["id", "kind"]).unwrap_or("")).to_string(),
            truncate(Some(field_str(item, &["snippet", "title"]).unwrap_or("(untitled)")), 45),
            truncate(field_str(item, &["snippet", "channelTitle"]), 20),
            format_date(field_str(item, &["snippet", "publishedAt"])),
            search_result_id(item).to_string(),
        ]);
    }
    Some(t.render())
}

pub fn render_comments(data: &Payload, video_title: &str) -> Option<String> {
    let items = data.items();
    if items.is_empty() {
        return None;
    }
    let title = if video_title.is_empty() { "Comments" } else { video_title };
    let mut t = Table::new(
        format!("{} ({} comments)", title, items.len()),
        &[("#", ":-:"), ("Author", ":-"), ("Comment", ":-"), ("Likes", "-:"), ("Replies", "-:"), ("Status", ":-:"), ("Date", ":-:")],
    );
    for (i, item) in items.iter().enumerate() {
        let top = field(item, &["snippet", "topLevelComment", "snippet"]).unwrap_or(&Value::Null);
        t.row(vec![
            (i + 1).to_string(),
            truncate(field_str(top, &["authorDisplayName"]), 15),
            truncate(field_str(top, &["textDisplay"]), 45),
            format_count(field(top, &["likeCount"])),
            format_count(field(item, &["snippet", "totalReplyCount"])),
            moderation_label(field_str(top, &["moderationStatus"]).unwrap_or("published")).to_string(),
            format_date(field_str(top, &["publishedAt"])),
        ]);
    }
    Some(t.render())
}

pub fn render_captions(data: &Payload, video_title: &str) -> Option<String> {
    let items = data.items();
    if items.is_empty() {
        return None;
    }
    let title = if video_title.is_empty() { "Captions" } else { video_title };
    let mut t = Table::new(
        format!("{} ({} caption tracks)", title, items.len()),
        &[("#", ":-:"), ("Language", ":-"), ("Name", ":-"), ("Kind", ":-:"), ("Draft", ":-:"), ("Updated", ":-:"), ("ID", ":-")],
    );
    for (i, item) in items.iter().enumerate() {
        let lang = field_str(item, &["snippet", "language"]).unwrap_or("");
        let draft = field(item, &["snippet", "isDraft"]).and_then(Value::as_bool).unwrap_or(false);
        t.row(vec![
            (i + 1).to_string(),
            format!("{} ({})", language_name(lang), lang),
            field_str(item, &["snippet", "name"]).filter(|n| !n.is_empty()).unwrap_or("(default)").to_string(),
            field_str(item, &["snippet", "trackKind"]).unwrap_or("").to_string(),
            if draft { "yes" } else { "no" }.to_string(),
            format_date(field_str(item, &["snippet", "lastUpdated"])),
            field_str(item, &["id"]).unwrap_or("").to_string(),
        ]);
    }
    Some(t.render())
}

/// Boxed block of lines with a title in the top border.
pub fn render_panel(title: &str, lines: &[String]) -> String {
    let inner = lines
        .iter()
        .map(|l| display_width(l))
        .chain(std::iter::once(display_width(title) + 2))
        .max()
        .unwrap_or(0);
    let mut out = String::new();
    let fill = inner + 2 - (display_width(title) + 2);
    out.push_str(&format!("╭ {} {}╮\n", title, "─".repeat(fill)));
    for l in lines {
        out.push_str(&format!("│ {} │\n", pad_to_width(l, inner)));
    }
    out.push_str(&format!("╰{}╯\n", "─".repeat(inner + 2)));
    out
}

pub fn channel_panel(data: &Payload) -> Option<String> {
    let channel = data.first()?;
    let stat = |k: &str| format_count(field(channel, &["statistics", k]));
    let mut lines = vec![
        field_str(channel, &["snippet", "title"]).unwrap_or("(untitled)").to_string(),
        format!("ID: {}", field_str(channel, &["id"]).unwrap_or("")),
        String::new(),
        format!("Subscribers: {}", stat("subscriberCount")),
        format!("Videos:      {}", stat("videoCount")),
        format!("Total views: {}", stat("viewCount")),
        String::new(),
    ];
    let description = truncate(field_str(channel, &["snippet", "description"]), 200);
    lines.push(if description.is_empty() { "(no description)".to_string() } else { description });
    Some(render_panel("My channel", &lines))
}

pub fn video_panel(video: &Value) -> String {
    let stat = |k: &str| format_count(field(video, &["statistics", k]));
    let description = field_str(video, &["snippet", "description"]).unwrap_or("");
    let description: String = description.chars().take(500).collect();
    let mut lines = vec![
        field_str(video, &["snippet", "title"]).unwrap_or("(untitled)").to_string(),
        format!("https://youtu.be/{}", field_str(video, &["id"]).unwrap_or("")),
        String::new(),
        format!("Views:     {}", stat("viewCount")),
        format!("Likes:     {}", stat("likeCount")),
        format!("Comments:  {}", stat("commentCount")),
        String::new(),
        format!("Duration:  {}", format_duration(field_str(video, &["contentDetails", "duration"]))),
        format!(
            "Quality:   {}",
            field_str(video, &["contentDetails", "definition"]).unwrap_or("").to_uppercase()
        ),
        format!("Privacy:   {}", privacy_label(field_str(video, &["status", "privacyStatus"]).unwrap_or(""))),
        format!("Published: {}", format_date(field_str(video, &["snippet", "publishedAt"]))),
        format!("Channel:   {}", field_str(video, &["snippet", "channelTitle"]).unwrap_or("")),
        String::new(),
    ];
    if description.trim().is_empty() {
        lines.push("(no description)".to_string());
    } else {
        lines.extend(description.lines().map(str::to_string));
    }
    render_panel("Video", &lines)
}

const MAX_REPLIES_SHOWN: usize = 5;

pub fn comment_detail_panel(thread: &Value, include_replies: bool) -> String {
    let top = field(thread, &["snippet", "topLevelComment", "snippet"]).unwrap_or(&Value::Null);
    let reply_count = field(thread, &["snippet", "totalReplyCount"])
        .and_then(Value::as_u64)
        .unwrap_or(0) as usize;
    let mut lines = vec![
        format!(
            "{} · {}",
            field_str(top, &["authorDisplayName"]).unwrap_or("anonymous"),
            format_date(field_str(top, &["publishedAt"]))
        ),
        truncate(field_str(top, &["textDisplay"]), 200),
        String::new(),
        format!("likes {}   replies {}", format_count(field(top, &["likeCount"])), reply_count),
    ];

    let replies = field(thread, &["replies", "comments"])
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[]);
    if include_replies && !replies.is_empty() {
        lines.push(String::new());
        lines.push("─── replies ───".to_string());
        for reply in replies.iter().take(MAX_REPLIES_SHOWN) {
            let s = field(reply, &["snippet"]).unwrap_or(&Value::Null);
            lines.push(String::new());
            lines.push(format!(
                "{} · {}",
                field_str(s, &["authorDisplayName"]).unwrap_or(""),
                format_date(field_str(s, &["publishedAt"]))
            ));
            lines.push(truncate(field_str(s, &["textDisplay"]), 60));
        }
        if reply_count > MAX_REPLIES_SHOWN {
            lines.push(String::new());
            lines.push(format!("... {} more replies", reply_count - MAX_REPLIES_SHOWN));
        }
    }
    render_panel("Comment", &lines)
}

pub fn print_table(rendered: Option<String>, empty_message: &str) {
    match rendered {
        Some(md) => MarkdownPrinter::default().print(&md),
        None => display_warning(empty_message),
    }
}

pub fn print_panel(panel: &str) {
    print!("{}", panel.cyan());
}

pub fn display_error(message: &str) {
    println!("{} {}", "✖ error:".red().bold(), message.red());
}

pub fn display_success(message: &str) {
    println!("{} {}", "✔".green().bold(), message.green());
}

pub fn display_warning(message: &str) {
    println!("{} {}", "!".yellow().bold(), message.yellow());
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn page(v: Value) -> Payload {
        Payload::from_value(v).unwrap()
    }

    #[test]
    fn empty_payloads_render_nothing() {
        assert!(render_playlists(&page(json!([]))).is_none());
        assert!(render_videos(&page(json!({"items": []}))).is_none());
        assert!(channel_panel(&page(json!({"items": []}))).is_none());
    }

    #[test]
    fn playlist_table_rows() {
        let md = render_playlists(&page(json!({"items": [{
            "id": "PL1",
            "snippet": {"title": "Mix | 2024"},
            "contentDetails": {"itemCount": 1500},
            "status": {"privacyStatus": "public"}
        }]})))
        .unwrap();
        assert!(md.contains("Playlists (1)"));
        assert!(md.contains("|1|Mix \\| 2024|1.5K|Public|PL1|"));
    }

    #[test]
    fn video_table_formats_fields() {
        let md = render_videos(&page(json!([{
            "snippet": {"title": "Demo", "publishedAt": "2024-01-15T10:30:00Z"},
            "statistics": {"viewCount": "2500000", "likeCount": "999"},
            "contentDetails": {"duration": "PT1H2M3S"}
        }])))
        .unwrap();
        assert!(md.contains("|1|Demo|2.5M|999|1:02:03|2024-01-15|"));
    }

    #[test]
    fn search_ids_and_totals() {
        let data = page(json!({
            "pageInfo": {"totalResults": 300},
            "items": [
                {"id": {"kind": "youtube#video", "videoId": "v1"}, "snippet": {"title": "a"}},
                {"id": {"kind": "youtube#channel", "channelId": "c1"}, "snippet": {"title": "b"}}
            ]
        }));
        assert_eq!(search_result_id(&data.items()[1]), "c1");
        let md = render_search_results(&data).unwrap();
        assert!(md.contains("showing 2 of 300"));
        assert!(md.contains("|video|"));
    }

    #[test]
    fn playlist_item_id_fallback() {
        let item = json!({"snippet": {"resourceId": {"videoId": "abc"}}});
        assert_eq!(playlist_item_video_id(&item), "abc");
    }

    #[test]
    fn panel_is_rectangular() {
        let panel = render_panel("T", &["short".to_string(), "字幕字幕".to_string()]);
        let widths: Vec<_> = panel.lines().map(display_width).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]), "{:?}", widths);
    }

    #[test]
    fn comment_detail_caps_replies() {
        let replies: Vec<_> = (0..7)
            .map(|i| json!({"snippet": {"authorDisplayName": format!("r{}", i), "textDisplay": "hi"}}))
            .collect();
        let thread = json!({
            "snippet": {
                "totalReplyCount": 7,
                "topLevelComment": {"snippet": {"authorDisplayName": "ann", "textDisplay": "first"}}
            },
            "replies": {"comments": replies}
        });
        let panel = comment_detail_panel(&thread, true);
        assert!(panel.contains("r4"));
        assert!(!panel.contains("r5"));
        assert!(panel.contains("2 more replies"));
        assert!(!comment_detail_panel(&thread, false).contains("r0"));
    }

    #[test]
    fn labels() {
        assert_eq!(language_name("ja"), "Japanese");
        assert_eq!(language_name("xx"), "xx");
        assert_eq!(moderation_label("heldForReview"), "held for review");
        assert_eq!(privacy_label("unlisted"), "Unlisted");
        assert_eq!(privacy_label(""), "unknown");
        assert_eq!(kind_label("youtube#playlist"), "playlist");
    }
}
