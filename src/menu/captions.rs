//! Caption tracks: list, download, upload, delete.

use std::{
    env,
    path::{Path, PathBuf},
};

use anyhow::Result;
use serde_json::Value;

use super::{choices, ok_or_report, select_my_video, video_id_and_title, Prompter};
use crate::{
    printer::{
        display_error, display_success, display_warning, field_str, language_name, print_table,
        render_captions,
    },
    yutu::{CaptionFormat, YutuCli},
};

#[derive(Debug, Clone, Copy)]
enum Action {
    List,
    Download,
    Upload,
    Delete,
}

pub async fn menu(yutu: &YutuCli, p: &mut Prompter) -> Result<()> {
    let actions = choices(&[
        ("List video captions", Action::List),
        ("Download a caption", Action::Download),
        ("Upload a caption", Action::Upload),
        ("Delete a caption", Action::Delete),
    ]);
    while let Some(action) = p.select("Captions", &actions)? {
        match action {
            Action::List => list(yutu, p).await?,
            Action::Download => download(yutu, p).await?,
            Action::Upload => upload(yutu, p).await?,
            Action::Delete => delete(yutu, p).await?,
        }
    }
    Ok(())
}

fn track_label(track: &Value) -> String {
    let lang = field_str(track, &["snippet", "language"]).unwrap_or("");
    let name = field_str(track, &["snippet", "name"]).filter(|n| !n.is_empty()).unwrap_or("(default)");
    format!("{} - {}", language_name(lang), name)
}

/// Default download file name: title prefix + language, minus characters
/// that are invalid in file names.
pub(crate) fn default_caption_filename(title: &str, lang: &str, format: CaptionFormat) -> String {
    let prefix: String = title.chars().take(30).collect();
    format!("{}_{}.{}", prefix, lang, format.as_str())
        .chars()
        .filter(|c| !r#"<>:"/\|?*"#.contains(*c))
        .collect()
}

fn absolute(path: &str) -> PathBuf {
    let p = Path::new(path);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        env::current_dir().map(|d| d.join(p)).unwrap_or_else(|_| p.to_path_buf())
    }
}

/// Show the tracks of `video_id` and let the user pick one.
async fn select_track(yutu: &YutuCli, p: &mut Prompter, video_id: &str, title: &str) -> Result<Option<Value>> {
    let Some(result) = ok_or_report(yutu.list_captions(video_id).await, "could not load captions") else {
        return Ok(None);
    };
    let items = result.items();
    if items.is_empty() {
        display_warning("this video has no captions");
        return Ok(None);
    }
    print_table(result.data.as_ref().and_then(|d| render_captions(d, title)), "this video has no captions");
    let options: Vec<(String, usize)> = items.iter().enumerate().map(|(i, t)| (track_label(t), i)).collect();
    Ok(p.select("Caption track", &options)?.map(|i| items[i].clone()))
}

async fn list(yutu: &YutuCli, p: &mut Prompter) -> Result<()> {
    let Some(video) = select_my_video(yutu, p, "Video to list captions for").await? else {
        return Ok(());
    };
    let (video_id, title) = video_id_and_title(&video);
    if let Some(result) = ok_or_report(yutu.list_captions(&video_id).await, "could not load captions") {
        print_table(result.data.as_ref().and_then(|d| render_captions(d, &title)), "this video has no captions");
    }
    Ok(())
}

async fn download(yutu: &YutuCli, p: &mut Prompter) -> Result<()> {
    let Some(video) = select_my_video(yutu, p, "Video to download captions from").await? else {
        return Ok(());
    };
    let (video_id, title) = video_id_and_title(&video);
    let Some(track) = select_track(yutu, p, &video_id, &title).await? else {
        return Ok(());
    };
    let caption_id = field_str(&track, &["id"]).unwrap_or("");
    let lang = field_str(&track, &["snippet", "language"]).unwrap_or("unknown");

    let format = p.select(
        "Download format",
        &choices(&[
            ("SRT (most common)", CaptionFormat::Srt),
            ("VTT (WebVTT)", CaptionFormat::Vtt),
            ("SBV (YouTube)", CaptionFormat::Sbv),
        ]),
    )?;
    let Some(format) = format else {
        return Ok(());
    };

    let target_lang = if p.confirm("Translate to another language?", false)? {
        match p.required_text("Target language code (e.g. en, ja, zh-TW)")? {
            Some(code) if code.len() >= 2 => Some(code),
            Some(_) => {
                display_error("invalid language code");
                return Ok(());
            }
            None => return Ok(()),
        }
    } else {
        None
    };

    let default_name = default_caption_filename(&title, target_lang.as_deref().unwrap_or(lang), format);
    let Some(file) = p.text("Save as", Some(&default_name))? else {
        return Ok(());
    };
    let file = absolute(&file);

    let result = yutu
        .download_caption(caption_id, &file, format, target_lang.as_deref())
        .await;
    if ok_or_report(result, "download failed").is_some() {
        display_success(&format!("caption saved to {}", file.display()));
    }
    Ok(())
}

/// Check an upload candidate: it must exist and carry an SRT/VTT/SBV extension.
pub(crate) fn validate_upload_file(path: &Path) -> std::result::Result<CaptionFormat, String> {
    if !path.is_file() {
        return Err(format!("file not found: {}", path.display()));
    }
    CaptionFormat::from_path(path)
        .ok_or_else(|| "unsupported file format; use SRT, VTT or SBV".to_string())
}

async fn upload(yutu: &YutuCli, p: &mut Prompter) -> Result<()> {
    display_warning("uploading a caption costs 400 quota units");
    let Some(video) = select_my_video(yutu, p, "Video to upload a caption to").await? else {
        return Ok(());
    };
    let (video_id, title) = video_id_and_title(&video);

    let Some(raw_path) = p.required_text("Caption file (SRT/VTT/SBV)")? else {
        return Ok(());
    };
    let file = absolute(&raw_path);
    if let Err(msg) = validate_upload_file(&file) {
        display_error(&msg);
        return Ok(());
    }

    let language = p.select(
        "Caption language",
        &choices(&[
            ("Chinese, Traditional (zh-TW)", "zh-TW"),
            ("English (en)", "en"),
            ("Japanese (ja)", "ja"),
            ("Korean (ko)", "ko"),
            ("Chinese, Simplified (zh-CN)", "zh-CN"),
            ("other...", "other"),
        ]),
    )?;
    let language = match language {
        None => return Ok(()),
        Some("other") => match p.required_text("Language code (e.g. es, fr, de)")? {
            Some(code) if code.len() >= 2 => code,
            Some(_) => {
                display_error("invalid language code");
                return Ok(());
            }
            None => return Ok(()),
        },
        Some(code) => code.to_string(),
    };

    let name = p.text("Track name (blank for default)", None)?.unwrap_or_default();
    let is_draft = p.confirm("Save as draft? (drafts are not shown publicly)", false)?;

    println!();
    println!("  video:    {}", title);
    println!("  file:     {}", file.display());
    println!("  language: {} ({})", language_name(&language), language);
    if !name.is_empty() {
        println!("  name:     {}", name);
    }
    println!("  status:   {}", if is_draft { "draft" } else { "published" });
    println!();

    if !p.confirm("Upload now? (uses 400 quota units)", false)? {
        return Ok(());
    }
    let result = yutu.insert_caption(&video_id, &file, &language, &name, is_draft).await;
    if ok_or_report(result, "upload failed").is_some() {
        display_success("caption uploaded");
    }
    Ok(())
}

async fn delete(yutu: &YutuCli, p: &mut Prompter) -> Result<()> {
    let Some(video) = select_my_video(yutu, p, "Video to delete a caption from").await? else {
        return Ok(());
    };
    let (video_id, title) = video_id_and_title(&video);
    let Some(track) = select_track(yutu, p, &video_id, &title).await? else {
        return Ok(());
    };
    display_warning("deleting a caption cannot be undone");
    if !p.confirm(&format!("Delete {}?", track_label(&track)), false)? {
        return Ok(());
    }
    let caption_id = field_str(&track, &["id"]).unwrap_or("");
    if ok_or_report(yutu.delete_caption(caption_id).await, "could not delete caption").is_some() {
        display_success("caption deleted");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn filename_strips_invalid_characters() {
        let name = default_caption_filename("What? A \"Demo\": part 1/2", "en", CaptionFormat::Srt);
        assert_eq!(name, "What A Demo part 12_en.srt");
    }

    #[test]
    fn filename_keeps_thirty_title_chars() {
        let name = default_caption_filename(&"x".repeat(40), "ja", CaptionFormat::Vtt);
        assert_eq!(name, format!("{}_ja.vtt", "x".repeat(30)));
    }

    #[test]
    fn upload_validation() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("subs.SRT");
        let bad = dir.path().join("subs.txt");
        fs::write(&good, "1\n00:00:01,000 --> 00:00:02,000\nhi\n").unwrap();
        fs::write(&bad, "hi").unwrap();

        assert_eq!(validate_upload_file(&good), Ok(CaptionFormat::Srt));
        assert!(validate_upload_file(&bad).unwrap_err().contains("unsupported"));
        assert!(validate_upload_file(&dir.path().join("missing.vtt"))
            .unwrap_err()
            .contains("not found"));
    }
}
