//! Typed convenience API: one method per supported yutu resource/action.

use std::{fmt, path::Path, str::FromStr};

use anyhow::{bail, Result};

use crate::{
    command::{Invocation, Params},
    config::Config,
    execution::YutuResult,
    process::Executor,
};

const PLAYLIST_PARTS: &str = "snippet,contentDetails,status";
const VIDEO_PARTS: &str = "snippet,statistics,contentDetails,status";
const CHANNEL_PARTS: &str = "snippet,statistics";
const COMMENT_THREAD_PARTS: &str = "id,snippet,replies";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Privacy {
    Public,
    Unlisted,
    Private,
}

impl Privacy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Unlisted => "unlisted",
            Self::Private => "private",
        }
    }
}

/// Moderation state applied to a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModerationStatus {
    Published,
    HeldForReview,
    Rejected,
    LikelySpam,
}

impl ModerationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Published => "published",
            Self::HeldForReview => "heldForReview",
            Self::Rejected => "rejected",
            Self::LikelySpam => "likelySpam",
        }
    }
}

impl fmt::Display for ModerationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caption file formats accepted for download and upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptionFormat {
    Srt,
    Vtt,
    Sbv,
}

impl CaptionFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Srt => "srt",
            Self::Vtt => "vtt",
            Self::Sbv => "sbv",
        }
    }

    /// Format implied by a file's extension, if it is one we upload.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(|e| e.parse().ok())
    }
}

impl FromStr for CaptionFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "srt" => Ok(Self::Srt),
            "vtt" => Ok(Self::Vtt),
            "sbv" => Ok(Self::Sbv),
            other => bail!("unsupported caption format: {}", other),
        }
    }
}

/// Owns the configuration snapshot and the executor for a session.
#[derive(Debug, Clone)]
pub struct YutuCli {
    config: Config,
    executor: Executor,
}

impl YutuCli {
    pub fn new(config: Config) -> Self {
        let executor = Executor::new(&config);
        Self { config, executor }
    }

    pub fn with_executor(config: Config, executor: Executor) -> Self {
        Self { config, executor }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Generic entry point; every convenience method goes through here.
    pub async fn run(&self, inv: Invocation) -> YutuResult {
        self.executor.run(&self.config, &inv).await
    }

    async fn call(&self, resource: &str, action: &str, max: Option<u32>, params: Params) -> YutuResult {
        self.run(Invocation::new(resource, action).max_results(max).params(params))
            .await
    }

    // --- playlists ---

    pub async fn list_my_playlists(&self, max_results: Option<u32>) -> YutuResult {
        let params = Params::new().flag("mine", true).str("parts", PLAYLIST_PARTS);
        self.call("playlist", "list", max_results, params).await
    }

    pub async fn list_playlist_items(&self, playlist_id: &str, max_results: Option<u32>) -> YutuResult {
        let params = Params::new().str("playlistId", playlist_id);
        self.call("playlistItem", "list", max_results, params).await
    }

    pub async fn add_to_playlist(&self, playlist_id: &str, video_id: &str) -> YutuResult {
        let params = Params::new()
            .str("playlistId", playlist_id)
            .str("videoId", video_id);
        self.call("playlistItem", "insert", None, params).await
    }

    /// Takes the playlist *item* id (membership record), not the video id.
    pub async fn remove_from_playlist(&self, playlist_item_id: &str) -> YutuResult {
        let params = Params::new().str("ids", playlist_item_id);
        self.call("playlistItem", "delete", None, params).await
    }

    pub async fn create_playlist(&self, title: &str, description: &str, privacy: Privacy) -> YutuResult {
        let params = Params::new()
            .str("title", title)
            .str("description", description)
            .str("privacy", privacy.as_str());
        self.call("playlist", "insert", None, params).await
    }

    pub async fn delete_playlist(&self, playlist_id: &str) -> YutuResult {
        self.call("playlist", "delete", None, Params::new().str("id", playlist_id))
            .await
    }

    // --- search / videos / channel ---

    /// `kind` is one of video, playlist, channel.
    pub async fn search(&self, query: &str, kind: &str, order: &str, max_results: Option<u32>) -> YutuResult {
        let params = Params::new()
            .str("q", query)
            .str("type", kind)
            .str("order", order);
        self.call("search", "list", max_results, params).await
    }

    pub async fn search_videos(&self, query: &str, order: &str, max_results: Option<u32>) -> YutuResult {
        self.search(query, "video", order, max_results).await
    }

    pub async fn get_video_details<S: AsRef<str>>(&self, video_ids: &[S]) -> YutuResult {
        let ids = video_ids.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(",");
        let params = Params::new().str("ids", ids).str("parts", VIDEO_PARTS);
        self.call("video", "list", None, params).await
    }

    pub async fn list_my_videos(&self, max_results: Option<u32>) -> YutuResult {
        let params = Params::new().flag("forMine", true).str("types", "video");
        self.call("search", "list", max_results, params).await
    }

    pub async fn get_my_channel(&self) -> YutuResult {
        let params = Params::new().flag("mine", true).str("parts", CHANNEL_PARTS);
        self.call("channel", "list", None, params).await
    }

    // --- comments ---

    pub async fn list_comment_threads(&self, video_id: &str, max_results: Option<u32>) -> YutuResult {
        let params = Params::new()
            .str("videoId", video_id)
            .str("parts", COMMENT_THREAD_PARTS);
        self.call("commentThread", "list", max_results, params).await
    }

    /// New top-level comment on a video.
    pub async fn insert_comment_thread(&self, channel_id: &str, video_id: &str, text: &str) -> YutuResult {
        let params = Params::new()
            .str("channelId", channel_id)
            .str("videoId", video_id)
            .str("textOriginal", text);
        self.call("commentThread", "insert", None, params).await
    }

    pub async fn list_comments(&self, parent_id: &str, max_results: Option<u32>) -> YutuResult {
        let params = Params::new().str("parentId", parent_id);
        self.call("comment", "list", max_results, params).await
    }

    /// Reply to an existing top-level comment.
    pub async fn reply_to_comment(&self, video_id: &str, parent_id: &str, text: &str, channel_id: &str) -> YutuResult {
        let params = Params::new()
            .str("channelId", channel_id)
            .str("videoId", video_id)
            .str("parentId", parent_id)
            .str("textOriginal", text);
        self.call("comment", "insert", None, params).await
    }

    pub async fn update_comment(&self, comment_id: &str, text: &str) -> YutuResult {
        let params = Params::new().str("id", comment_id).str("textOriginal", text);
        self.call("comment", "update", None, params).await
    }

    pub async fn delete_comment(&self, comment_id: &str) -> YutuResult {
        self.call("comment", "delete", None, Params::new().str("ids", comment_id))
            .await
    }

    pub async fn set_comment_moderation_status(
        &self,
        comment_id: &str,
        status: ModerationStatus,
        ban_author: bool,
    ) -> YutuResult {
        let params = Params::new()
            .str("ids", comment_id)
            .str("moderationStatus", status.as_str())
            .flag("banAuthor", ban_author);
        self.call("comment", "setModerationStatus", None, params).await
    }

    // --- captions ---

    pub async fn list_captions(&self, video_id: &str) -> YutuResult {
        self.call("caption", "list", None, Params::new().str("videoId", video_id))
            .await
    }

    /// Writes the caption track to `file`; yutu prints nothing on success.
    pub async fn download_caption(
        &self,
        caption_id: &str,
        file: &Path,
        format: CaptionFormat,
        target_lang: Option<&str>,
    ) -> YutuResult {
        let params = Params::new()
            .str("id", caption_id)
            .str("file", file.to_string_lossy())
            .str("tfmt", format.as_str())
            .opt("tlang", target_lang);
        self.call("caption", "download", None, params).await
    }

    pub async fn insert_caption(
        &self,
        video_id: &str,
        file: &Path,
        language: &str,
        name: &str,
        is_draft: bool,
    ) -> YutuResult {
        let params = Params::new()
            .str("videoId", video_id)
            .str("file", file.to_string_lossy())
            .str("language", language)
            .opt("name", Some(name).filter(|n| !n.is_empty()))
            .flag("isDraft", is_draft);
        self.call("caption", "insert", None, params).await
    }

    pub async fn delete_caption(&self, caption_id: &str) -> YutuResult {
        self.call("caption", "delete", None, Params::new().str("ids", caption_id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn caption_format_from_extension() {
        assert_eq!(CaptionFormat::from_path(&PathBuf::from("a.SRT")), Some(CaptionFormat::Srt));
        assert_eq!(CaptionFormat::from_path(&PathBuf::from("a.vtt")), Some(CaptionFormat::Vtt));
        assert_eq!(CaptionFormat::from_path(&PathBuf::from("a.sbv")), Some(CaptionFormat::Sbv));
        assert_eq!(CaptionFormat::from_path(&PathBuf::from("a.txt")), None);
        assert_eq!(CaptionFormat::from_path(&PathBuf::from("noext")), None);
    }

    #[test]
    fn moderation_status_names() {
        assert_eq!(ModerationStatus::HeldForReview.to_string(), "heldForReview");
        assert_eq!(ModerationStatus::LikelySpam.as_str(), "likelySpam");
    }
}
