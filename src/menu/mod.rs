//! Interactive menus: a line-oriented prompter and one menu per area.

pub mod captions;
pub mod channel;
pub mod comments;
pub mod playlists;
pub mod search;
pub mod videos;

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use serde_json::Value;
use tracing::info;

use crate::{
    execution::YutuResult,
    printer::{display_error, display_warning, field_str, search_result_id},
    utils::truncate,
    yutu::YutuCli,
};

/// Reads answers line by line; EOF counts as "cancel".
pub struct Prompter {
    input: Box<dyn BufRead>,
    output: Box<dyn Write>,
}

impl Prompter {
    pub fn new(input: Box<dyn BufRead>, output: Box<dyn Write>) -> Self {
        Self { input, output }
    }

    pub fn stdio() -> Self {
        Self::new(Box::new(io::BufReader::new(io::stdin())), Box::new(io::stdout()))
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        self.output.flush().ok();
        let mut line = String::new();
        if self.input.read_line(&mut line).context("failed to read input")? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Free text. Empty input yields `default`, or `None` without one.
    pub fn text(&mut self, prompt: &str, default: Option<&str>) -> Result<Option<String>> {
        match default {
            Some(d) => write!(self.output, "{} [{}]: ", prompt, d)?,
            None => write!(self.output, "{}: ", prompt)?,
        }
        Ok(match self.read_line()? {
            Some(line) if !line.is_empty() => Some(line),
            Some(_) => default.map(str::to_string),
            None => None,
        })
    }

    /// Free text that must not be blank; asks again until it is not.
    pub fn required_text(&mut self, prompt: &str) -> Result<Option<String>> {
        loop {
            write!(self.output, "{}: ", prompt)?;
            match self.read_line()? {
                Some(line) if !line.is_empty() => return Ok(Some(line)),
                Some(_) => writeln!(self.output, "  (input cannot be empty)")?,
                None => return Ok(None),
            }
        }
    }

    /// Numbered choice; `0`, blank or EOF cancels.
    pub fn select<T: Clone>(&mut self, prompt: &str, choices: &[(String, T)]) -> Result<Option<T>> {
        writeln!(self.output, "{}", prompt.bold())?;
        for (i, (label, _)) in choices.iter().enumerate() {
            writeln!(self.output, "  {:>2}) {}", i + 1, label)?;
        }
        writeln!(self.output, "   0) back")?;
        loop {
            write!(self.output, "> ")?;
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            if line.is_empty() || line == "0" {
                return Ok(None);
            }
            match line.parse::<usize>() {
                Ok(n) if (1..=choices.len()).contains(&n) => return Ok(Some(choices[n - 1].1.clone())),
                _ => writeln!(self.output, "  (enter a number between 0 and {})", choices.len())?,
            }
        }
    }

    pub fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool> {
        let hint = if default { "Y/n" } else { "y/N" };
        write!(self.output, "{} [{}]: ", prompt, hint)?;
        Ok(match self.read_line()? {
            Some(line) if line.is_empty() => default,
            Some(line) => matches!(line.to_ascii_lowercase().as_str(), "y" | "yes"),
            None => false,
        })
    }
}

/// Labels paired with values, for [`Prompter::select`].
pub(crate) fn choices<T: Clone>(pairs: &[(&str, T)]) -> Vec<(String, T)> {
    pairs.iter().map(|(l, v)| (l.to_string(), v.clone())).collect()
}

/// Report a failed result and hand back only successful ones.
pub(crate) fn ok_or_report(result: YutuResult, fallback: &str) -> Option<YutuResult> {
    if result.success {
        Some(result)
    } else {
        display_error(result.error_or(fallback));
        None
    }
}

/// Result-count choice shared by list and search menus. `Some(0)` is "all".
pub(crate) fn select_count(p: &mut Prompter) -> Result<Option<u32>> {
    p.select(
        "Number of results",
        &choices(&[("10", 10u32), ("25", 25), ("50", 50), ("all", 0)]),
    )
}

/// Let the user pick one of their own videos (search results for `forMine`).
pub(crate) async fn select_my_video(yutu: &YutuCli, p: &mut Prompter, prompt: &str) -> Result<Option<Value>> {
    let Some(result) = ok_or_report(yutu.list_my_videos(Some(50)).await, "could not load videos") else {
        return Ok(None);
    };
    let items = result.items();
    if items.is_empty() {
        display_warning("no videos found");
        return Ok(None);
    }
    let options: Vec<(String, usize)> = items
        .iter()
        .enumerate()
        .map(|(i, item)| (truncate(Some(field_str(item, &["snippet", "title"]).unwrap_or("(untitled)")), 60), i))
        .collect();
    Ok(p.select(prompt, &options)?.map(|i| items[i].clone()))
}

/// Id and title of a search-result video.
pub(crate) fn video_id_and_title(video: &Value) -> (String, String) {
    (
        search_result_id(video).to_string(),
        field_str(video, &["snippet", "title"]).unwrap_or("").to_string(),
    )
}

#[derive(Debug, Clone, Copy)]
enum Area {
    Playlists,
    Videos,
    Search,
    Channel,
    Comments,
    Captions,
}

pub fn show_banner(version: &str) {
    println!("{} {}", "Yutu Manager".bold().cyan(), format!("v{}", version).dimmed());
    println!("{}", "YouTube channel management from the terminal".dimmed());
    println!();
}

/// Main menu loop; returns when the user picks "back"/exit or input ends.
pub async fn run_interactive(yutu: &YutuCli, p: &mut Prompter) -> Result<()> {
    let areas = choices(&[
        ("Playlists", Area::Playlists),
        ("Videos", Area::Videos),
        ("Search YouTube", Area::Search),
        ("Channel info", Area::Channel),
        ("Comments", Area::Comments),
        ("Captions", Area::Captions),
    ]);
    while let Some(area) = p.select("Main menu (0 to quit)", &areas)? {
        info!(?area, "entering menu");
        println!();
        match area {
            Area::Playlists => playlists::menu(yutu, p).await?,
            Area::Videos => videos::menu(yutu, p).await?,
            Area::Search => search::menu(yutu, p).await?,
            Area::Channel => channel::menu(yutu).await,
            Area::Comments => comments::menu(yutu, p).await?,
            Area::Captions => captions::menu(yutu, p).await?,
        }
        println!();
    }
    println!("{}", "Bye!".cyan());
    Ok(())
}
