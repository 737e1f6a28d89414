//! Channel overview.

use super::ok_or_report;
use crate::{
    printer::{channel_panel, display_warning, print_panel},
    yutu::YutuCli,
};

pub async fn menu(yutu: &YutuCli) {
    let Some(result) = ok_or_report(yutu.get_my_channel().await, "could not load channel") else {
        return;
    };
    match result.data.as_ref().and_then(channel_panel) {
        Some(panel) => print_panel(&panel),
        None => display_warning("no channel information found"),
    }
}
