//! Download command handler.

use readaloud_runtime::ReadAloud;

use super::parse_voice;
use crate::error::CliError;
use crate::utils::input::TerminalPicker;
use crate::utils::progress::DownloadProgress;

/// Execute the download command.
///
/// With a voice identifier the catalog entry is downloaded directly;
/// otherwise the user picks language, voice and quality.
pub async fn execute(service: &ReadAloud, voice: Option<&str>) -> Result<(), CliError> {
    let id = voice.map(parse_voice).transpose()?;

    let progress = DownloadProgress::new("Downloading");
    let on_progress = |downloaded: u64, total: u64| progress.update(downloaded, total);

    let result = match id {
        Some(id) => service.download(&id, &on_progress).await.map(|d| Some(d.id)),
        None => service.download_voice(&TerminalPicker, &on_progress).await,
    };

    match result {
        Ok(Some(id)) => {
            progress.finish("done");
            println!("Downloaded voice {id}. Run `readaloud select {id}` to use it.");
            Ok(())
        }
        Ok(None) => {
            progress.abandon();
            println!("Download cancelled.");
            Ok(())
        }
        Err(e) => {
            progress.abandon();
            Err(e.into())
        }
    }
}
