//! Stop command handler.

use readaloud_runtime::ReadAloud;

/// Execute the stop command. Succeeds whether or not anything was playing.
pub async fn execute(service: &ReadAloud) {
    if service.stop_playback().await {
        println!("Stopped playback.");
    } else {
        println!("Nothing is playing.");
    }
}
