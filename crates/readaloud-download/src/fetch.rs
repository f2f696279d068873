//! Single-file HTTP fetch with manual redirect handling.
//!
//! The client is built with automatic redirects disabled; every 3xx is
//! followed here by re-issuing the GET against `Location`, resolved relative
//! to the URL that produced it. There is no limit on the number of hops.

use std::path::Path;

use futures_util::StreamExt;
use readaloud_core::CoreError;
use reqwest::header::LOCATION;
use reqwest::{Client, Response, redirect};
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};
use url::Url;

/// Progress callback, called with `(downloaded_bytes, total_bytes)`.
///
/// `total_bytes` is 0 when the server sent no `Content-Length`.
pub type ProgressCallback<'a> = &'a (dyn Fn(u64, u64) + Send + Sync);

/// Progress callback that ignores every update.
pub fn no_progress(_downloaded: u64, _total: u64) {}

/// Build the HTTP client used for voice downloads.
pub fn build_client() -> Result<Client, CoreError> {
    Client::builder()
        .redirect(redirect::Policy::none())
        .user_agent(concat!("readaloud/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| CoreError::HttpClient(e.to_string()))
}

/// Download `url` into `dest`, returning the number of bytes written.
///
/// Any existing file at `dest` is removed before the request is issued. On
/// every failure path the partially written file is removed again, so the
/// caller finds either a complete non-empty file or nothing.
pub async fn fetch_to_file(
    client: &Client,
    url: &str,
    dest: &Path,
    on_progress: ProgressCallback<'_>,
) -> Result<u64, CoreError> {
    remove_if_exists(dest).await?;

    let response = get_following_redirects(client, url).await?;
    let total = response.content_length().unwrap_or(0);

    info!(url, dest = %dest.display(), total, "Downloading voice asset");

    if let Err(e) = stream_to_file(response, dest, total, on_progress).await {
        discard_partial(dest).await;
        return Err(e);
    }

    let size = fs::metadata(dest).await?.len();
    if size == 0 {
        discard_partial(dest).await;
        return Err(CoreError::EmptyDownload(dest.to_path_buf()));
    }

    info!(dest = %dest.display(), size, "Voice asset download complete");
    Ok(size)
}

/// Issue a GET and follow redirects until a non-redirect response arrives.
pub async fn get_following_redirects(client: &Client, url: &str) -> Result<Response, CoreError> {
    let mut current = Url::parse(url).map_err(|e| CoreError::Http {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    loop {
        let response = client
            .get(current.clone())
            .send()
            .await
            .map_err(|e| CoreError::Http {
                url: current.to_string(),
                reason: e.to_string(),
            })?;
        let status = response.status();

        if status.is_redirection() {
            if let Some(next) = redirect_target(&current, &response)? {
                debug!(from = %current, to = %next, status = status.as_u16(), "Following redirect");
                current = next;
                continue;
            }
        }

        if !status.is_success() {
            return Err(CoreError::DownloadFailed {
                url: current.to_string(),
                status: status.as_u16(),
            });
        }

        return Ok(response);
    }
}

fn redirect_target(current: &Url, response: &Response) -> Result<Option<Url>, CoreError> {
    let Some(location) = response.headers().get(LOCATION) else {
        return Ok(None);
    };
    let location = location.to_str().map_err(|e| CoreError::Http {
        url: current.to_string(),
        reason: format!("invalid Location header: {e}"),
    })?;
    current
        .join(location)
        .map(Some)
        .map_err(|e| CoreError::Http {
            url: current.to_string(),
            reason: format!("invalid Location '{location}': {e}"),
        })
}

async fn stream_to_file(
    response: Response,
    dest: &Path,
    total: u64,
    on_progress: ProgressCallback<'_>,
) -> Result<(), CoreError> {
    let url = response.url().to_string();
    let mut file = File::create(dest).await?;
    let mut stream = response.bytes_stream();
    let mut downloaded: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| CoreError::Http {
            url: url.clone(),
            reason: e.to_string(),
        })?;
        file.write_all(&chunk).await?;
        downloaded += chunk.len() as u64;
        on_progress(downloaded, total.max(downloaded));
    }

    file.flush().await?;
    file.sync_all().await?;
    Ok(())
}

async fn remove_if_exists(path: &Path) -> Result<(), CoreError> {
    match fs::remove_file(path).await {
        Ok(()) => {
            debug!(path = %path.display(), "Removed stale file before download");
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

async fn discard_partial(path: &Path) {
    if let Err(e) = fs::remove_file(path).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            warn!(path = %path.display(), error = %e, "Failed to remove partial download");
        }
    }
}
