use std::io::{Read, Write};
use std::path::Path;

use reqwest::blocking::Client;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::ui::Ui;

const LATEST_URL: &str = "https://developers.eveonline.com/static-data/tranquility/latest.jsonl";
const LATEST_ZIP_URL: &str =
    "https://developers.eveonline.com/static-data/eve-online-static-data-latest-jsonl.zip";
const BUILD_ZIP_URL_PATTERN: &str =
    "https://developers.eveonline.com/static-data/eve-online-static-data-{build}-jsonl.zip";

/// Latest-build metadata published alongside the archive.
#[derive(Debug, Deserialize)]
pub struct SdeInfo {
    #[serde(rename = "buildNumber")]
    pub build_number: u64,
    #[serde(rename = "releaseDate")]
    pub release_date: String,
}

pub struct SdeClient {
    client: Client,
}

impl SdeClient {
    pub fn new() -> Result<Self> {
        let client = Client::builder().user_agent("eve-sde-import").build()?;
        Ok(Self { client })
    }

    /// Fetch the latest SDE build info. The endpoint serves a single JSON
    /// line; only the first line of the body is decoded.
    pub fn fetch_latest_info(&self) -> Result<SdeInfo> {
        let text = self.client.get(LATEST_URL).send()?.error_for_status()?.text()?;

        let line = text
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .ok_or_else(|| Error::VersionUnreadable("empty latest-version response".to_string()))?;

        serde_json::from_str(line)
            .map_err(|e| Error::VersionUnreadable(format!("invalid latest-version response: {}", e)))
    }

    /// Download the archive for a build (or the latest one) to `dest`,
    /// reporting byte progress through the UI.
    pub fn download_zip(&self, build: Option<u64>, dest: &Path, ui: &mut impl Ui) -> Result<()> {
        let url = match build {
            Some(build) => BUILD_ZIP_URL_PATTERN.replace("{build}", &build.to_string()),
            None => LATEST_ZIP_URL.to_string(),
        };

        let mut response = self.client.get(&url).send()?.error_for_status()?;
        let total_size = response.content_length().unwrap_or(0);

        let mut file = std::fs::File::create(dest)?;
        let mut buffer = [0u8; 8192];
        let mut downloaded: u64 = 0;

        loop {
            let bytes_read = response.read(&mut buffer)?;
            if bytes_read == 0 {
                break;
            }

            file.write_all(&buffer[..bytes_read])?;
            downloaded += bytes_read as u64;
            ui.set_progress(downloaded, total_size, format_bytes(downloaded, total_size));
        }

        ui.log("Download complete");
        Ok(())
    }
}

/// Format bytes as human-readable string
fn format_bytes(current: u64, total: u64) -> String {
    fn fmt(bytes: u64) -> String {
        if bytes >= 1_000_000_000 {
            format!("{:.1} GB", bytes as f64 / 1_000_000_000.0)
        } else if bytes >= 1_000_000 {
            format!("{:.1} MB", bytes as f64 / 1_000_000.0)
        } else if bytes >= 1_000 {
            format!("{:.1} KB", bytes as f64 / 1_000.0)
        } else {
            format!("{} B", bytes)
        }
    }
    format!("{} / {}", fmt(current), fmt(total))
}
