//! Download raw csv files from the KNMI.

use std::path::{Path, PathBuf};

use log::info;
use reqwest::{blocking::Client, StatusCode};

use crate::{config::Config, errors::KnmiDataErr, mode::DataMode};

/// Downloads data files into a data directory.
#[derive(Debug)]
pub struct Fetcher {
    client: Client,
    config: Config,
    data_dir: PathBuf,
}

impl Fetcher {
    /// Create a fetcher that stores its downloads in `data_dir`.
    pub fn new(config: Config, data_dir: &Path) -> Self {
        Fetcher {
            client: Client::new(),
            config,
            data_dir: data_dir.to_path_buf(),
        }
    }

    /// Download the data for all stations.
    ///
    /// `start` and `end` are formatted as YYYYMMDD or YYYYMMDDHH. Any response other than 200 OK
    /// is an error carrying the body of the response. Returns the path of the stored file.
    pub fn fetch(
        &self,
        mode: DataMode,
        start: Option<&str>,
        end: Option<&str>,
    ) -> Result<PathBuf, KnmiDataErr> {
        let url = self.config.url(mode);
        info!("downloading {} weather information from {}", mode, url);

        let response = self
            .client
            .get(url)
            .query(&Self::query(start, end))
            .send()?;

        if response.status() != StatusCode::OK {
            let status = response.status();
            let body = response.text()?;
            log::error!("download failed with status {}", status);
            return Err(KnmiDataErr::Download(body));
        }

        let body = response.bytes()?;
        let path = self.data_dir.join(mode.file_name());
        std::fs::write(&path, &body)?;

        info!(
            "weather information {} has been downloaded to {}",
            mode,
            path.display()
        );
        Ok(path)
    }

    fn query<'a>(start: Option<&'a str>, end: Option<&'a str>) -> Vec<(&'static str, &'a str)> {
        let mut params = vec![("stns", "ALL")];
        if let Some(start) = start {
            params.push(("start", start));
        }
        if let Some(end) = end {
            params.push(("end", end));
        }
        params
    }
}
