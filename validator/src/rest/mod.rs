//! Beacon API (HTTP/JSON) backend.

use crate::{Error, Genesis, ProposerDuty, SyncStatus, ValidatorClient};
use beacon_types::Epoch;
use reqwest::Url;
use serde::{de::DeserializeOwned, Deserialize};
use std::{future::Future, time::Duration};
use tracing::debug;

const GENESIS_PATH: &str = "/eth/v1/beacon/genesis";
const VERSION_PATH: &str = "/eth/v1/node/version";
const SYNCING_PATH: &str = "/eth/v1/node/syncing";
const PROPOSER_DUTIES_PATH: &str = "/eth/v1/validator/duties/proposer";

/// Every Beacon API response wraps its payload in `data`.
#[derive(Deserialize)]
struct Data<T> {
    data: T,
}

#[derive(Deserialize)]
struct Version {
    version: String,
}

/// [ValidatorClient] backed by the Beacon API.
#[derive(Debug, Clone)]
pub struct RestClient {
    http: reqwest::Client,
    base: String,
    timeout: Duration,
}

impl RestClient {
    /// Create a client for the node at `base`. The URL is not checked until the
    /// first request.
    pub fn new(base: impl Into<String>, timeout: Duration) -> Self {
        Self {
            http: reqwest::Client::new(),
            base: base.into(),
            timeout,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn url(&self, path: &str) -> Result<Url, Error> {
        let joined = format!("{}{}", self.base.trim_end_matches('/'), path);
        Url::parse(&joined).map_err(|e| Error::InvalidUrl(joined, e.to_string()))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!(%url, "requesting");
        let response = self.http.get(url).timeout(self.timeout).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Status(status.as_u16(), body));
        }
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

impl ValidatorClient for RestClient {
    fn genesis(&self) -> impl Future<Output = Result<Genesis, Error>> + Send {
        async move {
            let genesis: Data<Genesis> = self.get(GENESIS_PATH).await?;
            Ok(genesis.data)
        }
    }

    fn node_version(&self) -> impl Future<Output = Result<String, Error>> + Send {
        async move {
            let version: Data<Version> = self.get(VERSION_PATH).await?;
            Ok(version.data.version)
        }
    }

    fn syncing(&self) -> impl Future<Output = Result<SyncStatus, Error>> + Send {
        async move {
            let status: Data<SyncStatus> = self.get(SYNCING_PATH).await?;
            Ok(status.data)
        }
    }

    fn proposer_duties(
        &self,
        epoch: Epoch,
    ) -> impl Future<Output = Result<Vec<ProposerDuty>, Error>> + Send {
        async move {
            let path = format!("{PROPOSER_DUTIES_PATH}/{epoch}");
            let duties: Data<Vec<ProposerDuty>> = self.get(&path).await?;
            Ok(duties.data)
        }
    }
}
