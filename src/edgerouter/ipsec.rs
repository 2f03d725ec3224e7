// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! strongSwan IPsec state over the vici socket

use crate::error::{AppError, Result};
use futures_util::TryStreamExt;
use futures_util::future::BoxFuture;
use indexmap::IndexMap;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use super::types::IkeSa;

/// One `list-sa` event: IKE SAs keyed by connection name
type SaEvent = IndexMap<String, IkeSa>;

const LIST_SAS: &str = "vici list-sas";

/// Source of the current IKE SAs
pub trait IpsecSource: Send + Sync {
    /// Lists every IKE SA with its CHILD SAs
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Ipsec`] when the daemon cannot be queried and
    /// [`AppError::Cancelled`] once `cancel` fires.
    fn security_associations<'a>(
        &'a self,
        cancel: &'a CancellationToken,
    ) -> BoxFuture<'a, Result<Vec<IkeSa>>>;
}

/// [`IpsecSource`] talking to charon through its vici unix socket
///
/// A missing socket means strongSwan is not running, which yields no SAs.
#[derive(Debug, Clone)]
pub struct ViciClient {
    path: PathBuf,
    timeout: Duration,
}

impl ViciClient {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            path: path.into(),
            timeout,
        }
    }

    async fn list_sas(&self) -> Result<Vec<IkeSa>> {
        let mut client = match rsvici::unix::connect(&self.path).await {
            Ok(client) => client,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("No strongSwan socket at {}: {}", self.path.display(), e);
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(AppError::Ipsec(format!(
                    "failed to connect to {}: {e}",
                    self.path.display()
                )));
            }
        };

        let events: Vec<SaEvent> = client
            .stream_request("list-sas", "list-sa", ())
            .try_collect()
            .await
            .map_err(|e| AppError::Ipsec(format!("list-sas: {e}")))?;

        Ok(flatten_events(events))
    }

    async fn run(&self, cancel: &CancellationToken) -> Result<Vec<IkeSa>> {
        tracing::debug!("Querying IPsec SAs at {}", self.path.display());
        tokio::select! {
            biased;
            () = cancel.cancelled() => Err(AppError::Cancelled {
                command: LIST_SAS.to_string(),
            }),
            result = tokio::time::timeout(self.timeout, self.list_sas()) => match result {
                Ok(sas) => sas,
                Err(_) => Err(AppError::Ipsec(format!(
                    "list-sas timed out after {}s",
                    self.timeout.as_secs()
                ))),
            },
        }
    }
}

impl IpsecSource for ViciClient {
    fn security_associations<'a>(
        &'a self,
        cancel: &'a CancellationToken,
    ) -> BoxFuture<'a, Result<Vec<IkeSa>>> {
        Box::pin(self.run(cancel))
    }
}

/// Flattens `list-sa` events in arrival order, naming each SA after its key
fn flatten_events(events: Vec<SaEvent>) -> Vec<IkeSa> {
    events
        .into_iter()
        .flatten()
        .map(|(name, mut sa)| {
            sa.name = name;
            sa
        })
        .collect()
}
