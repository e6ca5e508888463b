//! vCenter REST client.
//!
//! Opens a session with basic auth, lists virtual machines, reads per-VM
//! details and guest identity, and closes the session again.

use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use super::models::{GuestIdentity, VmInfo, VmSummary};
use crate::config::VsphereSettings;
use crate::error::RemoteQueryError;
use crate::inventory::{PowerState, VmRecord, VmSource};

const SESSION_HEADER: &str = "vmware-api-session-id";

/// Client for one vCenter server.
pub struct VsphereClient {
    client: Client,
    base_url: String,
    username: String,
    password: String,
    timeout: Duration,
}

impl VsphereClient {
    /// Build a client from connection settings. Does not contact the server.
    pub fn new(settings: &VsphereSettings) -> Result<Self, RemoteQueryError> {
        let timeout = Duration::from_secs(settings.timeout);
        let client = Client::builder()
            .user_agent(concat!("vsphere-inventory/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .danger_accept_invalid_certs(!settings.verify_ssl)
            .build()
            .map_err(|e| RemoteQueryError::Connection {
                host: settings.base_url(),
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            base_url: settings.base_url(),
            username: settings.username.clone(),
            password: settings.password.clone(),
            timeout,
        })
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the configured timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Authenticate and open a session.
    pub fn login(&self) -> Result<Session<'_>, RemoteQueryError> {
        let response = self
            .client
            .post(self.url("/api/session"))
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .map_err(|e| self.transport_error(e))?;
        let response = self.check_status(response, "/api/session")?;

        let token: String = response.json().map_err(|e| RemoteQueryError::Query {
            message: format!("invalid session response: {}", e),
        })?;
        debug!("Opened vSphere session at {}", self.base_url);

        Ok(Session {
            client: self,
            token,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn transport_error(&self, e: reqwest::Error) -> RemoteQueryError {
        if e.is_connect() || e.is_timeout() {
            RemoteQueryError::Connection {
                host: self.base_url.clone(),
                message: e.to_string(),
            }
        } else {
            RemoteQueryError::Query {
                message: e.to_string(),
            }
        }
    }

    fn check_status(&self, response: Response, path: &str) -> Result<Response, RemoteQueryError> {
        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(RemoteQueryError::Authentication {
                    username: self.username.clone(),
                })
            }
            status if !status.is_success() => Err(RemoteQueryError::Query {
                message: format!("HTTP {} from {}", status, path),
            }),
            _ => Ok(response),
        }
    }
}

impl VmSource for VsphereClient {
    fn list_vms(&self) -> Result<Vec<VmRecord>, RemoteQueryError> {
        self.login()?.virtual_machines()
    }
}

/// An authenticated session. Logged out on drop.
pub struct Session<'a> {
    client: &'a VsphereClient,
    token: String,
}

impl Session<'_> {
    /// Read every virtual machine with its details.
    pub fn virtual_machines(&self) -> Result<Vec<VmRecord>, RemoteQueryError> {
        let summaries: Vec<VmSummary> = self.get("/api/vcenter/vm")?;
        debug!("vCenter reports {} virtual machines", summaries.len());

        let mut records = Vec::with_capacity(summaries.len());
        for summary in summaries {
            if let Some(record) = self.record(summary)? {
                records.push(record);
            }
        }
        Ok(records)
    }

    fn record(&self, summary: VmSummary) -> Result<Option<VmRecord>, RemoteQueryError> {
        let info: VmInfo = self.get(&format!("/api/vcenter/vm/{}", summary.vm))?;
        let identity: Option<GuestIdentity> =
            self.get_optional(&format!("/api/vcenter/vm/{}/guest/identity", summary.vm))?;

        let name = identity
            .as_ref()
            .and_then(|id| id.host_name.clone())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| summary.name.clone());
        if name.is_empty() {
            debug!("Skipping unnamed VM {}", summary.vm);
            return Ok(None);
        }

        let state = info.power_state.as_deref().unwrap_or(&summary.power_state);
        let power_state = PowerState::from_api(state).ok_or_else(|| RemoteQueryError::Query {
            message: format!("unknown power state '{}' for {}", state, summary.vm),
        })?;

        let mut record = VmRecord::new(name, power_state);
        record.networks = info.connected_networks();
        record.guest_id = info.guest_id();
        record.instance_uuid = info.identity.and_then(|id| id.instance_uuid);
        if let Some(identity) = identity {
            record.guest_full_name = identity.full_name.map(|m| m.default_message);
            record.ip_address = identity.ip_address.filter(|ip| !ip.is_empty());
        }

        Ok(Some(record))
    }

    fn send_get(&self, path: &str) -> Result<Response, RemoteQueryError> {
        self.client
            .client
            .get(self.client.url(path))
            .header(SESSION_HEADER, &self.token)
            .send()
            .map_err(|e| self.client.transport_error(e))
    }

    fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, RemoteQueryError> {
        let response = self.client.check_status(self.send_get(path)?, path)?;
        decode(response, path)
    }

    /// Like `get`, but a non-auth failure status means "not available".
    fn get_optional<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Option<T>, RemoteQueryError> {
        let response = self.send_get(path)?;
        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                self.client.check_status(response, path).map(|_| None)
            }
            status if !status.is_success() => {
                debug!("{} unavailable: HTTP {}", path, status);
                Ok(None)
            }
            _ => decode(response, path).map(Some),
        }
    }
}

impl Drop for Session<'_> {
    fn drop(&mut self) {
        let result = self
            .client
            .client
            .delete(self.client.url("/api/session"))
            .header(SESSION_HEADER, &self.token)
            .send();
        if let Err(e) = result {
            debug!("Failed to close vSphere session: {}", e);
        }
    }
}

fn decode<T: DeserializeOwned>(response: Response, path: &str) -> Result<T, RemoteQueryError> {
    response.json().map_err(|e| RemoteQueryError::Query {
        message: format!("unexpected response from {}: {}", path, e),
    })
}
