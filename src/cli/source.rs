//! Interactive wrapper around the vSphere client.

use crate::config::VsphereSettings;
use crate::error::RemoteQueryError;
use crate::inventory::{VmRecord, VmSource};
use crate::vsphere::VsphereClient;

/// [`VmSource`] used by the command line.
///
/// Connection setup is deferred until the inventory actually has to be
/// rebuilt, so a cache hit never needs a host or asks for a password.
pub struct InteractiveSource {
    settings: VsphereSettings,
}

impl InteractiveSource {
    pub fn new(settings: VsphereSettings) -> Self {
        Self { settings }
    }

    /// Settings with the password filled in, prompting on a terminal if
    /// none was configured.
    fn resolved_settings(&self) -> Result<VsphereSettings, RemoteQueryError> {
        if self.settings.host.trim().is_empty() {
            return Err(RemoteQueryError::Connection {
                host: String::new(),
                message: "no vSphere host configured (set vsphere.host or --hostname)".into(),
            });
        }

        let mut settings = self.settings.clone();
        if settings.password.is_empty() && console::user_attended_stderr() {
            settings.password = dialoguer::Password::new()
                .with_prompt(format!("vSphere password for {}", settings.username))
                .allow_empty_password(true)
                .interact()
                .map_err(|e| {
                    tracing::debug!("Password prompt failed: {}", e);
                    RemoteQueryError::Authentication {
                        username: settings.username.clone(),
                    }
                })?;
        }
        Ok(settings)
    }
}

impl VmSource for InteractiveSource {
    fn list_vms(&self) -> Result<Vec<VmRecord>, RemoteQueryError> {
        let settings = self.resolved_settings()?;
        tracing::debug!("Querying vSphere at {}", settings.base_url());
        VsphereClient::new(&settings)?.list_vms()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_host_is_a_connection_error() {
        let source = InteractiveSource::new(VsphereSettings::default());
        let err = source.list_vms().unwrap_err();

        assert!(matches!(err, RemoteQueryError::Connection { .. }));
        assert!(err.to_string().contains("no vSphere host configured"));
    }

    #[test]
    fn unreachable_host_is_a_connection_error() {
        let mut settings = VsphereSettings::default();
        settings.host = "http://127.0.0.1:1".into();
        settings.username = "readonly".into();
        settings.password = "secret".into();
        settings.timeout = 2;

        let err = InteractiveSource::new(settings).list_vms().unwrap_err();
        assert!(matches!(err, RemoteQueryError::Connection { .. }));
    }
}
