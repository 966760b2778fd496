//! Droplet API client
//!
//! One method per catalog operation. Each one builds a request, sends it and
//! decodes the envelope through [`ApiClient::invoke`].
//!
//! The service executes actions asynchronously: `Ok(())` from an action
//! method means the request was *accepted*, not that the droplet has reached
//! its new state.

use super::catalog::SizeSelector;
use super::envelope::{self, Payload};
use super::error::Result;
use super::http::HttpTransport;
use super::models::{Droplet, DropletId, NewDroplet, SshKey, SshKeyId};
use super::request::{self, parse_base_url, ApiRequest};
use crate::config::Credentials;
use url::Url;

/// Authenticated client for the v1 droplet and SSH key endpoints
#[derive(Clone)]
pub struct ApiClient {
    credentials: Credentials,
    base_url: Url,
    http: HttpTransport,
}

impl ApiClient {
    /// Create a client from loaded credentials
    pub fn new(credentials: &Credentials) -> Result<Self> {
        credentials.validate()?;
        let base_url = parse_base_url(credentials.api_url())?;
        let http = HttpTransport::new(credentials.timeout())?;

        Ok(Self {
            credentials: credentials.clone(),
            base_url,
            http,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Send one request and decode its payload as `P`
    pub async fn invoke<P: Payload>(&self, request: ApiRequest) -> Result<P> {
        let url = request.build_url(&self.base_url, &self.credentials)?;
        let body = self.http.get(&url).await?;
        envelope::decode(&body)
    }

    // =========================================================================
    // Droplets
    // =========================================================================

    pub async fn list_droplets(&self) -> Result<Vec<Droplet>> {
        self.invoke(request::list_droplets()).await
    }

    pub async fn get_droplet(&self, id: DropletId) -> Result<Droplet> {
        self.invoke(request::get_droplet(id)).await
    }

    /// Request a new droplet. Size and region slugs are resolved first, so
    /// an unknown slug fails without touching the network.
    pub async fn create_droplet(&self, spec: &NewDroplet) -> Result<Droplet> {
        let size_id = spec.size.resolve()?;
        let region_id = spec.region.resolve()?;

        let droplet: Droplet = self
            .invoke(request::create_droplet(
                &spec.name,
                size_id,
                spec.image_id,
                region_id,
                &spec.ssh_key_ids,
                spec.backups_enabled,
                spec.private_networking,
            ))
            .await?;

        tracing::info!("Create accepted for {} (id {})", droplet.name, droplet.id);
        Ok(droplet)
    }

    /// Irreversible. `scrub_data` asks the service to wipe the disk.
    pub async fn destroy_droplet(&self, id: DropletId, scrub_data: bool) -> Result<()> {
        self.action(request::destroy_droplet(id, scrub_data), "destroy", id).await
    }

    pub async fn resize_droplet(&self, id: DropletId, size: &SizeSelector) -> Result<()> {
        let size_id = size.resolve()?;
        self.action(request::resize_droplet(id, size_id), "resize", id).await
    }

    pub async fn reboot_droplet(&self, id: DropletId) -> Result<()> {
        self.action(request::reboot_droplet(id), "reboot", id).await
    }

    /// Reinstall from `image_id`, keeping the droplet's IP address.
    pub async fn rebuild_droplet(&self, id: DropletId, image_id: u64) -> Result<()> {
        self.action(request::rebuild_droplet(id, image_id), "rebuild", id).await
    }

    pub async fn power_off_droplet(&self, id: DropletId) -> Result<()> {
        self.action(request::power_off_droplet(id), "power_off", id).await
    }

    pub async fn power_on_droplet(&self, id: DropletId) -> Result<()> {
        self.action(request::power_on_droplet(id), "power_on", id).await
    }

    /// The service may power-cycle the droplet to take the snapshot.
    pub async fn snapshot_droplet(&self, id: DropletId, name: &str) -> Result<()> {
        self.action(request::snapshot_droplet(id, name), "snapshot", id).await
    }

    pub async fn restore_droplet(&self, id: DropletId, image_id: u64) -> Result<()> {
        self.action(request::restore_droplet(id, image_id), "restore", id).await
    }

    async fn action(&self, request: ApiRequest, name: &str, id: DropletId) -> Result<()> {
        self.invoke::<()>(request).await?;
        tracing::info!("{} accepted for droplet {}", name, id);
        Ok(())
    }

    // =========================================================================
    // SSH keys
    // =========================================================================

    pub async fn list_ssh_keys(&self) -> Result<Vec<SshKey>> {
        self.invoke(request::list_ssh_keys()).await
    }

    pub async fn get_ssh_key(&self, id: SshKeyId) -> Result<SshKey> {
        self.invoke(request::get_ssh_key(id)).await
    }

    pub async fn add_ssh_key(&self, name: &str, public_key: &str) -> Result<SshKey> {
        self.invoke(request::add_ssh_key(name, public_key.trim())).await
    }

    pub async fn destroy_ssh_key(&self, id: SshKeyId) -> Result<()> {
        self.invoke::<()>(request::destroy_ssh_key(id)).await?;
        tracing::info!("Removed ssh key {}", id);
        Ok(())
    }
}
