//! Request building
//!
//! Every v1 call is a GET whose parameters, including the account
//! credentials, travel in the query string. The constructors at the bottom
//! of this file declare one request per catalog operation.

use super::error::{Error, Result};
use super::models::{DropletId, SshKeyId};
use crate::config::Credentials;
use url::Url;

/// Query key carrying the account identifier
pub const CLIENT_ID_PARAM: &str = "client_id";
/// Query key carrying the secret key
pub const API_KEY_PARAM: &str = "api_key";

/// One remote call, before credentials are attached
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    path: String,
    params: Vec<(&'static str, String)>,
}

impl ApiRequest {
    /// Request for `path`, relative to the API base URL
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            params: Vec::new(),
        }
    }

    /// Append a query parameter
    pub fn param(mut self, key: &'static str, value: impl ToString) -> Self {
        self.params.push((key, value.to_string()));
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn params(&self) -> &[(&'static str, String)] {
        &self.params
    }

    /// Fully-qualified URL with credentials first, then operation parameters.
    pub fn build_url(&self, base: &Url, credentials: &Credentials) -> Result<Url> {
        let mut url = base
            .join(&self.path)
            .map_err(|e| Error::InvalidArgument(format!("bad request path {:?}: {e}", self.path)))?;

        {
            let mut query = url.query_pairs_mut();
            query.append_pair(CLIENT_ID_PARAM, &credentials.client_id);
            query.append_pair(API_KEY_PARAM, &credentials.api_key);
            for (key, value) in &self.params {
                query.append_pair(key, value);
            }
        }

        Ok(url)
    }
}

/// Parse a base URL, making sure relative joins land beneath it
pub fn parse_base_url(raw: &str) -> Result<Url> {
    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{raw}/")
    };
    Url::parse(&normalized).map_err(|e| Error::Config(format!("invalid API URL {raw:?}: {e}")))
}

// ============================================================================
// Droplets
// ============================================================================

pub fn list_droplets() -> ApiRequest {
    ApiRequest::new("droplets/")
}

pub fn get_droplet(id: DropletId) -> ApiRequest {
    ApiRequest::new(format!("droplets/{id}/"))
}

/// `size_id` and `region_id` must already be resolved from any slug.
pub fn create_droplet(
    name: &str,
    size_id: u64,
    image_id: u64,
    region_id: u64,
    ssh_key_ids: &[SshKeyId],
    backups_enabled: bool,
    private_networking: bool,
) -> ApiRequest {
    let mut request = ApiRequest::new("droplets/new")
        .param("name", name)
        .param("size_id", size_id)
        .param("image_id", image_id)
        .param("region_id", region_id);

    if !ssh_key_ids.is_empty() {
        let joined = ssh_key_ids
            .iter()
            .map(|k| k.to_string())
            .collect::<Vec<_>>()
            .join(",");
        request = request.param("ssh_key_ids", joined);
    }

    request
        .param("backups_enabled", backups_enabled)
        .param("private_networking", private_networking)
}

pub fn destroy_droplet(id: DropletId, scrub_data: bool) -> ApiRequest {
    let request = ApiRequest::new(format!("droplets/{id}/destroy/"));
    if scrub_data {
        request.param("scrub_data", true)
    } else {
        request
    }
}

pub fn resize_droplet(id: DropletId, size_id: u64) -> ApiRequest {
    ApiRequest::new(format!("droplets/{id}/resize/")).param("size_id", size_id)
}

pub fn reboot_droplet(id: DropletId) -> ApiRequest {
    ApiRequest::new(format!("droplets/{id}/reboot/"))
}

pub fn rebuild_droplet(id: DropletId, image_id: u64) -> ApiRequest {
    ApiRequest::new(format!("droplets/{id}/rebuild/")).param("image_id", image_id)
}

pub fn power_off_droplet(id: DropletId) -> ApiRequest {
    ApiRequest::new(format!("droplets/{id}/power_off/"))
}

pub fn power_on_droplet(id: DropletId) -> ApiRequest {
    ApiRequest::new(format!("droplets/{id}/power_on/"))
}

pub fn snapshot_droplet(id: DropletId, name: &str) -> ApiRequest {
    ApiRequest::new(format!("droplets/{id}/snapshot/")).param("name", name)
}

pub fn restore_droplet(id: DropletId, image_id: u64) -> ApiRequest {
    ApiRequest::new(format!("droplets/{id}/restore/")).param("image_id", image_id)
}

// ============================================================================
// SSH keys
// ============================================================================

pub fn list_ssh_keys() -> ApiRequest {
    ApiRequest::new("ssh_keys/")
}

pub fn get_ssh_key(id: SshKeyId) -> ApiRequest {
    ApiRequest::new(format!("ssh_keys/{id}/"))
}

pub fn add_ssh_key(name: &str, public_key: &str) -> ApiRequest {
    ApiRequest::new("ssh_keys/new/")
        .param("name", name)
        .param("ssh_pub_key", public_key)
}

pub fn destroy_ssh_key(id: SshKeyId) -> ApiRequest {
    ApiRequest::new(format!("ssh_keys/{id}/destroy/"))
}
