//! Droplet and SSH key records as returned by the v1 API.

use super::catalog::{RegionSelector, SizeSelector};
use super::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Identifiers
// ============================================================================

/// Droplet identifier assigned by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct DropletId(pub u64);

/// SSH key identifier assigned by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct SshKeyId(pub u64);

fn parse_id(kind: &str, raw: &str) -> Result<u64> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| Error::InvalidArgument(format!("{kind} id must be an integer, got {raw:?}")))
}

impl DropletId {
    pub fn parse(raw: &str) -> Result<Self> {
        parse_id("droplet", raw).map(Self)
    }
}

impl SshKeyId {
    pub fn parse(raw: &str) -> Result<Self> {
        parse_id("ssh key", raw).map(Self)
    }
}

impl FromStr for DropletId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl FromStr for SshKeyId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for DropletId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for SshKeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Records
// ============================================================================

/// Point-in-time view of a droplet. Never updated in place.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Droplet {
    pub id: DropletId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub image_id: u64,
    #[serde(default)]
    pub size_id: u64,
    #[serde(default)]
    pub region_id: u64,
    #[serde(default)]
    pub backups_active: bool,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub private_ip_address: Option<String>,
    /// True while an action is in flight on the remote side.
    #[serde(default)]
    pub locked: bool,
    /// "new", "active", "off", "archive", or anything else the service adds.
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// SSH public key registered with the account.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SshKey {
    pub id: SshKeyId,
    #[serde(default)]
    pub name: String,
    /// Only populated when the key is fetched on its own.
    #[serde(default)]
    pub ssh_pub_key: Option<String>,
}

/// Parameters for creating a droplet.
#[derive(Debug, Clone)]
pub struct NewDroplet {
    pub name: String,
    pub size: SizeSelector,
    pub image_id: u64,
    pub region: RegionSelector,
    pub ssh_key_ids: Vec<SshKeyId>,
    pub backups_enabled: bool,
    pub private_networking: bool,
}

impl NewDroplet {
    pub fn new(
        name: impl Into<String>,
        size: SizeSelector,
        image_id: u64,
        region: RegionSelector,
    ) -> Self {
        Self {
            name: name.into(),
            size,
            image_id,
            region,
            ssh_key_ids: Vec::new(),
            backups_enabled: false,
            private_networking: false,
        }
    }
}
