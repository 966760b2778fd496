//! Command dispatch
//!
//! Maps parsed subcommands onto client calls and renders the results as
//! text. Confirmations for actions say the request was accepted; the
//! service finishes the work on its own schedule.

use crate::api::catalog::{RegionSelector, SizeSelector, REGIONS, SIZES};
use crate::api::models::{Droplet, DropletId, NewDroplet, SshKey, SshKeyId};
use crate::api::{ApiClient, Error, Result};
use crate::cli::Command;
use crate::config::{CredentialStore, Credentials};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// Run a command that needs no API access
///
/// Returns `None` when `command` must go through [`execute`] instead.
pub fn execute_local(command: &Command, store: &CredentialStore) -> Option<Result<String>> {
    match command {
        Command::Configure {
            client_id,
            api_key,
            api_url,
        } => {
            let mut credentials = Credentials::new(client_id.as_str(), api_key.as_str());
            credentials.api_url = api_url.clone();
            Some(
                store
                    .save(&credentials)
                    .map(|()| format!("Wrote credentials to {}\n", store.path().display())),
            )
        }
        Command::Sizes => Some(Ok(render_table("Sizes", SIZES))),
        Command::Regions => Some(Ok(render_table("Regions", REGIONS))),
        _ => None,
    }
}

/// Run a command against the API and return its output
pub async fn execute(command: &Command, client: &ApiClient) -> Result<String> {
    match command {
        Command::Droplets => {
            let droplets = client.list_droplets().await?;
            Ok(render_droplets(&droplets))
        }
        Command::Info { id } => {
            let droplet = client.get_droplet(DropletId::parse(id)?).await?;
            Ok(render_droplet(&droplet))
        }
        Command::Create {
            name,
            size,
            image,
            region,
            keys,
            backups,
            private_networking,
        } => {
            let mut spec = NewDroplet::new(
                name.as_str(),
                size.parse::<SizeSelector>()?,
                parse_image(image)?,
                region.parse::<RegionSelector>()?,
            );
            spec.ssh_key_ids = keys
                .iter()
                .map(|k| SshKeyId::parse(k))
                .collect::<Result<Vec<_>>>()?;
            spec.backups_enabled = *backups;
            spec.private_networking = *private_networking;

            let droplet = client.create_droplet(&spec).await?;
            Ok(format!(
                "Queued {} for creation (id: {}, status: {})\n",
                droplet.name, droplet.id, droplet.status
            ))
        }
        Command::Destroy { id, scrub } => {
            let id = DropletId::parse(id)?;
            client.destroy_droplet(id, *scrub).await?;
            Ok(format!("Droplet {id} queued for destruction\n"))
        }
        Command::Resize { id, size } => {
            let id = DropletId::parse(id)?;
            let size = size.parse::<SizeSelector>()?;
            client.resize_droplet(id, &size).await?;
            Ok(format!("Resize of droplet {id} to size {} accepted\n", size.0))
        }
        Command::Reboot { id } => {
            let id = DropletId::parse(id)?;
            client.reboot_droplet(id).await?;
            Ok(format!("Reboot of droplet {id} accepted\n"))
        }
        Command::Rebuild { id, image } => {
            let id = DropletId::parse(id)?;
            let image_id = parse_image(image)?;
            client.rebuild_droplet(id, image_id).await?;
            Ok(format!("Rebuild of droplet {id} from image {image_id} accepted\n"))
        }
        Command::Off { id } => {
            let id = DropletId::parse(id)?;
            client.power_off_droplet(id).await?;
            Ok(format!("Power off of droplet {id} accepted\n"))
        }
        Command::On { id } => {
            let id = DropletId::parse(id)?;
            client.power_on_droplet(id).await?;
            Ok(format!("Power on of droplet {id} accepted\n"))
        }
        Command::Snapshot { id, name } => {
            let id = DropletId::parse(id)?;
            client.snapshot_droplet(id, name).await?;
            Ok(format!("Snapshot {name:?} of droplet {id} accepted\n"))
        }
        Command::Restore { id, image } => {
            let id = DropletId::parse(id)?;
            let image_id = parse_image(image)?;
            client.restore_droplet(id, image_id).await?;
            Ok(format!("Restore of droplet {id} from image {image_id} accepted\n"))
        }
        Command::Keys { id: None } => {
            let keys = client.list_ssh_keys().await?;
            Ok(render_keys(&keys))
        }
        Command::Keys { id: Some(id) } => {
            let key = client.get_ssh_key(SshKeyId::parse(id)?).await?;
            Ok(render_public_key(&key))
        }
        Command::AddKey { name, path } => {
            let public_key = read_public_key(path)?;
            let key = client.add_ssh_key(name, &public_key).await?;
            Ok(format!("Added ssh key {} (id: {})\n", key.name, key.id))
        }
        Command::RemoveKey { id } => {
            let id = SshKeyId::parse(id)?;
            client.destroy_ssh_key(id).await?;
            Ok(format!("Removed ssh key {id}\n"))
        }
        Command::Configure { .. } | Command::Sizes | Command::Regions => Err(
            Error::InvalidArgument("command does not use the API".to_string()),
        ),
    }
}

fn parse_image(raw: &str) -> Result<u64> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| Error::InvalidArgument(format!("image id must be an integer, got {raw:?}")))
}

/// Expand a leading `~/` against the home directory
fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}

fn read_public_key(path: &Path) -> Result<String> {
    let path = expand_home(path);
    let content = std::fs::read_to_string(&path).map_err(|e| {
        Error::InvalidArgument(format!("cannot read key file {}: {e}", path.display()))
    })?;
    if content.trim().is_empty() {
        return Err(Error::InvalidArgument(format!(
            "key file {} is empty",
            path.display()
        )));
    }
    Ok(content)
}

fn render_table(title: &str, table: &[(&str, u64)]) -> String {
    let mut out = format!("{title}:\n");
    for (slug, id) in table {
        let _ = writeln!(out, "{slug:<8} (id: {id})");
    }
    out
}

fn render_droplets(droplets: &[Droplet]) -> String {
    let mut out = String::from("Droplets:\n");
    for d in droplets {
        let _ = writeln!(
            out,
            "{} (id: {} region: {} image_id: {} ip: {:?} status: {})",
            d.name,
            d.id,
            d.region_id,
            d.image_id,
            d.ip_address.as_deref().unwrap_or(""),
            d.status
        );
    }
    out
}

fn render_droplet(d: &Droplet) -> String {
    let created = d
        .created_at
        .map(|t| t.to_rfc3339())
        .unwrap_or_else(|| "-".to_string());

    let mut out = String::new();
    let _ = writeln!(out, "Droplet:\t {}", d.name);
    let _ = writeln!(out, "ID:\t {}", d.id);
    let _ = writeln!(out, "Image ID:\t {}", d.image_id);
    let _ = writeln!(out, "Size ID:\t {}", d.size_id);
    let _ = writeln!(out, "Region ID:\t {}", d.region_id);
    let _ = writeln!(out, "Backups Active:\t {}", d.backups_active);
    let _ = writeln!(out, "IP Address:\t {:?}", d.ip_address.as_deref().unwrap_or(""));
    let _ = writeln!(
        out,
        "Private IP Address:\t {:?}",
        d.private_ip_address.as_deref().unwrap_or("")
    );
    let _ = writeln!(out, "Locked:\t {}", d.locked);
    let _ = writeln!(out, "Status:\t {}", d.status);
    let _ = writeln!(out, "Created At:\t {created}");
    out
}

fn render_public_key(key: &SshKey) -> String {
    match key.ssh_pub_key.as_deref().map(str::trim) {
        Some(material) if !material.is_empty() => format!("{material}\n"),
        _ => format!(
            "{} (id: {}): no public key material returned\n",
            key.name, key.id
        ),
    }
}

fn render_keys(keys: &[SshKey]) -> String {
    let mut out = String::from("SSH Keys:\n");
    for k in keys {
        let _ = writeln!(out, "{} (id: {})", k.name, k.id);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_home_leaves_absolute_paths() {
        assert_eq!(expand_home(Path::new("/tmp/id.pub")), PathBuf::from("/tmp/id.pub"));
    }

    #[test]
    fn test_read_public_key_rejects_missing_file() {
        let err = read_public_key(Path::new("/nonexistent/id_rsa.pub")).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_public_key_without_material_says_so() {
        let key = SshKey {
            id: SshKeyId(10),
            name: "office".to_string(),
            ssh_pub_key: None,
        };
        assert_eq!(
            render_public_key(&key),
            "office (id: 10): no public key material returned\n"
        );

        let blank = SshKey {
            ssh_pub_key: Some("  ".to_string()),
            ..key
        };
        assert!(render_public_key(&blank).contains("no public key material"));
    }

    #[test]
    fn test_render_table_lists_every_slug() {
        let out = render_table("Sizes", SIZES);
        assert!(out.starts_with("Sizes:\n"));
        assert!(out.contains("512mb"));
        assert_eq!(out.lines().count(), SIZES.len() + 1);
    }

    #[test]
    fn test_regions_runs_locally() {
        let store = CredentialStore::new("/nonexistent/.fish");
        let out = execute_local(&Command::Regions, &store).unwrap().unwrap();
        assert!(out.contains("nyc2"));
        assert!(execute_local(&Command::Droplets, &store).is_none());
    }
}
