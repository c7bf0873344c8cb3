//! Config file loading

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_yaml::Value;
use std::fs;
use std::path::Path;

use super::error::LoadError;
use super::expand::expand_env;
use crate::metrics::ConfigHashGauge;
use crate::utils::sha256_hex;

/// Load the YAML config at `path` into `target` and return its fingerprint.
///
/// The fingerprint is taken over the file exactly as read and published to
/// `sink` before anything else happens to the bytes, so it never reflects
/// env expansion and is still recorded when parsing fails afterwards.
///
/// The document is merged over the current contents of `target`: keys present
/// in the file replace the corresponding values, absent keys keep theirs.
/// Unknown keys are rejected. On any error `target` is left untouched.
pub fn load_config<T>(
    path: &Path,
    expand: bool,
    target: &mut T,
    sink: &ConfigHashGauge,
) -> Result<String, LoadError>
where
    T: Serialize + DeserializeOwned,
{
    let mut buf =
        fs::read(path).map_err(|source| LoadError::Read { path: path.to_path_buf(), source })?;

    let fingerprint = sha256_hex(&buf);
    sink.observe(&fingerprint);
    tracing::debug!(path = %path.display(), sha256 = %fingerprint, "config file read");

    if expand {
        buf = expand_env(&buf);
    }

    let merged = merge_document(&buf, target)
        .map_err(|source| LoadError::Parse { path: path.to_path_buf(), source })?;
    *target = merged;

    Ok(fingerprint)
}

fn merge_document<T>(content: &[u8], current: &T) -> Result<T, serde_yaml::Error>
where
    T: Serialize + DeserializeOwned,
{
    let mut base = serde_yaml::to_value(current)?;

    // An empty file is a valid document that changes nothing.
    if !content.iter().all(u8::is_ascii_whitespace) {
        let mut document: Value = serde_yaml::from_slice(content)?;
        // Resolve `<<: *anchor` merge keys; they are not fields of the target.
        document.apply_merge()?;
        merge_value(&mut base, document);
    }

    serde_yaml::from_value(base)
}

/// Overlay `overlay` onto `base`. Mappings merge key by key, `null` leaves the
/// base value alone, everything else replaces it.
fn merge_value(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (_, Value::Null) => {}
        (Value::Mapping(base_map), Value::Mapping(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(existing) => merge_value(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}
