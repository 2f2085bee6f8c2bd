//! Parse and load configuration files.

use std::{ffi::OsStr, fs, path::Path};

use tracing::debug;

use crate::{Error, SyncConfig};

/// Parse and validate a `SyncConfig` from RON text.
pub fn from_ron_str(text: &str) -> Result<SyncConfig, Error> {
    let cfg: SyncConfig = ron::from_str(text).map_err(|e| Error::Parse {
        path: None,
        message: e.to_string(),
    })?;
    cfg.validate()?;
    Ok(cfg)
}

/// Load a `SyncConfig` from a `.ron` file at `path`.
pub fn load_from_path(path: &Path) -> Result<SyncConfig, Error> {
    if path.extension() != Some(OsStr::new("ron")) {
        return Err(Error::Read {
            path: Some(path.to_path_buf()),
            message: "Unsupported config format (expected a .ron file)".to_string(),
        });
    }
    let text = fs::read_to_string(path).map_err(|e| Error::Read {
        path: Some(path.to_path_buf()),
        message: e.to_string(),
    })?;
    let cfg = from_ron_str(&text).map_err(|e| e.with_path(path))?;
    debug!(path = %path.display(), control_tag = %cfg.control_tag, "config_loaded");
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use std::{env, process};

    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let cfg = from_ron_str("(control_tag: \"x-toggle\", skip_empty_groups: true)").unwrap();
        assert_eq!(cfg.control_tag, "x-toggle");
        assert!(cfg.skip_empty_groups);
        assert_eq!(cfg.table_tag, "table");
        assert_eq!(cfg.change_signal, "input");
    }

    #[test]
    fn unknown_field_is_a_parse_error() {
        let err = from_ron_str("(colour: \"red\")").unwrap_err();
        assert!(matches!(err, Error::Parse { path: None, .. }));
    }

    #[test]
    fn wrong_extension_is_rejected() {
        let err = load_from_path(Path::new("columns.toml")).unwrap_err();
        assert!(matches!(err, Error::Read { .. }));
        assert_eq!(err.path(), Some(Path::new("columns.toml")));
    }

    #[test]
    fn file_errors_carry_the_path() {
        let path = env::temp_dir().join(format!("column-sync-cfg-{}.ron", process::id()));
        fs::write(&path, "(table_tag: \"\")").unwrap();
        let err = load_from_path(&path).unwrap_err();
        fs::remove_file(&path).ok();
        assert!(matches!(
            err,
            Error::Validation {
                field: "table_tag",
                ..
            }
        ));
        assert_eq!(err.path(), Some(path.as_path()));
        assert!(err.pretty().contains("table_tag"));
    }
}
