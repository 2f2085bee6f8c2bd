//! `colsync sync`: initialize a snapshot and replay user toggles.

use std::{fs, path::Path};

use column_sync::{Document, DocumentSnapshot, ReadyState, Selector, SyncConfig, initialize};
use logging::capture::CaptureHandle;
use tokio::runtime::Builder;
use tracing::{debug, info};

use crate::{
    cli::{Format, SelectorArgs, SyncArgs},
    error::{Error, Result},
};

/// Load the configuration named on the command line, or the defaults.
fn load_config(path: Option<&Path>) -> Result<SyncConfig> {
    match path {
        Some(path) => Ok(config::load_from_path(path)?),
        None => Ok(SyncConfig::default()),
    }
}

/// Read a snapshot, choosing the format from the file extension.
fn read_snapshot(path: &Path) -> Result<DocumentSnapshot> {
    let text = fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let snapshot = if is_json {
        DocumentSnapshot::from_json(&text)?
    } else {
        DocumentSnapshot::from_ron(&text)?
    };
    Ok(snapshot)
}

/// Run the `sync` subcommand and return the rendered document.
pub fn run(args: &SyncArgs, events: Option<&CaptureHandle>) -> Result<String> {
    let config = load_config(args.config.as_deref())?;
    let snapshot = read_snapshot(&args.snapshot)?;
    let doc = Document::from_snapshot(&snapshot);
    debug!(elements = doc.len(), path = %args.snapshot.display(), "snapshot_loaded");
    // A snapshot is a finished page; nothing else will end its parse.
    if doc.ready_state() == ReadyState::Loading {
        doc.finish_parsing();
    }

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(Error::Runtime)?;
    let report = runtime.block_on(initialize(&doc, &config));

    for toggle in &args.toggles {
        let fired = doc.toggle(toggle.id, toggle.selected, &config.change_signal)?;
        info!(control = %toggle.id, selected = toggle.selected, listeners = fired, "toggled");
    }

    let rendered = match args.format {
        Format::Ron => doc.snapshot().to_ron()?,
        Format::Json => doc.snapshot().to_json()?,
    };

    if let Some(events) = events {
        for event in events.drain() {
            eprintln!("{event}");
        }
    }
    debug!(
        bound = report.bound(),
        skipped = report.skipped(),
        "sync_complete"
    );
    Ok(rendered)
}

/// Run the `selector` subcommand and return the lines to print.
pub fn selector(args: &SelectorArgs) -> Result<Vec<String>> {
    let config = load_config(args.config.as_deref())?;
    let selector = Selector::attribute_equals(
        &config.table_tag,
        &config.group_attribute,
        &args.group,
    );
    let mut lines = vec![selector.to_string()];
    if let Some(key) = config.show_dataset_key() {
        lines.push(format!("dataset key: {key}"));
    }
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use std::{env, path::PathBuf, process};

    use column_sync::{ElementId, ShowOptional};

    use super::*;
    use crate::cli::Toggle;

    fn write_temp(name: &str, body: &str) -> PathBuf {
        let path = env::temp_dir().join(format!("colsync-{}-{name}", process::id()));
        fs::write(&path, body).unwrap();
        path
    }

    fn page() -> String {
        let doc = Document::new();
        doc.add_control(Some("cols"), false);
        doc.add_table(Some("cols"), ShowOptional::Unset);
        doc.add_table(Some("cols"), ShowOptional::Shown);
        doc.snapshot().to_ron().unwrap()
    }

    #[test]
    fn sync_applies_initial_state_and_toggles() {
        let path = write_temp("page.ron", &page());
        let args = SyncArgs {
            snapshot: path.clone(),
            config: None,
            toggles: vec![Toggle {
                id: ElementId::new(0),
                selected: false,
            }],
            format: Format::Json,
            events: false,
        };
        let out = run(&args, None).unwrap();
        fs::remove_file(&path).ok();

        let snapshot = DocumentSnapshot::from_json(&out).unwrap();
        let result = Document::from_snapshot(&snapshot);
        assert!(!result.element(ElementId::new(0)).unwrap().selected);
        for id in [1, 2] {
            let table = result.element(ElementId::new(id)).unwrap();
            assert_eq!(
                table.attributes.get("data-show-optional").map(String::as_str),
                Some("0")
            );
        }
    }

    #[test]
    fn unknown_toggle_target_is_an_error() {
        let path = write_temp("bad-toggle.ron", &page());
        let args = SyncArgs {
            snapshot: path.clone(),
            config: None,
            toggles: vec![Toggle {
                id: ElementId::new(42),
                selected: true,
            }],
            format: Format::Ron,
            events: false,
        };
        let err = run(&args, None).unwrap_err();
        fs::remove_file(&path).ok();
        assert!(matches!(err, Error::Document(_)));
    }

    #[test]
    fn missing_snapshot_reports_path() {
        let args = SyncArgs {
            snapshot: env::temp_dir().join("colsync-does-not-exist.ron"),
            config: None,
            toggles: Vec::new(),
            format: Format::Ron,
            events: false,
        };
        let err = run(&args, None).unwrap_err();
        assert!(err.to_string().contains("colsync-does-not-exist.ron"));
    }

    #[test]
    fn selector_escapes_group() {
        let lines = selector(&SelectorArgs {
            group: "a\"]b".into(),
            config: None,
        })
        .unwrap();
        assert_eq!(lines[0], "table[data-optional-group=\"a\\\"\\]b\"]");
        assert_eq!(lines[1], "dataset key: showOptional");
    }
}
