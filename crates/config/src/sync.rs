use serde::{Deserialize, Serialize};

use crate::{
    Error,
    defaults::{
        default_change_signal, default_control_tag, default_group_attribute,
        default_show_attribute, default_table_tag,
    },
};

/// Names and policies used to discover controls and tables in a host document.
///
/// Every field has a default, so an empty RON struct `()` is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyncConfig {
    /// Tag name of the toggle control element.
    pub control_tag: String,
    /// Tag name of the table element.
    pub table_tag: String,
    /// Attribute holding the group key on both controls and tables.
    pub group_attribute: String,
    /// Attribute holding the `"0"`/`"1"` visibility flag on tables.
    pub show_attribute: String,
    /// Event a control fires when the user changes its state.
    pub change_signal: String,
    /// Treat an empty group attribute like an absent one.
    ///
    /// Off by default: `""` is a key that only matches other `""` groups.
    pub skip_empty_groups: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            control_tag: default_control_tag(),
            table_tag: default_table_tag(),
            group_attribute: default_group_attribute(),
            show_attribute: default_show_attribute(),
            change_signal: default_change_signal(),
            skip_empty_groups: false,
        }
    }
}

impl SyncConfig {
    /// Reject configurations that could never match an element.
    pub fn validate(&self) -> Result<(), Error> {
        let fields: [(&'static str, &str); 5] = [
            ("control_tag", &self.control_tag),
            ("table_tag", &self.table_tag),
            ("group_attribute", &self.group_attribute),
            ("show_attribute", &self.show_attribute),
            ("change_signal", &self.change_signal),
        ];
        match fields.into_iter().find(|(_, value)| value.is_empty()) {
            Some((field, _)) => Err(Error::Validation { path: None, field }),
            None => Ok(()),
        }
    }

    /// Key under which the show attribute appears in a DOM `dataset`.
    ///
    /// `data-show-optional` becomes `showOptional`. Returns `None` when the
    /// attribute is not a `data-` attribute.
    pub fn show_dataset_key(&self) -> Option<String> {
        let rest = self.show_attribute.strip_prefix("data-")?;
        let mut out = String::with_capacity(rest.len());
        let mut upper = false;
        for ch in rest.chars() {
            if ch == '-' {
                upper = true;
            } else if upper {
                out.extend(ch.to_uppercase());
                upper = false;
            } else {
                out.push(ch);
            }
        }
        Some(out)
    }
}
