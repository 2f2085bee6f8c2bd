// Defaults matching the Material web switch markup

pub(crate) const CONTROL_TAG: &str = "md-switch";
pub(crate) const TABLE_TAG: &str = "table";
pub(crate) const GROUP_ATTRIBUTE: &str = "data-optional-group";
pub(crate) const SHOW_ATTRIBUTE: &str = "data-show-optional";
pub(crate) const CHANGE_SIGNAL: &str = "input";

// Serde default functions
pub(crate) fn default_control_tag() -> String {
    CONTROL_TAG.to_string()
}
pub(crate) fn default_table_tag() -> String {
    TABLE_TAG.to_string()
}
pub(crate) fn default_group_attribute() -> String {
    GROUP_ATTRIBUTE.to_string()
}
pub(crate) fn default_show_attribute() -> String {
    SHOW_ATTRIBUTE.to_string()
}
pub(crate) fn default_change_signal() -> String {
    CHANGE_SIGNAL.to_string()
}
