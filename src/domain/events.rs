use crate::domain::LocationFix;

#[derive(Debug, Clone, PartialEq)]
pub enum LocationEvent {
    Fix(LocationFix),
    ProviderEnabled(String),
    ProviderDisabled(String),
}
