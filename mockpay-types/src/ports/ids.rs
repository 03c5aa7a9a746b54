//! Identifier generator port.

use crate::domain::IdKind;

/// Mints caller-visible identifiers.
///
/// Ids have the shape `<prefix>_mock_<digits>` and must be unique for the
/// lifetime of the generator.
pub trait IdGenerator: Send + Sync + 'static {
    /// Returns a fresh id for the given entity kind.
    fn new_id(&self, kind: IdKind) -> String;

    /// Returns a client secret of the form `<intent_id>_secret_<6 alphanumerics>`.
    fn new_secret(&self, intent_id: &str) -> String;
}
