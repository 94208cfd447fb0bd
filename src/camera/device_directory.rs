use crate::core::console::Console;
use crate::errors::AppError;
use crate::settings::document::Credential;
use async_trait::async_trait;

/// A camera offered for binding during this run. Not persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceCandidate {
    pub name: String,
    pub id: String, // serial number
}

impl DeviceCandidate {
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Self {
        DeviceCandidate { name: name.into(), id: id.into() }
    }
}

/// Result of a successful authentication + enumeration.
#[derive(Debug, Clone)]
pub struct Discovery {
    /// Credential to persist for the next run.
    pub credential: Credential,
    pub devices: Vec<DeviceCandidate>,
}

/// The cloud account that knows which cameras exist.
///
/// Implementations own their network session; it is released when the
/// directory is dropped.
#[async_trait]
pub trait DeviceDirectory: Send {
    /// Authenticates (reusing `existing` when given, otherwise asking the
    /// operator through `console`) and lists the account's cameras.
    /// Called at most once per session and never retried.
    async fn authenticate_and_discover(
        &mut self,
        existing: Option<Credential>,
        console: &mut dyn Console,
    ) -> Result<Discovery, AppError>;
}
