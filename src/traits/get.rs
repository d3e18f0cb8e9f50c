//! Get trait for fetching single resources.

use async_trait::async_trait;

use crate::client::SoracomClient;
use crate::error::Result;

/// Fetch a single resource by ID.
///
/// Implement this trait for resource types that can be fetched individually
/// by a unique identifier (an IMSI, group ID, handler ID, ...).
///
/// # Example
///
/// ```ignore
/// use soracom::{Get, Subscriber};
///
/// let subscriber = Subscriber::get(&client, "440103000000001".to_string()).await?;
/// ```
#[async_trait]
pub trait Get: Sized {
    /// The ID type for this resource.
    type Id;

    /// Fetch the resource by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource is not found or the request fails.
    async fn get(client: &SoracomClient, id: Self::Id) -> Result<Self>;
}
