// # Resource Trait
//
// The lifecycle contract a host runtime drives: one callback per step, each
// receiving the instance's [`ResourceData`] handle.
//
// ## Implementations
//
// - LTM node: `ltm-resource-node` crate

use async_trait::async_trait;

use crate::schema::ResourceSchema;
use crate::traits::ResourceData;

/// Trait for managed resource types
///
/// Every callback either fully succeeds or fails with the instance's
/// identity left as documented on the implementation. Callbacks hold no state
/// between invocations; everything persistent lives in [`ResourceData`].
#[async_trait]
pub trait Resource: Send + Sync {
    /// Resource type name, e.g. `bigip_ltm_node`
    fn type_name(&self) -> &'static str;

    /// Attribute schema of this resource type
    fn schema(&self) -> &ResourceSchema;

    /// Create the remote object described by `data`
    async fn create(&self, data: &mut dyn ResourceData) -> Result<(), crate::Error>;

    /// Refresh `data` from the remote object
    async fn read(&self, data: &mut dyn ResourceData) -> Result<(), crate::Error>;

    /// Push changed attributes of `data` to the remote object
    async fn update(&self, data: &mut dyn ResourceData) -> Result<(), crate::Error>;

    /// Remove the remote object
    async fn delete(&self, data: &mut dyn ResourceData) -> Result<(), crate::Error>;

    /// Adopt an existing remote object
    ///
    /// The default passes the id through as the identity and reads the
    /// object. If it does not exist the identity ends up cleared.
    async fn import(&self, id: &str, data: &mut dyn ResourceData) -> Result<(), crate::Error> {
        data.set_id(id);
        self.read(data).await
    }
}
