use super::errors::DomainError;
use uuid::Uuid;

/// A resource that exactly one actor may mutate or delete.
pub trait Owned {
    fn owner_id(&self) -> Uuid;

    /// Human-readable resource name used in denial messages.
    fn resource_name(&self) -> &'static str;
}

pub fn authorize<R: Owned + ?Sized>(resource: &R, actor: Uuid) -> bool {
    resource.owner_id() == actor
}

/// [`authorize`], turning a denial into [`DomainError::Forbidden`].
pub fn ensure_owner<R: Owned + ?Sized>(
    resource: &R,
    actor: Uuid,
    action: &str,
) -> Result<(), DomainError> {
    if authorize(resource, actor) {
        return Ok(());
    }
    tracing::warn!(
        resource = resource.resource_name(),
        owner = %resource.owner_id(),
        actor = %actor,
        action,
        "ownership check failed"
    );
    Err(DomainError::Forbidden(format!(
        "Not authorized to {} this {}",
        action,
        resource.resource_name()
    )))
}
