use crate::application::{
    dto::AuthenticatedUser,
    error::{ApplicationError, ApplicationResult},
};
use crate::domain::specification::Specification;

pub(super) fn ensure_capability(
    actor: &AuthenticatedUser,
    resource: &str,
    action: &str,
) -> ApplicationResult<()> {
    if actor.has_capability(resource, action) {
        Ok(())
    } else {
        Err(ApplicationError::forbidden(format!(
            "missing capability {resource}:{action}"
        )))
    }
}

pub(super) fn ensure_spec(spec: &impl Specification, message: &str) -> ApplicationResult<()> {
    if spec.is_satisfied() {
        Ok(())
    } else {
        Err(ApplicationError::forbidden(message))
    }
}
