use std::collections::HashSet;

use crate::domain::user::{Capability, UserId};

pub trait Specification {
    fn is_satisfied(&self) -> bool;
}

pub fn has_capability(capabilities: &HashSet<Capability>, resource: &str, action: &str) -> bool {
    capabilities.iter().any(|cap| cap.matches(resource, action))
}

/// Grants `action` on `resource` to holders of `<action>:any`, or to the owner
/// when they hold `<action>:own`.
pub struct OwnedResourceSpec<'a> {
    capabilities: &'a HashSet<Capability>,
    owner_id: &'a UserId,
    actor_id: &'a UserId,
    resource: &'static str,
    action: &'static str,
}

impl<'a> OwnedResourceSpec<'a> {
    pub fn new(
        capabilities: &'a HashSet<Capability>,
        owner_id: &'a UserId,
        actor_id: &'a UserId,
        resource: &'static str,
        action: &'static str,
    ) -> Self {
        Self {
            capabilities,
            owner_id,
            actor_id,
            resource,
            action,
        }
    }
}

impl Specification for OwnedResourceSpec<'_> {
    fn is_satisfied(&self) -> bool {
        let any = format!("{}:any", self.action);
        let own = format!("{}:own", self.action);
        has_capability(self.capabilities, self.resource, &any)
            || (has_capability(self.capabilities, self.resource, &own)
                && self.owner_id == self.actor_id)
    }
}
