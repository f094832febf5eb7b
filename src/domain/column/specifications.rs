use std::collections::HashSet;

use crate::domain::column::entity::Column;
use crate::domain::specification::{OwnedResourceSpec, Specification};
use crate::domain::user::{Capability, UserId};

/// Owners manage their own columns; `columns:manage:any` manages every column.
pub struct CanManageColumnSpec<'a> {
    inner: OwnedResourceSpec<'a>,
}

impl<'a> CanManageColumnSpec<'a> {
    pub fn new(
        capabilities: &'a HashSet<Capability>,
        column: &'a Column,
        user_id: &'a UserId,
    ) -> Self {
        Self {
            inner: OwnedResourceSpec::new(
                capabilities,
                &column.owner_id,
                user_id,
                "columns",
                "manage",
            ),
        }
    }
}

impl Specification for CanManageColumnSpec<'_> {
    fn is_satisfied(&self) -> bool {
        self.inner.is_satisfied()
    }
}
