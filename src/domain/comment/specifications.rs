use std::collections::HashSet;

use crate::domain::comment::entity::Comment;
use crate::domain::specification::{OwnedResourceSpec, Specification};
use crate::domain::user::{Capability, UserId};

pub struct CanDeleteCommentSpec<'a> {
    inner: OwnedResourceSpec<'a>,
}

impl<'a> CanDeleteCommentSpec<'a> {
    pub fn new(
        capabilities: &'a HashSet<Capability>,
        comment: &'a Comment,
        user_id: &'a UserId,
    ) -> Self {
        Self {
            inner: OwnedResourceSpec::new(
                capabilities,
                &comment.user_id,
                user_id,
                "comments",
                "delete",
            ),
        }
    }
}

impl Specification for CanDeleteCommentSpec<'_> {
    fn is_satisfied(&self) -> bool {
        self.inner.is_satisfied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::comment::entity::tests::comment;
    use crate::domain::user::Role;

    #[test]
    fn owner_and_moderator_may_delete() {
        let target = comment(1, None, None);
        let owner = target.user_id.clone();
        let stranger = UserId::new("someone-else").unwrap();

        let member = Role::Member.default_capabilities();
        let moderator = Role::Moderator.default_capabilities();

        assert!(CanDeleteCommentSpec::new(&member, &target, &owner).is_satisfied());
        assert!(!CanDeleteCommentSpec::new(&member, &target, &stranger).is_satisfied());
        assert!(CanDeleteCommentSpec::new(&moderator, &target, &stranger).is_satisfied());
    }
}
