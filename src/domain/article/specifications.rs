use std::collections::HashSet;

use crate::domain::article::entity::Article;
use crate::domain::specification::{OwnedResourceSpec, Specification};
use crate::domain::user::value_objects::{Capability, UserId};

pub struct CanUpdateArticleSpec<'a> {
    inner: OwnedResourceSpec<'a>,
}

impl<'a> CanUpdateArticleSpec<'a> {
    pub fn new(
        capabilities: &'a HashSet<Capability>,
        article: &'a Article,
        user_id: &'a UserId,
    ) -> Self {
        Self {
            inner: OwnedResourceSpec::new(
                capabilities,
                &article.author_id,
                user_id,
                "articles",
                "update",
            ),
        }
    }
}

impl Specification for CanUpdateArticleSpec<'_> {
    fn is_satisfied(&self) -> bool {
        self.inner.is_satisfied()
    }
}

pub struct CanDeleteArticleSpec<'a> {
    inner: OwnedResourceSpec<'a>,
}

impl<'a> CanDeleteArticleSpec<'a> {
    pub fn new(
        capabilities: &'a HashSet<Capability>,
        article: &'a Article,
        user_id: &'a UserId,
    ) -> Self {
        Self {
            inner: OwnedResourceSpec::new(
                capabilities,
                &article.author_id,
                user_id,
                "articles",
                "delete",
            ),
        }
    }
}

impl Specification for CanDeleteArticleSpec<'_> {
    fn is_satisfied(&self) -> bool {
        self.inner.is_satisfied()
    }
}
