// crates/gitlab-mock-core/src/clients/users.rs
// ============================================================================
// Module: User Facade
// Description: User lookups, queries, and admin-only account management.
// Purpose: Simulate the GitLab users API over the entity store.
// Dependencies: crate::clients, crate::core, crate::runtime
// ============================================================================

//! ## Overview
//! Any existing user may read accounts. Creating, updating, and deleting
//! accounts requires the acting user to be an instance administrator.
//! Deleting a user leaves their releases in place with a dangling author.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::audit::Operation;
use crate::clients::context::ClientContext;
use crate::clients::models::CollectionResponse;
use crate::clients::models::UserCreate;
use crate::clients::models::UserInfo;
use crate::clients::models::UserUpdate;
use crate::core::MockError;
use crate::core::UserId;
use crate::runtime::permissions;
use crate::runtime::query;
use crate::runtime::query::UserQuery;
use crate::runtime::store::NewUser;

// ============================================================================
// SECTION: User Client
// ============================================================================

/// User facade.
#[derive(Clone)]
pub struct UserClient {
    /// Server and acting user.
    context: ClientContext,
}

impl UserClient {
    /// Wraps a client context.
    #[must_use]
    pub(crate) const fn new(context: ClientContext) -> Self {
        Self {
            context,
        }
    }

    /// Returns the acting user.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::NotFound`] when the acting user has been deleted.
    pub fn current(&self) -> Result<UserInfo, MockError> {
        let user = self.context.user();
        self.context.run(Operation::UserCurrent, Some(user.to_string()), |scope| {
            Ok(UserInfo::from(scope.find_user(user)?))
        })
    }

    /// Reads a user by id.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::NotFound`] when either user does not exist.
    pub fn get(&self, id: UserId) -> Result<UserInfo, MockError> {
        let actor = self.context.user();
        self.context.run(Operation::UserGet, Some(id.to_string()), |scope| {
            scope.find_user(actor)?;
            Ok(UserInfo::from(scope.find_user(id)?))
        })
    }

    /// Lists every user in id order.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::NotFound`] when the acting user does not exist.
    pub fn all(&self) -> Result<Vec<UserInfo>, MockError> {
        let actor = self.context.user();
        self.context.run(Operation::UserList, None, |scope| {
            scope.find_user(actor)?;
            Ok(scope.users().map(UserInfo::from).collect())
        })
    }

    /// Searches, sorts, and paginates users.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::NotFound`] when the acting user does not exist.
    pub fn query(&self, user_query: &UserQuery) -> Result<CollectionResponse<UserInfo>, MockError> {
        let actor = self.context.user();
        self.context.run(Operation::UserQuery, user_query.search.clone(), |scope| {
            scope.find_user(actor)?;
            let plan = user_query.plan();
            let items = query::apply(scope.users(), &plan, |user| user_query.matches(user))
                .into_iter()
                .map(UserInfo::from)
                .collect();
            Ok(CollectionResponse::new(items))
        })
    }

    /// Creates a user.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::Forbidden`] for non-admin actors and
    /// [`MockError::Conflict`] when the username is taken.
    pub fn create(&self, data: &UserCreate) -> Result<UserInfo, MockError> {
        let actor = self.context.user();
        self.context.run(Operation::UserCreate, Some(data.username.clone()), |scope| {
            scope.atomically(|state, now| {
                permissions::require_admin(state, actor)?;
                let id = state.add_user(
                    NewUser {
                        username: data.username.clone(),
                        name: data.name.clone(),
                        email: data.email.clone(),
                        is_admin: data.is_admin,
                        bio: data.bio.clone(),
                    },
                    now,
                )?;
                Ok(UserInfo::from(state.find_user(id)?))
            })
        })
    }

    /// Applies the provided fields to a user.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::Forbidden`] for non-admin actors and
    /// [`MockError::NotFound`] when the user does not exist.
    pub fn update(&self, id: UserId, data: &UserUpdate) -> Result<UserInfo, MockError> {
        let actor = self.context.user();
        self.context.run(Operation::UserUpdate, Some(id.to_string()), |scope| {
            scope.atomically(|state, _now| {
                permissions::require_admin(state, actor)?;
                let user = state.find_user_mut(id)?;
                if let Some(name) = &data.name {
                    user.set_name(name.clone());
                }
                if let Some(email) = &data.email {
                    user.set_email(email.clone());
                }
                if let Some(is_admin) = data.is_admin {
                    user.set_admin(is_admin);
                }
                if let Some(bio) = &data.bio {
                    user.set_bio(bio.clone());
                }
                Ok(UserInfo::from(&*user))
            })
        })
    }

    /// Deletes a user.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::Forbidden`] for non-admin actors and
    /// [`MockError::NotFound`] when the user does not exist.
    pub fn delete(&self, id: UserId) -> Result<(), MockError> {
        let actor = self.context.user();
        self.context.run(Operation::UserDelete, Some(id.to_string()), |scope| {
            scope.atomically(|state, _now| {
                permissions::require_admin(state, actor)?;
                state
                    .remove_user(id)
                    .map(|_| ())
                    .ok_or_else(|| MockError::not_found(format!("user {id}")))
            })
        })
    }
}
