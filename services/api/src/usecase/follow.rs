use uuid::Uuid;

use snapchef_domain::pagination::{Page, PageRequest};

use crate::domain::repository::{FollowRepository, UserRepository};
use crate::domain::types::UserSummary;
use crate::error::ApiError;

pub struct FollowUseCase<U: UserRepository, F: FollowRepository> {
    pub users: U,
    pub follows: F,
}

impl<U: UserRepository, F: FollowRepository> FollowUseCase<U, F> {
    pub async fn execute(&self, follower_id: Uuid, target_id: Uuid) -> Result<(), ApiError> {
        if follower_id == target_id {
            return Err(ApiError::CannotFollowSelf);
        }
        if self.users.find_by_id(target_id).await?.is_none() {
            return Err(ApiError::UserNotFound);
        }
        if self.follows.exists(follower_id, target_id).await? {
            return Err(ApiError::AlreadyFollowing);
        }
        self.follows.create(follower_id, target_id).await
    }
}

pub struct UnfollowUseCase<F: FollowRepository> {
    pub follows: F,
}

impl<F: FollowRepository> UnfollowUseCase<F> {
    pub async fn execute(&self, follower_id: Uuid, target_id: Uuid) -> Result<(), ApiError> {
        if !self.follows.delete(follower_id, target_id).await? {
            return Err(ApiError::FollowNotFound);
        }
        Ok(())
    }
}

/// Which side of the follow graph to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowDirection {
    Followers,
    Following,
}

pub struct ListFollowsUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> ListFollowsUseCase<U> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        direction: FollowDirection,
        page: PageRequest,
    ) -> Result<Page<UserSummary>, ApiError> {
        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(ApiError::UserNotFound);
        }
        match direction {
            FollowDirection::Followers => self.users.list_followers(user_id, page).await,
            FollowDirection::Following => self.users.list_following(user_id, page).await,
        }
    }
}
