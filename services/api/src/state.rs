use axum::extract::FromRef;
use sea_orm::DatabaseConnection;

use snapchef_auth_types::identity::TokenSecret;
use snapchef_domain::pagination::PageRequest;

use crate::infra::cache::RedisCache;
use crate::infra::db::{
    DbCommentRepository, DbFollowRepository, DbIngredientRepository, DbLikeRepository,
    DbRecipeRepository, DbUserRepository,
};
use crate::usecase::auth::TokenIssuer;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub cache: RedisCache,
    pub token_secret: TokenSecret,
    pub access_ttl_secs: u64,
    pub refresh_ttl_secs: u64,
    pub max_page_size: u32,
}

impl FromRef<AppState> for TokenSecret {
    fn from_ref(state: &AppState) -> Self {
        state.token_secret.clone()
    }
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn follow_repo(&self) -> DbFollowRepository {
        DbFollowRepository {
            db: self.db.clone(),
        }
    }

    pub fn recipe_repo(&self) -> DbRecipeRepository {
        DbRecipeRepository {
            db: self.db.clone(),
        }
    }

    pub fn like_repo(&self) -> DbLikeRepository {
        DbLikeRepository {
            db: self.db.clone(),
        }
    }

    pub fn comment_repo(&self) -> DbCommentRepository {
        DbCommentRepository {
            db: self.db.clone(),
        }
    }

    pub fn ingredient_repo(&self) -> DbIngredientRepository {
        DbIngredientRepository {
            db: self.db.clone(),
        }
    }

    pub fn recipe_cache(&self) -> RedisCache {
        self.cache.clone()
    }

    pub fn token_issuer(&self) -> TokenIssuer {
        TokenIssuer {
            secret: self.token_secret.as_str().to_owned(),
            access_ttl_secs: self.access_ttl_secs,
            refresh_ttl_secs: self.refresh_ttl_secs,
        }
    }

    /// Clamp a client page request to the configured maximum.
    pub fn page(&self, request: PageRequest) -> PageRequest {
        request.clamped(self.max_page_size)
    }
}
