use axum::{
    Router,
    routing::{get, patch, post},
};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use snapchef_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    auth::{login, refresh, signup},
    comment::{create_comment, delete_comment, list_comments, update_comment},
    health::{healthz, readyz},
    ingredient::search_ingredients,
    like::{like_recipe, unlike_recipe},
    moderation::{list_queue, moderate_recipe, set_user_active},
    recipe::{create_recipe, delete_recipe, get_recipe, list_recipes, update_recipe},
    user::{
        follow_user, get_me, get_user, list_followers, list_following, list_user_recipes,
        my_feed, my_likes, unfollow_user, update_me,
    },
};
use crate::state::AppState;

fn api_routes() -> Router<AppState> {
    Router::new()
        // Auth
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
        .route("/auth/me", get(get_me))
        // Users
        .route("/users/me", get(get_me).patch(update_me))
        .route("/users/me/feed", get(my_feed))
        .route("/users/me/likes", get(my_likes))
        .route("/users/{id}", get(get_user))
        .route("/users/{id}/recipes", get(list_user_recipes))
        .route("/users/{id}/follow", post(follow_user).delete(unfollow_user))
        .route("/users/{id}/followers", get(list_followers))
        .route("/users/{id}/following", get(list_following))
        // Recipes
        .route("/recipes", get(list_recipes).post(create_recipe))
        .route(
            "/recipes/{id}",
            get(get_recipe).patch(update_recipe).delete(delete_recipe),
        )
        .route("/recipes/{id}/like", post(like_recipe).delete(unlike_recipe))
        .route(
            "/recipes/{id}/comments",
            get(list_comments).post(create_comment),
        )
        .route(
            "/recipes/{id}/comments/{comment_id}",
            patch(update_comment).delete(delete_comment),
        )
        // Moderation
        .route("/moderation/recipes", get(list_queue))
        .route("/moderation/recipes/{id}", patch(moderate_recipe))
        .route("/moderation/users/{id}", patch(set_user_active))
        // Ingredients
        .route("/ingredients", get(search_ingredients))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .nest("/api", api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(TraceLayer::new_for_http())
                .layer(propagate_request_id_layer())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
