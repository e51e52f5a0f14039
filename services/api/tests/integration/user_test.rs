use uuid::Uuid;

use snapchef_api::domain::repository::{FollowRepository, LikeRepository};
use snapchef_api::error::ApiError;
use snapchef_api::usecase::user::{
    FeedUseCase, GetProfileUseCase, LikedRecipesUseCase, ListUserRecipesUseCase,
    UpdateProfileInput, UpdateProfileUseCase,
};
use snapchef_domain::pagination::PageRequest;
use snapchef_domain::recipe::RecipeStatus;

use crate::helpers::{
    MockCache, MockLikeRepo, MockRecipeRepo, MockUserRepo, actor, test_recipe, test_user,
};

// ── Profile ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_count_followers_and_following_in_profile() {
    let alice = test_user("alice");
    let bob = test_user("bob");
    let carol = test_user("carol");
    let users = MockUserRepo::new(vec![alice.clone(), bob.clone(), carol.clone()]);
    let follows = users.follow_repo();
    follows.create(alice.id, bob.id).await.unwrap();
    follows.create(carol.id, bob.id).await.unwrap();
    follows.create(bob.id, alice.id).await.unwrap();
    let uc = GetProfileUseCase { repo: users };

    let (user, stats) = uc.execute(bob.id).await.unwrap();
    assert_eq!(user.username, "bob");
    assert_eq!(stats.followers, 2);
    assert_eq!(stats.following, 1);

    let (_, stats) = uc.execute(carol.id).await.unwrap();
    assert_eq!(stats.followers, 0);
    assert_eq!(stats.following, 1);
}

#[tokio::test]
async fn should_return_user_not_found_for_unknown_profile() {
    let uc = GetProfileUseCase {
        repo: MockUserRepo::default(),
    };

    let result = uc.execute(Uuid::new_v4()).await;
    assert!(matches!(result, Err(ApiError::UserNotFound)));
}

#[tokio::test]
async fn should_reject_username_held_by_someone_else() {
    let alice = test_user("alice");
    let bob = test_user("bob");
    let uc = UpdateProfileUseCase {
        repo: MockUserRepo::new(vec![alice.clone(), bob]),
        recipes: MockRecipeRepo::default(),
        cache: MockCache::default(),
    };

    let result = uc
        .execute(
            alice.id,
            UpdateProfileInput {
                username: Some("bob".to_owned()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(ApiError::UsernameTaken)));
}

#[tokio::test]
async fn should_clear_bio_with_empty_string() {
    let mut alice = test_user("alice");
    alice.bio = Some("Pastry nerd".to_owned());
    let uc = UpdateProfileUseCase {
        repo: MockUserRepo::new(vec![alice.clone()]),
        recipes: MockRecipeRepo::default(),
        cache: MockCache::default(),
    };

    let updated = uc
        .execute(
            alice.id,
            UpdateProfileInput {
                bio: Some("   ".to_owned()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.bio, None);
}

#[tokio::test]
async fn should_evict_cached_recipes_when_username_changes() {
    let alice = test_user("alice");
    let bob = test_user("bob");
    let draft = test_recipe(alice.id, RecipeStatus::Draft);
    let published = test_recipe(alice.id, RecipeStatus::Published);
    let other = test_recipe(bob.id, RecipeStatus::Published);
    let ids = (draft.recipe.id, published.recipe.id, other.recipe.id);
    let cache = MockCache::default();
    let uc = UpdateProfileUseCase {
        repo: MockUserRepo::new(vec![alice.clone(), bob]),
        recipes: MockRecipeRepo::new(vec![draft, published, other]),
        cache: cache.clone(),
    };

    let updated = uc
        .execute(
            alice.id,
            UpdateProfileInput {
                username: Some("alice_bakes".to_owned()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.username, "alice_bakes");
    assert!(cache.was_evicted(ids.0));
    assert!(cache.was_evicted(ids.1));
    assert!(!cache.was_evicted(ids.2));
}

#[tokio::test]
async fn should_keep_cached_recipes_when_only_bio_changes() {
    let alice = test_user("alice");
    let recipe = test_recipe(alice.id, RecipeStatus::Published);
    let id = recipe.recipe.id;
    let cache = MockCache::default();
    let uc = UpdateProfileUseCase {
        repo: MockUserRepo::new(vec![alice.clone()]),
        recipes: MockRecipeRepo::new(vec![recipe]),
        cache: cache.clone(),
    };

    uc.execute(
        alice.id,
        UpdateProfileInput {
            bio: Some("Weeknight pasta".to_owned()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert!(!cache.was_evicted(id));
}

// ── Author recipes ───────────────────────────────────────────────────────────

#[tokio::test]
async fn should_show_unpublished_recipes_to_their_author_only() {
    let chef = test_user("chef");
    let stranger = test_user("stranger");
    let uc = ListUserRecipesUseCase {
        users: MockUserRepo::new(vec![chef.clone(), stranger.clone()]),
        recipes: MockRecipeRepo::new(vec![
            test_recipe(chef.id, RecipeStatus::Draft),
            test_recipe(chef.id, RecipeStatus::Pending),
            test_recipe(chef.id, RecipeStatus::Rejected),
            test_recipe(chef.id, RecipeStatus::Published),
            test_recipe(stranger.id, RecipeStatus::Published),
        ]),
    };

    let own = uc
        .execute(Some(actor(&chef)), chef.id, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(own.meta.total, 4);
    assert!(own.items.iter().all(|c| c.recipe.author_id == chef.id));

    let seen_by_stranger = uc
        .execute(Some(actor(&stranger)), chef.id, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(seen_by_stranger.meta.total, 1);
    assert_eq!(seen_by_stranger.items[0].recipe.status, RecipeStatus::Published);

    let anonymous = uc
        .execute(None, chef.id, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(anonymous.meta.total, 1);
    assert_eq!(anonymous.items[0].recipe.status, RecipeStatus::Published);
}

#[tokio::test]
async fn should_return_user_not_found_for_unknown_author() {
    let uc = ListUserRecipesUseCase {
        users: MockUserRepo::default(),
        recipes: MockRecipeRepo::default(),
    };

    let result = uc.execute(None, Uuid::new_v4(), PageRequest::default()).await;
    assert!(matches!(result, Err(ApiError::UserNotFound)));
}

// ── Feed / Likes ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_build_feed_from_followed_authors_published_recipes() {
    let alice = test_user("alice");
    let bob = test_user("bob");
    let carol = test_user("carol");
    let users = MockUserRepo::new(vec![alice.clone(), bob.clone(), carol.clone()]);
    users.follow_repo().create(alice.id, bob.id).await.unwrap();
    let older = test_recipe(bob.id, RecipeStatus::Published);
    let draft = test_recipe(bob.id, RecipeStatus::Draft);
    let newer = test_recipe(bob.id, RecipeStatus::Published);
    let unfollowed = test_recipe(carol.id, RecipeStatus::Published);
    let expected = vec![newer.recipe.id, older.recipe.id];
    let uc = FeedUseCase {
        recipes: MockRecipeRepo::new(vec![older, draft, newer, unfollowed])
            .with_social(&users, &MockLikeRepo::default()),
    };

    let feed = uc.execute(alice.id, PageRequest::default()).await.unwrap();
    let ids: Vec<Uuid> = feed.items.iter().map(|c| c.recipe.id).collect();
    assert_eq!(ids, expected);
}

#[tokio::test]
async fn should_list_liked_recipes_visible_to_the_caller() {
    let alice = test_user("alice");
    let bob = test_user("bob");
    let users = MockUserRepo::new(vec![alice.clone(), bob.clone()]);
    let likes = MockLikeRepo::default();
    let first = test_recipe(bob.id, RecipeStatus::Published);
    let withdrawn = test_recipe(bob.id, RecipeStatus::Draft);
    let own_draft = test_recipe(alice.id, RecipeStatus::Draft);
    let bobs_only = test_recipe(bob.id, RecipeStatus::Published);
    likes.create(alice.id, first.recipe.id).await.unwrap();
    likes.create(alice.id, withdrawn.recipe.id).await.unwrap();
    likes.create(alice.id, own_draft.recipe.id).await.unwrap();
    likes.create(bob.id, bobs_only.recipe.id).await.unwrap();
    let expected = vec![own_draft.recipe.id, first.recipe.id];
    let uc = LikedRecipesUseCase {
        recipes: MockRecipeRepo::new(vec![first, withdrawn, own_draft, bobs_only])
            .with_social(&users, &likes),
    };

    let liked = uc.execute(alice.id, PageRequest::default()).await.unwrap();
    let ids: Vec<Uuid> = liked.items.iter().map(|c| c.recipe.id).collect();
    assert_eq!(ids, expected, "newest like first, hidden recipes dropped");
}
