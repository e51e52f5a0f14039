use uuid::Uuid;

use snapchef_api::domain::types::CommentChanges;
use snapchef_api::error::ApiError;
use snapchef_api::usecase::comment::{
    CreateCommentInput, CreateCommentUseCase, DeleteCommentUseCase, ListCommentsUseCase,
    UpdateCommentUseCase,
};
use snapchef_domain::pagination::PageRequest;
use snapchef_domain::recipe::RecipeStatus;

use crate::helpers::{
    MockCache, MockCommentRepo, MockRecipeRepo, actor, test_comment, test_moderator, test_recipe,
    test_user,
};

// ── DeleteComment ────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_let_comment_author_delete() {
    let chef = test_user("chef");
    let guest = test_user("guest");
    let recipe = test_recipe(chef.id, RecipeStatus::Published);
    let comment = test_comment(recipe.recipe.id, guest.id);
    let (recipe_id, comment_id) = (recipe.recipe.id, comment.id);
    let comments = MockCommentRepo::new(vec![comment]);
    let cache = MockCache::default();
    let uc = DeleteCommentUseCase {
        recipes: MockRecipeRepo::new(vec![recipe]),
        comments: comments.clone(),
        cache: cache.clone(),
    };

    uc.execute(actor(&guest), recipe_id, comment_id)
        .await
        .unwrap();
    assert_eq!(comments.count(), 0);
    assert!(cache.was_evicted(recipe_id));
}

#[tokio::test]
async fn should_let_recipe_author_delete_any_comment_on_it() {
    let chef = test_user("chef");
    let recipe = test_recipe(chef.id, RecipeStatus::Published);
    let comment = test_comment(recipe.recipe.id, test_user("guest").id);
    let (recipe_id, comment_id) = (recipe.recipe.id, comment.id);
    let comments = MockCommentRepo::new(vec![comment]);
    let uc = DeleteCommentUseCase {
        recipes: MockRecipeRepo::new(vec![recipe]),
        comments: comments.clone(),
        cache: MockCache::default(),
    };

    uc.execute(actor(&chef), recipe_id, comment_id).await.unwrap();
    assert_eq!(comments.count(), 0);
}

#[tokio::test]
async fn should_forbid_anyone_else_from_deleting() {
    let chef = test_user("chef");
    let recipe = test_recipe(chef.id, RecipeStatus::Published);
    let comment = test_comment(recipe.recipe.id, test_user("guest").id);
    let (recipe_id, comment_id) = (recipe.recipe.id, comment.id);
    let comments = MockCommentRepo::new(vec![comment]);
    let uc = DeleteCommentUseCase {
        recipes: MockRecipeRepo::new(vec![recipe]),
        comments: comments.clone(),
        cache: MockCache::default(),
    };

    let stranger = uc
        .execute(actor(&test_user("stranger")), recipe_id, comment_id)
        .await;
    let moderator = uc
        .execute(actor(&test_moderator("mod")), recipe_id, comment_id)
        .await;

    assert!(
        matches!(stranger, Err(ApiError::Forbidden)),
        "expected Forbidden, got {stranger:?}"
    );
    assert!(matches!(moderator, Err(ApiError::Forbidden)));
    assert_eq!(comments.count(), 1);
}

#[tokio::test]
async fn should_not_find_comment_under_another_recipe() {
    let chef = test_user("chef");
    let recipe = test_recipe(chef.id, RecipeStatus::Published);
    let other = test_recipe(chef.id, RecipeStatus::Published);
    let comment = test_comment(recipe.recipe.id, chef.id);
    let (other_id, comment_id) = (other.recipe.id, comment.id);
    let uc = DeleteCommentUseCase {
        recipes: MockRecipeRepo::new(vec![recipe, other]),
        comments: MockCommentRepo::new(vec![comment]),
        cache: MockCache::default(),
    };

    let result = uc.execute(actor(&chef), other_id, comment_id).await;
    assert!(matches!(result, Err(ApiError::CommentNotFound)));
}

// ── CreateComment / UpdateComment ────────────────────────────────────────────

#[tokio::test]
async fn should_create_comment_and_evict_recipe() {
    let chef = test_user("chef");
    let guest = test_user("guest");
    let recipe = test_recipe(chef.id, RecipeStatus::Published);
    let recipe_id = recipe.recipe.id;
    let cache = MockCache::default();
    let uc = CreateCommentUseCase {
        recipes: MockRecipeRepo::new(vec![recipe]),
        comments: MockCommentRepo::default(),
        cache: cache.clone(),
    };

    let created = uc
        .execute(
            actor(&guest),
            recipe_id,
            CreateCommentInput {
                content: "  Made it twice this week ".to_owned(),
                rating: 4,
            },
        )
        .await
        .unwrap();
    assert_eq!(created.comment.content, "Made it twice this week");
    assert_eq!(created.comment.user_id, guest.id);
    assert!(cache.was_evicted(recipe_id));
}

#[tokio::test]
async fn should_reject_rating_out_of_range() {
    let chef = test_user("chef");
    let recipe = test_recipe(chef.id, RecipeStatus::Published);
    let recipe_id = recipe.recipe.id;
    let uc = CreateCommentUseCase {
        recipes: MockRecipeRepo::new(vec![recipe]),
        comments: MockCommentRepo::default(),
        cache: MockCache::default(),
    };

    let result = uc
        .execute(
            actor(&chef),
            recipe_id,
            CreateCommentInput {
                content: "Great".to_owned(),
                rating: 6,
            },
        )
        .await;
    assert!(matches!(result, Err(ApiError::Validation(_))));
}

#[tokio::test]
async fn should_not_comment_on_hidden_recipe() {
    let chef = test_user("chef");
    let draft = test_recipe(chef.id, RecipeStatus::Draft);
    let recipe_id = draft.recipe.id;
    let uc = CreateCommentUseCase {
        recipes: MockRecipeRepo::new(vec![draft]),
        comments: MockCommentRepo::default(),
        cache: MockCache::default(),
    };

    let result = uc
        .execute(
            actor(&test_user("guest")),
            recipe_id,
            CreateCommentInput {
                content: "First!".to_owned(),
                rating: 5,
            },
        )
        .await;
    assert!(matches!(result, Err(ApiError::RecipeNotFound)));
}

#[tokio::test]
async fn should_only_let_comment_author_edit() {
    let chef = test_user("chef");
    let guest = test_user("guest");
    let recipe = test_recipe(chef.id, RecipeStatus::Published);
    let comment = test_comment(recipe.recipe.id, guest.id);
    let (recipe_id, comment_id) = (recipe.recipe.id, comment.id);
    let uc = UpdateCommentUseCase {
        comments: MockCommentRepo::new(vec![comment]),
        cache: MockCache::default(),
    };
    let changes = || CommentChanges {
        content: None,
        rating: Some(2),
    };

    let by_recipe_author = uc
        .execute(actor(&chef), recipe_id, comment_id, changes())
        .await;
    assert!(matches!(by_recipe_author, Err(ApiError::Forbidden)));

    let updated = uc
        .execute(actor(&guest), recipe_id, comment_id, changes())
        .await
        .unwrap();
    assert_eq!(updated.comment.rating, 2);
    assert_eq!(updated.comment.content, "Lovely");
}

// ── ListComments ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_list_newest_comment_first() {
    let chef = test_user("chef");
    let recipe = test_recipe(chef.id, RecipeStatus::Published);
    let recipe_id = recipe.recipe.id;
    let older = test_comment(recipe_id, chef.id);
    let newer = test_comment(recipe_id, chef.id);
    let newer_id = newer.id;
    let uc = ListCommentsUseCase {
        recipes: MockRecipeRepo::new(vec![recipe]),
        comments: MockCommentRepo::new(vec![older, newer]),
    };

    let page = uc
        .execute(None, recipe_id, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(page.meta.total, 2);
    assert_eq!(page.items[0].comment.id, newer_id);
}

#[tokio::test]
async fn should_not_list_comments_of_unknown_recipe() {
    let uc = ListCommentsUseCase {
        recipes: MockRecipeRepo::default(),
        comments: MockCommentRepo::default(),
    };

    let result = uc.execute(None, Uuid::new_v4(), PageRequest::default()).await;
    assert!(matches!(result, Err(ApiError::RecipeNotFound)));
}
