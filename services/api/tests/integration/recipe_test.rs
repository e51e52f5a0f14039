use uuid::Uuid;

use snapchef_api::domain::types::RecipeFilter;
use snapchef_api::error::ApiError;
use snapchef_api::usecase::like::{LikeRecipeUseCase, UnlikeRecipeUseCase};
use snapchef_api::usecase::recipe::{
    CreateRecipeInput, CreateRecipeUseCase, DeleteRecipeUseCase, GetRecipeUseCase,
    ListRecipesUseCase, UpdateRecipeInput, UpdateRecipeUseCase,
};
use snapchef_domain::pagination::PageRequest;
use snapchef_domain::recipe::RecipeStatus;

use crate::helpers::{
    MockCache, MockLikeRepo, MockRecipeRepo, actor, line, step, test_moderator, test_recipe,
    test_user,
};

fn create_input() -> CreateRecipeInput {
    CreateRecipeInput {
        title: "  Shakshuka ".to_owned(),
        description: Some("".to_owned()),
        cooking_time: 25,
        servings: 2,
        thumbnail_url: None,
        status: None,
        steps: vec![step(2, "Crack the eggs in"), step(1, "Simmer the sauce")],
        ingredients: vec![line("Egg", "4"), line(" Canned  Tomato", "1")],
    }
}

// ── CreateRecipe ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_create_draft_with_sorted_steps_and_normalized_ingredients() {
    let author = test_user("chef");
    let recipes = MockRecipeRepo::default();
    let uc = CreateRecipeUseCase {
        recipes: recipes.clone(),
    };

    let detail = uc.execute(actor(&author), create_input()).await.unwrap();

    assert_eq!(detail.recipe.title, "Shakshuka");
    assert_eq!(detail.recipe.status, RecipeStatus::Draft);
    assert_eq!(detail.recipe.author_id, author.id);
    assert_eq!(detail.recipe.description, None);
    let order: Vec<i32> = detail.steps.iter().map(|s| s.order_index).collect();
    assert_eq!(order, vec![1, 2]);
    assert_eq!(detail.steps[0].content, "Simmer the sauce");
    let names: Vec<&str> = detail.ingredients.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["egg", "canned tomato"]);
    assert!(recipes.get(detail.recipe.id).is_some());
}

#[tokio::test]
async fn should_reject_steps_with_gaps() {
    let uc = CreateRecipeUseCase {
        recipes: MockRecipeRepo::default(),
    };

    let result = uc
        .execute(
            actor(&test_user("chef")),
            CreateRecipeInput {
                steps: vec![step(1, "Boil"), step(3, "Serve")],
                ..create_input()
            },
        )
        .await;
    assert!(
        matches!(result, Err(ApiError::Validation(_))),
        "expected Validation, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_recipe_without_steps() {
    let uc = CreateRecipeUseCase {
        recipes: MockRecipeRepo::default(),
    };

    let result = uc
        .execute(
            actor(&test_user("chef")),
            CreateRecipeInput {
                steps: vec![],
                ..create_input()
            },
        )
        .await;
    assert!(matches!(result, Err(ApiError::Validation(_))));
}

#[tokio::test]
async fn should_reject_duplicate_ingredient_names() {
    let uc = CreateRecipeUseCase {
        recipes: MockRecipeRepo::default(),
    };

    let result = uc
        .execute(
            actor(&test_user("chef")),
            CreateRecipeInput {
                ingredients: vec![line("Garlic", "2"), line("garlic ", "1")],
                ..create_input()
            },
        )
        .await;
    assert!(matches!(result, Err(ApiError::Validation(_))));
}

#[tokio::test]
async fn should_not_let_authors_create_published_recipes() {
    let uc = CreateRecipeUseCase {
        recipes: MockRecipeRepo::default(),
    };

    let result = uc
        .execute(
            actor(&test_user("chef")),
            CreateRecipeInput {
                status: Some(RecipeStatus::Published),
                ..create_input()
            },
        )
        .await;
    assert!(matches!(result, Err(ApiError::Validation(_))));
}

// ── GetRecipe ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_hide_draft_from_strangers_and_anonymous_callers() {
    let author = test_user("chef");
    let draft = test_recipe(author.id, RecipeStatus::Draft);
    let id = draft.recipe.id;
    let uc = GetRecipeUseCase {
        recipes: MockRecipeRepo::new(vec![draft]),
        cache: MockCache::default(),
    };

    let anonymous = uc.execute(None, id).await;
    let stranger = uc.execute(Some(actor(&test_user("stranger"))), id).await;
    assert!(matches!(anonymous, Err(ApiError::RecipeNotFound)));
    assert!(matches!(stranger, Err(ApiError::RecipeNotFound)));

    assert!(uc.execute(Some(actor(&author)), id).await.is_ok());
    assert!(
        uc.execute(Some(actor(&test_moderator("mod"))), id)
            .await
            .is_ok()
    );
}

#[tokio::test]
async fn should_check_visibility_on_cache_hits() {
    let author = test_user("chef");
    let draft = test_recipe(author.id, RecipeStatus::Draft);
    let id = draft.recipe.id;
    let cache = MockCache::default();
    let uc = GetRecipeUseCase {
        recipes: MockRecipeRepo::new(vec![draft]),
        cache: cache.clone(),
    };

    uc.execute(Some(actor(&author)), id).await.unwrap();
    assert!(cache.entries.lock().unwrap().contains_key(&id));

    let result = uc.execute(None, id).await;
    assert!(matches!(result, Err(ApiError::RecipeNotFound)));
}

#[tokio::test]
async fn should_return_not_found_for_unknown_recipe() {
    let uc = GetRecipeUseCase {
        recipes: MockRecipeRepo::default(),
        cache: MockCache::default(),
    };

    let result = uc.execute(None, Uuid::new_v4()).await;
    assert!(matches!(result, Err(ApiError::RecipeNotFound)));
}

// ── ListRecipes ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_list_published_recipes_only() {
    let author = test_user("chef");
    let published = test_recipe(author.id, RecipeStatus::Published);
    let published_id = published.recipe.id;
    let uc = ListRecipesUseCase {
        recipes: MockRecipeRepo::new(vec![
            published,
            test_recipe(author.id, RecipeStatus::Draft),
            test_recipe(author.id, RecipeStatus::Pending),
        ]),
    };

    let page = uc
        .execute(RecipeFilter::default(), PageRequest::default())
        .await
        .unwrap();
    assert_eq!(page.meta.total, 1);
    assert_eq!(page.items[0].recipe.id, published_id);
}

// ── UpdateRecipe ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_only_let_owner_update() {
    let author = test_user("chef");
    let recipe = test_recipe(author.id, RecipeStatus::Published);
    let id = recipe.recipe.id;
    let uc = UpdateRecipeUseCase {
        recipes: MockRecipeRepo::new(vec![recipe]),
        cache: MockCache::default(),
    };

    let result = uc
        .execute(
            actor(&test_user("stranger")),
            id,
            UpdateRecipeInput {
                title: Some("Hijacked".to_owned()),
                ..Default::default()
            },
        )
        .await;
    assert!(
        matches!(result, Err(ApiError::Forbidden)),
        "expected Forbidden, got {result:?}"
    );
}

#[tokio::test]
async fn should_submit_draft_for_review_and_evict_cache() {
    let author = test_user("chef");
    let recipe = test_recipe(author.id, RecipeStatus::Draft);
    let id = recipe.recipe.id;
    let cache = MockCache::default();
    let uc = UpdateRecipeUseCase {
        recipes: MockRecipeRepo::new(vec![recipe]),
        cache: cache.clone(),
    };

    let detail = uc
        .execute(
            actor(&author),
            id,
            UpdateRecipeInput {
                status: Some(RecipeStatus::Pending),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(detail.recipe.status, RecipeStatus::Pending);
    assert!(cache.was_evicted(id));
}

#[tokio::test]
async fn should_refuse_self_publishing() {
    let author = test_user("chef");
    let recipe = test_recipe(author.id, RecipeStatus::Pending);
    let id = recipe.recipe.id;
    let uc = UpdateRecipeUseCase {
        recipes: MockRecipeRepo::new(vec![recipe]),
        cache: MockCache::default(),
    };

    let result = uc
        .execute(
            actor(&author),
            id,
            UpdateRecipeInput {
                status: Some(RecipeStatus::Published),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(
        result,
        Err(ApiError::InvalidStatusTransition {
            from: RecipeStatus::Pending,
            to: RecipeStatus::Published,
        })
    ));
}

#[tokio::test]
async fn should_replace_steps_on_update() {
    let author = test_user("chef");
    let recipe = test_recipe(author.id, RecipeStatus::Draft);
    let id = recipe.recipe.id;
    let recipes = MockRecipeRepo::new(vec![recipe]);
    let uc = UpdateRecipeUseCase {
        recipes: recipes.clone(),
        cache: MockCache::default(),
    };

    uc.execute(
        actor(&author),
        id,
        UpdateRecipeInput {
            steps: Some(vec![step(1, "Just serve")]),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(recipes.get(id).unwrap().steps.len(), 1);
}

#[tokio::test]
async fn should_reject_empty_update() {
    let author = test_user("chef");
    let recipe = test_recipe(author.id, RecipeStatus::Draft);
    let id = recipe.recipe.id;
    let uc = UpdateRecipeUseCase {
        recipes: MockRecipeRepo::new(vec![recipe]),
        cache: MockCache::default(),
    };

    let result = uc
        .execute(actor(&author), id, UpdateRecipeInput::default())
        .await;
    assert!(matches!(result, Err(ApiError::Validation(_))));
}

// ── DeleteRecipe ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_let_moderator_delete_any_recipe() {
    let author = test_user("chef");
    let recipe = test_recipe(author.id, RecipeStatus::Published);
    let id = recipe.recipe.id;
    let recipes = MockRecipeRepo::new(vec![recipe]);
    let cache = MockCache::default();
    let uc = DeleteRecipeUseCase {
        recipes: recipes.clone(),
        cache: cache.clone(),
    };

    let stranger = uc.execute(actor(&test_user("stranger")), id).await;
    assert!(matches!(stranger, Err(ApiError::Forbidden)));

    uc.execute(actor(&test_moderator("mod")), id).await.unwrap();
    assert!(recipes.get(id).is_none());
    assert!(cache.was_evicted(id));
}

// ── Likes ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_like_once_and_unlike() {
    let author = test_user("chef");
    let fan = test_user("fan");
    let recipe = test_recipe(author.id, RecipeStatus::Published);
    let id = recipe.recipe.id;
    let recipes = MockRecipeRepo::new(vec![recipe]);
    let likes = MockLikeRepo::default();
    let like = LikeRecipeUseCase {
        recipes: recipes.clone(),
        likes: likes.clone(),
        cache: MockCache::default(),
    };
    let unlike = UnlikeRecipeUseCase {
        likes: likes.clone(),
        cache: MockCache::default(),
    };

    like.execute(actor(&fan), id).await.unwrap();
    let again = like.execute(actor(&fan), id).await;
    assert!(matches!(again, Err(ApiError::AlreadyLiked)));

    unlike.execute(actor(&fan), id).await.unwrap();
    let missing = unlike.execute(actor(&fan), id).await;
    assert!(matches!(missing, Err(ApiError::LikeNotFound)));
}

#[tokio::test]
async fn should_not_like_hidden_recipe() {
    let author = test_user("chef");
    let draft = test_recipe(author.id, RecipeStatus::Draft);
    let id = draft.recipe.id;
    let like = LikeRecipeUseCase {
        recipes: MockRecipeRepo::new(vec![draft]),
        likes: MockLikeRepo::default(),
        cache: MockCache::default(),
    };

    let result = like.execute(actor(&test_user("fan")), id).await;
    assert!(matches!(result, Err(ApiError::RecipeNotFound)));
}
