//! sea-orm entities for the SnapChef relational schema.

pub mod comments;
pub mod follows;
pub mod ingredients;
pub mod likes;
pub mod recipe_ingredients;
pub mod recipes;
pub mod steps;
pub mod users;
