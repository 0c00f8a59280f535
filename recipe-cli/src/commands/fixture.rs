//! Fixture command - load seed data and show what it produced

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;

use recipe_core::services::{FixtureReport, RecipeDetail};
use recipe_core::{Ingredient, Tag, User};

use super::get_context;
use crate::output;

#[derive(Serialize)]
struct UserCatalog {
    user: User,
    tags: Vec<Tag>,
    ingredients: Vec<Ingredient>,
    recipes: Vec<RecipeDetail>,
}

#[derive(Serialize)]
struct FixtureOutput {
    created: FixtureReport,
    users: Vec<UserCatalog>,
}

pub fn run(file: &Path, json: bool) -> Result<()> {
    let ctx = get_context()?;

    let report = ctx
        .fixture_service
        .load_file(file)
        .with_context(|| format!("Failed to load fixture {:?}", file))?;

    let mut catalogs = Vec::new();
    for user in ctx.user_service.list()? {
        let tags = ctx.catalog_service.list_tags(user.id)?;
        let ingredients = ctx.catalog_service.list_ingredients(user.id)?;
        let mut recipes = Vec::new();
        for recipe in ctx.catalog_service.list_recipes(user.id)? {
            recipes.push(ctx.catalog_service.recipe_detail(recipe.id)?);
        }
        catalogs.push(UserCatalog {
            user,
            tags,
            ingredients,
            recipes,
        });
    }

    if json {
        let out = FixtureOutput {
            created: report,
            users: catalogs,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!(
        "{} Loaded {} user(s), {} tag(s), {} ingredient(s), {} recipe(s)",
        "✓".green(),
        report.users,
        report.tags,
        report.ingredients,
        report.recipes
    );

    let mut users = output::create_table();
    users.set_header(vec!["Email", "Name", "Staff", "Superuser"]);
    for catalog in &catalogs {
        let user = &catalog.user;
        users.add_row(vec![
            user.to_string(),
            user.name.clone(),
            output::yes_no(user.is_staff).to_string(),
            output::yes_no(user.is_superuser).to_string(),
        ]);
    }
    println!();
    println!("{}", "Users".bold());
    println!("{}", users);

    let mut recipes = output::create_table();
    recipes.set_header(vec!["Owner", "Title", "Minutes", "Price", "Tags", "Ingredients", "Image"]);
    for catalog in &catalogs {
        for detail in &catalog.recipes {
            recipes.add_row(vec![
                catalog.user.to_string(),
                detail.recipe.to_string(),
                detail.recipe.time_minutes.to_string(),
                detail.recipe.price.to_string(),
                output::join_display(&detail.tags),
                output::join_display(&detail.ingredients),
                detail.recipe.image.clone().unwrap_or_default(),
            ]);
        }
    }
    println!();
    println!("{}", "Recipes".bold());
    println!("{}", recipes);

    let unused: Vec<String> = catalogs
        .iter()
        .flat_map(|c| {
            c.tags
                .iter()
                .filter(|t| !c.recipes.iter().any(|r| r.recipe.tags.contains(&t.id)))
                .map(|t| t.to_string())
        })
        .collect();
    if !unused.is_empty() {
        println!();
        output::warning(&format!("Tags not used by any recipe: {}", unused.join(", ")));
    }

    Ok(())
}
