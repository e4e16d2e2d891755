//! Detail command - full record of one food

use crate::cli::output::{self, colors, format_amount};
use crate::cli::OutputFormat;
use crate::core::services::Services;
use crate::core::types::Entity;
use clap::Args;
use std::sync::Arc;

/// Arguments for the detail command
#[derive(Args, Debug)]
pub struct DetailArgs {
    /// Food identifier (full IRI)
    pub uri: String,
}

/// Execute the detail command
pub fn execute(
    args: DetailArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let Some(entity) = services.search.get_detail(&args.uri)? else {
        return Err(format!(
            "Food '{}' not found. Use 'nutrigraph search' to find identifiers.",
            args.uri
        )
        .into());
    };

    match format {
        OutputFormat::Human => print_entity(&entity),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&entity)?);
        }
    }

    Ok(())
}

fn print_entity(entity: &Entity) {
    println!("{}", colors::name(&entity.name));
    println!("{}", colors::identifier(&entity.uri));
    if let Some(description) = &entity.description {
        println!("\n{description}");
    }
    println!();

    let attributes = [
        ("Class", entity.class_label.as_ref().or(entity.class_id.as_ref())),
        ("Group", entity.food_group.as_ref()),
        ("Type", entity.food_type.as_ref()),
        ("Region", entity.region.as_ref()),
        ("Cooking method", entity.cooking_method.as_ref()),
        ("Spice level", entity.spice_level.as_ref()),
        ("Significance", entity.cultural_significance.as_ref()),
    ];
    for (label, value) in attributes {
        if let Some(value) = value {
            println!("  {:<16}{}", colors::label(label), value);
        }
    }

    let n = &entity.nutrition;
    output::print_header("\nNutrition");
    println!("  {:<16}{}", "Calories", format_amount(n.calories, " kcal"));
    println!("  {:<16}{}", "Protein", format_amount(n.protein, " g"));
    println!("  {:<16}{}", "Carbohydrates", format_amount(n.carbohydrates, " g"));
    println!("  {:<16}{}", "Fat", format_amount(n.fat, " g"));
    println!("  {:<16}{}", "Fiber", format_amount(n.fiber, " g"));
    println!("  {:<16}{}", "Sodium", format_amount(n.sodium, " mg"));
    println!("  {:<16}{}", "Sugar", format_amount(n.sugar, " g"));

    if !entity.ingredients.is_empty() {
        output::print_values("\nIngredients", &entity.ingredients);
    }

    if !entity.images.is_empty() {
        output::print_header(&format!("\nImages ({})", entity.images.len()));
        for image in &entity.images {
            let size = match (image.width, image.height) {
                (Some(w), Some(h)) => format!(" {}", colors::dim(&format!("{w}x{h}"))),
                _ => String::new(),
            };
            println!("  {}{}", image.path, size);
        }
    }
}
