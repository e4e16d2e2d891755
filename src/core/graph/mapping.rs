//! Row to entity conversion.
//!
//! A malformed value only costs the field it belongs to: the conversion
//! failure is logged and the field stays empty. A row without an entity
//! identifier or a name is skipped as a whole.

use super::{Row, Term};
use crate::core::error::{NutriGraphError, Result};
use crate::core::types::{Entity, ImageRef, NutritionProfile};

/// Local name of an IRI: the part after the last `#`, or after the last
/// `/` when there is no fragment.
pub fn local_name(iri: &str) -> &str {
    if let Some((_, fragment)) = iri.rsplit_once('#') {
        return fragment;
    }
    iri.rsplit_once('/').map(|(_, tail)| tail).unwrap_or(iri)
}

/// Convert one binding row to an entity.
///
/// Returns `None` when the row has no `food` or `name` binding.
pub fn entity_from_row(row: &Row) -> Option<Entity> {
    let uri = row.get("food")?.lexical().trim();
    let name = row.get("name")?.lexical().trim();
    if uri.is_empty() || name.is_empty() {
        return None;
    }

    let mut entity = Entity::new(uri, name);

    if let Some(class) = row.get("class") {
        let id = local_name(class.lexical());
        if !id.is_empty() {
            entity.class_id = Some(id.to_string());
        }
    }

    entity.class_label = text(row, "classLabel");
    entity.food_group = text(row, "groupName");
    entity.region = text(row, "region");
    entity.cooking_method = text(row, "cookingMethod");
    entity.spice_level = text(row, "spiceLevel");
    entity.cultural_significance = text(row, "culturalSignificance");
    entity.food_type = text(row, "foodType");
    entity.description = text(row, "description");
    entity.nutrition = nutrition(row, &entity.uri);

    Some(entity)
}

/// Convert one image row. Rows without an image path are skipped.
pub fn image_from_row(row: &Row) -> Option<ImageRef> {
    let path = text(row, "imagePath")?;
    let uri = row
        .get("image")
        .map(|t| t.lexical().to_string())
        .unwrap_or_default();

    Some(ImageRef {
        uri,
        path,
        filename: text(row, "filename"),
        width: dimension(row, "width"),
        height: dimension(row, "height"),
    })
}

/// Collect the non-empty lexical values bound to `var`, in row order
pub fn literal_column(rows: &[Row], var: &str) -> Vec<String> {
    rows.iter().filter_map(|row| text(row, var)).collect()
}

fn text(row: &Row, var: &str) -> Option<String> {
    row.get(var)
        .map(|t| t.lexical().trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn nutrition(row: &Row, uri: &str) -> NutritionProfile {
    let field = |var: &str| match numeric(row, var) {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!("Skipping field on {}: {}", uri, e);
            None
        }
    };

    NutritionProfile {
        calories: field("calories"),
        protein: field("protein"),
        carbohydrates: field("carbohydrates"),
        fat: field("fat"),
        fiber: field("fiber"),
        sodium: field("sodium"),
        sugar: field("sugar"),
    }
}

/// Parse a non-negative numeric literal
fn numeric(row: &Row, var: &str) -> Result<Option<f64>> {
    let Some(term) = row.get(var) else {
        return Ok(None);
    };

    let conversion = |message: String| NutriGraphError::ConversionError {
        field: var.to_string(),
        message,
    };

    if !term.is_literal() {
        return Err(conversion(format!("expected a literal, got {}", describe(term))));
    }

    let raw = term.lexical().trim();
    let value: f64 = raw
        .parse()
        .map_err(|_| conversion(format!("'{raw}' is not a number")))?;

    if !value.is_finite() || value < 0.0 {
        return Err(conversion(format!("'{raw}' is not a non-negative amount")));
    }

    Ok(Some(value))
}

fn dimension(row: &Row, var: &str) -> Option<u32> {
    let raw = row.get(var)?.lexical().trim();
    match raw.parse::<u32>() {
        Ok(v) if v >= 1 => Some(v),
        _ => {
            tracing::debug!("Ignoring image {} '{}'", var, raw);
            None
        }
    }
}

fn describe(term: &Term) -> &'static str {
    match term {
        Term::Iri(_) => "an IRI",
        Term::Literal { .. } => "a literal",
        Term::Blank(_) => "a blank node",
    }
}
