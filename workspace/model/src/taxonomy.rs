//! Three-level product taxonomy: category → subcategory → vertical.
//!
//! The taxonomy is read from a flat `super_category,category,sub_category,vertical`
//! table. Every level keeps the order in which names first appear in the table.

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{ModelError, Result};

/// Marker used in the table for a subcategory without any vertical.
const NULL_VERTICAL: &str = "\\N";

#[derive(Debug, Deserialize)]
struct TaxonomyRow {
    #[allow(dead_code)]
    super_category: String,
    category: String,
    sub_category: String,
    vertical: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubcategoryNode {
    pub name: String,
    pub verticals: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryNode {
    pub name: String,
    pub subcategories: Vec<SubcategoryNode>,
}

impl CategoryNode {
    fn subcategory(&self, name: &str) -> Option<&SubcategoryNode> {
        self.subcategories.iter().find(|sub| sub.name == name)
    }
}

/// A normalised details-page filter selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub category: String,
    pub subcategory: String,
    pub vertical: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Taxonomy {
    categories: Vec<CategoryNode>,
}

impl Taxonomy {
    /// Parses the taxonomy table; the first line is a header.
    pub fn parse(table: &str) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(table.as_bytes());

        let mut categories: Vec<CategoryNode> = Vec::new();
        for row in reader.deserialize::<TaxonomyRow>() {
            let row = row?;

            let ci = match categories.iter().position(|c| c.name == row.category) {
                Some(index) => index,
                None => {
                    categories.push(CategoryNode {
                        name: row.category.clone(),
                        subcategories: Vec::new(),
                    });
                    categories.len() - 1
                }
            };
            let category = &mut categories[ci];

            let si = match category
                .subcategories
                .iter()
                .position(|s| s.name == row.sub_category)
            {
                Some(index) => index,
                None => {
                    category.subcategories.push(SubcategoryNode {
                        name: row.sub_category.clone(),
                        verticals: Vec::new(),
                    });
                    category.subcategories.len() - 1
                }
            };
            let subcategory = &mut category.subcategories[si];

            if row.vertical.is_empty() || row.vertical == NULL_VERTICAL {
                continue;
            }
            if !subcategory.verticals.contains(&row.vertical) {
                subcategory.verticals.push(row.vertical);
            }
        }

        debug!("Parsed taxonomy with {} categories", categories.len());
        Ok(Self { categories })
    }

    pub fn nodes(&self) -> &[CategoryNode] {
        &self.categories
    }

    pub fn categories(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.name.as_str()).collect()
    }

    /// Subcategories of a category; empty for unknown categories.
    pub fn subcategories(&self, category: &str) -> Vec<&str> {
        self.category(category)
            .map(|c| c.subcategories.iter().map(|s| s.name.as_str()).collect())
            .unwrap_or_default()
    }

    /// Verticals of a subcategory; empty for unknown keys.
    pub fn verticals(&self, category: &str, subcategory: &str) -> Vec<&str> {
        self.category(category)
            .and_then(|c| c.subcategory(subcategory))
            .map(|s| s.verticals.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Normalises a filter selection: an invalid subcategory falls back to the
    /// category's first subcategory, an invalid vertical to the first vertical.
    pub fn resolve(
        &self,
        category: &str,
        subcategory: &str,
        vertical: Option<&str>,
    ) -> Result<Selection> {
        let node = self
            .category(category)
            .ok_or_else(|| ModelError::UnknownCategory(category.to_string()))?;

        let sub = match node.subcategory(subcategory) {
            Some(sub) => sub,
            None => {
                let fallback = node
                    .subcategories
                    .first()
                    .ok_or_else(|| ModelError::UnknownCategory(category.to_string()))?;
                warn!(
                    "Subcategory '{}' is not part of '{}', using '{}'",
                    subcategory, category, fallback.name
                );
                fallback
            }
        };

        let vertical = match vertical {
            Some(v) if sub.verticals.iter().any(|known| known == v) => Some(v.to_string()),
            _ => sub.verticals.first().cloned(),
        };

        Ok(Selection {
            category: node.name.clone(),
            subcategory: sub.name.clone(),
            vertical,
        })
    }

    fn category(&self, name: &str) -> Option<&CategoryNode> {
        self.categories.iter().find(|c| c.name == name)
    }
}
