use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
}

impl Product {
    pub fn ingredients_preview(&self) -> String {
        create_preview(&self.ingredients.join(", "))
    }
}

/// In-memory product list searched by the ingredient resolver.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Ok(Self { products })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// The grocery list shipped with the app.
    pub fn builtin() -> Self {
        let entries: &[(&str, Option<&str>, &str, &[&str])] = &[
            ("Organic Bananas", Some("Fresh Farms"), "Produce", &["organic banana"]),
            ("Banana Bread", Some("Hearth Bakery"), "Bakery", &["banana", "wheat flour", "cane sugar", "eggs", "butter"]),
            ("Organic Banana Chips", Some("Sunny Snacks"), "Snacks", &["organic banana", "organic coconut oil", "organic cane sugar"]),
            ("Strawberry Banana Smoothie", Some("Blendworks"), "Beverages", &["strawberry", "banana", "apple juice", "yogurt"]),
            ("Honeycrisp Apples", Some("Fresh Farms"), "Produce", &["apple"]),
            ("Organic Gala Apples", Some("Fresh Farms"), "Produce", &["organic apple"]),
            ("Unsweetened Applesauce", Some("Orchard Lane"), "Pantry", &["apple", "water", "ascorbic acid"]),
            ("Apple Cider Vinegar", Some("Orchard Lane"), "Pantry", &["apple cider vinegar"]),
            ("Organic Whole Milk", Some("Green Pasture"), "Dairy", &["organic milk", "vitamin d3"]),
            ("Greek Yogurt Plain", Some("Green Pasture"), "Dairy", &["milk", "live cultures"]),
            ("Sourdough Loaf", Some("Hearth Bakery"), "Bakery", &["wheat flour", "water", "salt", "sourdough culture"]),
            ("Organic Rolled Oats", Some("Prairie Mill"), "Pantry", &["organic oats"]),
            ("Peanut Butter Creamy", Some("Nutty Co"), "Pantry", &["peanuts", "salt"]),
            ("Almond Butter", Some("Nutty Co"), "Pantry", &["almonds"]),
            ("Baby Spinach", Some("Leafline"), "Produce", &["spinach"]),
            ("Organic Carrots", Some("Fresh Farms"), "Produce", &["organic carrot"]),
            ("Cage Free Eggs", Some("Sunrise Hens"), "Dairy", &["eggs"]),
            ("Cold Brew Coffee", Some("Night Owl"), "Beverages", &["coffee", "water"]),
            ("Dark Chocolate Bar 70%", Some("Cacao House"), "Snacks", &["cocoa mass", "cane sugar", "cocoa butter", "vanilla"]),
            ("Trail Mix", Some("Sunny Snacks"), "Snacks", &["peanuts", "raisins", "almonds", "banana chips", "chocolate"]),
            ("Avocados", None, "Produce", &["avocado"]),
            ("Wild Salmon Fillet", Some("North Catch"), "Seafood", &["salmon"]),
        ];

        let products = entries
            .iter()
            .enumerate()
            .map(|(idx, (name, brand, category, ingredients))| Product {
                id: idx as u32 + 1,
                name: (*name).to_string(),
                brand: brand.map(str::to_string),
                category: (*category).to_string(),
                ingredients: ingredients.iter().map(|s| (*s).to_string()).collect(),
            })
            .collect();

        Self { products }
    }
}

fn create_preview(content: &str) -> String {
    let preview: String = content.chars().take(80).collect();
    if content.chars().count() > 80 {
        format!("{}...", preview)
    } else {
        preview
    }
}
