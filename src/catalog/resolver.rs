use super::{Catalog, Product};

/// Maps a query to an ordered list of matching products. Must be total and
/// free of side effects.
pub trait Resolver {
    fn resolve(&self, query: &str) -> Vec<Product>;
}

impl<F> Resolver for F
where
    F: Fn(&str) -> Vec<Product>,
{
    fn resolve(&self, query: &str) -> Vec<Product> {
        self(query)
    }
}

impl Resolver for Catalog {
    fn resolve(&self, query: &str) -> Vec<Product> {
        resolve_ingredient_search(query, self.products())
    }
}

/// Every whitespace-separated term of the query must appear (case-insensitive)
/// in the name, brand, category or one of the ingredients. Name matches come
/// first; catalog order is kept otherwise.
pub fn resolve_ingredient_search(query: &str, products: &[Product]) -> Vec<Product> {
    let query_lower = query.to_lowercase();
    let terms: Vec<&str> = query_lower.split_whitespace().collect();
    if terms.is_empty() {
        return Vec::new();
    }

    let mut name_hits = Vec::new();
    let mut other_hits = Vec::new();

    for product in products {
        let name_lower = product.name.to_lowercase();
        if terms.iter().all(|term| name_lower.contains(term)) {
            name_hits.push(product.clone());
            continue;
        }

        let brand_lower = product.brand.as_deref().unwrap_or_default().to_lowercase();
        let category_lower = product.category.to_lowercase();
        let ingredients_lower: Vec<String> =
            product.ingredients.iter().map(|i| i.to_lowercase()).collect();

        let matches_all = terms.iter().all(|term| {
            name_lower.contains(term)
                || brand_lower.contains(term)
                || category_lower.contains(term)
                || ingredients_lower.iter().any(|i| i.contains(term))
        });
        if matches_all {
            other_hits.push(product.clone());
        }
    }

    name_hits.extend(other_hits);
    name_hits
}
