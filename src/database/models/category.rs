use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Subcategory {
    pub id: i64,
    pub name: String,
}

/// A category with its subcategories. `subcategories` is never omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub subcategories: Vec<Subcategory>,
}
