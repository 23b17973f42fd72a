//! Expense category classification.

use crate::models::receipt::Category;

/// Keyword rules in evaluation order. The first rule with any keyword
/// present in the lower-cased text decides the category.
pub const CATEGORY_RULES: &[(Category, &[&str])] = &[
    (
        Category::Groceries,
        &["walmart", "target", "publix", "grocery", "supermarket", "aldi", "costco"],
    ),
    (
        Category::Flight,
        &["airlines", "flight", "delta", "american airlines", "united airlines", "airport"],
    ),
    (
        Category::Transportation,
        &["uber", "lyft", "taxi", "transport", "bus", "train", "subway"],
    ),
    (
        Category::MaterialsTools,
        &["home depot", "lowe's", "hardware", "tools", "material", "construction"],
    ),
    (
        Category::Lodging,
        &["hotel", "motel", "inn", "resort", "bnb"],
    ),
    (
        Category::Meals,
        &["restaurant", "dining", "food", "pizza", "burger", "cafe", "steakhouse"],
    ),
];

/// Find the first rule that fires, with the keyword that fired it.
pub fn matching_rule(text: &str) -> Option<(Category, &'static str)> {
    let lower = text.to_lowercase();

    CATEGORY_RULES.iter().find_map(|(category, keywords)| {
        keywords
            .iter()
            .find(|keyword| lower.contains(*keyword))
            .map(|keyword| (*category, *keyword))
    })
}

/// Classify receipt text; [`Category::Other`] when no rule fires.
pub fn classify(text: &str) -> Category {
    matching_rule(text)
        .map(|(category, _)| category)
        .unwrap_or_default()
}
