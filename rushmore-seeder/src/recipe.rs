//! Recipe linkage: which ingredients, and how much of each, a menu item
//! consumes per unit sold.
//!
//! Items are dispatched on category, then matched against an ordered rule
//! table for that category. The first rule whose predicate matches wins, so
//! table order is significant (`Diet Cola` must be tested before `Cola`).
//! Quantities are in the ingredient's own unit.

use std::collections::HashMap;

use bigdecimal::BigDecimal;
use tracing::warn;

use crate::error::LinkageError;
use crate::models::{MenuCategory, MenuItem, MenuItemIngredient};

/// Ingredient amount in thousandths of the ingredient's unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Portion {
    pub ingredient: &'static str,
    pub milli: i64,
}

impl Portion {
    pub fn quantity(&self) -> BigDecimal {
        BigDecimal::new(self.milli.into(), 3)
    }
}

const fn portion(ingredient: &'static str, milli: i64) -> Portion {
    Portion { ingredient, milli }
}

#[derive(Debug)]
pub struct RecipeRule {
    pub name_contains: &'static str,
    /// Extra match on the size/variant label.
    pub size_contains: Option<&'static str>,
    pub portions: &'static [Portion],
}

impl RecipeRule {
    pub fn matches(&self, item: &MenuItem) -> bool {
        item.name.contains(self.name_contains)
            && self
                .size_contains
                .map_or(true, |variant| item.size.contains(variant))
    }
}

const fn rule(name_contains: &'static str, portions: &'static [Portion]) -> RecipeRule {
    RecipeRule {
        name_contains,
        size_contains: None,
        portions,
    }
}

const fn variant_rule(
    name_contains: &'static str,
    size_contains: &'static str,
    portions: &'static [Portion],
) -> RecipeRule {
    RecipeRule {
        name_contains,
        size_contains: Some(size_contains),
        portions,
    }
}

pub const PIZZA_BASE: &[Portion] = &[
    portion("Pizza Dough", 250),
    portion("Tomato Sauce", 100),
    portion("Mozzarella Cheese", 200),
];

pub const PIZZA_TOPPINGS: &[RecipeRule] = &[
    rule("Margherita", &[portion("Basil", 20)]),
    rule("Pepperoni", &[portion("Pepperoni", 150)]),
    rule(
        "Vegetarian",
        &[
            portion("Mushrooms", 80),
            portion("Green Peppers", 60),
            portion("Onions", 50),
            portion("Black Olives", 40),
        ],
    ),
    rule(
        "Supreme",
        &[
            portion("Pepperoni", 80),
            portion("Sausage", 60),
            portion("Mushrooms", 40),
            portion("Green Peppers", 40),
            portion("Onions", 30),
        ],
    ),
    rule("Hawaiian", &[portion("Ham", 100), portion("Pineapple", 80)]),
    rule(
        "Meat Lovers",
        &[
            portion("Pepperoni", 80),
            portion("Sausage", 60),
            portion("Bacon", 50),
            portion("Ham", 50),
        ],
    ),
    rule(
        "BBQ Chicken",
        &[
            portion("Grilled Chicken", 120),
            portion("BBQ Sauce", 60),
            portion("Onions", 30),
        ],
    ),
];

pub const DRINK_RULES: &[RecipeRule] = &[
    rule("Diet Cola", &[portion("Diet Cola Syrup", 50)]),
    rule("Cola", &[portion("Cola Syrup", 50)]),
    rule("Lemonade", &[portion("Lemonade Mix", 30)]),
    rule("Iced Tea", &[portion("Iced Tea Mix", 30)]),
    rule("Coffee", &[portion("Coffee Beans", 20)]),
    rule("Hot Tea", &[portion("Tea Leaves", 10)]),
    rule("Bottled Water", &[portion("Bottled Water", 1000)]),
];

pub const SIDE_RULES: &[RecipeRule] = &[
    rule(
        "Garlic Bread",
        &[portion("Bread Dough", 100), portion("Garlic Butter", 50)],
    ),
    rule(
        "Cheesy Bread",
        &[
            portion("Bread Dough", 100),
            portion("Mozzarella Cheese", 80),
            portion("Garlic Butter", 30),
        ],
    ),
    variant_rule(
        "Chicken Wings",
        "8 pieces",
        &[portion("Chicken Wings", 400), portion("Buffalo Sauce", 50)],
    ),
    rule(
        "Chicken Wings",
        &[portion("Chicken Wings", 400), portion("Buffalo Sauce", 100)],
    ),
    rule(
        "Mozzarella Sticks",
        &[
            portion("Mozzarella Cheese Sticks", 300),
            portion("Marinara Sauce", 80),
        ],
    ),
    rule(
        "Potato Wedges",
        &[portion("Potatoes", 200), portion("Olive Oil", 30)],
    ),
    rule(
        "Onion Rings",
        &[
            portion("Onions", 150),
            portion("Flour", 80),
            portion("Olive Oil", 50),
        ],
    ),
    rule(
        "Garden Salad",
        &[
            portion("Spinach", 100),
            portion("Onions", 20),
            portion("Green Peppers", 20),
        ],
    ),
];

const NO_BASE: &[Portion] = &[];

fn rules_for(category: MenuCategory) -> (&'static [Portion], &'static [RecipeRule]) {
    match category {
        MenuCategory::Pizza => (PIZZA_BASE, PIZZA_TOPPINGS),
        MenuCategory::Drink => (NO_BASE, DRINK_RULES),
        MenuCategory::Side => (NO_BASE, SIDE_RULES),
    }
}

/// First rule of the item's category that matches it.
pub fn matching_rule(item: &MenuItem) -> Option<&'static RecipeRule> {
    let (_, rules) = rules_for(item.category);
    rules.iter().find(|r| r.matches(item))
}

/// Every portion an item consumes: category base first, then the matched rule.
pub fn portions_for(item: &MenuItem) -> Vec<Portion> {
    let (base, _) = rules_for(item.category);
    let mut portions = base.to_vec();
    match matching_rule(item) {
        Some(rule) => portions.extend_from_slice(rule.portions),
        None => warn!(
            menu_item = %item.name,
            size = %item.size,
            category = %item.category,
            "no recipe rule matches menu item"
        ),
    }
    portions
}

pub fn link_menu_items(
    menu_items: &[MenuItem],
    ingredient_ids: &HashMap<String, i32>,
) -> Result<Vec<MenuItemIngredient>, LinkageError> {
    let mut links = Vec::new();
    for item in menu_items {
        for portion in portions_for(item) {
            let ingredient_id = *ingredient_ids.get(portion.ingredient).ok_or_else(|| {
                LinkageError::UnknownIngredient {
                    menu_item: format!("{} ({})", item.name, item.size),
                    ingredient: portion.ingredient,
                }
            })?;
            links.push(MenuItemIngredient {
                menu_item_id: item.item_id,
                ingredient_id,
                quantity_required: portion.quantity(),
            });
        }
    }
    Ok(links)
}
