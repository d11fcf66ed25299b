use bigdecimal::BigDecimal;

use crate::models::{MenuCategory, NewIngredient, NewMenuItem};

pub struct IngredientEntry {
    pub name: &'static str,
    pub unit: &'static str,
    pub stock: u32,
}

pub struct MenuEntry {
    pub name: &'static str,
    pub category: MenuCategory,
    pub size: &'static str,
    pub price_cents: i64,
}

const fn ingredient(name: &'static str, unit: &'static str, stock: u32) -> IngredientEntry {
    IngredientEntry { name, unit, stock }
}

const fn menu(
    name: &'static str,
    category: MenuCategory,
    size: &'static str,
    price_cents: i64,
) -> MenuEntry {
    MenuEntry {
        name,
        category,
        size,
        price_cents,
    }
}

pub const INGREDIENTS: &[IngredientEntry] = &[
    // pizza
    ingredient("Pizza Dough", "kg", 100),
    ingredient("Tomato Sauce", "liters", 50),
    ingredient("Mozzarella Cheese", "kg", 80),
    ingredient("Pepperoni", "kg", 60),
    ingredient("Mushrooms", "kg", 40),
    ingredient("Green Peppers", "kg", 35),
    ingredient("Onions", "kg", 30),
    ingredient("Black Olives", "kg", 25),
    ingredient("Sausage", "kg", 45),
    ingredient("Bacon", "kg", 40),
    ingredient("Ham", "kg", 35),
    ingredient("Pineapple", "kg", 20),
    ingredient("Grilled Chicken", "kg", 35),
    ingredient("BBQ Sauce", "liters", 20),
    ingredient("Basil", "kg", 10),
    ingredient("Oregano", "kg", 8),
    ingredient("Garlic", "kg", 15),
    ingredient("Parmesan Cheese", "kg", 25),
    ingredient("Ricotta Cheese", "kg", 20),
    ingredient("Spinach", "kg", 15),
    ingredient("Jalapenos", "kg", 12),
    ingredient("Anchovies", "kg", 8),
    // drinks
    ingredient("Cola Syrup", "liters", 30),
    ingredient("Diet Cola Syrup", "liters", 25),
    ingredient("Lemonade Mix", "kg", 20),
    ingredient("Iced Tea Mix", "kg", 18),
    ingredient("Coffee Beans", "kg", 25),
    ingredient("Tea Leaves", "kg", 15),
    ingredient("Bottled Water", "units", 200),
    // sides
    ingredient("Chicken Wings", "kg", 40),
    ingredient("Potatoes", "kg", 60),
    ingredient("Bread Dough", "kg", 30),
    ingredient("Garlic Butter", "kg", 20),
    ingredient("Ranch Dressing", "liters", 15),
    ingredient("Blue Cheese Dressing", "liters", 12),
    ingredient("Marinara Sauce", "liters", 25),
    ingredient("Buffalo Sauce", "liters", 18),
    ingredient("Mozzarella Cheese Sticks", "kg", 22),
    ingredient("Flour", "kg", 50),
    ingredient("Olive Oil", "liters", 30),
    ingredient("Salt", "kg", 10),
    ingredient("Black Pepper", "kg", 8),
    ingredient("Red Pepper Flakes", "kg", 5),
];

pub const MENU_ITEMS: &[MenuEntry] = &[
    menu("Margherita Pizza", MenuCategory::Pizza, "Small", 1299),
    menu("Margherita Pizza", MenuCategory::Pizza, "Medium", 1599),
    menu("Margherita Pizza", MenuCategory::Pizza, "Large", 1899),
    menu("Pepperoni Pizza", MenuCategory::Pizza, "Small", 1499),
    menu("Pepperoni Pizza", MenuCategory::Pizza, "Medium", 1799),
    menu("Pepperoni Pizza", MenuCategory::Pizza, "Large", 2099),
    menu("Vegetarian Pizza", MenuCategory::Pizza, "Small", 1399),
    menu("Vegetarian Pizza", MenuCategory::Pizza, "Medium", 1699),
    menu("Vegetarian Pizza", MenuCategory::Pizza, "Large", 1999),
    menu("Supreme Pizza", MenuCategory::Pizza, "Small", 1699),
    menu("Supreme Pizza", MenuCategory::Pizza, "Medium", 1999),
    menu("Supreme Pizza", MenuCategory::Pizza, "Large", 2299),
    menu("Hawaiian Pizza", MenuCategory::Pizza, "Small", 1599),
    menu("Hawaiian Pizza", MenuCategory::Pizza, "Medium", 1899),
    menu("Hawaiian Pizza", MenuCategory::Pizza, "Large", 2199),
    menu("Meat Lovers Pizza", MenuCategory::Pizza, "Small", 1799),
    menu("Meat Lovers Pizza", MenuCategory::Pizza, "Medium", 2099),
    menu("Meat Lovers Pizza", MenuCategory::Pizza, "Large", 2399),
    menu("BBQ Chicken Pizza", MenuCategory::Pizza, "Small", 1649),
    menu("BBQ Chicken Pizza", MenuCategory::Pizza, "Medium", 1949),
    menu("BBQ Chicken Pizza", MenuCategory::Pizza, "Large", 2249),
    menu("Cola", MenuCategory::Drink, "500ml", 299),
    menu("Diet Cola", MenuCategory::Drink, "500ml", 299),
    menu("Lemonade", MenuCategory::Drink, "500ml", 249),
    menu("Iced Tea", MenuCategory::Drink, "500ml", 249),
    menu("Bottled Water", MenuCategory::Drink, "500ml", 199),
    menu("Coffee", MenuCategory::Drink, "Regular", 299),
    menu("Hot Tea", MenuCategory::Drink, "Regular", 249),
    menu("Garlic Bread", MenuCategory::Side, "N/A", 499),
    menu("Cheesy Bread", MenuCategory::Side, "N/A", 599),
    menu("Chicken Wings", MenuCategory::Side, "8 pieces", 899),
    menu("Chicken Wings", MenuCategory::Side, "16 pieces", 1599),
    menu("Mozzarella Sticks", MenuCategory::Side, "6 pieces", 699),
    menu("Potato Wedges", MenuCategory::Side, "Regular", 499),
    menu("Onion Rings", MenuCategory::Side, "Regular", 549),
    menu("Garden Salad", MenuCategory::Side, "Regular", 699),
];

pub fn ingredient_rows() -> Vec<NewIngredient> {
    INGREDIENTS
        .iter()
        .map(|i| NewIngredient {
            name: i.name.to_string(),
            stock_quantity: BigDecimal::from(i.stock),
            unit: i.unit.to_string(),
        })
        .collect()
}

pub fn menu_item_rows() -> Vec<NewMenuItem> {
    MENU_ITEMS
        .iter()
        .map(|m| NewMenuItem {
            name: m.name.to_string(),
            category: m.category,
            size: m.size.to_string(),
            price: BigDecimal::new(m.price_cents.into(), 2),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_ingredient_names_are_unique() {
        let names: HashSet<&str> = INGREDIENTS.iter().map(|i| i.name).collect();
        assert_eq!(names.len(), INGREDIENTS.len());
    }

    #[test]
    fn test_menu_name_and_size_are_unique() {
        let keys: HashSet<(&str, &str)> = MENU_ITEMS.iter().map(|m| (m.name, m.size)).collect();
        assert_eq!(keys.len(), MENU_ITEMS.len());
    }

    #[test]
    fn test_menu_prices_are_decimal() {
        let rows = menu_item_rows();
        let margherita = &rows[0];
        assert_eq!(margherita.name, "Margherita Pizza");
        assert_eq!(margherita.price, "12.99".parse::<BigDecimal>().unwrap());
        assert!(rows.iter().all(|r| r.price > BigDecimal::from(0)));
    }

    #[test]
    fn test_every_category_is_stocked() {
        for category in [MenuCategory::Pizza, MenuCategory::Drink, MenuCategory::Side] {
            assert!(MENU_ITEMS.iter().any(|m| m.category == category));
        }
    }
}
