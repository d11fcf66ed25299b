use std::fmt;
use std::io::Write;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::{
    deserialize::{self, FromSql, FromSqlRow},
    expression::AsExpression,
    pg::{Pg, PgValue},
    prelude::*,
    serialize::{self, IsNull, Output, ToSql},
    sql_types::Text,
};

use crate::schema::{
    customers, ingredients, menu_item_ingredients, menu_items, order_items, orders, stores,
};

#[derive(FromSqlRow, AsExpression, PartialEq, Eq, Hash, Copy, Clone, Debug)]
#[diesel(sql_type = Text)]
pub enum MenuCategory {
    Pizza,
    Drink,
    Side,
}

impl MenuCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            MenuCategory::Pizza => "Pizza",
            MenuCategory::Drink => "Drink",
            MenuCategory::Side => "Side",
        }
    }
}

impl fmt::Display for MenuCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ToSql<Text, Pg> for MenuCategory {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Pg> for MenuCategory {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"Pizza" => Ok(MenuCategory::Pizza),
            b"Drink" => Ok(MenuCategory::Drink),
            b"Side" => Ok(MenuCategory::Side),
            _ => Err("Unrecognized menu category".into()),
        }
    }
}

#[derive(Queryable, Selectable, Identifiable, Debug, PartialEq)]
#[diesel(table_name = stores, primary_key(store_id))]
pub struct Store {
    pub store_id: i32,
    pub address: String,
    pub city: String,
    pub phone_number: String,
    pub opened_at: DateTime<Utc>,
}

#[derive(Insertable, Debug, PartialEq)]
#[diesel(table_name = stores)]
pub struct NewStore {
    pub address: String,
    pub city: String,
    pub phone_number: String,
    pub opened_at: DateTime<Utc>,
}

#[derive(Queryable, Selectable, Identifiable, Debug, PartialEq)]
#[diesel(table_name = customers, primary_key(customer_id))]
pub struct Customer {
    pub customer_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable, Debug, PartialEq)]
#[diesel(table_name = customers)]
pub struct NewCustomer {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Queryable, Selectable, Identifiable, Debug, PartialEq)]
#[diesel(table_name = ingredients, primary_key(ingredient_id))]
pub struct Ingredient {
    pub ingredient_id: i32,
    pub name: String,
    pub stock_quantity: BigDecimal,
    pub unit: String,
}

#[derive(Insertable, Debug, PartialEq)]
#[diesel(table_name = ingredients)]
pub struct NewIngredient {
    pub name: String,
    pub stock_quantity: BigDecimal,
    pub unit: String,
}

#[derive(Queryable, Selectable, Identifiable, Clone, Debug, PartialEq)]
#[diesel(table_name = menu_items, primary_key(item_id))]
pub struct MenuItem {
    pub item_id: i32,
    pub name: String,
    pub category: MenuCategory,
    pub size: String,
    pub price: BigDecimal,
}

#[derive(Insertable, Debug, PartialEq)]
#[diesel(table_name = menu_items)]
pub struct NewMenuItem {
    pub name: String,
    pub category: MenuCategory,
    pub size: String,
    pub price: BigDecimal,
}

/// Quantity of one ingredient consumed per unit of a menu item sold.
#[derive(Queryable, Selectable, Insertable, Clone, Debug, PartialEq)]
#[diesel(table_name = menu_item_ingredients)]
pub struct MenuItemIngredient {
    pub menu_item_id: i32,
    pub ingredient_id: i32,
    pub quantity_required: BigDecimal,
}

#[derive(Queryable, Selectable, Identifiable, Clone, Debug, PartialEq)]
#[diesel(table_name = orders, primary_key(order_id))]
pub struct Order {
    pub order_id: i32,
    pub customer_id: i32,
    pub store_id: i32,
    pub order_timestamp: DateTime<Utc>,
    pub total_amount: BigDecimal,
}

#[derive(Insertable, Clone, Debug, PartialEq)]
#[diesel(table_name = orders)]
pub struct NewOrder {
    pub customer_id: i32,
    pub store_id: i32,
    pub order_timestamp: DateTime<Utc>,
    pub total_amount: BigDecimal,
}

#[derive(Queryable, Selectable, Identifiable, Associations, Debug, PartialEq)]
#[diesel(belongs_to(Order))]
#[diesel(table_name = order_items, primary_key(order_item_id))]
pub struct OrderItem {
    pub order_item_id: i32,
    pub order_id: i32,
    pub item_id: i32,
    pub quantity: i32,
    pub unit_price: BigDecimal,
}

#[derive(Insertable, Debug, PartialEq)]
#[diesel(table_name = order_items)]
pub struct NewOrderItem {
    pub order_id: i32,
    pub item_id: i32,
    pub quantity: i32,
    pub unit_price: BigDecimal,
}
