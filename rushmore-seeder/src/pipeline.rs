use std::collections::HashMap;

use bigdecimal::BigDecimal;
use chrono::{DateTime, SubsecRound, TimeDelta, Utc};
use diesel::{insert_into, prelude::*, Connection, PgConnection};
use rand::seq::IndexedRandom;
use rand::Rng;
use tracing::{info, warn};

use crate::config::DbConfig;
use crate::error::SeedError;
use crate::fake::FakeData;
use crate::models::{MenuItem, NewCustomer, NewOrder, NewOrderItem, NewStore, Order};
use crate::validation::{self, ValidationReport};
use crate::{catalog, establish_connection, recipe, schema};

/// Rows per INSERT statement, well below the bind parameter limit.
pub const BATCH_SIZE: usize = 1000;

pub const STORE_CITIES: &[&str] = &["New York", "Chicago", "Los Angeles", "Miami", "Houston"];

/// Dependents first, so foreign keys never block a truncate.
pub const CLEAR_ORDER: &[&str] = &[
    "order_items",
    "orders",
    "menu_item_ingredients",
    "menu_items",
    "ingredients",
    "customers",
    "stores",
];

pub const MAX_ITEMS_PER_ORDER: usize = 5;
pub const MAX_ITEM_QUANTITY: i32 = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopulateOptions {
    pub clear_existing: bool,
    pub stores: usize,
    pub customers: usize,
    pub orders: usize,
}

impl Default for PopulateOptions {
    fn default() -> Self {
        Self {
            clear_existing: true,
            stores: 5,
            customers: 1000,
            orders: 5000,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlannedItem {
    pub item_id: i32,
    pub quantity: i32,
    pub unit_price: BigDecimal,
}

impl PlannedItem {
    pub fn line_total(&self) -> BigDecimal {
        &self.unit_price * BigDecimal::from(self.quantity)
    }
}

/// An order with its line items, total already settled.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedOrder {
    pub order: NewOrder,
    pub items: Vec<PlannedItem>,
}

/// Planned line items attached to the id the database assigned their order.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedOrder {
    pub order_id: i32,
    pub items: Vec<PlannedItem>,
}

/// Builds `count` orders placed within the year before `now`, each with
/// 1 to 5 line items priced at the current menu price. Timestamps fall on
/// whole seconds so they survive the round trip through the database.
pub fn plan_orders<R: Rng>(
    fake: &mut FakeData<R>,
    store_ids: &[i32],
    customer_ids: &[i32],
    menu: &[(i32, BigDecimal)],
    count: usize,
    now: DateTime<Utc>,
) -> Result<Vec<PlannedOrder>, SeedError> {
    if count == 0 {
        return Ok(Vec::new());
    }
    if store_ids.is_empty() {
        return Err(SeedError::MissingReference("stores"));
    }
    if customer_ids.is_empty() {
        return Err(SeedError::MissingReference("customers"));
    }
    if menu.is_empty() {
        return Err(SeedError::MissingReference("menu items"));
    }

    let now = now.trunc_subsecs(0);
    let start = now - TimeDelta::days(365);
    let mut planned = Vec::with_capacity(count);
    for _ in 0..count {
        let store_id = *store_ids.choose(fake.rng()).ok_or(SeedError::MissingReference("stores"))?;
        let customer_id = *customer_ids
            .choose(fake.rng())
            .ok_or(SeedError::MissingReference("customers"))?;
        let order_timestamp = fake.date_time_between(start, now);

        let num_items = fake.rng().random_range(1..=MAX_ITEMS_PER_ORDER);
        let mut items = Vec::with_capacity(num_items);
        for _ in 0..num_items {
            let (item_id, price) = menu
                .choose(fake.rng())
                .ok_or(SeedError::MissingReference("menu items"))?;
            items.push(PlannedItem {
                item_id: *item_id,
                quantity: fake.rng().random_range(1..=MAX_ITEM_QUANTITY),
                unit_price: price.clone(),
            });
        }

        let total_amount = items.iter().map(PlannedItem::line_total).sum::<BigDecimal>();
        planned.push(PlannedOrder {
            order: NewOrder {
                customer_id,
                store_id,
                order_timestamp,
                total_amount,
            },
            items,
        });
    }
    Ok(planned)
}

/// Drives population stage by stage over one connection. Each stage commits
/// on its own; a failing stage is rolled back and aborts the run. Catalog
/// rows and recipe links already present are left alone, so a run that keeps
/// existing data only adds stores, customers and orders.
pub struct Populator<R> {
    conn: PgConnection,
    fake: FakeData<R>,
    options: PopulateOptions,
}

impl<R: Rng> Populator<R> {
    pub fn new(conn: PgConnection, fake: FakeData<R>, options: PopulateOptions) -> Self {
        Self {
            conn,
            fake,
            options,
        }
    }

    pub fn connect(
        config: &DbConfig,
        fake: FakeData<R>,
        options: PopulateOptions,
    ) -> Result<Self, SeedError> {
        info!("Database configuration loaded for host: {}", config.host);
        let conn = establish_connection(config)?;
        info!("Successfully connected to database");
        Ok(Self::new(conn, fake, options))
    }

    pub fn conn(&mut self) -> &mut PgConnection {
        &mut self.conn
    }

    pub fn populate_all(&mut self) -> Result<ValidationReport, SeedError> {
        if self.options.clear_existing {
            self.clear_existing_data();
        }

        self.populate_stores(self.options.stores)?;
        self.populate_customers(self.options.customers)?;
        self.populate_ingredients()?;
        self.populate_menu_items()?;
        self.populate_menu_item_ingredients()?;
        self.populate_orders(self.options.orders)?;

        let report = validation::validate_data(&mut self.conn)?;
        info!("Database population completed successfully!");
        Ok(report)
    }

    /// Failures are per table and never abort the run.
    pub fn clear_existing_data(&mut self) {
        info!("Clearing existing data...");
        for table in CLEAR_ORDER {
            match diesel::sql_query(format!("TRUNCATE TABLE {} RESTART IDENTITY CASCADE", table))
                .execute(&mut self.conn)
            {
                Ok(_) => info!("Cleared table: {}", table),
                Err(err) => warn!("Could not clear table {}: {}", table, err),
            }
        }
    }

    pub fn populate_stores(&mut self, count: usize) -> Result<usize, SeedError> {
        info!("Populating {} stores...", count);
        let now = Utc::now();
        let start = now - TimeDelta::days(5 * 365);
        let end = now - TimeDelta::days(365);

        let stores = (0..count)
            .map(|i| NewStore {
                address: self.fake.street_address(),
                city: STORE_CITIES[i % STORE_CITIES.len()].to_string(),
                phone_number: self.fake.phone_number(),
                opened_at: self.fake.date_time_between(start, end),
            })
            .collect::<Vec<_>>();

        self.conn.transaction::<_, diesel::result::Error, _>(|conn| {
            for chunk in stores.chunks(BATCH_SIZE) {
                insert_into(schema::stores::table)
                    .values(chunk)
                    .execute(conn)?;
            }
            Ok(())
        })?;

        info!("Added {} stores", stores.len());
        Ok(stores.len())
    }

    pub fn populate_customers(&mut self, count: usize) -> Result<usize, SeedError> {
        info!("Populating {} customers...", count);
        let now = Utc::now();
        let start = now - TimeDelta::days(2 * 365);

        let existing = schema::customers::table
            .select(schema::customers::email)
            .load::<String>(&mut self.conn)?;
        self.fake.reserve_emails(existing);

        let mut customers = Vec::with_capacity(count);
        for _ in 0..count {
            let first_name = self.fake.first_name();
            let last_name = self.fake.last_name();
            let email = self.fake.unique_email(&first_name, &last_name);
            customers.push(NewCustomer {
                first_name,
                last_name,
                email,
                phone_number: self.fake.phone_number(),
                created_at: self.fake.date_time_between(start, now),
            });
        }

        self.conn.transaction::<_, diesel::result::Error, _>(|conn| {
            for chunk in customers.chunks(BATCH_SIZE) {
                insert_into(schema::customers::table)
                    .values(chunk)
                    .execute(conn)?;
            }
            Ok(())
        })?;

        info!("Added {} customers", customers.len());
        Ok(customers.len())
    }

    pub fn populate_ingredients(&mut self) -> Result<usize, SeedError> {
        info!("Populating ingredients...");
        let ingredients = catalog::ingredient_rows();

        let added = self.conn.transaction::<_, diesel::result::Error, _>(|conn| {
            insert_into(schema::ingredients::table)
                .values(&ingredients)
                .on_conflict_do_nothing()
                .execute(conn)
        })?;

        info!("Added {} ingredients", added);
        Ok(added)
    }

    pub fn populate_menu_items(&mut self) -> Result<usize, SeedError> {
        info!("Populating menu items...");
        let menu_items = catalog::menu_item_rows();

        let added = self.conn.transaction::<_, diesel::result::Error, _>(|conn| {
            insert_into(schema::menu_items::table)
                .values(&menu_items)
                .on_conflict_do_nothing()
                .execute(conn)
        })?;

        info!("Added {} menu items", added);
        Ok(added)
    }

    /// Reads menu items and ingredients back so links use database ids.
    pub fn populate_menu_item_ingredients(&mut self) -> Result<usize, SeedError> {
        use schema::ingredients::dsl::{ingredient_id, ingredients, name};

        info!("Linking menu items with ingredients...");
        let menu_items = schema::menu_items::table
            .select(MenuItem::as_select())
            .order(schema::menu_items::item_id.asc())
            .load(&mut self.conn)?;
        let ingredient_ids = ingredients
            .select((name, ingredient_id))
            .load::<(String, i32)>(&mut self.conn)?
            .into_iter()
            .collect::<HashMap<_, _>>();

        let links = recipe::link_menu_items(&menu_items, &ingredient_ids)?;

        let added = self.conn.transaction::<_, diesel::result::Error, _>(|conn| {
            let mut added = 0;
            for chunk in links.chunks(BATCH_SIZE) {
                added += insert_into(schema::menu_item_ingredients::table)
                    .values(chunk)
                    .on_conflict_do_nothing()
                    .execute(conn)?;
            }
            Ok(added)
        })?;

        info!("Added {} menu item-ingredient relationships", added);
        Ok(added)
    }

    /// Plans `count` orders against the rows already stored and inserts them
    /// with their line items.
    pub fn populate_orders(&mut self, count: usize) -> Result<Vec<PlacedOrder>, SeedError> {
        info!("Populating {} orders...", count);
        let store_ids = schema::stores::table
            .select(schema::stores::store_id)
            .load::<i32>(&mut self.conn)?;
        let customer_ids = schema::customers::table
            .select(schema::customers::customer_id)
            .load::<i32>(&mut self.conn)?;
        let menu = schema::menu_items::table
            .select((schema::menu_items::item_id, schema::menu_items::price))
            .load::<(i32, BigDecimal)>(&mut self.conn)?;

        let planned = plan_orders(
            &mut self.fake,
            &store_ids,
            &customer_ids,
            &menu,
            count,
            Utc::now(),
        )?;
        self.insert_orders(planned)
    }

    /// Orders and their line items commit in one transaction, so a failure
    /// never leaves an order without items behind.
    pub fn insert_orders(
        &mut self,
        planned: Vec<PlannedOrder>,
    ) -> Result<Vec<PlacedOrder>, SeedError> {
        let orders = planned.iter().map(|p| p.order.clone()).collect::<Vec<_>>();

        let (placed, item_count) = self.conn.transaction::<_, SeedError, _>(|conn| {
            let mut inserted = Vec::with_capacity(orders.len());
            for chunk in orders.chunks(BATCH_SIZE) {
                inserted.extend(
                    insert_into(schema::orders::table)
                        .values(chunk)
                        .returning(Order::as_returning())
                        .get_results::<Order>(conn)?,
                );
            }

            let placed = attach_order_ids(planned, inserted)?;
            let order_items = order_item_rows(&placed);
            for chunk in order_items.chunks(BATCH_SIZE) {
                insert_into(schema::order_items::table)
                    .values(chunk)
                    .execute(conn)?;
            }
            Ok((placed, order_items.len()))
        })?;

        info!("Added {} orders", placed.len());
        info!("Added {} order items", item_count);
        Ok(placed)
    }
}

type OrderKey = (i32, i32, DateTime<Utc>, BigDecimal);

fn order_key(order: &NewOrder) -> OrderKey {
    (
        order.customer_id,
        order.store_id,
        order.order_timestamp,
        order.total_amount.clone(),
    )
}

/// Pairs inserted orders with the planned line items by content, whatever
/// order the database returned them in. Planned orders with equal keys are
/// interchangeable: they share customer, store, timestamp and total.
pub fn attach_order_ids(
    planned: Vec<PlannedOrder>,
    inserted: Vec<Order>,
) -> Result<Vec<PlacedOrder>, SeedError> {
    let mut pending: HashMap<OrderKey, Vec<Vec<PlannedItem>>> = HashMap::new();
    for p in planned {
        pending.entry(order_key(&p.order)).or_default().push(p.items);
    }

    inserted
        .into_iter()
        .map(|order| {
            let key = (
                order.customer_id,
                order.store_id,
                order.order_timestamp,
                order.total_amount,
            );
            let items = pending
                .get_mut(&key)
                .and_then(Vec::pop)
                .ok_or(SeedError::UnmatchedOrder(order.order_id))?;
            Ok(PlacedOrder {
                order_id: order.order_id,
                items,
            })
        })
        .collect()
}

fn order_item_rows(placed: &[PlacedOrder]) -> Vec<NewOrderItem> {
    placed
        .iter()
        .flat_map(|p| {
            p.items.iter().map(move |i| NewOrderItem {
                order_id: p.order_id,
                item_id: i.item_id,
                quantity: i.quantity,
                unit_price: i.unit_price.clone(),
            })
        })
        .collect()
}

impl<R> Drop for Populator<R> {
    fn drop(&mut self) {
        info!("Database connection closed");
    }
}
