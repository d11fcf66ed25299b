//! These tests need a disposable PostgreSQL database reachable through the
//! `DB_*` variables; every run truncates all pizzeria tables.
//! Run with `cargo test -- --ignored`.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

use bigdecimal::BigDecimal;
use diesel::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use rushmore_seeder::catalog::{INGREDIENTS, MENU_ITEMS};
use rushmore_seeder::config::DbConfig;
use rushmore_seeder::fake::FakeData;
use rushmore_seeder::models::{
    Customer, Ingredient, MenuItemIngredient, NewOrder, Order, OrderItem, Store,
};
use rushmore_seeder::pipeline::{PlannedItem, PlannedOrder, PopulateOptions, Populator, STORE_CITIES};
use rushmore_seeder::validation::ValidationReport;
use rushmore_seeder::{establish_connection, run_migrations, schema};

static DATABASE: Mutex<()> = Mutex::new(());

// tests share one database, so they take turns
fn lock_database() -> MutexGuard<'static, ()> {
    DATABASE.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn populator(seed: u64, options: PopulateOptions) -> Populator<StdRng> {
    let config = DbConfig::from_env().expect("DB_* variables must be set");
    let mut conn = establish_connection(&config).expect("database must be reachable");
    run_migrations(&mut conn).unwrap();
    Populator::new(conn, FakeData::new(StdRng::seed_from_u64(seed)), options)
}

fn populate(seed: u64) -> (Populator<StdRng>, ValidationReport) {
    let mut populator = populator(seed, PopulateOptions::default());
    let report = populator.populate_all().unwrap();
    (populator, report)
}

#[test]
#[ignore = "requires a PostgreSQL database"]
fn test_populate_all_end_to_end() {
    let _guard = lock_database();
    let (mut populator, report) = populate(2024);

    assert_eq!(report.rows("stores"), Some(5));
    assert_eq!(report.rows("customers"), Some(1000));
    assert_eq!(report.rows("ingredients"), Some(INGREDIENTS.len() as i64));
    assert_eq!(report.rows("menu_items"), Some(MENU_ITEMS.len() as i64));
    assert_eq!(report.rows("orders"), Some(5000));
    assert_eq!(report.orphan_orders, 0);
    assert_eq!(report.mismatched_totals, 0);
    assert!(report.is_clean());

    let conn = populator.conn();
    let orders = schema::orders::table
        .select(Order::as_select())
        .load(conn)
        .unwrap();
    let items = schema::order_items::table
        .select(OrderItem::as_select())
        .load(conn)
        .unwrap();

    let order_total = orders
        .iter()
        .map(|o| o.total_amount.clone())
        .sum::<BigDecimal>();
    let item_total = items
        .iter()
        .map(|i| &i.unit_price * BigDecimal::from(i.quantity))
        .sum::<BigDecimal>();
    assert_eq!(order_total, item_total);

    let grouped = OrderItem::belonging_to(&orders)
        .select(OrderItem::as_select())
        .load(conn)
        .unwrap()
        .grouped_by(&orders);
    assert!(grouped.iter().all(|items| (1..=5).contains(&items.len())));
}

#[test]
#[ignore = "requires a PostgreSQL database"]
fn test_customer_emails_are_unique() {
    let _guard = lock_database();
    let (mut populator, _) = populate(7);

    let customers = schema::customers::table
        .select(Customer::as_select())
        .load(populator.conn())
        .unwrap();
    let emails: HashSet<&str> = customers.iter().map(|c| c.email.as_str()).collect();
    assert_eq!(emails.len(), customers.len());
}

#[test]
#[ignore = "requires a PostgreSQL database"]
fn test_linkage_references_rows_of_the_run() {
    let _guard = lock_database();
    let (mut populator, _) = populate(11);
    let conn = populator.conn();

    let item_ids: HashSet<i32> = schema::menu_items::table
        .select(schema::menu_items::item_id)
        .load(conn)
        .unwrap()
        .into_iter()
        .collect();
    let ingredient_ids: HashSet<i32> = schema::ingredients::table
        .select(schema::ingredients::ingredient_id)
        .load(conn)
        .unwrap()
        .into_iter()
        .collect();
    let links = schema::menu_item_ingredients::table
        .select(MenuItemIngredient::as_select())
        .load(conn)
        .unwrap();

    assert!(!links.is_empty());
    for link in &links {
        assert!(item_ids.contains(&link.menu_item_id));
        assert!(ingredient_ids.contains(&link.ingredient_id));
    }
}

#[test]
#[ignore = "requires a PostgreSQL database"]
fn test_repeated_runs_have_same_cardinalities() {
    let _guard = lock_database();
    let (first, report1) = populate(1);
    drop(first);
    let (_second, report2) = populate(2);

    // line items per order are random, every other table is fixed by the options
    for table in [
        "stores",
        "customers",
        "ingredients",
        "menu_items",
        "menu_item_ingredients",
        "orders",
    ] {
        assert_eq!(report1.rows(table), report2.rows(table), "{}", table);
    }
    for report in [&report1, &report2] {
        let orders = report.rows("orders").unwrap();
        let items = report.rows("order_items").unwrap();
        assert!(orders <= items && items <= 5 * orders);
    }
}

#[test]
#[ignore = "requires a PostgreSQL database"]
fn test_second_run_keeping_existing_data() {
    let _guard = lock_database();
    let (first, report1) = populate(1);
    drop(first);

    let mut populator = populator(
        2,
        PopulateOptions {
            clear_existing: false,
            ..PopulateOptions::default()
        },
    );
    let report2 = populator.populate_all().unwrap();

    assert_eq!(report2.rows("stores"), Some(10));
    assert_eq!(report2.rows("customers"), Some(2000));
    assert_eq!(report2.rows("orders"), Some(10000));
    assert_eq!(report2.rows("ingredients"), report1.rows("ingredients"));
    assert_eq!(report2.rows("menu_items"), report1.rows("menu_items"));
    assert_eq!(
        report2.rows("menu_item_ingredients"),
        report1.rows("menu_item_ingredients")
    );
    assert!(report2.is_clean());

    let conn = populator.conn();
    let customers = schema::customers::table
        .select(Customer::as_select())
        .load(conn)
        .unwrap();
    let emails: HashSet<&str> = customers.iter().map(|c| c.email.as_str()).collect();
    assert_eq!(emails.len(), customers.len());

    let ingredients = schema::ingredients::table
        .select(Ingredient::as_select())
        .load(conn)
        .unwrap();
    let names: HashSet<&str> = ingredients.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names.len(), INGREDIENTS.len());
    assert!(INGREDIENTS.iter().all(|e| names.contains(e.name)));
}

#[test]
#[ignore = "requires a PostgreSQL database"]
fn test_failed_order_items_roll_back_their_orders() {
    let _guard = lock_database();
    let (mut populator, report) = populate(5);

    let conn = populator.conn();
    let customer_id = schema::customers::table
        .select(schema::customers::customer_id)
        .first::<i32>(conn)
        .unwrap();
    let store_id = schema::stores::table
        .select(schema::stores::store_id)
        .first::<i32>(conn)
        .unwrap();

    let unit_price: BigDecimal = "9.99".parse().unwrap();
    let planned = vec![PlannedOrder {
        order: NewOrder {
            customer_id,
            store_id,
            order_timestamp: chrono::DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
            total_amount: unit_price.clone(),
        },
        items: vec![PlannedItem {
            item_id: -1,
            quantity: 1,
            unit_price,
        }],
    }];

    assert!(populator.insert_orders(planned).is_err());

    let conn = populator.conn();
    let orders: i64 = schema::orders::table.count().get_result(conn).unwrap();
    let items: i64 = schema::order_items::table.count().get_result(conn).unwrap();
    assert_eq!(Some(orders), report.rows("orders"));
    assert_eq!(Some(items), report.rows("order_items"));
}

#[test]
#[ignore = "requires a PostgreSQL database"]
fn test_keep_existing_and_custom_counts() {
    let _guard = lock_database();
    let (first, _) = populate(3);
    drop(first);

    let mut populator = populator(
        4,
        PopulateOptions {
            clear_existing: false,
            stores: 2,
            customers: 0,
            orders: 20,
        },
    );
    populator.populate_stores(2).unwrap();
    let placed = populator.populate_orders(20).unwrap();
    assert_eq!(placed.len(), 20);
    assert!(placed.iter().all(|p| !p.items.is_empty()));

    let conn = populator.conn();
    let stores = schema::stores::table
        .select(Store::as_select())
        .order(schema::stores::store_id.asc())
        .load(conn)
        .unwrap();
    let orders: i64 = schema::orders::table.count().get_result(conn).unwrap();
    assert_eq!(stores.len(), 7);
    assert_eq!(orders, 5020);
    // each run cycles the cities from the start
    let cities = stores.iter().map(|s| s.city.as_str()).collect::<Vec<_>>();
    assert_eq!(&cities[..5], STORE_CITIES);
    assert_eq!(&cities[5..], &STORE_CITIES[..2]);
}
