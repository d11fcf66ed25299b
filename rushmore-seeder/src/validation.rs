use diesel::prelude::*;
use diesel::sql_types::BigInt;
use diesel::PgConnection;
use tracing::{info, warn};

use crate::schema::{
    customers, ingredients, menu_item_ingredients, menu_items, order_items, orders, stores,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableCount {
    pub table: &'static str,
    pub rows: i64,
}

/// Advisory findings of the post-population pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub counts: Vec<TableCount>,
    pub orphan_orders: i64,
    pub mismatched_totals: i64,
}

impl ValidationReport {
    pub fn rows(&self, table: &str) -> Option<i64> {
        self.counts
            .iter()
            .find(|c| c.table == table)
            .map(|c| c.rows)
    }

    pub fn is_clean(&self) -> bool {
        self.orphan_orders == 0 && self.mismatched_totals == 0
    }
}

#[derive(QueryableByName)]
struct MismatchCount {
    #[diesel(sql_type = BigInt)]
    mismatched: i64,
}

pub fn count_rows(conn: &mut PgConnection) -> QueryResult<Vec<TableCount>> {
    Ok(vec![
        TableCount {
            table: "stores",
            rows: stores::table.count().get_result(conn)?,
        },
        TableCount {
            table: "customers",
            rows: customers::table.count().get_result(conn)?,
        },
        TableCount {
            table: "ingredients",
            rows: ingredients::table.count().get_result(conn)?,
        },
        TableCount {
            table: "menu_items",
            rows: menu_items::table.count().get_result(conn)?,
        },
        TableCount {
            table: "orders",
            rows: orders::table.count().get_result(conn)?,
        },
        TableCount {
            table: "order_items",
            rows: order_items::table.count().get_result(conn)?,
        },
        TableCount {
            table: "menu_item_ingredients",
            rows: menu_item_ingredients::table.count().get_result(conn)?,
        },
    ])
}

/// Orders without a single line item.
pub fn count_orphan_orders(conn: &mut PgConnection) -> QueryResult<i64> {
    orders::table
        .left_join(order_items::table)
        .filter(order_items::order_item_id.is_null())
        .count()
        .get_result(conn)
}

/// Orders whose stored total differs from the sum of their line items.
pub fn count_mismatched_totals(conn: &mut PgConnection) -> QueryResult<i64> {
    diesel::sql_query(
        "SELECT COUNT(*) AS mismatched \
         FROM orders o \
         LEFT JOIN ( \
             SELECT order_id, SUM(quantity * unit_price) AS items_total \
             FROM order_items GROUP BY order_id \
         ) t ON t.order_id = o.order_id \
         WHERE o.total_amount <> COALESCE(t.items_total, 0)",
    )
    .get_result::<MismatchCount>(conn)
    .map(|row| row.mismatched)
}

pub fn validate_data(conn: &mut PgConnection) -> QueryResult<ValidationReport> {
    info!("Validating data population...");

    let counts = count_rows(conn)?;
    for count in &counts {
        info!("{}: {} rows", count.table, count.rows);
    }

    let orphan_orders = count_orphan_orders(conn)?;
    if orphan_orders > 0 {
        warn!("Found {} orders with no items", orphan_orders);
    }

    let mismatched_totals = count_mismatched_totals(conn)?;
    if mismatched_totals > 0 {
        warn!(
            "Found {} orders whose total differs from their items",
            mismatched_totals
        );
    }

    info!("Data validation completed");
    Ok(ValidationReport {
        counts,
        orphan_orders,
        mismatched_totals,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(orphans: i64, mismatched: i64) -> ValidationReport {
        ValidationReport {
            counts: vec![
                TableCount {
                    table: "stores",
                    rows: 5,
                },
                TableCount {
                    table: "orders",
                    rows: 5000,
                },
            ],
            orphan_orders: orphans,
            mismatched_totals: mismatched,
        }
    }

    #[test]
    fn test_rows_lookup() {
        let report = report(0, 0);
        assert_eq!(report.rows("orders"), Some(5000));
        assert_eq!(report.rows("stores"), Some(5));
        assert_eq!(report.rows("customers"), None);
    }

    #[test]
    fn test_is_clean() {
        assert!(report(0, 0).is_clean());
        assert!(!report(3, 0).is_clean());
        assert!(!report(0, 1).is_clean());
    }
}
