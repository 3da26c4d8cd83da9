//! Shared fixtures: an in-memory SQLite store with the person schema.

#![allow(dead_code)]

use cetec_server::db::{create_pool_with_options, NewPerson};
use sqlx::AnyPool;

/// SQLite rendition of `sql/schema.mysql.sql`.
const SCHEMA: &str = r#"
CREATE TABLE person (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    age INTEGER NOT NULL
);
CREATE TABLE phone (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    person_id INTEGER NOT NULL REFERENCES person(id),
    number TEXT NOT NULL
);
CREATE TABLE address (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    city TEXT NOT NULL,
    state TEXT NOT NULL,
    street1 TEXT NOT NULL,
    street2 TEXT NOT NULL,
    zip_code TEXT NOT NULL
);
CREATE TABLE address_join (
    person_id INTEGER NOT NULL REFERENCES person(id),
    address_id INTEGER NOT NULL REFERENCES address(id),
    PRIMARY KEY (person_id, address_id)
);
"#;

pub const TABLES: [&str; 4] = ["person", "phone", "address", "address_join"];

/// Single-connection pool so every query sees the same in-memory database.
pub async fn memory_pool() -> AnyPool {
    let pool = create_pool_with_options("sqlite::memory:", 1)
        .await
        .expect("sqlite pool");
    sqlx::raw_sql(SCHEMA)
        .execute(&pool)
        .await
        .expect("schema");
    pool
}

/// Make every insert into `table` abort with a constraint error.
pub async fn reject_inserts(pool: &AnyPool, table: &str) {
    let trigger = format!(
        "CREATE TRIGGER reject_{table} BEFORE INSERT ON {table} \
         BEGIN SELECT RAISE(ABORT, 'insert rejected'); END;"
    );
    sqlx::raw_sql(&trigger)
        .execute(pool)
        .await
        .expect("trigger");
}

/// Make the commit fail: every link row also writes a guard row whose
/// deferred foreign key can never be satisfied, and deferred keys are
/// only checked at COMMIT.
pub async fn fail_on_commit(pool: &AnyPool) {
    sqlx::raw_sql(
        "CREATE TABLE commit_parent (id INTEGER PRIMARY KEY); \
         CREATE TABLE commit_guard ( \
             parent_id INTEGER REFERENCES commit_parent(id) DEFERRABLE INITIALLY DEFERRED \
         ); \
         CREATE TRIGGER guard_link AFTER INSERT ON address_join \
         BEGIN INSERT INTO commit_guard (parent_id) VALUES (-1); END;",
    )
    .execute(pool)
    .await
    .expect("commit guard");
}

pub async fn count(pool: &AnyPool, table: &str) -> i64 {
    let (n,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .expect("count");
    n
}

pub async fn counts(pool: &AnyPool) -> [i64; 4] {
    let mut out = [0; 4];
    for (slot, table) in out.iter_mut().zip(TABLES) {
        *slot = count(pool, table).await;
    }
    out
}

pub fn alice() -> NewPerson {
    NewPerson {
        name: "Alice".into(),
        age: 30,
        phone_number: "555-1234".into(),
        city: "Springfield".into(),
        state: "IL".into(),
        street1: "1 Main St".into(),
        street2: String::new(),
        zip_code: "62704".into(),
    }
}
