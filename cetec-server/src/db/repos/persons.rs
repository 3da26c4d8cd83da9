//! Person repository
//!
//! A person's profile spans four tables: `person`, `phone`, `address` and
//! the `address_join` link table. Reads inner-join all four, so a person
//! with any link missing has no profile. Writes insert all four rows in one
//! transaction.

use async_trait::async_trait;
use sqlx::any::AnyQueryResult;
use sqlx::{AnyConnection, AnyPool, FromRow};

use crate::db::error::{AtStage, CreatePersonError, CreateStage, StoreError};
use crate::db::store::PersonStore;

/// Joined profile row.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct PersonProfile {
    pub id: i64,
    pub name: String,
    pub age: i32,
    pub phone_number: String,
    pub city: String,
    pub state: String,
    pub street1: String,
    pub street2: String,
    pub zip_code: String,
}

/// Input for creating a person with a phone number and an address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPerson {
    pub name: String,
    pub age: i32,
    pub phone_number: String,
    pub city: String,
    pub state: String,
    pub street1: String,
    pub street2: String,
    pub zip_code: String,
}

const PROFILE_QUERY: &str = r#"
    SELECT p.id, p.name, p.age, ph.number AS phone_number,
           a.city, a.state, a.street1, a.street2, a.zip_code
    FROM person p
    JOIN phone ph ON ph.person_id = p.id
    JOIN address_join aj ON aj.person_id = p.id
    JOIN address a ON a.id = aj.address_id
    WHERE p.id = ?
"#;

/// Person repository over the shared pool
#[derive(Clone)]
pub struct PersonRepo {
    pool: AnyPool,
}

impl PersonRepo {
    pub fn new(pool: AnyPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PersonStore for PersonRepo {
    /// Single JOIN query. If the join yields several rows the first one
    /// the database returns wins.
    async fn fetch_profile(&self, person_id: i64) -> Result<PersonProfile, StoreError> {
        sqlx::query_as::<_, PersonProfile>(PROFILE_QUERY)
            .bind(person_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound { id: person_id })
    }

    /// Four inserts in one transaction.
    ///
    /// Every early return drops `tx`, which rolls the transaction back;
    /// only the final commit makes the rows visible.
    async fn create_with_address(&self, person: &NewPerson) -> Result<(), CreatePersonError> {
        let mut tx = self.pool.begin().await.at(CreateStage::Begin)?;

        let inserted = sqlx::query("INSERT INTO person (name, age) VALUES (?, ?)")
            .bind(person.name.as_str())
            .bind(person.age)
            .execute(&mut *tx)
            .await
            .at(CreateStage::InsertPerson)?;
        let person_id = generated_id(&mut *tx, &inserted)
            .await
            .at(CreateStage::PersonId)?;

        sqlx::query("INSERT INTO phone (person_id, number) VALUES (?, ?)")
            .bind(person_id)
            .bind(person.phone_number.as_str())
            .execute(&mut *tx)
            .await
            .at(CreateStage::InsertPhone)?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO address (city, state, street1, street2, zip_code)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(person.city.as_str())
        .bind(person.state.as_str())
        .bind(person.street1.as_str())
        .bind(person.street2.as_str())
        .bind(person.zip_code.as_str())
        .execute(&mut *tx)
        .await
        .at(CreateStage::InsertAddress)?;
        let address_id = generated_id(&mut *tx, &inserted)
            .await
            .at(CreateStage::AddressId)?;

        sqlx::query("INSERT INTO address_join (person_id, address_id) VALUES (?, ?)")
            .bind(person_id)
            .bind(address_id)
            .execute(&mut *tx)
            .await
            .at(CreateStage::LinkAddress)?;

        tx.commit().await.at(CreateStage::Commit)?;

        tracing::info!(person_id, address_id, "person created");
        Ok(())
    }
}

/// Id generated by the insert that produced `result`.
///
/// The MySQL driver reports it in the query result. The SQLite driver
/// doesn't through `Any`, so it is read back on the same connection,
/// before any other statement can replace it.
async fn generated_id(
    conn: &mut AnyConnection,
    result: &AnyQueryResult,
) -> Result<i64, sqlx::Error> {
    if let Some(id) = result.last_insert_id() {
        return Ok(id);
    }

    let sql = match conn.backend_name() {
        "SQLite" => "SELECT last_insert_rowid()",
        _ => "SELECT LAST_INSERT_ID()",
    };
    sqlx::query_scalar::<_, i64>(sql).fetch_one(&mut *conn).await
}
