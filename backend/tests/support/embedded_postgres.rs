//! Embedded PostgreSQL helpers for integration tests.
//!
//! One cluster is shared per test binary; every test gets its own temporary
//! database with the people schema applied through a plain `postgres`
//! client, so the DDL under test is the same file the service runs at
//! startup.

use std::time::Duration;

use pg_embedded_setup_unpriv::{ClusterHandle, TemporaryDatabase};
use postgres::{Client, NoTls};

use super::format_postgres_error;

const SCHEMA_SQL: &str = include_str!("../../migrations/2025-01-20-000000_create_people/up.sql");

const SHARED_CLUSTER_RETRIES: usize = 5;
const SHARED_CLUSTER_RETRY_DELAY: Duration = Duration::from_millis(500);

/// Returns the process-wide cluster, retrying transient bootstrap failures.
pub fn shared_cluster() -> Result<&'static ClusterHandle, String> {
    let mut attempt = 1;
    loop {
        match pg_embedded_setup_unpriv::test_support::shared_cluster_handle() {
            Ok(handle) => return Ok(handle),
            Err(error) if attempt < SHARED_CLUSTER_RETRIES => {
                eprintln!("pg-embed: attempt {attempt}/{SHARED_CLUSTER_RETRIES} failed: {error:?}");
                std::thread::sleep(SHARED_CLUSTER_RETRY_DELAY);
                attempt += 1;
            }
            Err(error) => return Err(format!("{error:?}")),
        }
    }
}

/// Creates a fresh database and applies the people schema to it.
pub fn provision_database(cluster: &ClusterHandle) -> Result<TemporaryDatabase, String> {
    let name = format!("people_test_{}", uuid::Uuid::new_v4().simple());
    let database = cluster
        .temporary_database(name.as_str())
        .map_err(|err| format!("create temporary database: {err:?}"))?;
    apply_schema(database.url())?;
    Ok(database)
}

/// Runs the schema DDL; safe to repeat.
pub fn apply_schema(url: &str) -> Result<(), String> {
    execute(url, SCHEMA_SQL)
}

/// Runs arbitrary SQL against the given database.
pub fn execute(url: &str, sql: &str) -> Result<(), String> {
    let mut client = connect(url)?;
    client
        .batch_execute(sql)
        .map_err(|err| format_postgres_error(&err))
}

/// Counts rows returned by a `SELECT count(*)` style query.
pub fn count(url: &str, sql: &str) -> Result<i64, String> {
    let mut client = connect(url)?;
    let row = client
        .query_one(sql, &[])
        .map_err(|err| format_postgres_error(&err))?;
    row.try_get(0).map_err(|err| format_postgres_error(&err))
}

/// Reads every stored friendship pair in key order.
pub fn friendship_rows(url: &str) -> Result<Vec<(i64, i64)>, String> {
    let mut client = connect(url)?;
    let rows = client
        .query(
            "SELECT id_first_friend, id_second_friend FROM friends \
             ORDER BY id_first_friend, id_second_friend",
            &[],
        )
        .map_err(|err| format_postgres_error(&err))?;
    rows.iter()
        .map(|row| {
            Ok((
                row.try_get(0).map_err(|err| format_postgres_error(&err))?,
                row.try_get(1).map_err(|err| format_postgres_error(&err))?,
            ))
        })
        .collect()
}

fn connect(url: &str) -> Result<Client, String> {
    Client::connect(url, NoTls).map_err(|err| format_postgres_error(&err))
}
