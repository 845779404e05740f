use anyhow::{bail, Context, Result};
use log::info;
use rusqlite::Connection;

/// Schema scripts in order; entry `i` upgrades the database to version `i + 1`.
const MIGRATIONS: &[(&str, &str)] = &[
    ("create books", include_str!("schemas/schema_v1.sql")),
    (
        "rename summary to synopsis, add recommended_by",
        include_str!("schemas/schema_v2.sql"),
    ),
];

const CURRENT_SCHEMA_VERSION: i32 = MIGRATIONS.len() as i32;

fn schema_version(conn: &Connection) -> Result<i32> {
    conn.pragma_query_value(None, "user_version", |row| row.get(0))
        .context("failed to read user_version pragma")
}

/// Bring the books schema up to date inside a single transaction.
pub fn run_migrations(conn: &mut Connection) -> Result<()> {
    let stored = schema_version(conn)?;
    if stored > CURRENT_SCHEMA_VERSION {
        bail!("books schema v{stored} is newer than this build understands (v{CURRENT_SCHEMA_VERSION})");
    }

    let pending = &MIGRATIONS[stored.max(0) as usize..];
    if pending.is_empty() {
        return Ok(());
    }

    let tx = conn
        .transaction()
        .context("failed to open migration transaction")?;
    for (offset, (name, script)) in pending.iter().enumerate() {
        let version = stored.max(0) + offset as i32 + 1;
        tx.execute_batch(script)
            .with_context(|| format!("books schema v{version} ({name}) failed"))?;
        info!("Applied books schema v{version}: {name}");
    }
    tx.pragma_update(None, "user_version", CURRENT_SCHEMA_VERSION)
        .context("failed to record schema version")?;
    tx.commit().context("failed to commit migrations")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_version(conn: &Connection) -> i32 {
        schema_version(conn).unwrap()
    }

    #[test]
    fn fresh_database_reaches_current_version() {
        let mut conn = Connection::open_in_memory().unwrap();
        run_migrations(&mut conn).unwrap();

        assert_eq!(user_version(&conn), CURRENT_SCHEMA_VERSION);
        conn.execute(
            "INSERT INTO books (id, title, author, date_added, date_started, date_completed, synopsis, recommended_by)
             VALUES ('a', 'T', 'A', 'x', 'y', 'z', 's', 'r')",
            [],
        )
        .unwrap();
    }

    #[test]
    fn migrations_are_idempotent() {
        let mut conn = Connection::open_in_memory().unwrap();
        run_migrations(&mut conn).unwrap();
        run_migrations(&mut conn).unwrap();

        assert_eq!(user_version(&conn), CURRENT_SCHEMA_VERSION);
    }

    #[test]
    fn v1_rows_keep_their_summary_as_synopsis() {
        let mut conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(include_str!("schemas/schema_v1.sql"))
            .unwrap();
        conn.pragma_update(None, "user_version", 1).unwrap();
        conn.execute(
            "INSERT INTO books (id, title, author, date_added, date_started, date_completed, summary)
             VALUES ('a', 'T', 'A', 'x', 'y', 'z', 'old summary')",
            [],
        )
        .unwrap();

        run_migrations(&mut conn).unwrap();

        let (synopsis, recommended_by): (String, String) = conn
            .query_row(
                "SELECT synopsis, recommended_by FROM books WHERE id = 'a'",
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .unwrap();
        assert_eq!(synopsis, "old summary");
        assert_eq!(recommended_by, "");
    }

    #[test]
    fn newer_database_is_rejected() {
        let mut conn = Connection::open_in_memory().unwrap();
        conn.pragma_update(None, "user_version", CURRENT_SCHEMA_VERSION + 1)
            .unwrap();

        assert!(run_migrations(&mut conn).is_err());
    }
}
