// src/cli/migrate.rs — Database migration command
//
// Migrations run automatically whenever the store opens. This command shows
// where the schema stands and can revert it with the down scripts.

use rusqlite::Connection;
use std::path::Path;

use crate::store::schema;

/// Show migration status, run pending migrations, or roll back to `rollback_to`.
pub fn run_migrate(db: &Path, status_only: bool, rollback_to: Option<u32>) -> anyhow::Result<()> {
    if !db.exists() && (status_only || rollback_to.is_some()) {
        println!("No database found at: {}", db.display());
        return Ok(());
    }
    if let Some(parent) = db.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let conn = Connection::open(db)?;
    println!("Database: {}", db.display());
    migrate(&conn, status_only, rollback_to)?;
    print_status(&conn)
}

fn migrate(conn: &Connection, status_only: bool, rollback_to: Option<u32>) -> anyhow::Result<()> {
    if status_only {
        return Ok(());
    }
    match rollback_to {
        Some(target) => {
            let current = schema::current_version(conn)?;
            if target >= current {
                println!("Already at version {current}, nothing to roll back.");
            } else {
                schema::rollback_to(conn, target)?;
                println!("Rolled back from version {current} to {target}.");
            }
        }
        None => {
            schema::run_migrations(conn)?;
            println!("Migrations complete.");
        }
    }
    Ok(())
}

fn print_status(conn: &Connection) -> anyhow::Result<()> {
    let applied = schema::applied(conn)?;
    let current = applied.last().map(|(v, _, _)| *v).unwrap_or(0);
    println!(
        "Schema version: {current} (latest {})",
        schema::latest_version()
    );
    for (version, name, applied_at) in applied {
        println!("  v{version}: {name} (applied {applied_at})");
    }
    Ok(())
}
