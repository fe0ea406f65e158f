// Copyright (C) 2024-2025 Fred Clausen and the ratatui project contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! # xtask - Project Automation
//!
//! - `cargo xtask ci`: lint, build, test, and migration verification
//! - `cargo xtask verify-migrations`: applies the embedded migrations to a scratch
//!   `SQLite` database, checks the schema the agenda relies on, then reverts and
//!   re-applies them
//! - `cargo xtask seed-db --database <path>`: creates a database file with
//!   sample photographers, customers, packages, bookings, and gallery images
//!
//! Standard `cargo test` needs no infrastructure; everything here is opt-in.

#![deny(
    clippy::pedantic,
    //clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use std::{
    fmt::Debug,
    io,
    path::{Path, PathBuf},
    process::Output,
};

use cargo_metadata::MetadataCommand;
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::{eyre::Context, Result};
use diesel::sql_types::{BigInt, Integer, Text};
use diesel::{QueryableByName, RunQueryDsl, SqliteConnection};
use duct::cmd;
use std::collections::{BTreeMap, BTreeSet};
use studio_agenda_persistence::{NewBooking, Persistence};
use tracing::level_filters::LevelFilter;
use tracing_log::AsTrace;

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .without_time()
        .init();

    match args.run() {
        Ok(()) => (),
        Err(err) => {
            tracing::error!("{err}");
            std::process::exit(1);
        }
    }
    Ok(())
}

#[derive(Debug, Parser)]
#[command(bin_name = "cargo xtask", styles = clap_cargo::style::CLAP_STYLING)]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

impl Args {
    fn run(self) -> Result<()> {
        self.command.run()
    }

    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }
}

#[derive(Clone, Debug, Subcommand)]
enum Command {
    /// Run CI checks (lint, build, test, migrations)
    CI,

    /// Build the workspace
    #[command(visible_alias = "b")]
    Build,

    /// Run cargo check
    #[command(visible_alias = "c")]
    Check,

    /// Lint clippy, docs, and formatting
    #[command(visible_alias = "l")]
    Lint,

    /// Run clippy on the workspace
    #[command(visible_alias = "cl")]
    LintClippy,

    /// Check documentation for errors and warnings
    #[command(visible_alias = "d")]
    LintDocs,

    /// Check for formatting issues
    #[command(visible_alias = "lf")]
    LintFormatting,

    /// Fix formatting issues
    #[command(visible_alias = "fmt")]
    FixFormatting,

    /// Run unit and doc tests
    #[command(visible_alias = "t")]
    Test,

    /// Verify the migrations produce the schema the agenda relies on
    #[command(visible_alias = "vm")]
    VerifyMigrations,

    /// Create a database file with sample data
    #[command(visible_alias = "seed")]
    SeedDb {
        /// Path of the `SQLite` database file to create or extend
        #[arg(short, long, default_value = "studio-agenda.db")]
        database: PathBuf,
    },
}

impl Command {
    fn run(self) -> Result<()> {
        match self {
            Self::CI => ci(),
            Self::Build => build(),
            Self::Check => check(),
            Self::Lint => lint(),
            Self::LintClippy => lint_clippy(),
            Self::LintDocs => lint_docs(),
            Self::LintFormatting => lint_format(),
            Self::FixFormatting => fix_format(),
            Self::Test => test(),
            Self::VerifyMigrations => verify_migrations(),
            Self::SeedDb { database } => seed_db(&database),
        }
    }
}

/// Run CI checks (lint, build, test, migrations)
fn ci() -> Result<()> {
    lint()?;
    build()?;
    test()?;
    verify_migrations()?;
    Ok(())
}

fn build() -> Result<()> {
    run_cargo(vec!["build", "--workspace", "--all-targets"])
}

fn check() -> Result<()> {
    run_cargo(vec!["check", "--workspace", "--all-targets"])
}

fn lint() -> Result<()> {
    lint_clippy()?;
    lint_docs()?;
    lint_format()?;
    Ok(())
}

fn lint_clippy() -> Result<()> {
    run_cargo(vec![
        "clippy",
        "--workspace",
        "--all-targets",
        "--",
        "-D",
        "warnings",
    ])
}

/// Builds the docs of every default member with warnings denied
fn lint_docs() -> Result<()> {
    let meta = MetadataCommand::new()
        .exec()
        .wrap_err("failed to get cargo metadata")?;

    for package in meta.workspace_default_packages() {
        cmd("cargo", ["doc", "--no-deps", "--package", &package.name])
            .env("RUSTDOCFLAGS", "-D warnings")
            .run_with_trace()?;
    }

    Ok(())
}

fn lint_format() -> Result<()> {
    run_cargo(vec!["fmt", "--all", "--check"])
}

fn fix_format() -> Result<()> {
    run_cargo(vec!["fmt", "--all"])
}

/// Unit tests first, then doc tests
fn test() -> Result<()> {
    run_cargo(vec!["test", "--workspace", "--all-targets"])?;
    run_cargo(vec!["test", "--workspace", "--doc"])
}

fn run_cargo(args: Vec<&str>) -> Result<()> {
    cmd("cargo", args).run_with_trace()?;
    Ok(())
}

/// Tables the agenda reads or writes.
const EXPECTED_TABLES: [&str; 9] = [
    "booking_status_history",
    "bookings",
    "customers",
    "gallery_images",
    "lifecycle_statuses",
    "packages",
    "payments",
    "photographers",
    "schedule_slots",
];

/// Verify the embedded migrations.
///
/// 1. Applies every migration to an in-memory `SQLite` database
/// 2. Introspects the resulting schema
/// 3. Checks the tables, the `(photographer_id, slot_date)` upsert key, the
///    booking foreign keys, and the seeded lifecycle catalog
/// 4. Reverts every migration and checks nothing is left behind
/// 5. Re-applies the migrations to prove the round trip is clean
fn verify_migrations() -> Result<()> {
    use diesel::Connection;
    use diesel_migrations::{embed_migrations, MigrationHarness};

    #[allow(clippy::items_after_statements)]
    const MIGRATIONS: diesel_migrations::EmbeddedMigrations =
        embed_migrations!("../crates/persistence/migrations");

    tracing::info!("Starting migration verification");

    let mut conn = SqliteConnection::establish(":memory:")
        .wrap_err("Failed to create SQLite in-memory database")?;

    diesel::sql_query("PRAGMA foreign_keys = ON")
        .execute(&mut conn)
        .wrap_err("Failed to enable foreign keys on SQLite")?;

    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to apply migrations: {}", e))?;
    tracing::info!("Migrations applied successfully");

    let schema = introspect_sqlite_schema(&mut conn)?;
    check_schema(&schema)?;
    check_lifecycle_catalog(&mut conn)?;

    conn.revert_all_migrations(MIGRATIONS)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to revert migrations: {}", e))?;
    let reverted = introspect_sqlite_schema(&mut conn)?;
    if !reverted.tables.is_empty() {
        return Err(color_eyre::eyre::eyre!(
            "Tables left after reverting all migrations: {:?}",
            reverted.tables.keys().collect::<Vec<_>>()
        ));
    }
    tracing::info!("All migrations reverted cleanly");

    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to re-apply migrations: {}", e))?;

    tracing::info!("✓ Migration verification passed");
    Ok(())
}

/// Normalized schema representation
#[derive(Debug, Clone, PartialEq, Eq)]
struct Schema {
    tables: BTreeMap<String, Table>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Table {
    columns: BTreeSet<String>,
    foreign_keys: BTreeSet<ForeignKey>,
    unique_constraints: BTreeSet<UniqueConstraint>,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct ForeignKey {
    from_column: String,
    to_table: String,
    to_column: String,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct UniqueConstraint {
    columns: Vec<String>,
}

/// Introspect `SQLite` schema
fn introspect_sqlite_schema(conn: &mut SqliteConnection) -> Result<Schema> {
    #[derive(QueryableByName)]
    struct TableName {
        #[diesel(sql_type = Text)]
        name: String,
    }

    #[derive(QueryableByName)]
    struct ColumnInfo {
        #[diesel(sql_type = Text)]
        name: String,
    }

    #[derive(QueryableByName)]
    struct ForeignKeyInfo {
        #[diesel(sql_type = Text)]
        table: String,
        #[diesel(sql_type = Text)]
        from: String,
        #[diesel(sql_type = Text)]
        to: String,
    }

    #[derive(QueryableByName)]
    struct IndexInfo {
        #[diesel(sql_type = Text)]
        name: String,
        #[diesel(sql_type = Text)]
        origin: String,
    }

    #[derive(QueryableByName)]
    struct IndexColumnInfo {
        #[diesel(sql_type = Text)]
        name: String,
    }

    let mut schema = Schema {
        tables: BTreeMap::new(),
    };

    let tables: Vec<TableName> = diesel::sql_query(
        "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' AND name != '__diesel_schema_migrations' ORDER BY name"
    )
    .load(conn)
    .wrap_err("Failed to query SQLite tables")?;

    for table in tables {
        let columns: Vec<ColumnInfo> =
            diesel::sql_query(format!("PRAGMA table_info({})", table.name))
                .load(conn)
                .wrap_err(format!("Failed to get columns for table {}", table.name))?;

        let fks: Vec<ForeignKeyInfo> =
            diesel::sql_query(format!("PRAGMA foreign_key_list({})", table.name))
                .load(conn)
                .wrap_err(format!(
                    "Failed to get foreign keys for table {}",
                    table.name
                ))?;

        let indexes: Vec<IndexInfo> =
            diesel::sql_query(format!("PRAGMA index_list({})", table.name))
                .load(conn)
                .wrap_err(format!("Failed to get indexes for table {}", table.name))?;

        let mut unique_constraints: BTreeSet<UniqueConstraint> = BTreeSet::new();
        for idx in indexes {
            // Origin 'u' marks a UNIQUE constraint (backed by sqlite_autoindex_*)
            if idx.origin != "u" {
                continue;
            }
            let index_columns: Vec<IndexColumnInfo> =
                diesel::sql_query(format!("PRAGMA index_info({})", idx.name))
                    .load(conn)
                    .wrap_err(format!("Failed to get index columns for {}", idx.name))?;
            unique_constraints.insert(UniqueConstraint {
                columns: index_columns.into_iter().map(|c| c.name).collect(),
            });
        }

        schema.tables.insert(
            table.name,
            Table {
                columns: columns.into_iter().map(|c| c.name).collect(),
                foreign_keys: fks
                    .into_iter()
                    .map(|fk| ForeignKey {
                        from_column: fk.from,
                        to_table: fk.table,
                        to_column: fk.to,
                    })
                    .collect(),
                unique_constraints,
            },
        );
    }

    Ok(schema)
}

fn require_table<'a>(schema: &'a Schema, name: &str) -> Result<&'a Table> {
    schema
        .tables
        .get(name)
        .ok_or_else(|| color_eyre::eyre::eyre!("Table '{}' is missing", name))
}

fn require_foreign_key(
    table_name: &str,
    table: &Table,
    from: &str,
    to_table: &str,
    to_column: &str,
) -> Result<()> {
    let expected = ForeignKey {
        from_column: from.to_string(),
        to_table: to_table.to_string(),
        to_column: to_column.to_string(),
    };
    if table.foreign_keys.contains(&expected) {
        Ok(())
    } else {
        Err(color_eyre::eyre::eyre!(
            "Foreign key {}.{} -> {}.{} is missing",
            table_name,
            from,
            to_table,
            to_column
        ))
    }
}

/// Check the schema invariants the agenda depends on
fn check_schema(schema: &Schema) -> Result<()> {
    let found: BTreeSet<&str> = schema.tables.keys().map(String::as_str).collect();
    let expected: BTreeSet<&str> = EXPECTED_TABLES.into_iter().collect();
    if found != expected {
        return Err(color_eyre::eyre::eyre!(
            "Table set mismatch: missing {:?}, unexpected {:?}",
            expected.difference(&found).collect::<Vec<_>>(),
            found.difference(&expected).collect::<Vec<_>>()
        ));
    }

    let slots = require_table(schema, "schedule_slots")?;
    let upsert_key = UniqueConstraint {
        columns: vec![String::from("photographer_id"), String::from("slot_date")],
    };
    if !slots.unique_constraints.contains(&upsert_key) {
        return Err(color_eyre::eyre::eyre!(
            "schedule_slots lacks UNIQUE (photographer_id, slot_date); found {:?}",
            slots.unique_constraints
        ));
    }
    for column in ["start_time", "end_time", "available"] {
        if !slots.columns.contains(column) {
            return Err(color_eyre::eyre::eyre!(
                "schedule_slots.{} is missing",
                column
            ));
        }
    }

    let bookings = require_table(schema, "bookings")?;
    require_foreign_key("bookings", bookings, "schedule_slot_id", "schedule_slots", "slot_id")?;
    require_foreign_key("bookings", bookings, "status_id", "lifecycle_statuses", "status_id")?;

    tracing::info!(tables = schema.tables.len(), "Schema checks passed");
    Ok(())
}

/// Check the lifecycle catalog seeded by the initial migration
fn check_lifecycle_catalog(conn: &mut SqliteConnection) -> Result<()> {
    #[derive(QueryableByName)]
    struct StatusRow {
        #[diesel(sql_type = BigInt)]
        status_id: i64,
        #[diesel(sql_type = Text)]
        name: String,
        #[diesel(sql_type = Integer)]
        sort_order: i32,
    }

    let rows: Vec<StatusRow> = diesel::sql_query(
        "SELECT status_id, name, sort_order FROM lifecycle_statuses ORDER BY sort_order",
    )
    .load(conn)
    .wrap_err("Failed to read the lifecycle catalog")?;

    let names: Vec<&str> = rows.iter().map(|row| row.name.as_str()).collect();
    if names != ["Pendiente", "Reservada", "En edición", "Entregada", "Cancelada"] {
        return Err(color_eyre::eyre::eyre!(
            "Unexpected lifecycle catalog: {:?}",
            names
        ));
    }
    for row in &rows {
        tracing::debug!(
            status_id = row.status_id,
            name = %row.name,
            sort_order = row.sort_order,
            "Lifecycle status"
        );
    }
    Ok(())
}

/// Create (or extend) a database file with sample data.
fn seed_db(database: &Path) -> Result<()> {
    tracing::info!("Seeding database at {}", database.display());
    let mut persistence =
        Persistence::new_with_file(database).wrap_err("Failed to open the database")?;

    let photographers: Vec<i64> = ["Lucía Torres", "Martín Ríos", "Sofía Herrera"]
        .into_iter()
        .map(|name| persistence.create_photographer(name))
        .collect::<Result<_, _>>()?;
    let customers: Vec<i64> = [
        ("Ana Pérez", Some("ana@example.com")),
        ("Jorge Medina", None),
    ]
    .into_iter()
    .map(|(name, email)| persistence.create_customer(name, email))
    .collect::<Result<_, _>>()?;
    let packages: Vec<i64> = [
        ("Sesión de estudio", 1200.0),
        ("Sesión familiar", 1800.0),
        ("Boda completa", 15000.0),
    ]
    .into_iter()
    .map(|(name, price)| persistence.create_package(name, price))
    .collect::<Result<_, _>>()?;

    let mut bookings: usize = 0;
    for (customer, package) in customers.iter().zip(packages.iter()) {
        persistence.create_booking(&NewBooking {
            customer_id: *customer,
            package_id: *package,
            schedule_slot_id: None,
            status_id: None,
            payment_status: None,
        })?;
        bookings += 1;
    }

    persistence.create_gallery_image(
        "Retrato en estudio",
        "https://img.example.com/retrato.jpg",
        Some("retratos"),
    )?;

    tracing::info!(
        photographers = photographers.len(),
        customers = customers.len(),
        packages = packages.len(),
        bookings,
        "✓ Database seeded"
    );
    Ok(())
}

/// An extension trait for `duct::Expression` that logs the command being run
/// before running it.
trait ExpressionExt {
    /// Run the command and log the command being run
    fn run_with_trace(&self) -> io::Result<Output>;
}

impl ExpressionExt for duct::Expression {
    fn run_with_trace(&self) -> io::Result<Output> {
        tracing::info!("running command: {:?}", self);
        self.run().inspect_err(|_| {
            // The command that was run may have scrolled off the screen, so repeat it here
            tracing::error!("failed to run command: {:?}", self);
        })
    }
}
