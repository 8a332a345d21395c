//! Core application

use anyhow::{Context, Result};

use crate::core::cli::{self, Commands};
use crate::core::config::AppConfig;
use crate::core::constants::{APP_NAME_LOWER, ENV_LOG};
use crate::data::SqliteService;
use crate::data::filters::{QueryFilter, parse_filter, validate_identifier};
use crate::data::sql::{Backend, RenderedFilter, render, where_clause};

pub struct CoreApp;

impl CoreApp {
    /// Run the application with CLI argument parsing
    pub async fn run() -> Result<()> {
        dotenvy::dotenv().ok();
        Self::init_logging();

        tracing::debug!("Application starting");

        let (cli_config, command) = cli::parse();
        tracing::trace!(command = ?command, "Parsed command");

        match command {
            Commands::Render {
                filter,
                dialect,
                table,
            } => {
                let rendered = Self::render_filter(&filter, dialect, table.as_deref())?;
                println!("{}", serde_json::to_string_pretty(&rendered)?);
                Ok(())
            }
            Commands::Count { table, filter } => {
                let config = AppConfig::load(&cli_config)?;
                let count = Self::count_rows(&config, &table, filter.as_deref()).await?;
                println!("{}", count);
                Ok(())
            }
        }
    }

    fn init_logging() {
        let default_filter = format!("info,{}=info", APP_NAME_LOWER);

        let filter = std::env::var(ENV_LOG)
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or(default_filter);

        tracing_subscriber::fmt()
            .with_target(false)
            .with_thread_ids(false)
            .with_level(true)
            .with_ansi(true)
            .with_writer(std::io::stderr)
            .compact()
            .with_env_filter(filter)
            .init();
    }

    /// Parse a JSON filter and render it, optionally as a full SELECT
    fn render_filter(json: &str, backend: Backend, table: Option<&str>) -> Result<RenderedFilter> {
        let filter = parse_filter(json).context("Invalid filter")?;
        let rendered = match table {
            Some(table) => {
                validate_identifier(table)?;
                where_clause(&format!("SELECT * FROM {}", table), &filter, backend.dialect())?
            }
            None => render(&filter, backend.dialect())?,
        };
        Ok(rendered)
    }

    /// Count rows of a table in the configured database
    async fn count_rows(config: &AppConfig, table: &str, json: Option<&str>) -> Result<u64> {
        validate_identifier(table)?;
        let filter = match json {
            Some(json) => parse_filter(json).context("Invalid filter")?,
            None => QueryFilter::empty(),
        };

        let service = SqliteService::init(&config.database)
            .await
            .with_context(|| format!("Failed to open database: {}", config.database.url))?;
        let count = service.count(table, &filter).await;
        service.close().await;

        count.with_context(|| format!("Failed to count rows in {}", table))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::DatabaseConfig;
    use crate::data::filters::FilterValue;

    #[test]
    fn test_render_filter_postgres() {
        let json = r#"{"op": "or", "filters": [
            {"op": "in", "column": "site", "values": ["mailer", "auth"]},
            {"op": ">=", "column": "visits", "value": 10}
        ]}"#;
        let rendered = CoreApp::render_filter(json, Backend::Postgres, None).unwrap();
        assert_eq!(rendered.sql, "(site IN ($1, $2) OR visits >= $3)");
        assert_eq!(
            rendered.values,
            vec![
                FilterValue::from("mailer"),
                FilterValue::from("auth"),
                FilterValue::Int(10)
            ]
        );
    }

    #[test]
    fn test_render_filter_with_table() {
        let json = r#"{"op": "is null", "column": "owner"}"#;
        let rendered = CoreApp::render_filter(json, Backend::Sqlite, Some("sites")).unwrap();
        assert_eq!(rendered.sql, "SELECT * FROM sites WHERE owner IS NULL");
        assert!(rendered.values.is_empty());

        assert!(CoreApp::render_filter(json, Backend::Sqlite, Some("sites; --")).is_err());
    }

    #[tokio::test]
    async fn test_count_rows_against_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            database: DatabaseConfig {
                url: format!("sqlite://{}", dir.path().join("count.db").display()),
                ..DatabaseConfig::default()
            },
        };

        let service = SqliteService::init(&config.database).await.unwrap();
        sqlx::query("CREATE TABLE sites (id INTEGER PRIMARY KEY, visits INTEGER)")
            .execute(service.pool())
            .await
            .unwrap();
        sqlx::query("INSERT INTO sites (visits) VALUES (5), (15), (25)")
            .execute(service.pool())
            .await
            .unwrap();
        service.close().await;

        assert_eq!(CoreApp::count_rows(&config, "sites", None).await.unwrap(), 3);
        let json = r#"{"op": ">", "column": "visits", "value": 10}"#;
        assert_eq!(
            CoreApp::count_rows(&config, "sites", Some(json)).await.unwrap(),
            2
        );
        assert!(CoreApp::count_rows(&config, "missing", None).await.is_err());
    }
}
