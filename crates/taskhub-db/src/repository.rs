use std::time::Duration;

use async_trait::async_trait;
use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions},
    Pool, Postgres,
};

use taskhub_core::{Task, TaskStatus};

use crate::{models::TaskRow, Result};

const MAX_CONNECTIONS: u32 = 5;
const INITIAL_RETRY_DELAY: Duration = Duration::from_secs(1);
const MAX_RETRY_DELAY: Duration = Duration::from_secs(30);

/// Connection settings for the task database.
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub host: String,
    pub name: String,
    pub user: String,
    pub password: String,
}

impl DbConfig {
    fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .database(&self.name)
            .username(&self.user)
            .password(&self.password)
    }
}

/// One operation per CRUD action, each a single parameterized statement.
/// `None` from the by-id operations means no row matched the given id.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    async fn list_tasks(&self) -> Result<Vec<Task>>;

    async fn create_task(
        &self,
        title: &str,
        description: &str,
        status: TaskStatus,
    ) -> Result<Task>;

    async fn get_task(&self, id: i32) -> Result<Option<Task>>;

    async fn update_task(
        &self,
        id: i32,
        title: &str,
        description: &str,
        status: TaskStatus,
    ) -> Result<Option<Task>>;

    async fn delete_task(&self, id: i32) -> Result<Option<Task>>;
}

#[derive(Clone)]
pub struct Database {
    pool: Pool<Postgres>,
}

impl Database {
    /// Connect to the database, retrying until it becomes reachable.
    /// The delay between attempts doubles up to a 30 second cap.
    pub async fn connect(config: &DbConfig) -> Self {
        let mut delay = INITIAL_RETRY_DELAY;
        loop {
            match PgPoolOptions::new()
                .max_connections(MAX_CONNECTIONS)
                .connect_with(config.connect_options())
                .await
            {
                Ok(pool) => {
                    tracing::info!("Database connection established");
                    return Self { pool };
                }
                Err(e) => {
                    tracing::warn!(
                        "Error connecting to the database: {}. Retrying in {}s...",
                        e,
                        delay.as_secs()
                    );
                    tokio::time::sleep(delay).await;
                    delay = (delay * 2).min(MAX_RETRY_DELAY);
                }
            }
        }
    }

    /// Create the `task` table if it does not exist yet.
    pub async fn init_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS task (
                id SERIAL PRIMARY KEY,
                title VARCHAR(255) NOT NULL,
                description TEXT,
                status VARCHAR(50) NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl TaskRepository for Database {
    async fn list_tasks(&self) -> Result<Vec<Task>> {
        let rows = sqlx::query_as::<_, TaskRow>("SELECT * FROM task")
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(TaskRow::into_task).collect()
    }

    async fn create_task(
        &self,
        title: &str,
        description: &str,
        status: TaskStatus,
    ) -> Result<Task> {
        // created_at and updated_at come from the column defaults, which
        // resolve to the same statement timestamp.
        let row = sqlx::query_as::<_, TaskRow>(
            r#"
            INSERT INTO task (title, description, status)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(title)
        .bind(description)
        .bind(status.to_string())
        .fetch_one(&self.pool)
        .await?;

        row.into_task()
    }

    async fn get_task(&self, id: i32) -> Result<Option<Task>> {
        let row = sqlx::query_as::<_, TaskRow>("SELECT * FROM task WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(TaskRow::into_task).transpose()
    }

    async fn update_task(
        &self,
        id: i32,
        title: &str,
        description: &str,
        status: TaskStatus,
    ) -> Result<Option<Task>> {
        let row = sqlx::query_as::<_, TaskRow>(
            r#"
            UPDATE task
            SET title = $1, description = $2, status = $3, updated_at = NOW()
            WHERE id = $4
            RETURNING *
            "#,
        )
        .bind(title)
        .bind(description)
        .bind(status.to_string())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(TaskRow::into_task).transpose()
    }

    async fn delete_task(&self, id: i32) -> Result<Option<Task>> {
        let row = sqlx::query_as::<_, TaskRow>("DELETE FROM task WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(TaskRow::into_task).transpose()
    }
}
