use sqlx::{postgres::PgPoolOptions, PgPool};

#[derive(Clone)]
pub struct DatabaseConnection {
    pub pool: PgPool,
}

pub async fn connect(database_url: &str, max_connections: u32) -> DatabaseConnection {
    DatabaseConnection {
        pool: PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .unwrap_or_else(|e| {
                tracing::error!("{:}", e);
                panic!("Error connecting to database")
            }),
    }
}

pub async fn migrate(db_conn: DatabaseConnection) {
    match sqlx::migrate!().run(&db_conn.pool).await {
        Ok(_) => (),
        Err(err) => {
            tracing::error!("{}", err);
            panic!("Failed to run database migrations");
        }
    }
}
