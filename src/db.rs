use sqlx::{postgres::PgPoolOptions, PgPool};

/// Schema for the two tables the service owns. Applied idempotently at
/// startup; there is no separate migration pipeline for a single-table CRM.
const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS customers (
    id              SERIAL PRIMARY KEY,
    ad              TEXT NOT NULL,
    soyad           TEXT NOT NULL,
    telefon         TEXT,
    mail            TEXT,
    adres           TEXT,
    meslek          TEXT,
    arac_bilgileri  TEXT,
    alinan_tarih    DATE,
    satilan_tarih   DATE,
    referans        TEXT,
    notlar          TEXT,
    premium         BOOLEAN NOT NULL DEFAULT FALSE,
    tc_kimlik       TEXT,
    puan            TEXT NOT NULL DEFAULT 'yesil',
    created_at      TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at      TIMESTAMPTZ
);

CREATE TABLE IF NOT EXISTS users (
    id            SERIAL PRIMARY KEY,
    username      TEXT NOT NULL UNIQUE,
    ad            TEXT NOT NULL,
    password_hash TEXT NOT NULL,
    created_at    TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
"#;

pub struct Database {
    pub pool: PgPool,
}

impl Database {
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;

        sqlx::query("SELECT 1").execute(&pool).await?;

        Ok(Self { pool })
    }

    /// Apply the schema. Safe to call on every startup.
    pub async fn init_schema(&self) -> anyhow::Result<()> {
        sqlx::raw_sql(SCHEMA).execute(&self.pool).await?;
        Ok(())
    }
}
