use crate::errors::{AppError, ResultExt};
use crate::models::{Customer, CustomerInput, Stats, DEFAULT_PUAN};
use sqlx::PgPool;

/// Database access layer for customer records.
///
/// Every operation is a single statement against the store; there are no
/// multi-step transactions and no optimistic-concurrency checks, so
/// concurrent updates to the same record resolve last-writer-wins.
pub struct CustomerStore {
    pool: PgPool,
}

impl CustomerStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All customers, newest first. Search is a client concern; no
    /// server-side filtering happens here.
    pub async fn list(&self) -> Result<Vec<Customer>, AppError> {
        let customers =
            sqlx::query_as::<_, Customer>("SELECT * FROM customers ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;
        Ok(customers)
    }

    /// One customer by id, or `NotFound`.
    pub async fn get(&self, id: i32) -> Result<Customer, AppError> {
        sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Müşteri bulunamadı".to_string()))
    }

    /// Insert a new customer. `ad` and `soyad` must be non-empty;
    /// unspecified optional fields fall back to null / false / the
    /// default rating tier. Returns the created row including the
    /// generated id and timestamps.
    pub async fn create(&self, input: CustomerInput) -> Result<Customer, AppError> {
        validate_required(&input)?;

        let customer = sqlx::query_as::<_, Customer>(
            r#"INSERT INTO customers
               (ad, soyad, telefon, mail, adres, meslek, arac_bilgileri,
                alinan_tarih, satilan_tarih, referans, notlar, premium, tc_kimlik, puan)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
               RETURNING *"#,
        )
        .bind(input.ad.trim())
        .bind(input.soyad.trim())
        .bind(&input.telefon)
        .bind(&input.mail)
        .bind(&input.adres)
        .bind(&input.meslek)
        .bind(&input.arac_bilgileri)
        .bind(input.alinan_tarih)
        .bind(input.satilan_tarih)
        .bind(&input.referans)
        .bind(&input.notlar)
        .bind(input.premium.unwrap_or(false))
        .bind(&input.tc_kimlik)
        .bind(input.puan.as_deref().unwrap_or(DEFAULT_PUAN))
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(id = customer.id, "Customer created");
        Ok(customer)
    }

    /// Full replace of all mutable fields. Refreshes `updated_at`;
    /// `NotFound` when the id does not exist.
    pub async fn update(&self, id: i32, input: CustomerInput) -> Result<Customer, AppError> {
        validate_required(&input)?;

        let customer = sqlx::query_as::<_, Customer>(
            r#"UPDATE customers SET
               ad=$1, soyad=$2, telefon=$3, mail=$4, adres=$5, meslek=$6,
               arac_bilgileri=$7, alinan_tarih=$8, satilan_tarih=$9, referans=$10,
               notlar=$11, premium=$12, tc_kimlik=$13, puan=$14, updated_at=NOW()
               WHERE id=$15
               RETURNING *"#,
        )
        .bind(input.ad.trim())
        .bind(input.soyad.trim())
        .bind(&input.telefon)
        .bind(&input.mail)
        .bind(&input.adres)
        .bind(&input.meslek)
        .bind(&input.arac_bilgileri)
        .bind(input.alinan_tarih)
        .bind(input.satilan_tarih)
        .bind(&input.referans)
        .bind(&input.notlar)
        .bind(input.premium.unwrap_or(false))
        .bind(&input.tc_kimlik)
        .bind(input.puan.as_deref().unwrap_or(DEFAULT_PUAN))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Müşteri bulunamadı".to_string()))?;

        tracing::info!(id, "Customer updated");
        Ok(customer)
    }

    /// Flip the premium flag in place.
    pub async fn toggle_premium(&self, id: i32) -> Result<Customer, AppError> {
        sqlx::query_as::<_, Customer>(
            "UPDATE customers SET premium = NOT premium, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Müşteri bulunamadı".to_string()))
    }

    /// Hard delete. Irreversible; `NotFound` when the id does not exist.
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Müşteri bulunamadı".to_string()));
        }

        tracing::info!(id, "Customer deleted");
        Ok(())
    }

    /// Aggregate counts for the dashboard: total customers, premium
    /// customers, and customers sold in the current calendar month.
    pub async fn stats(&self) -> Result<Stats, AppError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM customers")
            .fetch_one(&self.pool)
            .await
            .context("counting customers")?;

        let premium =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM customers WHERE premium = true")
                .fetch_one(&self.pool)
                .await
                .context("counting premium customers")?;

        let this_month = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM customers \
             WHERE DATE_TRUNC('month', satilan_tarih) = DATE_TRUNC('month', CURRENT_DATE)",
        )
        .fetch_one(&self.pool)
        .await
        .context("counting this month's sales")?;

        Ok(Stats {
            total,
            premium,
            this_month,
        })
    }
}

/// Required-field check shared by create and update. The only validation
/// the service performs.
fn validate_required(input: &CustomerInput) -> Result<(), AppError> {
    if input.ad.trim().is_empty() || input.soyad.trim().is_empty() {
        return Err(AppError::BadRequest("Ad ve soyad zorunlu".to_string()));
    }
    Ok(())
}
