use std::env;

use galeri_crm_api::db::Database;
use galeri_crm_api::errors::AppError;
use galeri_crm_api::models::CustomerInput;
use galeri_crm_api::store::CustomerStore;

/// Integration tests against a real Postgres instance.
/// Marked ignored to avoid running against production by accident; set
/// TEST_DATABASE_URL to run.
async fn test_store() -> anyhow::Result<CustomerStore> {
    let db_url = env::var("TEST_DATABASE_URL")
        .or_else(|_| env::var("DATABASE_URL"))
        .map_err(|_| anyhow::anyhow!("Set TEST_DATABASE_URL or DATABASE_URL to run this test"))?;

    let db = Database::new(&db_url).await?;
    db.init_schema().await?;
    Ok(CustomerStore::new(db.pool.clone()))
}

fn input(ad: &str, soyad: &str) -> CustomerInput {
    CustomerInput {
        ad: ad.to_string(),
        soyad: soyad.to_string(),
        ..Default::default()
    }
}

#[tokio::test]
#[ignore]
async fn create_then_get_returns_same_fields() -> anyhow::Result<()> {
    let store = test_store().await?;

    let mut payload = input("Ali", "Veli");
    payload.telefon = Some("05551234567".to_string());
    payload.arac_bilgileri = Some("2019 Passat 1.6 TDI".to_string());

    let created = store.create(payload).await.map_err(anyhow::Error::msg)?;
    assert_eq!(created.ad, "Ali");
    assert_eq!(created.soyad, "Veli");
    assert!(!created.premium, "premium must default to false");
    assert_eq!(created.puan, "yesil", "puan must default to yesil");

    let fetched = store.get(created.id).await.map_err(anyhow::Error::msg)?;
    assert_eq!(fetched, created);

    store.delete(created.id).await.map_err(anyhow::Error::msg)?;
    Ok(())
}

#[tokio::test]
#[ignore]
async fn create_assigns_unique_ids() -> anyhow::Result<()> {
    let store = test_store().await?;

    let a = store
        .create(input("Birinci", "Müşteri"))
        .await
        .map_err(anyhow::Error::msg)?;
    let b = store
        .create(input("İkinci", "Müşteri"))
        .await
        .map_err(anyhow::Error::msg)?;
    assert_ne!(a.id, b.id);

    store.delete(a.id).await.map_err(anyhow::Error::msg)?;
    store.delete(b.id).await.map_err(anyhow::Error::msg)?;
    Ok(())
}

#[tokio::test]
#[ignore]
async fn toggle_premium_twice_restores_original_value() -> anyhow::Result<()> {
    let store = test_store().await?;

    let created = store
        .create(input("Ayşe", "Demir"))
        .await
        .map_err(anyhow::Error::msg)?;
    let original = created.premium;

    let once = store
        .toggle_premium(created.id)
        .await
        .map_err(anyhow::Error::msg)?;
    assert_eq!(once.premium, !original);
    assert!(once.updated_at.is_some(), "toggle must refresh updated_at");

    let twice = store
        .toggle_premium(created.id)
        .await
        .map_err(anyhow::Error::msg)?;
    assert_eq!(twice.premium, original);

    store.delete(created.id).await.map_err(anyhow::Error::msg)?;
    Ok(())
}

#[tokio::test]
#[ignore]
async fn delete_then_get_is_not_found() -> anyhow::Result<()> {
    let store = test_store().await?;

    let created = store
        .create(input("Silinecek", "Kayıt"))
        .await
        .map_err(anyhow::Error::msg)?;
    store.delete(created.id).await.map_err(anyhow::Error::msg)?;

    match store.get(created.id).await {
        Err(AppError::NotFound(_)) => Ok(()),
        other => anyhow::bail!("expected NotFound, got {:?}", other),
    }
}

#[tokio::test]
#[ignore]
async fn stats_agree_with_list() -> anyhow::Result<()> {
    let store = test_store().await?;

    let mut premium_input = input("Premium", "Test");
    premium_input.premium = Some(true);
    let created = store.create(premium_input).await.map_err(anyhow::Error::msg)?;

    let customers = store.list().await.map_err(anyhow::Error::msg)?;
    let stats = store.stats().await.map_err(anyhow::Error::msg)?;

    assert_eq!(stats.total, customers.len() as i64);
    assert_eq!(
        stats.premium,
        customers.iter().filter(|c| c.premium).count() as i64
    );

    store.delete(created.id).await.map_err(anyhow::Error::msg)?;
    Ok(())
}

#[tokio::test]
#[ignore]
async fn stats_this_month_counts_only_current_month_sales() -> anyhow::Result<()> {
    let store = test_store().await?;

    let today = chrono::Utc::now().date_naive();
    let last_month = today - chrono::Months::new(1);

    let before = store.stats().await.map_err(anyhow::Error::msg)?;

    let mut sold_now = input("Bu", "Ay");
    sold_now.satilan_tarih = Some(today);
    let sold_now = store.create(sold_now).await.map_err(anyhow::Error::msg)?;

    let mut sold_earlier = input("Geçen", "Ay");
    sold_earlier.satilan_tarih = Some(last_month);
    let sold_earlier = store
        .create(sold_earlier)
        .await
        .map_err(anyhow::Error::msg)?;

    // No sale date at all; must not count either.
    let unsold = store
        .create(input("Satışsız", "Kayıt"))
        .await
        .map_err(anyhow::Error::msg)?;

    let after = store.stats().await.map_err(anyhow::Error::msg)?;
    assert_eq!(
        after.this_month,
        before.this_month + 1,
        "only the sale dated in the current calendar month may count"
    );
    assert_eq!(after.total, before.total + 3);

    store.delete(sold_now.id).await.map_err(anyhow::Error::msg)?;
    store
        .delete(sold_earlier.id)
        .await
        .map_err(anyhow::Error::msg)?;
    store.delete(unsold.id).await.map_err(anyhow::Error::msg)?;
    Ok(())
}

#[tokio::test]
#[ignore]
async fn update_missing_id_fails_without_side_effects() -> anyhow::Result<()> {
    let store = test_store().await?;

    let witness = store
        .create(input("Tanık", "Kayıt"))
        .await
        .map_err(anyhow::Error::msg)?;
    let before = store.list().await.map_err(anyhow::Error::msg)?;

    match store.update(i32::MAX, input("Hayalet", "Kayıt")).await {
        Err(AppError::NotFound(_)) => {}
        other => anyhow::bail!("expected NotFound, got {:?}", other),
    }

    let after = store.list().await.map_err(anyhow::Error::msg)?;
    assert_eq!(before, after, "a failed update must not alter any record");

    store.delete(witness.id).await.map_err(anyhow::Error::msg)?;
    Ok(())
}

/// The end-to-end scenario: create -> toggle premium -> delete -> get.
#[tokio::test]
#[ignore]
async fn ali_veli_lifecycle() -> anyhow::Result<()> {
    let store = test_store().await?;

    let created = store
        .create(input("Ali", "Veli"))
        .await
        .map_err(anyhow::Error::msg)?;
    assert!(!created.premium);
    assert_eq!(created.puan, "yesil");

    let toggled = store
        .toggle_premium(created.id)
        .await
        .map_err(anyhow::Error::msg)?;
    assert!(toggled.premium);

    store.delete(created.id).await.map_err(anyhow::Error::msg)?;

    match store.get(created.id).await {
        Err(AppError::NotFound(msg)) => {
            assert_eq!(msg, "Müşteri bulunamadı");
            Ok(())
        }
        other => anyhow::bail!("expected NotFound after delete, got {:?}", other),
    }
}

#[tokio::test]
#[ignore]
async fn blank_name_is_rejected() -> anyhow::Result<()> {
    let store = test_store().await?;

    match store.create(input("", "Veli")).await {
        Err(AppError::BadRequest(msg)) => {
            assert_eq!(msg, "Ad ve soyad zorunlu");
            Ok(())
        }
        other => anyhow::bail!("expected BadRequest, got {:?}", other),
    }
}
