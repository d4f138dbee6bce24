//! Seed and prune the pickup-location calendar.
//!
//! Seeding inserts the Cartesian product of the hub enumeration and the
//! allowed-date list, skipping combinations that already exist, so it is
//! safe to re-run. Clearing is the destructive companion: it removes every
//! pickup location with zero signups and refuses to run unconfirmed.

use secrecy::SecretString;
use tracing::{info, warn};

use mealtrain_core::{ALLOWED_DATES, Hub};
use mealtrain_server::db::{self, PickupLocationRepository};

/// Seed the hub x allowed-date calendar.
///
/// # Errors
///
/// Returns an error if `DATABASE_URL` is unset or a query fails.
pub async fn locations() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("DATABASE_URL")
        .map(SecretString::from)
        .map_err(|_| "DATABASE_URL not set")?;

    let pool = db::create_pool(&database_url).await?;
    info!("Connected to database");

    let repo = PickupLocationRepository::new(&pool);

    let mut created = 0_u32;
    let mut skipped = 0_u32;

    for date in ALLOWED_DATES.iter() {
        for hub in Hub::ALL {
            if repo.exists(*date, hub).await? {
                skipped += 1;
                info!(date = %date, location = %hub, "Already exists, skipping");
                continue;
            }

            let row = repo.create(*date, hub).await?;
            created += 1;
            info!(id = %row.id, date = %date, location = %hub, "Created pickup location");
        }
    }

    info!("Seeding complete!");
    info!("  Created: {created}");
    info!("  Skipped (already exist): {skipped}");

    Ok(())
}

/// Delete every pickup location with zero signups.
///
/// # Errors
///
/// Returns an error if `DATABASE_URL` is unset or the delete fails.
pub async fn clear(confirm: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !confirm {
        warn!("This deletes every pickup location without signups.");
        warn!("Re-run with --confirm to proceed.");
        return Ok(());
    }

    dotenvy::dotenv().ok();

    let database_url = std::env::var("DATABASE_URL")
        .map(SecretString::from)
        .map_err(|_| "DATABASE_URL not set")?;

    let pool = db::create_pool(&database_url).await?;
    info!("Connected to database");

    let deleted = PickupLocationRepository::new(&pool)
        .delete_unreferenced()
        .await?;

    info!("Deleted {} pickup locations", deleted.len());
    for row in &deleted {
        info!(id = %row.id, date = %row.pickup_date, location = %row.location, "Deleted");
    }

    Ok(())
}
