use tracing::info;

use crate::storage::UserStore;
use crate::users::NewUser;

const SAMPLE_USERS: &[(&str, f64)] = &[
    ("Alice", 2500.50),
    ("Bob", 3800.75),
    ("Charlie", 5200.00),
];

/// Inserts a handful of sample users, but only into an empty collection.
/// Gated behind `SEED_SAMPLE_DATA`; never touches existing data.
pub async fn seed_if_empty(store: &dyn UserStore) -> anyhow::Result<()> {
    if store.count().await? > 0 {
        return Ok(());
    }

    info!("collection is empty, adding sample data");
    for (name, money) in SAMPLE_USERS {
        let user = NewUser::new(*name, *money)?;
        store.insert(user).await?;
    }
    info!(count = SAMPLE_USERS.len(), "sample data added");

    Ok(())
}
