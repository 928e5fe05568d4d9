use mongodb::bson::doc;
use mongodb::{Client, Database};

use crate::settings::DatabaseSettings;

/// Connects to MongoDB and returns a handle to the configured database.
///
/// The returned handle is cheap to clone and pools connections
/// internally; it is established once at startup and reused for the
/// process lifetime.
pub async fn establish_connection(
    settings: &DatabaseSettings,
) -> Result<Database, mongodb::error::Error> {
    let client = Client::with_uri_str(settings.connection_string()).await?;
    let db = client.database(&settings.name);

    // Drivers connect lazily; ping so a bad address fails at startup.
    db.run_command(doc! { "ping": 1 }).await?;
    tracing::info!(database = %settings.name, "MongoDB database connection established");

    Ok(db)
}
