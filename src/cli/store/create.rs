use clap::Args;
use salon_app::{
    database::{self, Db},
    domain::stores::{PgStoresService, StoresService, records::NewStore},
};

#[derive(Debug, Args)]
pub(crate) struct CreateStoreArgs {
    /// Store display name
    #[arg(long)]
    name: String,

    /// Create the store inactive; customers cannot see inactive stores
    #[arg(long)]
    inactive: bool,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: CreateStoreArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgStoresService::new(Db::new(pool));

    let store = service
        .create_store(NewStore {
            name: args.name,
            is_active: !args.inactive,
        })
        .await
        .map_err(|error| format!("failed to create store: {error}"))?;

    println!("store_id: {}", store.id);
    println!("store_name: {}", store.name);
    println!("is_active: {}", store.is_active);

    Ok(())
}
