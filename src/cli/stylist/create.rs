use clap::Args;
use salon_app::{
    auth::models::StaffUserId,
    database::{self, Db},
    domain::stylists::{PgStylistsService, StylistsService, records::NewStylist},
};

#[derive(Debug, Args)]
pub(crate) struct CreateStylistArgs {
    /// Staff account id the stylist logs in as
    #[arg(long)]
    staff_user_id: i64,

    /// Stylist display name
    #[arg(long)]
    name: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: CreateStylistArgs) -> Result<(), String> {
    if args.staff_user_id <= 0 {
        return Err("staff_user_id must be positive".to_string());
    }

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgStylistsService::new(Db::new(pool));

    let stylist = service
        .create_stylist(NewStylist {
            staff_user_id: StaffUserId::from_i64(args.staff_user_id),
            name: args.name,
        })
        .await
        .map_err(|error| format!("failed to create stylist: {error}"))?;

    println!("stylist_id: {}", stylist.id);
    println!("stylist_name: {}", stylist.name);

    Ok(())
}
