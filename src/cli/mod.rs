use clap::{Parser, Subcommand};

mod db;
mod store;
mod stylist;

#[derive(Debug, Parser)]
#[command(name = "salon-app", about = "Salon scheduling CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Db(db::DbCommand),
    Store(store::StoreCommand),
    Stylist(stylist::StylistCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Db(command) => db::run(command).await,
            Commands::Store(command) => store::run(command).await,
            Commands::Stylist(command) => stylist::run(command).await,
        }
    }
}
