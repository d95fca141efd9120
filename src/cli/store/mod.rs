use clap::{Args, Subcommand};

mod create;

#[derive(Debug, Args)]
pub(crate) struct StoreCommand {
    #[command(subcommand)]
    command: StoreSubcommand,
}

#[derive(Debug, Subcommand)]
enum StoreSubcommand {
    Create(create::CreateStoreArgs),
}

pub(crate) async fn run(command: StoreCommand) -> Result<(), String> {
    match command.command {
        StoreSubcommand::Create(args) => create::run(args).await,
    }
}
