use clap::{Args, Subcommand};

mod create;

#[derive(Debug, Args)]
pub(crate) struct StylistCommand {
    #[command(subcommand)]
    command: StylistSubcommand,
}

#[derive(Debug, Subcommand)]
enum StylistSubcommand {
    Create(create::CreateStylistArgs),
}

pub(crate) async fn run(command: StylistCommand) -> Result<(), String> {
    match command.command {
        StylistSubcommand::Create(args) => create::run(args).await,
    }
}
