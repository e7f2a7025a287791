mod commands;
mod terminal;

use commands::{CommandLine, Commands, login, summary, timeline};
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init();
    print::banner(commands.no_banner, commands.quiet);

    let cfg = commands.to_config();

    match commands.command {
        Commands::Login(args) => {
            print::header("logging in", commands.quiet);
            login::login(args, &cfg).await
        }
        Commands::Summary(args) => {
            print::header("attendance summary", commands.quiet);
            summary::summary(args, &cfg, commands.quiet).await
        }
        Commands::Timeline(args) => {
            print::header("attendance timeline", commands.quiet);
            timeline::timeline(args, &cfg, commands.quiet).await
        }
    }
}
