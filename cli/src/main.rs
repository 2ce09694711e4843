mod adapters;
mod app;
mod commands;
mod terminal;

use app::App;
use commands::{CommandLine, Commands, compare, search, selection};
use terminal::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands: CommandLine = CommandLine::parse_args();

    logging::init_logging(commands.quiet);

    let mut app: App = App::build(&commands)?;

    match commands.command {
        Commands::Toggle { card } => selection::toggle(&mut app, &card).await,
        Commands::Remove { card } => selection::remove(&mut app, &card).await,
        Commands::Clear => {
            selection::clear(&mut app);
            Ok(())
        }
        Commands::Status => {
            selection::status(&app);
            Ok(())
        }
        Commands::Compare { expand, with } => compare::show(&app, with.as_deref(), &expand).await,
        Commands::Detail { card, expand } => compare::detail(&app, &card, &expand).await,
        Commands::Search { slot, query, pick } => search::search(&mut app, slot, &query, pick).await,
    }
}
