use bookshelf::{books::ShelfSettings, commands};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "bookshelf")]
#[command(about = "Resolve a BookService and inspect a Book with dugi-di")]
struct Cli {
    /// Run in verbose mode
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve a BookService and shelve a book with it
    Inject {
        /// Name of the shelf
        #[arg(long, default_value = "main")]
        shelf_name: String,

        /// Number of books the shelf holds
        #[arg(long, default_value_t = 10)]
        capacity: usize,
    },
    /// Build a Book through its descriptor and write its private subtitle
    Reflect,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    // Logs go to stderr, stdout is reserved for the demonstration output
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut stdout = std::io::stdout().lock();
    match cli.command {
        Some(Command::Inject {
            shelf_name,
            capacity,
        }) => {
            let settings = ShelfSettings {
                name: shelf_name,
                capacity,
            };
            commands::inject(settings, &mut stdout)?;
        }
        Some(Command::Reflect) => commands::reflect(&mut stdout)?,
        None => commands::inject(ShelfSettings::default(), &mut stdout)?,
    }

    Ok(())
}
