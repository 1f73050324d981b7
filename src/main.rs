use clap::Parser;
use miette::Result;
use witch_assets::cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = cli.printer();

    match cli.command {
        Commands::Resize(args) => witch_assets::cli::resize::run(args, &printer)?,
        Commands::Verify(args) => witch_assets::cli::verify::run(args, &printer)?,
        Commands::Validate(args) => witch_assets::cli::validate::run(args, &printer)?,
        Commands::Init(args) => witch_assets::cli::init::run(args, &printer)?,
        Commands::Completions(args) => witch_assets::cli::completions::run(args)?,
    }

    Ok(())
}
