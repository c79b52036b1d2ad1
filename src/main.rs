use clap::Parser;
use miette::Result;
use sat::cli::{Cli, Commands};

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head`, `grep -q`, etc. causes a panic on broken pipe.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }

    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;

    match cli.command {
        Commands::Summary(args) => sat::cli::commands::summary::run(args, &global),
        Commands::Parts(args) => sat::cli::commands::parts::run(args, &global),
        Commands::Report(args) => sat::cli::commands::report::run(args, &global),
        Commands::Suppliers(args) => sat::cli::commands::suppliers::run(args, &global),
        Commands::Producibility(args) => sat::cli::commands::producibility::run(args, &global),
        Commands::Quote(args) => sat::cli::commands::quote::run(args, &global),
        Commands::Consolidate(args) => sat::cli::commands::consolidate::run(args, &global),
    }
}
