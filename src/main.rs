use chrono::Local;
use clap::Parser;
use nicediary::application::{
    init::init, BrowseService, ConfigService, ExportOptions, ExportService, WriteEntryService,
};
use nicediary::cli::{format_calendar, format_entry, format_entry_list, Cli, Commands};
use nicediary::domain::entry::{format_short_date, word_count_label};
use nicediary::domain::{resolve_date, CalendarMonth};
use nicediary::error::DiaryError;
use nicediary::infrastructure::FileSystemRepository;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "nicediary=debug" } else { "nicediary=warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: Cli) -> Result<(), DiaryError> {
    let today = Local::now().date_naive();

    match cli.command {
        Some(Commands::Init { path }) => init(&path),
        Some(Commands::Config { key, value, list }) => {
            let service = ConfigService::new(FileSystemRepository::discover()?);

            if list {
                let config = service.list()?;
                println!("editor = {}", config.editor);
                println!("autosave_ms = {}", config.autosave_ms);
                println!("export_name = {}", config.export_name);
                println!("export_format = {}", config.export_format);
                println!("created = {}", config.created.to_rfc3339());
            } else if let Some(k) = key {
                if let Some(v) = value {
                    service.set(&k, &v)?;
                    println!("Set {} = {}", k, v);
                } else {
                    println!("{}", service.get(&k)?);
                }
            } else {
                println!("Usage: nicediary config [--list | <key> [<value>]]");
                println!("Valid keys: editor, autosave_ms, export_name, export_format, created");
            }
            Ok(())
        }
        Some(Commands::Write { date, text }) => {
            let service = WriteEntryService::new(FileSystemRepository::discover()?);
            let outcome = service.execute(&date, text)?;
            if outcome.stored {
                println!(
                    "Saved {} ({})",
                    outcome.date,
                    word_count_label(outcome.word_count)
                );
            } else {
                println!("Entry for {} is empty; nothing stored", outcome.date);
            }
            Ok(())
        }
        Some(Commands::Show { date }) => {
            let service = BrowseService::new(FileSystemRepository::discover()?);
            print!("{}", format_entry(&service.show(&date)?));
            Ok(())
        }
        Some(Commands::Delete { date }) => {
            let service = BrowseService::new(FileSystemRepository::discover()?);
            println!("Deleted entry for {}", service.delete(&date)?);
            Ok(())
        }
        Some(Commands::List { search }) => {
            let service = BrowseService::new(FileSystemRepository::discover()?);
            let listing = service.list(search.as_deref())?;
            println!("{}", format_entry_list(&listing).trim_end());
            Ok(())
        }
        Some(Commands::Calendar { month, date }) => {
            let selected = resolve_date(&date, today)?;
            let month = match month {
                Some(m) => CalendarMonth::parse(&m)
                    .ok_or_else(|| DiaryError::InvalidDate(format!("month '{}'", m)))?,
                None => CalendarMonth::containing(selected),
            };
            print!("{}", format_calendar(&month, &month.grid(selected, today)));
            println!("Selected: {}", format_short_date(selected));
            Ok(())
        }
        Some(Commands::Export {
            all,
            dates,
            format,
            name,
            out,
        }) => {
            let service = ExportService::new(FileSystemRepository::discover()?);
            let cwd = std::env::current_dir()?;
            let out_dir = match out {
                Some(dir) => cwd.join(dir),
                None => cwd,
            };
            let options = ExportOptions {
                all,
                dates,
                format,
                name,
                out_dir: Some(out_dir),
            };
            let path = service.execute(&options)?;
            println!("Exported to {}", path.display());
            Ok(())
        }
        None => {
            println!("nicediary - personal diary");
            println!("Use --help for usage information");
            Ok(())
        }
    }
}
