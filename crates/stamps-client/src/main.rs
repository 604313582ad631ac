//! The `stamps` command line client

use std::io::{stderr, stdin, stdout};

use clap::Parser;
use jiff::tz::TimeZone;
use stamps_client::args::{Args, Command};
use stamps_client::clipboard::Osc52Clipboard;
use stamps_client::config::{ClientConfig, ConfigError};
use stamps_client::http::HttpActor;
use stamps_client::listing::{ListingError, ListingWorkflow};
use stamps_client::nav::{NavShell, about_page, landing_page};
use stamps_client::notify::{LogNotifier, Notification, Notifier};
use stamps_client::session::Session;
use stamps_client::upload::{SelectedFile, UploadError, UploadWorkflow};
use stamps_client::TimestampService;
use stamps_identity::{FileIdentityProvider, IdentityError, Seed, TerminalPrompt};
use tracing::{debug, error, info};

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Identity(#[from] IdentityError),

    #[error("{0}")]
    Upload(#[from] UploadError),

    #[error("{0}")]
    Listing(#[from] ListingError),
}

fn main() {
    let args = Args::parse();

    enable_logging(&args);
    debug!("command line: {:?}", args);

    if let Err(e) = run(&args) {
        error!("{e}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), CliError> {
    let config = ClientConfig::from_args(args)?;
    debug!("config: {:?}", config);

    let mut provider = FileIdentityProvider::new(&config.home).idle_timeout(config.idle_timeout);

    let Some(command) = &args.command else {
        print!("{}", landing_page());
        return Ok(());
    };

    let mut session = Session::restore(&mut provider)?;
    let actor = HttpActor::builder(&config.server)
        .timeout(config.timeout)
        .build();

    match command {
        Command::Login { import_seed } => {
            let mut prompt = TerminalPrompt::new(stdin().lock(), stderr());
            let signed_in = match import_seed {
                Some(encoded) => {
                    let seed = Seed::from_encoded(encoded)?;
                    match provider.import(seed, &mut prompt)? {
                        Some(identity) => {
                            session.replace(Some(identity));
                            true
                        }
                        None => false,
                    }
                }
                None => session.login(&mut provider, &mut prompt)?,
            };

            match session.principal() {
                Some(principal) if signed_in => info!("Connected {principal}"),
                _ => LogNotifier.notify(Notification::info("Not signed in")),
            }
        }
        Command::Logout => {
            session.logout(&mut provider)?;
        }
        Command::Whoami => match session.principal() {
            Some(principal) => println!("{principal}"),
            None => LogNotifier.notify(Notification::info("Not signed in")),
        },
        Command::Stamp { file, name } => {
            let upload = UploadWorkflow::new();
            let selected = match file.as_str() {
                "-" => SelectedFile::from_reader("stdin", stdin()),
                path => SelectedFile::from_path(path),
            };
            upload.select_file(selected);
            upload.set_name(name);

            let txid = upload.submit(&session, &actor, &LogNotifier)?;
            println!("{txid}");
        }
        Command::List => {
            let mut listing = ListingWorkflow::new();
            let fetched = match listing.begin_refresh(&session) {
                Some(identity) => {
                    LogNotifier.notify(Notification::info("Loading..."));
                    let answer = actor.get_timestamps(&identity);
                    listing.finish_refresh(answer, &LogNotifier)
                }
                None => Ok(()),
            };
            print!("{}", listing.render(&time_zone(&config), &config.time_format)?);
            fetched?;
        }
        Command::Copy { index } => {
            let mut listing = ListingWorkflow::new();
            listing.sync(&session, &actor, &LogNotifier)?;
            listing.copy_txid(*index, &mut Osc52Clipboard::new(stdout()), &LogNotifier)?;
        }
        Command::Nav => {
            print!("{}", NavShell::new().render(&session));
        }
        Command::About => {
            print!("{}", about_page());
        }
    }

    Ok(())
}

fn time_zone(config: &ClientConfig) -> TimeZone {
    if config.zulu {
        TimeZone::UTC
    } else {
        TimeZone::system()
    }
}

fn enable_logging(args: &Args) {
    let mut builder = tracing_subscriber::fmt().compact();

    if args.quiet {
        builder = builder.with_max_level(tracing::Level::ERROR);
    } else {
        match args.verbose {
            2.. => builder = builder.with_max_level(tracing::Level::TRACE),
            1 => builder = builder.with_max_level(tracing::Level::DEBUG),
            _ => builder = builder.with_max_level(tracing::Level::INFO),
        }
    }

    builder.init();
}
