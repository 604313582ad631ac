#![doc(hidden)]

use clap::{Parser, Subcommand};
use stamps_common::display::DEFAULT_DATE_FORMAT;

/// Arguments for the `stamps` CLI
#[derive(Parser, Debug)]
#[command(version, about = "Timestamp files with the Stamps service")]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Base URL of the timestamping service
    #[clap(
        short = 's',
        long,
        value_name = "URL",
        env = "STAMPS_SERVER",
        default_value = "http://localhost:8000",
        global = true
    )]
    pub server: String,

    /// Directory holding the identity and session files [default: $HOME/.stamps]
    #[clap(long, value_name = "DIR", env = "STAMPS_HOME", global = true)]
    pub home: Option<String>,

    #[clap(
        short = 't',
        long,
        value_name = "SECONDS",
        env = "STAMPS_TIMEOUT",
        help = "Seconds to wait for the service to answer",
        default_value_t = 10,
        global = true
    )]
    pub timeout: u64,

    #[clap(
        long,
        value_name = "MINUTES",
        env = "STAMPS_IDLE_TIMEOUT",
        help = "Minutes of inactivity after which a session ends",
        default_value_t = 30,
        global = true
    )]
    pub idle_timeout: u64,

    #[clap(
        short = 'f',
        long,
        value_name = "FORMAT",
        help = "The strftime() format string to display creation dates",
        default_value = DEFAULT_DATE_FORMAT,
        global = true
    )]
    pub time_format: String,

    #[clap(
        short = 'z',
        long,
        help = "Display dates in UTC instead of the local time zone",
        default_value_t = false,
        global = true
    )]
    pub zulu: bool,

    #[clap(
        short = 'v',
        long,
        action = clap::ArgAction::Count,
        help = "Output details; specify multiple times for more detail",
        global = true
    )]
    pub verbose: u8,

    #[clap(
        short = 'q',
        long,
        conflicts_with = "verbose",
        help = "Don't print any messages except for errors",
        default_value_t = false,
        global = true
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in, creating an identity on first use
    Login {
        #[clap(
            short = 'i',
            long,
            value_name = "SEED",
            help = "Sign in with this 32 byte seed (hex or base64) instead of the stored identity"
        )]
        import_seed: Option<String>,
    },
    /// End the current session
    Logout,
    /// Show the signed in principal
    Whoami,
    /// Hash a file and timestamp it
    Stamp {
        #[clap(help = "File to timestamp, or - to read standard input")]
        file: String,

        #[clap(short = 'n', long, help = "Name to record the timestamp under")]
        name: String,
    },
    /// List your timestamps
    List,
    /// Copy the transaction id of a listed timestamp to the clipboard
    Copy {
        #[clap(help = "Position of the timestamp as shown by 'list'")]
        index: usize,
    },
    /// Show the navigation links and account state
    Nav,
    /// About the service
    About,
}
