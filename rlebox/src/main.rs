mod commands;
mod error;
mod util;

use std::path::PathBuf;

use structopt::clap::AppSettings::*;
use structopt::StructOpt;
use tracing_subscriber::EnvFilter;

#[derive(Debug, StructOpt)]
enum Commands {
    #[structopt(
        name = "c",
        visible_alias = "compress",
        about = "Append files to an archive, creating it if needed"
    )]
    Compress {
        #[structopt(
            short,
            long,
            default_value = "1",
            help = "Width in bytes of the units runs are counted in [1-16]"
        )]
        unit_size: u8,

        #[structopt(name = "archive", parse(from_os_str), help = "Path to the archive")]
        path: PathBuf,

        #[structopt(
            name = "files",
            parse(from_os_str),
            required = true,
            help = "Files or directories to add; directories are walked recursively"
        )]
        files: Vec<PathBuf>,
    },

    #[structopt(
        name = "x",
        visible_aliases = &["extract", "decompress"],
        about = "Extract all files from an archive"
    )]
    Extract {
        #[structopt(name = "archive", parse(from_os_str), help = "Path to the archive")]
        path: PathBuf,

        #[structopt(
            name = "output",
            parse(from_os_str),
            help = "Directory to extract into, created if missing"
        )]
        output: PathBuf,
    },

    #[structopt(
        name = "t",
        visible_alias = "test",
        about = "Check that an archive can be decoded"
    )]
    Test {
        #[structopt(name = "archive", parse(from_os_str), help = "Path to the archive")]
        path: PathBuf,
    },

    #[structopt(name = "l", visible_alias = "list", about = "List files of an archive")]
    List {
        #[structopt(name = "archive", parse(from_os_str), help = "Path to the archive")]
        path: PathBuf,
    },
}

#[derive(Debug, StructOpt)]
#[structopt(
    name = "rlebox",
    about = "Create, list, test and extract run-length encoded archives.",
    settings = &[SubcommandRequiredElseHelp, DisableHelpSubcommand, VersionlessSubcommands],
    usage = "rlebox (c|x|t|l) [FLAGS|OPTIONS] <archive> [files]..."
)]
struct CliOpts {
    #[structopt(short, long, help = "Show verbose output", global = true)]
    verbose: bool,

    #[structopt(subcommand)]
    cmd: Commands,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let opts = CliOpts::from_iter(wild::args_os());
    init_tracing(opts.verbose);

    let result = match opts.cmd {
        Commands::Compress {
            unit_size,
            path,
            files,
        } => commands::compress(path, files, unit_size, opts.verbose),
        Commands::Extract { path, output } => commands::extract(path, output, opts.verbose),
        Commands::Test { path } => commands::test(path, opts.verbose),
        Commands::List { path } => commands::list(path, opts.verbose),
    };

    if let Err(e) = result {
        eprintln!("{}", e.report());
        std::process::exit(1);
    }
}
