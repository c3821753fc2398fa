use crate::demo::{
    print_tier_catalog, run_demo, run_submit_file, run_video_lookup, DemoArgs, SubmitArgs,
    VideoArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use marquee::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Marquee Listings Service",
    about = "Run and exercise the marquee event listings service from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Print the promotion tier catalog in display order
    Tiers,
    /// Resolve a video page url into its embeddable form
    Video(VideoArgs),
    /// Submit an event payload from a JSON file
    Submit(SubmitArgs),
    /// Run an end-to-end CLI demo covering the submission workflow
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Tiers => {
            print_tier_catalog();
            Ok(())
        }
        Command::Video(args) => run_video_lookup(args),
        Command::Submit(args) => run_submit_file(args),
        Command::Demo(args) => run_demo(args),
    }
}
