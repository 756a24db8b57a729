use crate::demo::{run_demo, run_questions, run_score, run_take, QuestionsArgs, ScoreArgs, TakeArgs};
use crate::server;
use career_compass::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "Career Compass",
    about = "Run the career guidance quizzes from the command line or serve them over HTTP",
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
    /// Print the question bank for a quiz
    Questions(QuestionsArgs),
    /// Score a JSON answer sheet and print the ranked breakdown
    Score(ScoreArgs),
    /// Take a quiz interactively on the terminal
    Take(TakeArgs),
    /// Walk through one scripted session per quiz, including a timeout
    Demo,
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
        Command::Questions(args) => run_questions(args),
        Command::Score(args) => run_score(args),
        Command::Take(args) => run_take(args).await,
        Command::Demo => run_demo().await,
    }
}
