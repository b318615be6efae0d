use std::path::PathBuf;

use clap::Parser;
use timed_quiz::{Config, Quiz, logger};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON file to load the questions from (defaults to the built-in set)
    #[arg(short, long, env = "QUIZ_QUESTIONS")]
    questions: Option<PathBuf>,

    /// Seconds on the clock per question
    #[arg(
        short,
        long,
        env = "QUIZ_SECONDS_PER_QUESTION",
        default_value_t = timed_quiz::session::SECONDS_PER_QUESTION,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    seconds_per_question: u32,

    /// Where to keep the high score
    #[arg(long, env = "QUIZ_HIGH_SCORE_FILE")]
    high_score_file: Option<PathBuf>,

    /// Keep the high score in memory only
    #[arg(long)]
    no_persist: bool,

    /// Log file (filter with RUST_LOG)
    #[arg(long, env = "QUIZ_LOG_FILE")]
    log_file: Option<PathBuf>,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Self {
            questions: args.questions,
            seconds_per_question: args.seconds_per_question,
            high_score_file: args.high_score_file,
            persist_high_score: !args.no_persist,
            log_file: args.log_file,
        }
    }
}

#[tokio::main]
async fn main() {
    let config = Config::from(Args::parse());

    if let Err(e) = logger::init(&config.log_path()) {
        eprintln!("Logging disabled: {}", e);
    }

    let quiz = match Quiz::from_config(&config) {
        Ok(quiz) => quiz,
        Err(e) => {
            eprintln!("Error loading quiz: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = quiz.run().await {
        eprintln!("Error running quiz: {}", e);
        std::process::exit(1);
    }
}
