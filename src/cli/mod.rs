// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// A thin caller standing in for the chat UI. It parses
// arguments, builds the bot through Layer 2 and prints answers.
// Logs go to stderr, answers to stdout.

pub mod commands;

use anyhow::{bail, Result};
use clap::Parser;
use std::{
    io::{self, BufRead, Write},
    sync::Arc,
};

use crate::application::{
    build_use_case::BuildUseCase, check_use_case::CheckUseCase, config::BotConfig,
    inference_service::InferenceService,
};
use crate::domain::traits::ConversationSink;
use crate::infra::conversation_log::{CsvConversationLog, NullConversationLog};
use commands::{AskArgs, BotArgs, Commands};

#[derive(Parser, Debug)]
#[command(
    name = "edusphere-bot",
    version,
    about = "Answer questions from a fixed question/answer dataset."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Dispatch to the subcommand. Construction errors propagate and
    /// end the process before any question is answered.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Ask(args)   => run_ask(args),
            Commands::Chat(args)  => run_chat(args),
            Commands::Fit(args)   => run_fit(args),
            Commands::Check(args) => run_check(args),
        }
    }
}

fn build_service(args: BotArgs) -> Result<InferenceService> {
    let config: BotConfig = args.into();
    let bot = BuildUseCase::new(config.clone()).execute()?;

    let log: Arc<dyn ConversationSink> = match &config.log_path {
        Some(path) => Arc::new(CsvConversationLog::new(path)),
        None       => Arc::new(NullConversationLog),
    };
    Ok(InferenceService::new(Arc::new(bot), log))
}

fn run_ask(args: AskArgs) -> Result<()> {
    let service = build_service(args.bot)?;
    println!("{}", service.get_bot_response(&args.question));
    Ok(())
}

fn run_chat(args: BotArgs) -> Result<()> {
    let service = build_service(args)?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    let answered = chat_loop(&service, stdin.lock(), stdout.lock())?;
    tracing::info!("Chat session ended after {} messages", answered);
    Ok(())
}

fn run_fit(args: BotArgs) -> Result<()> {
    let config: BotConfig = args.into();
    if config.model_dir.is_none() {
        tracing::warn!("No --model-dir given; the fit will not be stored");
    }
    let bot = BuildUseCase::new(config).force_refit().execute()?;
    println!(
        "Fitted {} examples: {} vocabulary terms, {} distinct answers.",
        bot.corpus().len(),
        bot.feature_space().dim(),
        bot.model().labels().len()
    );
    Ok(())
}

fn run_check(args: BotArgs) -> Result<()> {
    let config: BotConfig = args.into();
    let bot = BuildUseCase::new(config).execute()?;
    let report = CheckUseCase::new(&bot).execute();

    for miss in &report.misses {
        println!(
            "MISS  {:?}\n      expected: {}\n      got:      {}",
            miss.question, miss.expected, miss.got
        );
    }
    println!(
        "{}/{} training questions reproduce their answer ({:.1}%).",
        report.reproduced,
        report.total,
        report.accuracy() * 100.0
    );

    if !report.is_clean() {
        bail!("{} training questions did not reproduce their answer", report.misses.len());
    }
    Ok(())
}

/// Read messages line by line and write one answer per message.
///
/// Blank lines get a reminder instead of an answer; `exit`, `quit` or
/// end of input finish the session. Trimming only decides those cases:
/// the line itself is answered and logged as typed. Returns the number
/// of answers given.
pub fn chat_loop<R: BufRead, W: Write>(
    service: &InferenceService,
    input:   R,
    mut out: W,
) -> io::Result<usize> {
    writeln!(out, "Start chatting with Edusphere AI! (type 'exit' to quit)")?;
    let mut answered = 0;

    for line in input.lines() {
        let line = line?;
        let message = line.trim();

        if message.is_empty() {
            writeln!(out, "Please enter a message.")?;
            continue;
        }
        if message.eq_ignore_ascii_case("exit") || message.eq_ignore_ascii_case("quit") {
            break;
        }

        writeln!(out, "AI: {}", service.get_bot_response(&line))?;
        answered += 1;
    }

    Ok(answered)
}
