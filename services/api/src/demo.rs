use crate::infra::{load_library, parse_quiz, InMemoryResultRepository};
use career_compass::assessments::{
    drive, spawn_ticker, AssessmentService, OptionTag, Question, QuizDefinition, QuizKind,
    QuizLibrary, QuizOutcome, QuizSession, ScoredAssessment, SessionCommand, SessionStep,
    SubmissionOutcome, SubmittedAnswer, TickOutcome, UserId,
};
use career_compass::config::AppConfig;
use career_compass::error::AppError;
use chrono::Utc;
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

#[derive(Args, Debug)]
pub(crate) struct QuestionsArgs {
    /// Quiz to print (aptitude, riasec or stream)
    #[arg(long, value_parser = parse_quiz)]
    pub(crate) quiz: QuizKind,
}

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Quiz the answers belong to
    #[arg(long, value_parser = parse_quiz)]
    pub(crate) quiz: QuizKind,
    /// JSON file holding a list of `{ "question_id", "answer" }` objects
    #[arg(long)]
    pub(crate) answers: PathBuf,
}

#[derive(Args, Debug)]
pub(crate) struct TakeArgs {
    /// Quiz to take
    #[arg(long, value_parser = parse_quiz)]
    pub(crate) quiz: QuizKind,
    /// Student identifier stored with the result
    #[arg(long, default_value = "cli-student")]
    pub(crate) user: String,
}

type CliService = AssessmentService<InMemoryResultRepository>;

fn configured_service() -> Result<CliService, AppError> {
    let config = AppConfig::load()?;
    let library = load_library(&config.assessments)?;
    Ok(AssessmentService::new(
        library,
        Arc::new(InMemoryResultRepository::default()),
    ))
}

pub(crate) fn run_questions(args: QuestionsArgs) -> Result<(), AppError> {
    let service = configured_service()?;
    let definition = service.definition(args.quiz);

    println!(
        "{} (version {}, {} questions, {} minute limit)",
        definition.title(),
        definition.version(),
        definition.questions().len(),
        definition.time_limit_secs() / 60
    );
    for question in definition.questions() {
        print_question(question);
    }
    Ok(())
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let service = configured_service()?;
    let raw = std::fs::read_to_string(&args.answers)?;
    let answers: Vec<SubmittedAnswer> = serde_json::from_str(&raw)?;

    let scored = service.evaluate(args.quiz, &answers)?;
    render_scored(&service.definition(args.quiz), &scored);
    Ok(())
}

pub(crate) async fn run_take(args: TakeArgs) -> Result<(), AppError> {
    let service = configured_service()?;
    let definition = service.definition(args.quiz);
    let mut session = QuizSession::new(definition.clone());

    println!(
        "{}: {} questions, {} seconds. Enter an option number, 'n' for next, 'b' for back, 'q' to quit.",
        definition.title(),
        definition.questions().len(),
        definition.time_limit_secs()
    );
    if let Some(question) = session.current_question() {
        print_question(question);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let period = Duration::from_secs(1);
    let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + period, period);

    let outcome = loop {
        tokio::select! {
            _ = ticker.tick() => match session.tick() {
                TickOutcome::TimedOut(outcome) => {
                    println!("\nTime is up, scoring the answers given so far.");
                    break Some(outcome);
                }
                TickOutcome::Running { remaining_secs } if remaining_secs % 60 == 0 || remaining_secs == 10 => {
                    println!("  {remaining_secs}s remaining");
                }
                TickOutcome::Running { .. } | TickOutcome::Idle => {}
            },
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break None;
                };
                match apply_input(&mut session, line.trim()) {
                    InputResult::Continue => {}
                    InputResult::Finished(outcome) => break Some(outcome),
                    InputResult::Quit => break None,
                }
            }
        }
    };

    let Some(outcome) = outcome else {
        println!("Quiz abandoned; nothing was recorded.");
        return Ok(());
    };
    let recorded = service.record_session(UserId(args.user), &definition, outcome, Utc::now())?;
    render_submission(&recorded);
    Ok(())
}

enum InputResult {
    Continue,
    Finished(QuizOutcome),
    Quit,
}

fn apply_input(session: &mut QuizSession, input: &str) -> InputResult {
    match input {
        "q" | "quit" => InputResult::Quit,
        "b" | "back" => {
            if session.go_back() {
                if let Some(question) = session.current_question() {
                    print_question(question);
                }
                if let Some(choice) = session.tentative_selection() {
                    println!("  (previously chose {})", choice + 1);
                }
            } else {
                println!("  Already at the first question.");
            }
            InputResult::Continue
        }
        "n" | "next" | "" => match session.commit_and_advance() {
            Ok(SessionStep::Advanced { .. }) => {
                if let Some(question) = session.current_question() {
                    print_question(question);
                }
                InputResult::Continue
            }
            Ok(SessionStep::Finished(outcome)) => InputResult::Finished(outcome),
            Err(err) => {
                println!("  {err}");
                InputResult::Continue
            }
        },
        other => {
            let selection = other
                .parse::<usize>()
                .ok()
                .and_then(|number| number.checked_sub(1));
            match selection.map(|choice| session.select_option(choice)) {
                Some(Ok(())) => println!("  Selected {other}. Press 'n' to continue."),
                Some(Err(err)) => println!("  {err}"),
                None => println!("  Unrecognised input '{other}'"),
            }
            InputResult::Continue
        }
    }
}

/// Queues a selection followed by an advance on the session channel.
async fn answer(tx: &mpsc::Sender<SessionCommand>, choice: usize) -> Result<(), AppError> {
    for command in [SessionCommand::Select(choice), SessionCommand::Advance] {
        tx.send(command).await.map_err(|_| {
            AppError::Io(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "quiz session channel closed",
            ))
        })?;
    }
    Ok(())
}

pub(crate) async fn run_demo() -> Result<(), AppError> {
    let library = Arc::new(QuizLibrary::builtin());
    let repository = Arc::new(InMemoryResultRepository::default());
    let service = AssessmentService::new(library.clone(), repository);
    let student = UserId("demo-student".to_string());

    println!("Career guidance demo");

    println!("\n== Aptitude test: technology-leaning answers ==");
    let aptitude = library.get(QuizKind::Aptitude);
    let outcome = script(
        QuizSession::new(aptitude.clone()),
        |question| match question.category.as_str() {
            "Interest" => 0,
            "Career Goals" => 2,
            _ => 1,
        },
    );
    record(&service, &student, &aptitude, outcome)?;

    println!("\n== RIASEC profiler: social answers sent over the session channel ==");
    let riasec = library.get(QuizKind::Riasec);
    let capacity = riasec.questions().len() * 2;
    let (tx, rx) = mpsc::channel(capacity.max(1));
    for question in riasec.questions() {
        let choice = option_for_code(question, "S").unwrap_or(0);
        answer(&tx, choice).await?;
    }
    drop(tx);
    match drive(QuizSession::new(riasec.clone()), rx).await {
        Some(outcome) => record(&service, &student, &riasec, Some(outcome))?,
        None => println!("  session ended before the last question"),
    }

    println!("\n== Stream selector: science answers ==");
    let stream = library.get(QuizKind::Stream);
    let outcome = script(QuizSession::new(stream.clone()), |question| {
        science_option(question).unwrap_or(0)
    });
    record(&service, &student, &stream, outcome)?;

    println!("\n== Aptitude test: timer expires after two answers ==");
    let hurried = Arc::new(QuizDefinition::clone(&aptitude).with_time_limit(3));
    let (tx, rx) = mpsc::channel(8);
    for choice in [1, 1] {
        answer(&tx, choice).await?;
    }
    let ticker = spawn_ticker(tx.clone(), Duration::from_millis(20));
    drop(tx);
    let outcome = drive(QuizSession::new(hurried.clone()), rx).await;
    ticker.abort();
    match outcome {
        Some(outcome) => record(&service, &student, &hurried, Some(outcome))?,
        None => println!("  session ended without a result"),
    }

    println!("\n== History analysis for {} ==", student.0);
    let analysis = service.analysis(&student)?;
    for trend in &analysis.trends {
        println!(
            "- {}: {} attempt(s), average {:.0}%, best {}%, usually '{}', latest '{}'",
            trend.quiz_label,
            trend.attempts,
            trend.average_score,
            trend.best_score,
            trend.most_frequent_category,
            trend.latest_category
        );
    }
    if let Some(strongest) = &analysis.strongest_category {
        println!("Strongest category overall: {strongest}");
    }
    for observation in &analysis.observations {
        println!("  * {observation}");
    }

    Ok(())
}

/// Answers every question in order with `pick`.
fn script(mut session: QuizSession, pick: impl Fn(&Question) -> usize) -> Option<QuizOutcome> {
    loop {
        let choice = pick(session.current_question()?);
        session.select_option(choice).ok()?;
        match session.commit_and_advance().ok()? {
            SessionStep::Advanced { .. } => {}
            SessionStep::Finished(outcome) => return Some(outcome),
        }
    }
}

fn record(
    service: &CliService,
    user: &UserId,
    definition: &QuizDefinition,
    outcome: Option<QuizOutcome>,
) -> Result<(), AppError> {
    let Some(outcome) = outcome else {
        println!("  scripted session could not finish");
        return Ok(());
    };
    let recorded = service.record_session(user.clone(), definition, outcome, Utc::now())?;
    render_submission(&recorded);
    Ok(())
}

fn option_for_code(question: &Question, code: &str) -> Option<usize> {
    question
        .options
        .iter()
        .position(|option| matches!(&option.tag, OptionTag::Type(tag) if tag.as_str() == code))
}

fn science_option(question: &Question) -> Option<usize> {
    question.options.iter().position(|option| match &option.tag {
        OptionTag::Weighted(weights) => {
            weights.len() == 1 && weights[0].category.as_str() == "science"
        }
        _ => false,
    })
}

fn print_question(question: &Question) {
    println!("\n[{}] Q{}: {}", question.category, question.id, question.text);
    for (index, option) in question.options.iter().enumerate() {
        println!("  {}. {}", index + 1, option.label);
    }
}

fn render_scored(definition: &QuizDefinition, scored: &ScoredAssessment) {
    let report = &scored.report;
    println!(
        "{}: answered {}/{} (ceiling {})",
        definition.title(),
        report.answered,
        report.total_questions,
        report.ceiling
    );
    for score in &report.scores {
        println!(
            "  #{} {:<12} raw {:>3} | {:>3}%",
            score.rank,
            score.category.as_str(),
            score.raw_score,
            score.percentage
        );
    }
    for recommendation in &scored.recommendations {
        println!(
            "- {} ({}%): {}",
            recommendation.display_name, recommendation.percentage, recommendation.description
        );
        println!("  Careers: {}", recommendation.careers.join(", "));
        if !recommendation.subjects.is_empty() {
            println!("  Subjects: {}", recommendation.subjects.join(", "));
        }
    }
}

fn render_submission(outcome: &SubmissionOutcome) {
    let result = &outcome.test_result;
    println!(
        "- Stored {} -> {} ({}%){}",
        outcome.result_id.0,
        result.primary_label,
        result.score,
        if result.timed_out { " [timed out]" } else { "" }
    );
    println!(
        "  Answered {}/{} questions",
        result.answered, result.total_questions
    );
    for score in &result.breakdown {
        println!(
            "    #{} {}: {}%",
            score.rank,
            score.category.as_str(),
            score.percentage
        );
    }
    for recommendation in &outcome.recommendations {
        println!(
            "  Recommended: {} -> {}",
            recommendation.display_name,
            recommendation.careers.join(", ")
        );
    }
    if !outcome.next_steps.is_empty() {
        println!("  Next steps:");
        for step in &outcome.next_steps {
            println!("    - {step}");
        }
    }
}
