//! The interactive terminal player: renders the current question, takes
//! keyboard commands, and feeds answers through the session engine.

use std::collections::{BTreeSet, HashMap};
use std::io::{self, BufRead, Write};

use owo_colors::OwoColorize;
use tracing::warn;

use quizdown::mistakes::MistakeLog;
use quizdown::model::{Question, Quiz};
use quizdown::session::{Session, Verdict};
use quizdown::storage::Store;

/// Run one full play-through. Mistakes are appended to the log and
/// persisted as they happen; a failing save is warned about, never fatal.
pub fn run(quiz: &Quiz, label: &str, log: &mut MistakeLog, store: &Store) -> io::Result<()> {
    let mut rng = rand::thread_rng();
    log.begin_session();
    let mut session = Session::start(quiz, &mut rng);

    println!("{}: {}", label, session.name().bold());
    println!("Commands: numbers toggle choices, c = check, n/p = next/previous, f = finish.");

    // Selections the user has toggled but not yet checked, per question.
    let mut pending: HashMap<String, BTreeSet<usize>> = HashMap::new();

    let stdin = io::stdin();
    let mut lines = stdin
        .lock()
        .lines();

    loop {
        let question = match session.current() {
            Some(question) => question.clone(),
            None => break,
        };
        let (idx, total) = session.position();
        render_question(&session, &question, idx, total, pending.get(&question.id));

        print!("> ");
        io::stdout().flush()?;
        let line = match lines.next() {
            Some(line) => line?,
            None => break,
        };

        match line
            .trim()
            .to_lowercase()
            .as_str()
        {
            "" => continue,
            "n" => session.next(),
            "p" => session.previous(),
            "f" => break,
            "c" => {
                let chosen: Vec<String> = pending
                    .get(&question.id)
                    .map(|selected| {
                        selected
                            .iter()
                            .filter_map(|&i| {
                                question
                                    .choices
                                    .get(i)
                                    .map(|choice| {
                                        choice
                                            .id
                                            .clone()
                                    })
                            })
                            .collect()
                    })
                    .unwrap_or_default();
                match session.submit(&question.id, &chosen, &mut rng) {
                    Ok(verdict) => report(&question, verdict, log, store),
                    Err(error) => println!("{}", error.yellow()),
                }
            }
            input => {
                let Some(picks) = parse_picks(input, &question) else {
                    println!("{}", "Unrecognized command.".yellow());
                    continue;
                };
                let selected = pending
                    .entry(
                        question
                            .id
                            .clone(),
                    )
                    .or_default();
                let mut last = None;
                for pick in picks {
                    if !selected.remove(&pick) {
                        selected.insert(pick);
                    }
                    last = Some(pick);
                }
                // Single-select with instant feedback evaluates on the
                // spot; everything else waits for an explicit check.
                if let Some(pick) = last {
                    let choice_id = question.choices[pick]
                        .id
                        .clone();
                    match session.select(&question.id, &choice_id, &mut rng) {
                        Ok(Some(verdict)) => report(&question, verdict, log, store),
                        Ok(None) => {}
                        Err(error) => println!("{}", error.yellow()),
                    }
                }
            }
        }
    }

    let summary = session.finish();
    println!();
    println!(
        "Final score: {} / {}   Accuracy: {}%   Time: {}",
        summary.correct,
        summary.total,
        summary.accuracy,
        summary.clock()
    );
    let missed = log
        .current_session()
        .len();
    if missed > 0 {
        println!(
            "{} mistake{} recorded this session; review with 'quizdown mistakes'.",
            missed,
            if missed == 1 { "" } else { "s" }
        );
    }
    Ok(())
}

fn render_question(
    session: &Session,
    question: &Question,
    idx: usize,
    total: usize,
    selected: Option<&BTreeSet<usize>>,
) {
    let score = session.score();
    println!();
    println!(
        "{}   {}",
        format!("Question {} of {}", idx + 1, total).bold(),
        format!("Score: {} / {}", score.correct, score.attempted).dimmed()
    );
    println!("{}", question.text);
    let guidance = if question.is_multi_select() {
        "Select all that apply."
    } else {
        "Select one answer."
    };
    println!("{}", guidance.dimmed());
    for (i, choice) in question
        .choices
        .iter()
        .enumerate()
    {
        let mark = if selected.is_some_and(|set| set.contains(&i)) {
            "x"
        } else {
            " "
        };
        println!("  {}. [{}] {}", i + 1, mark, choice.text);
    }
    if let Some(record) = session.answer(&question.id) {
        if record.correct {
            println!("{}", "Answered correctly.".green());
        } else {
            println!("{}", "Answered incorrectly.".red());
        }
    }
}

/// "1 3" style input: 1-based choice numbers, all within range.
fn parse_picks(input: &str, question: &Question) -> Option<Vec<usize>> {
    let mut picks = Vec::new();
    for token in input.split_whitespace() {
        let number: usize = token
            .parse()
            .ok()?;
        if number == 0
            || number
                > question
                    .choices
                    .len()
        {
            return None;
        }
        picks.push(number - 1);
    }
    if picks.is_empty() {
        None
    } else {
        Some(picks)
    }
}

fn report(question: &Question, verdict: Verdict, log: &mut MistakeLog, store: &Store) {
    if verdict.correct {
        println!("{}", "Correct!".green().bold());
    } else {
        println!("{}", "Wrong.".red().bold());
        for choice in question
            .choices
            .iter()
            .filter(|choice| choice.correct)
        {
            println!("  {} {}", "✅".green(), choice.text);
        }
    }
    if !question
        .explanation
        .is_empty()
    {
        println!("  {}", question.explanation.dimmed());
    }
    if let Some(entry) = verdict.mistake {
        log.record(entry);
        if let Err(error) = store.save_mistakes(log.all()) {
            warn!(%error, "could not persist the mistake log");
        }
    }
}
