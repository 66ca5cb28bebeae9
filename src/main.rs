use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Arg, ArgAction, Command};
use owo_colors::OwoColorize;

use quizdown::collection::{Collection, Saved};
use quizdown::flashcards;
use quizdown::formatting::render_quiz_text;
use quizdown::interchange;
use quizdown::mistakes::MistakeLog;
use quizdown::model::{sample_quiz, Quiz, QuizOptions};
use quizdown::parsing;
use quizdown::storage::Store;

mod player;

fn main() -> ExitCode {
    const VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

    tracing_subscriber::fmt::init();

    let matches = Command::new("quizdown")
        .version(VERSION)
        .propagate_version(true)
        .about("Build and play plain-text quizzes.")
        .disable_help_subcommand(true)
        .arg(
            Arg::new("store")
                .long("store")
                .global(true)
                .help("Directory holding saved quizzes and the mistake log."),
        )
        .subcommand(
            Command::new("check")
                .about("Parse the given quiz file and report what it contains")
                .arg(
                    Arg::new("filename")
                        .required(true)
                        .help("The file containing the quiz text you want to check."),
                ),
        )
        .subcommand(
            Command::new("play")
                .about("Play a quiz file, or a saved quiz, interactively")
                .arg(
                    Arg::new("shuffle-questions")
                        .long("shuffle-questions")
                        .action(ArgAction::SetTrue)
                        .help("Present the questions in a random order."),
                )
                .arg(
                    Arg::new("shuffle-choices")
                        .long("shuffle-choices")
                        .action(ArgAction::SetTrue)
                        .help("Shuffle each question's choices."),
                )
                .arg(
                    Arg::new("instant")
                        .long("instant")
                        .action(ArgAction::SetTrue)
                        .help("Evaluate single-select questions the moment a choice is picked."),
                )
                .arg(
                    Arg::new("saved")
                        .long("saved")
                        .value_name("NAME")
                        .conflicts_with("filename")
                        .help("Play the saved quiz with this name instead of reading a file."),
                )
                .arg(
                    Arg::new("filename")
                        .required_unless_present("saved")
                        .help("The file containing the quiz text you want to play."),
                ),
        )
        .subcommand(
            Command::new("save")
                .about("Parse a quiz file and save it into the collection")
                .arg(
                    Arg::new("title")
                        .long("title")
                        .help("Name to save the quiz under, overriding any title line."),
                )
                .arg(
                    Arg::new("shuffle-questions")
                        .long("shuffle-questions")
                        .action(ArgAction::SetTrue)
                        .help("Store the quiz with question shuffling on."),
                )
                .arg(
                    Arg::new("shuffle-choices")
                        .long("shuffle-choices")
                        .action(ArgAction::SetTrue)
                        .help("Store the quiz with choice shuffling on."),
                )
                .arg(
                    Arg::new("instant")
                        .long("instant")
                        .action(ArgAction::SetTrue)
                        .help("Store the quiz with instant feedback on."),
                )
                .arg(
                    Arg::new("filename")
                        .required(true)
                        .help("The file containing the quiz text you want to save."),
                ),
        )
        .subcommand(Command::new("list").about("List the saved quizzes"))
        .subcommand(
            Command::new("show")
                .about("Print a saved quiz back as editable quiz text")
                .arg(
                    Arg::new("name")
                        .required(true)
                        .help("Name of the saved quiz."),
                ),
        )
        .subcommand(
            Command::new("delete")
                .about("Delete a saved quiz")
                .arg(
                    Arg::new("name")
                        .required(true)
                        .help("Name of the saved quiz."),
                ),
        )
        .subcommand(
            Command::new("import")
                .about("Import quizzes from a JSON export")
                .arg(
                    Arg::new("filename")
                        .required(true)
                        .help("A JSON file holding a quiz, an array of quizzes, or an export envelope."),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Export a saved quiz, or the whole collection, as JSON")
                .arg(
                    Arg::new("name")
                        .help("Name of one saved quiz; omit to export everything."),
                ),
        )
        .subcommand(
            Command::new("mistakes")
                .about("Show the recorded mistakes, newest first")
                .arg(
                    Arg::new("export")
                        .long("export")
                        .action(ArgAction::SetTrue)
                        .help("Print the log as JSON instead of rendering it."),
                )
                .arg(
                    Arg::new("clear")
                        .long("clear")
                        .action(ArgAction::SetTrue)
                        .help("Clear all recorded mistakes."),
                ),
        )
        .subcommand(
            Command::new("flashcards")
                .about("Derive flashcards from a saved quiz and print them as JSON")
                .arg(
                    Arg::new("name")
                        .required(true)
                        .help("Name of the saved quiz."),
                ),
        )
        .subcommand(Command::new("sample").about("Save the built-in sample quiz"))
        .get_matches();

    let store = Store::open(store_directory(matches.get_one::<String>("store")));

    let outcome = match matches.subcommand() {
        Some(("check", submatches)) => {
            let filename = submatches
                .get_one::<String>("filename")
                .map(String::as_str)
                .unwrap_or_default();
            check(Path::new(filename))
        }
        Some(("play", submatches)) => {
            let options = QuizOptions {
                shuffle_questions: submatches.get_flag("shuffle-questions"),
                shuffle_choices: submatches.get_flag("shuffle-choices"),
                instant_feedback: submatches.get_flag("instant"),
            };
            match (
                submatches.get_one::<String>("filename"),
                submatches.get_one::<String>("saved"),
            ) {
                (Some(filename), _) => play_file(&store, Path::new(filename), options),
                (_, Some(name)) => play_saved(&store, name, options),
                _ => Err("nothing to play".to_string()),
            }
        }
        Some(("save", submatches)) => {
            let filename = submatches
                .get_one::<String>("filename")
                .map(String::as_str)
                .unwrap_or_default();
            let options = QuizOptions {
                shuffle_questions: submatches.get_flag("shuffle-questions"),
                shuffle_choices: submatches.get_flag("shuffle-choices"),
                instant_feedback: submatches.get_flag("instant"),
            };
            save(
                &store,
                Path::new(filename),
                submatches
                    .get_one::<String>("title")
                    .map(String::as_str),
                options,
            )
        }
        Some(("list", _)) => list(&store),
        Some(("show", submatches)) => show(&store, name_argument(submatches)),
        Some(("delete", submatches)) => delete(&store, name_argument(submatches)),
        Some(("import", submatches)) => {
            let filename = submatches
                .get_one::<String>("filename")
                .map(String::as_str)
                .unwrap_or_default();
            import(&store, Path::new(filename))
        }
        Some(("export", submatches)) => export(
            &store,
            submatches
                .get_one::<String>("name")
                .map(String::as_str),
        ),
        Some(("mistakes", submatches)) => mistakes(
            &store,
            submatches.get_flag("export"),
            submatches.get_flag("clear"),
        ),
        Some(("flashcards", submatches)) => cards(&store, name_argument(submatches)),
        Some(("sample", _)) => sample(&store),
        _ => {
            println!("usage: quizdown [COMMAND] ...");
            println!("Try '--help' for more information.");
            Ok(())
        }
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{}: {}", "error".bright_red(), message);
            ExitCode::FAILURE
        }
    }
}

fn name_argument(submatches: &clap::ArgMatches) -> &str {
    submatches
        .get_one::<String>("name")
        .map(String::as_str)
        .unwrap_or_default()
}

fn store_directory(flag: Option<&String>) -> PathBuf {
    match flag {
        Some(directory) => PathBuf::from(directory),
        None => std::env::var_os("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".quizdown"),
    }
}

fn parse_file(filename: &Path, title: Option<&str>, options: QuizOptions) -> Result<Quiz, String> {
    let content = parsing::load(filename).map_err(|error| error.to_string())?;
    let mut rng = rand::thread_rng();
    parsing::parse(&content, title, options, None, &mut rng).map_err(|error| error.to_string())
}

fn check(filename: &Path) -> Result<(), String> {
    let quiz = parse_file(filename, None, QuizOptions::default())?;
    let count = quiz
        .questions
        .len();
    println!(
        "{}: {} question{}",
        quiz.name
            .bold(),
        count,
        if count == 1 { "" } else { "s" }
    );
    for question in &quiz.questions {
        let tag = if question.is_multi_select() {
            " [multi-select]"
        } else {
            ""
        };
        println!("  - {}{}", question.text, tag.dimmed());
    }
    Ok(())
}

fn play_file(store: &Store, filename: &Path, options: QuizOptions) -> Result<(), String> {
    let quiz = parse_file(filename, None, options)?;
    play(store, &quiz, "Testing (unsaved)")
}

fn play_saved(store: &Store, name: &str, options: QuizOptions) -> Result<(), String> {
    let collection = Collection::new(store.load_quizzes());
    let mut quiz = collection
        .find_by_name(name)
        .cloned()
        .ok_or_else(|| format!("no saved quiz named '{}'", name))?;
    // Flags layer on top of whatever the document was saved with.
    quiz.options
        .shuffle_questions |= options.shuffle_questions;
    quiz.options
        .shuffle_choices |= options.shuffle_choices;
    quiz.options
        .instant_feedback |= options.instant_feedback;
    play(store, &quiz, "Active")
}

fn play(store: &Store, quiz: &Quiz, label: &str) -> Result<(), String> {
    if quiz
        .questions
        .is_empty()
    {
        return Err("this quiz has no questions".to_string());
    }
    let mut log = MistakeLog::from_entries(store.load_mistakes());
    player::run(quiz, label, &mut log, store).map_err(|error| error.to_string())
}

fn save(
    store: &Store,
    filename: &Path,
    title: Option<&str>,
    options: QuizOptions,
) -> Result<(), String> {
    let quiz = parse_file(filename, title, options)?;
    let name = quiz
        .name
        .clone();
    let mut collection = Collection::new(store.load_quizzes());
    let saved = collection.save(quiz);
    store
        .save_quizzes(collection.quizzes())
        .map_err(|error| error.to_string())?;
    match saved {
        Saved::Created => println!("Saved '{}'", name),
        Saved::Overwrote => println!("Saved '{}' (overwritten)", name),
    }
    Ok(())
}

fn list(store: &Store) -> Result<(), String> {
    let collection = Collection::new(store.load_quizzes());
    if collection.is_empty() {
        println!(
            "No saved quizzes in {}. Try 'quizdown sample' or 'quizdown save <file>'.",
            store
                .directory()
                .display()
        );
        return Ok(());
    }
    for quiz in collection.quizzes() {
        let count = quiz
            .questions
            .len();
        println!(
            "{}  {} question{}",
            quiz.name
                .bold(),
            count,
            if count == 1 { "" } else { "s" }
        );
    }
    Ok(())
}

fn show(store: &Store, name: &str) -> Result<(), String> {
    let collection = Collection::new(store.load_quizzes());
    let quiz = collection
        .find_by_name(name)
        .ok_or_else(|| format!("no saved quiz named '{}'", name))?;
    println!("{}", render_quiz_text(quiz));
    Ok(())
}

fn delete(store: &Store, name: &str) -> Result<(), String> {
    let mut collection = Collection::new(store.load_quizzes());
    // The argument is a name, or failing that a raw id.
    let id = collection
        .find_by_name(name)
        .or_else(|| collection.find(name))
        .map(|quiz| {
            quiz.id
                .clone()
        })
        .ok_or_else(|| format!("no saved quiz named '{}'", name))?;
    collection.remove(&id);
    store
        .save_quizzes(collection.quizzes())
        .map_err(|error| error.to_string())?;
    println!("Deleted '{}'", name);
    Ok(())
}

fn import(store: &Store, filename: &Path) -> Result<(), String> {
    let payload = parsing::load(filename).map_err(|error| error.to_string())?;
    let mut rng = rand::thread_rng();
    let incoming =
        interchange::import_quizzes(&payload, &mut rng).map_err(|error| error.to_string())?;
    let count = incoming.len();
    let mut collection = Collection::new(store.load_quizzes());
    collection.import(incoming);
    store
        .save_quizzes(collection.quizzes())
        .map_err(|error| error.to_string())?;
    println!(
        "Imported {} quiz{}",
        count,
        if count == 1 { "" } else { "zes" }
    );
    Ok(())
}

fn export(store: &Store, name: Option<&str>) -> Result<(), String> {
    let collection = Collection::new(store.load_quizzes());
    let text = match name {
        Some(name) => {
            let quiz = collection
                .find_by_name(name)
                .ok_or_else(|| format!("no saved quiz named '{}'", name))?;
            interchange::export_quiz(quiz).map_err(|error| error.to_string())?
        }
        None => {
            interchange::export_all(collection.quizzes()).map_err(|error| error.to_string())?
        }
    };
    println!("{}", text);
    Ok(())
}

fn mistakes(store: &Store, as_json: bool, clear: bool) -> Result<(), String> {
    if clear {
        store
            .save_mistakes(&[])
            .map_err(|error| error.to_string())?;
        println!("Cleared the mistake log.");
        return Ok(());
    }
    let log = MistakeLog::from_entries(store.load_mistakes());
    if as_json {
        let text = interchange::export_mistakes(log.all()).map_err(|error| error.to_string())?;
        println!("{}", text);
        return Ok(());
    }
    if log.is_empty() {
        println!("No mistakes yet.");
        return Ok(());
    }
    for entry in log.all() {
        println!(
            "{}  {}",
            entry
                .quiz_name
                .bold(),
            entry
                .at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .dimmed()
        );
        println!("  {}", entry.question);
        for choice in &entry.choices {
            let picked = entry
                .chosen
                .contains(&choice.id);
            let line = format!(
                "    [{}] {}{}",
                if picked { "x" } else { " " },
                if choice.correct { "✅ " } else { "" },
                choice.text
            );
            if choice.correct {
                println!("{}", line.green());
            } else if picked {
                println!("{}", line.red());
            } else {
                println!("{}", line);
            }
        }
    }
    Ok(())
}

fn cards(store: &Store, name: &str) -> Result<(), String> {
    let collection = Collection::new(store.load_quizzes());
    let quiz = collection
        .find_by_name(name)
        .ok_or_else(|| format!("no saved quiz named '{}'", name))?;
    let mut rng = rand::thread_rng();
    let cards = flashcards::from_questions(&quiz.questions, &mut rng);
    let text = interchange::export_flashcards(&cards).map_err(|error| error.to_string())?;
    println!("{}", text);
    Ok(())
}

fn sample(store: &Store) -> Result<(), String> {
    let mut rng = rand::thread_rng();
    let quiz = sample_quiz(&mut rng);
    let name = quiz
        .name
        .clone();
    let mut collection = Collection::new(store.load_quizzes());
    collection.save(quiz);
    store
        .save_quizzes(collection.quizzes())
        .map_err(|error| error.to_string())?;
    println!("Saved '{}'", name);
    Ok(())
}
