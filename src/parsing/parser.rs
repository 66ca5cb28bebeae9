use std::fmt;

use rand::Rng;

use crate::model::{normalize_name, uid, Choice, Question, Quiz, QuizOptions};

macro_rules! regex {
    ($pattern:expr) => {{
        use std::sync::OnceLock;
        static REGEX: OnceLock<regex::Regex> = OnceLock::new();
        REGEX.get_or_init(|| regex::Regex::new($pattern).unwrap_or_else(|e| panic!("{}", e)))
    }};
}

/// Marks a correct choice at the start of a line.
pub const CORRECT_MARK: &str = "✅";

/// Marks an incorrect choice at the start of a line.
pub const INCORRECT_MARK: &str = "❎";

/// Name given to a document whose text carries no title line and for
/// which the caller supplied none.
pub const DEFAULT_QUIZ_NAME: &str = "Untitled quiz";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsingError {
    /// The input was empty (or whitespace only) after trimming.
    EmptyInput,
    /// The input had text but no block parsed into a question.
    NoQuestionsFound,
}

impl fmt::Display for ParsingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParsingError::EmptyInput => write!(f, "no text to parse"),
            ParsingError::NoQuestionsFound => write!(f, "no questions found"),
        }
    }
}

/// A single line recognized as a candidate answer choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedChoice {
    pub text: String,
    pub correct: bool,
}

/// Rewrite `+ `/`- ` sign-marked choice lines into the glyph convention
/// so the two marker families are interchangeable downstream. Lines where
/// the sign is followed by no visible text are left alone; a lone `-` is
/// a block separator, not a choice.
pub fn normalize_markers(raw: &str) -> String {
    raw.lines()
        .map(|line| {
            if let Some(caps) = regex!(r"^\s*\+\s+(\S.*)$").captures(line) {
                format!("{} {}", CORRECT_MARK, &caps[1])
            } else if let Some(caps) = regex!(r"^\s*-\s+(\S.*)$").captures(line) {
                format!("{} {}", INCORRECT_MARK, &caps[1])
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Interpret one line as a candidate choice, or None if the line carries
/// no recognized marker. The glyph family takes priority over the sign
/// family; the marker and any following whitespace is stripped.
pub fn parse_choice_line(line: &str) -> Option<ParsedChoice> {
    let line = line.trim();

    for (marker, correct) in [(CORRECT_MARK, true), (INCORRECT_MARK, false)] {
        if let Some(rest) = line.strip_prefix(marker) {
            return Some(ParsedChoice {
                text: rest
                    .trim_start()
                    .to_string(),
                correct,
            });
        }
    }

    for (marker, correct) in [('+', true), ('-', false)] {
        if let Some(rest) = line.strip_prefix(marker) {
            return Some(ParsedChoice {
                text: rest
                    .trim_start()
                    .to_string(),
                correct,
            });
        }
    }

    None
}

/// Convert raw text into a validated Quiz document.
///
/// The text is split into question blocks on `-`-only separator lines or
/// runs of blank lines, either of which may appear in the same document.
/// An explicit `title` wins over a `# Quiz: <title>` line in the text.
/// When a prior draft is supplied and its normalized name matches the new
/// document's, the prior draft's id is reused so that repeated parses of
/// the same logical quiz keep one identity.
pub fn parse_quiz(
    raw: &str,
    title: Option<&str>,
    options: QuizOptions,
    prior: Option<&Quiz>,
    rng: &mut impl Rng,
) -> Result<Quiz, ParsingError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ParsingError::EmptyInput);
    }
    let raw = normalize_markers(raw);

    let mut name = title
        .unwrap_or("")
        .trim()
        .to_string();
    if name.is_empty() {
        if let Some(caps) = regex!(r"(?mi)^#\s*quiz:\s*(.+)$").captures(&raw) {
            name = caps[1]
                .trim()
                .to_string();
        }
    }
    if name.is_empty() {
        name = DEFAULT_QUIZ_NAME.to_string();
    }

    let body = regex!(r"(?mi)^#\s*quiz:.+$").replace_all(&raw, "");
    let body = body.trim();

    let mut questions = Vec::new();
    for block in regex!(r"\n\s*-\s*\n|\n\s*\n+").split(body) {
        if let Some(question) = parse_block(block, rng) {
            questions.push(question);
        }
    }

    if questions.is_empty() {
        return Err(ParsingError::NoQuestionsFound);
    }

    let id = match prior {
        Some(draft)
            if !draft
                .id
                .is_empty()
                && normalize_name(&draft.name) == normalize_name(&name) =>
        {
            draft
                .id
                .clone()
        }
        _ => uid(rng),
    };

    Ok(Quiz {
        id,
        name,
        options,
        questions,
    })
}

/// Parse one question block: the first non-blank line is the stem (with
/// any leading ordinal like `3)` or `3.` stripped); each remaining line
/// is an `explain:` line (later ones overwrite earlier ones), a choice
/// line, or noise to be dropped. A block with no choices is no question
/// at all.
fn parse_block(block: &str, rng: &mut impl Rng) -> Option<Question> {
    let mut lines = block
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty());

    let stem = lines.next()?;
    let text = regex!(r"^\d+\s*[).:-]\s*")
        .replace(stem, "")
        .trim()
        .to_string();

    let mut choices = Vec::new();
    let mut explanation = String::new();

    for line in lines {
        if let Some(prefix) = regex!(r"(?i)^(?:explain|explanation):").find(line) {
            explanation = line[prefix.end()..]
                .trim()
                .to_string();
            continue;
        }
        if let Some(parsed) = parse_choice_line(line) {
            choices.push(Choice {
                id: uid(rng),
                text: parsed.text,
                correct: parsed.correct,
            });
            continue;
        }
        if let Some(caps) = regex!(r"(?i)^[a-d]\)\s*(.+)$").captures(line) {
            choices.push(Choice {
                id: uid(rng),
                text: caps[1]
                    .trim()
                    .to_string(),
                correct: false,
            });
        }
    }

    if choices.is_empty() {
        return None;
    }

    Some(Question {
        id: uid(rng),
        text,
        explanation,
        choices,
    })
}
