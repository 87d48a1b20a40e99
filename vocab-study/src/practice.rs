use std::io;

use rand::seq::SliceRandom;
use rand::Rng;
use study_api::{CurrentLexicon, LearnSettings, StudyApi, Word};

use crate::utilities::str_to_bool;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpellingGrade {
    Correct,
    Close,
    Wrong,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Remembered,
    Forgotten,
    Skipped,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct Tally {
    pub remembered: usize,
    pub forgotten: usize,
    pub skipped: usize,
}

impl Tally {
    fn add(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Remembered => self.remembered += 1,
            Outcome::Forgotten => self.forgotten += 1,
            Outcome::Skipped => self.skipped += 1,
        }
    }
}

/// Shuffles and keeps at most `size` words.
pub fn pick_group<R: Rng + ?Sized>(mut words: Vec<Word>, size: usize, rng: &mut R) -> Vec<Word> {
    words.shuffle(rng);
    words.truncate(size);
    words
}

pub fn grade_spelling(expected: &str, attempt: &str) -> SpellingGrade {
    let expected = expected.trim().to_lowercase();
    let attempt = attempt.trim().to_lowercase();
    if attempt.is_empty() {
        return SpellingGrade::Wrong;
    }
    if expected == attempt {
        return SpellingGrade::Correct;
    }
    if strsim::jaro_winkler(&expected, &attempt) >= 0.88 {
        SpellingGrade::Close
    } else {
        SpellingGrade::Wrong
    }
}

/// What the learner sees before answering: part of speech, definitions and
/// pronunciation, never the word itself.
pub fn describe(word: &Word) -> String {
    let mut lines = Vec::new();
    for part in &word.part_of_speech_list {
        let definitions = part
            .definitions
            .as_deref()
            .unwrap_or_default()
            .join("; ");
        if definitions.is_empty() {
            lines.push(format!("    ({})", part.kind));
        } else {
            lines.push(format!("    ({}) {definitions}", part.kind));
        }
    }
    if let Some(ipa) = word.first_ipa() {
        lines.push(format!("    /{ipa}/"));
    }
    if lines.is_empty() {
        lines.push("    (no definition available)".to_string());
    }
    lines.join("\n")
}

/// Runs one group over `words` and reports each answer back to the study plan.
/// A word is only reported once `ask` returned a full answer for it.
pub async fn run_session<F>(
    api: &StudyApi,
    lexicon: &CurrentLexicon,
    words: Vec<Word>,
    settings: LearnSettings,
    mut ask: F,
) -> anyhow::Result<Tally>
where
    F: FnMut(&str) -> io::Result<String>,
{
    let group = pick_group(
        words,
        settings.words_per_group as usize,
        &mut rand::thread_rng(),
    );
    let mut tally = Tally::default();
    for (index, word) in group.iter().enumerate() {
        if index != 0 {
            println!("----------------------------------------");
        }
        println!("[{}/{}] {}", index + 1, group.len(), word.language);
        println!("{}", describe(word));
        let outcome = if settings.enable_spelling {
            ask_spelling(&mut ask, word)?
        } else {
            ask_recall(&mut ask, word)?
        };
        record_outcome(api, lexicon, word, outcome).await?;
        tally.add(outcome);
    }
    Ok(tally)
}

async fn record_outcome(
    api: &StudyApi,
    lexicon: &CurrentLexicon,
    word: &Word,
    outcome: Outcome,
) -> anyhow::Result<()> {
    match outcome {
        Outcome::Remembered => api.decrement_review_count(&lexicon.name, &word.id).await?,
        Outcome::Forgotten => api.reset_review_count(&lexicon.name, &word.id).await?,
        Outcome::Skipped => {}
    }
    Ok(())
}

fn ask_spelling<F>(ask: &mut F, word: &Word) -> io::Result<Outcome>
where
    F: FnMut(&str) -> io::Result<String>,
{
    for attempt in 0..2 {
        let answer = ask("Spell the word (:s to skip): ")?;
        if matches!(answer.trim(), ":s" | ":skip") {
            return Ok(Outcome::Skipped);
        }
        match grade_spelling(&word.word, &answer) {
            SpellingGrade::Correct => {
                println!("Correct. Well done!");
                return Ok(Outcome::Remembered);
            }
            SpellingGrade::Close if attempt == 0 => {
                println!("Almost, try once more.");
            }
            _ => break,
        }
    }
    println!("The word was '{}'.", word.word);
    Ok(Outcome::Forgotten)
}

fn ask_recall<F>(ask: &mut F, word: &Word) -> io::Result<Outcome>
where
    F: FnMut(&str) -> io::Result<String>,
{
    ask("Press enter to reveal the word")?;
    println!("  {}", word.word);
    loop {
        let answer = ask("Did you remember it? (Y/n): ")?;
        if matches!(answer.trim(), ":s" | ":skip") {
            return Ok(Outcome::Skipped);
        }
        match str_to_bool(&answer) {
            Some(true) => return Ok(Outcome::Remembered),
            Some(false) => return Ok(Outcome::Forgotten),
            None => println!("Couldn't understand your answer, please try again."),
        }
    }
}
