use std::future::Future;
use std::io;
use std::sync::Arc;

use anyhow::Context;
use config::Config;
use storage::Storage;
use study_api::{ApiError, CountQuery, CurrentLexicon, StudyApi};
use utilities::{input, is_end_of_input, split_command, str_to_bool};

mod config;
mod logging;
mod practice;
mod storage;
mod utilities;

const HELP: &str = "\
commands:
  login [token]             sign in with a bearer token
  logout                    forget the token and cached profile
  whoami                    show the signed-in user
  books [page]              list system word books
  lexicons                  list your word books
  select <book id>          make a book the current one
  current                   show the current book
  progress                  counters for the current book
  learn | review            practice a group of words
  sentence <language> <word>
  settings                  show learning settings
  set words <n> | set spelling <on|off>
  exit";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_from_env();
    let config = Config::load()?;
    let storage_path = config.storage_path()?;
    if let Some(parent) = storage_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let storage = Storage::initialize(&storage_path).await?;
    let api = StudyApi::new(&config.api.base_url, Arc::new(storage))?;

    loop {
        let line = match input(">> ") {
            Ok(line) => line,
            Err(error) if error.kind() == io::ErrorKind::UnexpectedEof => break,
            Err(error) => return Err(error.into()),
        };
        let Some((command, args)) = split_command(&line) else {
            continue;
        };
        let result = match command.as_str() {
            "exit" | "leave" | "quit" | "e" | "q" => {
                break;
            }
            "help" | "h" | "?" => {
                println!("{HELP}");
                Ok(())
            }
            "login" => login(&api, args.first().copied()).await,
            "logout" => logout(&api).await,
            "whoami" => whoami(&api).await,
            "books" => books(&api, args.first().copied()).await,
            "lexicons" | "mine" => lexicons(&api).await,
            "select" => match args.first() {
                Some(book_id) => select(&api, book_id).await,
                None => {
                    println!("Usage: select <book id>");
                    Ok(())
                }
            },
            "current" => current(&api).await,
            "progress" => progress(&api).await,
            "learn" => practice(&api, false).await,
            "review" => practice(&api, true).await,
            "sentence" => match args.split_first() {
                Some((language, word)) if !word.is_empty() => {
                    sentence(&api, language, &word.join(" ")).await
                }
                _ => {
                    println!("Usage: sentence <language> <word>");
                    Ok(())
                }
            },
            "settings" => settings(&api).await,
            "set" => set(&api, &args).await,
            _ => {
                println!("Unknown command {command}. Type 'help' for a list.");
                Ok(())
            }
        };
        if let Err(error) = result {
            if handle_failure(error, || login(&api, None)).await == Flow::Exit {
                break;
            }
        }
    }
    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Reports a failed command. An authentication failure sends the user to
/// `navigate_to_login` once; closed input ends the loop.
async fn handle_failure<F, Fut>(error: anyhow::Error, navigate_to_login: F) -> Flow
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = anyhow::Result<()>>,
{
    if is_end_of_input(&error) {
        return Flow::Exit;
    }
    if !needs_login(&error) {
        println!("Error: {error}");
        return Flow::Continue;
    }
    println!("You need to sign in again.");
    match navigate_to_login().await {
        Ok(()) => Flow::Continue,
        Err(error) if is_end_of_input(&error) => Flow::Exit,
        Err(error) => {
            println!("Sign in failed: {error}");
            Flow::Continue
        }
    }
}

fn needs_login(error: &anyhow::Error) -> bool {
    error
        .downcast_ref::<ApiError>()
        .is_some_and(ApiError::is_authentication_required)
}

async fn login(api: &StudyApi, token: Option<&str>) -> anyhow::Result<()> {
    let token = match token {
        Some(token) => token.to_string(),
        None => input("Bearer token (empty to cancel): ")?.trim().to_string(),
    };
    if token.is_empty() {
        return Ok(());
    }
    api.session().set_token(&token).await?;
    let user = api.fetch_user_info().await?;
    println!("Signed in as {} <{}>.", user.username, user.email);
    Ok(())
}

async fn logout(api: &StudyApi) -> anyhow::Result<()> {
    api.session().logout().await?;
    println!("Signed out.");
    Ok(())
}

async fn whoami(api: &StudyApi) -> anyhow::Result<()> {
    let user = api.user_info().await?;
    println!("{} <{}> (id {})", user.username, user.email, user.id);
    Ok(())
}

async fn books(api: &StudyApi, page: Option<&str>) -> anyhow::Result<()> {
    let books = match page {
        Some(page) => {
            let page: u32 = page.parse().context("page must be a number")?;
            let page = api.lexicon_page(page, 20).await?;
            println!(
                "page {} of {} ({} books)",
                page.pageable.page_number + 1,
                page.total_pages,
                page.total_elements
            );
            page.content
        }
        None => api.all_lexicons().await?,
    };
    if books.is_empty() {
        println!("No word books available.");
    }
    for book in books {
        println!(
            "{:>8}  {} [{}] {} words",
            book.id, book.book_name, book.language, book.word_count
        );
        if !book.description.is_empty() {
            println!("          {}", book.description);
        }
    }
    Ok(())
}

async fn lexicons(api: &StudyApi) -> anyhow::Result<()> {
    let lexicons = api.user_lexicons().await?;
    if lexicons.is_empty() {
        println!("You have not added any word books yet.");
    }
    for lexicon in lexicons {
        println!(
            "{:>8}  {} {:?} {}/{}",
            lexicon.id, lexicon.name, lexicon.status, lexicon.learned, lexicon.total
        );
    }
    Ok(())
}

async fn select(api: &StudyApi, book_id: &str) -> anyhow::Result<()> {
    let books = api.all_lexicons().await?;
    let Some(book) = books.into_iter().find(|book| book.id == book_id) else {
        println!("There is no word book with id {book_id}.");
        return Ok(());
    };
    api.select_lexicon(&book.id).await?;
    api.session()
        .set_current_lexicon(&CurrentLexicon {
            id: book.id,
            name: book.book_name.clone(),
        })
        .await?;
    println!("Now studying {}.", book.book_name);
    Ok(())
}

async fn current_lexicon(api: &StudyApi) -> anyhow::Result<Option<CurrentLexicon>> {
    let lexicon = api.session().current_lexicon().await?;
    if lexicon.is_none() {
        println!("No word book selected. Use 'books' and 'select <id>'.");
    }
    Ok(lexicon)
}

async fn current(api: &StudyApi) -> anyhow::Result<()> {
    if let Some(lexicon) = current_lexicon(api).await? {
        println!("{} (id {})", lexicon.name, lexicon.id);
    }
    Ok(())
}

async fn progress(api: &StudyApi) -> anyhow::Result<()> {
    let Some(lexicon) = current_lexicon(api).await? else {
        return Ok(());
    };
    let to_learn = CountQuery::ToLearn {
        lexicon_name: lexicon.name.clone(),
    };
    let review = CountQuery::Review {
        lexicon_name: lexicon.name.clone(),
    };
    let new_words = CountQuery::NewWords {
        lexicon_id: lexicon.id.clone(),
    };
    let today = CountQuery::TodayReview {
        lexicon_id: lexicon.id.clone(),
    };
    // badge counters: a failed request shows as zero
    let (to_learn, review, new_words, today) = futures::join!(
        api.fetch_count_or_default(&to_learn),
        api.fetch_count_or_default(&review),
        api.fetch_count_or_default(&new_words),
        api.fetch_count_or_default(&today),
    );
    println!("{}:", lexicon.name);
    println!("  to learn:        {to_learn}");
    println!("  to review:       {review}");
    println!("  new words:       {new_words}");
    println!("  due today:       {today}");
    Ok(())
}

async fn practice(api: &StudyApi, review: bool) -> anyhow::Result<()> {
    let Some(lexicon) = current_lexicon(api).await? else {
        return Ok(());
    };
    let words = if review {
        api.review_words(&lexicon.id).await?
    } else {
        api.learn_words(&lexicon.id).await?
    };
    if words.is_empty() {
        println!("Nothing to practice right now.");
        return Ok(());
    }
    let settings = api.session().learn_settings().await?;
    let tally = practice::run_session(api, &lexicon, words, settings, input).await?;
    println!(
        "Done: {} remembered, {} to repeat, {} skipped.",
        tally.remembered, tally.forgotten, tally.skipped
    );
    Ok(())
}

async fn sentence(api: &StudyApi, language: &str, word: &str) -> anyhow::Result<()> {
    let example = api.generate_example_sentence(language, word).await?;
    println!("{}", example.sentence);
    if !example.translation.is_empty() {
        println!("{}", example.translation);
    }
    Ok(())
}

async fn settings(api: &StudyApi) -> anyhow::Result<()> {
    let settings = api.session().learn_settings().await?;
    println!("words per group: {}", settings.words_per_group);
    println!(
        "spelling:        {}",
        if settings.enable_spelling { "on" } else { "off" }
    );
    Ok(())
}

async fn set(api: &StudyApi, args: &[&str]) -> anyhow::Result<()> {
    match args {
        ["words", count] => {
            let count: u32 = count.parse().context("word count must be a number")?;
            api.session().update_words_per_group(count).await?;
        }
        ["spelling", value] => match str_to_bool(value) {
            Some(enable) => {
                api.session().update_enable_spelling(enable).await?;
            }
            None => {
                println!("Use 'on' or 'off'.");
                return Ok(());
            }
        },
        _ => {
            println!("Usage: set words <n> | set spelling <on|off>");
            return Ok(());
        }
    }
    settings(api).await
}
