use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use quipsolve::config::Config;
use quipsolve::dictionary::{SUPPORTED_LENGTHS, WordDictionary};
use quipsolve::key::import::{parse_key_table, to_key_table};
use quipsolve::key::{MappingChange, Proposal};
use quipsolve::session::Session;

#[derive(Parser)]
#[command(
    name = "quipsolve",
    version,
    about = "Interactive solver for monoalphabetic substitution ciphers"
)]
struct Cli {
    #[arg(help = "File containing the ciphertext to work on")]
    ciphertext: PathBuf,

    #[arg(short, long, help = "Number of swap suggestions to show")]
    suggestions: Option<usize>,

    #[arg(long, help = "Override the length-2 word list")]
    words_two: Option<PathBuf>,

    #[arg(long, help = "Override the length-3 word list")]
    words_three: Option<PathBuf>,

    #[arg(long, help = "Override the length-4 word list")]
    words_four: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load().unwrap_or_default();
    if let Some(count) = cli.suggestions {
        config.suggestion_count = count;
    }
    if let Some(path) = &cli.words_two {
        config.words_two = Some(path.display().to_string());
    }
    if let Some(path) = &cli.words_three {
        config.words_three = Some(path.display().to_string());
    }
    if let Some(path) = &cli.words_four {
        config.words_four = Some(path.display().to_string());
    }

    let ciphertext = fs::read_to_string(&cli.ciphertext)
        .with_context(|| format!("reading ciphertext from {}", cli.ciphertext.display()))?;

    let dictionary = build_dictionary(&config);
    let mut session =
        Session::with_suggestion_count(ciphertext, dictionary, config.suggestion_count);

    println!("quipsolve (type 'help' for commands)\n");
    print_state(&session);

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = stdin.lock().lines().next() else {
            break;
        };
        let line = line?;
        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts.as_slice() {
            [] => {}
            ["quit"] | ["exit"] | ["q"] => break,
            ["help"] | ["h"] => print_help(),
            ["map", cipher, plain] => match (parse_letter(cipher), parse_letter(plain)) {
                (Some(c), Some(p)) => {
                    run_proposal(&mut session, Proposal::from([(c, MappingChange::Assign(p))]));
                }
                _ => println!("usage: map <cipher letter> <plain letter>"),
            },
            ["clear", cipher] => match parse_letter(cipher) {
                Some(c) => run_proposal(&mut session, Proposal::from([(c, MappingChange::Clear)])),
                None => println!("usage: clear <cipher letter>"),
            },
            ["undo"] | ["u"] => {
                if session.undo() {
                    print_state(&session);
                } else {
                    println!("nothing to undo");
                }
            }
            ["suggest"] | ["s"] => print_suggestions(&session),
            ["show"] => print_state(&session),
            ["freq"] | ["f"] => print_comparison(&session),
            ["save", path] => {
                if let Err(err) = save_key(&session, Path::new(path)) {
                    println!("save failed: {err:#}");
                }
            }
            ["load", path] => load_key(&mut session, Path::new(path)),
            _ => println!("unknown command (try 'help')"),
        }
    }

    Ok(())
}

/// Bundled word lists, with configured overrides replacing individual
/// lengths. A failing override disables its length rather than falling back,
/// matching how an absent external list behaves.
fn build_dictionary(config: &Config) -> WordDictionary {
    let builtin = WordDictionary::builtin();
    let mut dict = WordDictionary::empty();
    for length in SUPPORTED_LENGTHS {
        match config.word_list_override(length) {
            Some(path) => match dict.load_file(length, Path::new(path)) {
                Ok(count) => println!("loaded {count} length-{length} words from {path}"),
                Err(err) => eprintln!("warning: {err}; length-{length} scoring disabled"),
            },
            None => {
                if let Some(words) = builtin.words(length) {
                    dict.insert_words(length, words.clone());
                }
            }
        }
    }
    dict
}

fn run_proposal(session: &mut Session, proposal: Proposal) {
    let outcome = session.apply(&proposal);
    for conflict in &outcome.conflicts {
        println!("conflict: {conflict}");
    }
    if outcome.committed {
        print_state(session);
    } else {
        println!("no change");
    }
}

fn save_key(session: &Session, path: &Path) -> Result<()> {
    fs::write(path, to_key_table(session.key()))
        .with_context(|| format!("writing key table to {}", path.display()))?;
    println!("key saved to {}", path.display());
    Ok(())
}

fn load_key(session: &mut Session, path: &Path) {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            println!("could not read {}: {err}", path.display());
            return;
        }
    };
    // Validation happens in full before the session is touched
    match parse_key_table(&content) {
        Ok(key) => {
            session.load_key(key);
            print_state(session);
        }
        Err(err) => println!("key table rejected: {err}"),
    }
}

fn parse_letter(arg: &str) -> Option<char> {
    let mut chars = arg.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) if ch.is_ascii_alphabetic() => Some(ch.to_ascii_lowercase()),
        _ => None,
    }
}

fn print_state(session: &Session) {
    println!("\n{}\n", session.decrypted());

    let cipher_row: String = quipsolve::alphabet().map(|c| format!(" {c}")).collect();
    let plain_row: String = quipsolve::alphabet()
        .map(|c| {
            let plain = session.key().get(c);
            if session.confirmed().contains(&c) {
                format!(" {}", plain.to_ascii_uppercase())
            } else {
                format!(" {plain}")
            }
        })
        .collect();
    println!("cipher:{cipher_row}");
    println!("plain: {plain_row}  (confirmed shown uppercase)");

    if !session.last_changed().is_empty() {
        let changed: Vec<String> = session
            .last_changed()
            .iter()
            .map(|c| c.to_string())
            .collect();
        println!("changed: {}", changed.join(", "));
    }
    print_suggestions(session);
}

fn print_suggestions(session: &Session) {
    if session.suggestions().is_empty() {
        println!("no suggestions (ciphertext too short or everything confirmed)");
        return;
    }
    println!("suggestions:");
    for suggestion in session.suggestions() {
        let hint = match session.confirmed_owner_of(suggestion.plain) {
            Some(owner) => format!("  (plain '{}' already owned by '{owner}')", suggestion.plain),
            None => String::new(),
        };
        println!(
            "  {} -> {}  ({:.2}){hint}",
            suggestion.cipher, suggestion.plain, suggestion.score
        );
    }
}

fn print_comparison(session: &Session) {
    println!("rank  mapped  cipher%   standard");
    for (rank, row) in session.frequency_comparison().iter().enumerate() {
        println!(
            "{:>4}  {} -> {}  {:>6.2}%   {} {:>5.2}%",
            rank + 1,
            row.cipher,
            row.mapped_plain,
            row.cipher_freq * 100.0,
            row.standard_letter,
            row.standard_freq * 100.0,
        );
    }
}

fn print_help() {
    println!(
        "commands:\n  \
         map <c> <p>   map cipher letter c to plain letter p\n  \
         clear <c>     reset cipher letter c to identity\n  \
         undo          revert the last committed change\n  \
         suggest       show ranked swap suggestions\n  \
         show          show decrypted text and the current key\n  \
         freq          compare ciphertext and standard frequency rankings\n  \
         save <path>   write the key table as JSON\n  \
         load <path>   load a key table from JSON\n  \
         quit          exit"
    );
}
