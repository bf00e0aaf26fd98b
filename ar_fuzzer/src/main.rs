extern crate ar_token;
extern crate ar_parser;
extern crate rand;

mod rnd;
mod token_gen;
mod grammar_gen;
mod checks;

use clap::Parser;
use log::{debug, error, info};
use rnd::*;
use token_gen::*;
use grammar_gen::*;
use checks::*;

const ALPHABET: &[&str] = &["a", "b", "c", "d"];

/// Randomized checker for the matcher engine, trees and selections.
#[derive(Parser, Debug)]
#[command(name = "ar_fuzzer")]
struct Args {
    /// Number of generated grammars
    #[arg(short = 'n', long, default_value_t = 1000)]
    iterations: usize,

    /// Token streams matched against each grammar
    #[arg(short, long, default_value_t = 20)]
    streams: usize,

    /// Seed of the first iteration, defaults to the system time
    #[arg(long)]
    seed: Option<u64>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    let first_seed = args.seed.unwrap_or_else(seed_from_system_time);
    info!("fuzzing {} grammar(s) starting from seed {}", args.iterations, first_seed);

    let grammars = RandomGrammarGenerator::new(1..6, 3, ALPHABET);
    let left_recursive = LeftRecursiveGrammarGenerator::new(1..4, ALPHABET);
    let mut tokens = RandomTokens::new();
    tokens.add(RandomTokenGenerator::with_len_and_alphabet(0..12, ALPHABET));
    tokens.add(PhraseTokenGenerator::new(&["a", "b", "c"], 1..4,
        RandomTokenGenerator::with_len_and_alphabet(0..3, ALPHABET)));

    let mut matched = 0;
    let mut total = 0;
    for i in 0..args.iterations {
        set_seed(first_seed.wrapping_add(i as u64));
        match run_iteration(&grammars, &left_recursive, &tokens, args.streams) {
            Ok((ok, all)) => {
                matched += ok;
                total += all;
            },
            Err(failure) => {
                error!("seed {}: {}", current_seed(), failure);
                std::process::exit(1);
            },
        }
    }
    info!("done, {} of {} match(es) succeeded", matched, total);
}

fn run_iteration(
    grammars: &dyn GrammarGenStrategy,
    left_recursive: &dyn GrammarGenStrategy,
    tokens: &dyn TokenGenStrategy,
    streams: usize) -> Result<(usize, usize), String> {

    let generated = left_recursive.generate();
    check_rejected(generated.build()).map_err(|v| format!("{}\n{}", v, generated.describe()))?;

    let generated = grammars.generate();
    let (grammar, entry) = generated.build().map_err(|e| format!("{}\n{}", e, generated.describe()))?;
    debug!("grammar:\n{}", generated.describe());

    let mut matched = 0;
    for _ in 0..streams {
        let stream = tokens.generate();
        let ok = check_match(&grammar, entry, &stream).map_err(|v| {
            let words: Vec<&str> = stream.iter().map(|t| t.text.as_str()).collect();
            format!("{}\ntokens: {:?}\n{}", v, words, generated.describe())
        })?;
        if ok {
            matched += 1;
        }
    }
    Ok((matched, streams))
}
