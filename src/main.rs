extern crate argparse;

use std::process;

use alphagram_search::{solve_from_path, BucketOrder, CandidateDedup, LetterLimits, SearchConfig};
use anyhow::Context;

fn main() -> anyhow::Result<()> {
    use argparse::{ArgumentParser, Store, StoreFalse, StoreTrue};

    let (mut minletters, mut maxletters) = (0, std::usize::MAX);

    let mut dictionary_path = String::new();
    let mut order = BucketOrder::default().to_string();
    let mut dedup = true;
    let mut parallel = false;
    let mut verbose = false;

    let mut phrase = String::new();
    let mut digest = String::new();

    {
        let mut ap = ArgumentParser::new();
        ap.set_description("Find the anagram of a phrase whose MD5 digest matches the given one");
        ap.refer(&mut phrase)
            .required()
            .add_argument("phrase", Store, "Phrase to rearrange");
        ap.refer(&mut digest)
            .required()
            .add_argument("digest", Store, "Hex MD5 digest of the wanted rearrangement");
        ap.refer(&mut dictionary_path)
            .required()
            .add_option(&["-f", "--dictionary"], Store, "The path of the word list");
        ap.refer(&mut minletters)
            .add_option(&["-l", "--min-letters"], Store, "The minimum number of letters per word");
        ap.refer(&mut maxletters)
            .add_option(&["-L", "--max-letters"], Store, "The maximum number of letters per word");
        ap.refer(&mut order)
            .add_option(&["--order"], Store, "Word length order: longest, shortest or loaded");
        ap.refer(&mut dedup)
            .add_option(&["--no-dedup"], StoreFalse, "Re-check every candidate after each bucket instead of skipping unchanged ones");
        ap.refer(&mut parallel)
            .add_option(&["--parallel"], StoreTrue, "Check word orders on all cores");
        ap.refer(&mut verbose)
            .add_option(&["-v", "--verbose"], StoreTrue, "Log search progress");
        ap.parse_args_or_exit();
    }

    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    let config = SearchConfig {
        bucket_order: order.parse()?,
        dedup: if dedup { CandidateDedup::Structural } else { CandidateDedup::Off },
        parallel_verify: parallel,
    };
    let limits = LetterLimits {
        min: minletters,
        max: maxletters,
    };

    let found = solve_from_path(&phrase, &digest, &dictionary_path, limits, &config)
        .with_context(|| format!("searching anagrams of `{}`", phrase))?;

    match found {
        Some(anagram) => println!("{}", anagram),
        None => {
            eprintln!("no anagram found");
            process::exit(1);
        }
    }
    Ok(())
}
