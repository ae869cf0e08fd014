use clap::Parser;
use mailscrub::{BounceExtractor, ExtractCli};
use std::process;

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    let cli = ExtractCli::parse();
    let extractor = BounceExtractor::from_cli(&cli);

    match extractor.extract_bounces(&cli.path, &cli.output) {
        Ok(outcome) => {
            extractor.output_formatter().print_extract_summary(&outcome);
            0
        }
        Err(e) => {
            extractor.handle_error(&e);
            1
        }
    }
}
