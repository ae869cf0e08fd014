use clap::Parser;
use mailscrub::{CleanCli, ContactCleaner};
use std::process;

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    let cli = CleanCli::parse();
    let cleaner = ContactCleaner::from_cli(&cli);
    let output = cli.resolved_output();

    match cleaner.clean_contacts(
        &cli.contacts,
        &cli.bounces,
        cli.email_column.as_deref(),
        &output,
    ) {
        Ok(outcome) => {
            cleaner.output_formatter().print_clean_summary(&outcome);
            0
        }
        Err(e) => {
            cleaner.handle_error(&e);
            1
        }
    }
}
