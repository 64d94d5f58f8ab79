use std::path::PathBuf;

use clap::Parser;
use derecurse::driver::Options;
use derecurse::grammar::DEFAULT_START_SYMBOL;

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// File containing the test cases (default: stdin)
    pub file: Option<PathBuf>,

    /// Start symbol, always processed first (default: S)
    #[arg(short, long, value_name = "SYMBOL")]
    pub start: Option<String>,

    /// Read one grammar without case or rule counts
    #[arg(long)]
    pub single: bool,

    /// Print prompts even when stdin is not a terminal
    #[arg(short, long)]
    pub interactive: bool,

    /// Transform independent cases in parallel
    #[arg(short, long)]
    pub parallel: bool,

    /// More log output, repeat for more detail
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8
}

impl Cli {
    pub fn options(&self) -> Options {
        Options {
            start_symbol: self.start.clone().unwrap_or_else(|| DEFAULT_START_SYMBOL.to_string()),
            single: self.single,
            interactive: self.interactive,
            parallel: self.parallel,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn default_options() {
        let cli = Cli::try_parse_from(["derecurse"]).unwrap();
        let options = cli.options();

        assert_eq!(cli.file, None);
        assert_eq!(options.start_symbol, "S");
        assert!(!options.single && !options.interactive && !options.parallel);
    }

    #[test]
    fn all_options() {
        let cli = Cli::try_parse_from(["derecurse", "cases.txt", "-s", "P", "--single", "-p", "-vv"]).unwrap();
        let options = cli.options();

        assert_eq!(cli.file, Some(PathBuf::from("cases.txt")));
        assert_eq!(options.start_symbol, "P");
        assert!(options.single && options.parallel);
        assert_eq!(cli.verbose, 2);
    }
}
