// src/handlers/cli.rs
// DOCUMENTATION: Command line front end
// PURPOSE: Turn positional arguments or interactive answers into a SearchRequest

use crate::errors::PlacesError;
use crate::models::{parse_min_count, SearchRequest};
use clap::Parser;
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// Collect business listings from the Google Places API into a spreadsheet
#[derive(Debug, Parser)]
#[command(name = "places-harvester", version)]
#[command(about = "Collect business listings from Google Places into an .xlsx file")]
#[command(allow_negative_numbers = true)]
pub struct Cli {
    /// What to search for, e.g. "dentists"
    pub query: Option<String>,

    /// Where to search, e.g. "Lisbon, Portugal"
    pub location: Option<String>,

    /// Minimum number of places to collect
    pub min_count: Option<i64>,

    /// Ask for the inputs interactively even if arguments are given
    #[arg(short, long)]
    pub interactive: bool,

    /// Do not log per-place progress
    #[arg(short, long)]
    pub quiet: bool,

    /// Output file (defaults to "<query>_in_<location>.xlsx" in OUTPUT_DIR)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// How the three inputs are gathered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Interactive,
    Arguments,
}

impl Cli {
    /// Prompts when asked to, or when no positional argument was given at all
    pub fn input_mode(&self) -> InputMode {
        let no_positionals =
            self.query.is_none() && self.location.is_none() && self.min_count.is_none();
        if self.interactive || no_positionals {
            InputMode::Interactive
        } else {
            InputMode::Arguments
        }
    }

    /// Build the search request from arguments or prompts
    /// DOCUMENTATION: Only gathers input; callers validate the request before use
    pub fn search_request<R: BufRead, W: Write>(
        &self,
        input: &mut R,
        output: &mut W,
    ) -> Result<SearchRequest, PlacesError> {
        match self.input_mode() {
            InputMode::Interactive => prompt_search_request(input, output),
            InputMode::Arguments => match (&self.query, &self.location, self.min_count) {
                (Some(query), Some(location), Some(min_count)) => Ok(SearchRequest::new(
                    query.trim(),
                    location.trim(),
                    min_count,
                )),
                _ => Err(PlacesError::InvalidInput(
                    "QUERY, LOCATION and MIN_COUNT are all required".to_string(),
                )),
            },
        }
    }
}

/// Ask the three questions on `output` and read answers from `input`
pub fn prompt_search_request<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> Result<SearchRequest, PlacesError> {
    let query = ask(input, output, "What are you looking for?")?;
    let location = ask(input, output, "Enter the location (e.g., country, city):")?;
    let min_count = ask(input, output, "Minimum number of places to collect:")?;

    Ok(SearchRequest::new(query, location, parse_min_count(&min_count)))
}

fn ask<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
) -> Result<String, PlacesError> {
    let io_error =
        |e: std::io::Error| PlacesError::InvalidInput(format!("Failed to read input: {}", e));

    write!(output, "{} ", question).map_err(io_error)?;
    output.flush().map_err(io_error)?;

    let mut answer = String::new();
    input.read_line(&mut answer).map_err(io_error)?;
    Ok(answer.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DEFAULT_MIN_COUNT;
    use std::io::Cursor;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["places-harvester"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_arguments_mode() {
        let cli = parse(&["dentists", "Lisbon", "25"]);
        assert_eq!(cli.input_mode(), InputMode::Arguments);

        let request = cli
            .search_request(&mut Cursor::new(""), &mut Vec::new())
            .unwrap();
        assert_eq!(request.query, "dentists");
        assert_eq!(request.location, "Lisbon");
        assert_eq!(request.min_count, 25);
    }

    #[test]
    fn test_negative_count_reaches_validation() {
        let cli = parse(&["dentists", "Lisbon", "-2"]);
        let request = cli
            .search_request(&mut Cursor::new(""), &mut Vec::new())
            .unwrap();
        assert_eq!(request.min_count, -2);
    }

    #[test]
    fn test_partial_arguments_rejected() {
        let cli = parse(&["dentists"]);
        let err = cli
            .search_request(&mut Cursor::new(""), &mut Vec::new())
            .unwrap_err();
        assert!(matches!(err, PlacesError::InvalidInput(_)));
    }

    #[test]
    fn test_output_flag() {
        let cli = parse(&["bars", "Porto", "5", "--output", "/tmp/bars.xlsx"]);
        assert_eq!(cli.output, Some(PathBuf::from("/tmp/bars.xlsx")));
    }

    #[test]
    fn test_interactive_prompts() {
        let cli = parse(&[]);
        assert_eq!(cli.input_mode(), InputMode::Interactive);

        let mut input = Cursor::new("coffee shops\nPorto, Portugal\n15\n");
        let mut output = Vec::new();
        let request = cli.search_request(&mut input, &mut output).unwrap();

        assert_eq!(request.query, "coffee shops");
        assert_eq!(request.location, "Porto, Portugal");
        assert_eq!(request.min_count, 15);

        let shown = String::from_utf8(output).unwrap();
        assert!(shown.contains("What are you looking for?"));
        assert!(shown.contains("Minimum number of places to collect:"));
    }

    #[test]
    fn test_interactive_count_falls_back_to_default() {
        let mut input = Cursor::new("bakeries\nBraga\nplenty\n");
        let request = prompt_search_request(&mut input, &mut Vec::new()).unwrap();
        assert_eq!(request.min_count, DEFAULT_MIN_COUNT);

        let mut input = Cursor::new("bakeries\nBraga\n");
        let request = prompt_search_request(&mut input, &mut Vec::new()).unwrap();
        assert_eq!(request.min_count, DEFAULT_MIN_COUNT);
    }

    #[test]
    fn test_interactive_flag_overrides_arguments() {
        let cli = parse(&["dentists", "Lisbon", "25", "--interactive"]);
        assert_eq!(cli.input_mode(), InputMode::Interactive);
    }
}
