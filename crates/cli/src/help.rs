//! Contains functions related to displaying help

#[allow(clippy::wildcard_imports)] // Everything in snippets is a Verbosely named const
use crate::{print_arrowed, print_sidebarred, snippets::*};

pub fn help(lc_input: &str) {
    let mut help_strs = lc_input.split_whitespace();
    help_strs.next();
    if let Some(topic) = help_strs.next() {
        match Topic::from(topic) {
            // All the .help files have a trailing newline, so this is print! instead of println!
            Topic::Symbols => flanked_text("Constants & Variables", HELP_SYMBOLS),
            Topic::Samples => flanked_text("Sample Trees", HELP_SAMPLES),
            Topic::Rendering => flanked_text("Rendering", HELP_RENDERING),
            Topic::Functions => flanked_text("Functions", HELP_FUNCTIONS),
            Topic::Errors => flanked_text("Evaluation Errors", HELP_ERRORS),
            Topic::Topics => print!("{HELP_TOPICS}"),
            Topic::Unknown(topic) => {
                print_sidebarred(&format!("Unknown help topic: {topic}"));
                print_sidebarred("Type: 'help topics' for a list of valid topics");
            }
        }
    } else {
        print!("{HELP_GENERAL}");
    }
}

#[derive(Debug, PartialEq)]
enum Topic<'a> {
    Symbols,
    Samples,
    Rendering,
    Functions,
    Errors,
    Topics,
    Unknown(&'a str),
}

impl<'a> From<&'a str> for Topic<'a> {
    fn from(value: &'a str) -> Self {
        match value {
            "symbols" | "constants" | "consts" | "variables" | "vars" | "let" | "new"
            | "const" | "remove" | "clear" => Topic::Symbols,
            "samples" | "sample" | "show" => Topic::Samples,
            "rendering" | "render" | "style" | "parentheses" => Topic::Rendering,
            "functions" | "function" | "random" | "abs" | "log" => Topic::Functions,
            "errors" | "error" => Topic::Errors,
            "topics" => Topic::Topics,
            other => Self::Unknown(other),
        }
    }
}

fn flanked_text(name: &str, text: &str) {
    print_arrowed(name);
    println!();
    print!("{text}");
    println!();
    print_arrowed("End of Help");
}
