//! REPL commands: lexing, parsing and execution against a session

use std::ops::Range;

use arbor_lib::prelude::*;
use arbor_lib::{plural_is_are, plural_s, render_symbol_counts, sample};
use logos::{Lexer, Logos};

fn number(lex: &mut Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}

fn verbatim(lex: &mut Lexer<Token>) -> Option<String> {
    Some(lex.slice().to_string())
}

#[rustfmt::skip]
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(skip r"[ \t\r\n]+")]
pub enum Token {
    #[regex(r"-?(\d+(\.\d*)?|\.\d+)([eE][+-]?\d+)?", number)]
                                            Number(f64),
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", verbatim)]
                                            Word(String),
    #[token("=")]                           Equals,

    // Keywords
    #[token("let", ignore(case))]
    #[token("set", ignore(case))]           Set,
    #[token("new", ignore(case))]           New,
    #[token("const", ignore(case))]         Const,
    #[token("remove", ignore(case))]        Remove,
    #[token("clear", ignore(case))]         Clear,
    #[token("vars", ignore(case))]
    #[token("variables", ignore(case))]     Vars,
    #[token("consts", ignore(case))]
    #[token("constants", ignore(case))]     Consts,
    #[token("show", ignore(case))]          Show,
    #[token("style", ignore(case))]         Style,
    #[token("quit", ignore(case))]
    #[token("exit", ignore(case))]          Quit,
}

pub type Lexicon = Vec<(Token, Range<usize>)>;

#[derive(Debug, Clone, PartialEq)]
pub struct CommandError {
    pub span: Range<usize>,
    pub msg: String,
}

impl CommandError {
    fn new(span: Range<usize>, msg: impl Into<String>) -> Self {
        Self {
            span,
            msg: msg.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Empty,
    Set(String, f64),
    New(String, Option<f64>),
    Const(String, f64),
    Remove(String),
    Clear,
    Vars,
    Consts,
    Show(Option<String>),
    Style(Option<RenderStyle>),
    Quit,
}

/// Lexes a line into tokens and their source spans.
pub fn tokenize(source: &str) -> Result<Lexicon, CommandError> {
    let mut lex = Token::lexer(source);
    let mut tokens = Vec::new();
    while let Some(token) = lex.next() {
        match token {
            Ok(token) => tokens.push((token, lex.span())),
            Err(()) => {
                return Err(CommandError::new(
                    lex.span(),
                    format!("Unexpected input: '{}'", lex.slice()),
                ));
            }
        }
    }
    Ok(tokens)
}

pub fn parse(source: &str) -> Result<Command, CommandError> {
    let tokens = tokenize(source)?;
    match tokens.as_slice() {
        [] => Ok(Command::Empty),
        [(Token::Set, _), (Token::Word(name), _), (Token::Equals, _), (Token::Number(value), _)]
        | [(Token::Set, _), (Token::Word(name), _), (Token::Number(value), _)] => {
            Ok(Command::Set(name.clone(), *value))
        }
        [(Token::New, _), (Token::Word(name), _)] => Ok(Command::New(name.clone(), None)),
        [(Token::New, _), (Token::Word(name), _), (Token::Equals, _), (Token::Number(value), _)]
        | [(Token::New, _), (Token::Word(name), _), (Token::Number(value), _)] => {
            Ok(Command::New(name.clone(), Some(*value)))
        }
        [(Token::Const, _), (Token::Word(name), _), (Token::Equals, _), (Token::Number(value), _)]
        | [(Token::Const, _), (Token::Word(name), _), (Token::Number(value), _)] => {
            Ok(Command::Const(name.clone(), *value))
        }
        [(Token::Remove, _), (Token::Word(name), _)] => Ok(Command::Remove(name.clone())),
        [(Token::Clear, _)] => Ok(Command::Clear),
        [(Token::Vars, _)] => Ok(Command::Vars),
        [(Token::Consts, _)] => Ok(Command::Consts),
        [(Token::Show, _)] => Ok(Command::Show(None)),
        [(Token::Show, _), (Token::Word(name), _)] => Ok(Command::Show(Some(name.clone()))),
        [(Token::Style, _)] => Ok(Command::Style(None)),
        [(Token::Style, _), (Token::Word(style), span)] => match style.to_lowercase().as_str() {
            "legacy" => Ok(Command::Style(Some(RenderStyle::Legacy))),
            "strict" => Ok(Command::Style(Some(RenderStyle::Strict))),
            _ => Err(CommandError::new(
                span.clone(),
                format!("Unknown style '{style}', expected 'legacy' or 'strict'"),
            )),
        },
        [(Token::Quit, _)] => Ok(Command::Quit),
        [(first, span), rest @ ..] => {
            let end = rest.last().map_or(span.end, |(_, last)| last.end);
            Err(CommandError::new(span.start..end, usage(first)))
        }
    }
}

fn usage(first: &Token) -> String {
    let usage = match first {
        Token::Set => "let <name> = <number>",
        Token::New => "new <name> [<number>]",
        Token::Const => "const <name> = <number>",
        Token::Remove => "remove <name>",
        Token::Clear => "clear",
        Token::Vars => "vars",
        Token::Consts => "consts",
        Token::Show => "show [<sample>]",
        Token::Style => "style [legacy | strict]",
        Token::Quit => "quit",
        Token::Number(_) | Token::Word(_) | Token::Equals => {
            return "Unknown command, type 'help' for a list of commands".to_string();
        }
    };
    format!("Usage: {usage}")
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Lines(Vec<String>),
    Quit,
}

/// Applies a command to the session. Symbol table failures are returned as
/// errors, evaluation failures of sample trees are printed in place.
pub fn execute(session: &mut Session, command: Command) -> ArborResult<Outcome> {
    let lines = match command {
        Command::Empty => Vec::new(),
        Command::Set(name, value) => {
            if session.symbols_mut().set_variable(&name, value)? {
                vec![format!("{name} = {value}")]
            } else {
                vec![format!("{name} = {value} (Overwriting previous value)")]
            }
        }
        Command::New(name, value) => {
            match value {
                Some(value) => session.symbols_mut().create_variable(&name, value)?,
                None => session.symbols_mut().create_variable_default(&name)?,
            }
            vec![format!("{name} = {}", value.unwrap_or_default())]
        }
        Command::Const(name, value) => {
            session.symbols_mut().register_constant(&name, value)?;
            vec![format!("{name} = {value}")]
        }
        Command::Remove(name) => match session.symbols_mut().remove_variable(&name) {
            Some(value) => vec![format!("Removed {name} (was {value})")],
            None => vec![format!("{name} is not a variable")],
        },
        Command::Clear => {
            let count = session.symbols().number_of_variables();
            session.symbols_mut().clear_variables();
            vec![format!("Removed {count} variable{}", plural_s(count))]
        }
        Command::Vars => listing(
            "variable",
            session
                .symbols()
                .variables()
                .map(|(name, value)| format!("{name} = {value}")),
        ),
        Command::Consts => listing(
            "constant",
            session
                .symbols()
                .constants()
                .map(|(name, value)| format!("{name} = {value}")),
        ),
        Command::Show(None) => session
            .report_samples()?
            .into_iter()
            .map(|(_, line)| line)
            .collect(),
        Command::Show(Some(name)) => match sample(&name)? {
            Some(sample) => vec![session.report_lossy(&sample.expr)],
            None => vec![format!("No sample named '{name}'")],
        },
        Command::Style(None) => vec![format!("Rendering style: {:?}", session.style())],
        Command::Style(Some(style)) => {
            session.set_style(style);
            vec![format!("Rendering style: {style:?}")]
        }
        Command::Quit => return Ok(Outcome::Quit),
    };
    Ok(Outcome::Lines(lines))
}

fn listing(kind: &str, entries: impl Iterator<Item = String>) -> Vec<String> {
    let entries = entries.collect::<Vec<_>>();
    let count = entries.len();
    let mut lines = vec![format!(
        "There {} {count} {kind}{}",
        plural_is_are(count),
        plural_s(count)
    )];
    lines.extend(entries.into_iter().map(|entry| format!("  {entry}")));
    lines
}

/// One line summary of the session's symbol table, if it holds anything.
pub fn summary(session: &Session) -> Option<String> {
    render_symbol_counts(
        session.symbols().number_of_constants(),
        session.symbols().number_of_variables(),
    )
    .map(|counts| format!("Defined: {counts}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(session: &mut Session, input: &str) -> Vec<String> {
        match execute(session, parse(input).unwrap()).unwrap() {
            Outcome::Lines(lines) => lines,
            Outcome::Quit => panic!("unexpected quit"),
        }
    }

    #[test]
    fn lexing() {
        let tokens = tokenize("let r = -2.5e1").unwrap();
        assert_eq!(
            vec![
                (Token::Set, 0..3),
                (Token::Word("r".into()), 4..5),
                (Token::Equals, 6..7),
                (Token::Number(-25.0), 8..14),
            ],
            tokens
        );

        let tokens = tokenize("SHOW letters").unwrap();
        assert_eq!(Token::Show, tokens[0].0);
        assert_eq!(Token::Word("letters".into()), tokens[1].0);
    }

    #[test]
    fn lexing_errors_point_at_the_input() {
        let err = tokenize("let r = 1 + 2").unwrap_err();
        assert_eq!(10..11, err.span);
        assert_eq!("Unexpected input: '+'", err.msg);
    }

    #[test]
    fn parsing() {
        assert_eq!(Command::Empty, parse("   ").unwrap());
        assert_eq!(Command::Set("r".into(), 4.0), parse("let r = 4").unwrap());
        assert_eq!(Command::Set("r".into(), 4.0), parse("set r 4").unwrap());
        assert_eq!(Command::New("q".into(), None), parse("new q").unwrap());
        assert_eq!(Command::New("q".into(), Some(0.5)), parse("new q .5").unwrap());
        assert_eq!(Command::Const("c".into(), 3e8), parse("const c = 3e8").unwrap());
        assert_eq!(Command::Remove("r".into()), parse("remove r").unwrap());
        assert_eq!(Command::Show(Some("area".into())), parse("show area").unwrap());
        assert_eq!(
            Command::Style(Some(RenderStyle::Strict)),
            parse("style Strict").unwrap()
        );
        assert_eq!(Command::Quit, parse("exit").unwrap());
    }

    #[test]
    fn parse_errors_carry_usage() {
        let err = parse("let r =").unwrap_err();
        assert_eq!(0..7, err.span);
        assert_eq!("Usage: let <name> = <number>", err.msg);

        let err = parse("frobnicate r").unwrap_err();
        assert_eq!("Unknown command, type 'help' for a list of commands", err.msg);

        let err = parse("style fancy").unwrap_err();
        assert_eq!(6..11, err.span);
    }

    #[test]
    fn symbol_commands() {
        let mut session = Session::with_samples().unwrap();
        assert_eq!(vec!["r = 3 (Overwriting previous value)"], lines(&mut session, "let r = 3"));
        assert_eq!(vec!["t = 1"], lines(&mut session, "set t 1"));
        assert_eq!(vec!["u = 0"], lines(&mut session, "new u"));
        assert_eq!(vec!["c = 2"], lines(&mut session, "const c 2"));
        assert_eq!(Some(2.0), session.symbols().constant("c"));

        let err = execute(&mut session, parse("new u 4").unwrap()).unwrap_err();
        assert_eq!(ArborErrorKind::DuplicateSymbol, err.kind);

        assert_eq!(vec!["Removed u (was 0)"], lines(&mut session, "remove u"));
        assert_eq!(vec!["u is not a variable"], lines(&mut session, "remove u"));
        assert_eq!(
            vec!["There are 3 variables", "  r = 3", "  s = 5", "  t = 1"],
            lines(&mut session, "vars")
        );
        assert_eq!(vec!["Removed 3 variables"], lines(&mut session, "clear"));
        assert_eq!(vec!["There are 0 variables"], lines(&mut session, "vars"));
        assert_eq!(6, lines(&mut session, "consts").len());
    }

    #[test]
    fn show_reflects_bindings() {
        let mut session = Session::with_samples().unwrap();
        assert_eq!(vec!["r - s = 5"], lines(&mut session, "show difference"));
        lines(&mut session, "let s = 12");
        assert_eq!(vec!["r - s = -2"], lines(&mut session, "show difference"));
        lines(&mut session, "remove s");
        assert_eq!(
            vec!["r - s = error: unknown symbol: Variable `s` is not defined"],
            lines(&mut session, "show difference")
        );
        assert_eq!(vec!["No sample named 'volume'"], lines(&mut session, "show volume"));
        assert_eq!(12, lines(&mut session, "show").len());
    }

    #[test]
    fn style_switching() {
        let mut session = Session::new();
        assert_eq!(vec!["Rendering style: Legacy"], lines(&mut session, "style"));
        assert_eq!(vec!["Rendering style: Strict"], lines(&mut session, "style strict"));
        assert_eq!(RenderStyle::Strict, session.style());
    }

    #[test]
    fn quitting() {
        let mut session = Session::new();
        assert_eq!(
            Outcome::Quit,
            execute(&mut session, parse("quit").unwrap()).unwrap()
        );
    }

    #[test]
    fn summaries() {
        let session = Session::with_samples().unwrap();
        assert_eq!(
            Some("Defined: 4 Constants, 2 Variables".to_string()),
            summary(&session)
        );
    }
}
