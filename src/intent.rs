use std::str::FromStr;

use scale_core::{Color, Mode, ParseError, Unit};
use thiserror::Error;

pub const HELP: &str = "\
Commands:
  goods                               list goods, * marks the selected one
  select <good>                       pick a good by number, name or id
  mode [price|quantity]               toggle or set the calculation mode
  <amount> | input <amount>           enter an amount to convert
  save                                add the current result to history
  history                             list recent conversions
  clear                               clear history
  new <name> <price> <kg|L> [color]   add a good
  price <good> <price>                change the price of a good
  delete <good>                       remove a good
  state                               print the session as JSON
  help                                show this message
  quit                                leave";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IntentError {
    #[error("unknown command {0:?}, type `help` for a list of commands")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("{0:?} is not a number")]
    NotANumber(String),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// One line of user input, parsed.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    Noop,
    Goods,
    Select(String),
    Mode(Option<Mode>),
    Input(String),
    Save,
    History,
    Clear,
    New {
        name: String,
        price: f64,
        unit: Unit,
        color: Color,
    },
    Price {
        good: String,
        price: f64,
    },
    Delete(String),
    State,
    Help,
    Quit,
}

fn number(raw: &str) -> Result<f64, IntentError> {
    raw.parse::<f64>()
        .map_err(|_| IntentError::NotANumber(raw.to_string()))
}

fn parse_new(args: &[&str]) -> Result<Intent, IntentError> {
    const USAGE: &str = "new <name> <price> <kg|L> [color]";

    let mut args = args.to_vec();
    let trailing_color = args.last().and_then(|last| last.parse::<Color>().ok());
    if trailing_color.is_some() {
        args.pop();
    }
    let color = trailing_color.unwrap_or_default();

    let unit = args.pop().ok_or(IntentError::Usage(USAGE))?.parse::<Unit>()?;
    let price = number(args.pop().ok_or(IntentError::Usage(USAGE))?)?;

    Ok(Intent::New {
        name: args.join(" "),
        price,
        unit,
        color,
    })
}

fn parse_price(args: &[&str]) -> Result<Intent, IntentError> {
    const USAGE: &str = "price <good> <price>";

    match args.split_last() {
        Some((price, good)) if !good.is_empty() => Ok(Intent::Price {
            good: good.join(" "),
            price: number(price)?,
        }),
        _ => Err(IntentError::Usage(USAGE)),
    }
}

fn required(args: &[&str], usage: &'static str) -> Result<String, IntentError> {
    if args.is_empty() {
        return Err(IntentError::Usage(usage));
    }

    Ok(args.join(" "))
}

impl FromStr for Intent {
    type Err = IntentError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Intent::Noop);
        }

        if line.parse::<f64>().is_ok() {
            return Ok(Intent::Input(line.to_string()));
        }

        let words: Vec<&str> = line.split_whitespace().collect();
        let (cmd, args) = match words.split_first() {
            Some((cmd, args)) => (cmd.to_lowercase(), args),
            None => return Ok(Intent::Noop),
        };

        match cmd.as_str() {
            "goods" | "list" | "ls" => Ok(Intent::Goods),
            "select" | "use" => Ok(Intent::Select(required(args, "select <good>")?)),
            "mode" => match args.first() {
                Some(mode) => Ok(Intent::Mode(Some(mode.parse::<Mode>()?))),
                None => Ok(Intent::Mode(None)),
            },
            "input" => Ok(Intent::Input(args.join(" "))),
            "save" | "add" => Ok(Intent::Save),
            "history" => Ok(Intent::History),
            "clear" => Ok(Intent::Clear),
            "new" => parse_new(args),
            "price" => parse_price(args),
            "delete" | "rm" => Ok(Intent::Delete(required(args, "delete <good>")?)),
            "state" => Ok(Intent::State),
            "help" | "?" => Ok(Intent::Help),
            "quit" | "exit" | "q" => Ok(Intent::Quit),
            _ => Err(IntentError::Unknown(cmd)),
        }
    }
}
