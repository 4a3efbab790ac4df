mod display;
mod intent;
mod settings;
mod shell;

use std::io::{stdin, stdout, Write};

use anyhow::{anyhow, Result};
use clap::{arg, Command};
use scale_core::{Mode, Session};
use tracing_subscriber::{
    filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

use crate::display::{print_catalog, Formatter};
use crate::settings::Settings;
use crate::shell::Shell;

static CLIENT_NAME: &str = "shopscale";

fn session_from(settings: &Settings) -> Result<Session> {
    Ok(Session::new(settings.catalog()).with_mode(settings.mode()?))
}

fn convert<W: Write>(
    mut wr: W,
    mut session: Session,
    fmt: &Formatter,
    query: &str,
    mode: Option<&str>,
    amount: &str,
) -> Result<()> {
    let good = session
        .find_good(query)
        .map(|good| good.id)
        .ok_or_else(|| anyhow!("no good matches {:?}", query))?;
    session.select_good(good);
    if let Some(mode) = mode {
        session.set_mode(mode.parse::<Mode>()?);
    }
    session.set_pending_input(amount);

    let result = session
        .live_result()
        .ok_or_else(|| anyhow!("{:?} is not a positive amount", amount))?;
    writeln!(wr, "{}", fmt.amount(result.value, result.output_unit))?;

    Ok(())
}

fn goods<W: Write>(wr: W, session: &Session, fmt: &Formatter) -> Result<()> {
    let active = session.active_good().map(|good| good.id);
    print_catalog(wr, fmt, session.catalog(), active)
}

fn run() -> Result<()> {
    let app = Command::new(CLIENT_NAME)
        .about("Converts between price and weight or volume for goods sold per kilogram or \
         liter, keeping a short history of conversions.")
        .version("0.1.0")
        .arg(arg!(CONFIG: -c --config [FILE] "Sets a custom config file"))
        .arg(arg!(verbose: -v --verbose "Logs session activity to stderr"))
        .subcommand(Command::new("shell").about("Starts the interactive calculator (default)."))
        .subcommand(Command::new("goods").about("Prints the goods the calculator starts with."))
        .subcommand(Command::new("convert")
            .about("Converts a single amount and exits.")
            .arg(arg!(good: -g --good <GOOD> "The good to convert, by number, name or id."))
            .arg(arg!(mode: -m --mode [MODE] "Either price (amount to quantity) or quantity (quantity to amount)."))
            .arg(arg!(<AMOUNT> "The amount of money, grams or milliliters.").allow_hyphen_values(true)));
    let matches = app.get_matches();

    if matches.is_present("verbose") {
        tracing_subscriber::registry()
            .with(
                EnvFilter::builder()
                    .with_default_directive(LevelFilter::INFO.into())
                    .from_env_lossy(),
            )
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    let settings = Settings::new(matches.value_of("CONFIG"))?;
    let fmt = Formatter::new(settings.currency()?);

    match matches.subcommand() {
        Some(("convert", convert_matches)) => {
            let query = convert_matches
                .value_of("good")
                .ok_or_else(|| anyhow!("--good is required"))?;
            let amount = convert_matches
                .value_of("AMOUNT")
                .ok_or_else(|| anyhow!("an amount is required"))?;
            convert(
                stdout(),
                session_from(&settings)?,
                &fmt,
                query,
                convert_matches.value_of("mode"),
                amount,
            )?;
        }
        Some(("goods", _)) => goods(stdout(), &session_from(&settings)?, &fmt)?,
        Some(("shell", _)) | None => {
            let session = session_from(&settings)?;
            Shell::new(session, fmt, stdin().lock(), stdout()).run()?;
        }
        _ => unreachable!(),
    }

    Ok(())
}

fn main() {
    if let Err(err) = run() {
        println!("{:#}", err);
        std::process::exit(1);
    }
}
