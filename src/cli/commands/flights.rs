use tracing::debug;

use crate::catalog::FlightFilter;
use crate::cli::core::{CommandError, CommandResult, Screen, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::render;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "flights",
            "List flights, optionally filtered",
            "flights [--filter all|nonstop|morning|afternoon|evening] [airline or flight number]",
            cmd_flights,
        ),
        CommandEntry::new(
            "details",
            "Show schedule, baggage and amenities for a flight",
            "details <id>",
            cmd_details,
        ),
        CommandEntry::new(
            "seats",
            "Show the seat map for a flight",
            "seats <id>",
            cmd_seats,
        ),
    ]
}

struct SearchArgs {
    filter: FlightFilter,
    query: String,
}

fn parse_search_args(args: &[&str]) -> Result<SearchArgs, CommandError> {
    let mut filter = FlightFilter::All;
    let mut words = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match *arg {
            "--filter" | "-f" => {
                let value = iter.next().ok_or_else(|| {
                    CommandError::InvalidArguments("`--filter` expects a value".into())
                })?;
                filter = value.parse()?;
            }
            other => match other.strip_prefix("--filter=") {
                Some(value) => filter = value.parse()?,
                None => words.push(other),
            },
        }
    }
    Ok(SearchArgs {
        filter,
        query: words.join(" "),
    })
}

fn cmd_flights(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let SearchArgs { filter, query } = parse_search_args(args)?;
    let results = context.catalog.search(&query, filter);
    debug!(%filter, query = %query, results = results.len(), "flight search");
    render::print_flights(&results, filter, &context.config.currency);
    context.screen = Screen::Flights;

    let remembered = (!query.is_empty()).then(|| query.clone());
    if remembered.is_some() && context.config.last_search != remembered {
        context.config.last_search = remembered;
        context.persist_config()?;
    }
    Ok(())
}

fn required_id<'a>(args: &[&'a str], usage: &str) -> Result<&'a str, CommandError> {
    args.first()
        .copied()
        .ok_or_else(|| CommandError::InvalidArguments(format!("usage: {usage}")))
}

fn cmd_details(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let id = required_id(args, "details <id>")?;
    let flight = context.catalog.get(id)?;
    render::print_lines(
        "Flight Details",
        render::flight_detail_lines(flight, &context.config.currency),
    );
    output::hint(format!(
        "Use `seats {0}` to pick a seat or `book {0}` to continue.",
        flight.id
    ));
    context.screen = Screen::Details(flight.id.clone());
    Ok(())
}

fn cmd_seats(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let id = required_id(args, "seats <id>")?;
    let flight = context.catalog.get(id)?;
    render::print_lines(
        format!("Seat Map · {}", flight.flight_number),
        render::seat_map_lines(
            flight,
            context.config.seat_preference,
            &context.config.currency,
        ),
    );
    output::hint(format!("Use `book {} <seat>` to book with a seat.", flight.id));
    context.screen = Screen::Details(flight.id.clone());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_flag_and_query_are_split() {
        let parsed = parse_search_args(&["--filter", "morning", "Air", "Fly"]).unwrap();
        assert_eq!(parsed.filter, FlightFilter::Morning);
        assert_eq!(parsed.query, "Air Fly");

        let parsed = parse_search_args(&["--filter=non-stop"]).unwrap();
        assert_eq!(parsed.filter, FlightFilter::NonStop);
        assert!(parsed.query.is_empty());
    }

    #[test]
    fn missing_filter_value_is_rejected() {
        assert!(parse_search_args(&["--filter"]).is_err());
        assert!(parse_search_args(&["-f", "midnight"]).is_err());
    }
}
