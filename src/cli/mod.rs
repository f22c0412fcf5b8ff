use crate::{PlannerConfig, TravelPlannerAgent, TravelStyle, TripRequest};
use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn build_command() -> Command {
    Command::new("trip-planner")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Plan a multi-day trip: itinerary, budget, weather and charts")
        .arg(
            Arg::new("destination")
                .help("Where to travel, e.g. Paris")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("days")
                .short('d')
                .long("days")
                .value_name("N")
                .help("Trip length in days")
                .value_parser(value_parser!(u32))
                .required(true),
        )
        .arg(
            Arg::new("budget")
                .short('b')
                .long("budget")
                .value_name("AMOUNT")
                .help("Total budget for the whole trip")
                .value_parser(value_parser!(f64))
                .required(true),
        )
        .arg(
            Arg::new("style")
                .short('s')
                .long("style")
                .value_name("STYLE")
                .help("luxury, comfort, cultural, adventure, relaxation, budget or mixed")
                .default_value("mixed"),
        )
        .arg(
            Arg::new("travelers")
                .short('n')
                .long("travelers")
                .value_name("COUNT")
                .help("Number of travelers")
                .value_parser(value_parser!(u32))
                .default_value("1"),
        )
        .arg(
            Arg::new("interests")
                .short('i')
                .long("interests")
                .value_name("TAGS")
                .help("Comma-separated interest tags, e.g. museums,food")
                .value_delimiter(',')
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("month")
                .long("month")
                .value_name("MONTH")
                .help("Month of travel")
                .default_value("May"),
        )
        .arg(
            Arg::new("model")
                .short('m')
                .long("model")
                .value_name("MODEL")
                .help("Model used as the decision oracle (or set MODEL)"),
        )
        .arg(
            Arg::new("api-key")
                .short('k')
                .long("api-key")
                .value_name("KEY")
                .help("API key (or set OPENAI_API_KEY env var)"),
        )
        .arg(
            Arg::new("base-url")
                .short('u')
                .long("base-url")
                .value_name("URL")
                .help("API base URL (or set OPENAI_BASE_URL / OPENROUTER_BASE_URL env vars)"),
        )
        .arg(
            Arg::new("timeout")
                .short('t')
                .long("timeout")
                .value_name("SECONDS")
                .help("Decision oracle timeout in seconds (or set PLANNER_TIMEOUT_SECS)")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("offline")
                .long("offline")
                .help("Use the built-in scripted oracle instead of a remote model")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("trace")
                .long("trace")
                .help("Print the step-by-step planning trace after the report")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print the full plan result as JSON")
                .action(ArgAction::SetTrue),
        )
}

fn trip_request(matches: &ArgMatches) -> anyhow::Result<TripRequest> {
    let destination = matches
        .get_one::<String>("destination")
        .context("destination is required")?;
    let days = *matches.get_one::<u32>("days").context("--days is required")?;
    let budget = *matches
        .get_one::<f64>("budget")
        .context("--budget is required")?;

    let style: TravelStyle = matches
        .get_one::<String>("style")
        .map(|raw| raw.parse::<TravelStyle>())
        .transpose()?
        .unwrap_or_default();

    let mut request = TripRequest::new(destination.as_str(), days, budget)
        .with_travel_style(style)
        .with_traveler_count(matches.get_one::<u32>("travelers").copied().unwrap_or(1));

    if let Some(interests) = matches.get_many::<String>("interests") {
        request = request.with_interests(interests.cloned());
    }
    if let Some(month) = matches.get_one::<String>("month") {
        request = request.with_travel_month(month.as_str());
    }

    request.validate()?;
    Ok(request)
}

/// Environment settings with command-line overrides applied
fn planner_config(matches: &ArgMatches) -> anyhow::Result<PlannerConfig> {
    let mut config = PlannerConfig::from_env()?;

    if let Some(api_key) = matches.get_one::<String>("api-key") {
        config = config.with_api_key(api_key.as_str());
    }
    if let Some(base_url) = matches.get_one::<String>("base-url") {
        config = config.with_base_url(base_url.as_str());
    }
    if let Some(model) = matches.get_one::<String>("model") {
        config = config.with_model(model.as_str());
    }
    if let Some(secs) = matches.get_one::<u64>("timeout") {
        config = config.with_timeout(Duration::from_secs(*secs));
    }

    config.validate()?;
    Ok(config)
}

/// CLI entry point for the trip planner
pub async fn run() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = build_command().get_matches();
    let request = trip_request(&matches)?;
    let config = planner_config(&matches)?;

    let agent = if matches.get_flag("offline") {
        info!("Using the scripted offline oracle");
        TravelPlannerAgent::offline().with_timeout(config.timeout)
    } else {
        info!("Using model: {}", config.model);
        info!("Base URL: {}", config.base_url);
        TravelPlannerAgent::from_config(&config)?
    };

    let plan = match agent.plan_trip(&request).await {
        Ok(plan) => plan,
        Err(e) => {
            error!("Trip planning failed: {}", e);
            return Err(e.into());
        }
    };

    if matches.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    println!("{}", plan.report);
    println!();
    for (label, image) in [
        ("Itinerary map", plan.itinerary_map()),
        ("Budget chart", plan.budget_chart()),
    ] {
        match image {
            Some(uri) => println!("{}: generated ({} bytes data-URI)", label, uri.len()),
            None => println!("{}: not generated", label),
        }
    }

    if matches.get_flag("trace") {
        println!("\n{}", plan.replay());
    }

    info!(
        "Trip planning completed in {:.2}s",
        plan.duration.as_secs_f64()
    );
    Ok(())
}
