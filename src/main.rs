use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

use playreach::config::PlayreachConfig;
use playreach::export::HtmlReportWriter;
use playreach::layers::GeoJsonFileSink;
use playreach::models::Point;
use playreach::report;
use playreach::session::{AccessSession, PointPicker};
use playreach::PlayreachError;

/// Yields the point given on the command line
struct ArgsPointPicker {
    point: Option<Point>,
}

impl PointPicker for ArgsPointPicker {
    fn pick_point(&mut self) -> Option<Point> {
        self.point.take()
    }
}

struct CliArgs {
    point: Point,
    radius_meters: f64,
    layers_path: PathBuf,
    export_dir: Option<PathBuf>,
}

fn print_usage() {
    eprintln!(
        "Usage: playreach <lon> <lat> [radius_meters] [--layers <file>] [--export <dir>]"
    );
}

fn parse_args(args: &[String], config: &PlayreachConfig) -> Option<CliArgs> {
    let mut positional = Vec::new();
    let mut layers_path = PathBuf::from("playground_layers.geojson");
    let mut export_dir = None;

    let mut rest = args.iter().skip(1);
    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "--layers" => layers_path = PathBuf::from(rest.next()?),
            "--export" => export_dir = Some(PathBuf::from(rest.next()?)),
            _ => positional.push(arg),
        }
    }

    if !(2..=3).contains(&positional.len()) {
        return None;
    }

    let lon: f64 = positional[0].parse().ok()?;
    let lat: f64 = positional[1].parse().ok()?;
    let radius_meters = match positional.get(2) {
        Some(raw) => raw.parse().ok()?,
        None => f64::from(config.defaults.search_radius_meters),
    };

    Some(CliArgs {
        point: Point::new(lon, lat),
        radius_meters,
        layers_path,
        export_dir,
    })
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        match err.downcast_ref::<PlayreachError>() {
            Some(app_err) => eprintln!("{}", app_err.user_message()),
            None => eprintln!("{err:#}"),
        }
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = PlayreachConfig::load()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args: Vec<String> = std::env::args().collect();
    let Some(cli) = parse_args(&args, &config) else {
        print_usage();
        std::process::exit(2);
    };

    let mut session = AccessSession::new(&config);
    let mut picker = ArgsPointPicker {
        point: Some(cli.point),
    };
    if session.select_point(&mut picker).is_none() {
        return Err(PlayreachError::NoPointSelected.into());
    }

    let mut layer_sink = GeoJsonFileSink::new(&cli.layers_path);
    let result = session.analyze(cli.radius_meters, &mut layer_sink).await?;

    println!("{}", report::summary_text(result, cli.radius_meters));
    println!("\nLayers written to {}", cli.layers_path.display());

    if let Some(directory) = &cli.export_dir {
        let path = session.export(&HtmlReportWriter, directory)?;
        println!("Report exported to {}", path.display());
    }

    Ok(())
}
