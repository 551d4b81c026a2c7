//! route-planner CLI: reads a plan request as JSON (file argument or stdin)
//! and prints the plan as JSON on stdout.

use std::env;
use std::error::Error;
use std::fs;
use std::io::{self, Read};

use tracing::info;
use tracing_subscriber::EnvFilter;

use route_planner::model::format_minutes;
use route_planner::{PlanRequest, generate_route_plan};

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("route_planner=info".parse()?))
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let input = match args.get(1).map(String::as_str) {
        Some("-") | None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
        Some(path) => fs::read_to_string(path)?,
    };

    let request: PlanRequest = serde_json::from_str(&input)?;
    let plan = generate_route_plan(&request);

    for planned in &plan.route {
        info!(
            order = planned.schedule.order_index,
            stop_id = %planned.stop.id,
            start = %format_minutes(planned.schedule.planned_start_minutes),
            end = %format_minutes(planned.schedule.planned_end_minutes),
            "planned stop"
        );
    }

    println!("{}", serde_json::to_string_pretty(&plan)?);
    Ok(())
}
