use slew::{ManeuverPlan, PlanConfig};
use std::error::Error;

const DEFAULT_PLAN: &str = include_str!("mission.yaml");

fn main() -> Result<(), Box<dyn Error>> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive("info".parse().expect("invalid filter"))
                .from_env_lossy(),
        )
        .try_init();

    // a plan file may be given as the first argument; otherwise use the bundled one
    let text = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(path)?,
        None => DEFAULT_PLAN.to_owned(),
    };
    let config: PlanConfig = serde_yaml::from_str(&text)?;
    let request = config.into_request()?;
    println!(
        "{} run in {}, starting from {}",
        request.mode(),
        request.convention(),
        request.initial()
    );

    let plan = request.plan();
    let trace = plan.trace()?;
    println!("{trace}");
    trace.log();

    // the maneuvers can be re-derived from the attitudes alone
    let attitudes: Vec<_> = plan.attitude_angles().into_values().collect();
    let recovered = ManeuverPlan::recover(&attitudes, plan.convention())?;
    for ((step, ours), theirs) in plan
        .maneuver_angles()
        .into_iter()
        .zip(recovered.maneuver_angles().into_values())
    {
        println!("maneuver {step}: planned {ours}, recovered {theirs}");
    }

    let final_attitude = plan.final_attitude();
    println!("final body axes (columns):{}", final_attitude.to_rotation_matrix());
    Ok(())
}
