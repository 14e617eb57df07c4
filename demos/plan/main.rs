//! Poolfoil plan demo: plans a built-in pool and prints the layout.
//!
//! Usage:
//! ```text
//! cargo run --example plan                       # default (rectangle)
//! cargo run --example plan -- splash             # pool by name
//! cargo run --example plan -- l_shape --json     # full plan as JSON
//! RUST_LOG=poolfoil=debug cargo run --example plan
//! ```
//!
//! A `poolfoil.toml` in the working directory overrides planner defaults.

use std::path::Path;

use poolfoil::geometry::{
    DepthProfile, LegacyPlacement, LegacyStairs, PoolShape, PoolSpec, SplashPoolConfig,
    StairsInput,
};
use poolfoil::operations::estimate::EstimateMaterial;
use poolfoil::operations::layout::{PlanFoil, PlanResult};
use poolfoil::{PlannerConfig, PoolfoilError};

fn main() -> Result<(), PoolfoilError> {
    // Default: WARN for everything, INFO for poolfoil.
    // Override with RUST_LOG env var (e.g. RUST_LOG=poolfoil=trace).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("poolfoil=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let json = args.iter().any(|a| a == "--json");
    let name = args
        .iter()
        .find(|a| !a.starts_with("--"))
        .map_or("rectangle", String::as_str);

    let config = PlannerConfig::load(Path::new("poolfoil.toml"))?;

    let Some(spec) = pool(name) else {
        eprintln!("unknown pool '{name}', try: rectangle, oval, l_shape, stairs, splash");
        return Ok(());
    };

    let estimate = EstimateMaterial::new(&spec, &config).execute()?;
    let plan = PlanFoil::new(&spec, &config).execute()?;

    if json {
        match serde_json::to_string_pretty(&plan) {
            Ok(text) => println!("{text}"),
            Err(e) => eprintln!("failed to serialize plan: {e}"),
        }
        return Ok(());
    }

    println!(
        "estimate: {:.1} m² -> {} narrow / {} wide rolls (prefer {})",
        estimate.total_area, estimate.narrow.rolls, estimate.wide.rolls, estimate.preferred
    );
    print_plan(&plan);
    Ok(())
}

fn pool(name: &str) -> Option<PoolSpec> {
    let rectangle = || {
        PoolSpec::new(
            PoolShape::Rectangle {
                length: 8.0,
                width: 4.0,
            },
            DepthProfile::Flat { depth: 1.4 },
        )
    };
    let spec = match name {
        "rectangle" => rectangle(),
        "oval" => PoolSpec::new(
            PoolShape::Oval {
                length: 7.0,
                width: 3.5,
            },
            DepthProfile::Flat { depth: 1.2 },
        ),
        "l_shape" => PoolSpec::new(
            PoolShape::LShape {
                length: 10.0,
                width: 6.0,
                cutout_length: 4.0,
                cutout_width: 2.0,
            },
            DepthProfile::Sloped {
                shallow: 1.1,
                deep: 1.8,
            },
        )
        .with_irregular_surcharge(5.0),
        "stairs" => rectangle().with_stairs(StairsInput::Legacy(LegacyStairs {
            placement: LegacyPlacement::DiagonalCorner,
            width: 0.0,
            step_count: 4,
            step_depth: 0.3,
            riser_height: 0.25,
        })),
        "splash" => rectangle().with_splash_pool(SplashPoolConfig::new(2.0, 0.6).with_dividing_wall(0.3)),
        _ => return None,
    };
    Some(spec)
}

fn print_plan(plan: &PlanResult) {
    println!(
        "strategy {:?}: {} segments, {} strips, {} rolls, waste {:.1} m² ({:.1}%)",
        plan.strategy,
        plan.segments.len(),
        plan.strips.len(),
        plan.rolls.len(),
        plan.waste_area,
        plan.waste_percentage
    );
    for count in plan.roll_counts() {
        println!(
            "  {} rolls: {} ({:.2} m used)",
            count.roll_width, count.rolls, count.used_length
        );
    }
    for (i, roll) in plan.rolls.iter().enumerate() {
        let lengths: Vec<String> = roll
            .strips
            .iter()
            .map(|&s| format!("{:.2}", plan.strips[s].strip_length))
            .collect();
        println!(
            "  roll {i} [{}]: {} | waste {:.2} m",
            roll.roll_width,
            lengths.join(" + "),
            roll.waste_length
        );
    }
    let c = &plan.comparison;
    for s in [c.narrow_only, c.wide_only, c.mixed] {
        println!(
            "  {:?}: {} rolls, {:.1}% waste, score {:.1}",
            s.strategy, s.roll_count, s.waste_percentage, s.score
        );
    }
    for issue in &plan.issues {
        println!("  {:?} {:?}: {}", issue.severity, issue.code, issue.message);
    }
}
