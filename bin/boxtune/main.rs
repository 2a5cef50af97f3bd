//! Command-line front end for the boxtune design library.

use anyhow::{Context, Result, bail};
use clap::Parser;
use log::info;
use serde_json::json;

use boxtune::cli::{Args, display_box_type_list, display_wiring_list};
use boxtune::model::{
    BandpassChambersInput, BoxDimensionsInput, BoxType, CalculationResult, DriverInput,
    PortDimensionsInput,
};
use boxtune::wiring::{AmplifierConfig, amplifier_match, system_impedance};
use boxtune::{compute_bandpass, compute_ported, compute_sealed, synthesize_dimensions, synthesize_port};

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if args.box_type_list {
        display_box_type_list();
        return Ok(());
    }
    if args.wiring_list {
        display_wiring_list();
        return Ok(());
    }

    let mut report = json!({});
    let mut did_something = false;

    if let Some(target) = args.target_volume {
        let displacement = args.displacement.unwrap_or(0.0);
        let dims = synthesize_dimensions(target, args.thickness, args.subs, displacement)
            .context("dimension synthesis failed")?;
        info!("synthesized box for {target} L net");
        if args.json {
            report["synthesized_box"] = serde_json::to_value(&dims)?;
        } else {
            println!(
                "Box for {target:.1} L net ({}\" walls): {:.1} x {:.1} x {:.1} in (W x H x D)",
                args.thickness, dims.width, dims.height, dims.depth
            );
        }
        did_something = true;
    }

    if let Some(target_fb) = args.target_fb {
        let air_space = args
            .air_space
            .context("--target-fb needs --air-space to know the volume being tuned")?;
        let port = synthesize_port(target_fb, air_space).context("port synthesis failed")?;
        if args.json {
            report["synthesized_port"] = serde_json::to_value(&port)?;
        } else {
            println!(
                "Port for {target_fb:.1} Hz in {air_space:.1} L: {:.1} x {:.1} in slot, {:.1} in long",
                port.width, port.height, port.length
            );
        }
        did_something = true;
    }

    if let Some(topology) = args.wiring {
        let impedance = args
            .impedance
            .context("--wiring needs --impedance for the per-coil load")?;
        let coil = args.coil.to_voice_coil(impedance);
        let load = system_impedance(topology, &coil, args.subs)?;
        if args.json {
            report["load"] = serde_json::to_value(&load)?;
        } else {
            println!(
                "{} x {:.1} Ω {} wired in {topology}: {:.2} Ω at the amplifier",
                args.subs, impedance, args.coil, load.ohms
            );
            print_warnings(&load.warnings);
        }

        if let (Some(amp_power), Some(driver_rms)) = (args.amp_power, args.driver_rms) {
            let config = AmplifierConfig {
                power_per_unit: amp_power,
                unit_count: args.amp_count,
                bridged: args.bridged,
            };
            let matched = amplifier_match(&config, driver_rms)?;
            if args.json {
                report["amplifier"] = serde_json::to_value(&matched)?;
            } else {
                println!(
                    "Amplifier bank: {:.0} W total against {driver_rms:.0} W of drivers ({})",
                    matched.total_power, matched.classification
                );
            }
        }
        did_something = true;
    }

    if args.width.is_some() || args.height.is_some() || args.depth.is_some() {
        let result = run_box_design(&args)?;
        if args.json {
            report["design"] = serde_json::to_value(&result)?;
        } else {
            print_result(args.box_type, &result);
        }
        did_something = true;
    }

    if !did_something {
        bail!(
            "nothing to do: give box dimensions, a synthesis target (--target-volume / --target-fb) \
             or a wiring configuration (--wiring)"
        );
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}

fn run_box_design(args: &Args) -> Result<CalculationResult> {
    let dims = BoxDimensionsInput {
        width: args.width,
        height: args.height,
        depth: args.depth,
    };
    let driver = DriverInput {
        fs: args.fs,
        qts: args.qts,
        vas: args.vas,
        sd: args.sd,
        xmax: args.xmax,
        displacement: args.displacement,
    };
    let port = PortDimensionsInput {
        width: args.port_width,
        height: args.port_height,
        length: args.port_length,
    };
    let chambers = BandpassChambersInput {
        sealed_volume: args.sealed_volume,
        ported_volume: args.ported_volume,
        front_ported_volume: args.front_ported_volume,
    };

    let result = match args.box_type {
        BoxType::Sealed => compute_sealed(&dims, args.thickness, args.subs, &driver),
        BoxType::Ported => compute_ported(&dims, args.thickness, args.subs, &port, &driver),
        order => compute_bandpass(
            order,
            &dims,
            args.thickness,
            args.subs,
            &port,
            &chambers,
            &driver,
        ),
    };
    result.with_context(|| format!("{} design failed", args.box_type))
}

/// Render an optional quantity, using an em dash for a value the alignment
/// does not define.
fn fmt_opt(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(v) => format!("{v:.precision$}"),
        None => "—".to_string(),
    }
}

fn print_result(box_type: BoxType, result: &CalculationResult) {
    println!("{box_type} enclosure");
    println!("{}", "-".repeat(46));
    println!("  Gross volume     {:>10.1} L", result.gross_volume);
    println!("  Net volume       {:>10.1} L", result.net_volume);
    println!("  Material volume  {:>10.1} L", result.material_volume);
    println!("  Air space        {:>10.1} L", result.air_space);
    println!("  Qtc              {:>10}", fmt_opt(result.qtc, 3));
    println!("  F3               {:>10} Hz", fmt_opt(result.f3, 1));
    println!("  Fb               {:>10} Hz", fmt_opt(result.fb, 1));
    println!("  Port length      {:>10} in", fmt_opt(result.port_length, 1));
    println!("  Port area        {:>10} in²", fmt_opt(result.port_area, 1));
    println!("  Port velocity    {:>10} m/s", fmt_opt(result.port_velocity, 1));
    println!("  Surface area     {:>10.1} ft²", result.surface_area);
    println!("  Board feet       {:>10.1}", result.board_feet);
    print_warnings(&result.warnings);
}

fn print_warnings(warnings: &[String]) {
    for warning in warnings {
        println!("  warning: {warning}");
    }
}
