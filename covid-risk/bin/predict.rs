use covid_risk::{prelude::*, utils::render_vbars, Config};
use log::*;
use std::{env, fs, process};

/// Usage: predict [conf.toml]
///
/// Reads the profile and calculator settings from the config file and prints
/// the infection probability. With [refresh] enabled, the prediction is
/// repeated on the configured interval.
pub fn main() {
    use simple_logger::SimpleLogger;
    SimpleLogger::new().init().unwrap();

    let path = env::args().nth(1).unwrap_or_else(|| "conf.toml".to_string());
    if let Err(err) = run(&path) {
        error!("{}", err);
        eprintln!("error: {}", err);
        process::exit(match err {
            Error::InvalidInput { .. } | Error::InvalidConfig(_) => 2,
            _ => 1,
        });
    }
}

fn run(path: &str) -> Result<()> {
    let cfg = Config::load(path)?;
    let calc = cfg.calculator()?;
    let profile = cfg.risk_profile()?;

    if cfg.refresh.enabled {
        let refresher = cfg.refresh.refresher();
        info!("refreshing every {:?}", refresher.interval());
        refresher.run(|_| predict_once(&cfg, &calc, &profile))?;
        return Ok(());
    }
    predict_once(&cfg, &calc, &profile)
}

fn predict_once(cfg: &Config, calc: &Calculator, profile: &RiskProfile) -> Result<()> {
    let result = calc.simulate_profile(profile)?;
    let prob = result.probability(calc.metric());
    println!("Probability of infection: {:.2}%", prob);

    if cfg.output.plot {
        let curve = result.infectious().to_vec();
        println!("{}", render_vbars(&curve, cfg.output.plot_height));
    }
    if let Some(name) = &cfg.output.epicurve_csv {
        fs::write(name, result.render_csv()?)?;
        info!("epicurve written to {}", name);
    }
    Ok(())
}
