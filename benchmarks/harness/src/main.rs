//! ssmul-bench-harness
//!
//! Run end-to-end multiplications (generate -> multiply -> spot-check) and
//! append CSV rows into `benchmarks/reports/bench-<unix>.csv`.
//!
//! Usage examples:
//!   cargo run -p ssmul-bench-harness -- --profile configs/profiles/small.toml
//!   cargo run -p ssmul-bench-harness -- --profile configs/profiles/medium.toml --check true

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use rand::{rngs::StdRng, Rng as _, SeedableRng};
use serde::Deserialize;
use tracing::info;

use ssmul::mul;
use ssmul_arith::{mpn, Limb};

#[derive(Debug, Deserialize)]
struct Profile {
    /// Limb counts to multiply (each size is squared: a and b both get it)
    sizes: Vec<usize>,
    /// Repetitions per size
    repeats: u32,
    /// RNG seed for operand generation
    seed: u64,
}

fn parse_flag(name: &str, default: &str) -> String {
    let mut it = std::env::args().skip(1);
    while let Some(k) = it.next() {
        if k == format!("--{name}") {
            return it.next().unwrap_or_else(|| default.to_string());
        }
    }
    default.to_string()
}

fn dur_ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1e3
}

fn rand_limbs(rng: &mut StdRng, n: usize) -> Vec<Limb> {
    (0..n).map(|_| rng.random::<u64>()).collect()
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let profile_path = PathBuf::from(parse_flag("profile", "configs/profiles/small.toml"));
    let check = parse_flag("check", "false") == "true";

    let profile_src = fs::read_to_string(&profile_path)
        .with_context(|| format!("read profile {profile_path:?}"))?;
    let profile: Profile = toml::from_str(&profile_src).context("parse profile toml")?;
    info!(?profile.sizes, profile.repeats, check, "profile loaded");

    fs::create_dir_all("benchmarks/reports").ok();
    let ts = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
    let csv_path = PathBuf::from(format!("benchmarks/reports/bench-{ts}.csv"));
    let mut csv = fs::File::create(&csv_path)?;
    writeln!(csv, "limbs,rep,mul_ms,checked")?;

    let mut rng = StdRng::seed_from_u64(profile.seed);

    for &limbs in &profile.sizes {
        for rep in 0..profile.repeats {
            let a = rand_limbs(&mut rng, limbs);
            let b = rand_limbs(&mut rng, limbs);
            let mut r = vec![0; 2 * limbs];

            let t0 = Instant::now();
            mul(&mut r, &a, &b);
            let elapsed = t0.elapsed();

            let mut ok = true;
            if check {
                let mut want = vec![0; 2 * limbs];
                mpn::mul(&mut want, &a, &b);
                ok = want == r;
                anyhow::ensure!(ok, "product mismatch at {limbs} limbs");
            }

            info!(limbs, rep, ms = dur_ms(elapsed), "mul");
            writeln!(csv, "{limbs},{rep},{:.3},{}", dur_ms(elapsed), ok)?;
        }
    }

    info!(?csv_path, "done");
    Ok(())
}
