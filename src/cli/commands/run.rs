use crate::bench::{Benchmark, BenchmarkReport};
use crate::cli::{Output, OutputFormat};
use crate::config::{ConfigOverrides, ParsumConfig, ReduceOverrides, SampleOverrides};
use crate::error::ReduceError;
use crate::parallel::{Backend, Reducer, partition};
use crate::sample::Sampler;
use anyhow::{Context, Result};
use clap::Args;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Number of samples to generate
    #[arg(short = 'n', long)]
    pub count: Option<usize>,

    /// Worker threads for the parallel sum (0 = one per CPU core)
    #[arg(short, long)]
    pub threads: Option<usize>,

    /// Parallel backend
    #[arg(long, value_enum)]
    pub backend: Option<Backend>,

    /// Seed for a reproducible sample buffer
    #[arg(long)]
    pub seed: Option<u64>,

    /// Smallest sample value (inclusive)
    #[arg(long, allow_negative_numbers = true)]
    pub min: Option<i32>,

    /// Largest sample value (inclusive)
    #[arg(long, allow_negative_numbers = true)]
    pub max: Option<i32>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl RunArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            reduce: ReduceOverrides {
                threads: self.threads,
                backend: self.backend,
            },
            sample: SampleOverrides {
                count: self.count,
                min: self.min,
                max: self.max,
                seed: self.seed,
            },
        }
    }
}

pub fn execute(args: RunArgs, custom_config: Option<&str>, output: &Output) -> Result<()> {
    let config = ParsumConfig::load_with(custom_config, &args.overrides())?;
    let sampler = config.sampler()?;
    let strategy = config.strategy();
    let reducer = strategy
        .build()
        .context("Failed to set up the parallel reducer")?;

    if matches!(reducer, Reducer::Sequential) {
        output.warning(&format!(
            "{} samples is below the parallel threshold of {}; both sums run sequentially",
            config.sample.count, config.reduce.min_items_for_parallel
        ));
    }

    // JSON reports own stdout
    if args.format == OutputFormat::Text {
        describe_run(&config, &sampler, &reducer, output);
    }

    let benchmark = Benchmark::new(sampler, config.sample.count, reducer);
    let report = check_outcome(benchmark.run(), output)?;

    match args.format {
        OutputFormat::Text => print_text(&report, output),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(())
}

/// Report a sum mismatch as a critical failure; other errors get context
fn check_outcome(
    outcome: std::result::Result<BenchmarkReport, ReduceError>,
    output: &Output,
) -> Result<BenchmarkReport> {
    match outcome {
        Ok(report) => Ok(report),
        Err(err @ ReduceError::Mismatch { .. }) => {
            output.critical(&err.to_string());
            Err(err.into())
        }
        Err(err) => Err(err).context("Benchmark failed"),
    }
}

fn describe_run(config: &ParsumConfig, sampler: &Sampler, reducer: &Reducer, output: &Output) {
    if !output.is_verbose() {
        return;
    }

    let (min, max) = sampler.range();
    output.verbose(&format!(
        "Summing {} samples from [{min}, {max}]",
        config.sample.count
    ));
    output.verbose_breakdown("backend", reducer.name());
    output.verbose_breakdown("workers", &reducer.workers().to_string());
    if let Some(seed) = config.sample.seed {
        output.verbose_breakdown("seed", &seed.to_string());
    }

    if let Reducer::Scoped(scoped) = reducer {
        for (worker_id, range) in partition(config.sample.count, scoped.workers())
            .into_iter()
            .enumerate()
        {
            output.verbose_breakdown(
                &format!("worker {worker_id}"),
                &format!("{}..{} ({} samples)", range.start, range.end, range.len()),
            );
        }
    }
}

fn print_text(report: &BenchmarkReport, output: &Output) {
    output.result("Sequential:", report.sequential.sum);
    output.elapsed(report.sequential.seconds);
    output.result("Parallel:", report.parallel.sum);
    output.elapsed(report.parallel.seconds);

    if output.is_quiet() {
        return;
    }

    output.success(&format!(
        "Sums match ({} samples, {} workers, {} backend)",
        report.count, report.workers, report.backend
    ));
    if let Some(speedup) = report.speedup {
        output.key_value("speedup", &format!("{speedup:.2}x"), speedup > 1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parallel::ExecutionStrategy;

    fn silent() -> Output {
        Output::new(false, true)
    }

    #[test]
    fn test_check_outcome_passes_report_through() {
        let reducer = ExecutionStrategy::Parallel { workers: 2 }.build().unwrap();
        let benchmark = Benchmark::new(Sampler::default(), 4, reducer);
        let outcome = benchmark.run_on(&[1, -2, 3, 4]);

        let report = check_outcome(outcome, &silent()).unwrap();
        assert_eq!(report.sequential.sum, 6);
        assert_eq!(report.parallel.sum, 6);
    }

    #[test]
    fn test_check_outcome_fails_on_mismatch() {
        let outcome = Err(ReduceError::Mismatch {
            sequential: 2,
            parallel: 3,
        });

        let err = check_outcome(outcome, &silent()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ReduceError>(),
            Some(ReduceError::Mismatch {
                sequential: 2,
                parallel: 3
            })
        ));
        assert_eq!(err.to_string(), "sum mismatch: sequential = 2, parallel = 3");
    }

    #[test]
    fn test_check_outcome_adds_context_to_other_errors() {
        let err = check_outcome(Err(ReduceError::WorkerPanic), &silent()).unwrap_err();
        assert_eq!(err.to_string(), "Benchmark failed");
        assert!(matches!(
            err.downcast_ref::<ReduceError>(),
            Some(ReduceError::WorkerPanic)
        ));
    }
}
