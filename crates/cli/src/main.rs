use anyhow::{Context, Result};
use clap::Parser;

use rebalance_cli::{Args, load_table_file, write_outputs};
use rebalance_transfer::TransferEngine;

fn main() -> Result<()> {
    let args = Args::parse();
    rebalance_observability::init_with(args.log_format);

    tracing::info!(
        input = %args.input.display(),
        strategy = %args.strategy,
        "starting transfer run"
    );

    let table = load_table_file(&args.input)?;
    let run = TransferEngine::new(args.strategy)
        .run(&table)
        .with_context(|| format!("cannot process '{}'", args.input.display()))?;
    let files = write_outputs(&run, &args.output_dir, chrono::Local::now())?;

    let stats = &run.plan.statistics;
    println!("strategy:            {} ({}% RF cap)", args.strategy, args.strategy.rf_cap_percent());
    println!(
        "rows:                {} read, {} kept, {} dropped, {} cells corrected",
        run.preprocess.input_rows,
        run.preprocess.output_records,
        run.preprocess.dropped_rows(),
        run.preprocess.corrected_cells()
    );
    println!(
        "candidates:          {} transfer-out, {} receive",
        stats.transfer_candidates, stats.receive_candidates
    );
    println!(
        "recommendations:     {} ({} units)",
        stats.recommendation_count, stats.total_quantity
    );
    println!(
        "left over:           {} units unmatched, {} receivers unsatisfied",
        stats.unmatched_transfer_qty, stats.unsatisfied_receive_candidates
    );
    println!(
        "quality checks:      {}",
        if run.plan.quality.all_passed { "passed" } else { "FAILED" }
    );
    println!("suggestions:         {}", files.suggestions.display());
    println!("summary:             {}", files.summary.display());

    Ok(())
}
