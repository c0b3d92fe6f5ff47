use capitol_trade_scoring::ProfileTable;
use clap::Args;

#[derive(Args)]
pub struct TopArgs {
    /// Number of profiles to show
    #[arg(long, default_value_t = 10)]
    pub n: usize,
}

/// Prints the curated profile table ranked by historical alpha.
pub fn run_top(args: &TopArgs) {
    let table = ProfileTable::curated();
    let ranked = table.ranked_by_alpha();

    println!("\n{}", "=".repeat(60));
    println!("  TOP PROFILES BY HISTORICAL ALPHA");
    println!("{}", "=".repeat(60));

    for (rank, (name, profile)) in ranked.iter().take(args.n).enumerate() {
        let bar = "#".repeat((profile.historical_alpha * 20.0) as usize);
        println!("\n{:2}. {name}", rank + 1);
        println!(
            "    alpha: {bar} {:.0}%",
            profile.historical_alpha * 100.0
        );
        if !profile.sectors.is_empty() {
            println!("    sectors: {}", profile.sectors.join(", "));
        }
        if profile.late_filer {
            println!("    chronically late filer");
        }
        if let Some(notes) = &profile.notes {
            println!("    notes: {notes}");
        }
    }
    println!();
}
