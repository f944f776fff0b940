use checkmate_practice::catalogue::{self, DIFFICULTIES};
use checkmate_practice::ledger::{CompletionLedger, JsonFileStorage};
use checkmate_practice::puzzle::PuzzleId;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() > 2 {
        eprintln!("Usage: practice_catalogue [progress.json]");
        std::process::exit(2);
    }

    let ledger = match args.get(1) {
        None => None,
        Some(path) => match CompletionLedger::open(JsonFileStorage::new(path)) {
            Ok(l) => Some(l),
            Err(e) => {
                eprintln!("Failed to read progress from {path}: {e}");
                std::process::exit(1);
            }
        },
    };

    for difficulty in DIFFICULTIES {
        println!("{difficulty}:");
        for &id in difficulty.puzzles() {
            let Ok(puzzle) = PuzzleId::parse(id) else {
                println!("  {id:<14} (unparseable)");
                continue;
            };
            let beaten = ledger.as_ref().is_some_and(|l| l.is_beaten(id));
            let groups = puzzle
                .instructions()
                .iter()
                .map(|i| i.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            println!(
                "  {} {id:<14} {groups}{}",
                if beaten { "[x]" } else { "[ ]" },
                if catalogue::is_royal_nearer(id) {
                    "  (royal nearer)"
                } else {
                    ""
                }
            );
        }
    }
}
