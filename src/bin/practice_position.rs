use checkmate_practice::catalogue;
use checkmate_practice::config::PracticeConfig;
use checkmate_practice::generate::generate_checkmate_position;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        eprintln!(
            "Usage: practice_position <puzzle> [count]\n\nAvailable puzzles:\n  - {}",
            catalogue::all_puzzles().collect::<Vec<_>>().join("\n  - ")
        );
        std::process::exit(2);
    }

    let puzzle = &args[1];
    let count: usize = match args.get(2).map(|s| s.parse()) {
        None => 1,
        Some(Ok(n)) => n,
        Some(Err(_)) => {
            eprintln!("count must be a non-negative integer, got {:?}", args[2]);
            std::process::exit(2);
        }
    };

    let cfg = PracticeConfig::from_env();
    let mut rng = match cfg.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };

    for _ in 0..count {
        match generate_checkmate_position(puzzle, &mut rng, cfg.limits) {
            Ok(pos) => println!("{}", pos.to_compact()),
            Err(e) => {
                eprintln!("Failed to generate {puzzle}: {e}");
                std::process::exit(1);
            }
        }
    }
}
