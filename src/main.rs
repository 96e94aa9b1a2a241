//! Noodle Pull entry point
//!
//! Native: runs unattended rounds with the autoplay driver and logs every
//! stage change. The browser build is driven through `platform::web` instead.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use noodle_pull::hud;
    use noodle_pull::sim::{Autoplay, GameEvent, GameState, Viewport};
    use noodle_pull::{GameConfig, Variant};

    const USAGE: &str = "\
Usage: noodle-pull [OPTIONS]

Options:
  --config <FILE>     JSON game config (defaults for missing fields)
  --variant <NAME>    noodles | classic (ignored with --config)
  --rounds <N>        doughs to finish [default: 3]
  --seed <N>          autoplay seed [default: 1]
  -h, --help          print this help";

    /// Strokes allowed per dough before autoplay is considered stuck
    const MAX_STROKES_PER_ROUND: usize = 200;

    struct Args {
        config: Option<PathBuf>,
        variant: Variant,
        rounds: u64,
        seed: u64,
    }

    fn parse_variant(s: &str) -> Result<Variant, String> {
        Variant::from_str(s).ok_or_else(|| format!("unknown variant '{s}'"))
    }

    fn parse_args() -> Result<Option<Args>, pico_args::Error> {
        let mut pargs = pico_args::Arguments::from_env();
        if pargs.contains(["-h", "--help"]) {
            println!("{USAGE}");
            return Ok(None);
        }

        let args = Args {
            config: pargs.opt_value_from_str("--config")?,
            variant: pargs
                .opt_value_from_fn("--variant", parse_variant)?
                .unwrap_or_default(),
            rounds: pargs.opt_value_from_str("--rounds")?.unwrap_or(3),
            seed: pargs.opt_value_from_str("--seed")?.unwrap_or(1),
        };

        let rest = pargs.finish();
        if !rest.is_empty() {
            log::warn!("Ignoring unexpected arguments: {rest:?}");
        }
        Ok(Some(args))
    }

    fn log_event(event: &GameEvent) {
        match event {
            GameEvent::GestureRejected { .. } => log::trace!("{event:?}"),
            _ => log::debug!("{event:?}"),
        }
    }

    pub fn run() -> Result<(), Box<dyn std::error::Error>> {
        let Some(args) = parse_args()? else {
            return Ok(());
        };

        let config = match &args.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::from_variant(args.variant),
        };
        log::info!(
            "Noodle Pull (native) starting: cutting stage {}, seed {}",
            if config.enable_cutting_stage { "on" } else { "off" },
            args.seed
        );

        let mut state = GameState::new(config, Viewport::default())?;
        let mut autoplay = Autoplay::new(args.seed);

        for round in 1..=args.rounds {
            let strokes = autoplay
                .play_round(&mut state, MAX_STROKES_PER_ROUND)
                .ok_or_else(|| format!("round {round} did not finish"))?;
            for event in state.drain_events() {
                log_event(&event);
            }
            log::info!("Round {round} finished in {strokes} strokes");
        }

        let snap = hud::snapshot(&state);
        println!(
            "Finished {} dough(s); next stage: {}",
            snap.completed_count, snap.instruction
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    if let Err(e) = native::run() {
        log::error!("{e}");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::start, this is just to satisfy the compiler
}
