use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor::{Hide, Show},
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{error, info, warn};
use std::fs::File;
use std::io::{self, BufWriter, Stdout, Write, stdout};
use std::time::{Duration, Instant};
use termfireworks::input::PointerEvent;
use termfireworks::{Canvas, SimulationEngine};

mod cli;
use cli::Cli;

fn is_exit_key(event: &Event) -> bool {
    let Event::Key(key_event) = event else {
        return false;
    };
    key_event.code == KeyCode::Char('q')
        || key_event.code == KeyCode::Esc
        || (key_event.code == KeyCode::Char('c')
            && key_event.modifiers.contains(event::KeyModifiers::CONTROL))
}

fn run_loop(
    stdout: &mut BufWriter<Stdout>,
    engine: &mut SimulationEngine,
    canvas: &mut Canvas,
    bg_color: (u8, u8, u8),
    tick_rate: u32,
) -> Result<()> {
    let mut last_frame = Instant::now();
    let mut accumulator = 0.0f32;
    let fixed_dt = 1.0 / tick_rate as f32;

    loop {
        if event::poll(Duration::from_millis(1))? {
            let event = event::read()?;
            if is_exit_key(&event) {
                break;
            }
            match &event {
                Event::Resize(cols, rows) => {
                    let (width, height) = (*cols as usize, *rows as usize * 2);
                    info!("surface resized to {width}x{height}");
                    engine.resize(width, height);
                    *canvas = Canvas::new(width, height, bg_color);
                    execute!(stdout, Clear(ClearType::All))?;
                }
                _ => {
                    if let Some(pointer) = PointerEvent::from_event(&event) {
                        if let Err(e) = pointer.apply(engine) {
                            warn!("ignoring pointer input: {e}");
                        }
                    }
                }
            }
        }

        let now = Instant::now();
        let frame_time = now.duration_since(last_frame).as_secs_f32();
        last_frame = now;

        // Catch up at most three ticks after a stall.
        accumulator += frame_time;
        if accumulator > fixed_dt * 3.0 {
            accumulator = fixed_dt * 3.0;
        }

        let mut ticked = false;
        while accumulator >= fixed_dt {
            engine.advance();
            accumulator -= fixed_dt;
            ticked = true;
        }

        if ticked {
            engine.render(canvas);
            canvas.write_frame(stdout)?;
        }
    }

    Ok(())
}

/// Undoes the terminal setup. Every step runs even if an earlier one fails;
/// the failures are returned so the caller can report them.
fn restore_terminal(
    out: &mut impl Write,
    disable_raw_mode: impl FnOnce() -> io::Result<()>,
) -> Vec<io::Error> {
    [
        execute!(out, Show, LeaveAlternateScreen, DisableMouseCapture),
        out.flush(),
        disable_raw_mode(),
    ]
    .into_iter()
    .filter_map(|step| step.err())
    .collect()
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(level) = cli.log_level() {
        logger.filter_level(level);
    }
    if let Some(path) = &cli.log_file {
        let file = File::create(path)
            .with_context(|| format!("failed to create log file {}", path.display()))?;
        logger.target(env_logger::Target::Pipe(Box::new(file)));
    }
    logger.init();

    let (cols, rows) = terminal::size().context("failed to query terminal size")?;
    let (width, height) = (cols as usize, rows as usize * 2);

    let config = cli.config(height);
    let mut engine = match cli.seed {
        Some(seed) => SimulationEngine::with_seed(config, width, height, seed),
        None => SimulationEngine::new(config, width, height),
    }
    .context("invalid configuration")?;
    let bg_color = cli.bg_color.unwrap_or((0, 0, 0));
    let mut canvas = Canvas::new(width, height, bg_color);

    info!(
        "starting {width}x{height} display at {} ticks/s",
        cli.tick_rate
    );

    let console_level = log::max_level();
    log::set_max_level(cli.screen_log_level(console_level));

    let mut stdout = BufWriter::with_capacity(1024 * 64, stdout());

    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    let result = execute!(
        stdout,
        EnterAlternateScreen,
        Hide,
        Clear(ClearType::All),
        EnableMouseCapture
    )
    .map_err(anyhow::Error::from)
    .and_then(|()| run_loop(&mut stdout, &mut engine, &mut canvas, bg_color, cli.tick_rate));

    let restore_errors = restore_terminal(&mut stdout, terminal::disable_raw_mode);
    log::set_max_level(console_level);
    for e in &restore_errors {
        error!("failed to restore terminal: {e}");
    }

    info!("stopped after {} ticks", engine.tick());
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Writer whose every write and flush fails.
    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }
    }

    #[test]
    fn test_raw_mode_disabled_even_if_screen_restore_fails() {
        let mut raw_mode_disabled = false;
        let errors = restore_terminal(&mut BrokenPipe, || {
            raw_mode_disabled = true;
            Ok(())
        });
        assert!(raw_mode_disabled);
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_restore_reports_nothing_on_success() {
        let mut out = Vec::new();
        let errors = restore_terminal(&mut out, || Ok(()));
        assert!(errors.is_empty());
        assert!(!out.is_empty());
    }
}
