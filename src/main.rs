//! Terminal demo: plays the hero headline and the About reveal.
//!
//! Usage: `folio [preset.toml] [seconds]`. A numeric argument sets how long
//! to run; any other argument is read as an options preset.

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use folio::animation::{Caret, Frame};
use folio::host::AnimationThread;
use folio::options::Options;
use folio::FolioError;

/// Redraw period, roughly 30 fps.
const FRAME_INTERVAL: Duration = Duration::from_millis(33);
/// The About block "scrolls into view" this long after start.
const ABOUT_VISIBLE_AFTER: Duration = Duration::from_secs(1);
const DEFAULT_SECONDS: u64 = 15;

struct Args {
    preset: Option<PathBuf>,
    seconds: u64,
}

impl Args {
    fn parse() -> Self {
        let mut args = Self {
            preset: None,
            seconds: DEFAULT_SECONDS,
        };
        for arg in std::env::args().skip(1) {
            match arg.parse::<u64>() {
                Ok(seconds) => args.seconds = seconds,
                Err(_) => args.preset = Some(PathBuf::from(arg)),
            }
        }
        args
    }
}

fn caret_glyph(caret: Caret) -> &'static str {
    match caret {
        Caret::Typing | Caret::Deleting => "|",
        Caret::Resting => "_",
        Caret::Hidden => "",
    }
}

fn draw(out: &mut impl Write, hero: &Frame, about: &Frame) -> io::Result<()> {
    // Clear screen, cursor home.
    write!(out, "\x1b[2J\x1b[H")?;
    writeln!(out, "{}{}", hero.text, caret_glyph(hero.caret))?;
    writeln!(out)?;
    writeln!(out, "{}{}", about.text, caret_glyph(about.caret))?;
    out.flush()
}

fn run(args: &Args) -> Result<(), FolioError> {
    let options = match &args.preset {
        Some(path) => {
            log::info!("loading options from {}", path.display());
            Options::load(path)?
        }
        None => Options::default(),
    };

    let mut hero = AnimationThread::spawn(options.hero.build_animator())?;
    let mut about = AnimationThread::spawn(options.about.build_animator())?;

    let start = Instant::now();
    let end = start + Duration::from_secs(args.seconds);
    let mut about_visible = false;
    let mut out = io::stdout().lock();

    while Instant::now() < end {
        if !about_visible && start.elapsed() >= ABOUT_VISIBLE_AFTER {
            about.set_visible(true);
            about_visible = true;
        }
        draw(&mut out, hero.latest(), about.latest())?;
        std::thread::sleep(FRAME_INTERVAL);
    }

    hero.shutdown();
    about.shutdown();
    Ok(())
}

fn main() {
    env_logger::init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
