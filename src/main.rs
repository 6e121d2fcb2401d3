// What you SEE:
// • A square practice grid with the character faded in as a tracing guide.
// • Hold Left Mouse to write in black ink.
// • G hides/shows the guide (your ink stays put). C clears. ENTER marks the
//   attempt done and earns a star. ESC quits.

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use hanzi_tracer::draw::{Drawer, draw_crosshair, draw_text_5x7};
use hanzi_tracer::error::Error;
use hanzi_tracer::glyph::JsonGlyphSource;
use hanzi_tracer::logging;
use hanzi_tracer::reward::{RewardState, Tier};
use hanzi_tracer::sampler::PointSampler;
use hanzi_tracer::session::PracticeSession;
use hanzi_tracer::types::FrameBuffer;
use hanzi_tracer::Settings;

#[derive(Parser, Debug)]
#[command(about = "Trace a Chinese character over a faded guide")]
struct Cli {
    /// Character to practice
    #[arg(default_value_t = '十')]
    character: char,

    /// Settings file (JSON); defaults apply when it does not exist
    #[arg(long, default_value = "settings.json")]
    settings: PathBuf,

    /// Verbose logging (RUST_LOG is honored)
    #[arg(long)]
    debug: bool,
}

fn main() -> Result<(), Error> {
    let cli = Cli::parse();
    let settings = Settings::load(&cli.settings)?;
    logging::init(cli.debug || settings.debug_logging);

    /* --- Glyph + session ---
       Terminal: the stroke list for the character is printed once. */
    let source = JsonGlyphSource::new(&settings.data_dir);
    let mut session = PracticeSession::new(&settings, RewardState::load(&settings.reward_file));
    let reward_file = settings.reward_file.clone();
    session.on_complete(move |done| {
        if let Err(e) = done.rewards.save(&reward_file) {
            error!(error = %e, "could not save rewards");
        }
    });
    session.load_character(&source, cli.character);

    let labels = session.decomposition().labels();
    info!(character = %cli.character, strokes = labels.len(), origin = ?session.decomposition().origin, "stroke order");
    for label in &labels {
        println!("{label}");
    }

    /* --- Window ---
       Visual: window opens showing the grid (and guide, if enabled). */
    let size = settings.surface_size;
    let mut drawer = Drawer::new("Hanzi Tracer", settings.window_size, settings.window_size)?;
    let mut sampler = PointSampler::new(drawer.window_size(), (size, size));
    let mut last_tier: Option<Tier> = None;

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        sampler.set_display(drawer.window_size());

        /* 1) Keys */
        if drawer.clear_pressed_once() {
            session.surface_mut().clear(); // visual: ink disappears, grid stays
        }
        if drawer.guide_pressed_once() {
            let surface = session.surface_mut();
            let next = !surface.guide_visible();
            surface.set_guide_visible(next); // visual: faded glyph appears/disappears under the ink
        }
        if drawer.done_pressed_once() {
            if let Some(done) = session.complete() {
                last_tier = Some(done.tier); // visual: surface clears, HUD counters tick up
            }
        }

        /* 2) Pen: press opens a stroke, drag extends it, release closes it */
        let pen = drawer.mouse_pos().and_then(|(x, y)| sampler.sample(x, y));
        let surface = session.surface_mut();
        match (drawer.left_mouse_down(), pen) {
            (true, Some(p)) if surface.is_stroke_open() => surface.continue_stroke(p),
            (true, Some(p)) => surface.begin_stroke(p),
            (true, None) | (false, _) => surface.end_stroke(),
        }

        /* 3) Compose the frame: surface, then crosshair + HUD on the copy only */
        let Some(raster) = session.surface().raster() else {
            break;
        };
        let mut screen = FrameBuffer::from_rgba(raster);
        if let Some(p) = pen {
            draw_crosshair(&mut screen, p.x as i32, p.y as i32, 8, 0x00_E0_40_40);
        }

        let r = session.rewards();
        let guide = if session.surface().guide_visible() { "GUIDE ON" } else { "GUIDE OFF" };
        let tier = match last_tier {
            Some(Tier::Sun) => " | NEW SUN",
            Some(Tier::Moon) => " | NEW MOON",
            Some(Tier::Star) => " | NEW STAR",
            None => "",
        };
        let bottom = screen.height as i32 - 12;
        draw_text_5x7(&mut screen, 6, 6, &format!("{guide} | C CLEAR  G GUIDE  ENTER DONE"), 0x00_20_60_C0);
        draw_text_5x7(
            &mut screen,
            6,
            bottom,
            &format!("STARS {} MOONS {} SUNS {}{}", r.stars, r.moons, r.suns, tier),
            0x00_C0_80_10,
        );

        /* 4) Present */
        drawer.present(&screen)?;
    }

    Ok(())
}
