//! EchoView device entry point.
//!
//! Spawns the whisper.cpp `stream` transcriber and mirrors every line it
//! produces onto the OLED. Single thread of control:
//!
//! ```text
//! spawn transcriber → loop { blocking next_line → tee to stdout → render }
//!                   → on end-of-stream, wait for child exit
//! ```

mod oled;
mod settings;

use anyhow::Context;
use echoview_core::{DisplaySink, Renderer, StreamSource, StubSink, TranscriptSource};
use settings::{default_settings_path, load_settings};
use tracing::info;

fn main() -> anyhow::Result<()> {
    // ── Tracing ───────────────────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "echoview=info".parse().unwrap()),
        )
        .init();

    info!("EchoView starting");

    let settings_path = default_settings_path();
    let settings = load_settings(&settings_path);
    info!(
        settings_path = ?settings_path,
        model = %settings.stream.model.display(),
        step_ms = settings.stream.step_ms,
        length_ms = settings.stream.length_ms,
        headless = settings.display.headless,
        "runtime settings loaded"
    );

    // ── Display ───────────────────────────────────────────────────────────
    let sink: Box<dyn DisplaySink> = if settings.display.headless {
        info!("headless mode — frames go to an in-memory stub");
        Box::new(StubSink::new())
    } else {
        Box::new(
            oled::OledSink::open(&settings.display.i2c_bus, settings.display.i2c_address)
                .context("failed to open SSD1306 panel")?,
        )
    };
    let mut renderer = Renderer::new(sink, settings.display.width, settings.display.height);

    // Blank the panel before the first transcript arrives.
    renderer.render("")?;

    // ── Line source ───────────────────────────────────────────────────────
    let mut source = StreamSource::spawn(&settings.stream)
        .context("failed to start transcriber subprocess")?;

    // ── Consumer loop ─────────────────────────────────────────────────────
    while let Some(line) = source.next_line()? {
        // Operator tee: every consumed line is echoed to stdout.
        println!("{line}");
        renderer.render(line.trim())?;
    }

    let status = source.wait()?;
    info!(%status, "line source exhausted — exiting");
    Ok(())
}
