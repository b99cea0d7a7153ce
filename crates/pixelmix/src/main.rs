use std::io::Write;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use pixelmix_core::{ConfigManager, Dispatcher, EngineState, Reply};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

/// Visual mixer driven by line based control messages on stdin.
#[derive(Parser, Debug)]
#[command(name = "pixelmix")]
#[command(about = "Pixelmix visual engine")]
struct Args {
    /// Config file (defaults to the user config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Preset file, overriding the configured path
    #[arg(long)]
    presets: Option<PathBuf>,

    /// Directory generator assets are loaded from, overriding the configured path
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Apply output changes immediately instead of through the output faders
    #[arg(long, default_value = "false")]
    no_transition: bool,
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut config = ConfigManager::new(args.config);
    let mut settings = config
        .load()
        .with_context(|| format!("loading config {}", config.config_path().display()))?;
    if let Some(data_dir) = args.data_dir {
        settings.data_dir = data_dir;
    }
    let presets_path = args.presets.unwrap_or_else(|| settings.presets_path.clone());
    let fps = settings.target_fps.max(1);

    log::info!(
        "Starting with {} visuals, {} outputs, assets from {}",
        settings.visual_count,
        settings.output_count,
        settings.data_dir.display()
    );

    let state = EngineState::new(settings).with_preset_file(&presets_path)?;
    let dispatcher = Dispatcher::new(state);

    run(
        &dispatcher,
        BufReader::new(tokio::io::stdin()),
        std::io::stdout(),
        !args.no_transition,
        Duration::from_secs(1) / fps,
    )
    .await
}

/// Feed newline separated messages to the dispatcher until `input` ends,
/// ticking the engine every `frame_time`.
///
/// Lines that are not valid UTF-8 are decoded lossily so the dispatcher can
/// reject them like any other malformed message.
async fn run<R, W>(
    dispatcher: &Dispatcher,
    input: R,
    mut output: W,
    use_transition: bool,
    frame_time: Duration,
) -> Result<(), anyhow::Error>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.split(b'\n');
    let mut frame_interval = tokio::time::interval(frame_time);
    let mut last_frame = Instant::now();

    loop {
        tokio::select! {
            segment = lines.next_segment() => {
                let Some(bytes) = segment.context("reading input")? else {
                    log::info!("Input closed, shutting down");
                    break;
                };
                let line = String::from_utf8_lossy(&bytes);
                if let Some(Reply::Status) = dispatcher.process_line(&line, use_transition) {
                    for status in dispatcher.status() {
                        writeln!(output, "{}", status)?;
                    }
                    output.flush()?;
                }
            }

            _ = frame_interval.tick() => {
                let now = Instant::now();
                for done in dispatcher.tick(now - last_frame) {
                    log::debug!("Output {} now shows visual {}", done.mapping, done.target_visual);
                }
                last_frame = now;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use pixelmix_core::Settings;

    use super::*;

    #[tokio::test]
    async fn test_invalid_utf8_line_does_not_stop_input() {
        let dispatcher = Dispatcher::new(EngineState::new(Settings::default()));
        let input: &[u8] = b"STATUS\n\xff\xfe bad\nCHANGE_TINT 1 2 3\nSTATUS\n";
        let mut output = Vec::new();

        run(&dispatcher, input, &mut output, true, Duration::from_millis(40))
            .await
            .unwrap();

        let printed = String::from_utf8(output).unwrap();
        assert_eq!(printed.matches("RANDOM OFF").count(), 2);
        assert!(printed.contains("CHANGE_TINT 1 2 3"));
        assert_eq!(dispatcher.state().lock().tint(), (1, 2, 3));
    }

    #[tokio::test]
    async fn test_crlf_lines_are_accepted() {
        let dispatcher = Dispatcher::new(EngineState::new(Settings::default()));
        let input: &[u8] = b"CHANGE_THRESHOLD_VALUE 7\r\n";

        run(&dispatcher, input, Vec::new(), true, Duration::from_millis(40))
            .await
            .unwrap();

        assert_eq!(dispatcher.state().lock().threshold(), 7);
    }
}
