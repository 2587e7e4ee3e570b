use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

/// Dodge and destroy descending enemies across escalating waves.
#[derive(Parser, Debug, Clone)]
#[command(name = "arcade_shooter", version, about)]
pub struct Args {
    /// Seed for spawn positions, speeds and enemy fire; random when omitted.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Simulation/render frames per second.
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..=240))]
    pub fps: u32,

    /// Where log output goes.  The terminal itself is the game screen.
    #[arg(long, default_value = "arcade_shooter.log")]
    pub log_file: PathBuf,
}

/// How long a key stays "held" after its last press/repeat event.
/// The OS key-repeat rate is ≥ 15 Hz, so ~133 ms is refreshed in time.
const HOLD_WINDOW: Duration = Duration::from_millis(133);

impl Args {
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs(1) / self.fps
    }

    /// Hold window expressed in frames at the configured rate.
    pub fn hold_window_frames(&self) -> u64 {
        let frames = HOLD_WINDOW.as_millis() as u64 * self.fps as u64 / 1000;
        frames.max(1)
    }
}
