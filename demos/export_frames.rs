//! Renders a single transition to numbered PNG files.
//!
//! Usage: `cargo run --example export_frames -- [output_dir]`

use trivert::prelude::*;

fn main() -> Result<(), Error> {
    let dir = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "frames".to_string());

    let (taps, input) = input_channel();
    taps.send(Event::tap(0.0, 0.0))
        .map_err(|e| Error::Io(std::io::Error::other(e.to_string())))?;
    drop(taps);

    let summary = App::new()
        .width(720)
        .height(240)
        .frames_dir(&dir)
        .run(input)?;

    println!("Wrote {} frames to {}", summary.frames, dir);
    Ok(())
}
