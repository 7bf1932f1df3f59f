//! Sweeps the whole row forward and back, one tap per node.
//!
//! Run with `RUST_LOG=debug` to watch taps, completions and bounces.

use std::time::Duration;

use trivert::prelude::*;

fn main() -> Result<(), Error> {
    let (taps, input) = input_channel();

    std::thread::spawn(move || {
        for _ in 0..2 * NODE_COUNT {
            if taps.send(Event::tap(0.0, 0.0)).is_err() {
                break;
            }
            // Long enough for one full transition
            std::thread::sleep(Duration::from_millis(2500));
        }
    });

    let summary = App::new()
        .on_transition_complete(|index, scale| println!("node {index} -> {scale}"))
        .run(input)?;

    println!(
        "{} frames, {} transitions, final scales {:?}",
        summary.frames, summary.transitions, summary.final_scales
    );
    Ok(())
}
