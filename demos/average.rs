use anyhow::Result;
use stdinout::{stdin, stdout};

/// Reads numbers from standard input and prints their count and average.
///
/// ```text
/// echo "1 2 3.5" | cargo run --example average
/// ```
fn main() -> Result<()> {
    env_logger::init();

    let mut count = 0;
    let mut sum = 0.0;
    while !stdin::is_empty()? {
        if stdin::has_next_double()? {
            sum += stdin::read_double()?;
            count += 1;
        } else {
            let skipped = stdin::read_string()?;
            log::warn!("skipping {:?}", skipped);
        }
    }

    stdout::println(format_args!("count:   {}", count))?;
    if count > 0 {
        stdout::printf(format_args!("average: {:.3}\n", sum / count as f64))?;
    }
    Ok(())
}
