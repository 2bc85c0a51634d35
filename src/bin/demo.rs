//! Scripted effect demo (no alternate screen).
//!
//! Drives a plain text buffer through the async driver and prints each stage:
//! typing, then a scroll chained on its completion, then a glitch that is
//! shown mid-corruption and after it restores, then the bordered box.

use std::time::Duration;

use anyhow::{bail, Result};

use cybermaint::core::{
    ascii_box, whole, Glitch, Scroll, SimpleRng, Surface, TextBuffer, TimedMutator, Typing,
};
use cybermaint::playground::{BOX_TEXT, SCROLL_LINES, TYPING_TEXT};
use cybermaint::runtime::{logging, Config, Driver};
use cybermaint::types::StopReason;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env();
    logging::init(&config)?;

    let mut driver = Driver::spawn(TextBuffer::new(), Duration::from_millis(5));

    let typing = Typing::new(TYPING_TEXT).with_interval_ms(config.typing_interval_ms);
    driver.start(TimedMutator::new(typing, whole)).await?;
    expect_completed(&mut driver, "typing").await?;
    print_stage(&driver, "typing").await?;

    let scroll = Scroll::new(SCROLL_LINES).with_interval_ms(config.scroll_interval_ms);
    driver.start(TimedMutator::new(scroll, whole)).await?;
    expect_completed(&mut driver, "scroll").await?;
    print_stage(&driver, "scroll").await?;

    let glitch =
        Glitch::new(SimpleRng::new(config.seed)).with_duration_ms(config.glitch_duration_ms);
    driver.start(TimedMutator::new(glitch, whole)).await?;
    tokio::time::sleep(Duration::from_millis(u64::from(config.glitch_duration_ms) / 2)).await;
    print_stage(&driver, "glitch (running)").await?;
    expect_completed(&mut driver, "glitch").await?;
    print_stage(&driver, "glitch (restored)").await?;

    let boxed = ascii_box(BOX_TEXT);
    driver
        .with_host(move |buf: &mut TextBuffer| buf.append_line(&boxed))
        .await?;

    let buf = driver.shutdown().await?;
    println!("== final ==\n{}", buf.content());
    Ok(())
}

async fn expect_completed(driver: &mut Driver<TextBuffer>, what: &str) -> Result<()> {
    match driver.next_finished().await {
        Some(f) if f.reason == StopReason::Completed => Ok(()),
        Some(f) => bail!("{what} stopped early: {}", f.reason.as_str()),
        None => bail!("driver stopped during {what}"),
    }
}

async fn print_stage(driver: &Driver<TextBuffer>, label: &str) -> Result<()> {
    let content = driver
        .inspect(|buf: &TextBuffer| buf.content().to_string())
        .await?;
    println!("== {label} ==\n{content}\n");
    Ok(())
}
