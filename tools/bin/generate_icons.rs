use clap::Parser;
use pwa_devtools::{
    config::IconArgs,
    icons::{self, FontChain},
    logger,
};

fn main() -> anyhow::Result<()> {
    let args = IconArgs::parse();
    logger::init_cli_logger(args.verbose);

    let sizes = args.sizes();
    let fonts = FontChain::default();
    tracing::debug!(sources = ?fonts.sources(), "font chain");

    println!("Generating PWA icons for MTG Collection Tracker...");

    let written = icons::generate(&sizes, &args.out_dir, args.format, &fonts)?;

    println!("\n✅ Successfully generated {} PWA icons!", written.len());
    println!("Icons saved in the '{}/' directory", args.out_dir.display());

    println!("\nVerifying icons:");
    let report = icons::verify(&written);
    for check in &report {
        match check.bytes {
            Some(bytes) => println!("✓ {} ({bytes} bytes)", check.path.display()),
            None => println!("✗ {} - MISSING!", check.path.display()),
        }
    }

    let missing = report.iter().filter(|c| !c.is_present()).count();
    if missing > 0 {
        tracing::warn!(missing, "some icons were not found after writing");
    }

    Ok(())
}
