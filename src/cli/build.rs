//! Batch card generation.
//!
//! Build phases:
//! 1. Optional clean of the card directory
//! 2. Manifest load + template load (both fatal on error)
//! 3. Parallel per-page generation (per-card failures are contained)
//! 4. Summary log

use anyhow::{Context, Result};
use rayon::prelude::*;
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::{
    card::{CardGenerator, Outcome, card_filename},
    config::OgConfig,
    log,
    logger::ProgressLine,
    manifest::Manifest,
    utils::plural::plural_count,
};

/// Generate cards for every page in the manifest.
///
/// Per-card failures are logged and counted but never abort the batch; the
/// affected pages simply end up without a preview image.
pub fn build_cards(config: &OgConfig) -> Result<()> {
    let cards_dir = config.cards_dir();

    if config.build.clean && cards_dir.exists() {
        fs::remove_dir_all(&cards_dir).with_context(|| {
            format!("Failed to clear card directory: {}", cards_dir.display())
        })?;
    }

    let manifest = Manifest::load(&config.build.manifest)?;
    if manifest.pages.is_empty() {
        log!("build"; "manifest has no pages, nothing to generate");
        return Ok(());
    }

    // Template problems abort before any page work starts
    let generator = CardGenerator::new(config)?;

    let progress = ProgressLine::new(&[("cards", manifest.pages.len())]);
    let written = AtomicUsize::new(0);
    let skipped = AtomicUsize::new(0);
    let failed = AtomicUsize::new(0);

    manifest.pages.par_iter().for_each(|page| {
        let output = cards_dir.join(card_filename(&page.route, &config.card.format));
        let counter = match generator.generate(&page.title, &output) {
            Outcome::Written => &written,
            Outcome::Skipped => &skipped,
            Outcome::Failed => &failed,
        };
        counter.fetch_add(1, Ordering::Relaxed);
        progress.inc("cards");
    });

    progress.finish();

    let (written, skipped, failed) = (
        written.into_inner(),
        skipped.into_inner(),
        failed.into_inner(),
    );
    if failed > 0 {
        log!("build"; "{} written, {} skipped, {} failed",
            plural_count(written, "card"), skipped, failed);
    } else {
        log!("build"; "{} written, {} skipped", plural_count(written, "card"), skipped);
    }

    Ok(())
}
