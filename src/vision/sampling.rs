use log::debug;

// @module: Deterministic page sampling for character discovery

/// Build the discovery sampling plan for a document
///
/// The plan covers the first `lead_pages` (front matter), one page every
/// `stride` through the body, and the last `tail_pages` (curtain recap).
/// Indices are sorted and deduplicated, so the number of sampled pages is
/// bounded independently of document length.
pub fn sample_pages(
    total_pages: usize,
    lead_pages: usize,
    stride: usize,
    tail_pages: usize,
) -> Vec<usize> {
    if total_pages == 0 {
        return Vec::new();
    }

    let stride = stride.max(1);
    let mut pages: Vec<usize> = Vec::new();

    // Front matter
    pages.extend(0..lead_pages.min(total_pages));

    // Body, one page every stride
    let mut page = lead_pages;
    while page < total_pages {
        pages.push(page);
        page += stride;
    }

    // Curtain recap
    pages.extend(total_pages.saturating_sub(tail_pages)..total_pages);

    pages.sort_unstable();
    pages.dedup();

    debug!(
        "Sampling plan: {} of {} pages ({:?})",
        pages.len(),
        total_pages,
        pages
    );

    pages
}
