//! Writes predictions for a scoring request.

use crate::model::ItemMeanBaseline;
use data_loader::ScoreRequest;
use std::io::{self, Write};
use tracing::debug;

/// Score every pair in `request` and write one `user,item,prediction` line
/// per pair to `sink`, predictions fixed to three decimals.
///
/// Lines come out in the request's order: by user, then by item. Returns
/// the number of lines written. The sink is flushed before returning.
pub fn score_items<W: Write>(
    model: &ItemMeanBaseline,
    request: &ScoreRequest,
    mut sink: W,
) -> io::Result<usize> {
    let mut written = 0;
    for (user, item) in request.iter() {
        writeln!(sink, "{},{},{:.3}", user, item, model.predict(item))?;
        written += 1;
    }
    sink.flush()?;

    debug!(lines = written, users = request.user_count(), "scored request");
    Ok(written)
}
