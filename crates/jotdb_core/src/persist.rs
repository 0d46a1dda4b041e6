//! Persistence flusher.
//!
//! After every mutation the *entire* collection tree is re-serialized
//! and written over the backing file, not just the slice that changed.
//! This is the mechanism, not an incidental inefficiency: flush timing
//! is part of the observable contract.

use crate::database::DatabaseInner;
use crate::error::CoreResult;
use tracing::trace;

/// Serializes the whole tree and overwrites the backing blob.
///
/// Memory-only databases have no backend; for them this is a no-op.
/// Every mutating operation calls this exactly once, after its
/// in-memory change has been applied, so an I/O failure here means
/// memory and file have diverged.
pub(crate) fn flush(db: &DatabaseInner) -> CoreResult<()> {
    let Some(backend) = &db.backend else {
        trace!("flush skipped: memory-only database");
        return Ok(());
    };

    // Encode under the read lock, write without it.
    let text = {
        let tree = db.tree.read();
        db.config.encode(&tree)?
    };

    backend.lock().write_all(&text)?;
    trace!(bytes = text.len(), "flushed store");
    Ok(())
}
