//! Block I/O request lifecycle
//!
//! Insertions and completions only share their `(dev, sector)` pair, so
//! these events feed the entity registry instead of writing attributes.

use super::Action;
use tracestate_core::{Event, FieldError};

const DEV: &str = "dev";
const SECTOR: &str = "sector";
const NR_SECTOR: &str = "nr_sector";
const TID: &str = "tid";

pub(super) fn insert(event: &Event) -> Result<Action, FieldError> {
    Ok(Action::BlockInsert {
        dev: event.int(DEV)?,
        sector: event.int(SECTOR)?,
        nr_sector: event.int(NR_SECTOR)?,
        tid: event.int(TID)?,
    })
}

pub(super) fn complete(event: &Event) -> Result<Action, FieldError> {
    Ok(Action::BlockComplete {
        dev: event.int(DEV)?,
        sector: event.int(SECTOR)?,
    })
}
