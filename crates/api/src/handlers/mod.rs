//! Request handlers, one submodule per entity.
//!
//! Each submodule provides async handler functions (list, get, create,
//! update, delete). Handlers validate the body through `libris_core`,
//! delegate to the matching repository in `libris_db`, and translate the
//! repository's [`WriteOutcome`] into a response or an [`AppError`].

pub mod books;
pub mod users;

use libris_core::error::CoreError;
use libris_core::payload::NO_VALID_FIELDS;
use libris_core::types::DbId;
use libris_db::WriteOutcome;

use crate::error::{AppError, AppResult};

/// Unwrap an update outcome, mapping every non-applied variant onto the
/// client-facing error for `entity`/`id`.
pub(crate) fn update_applied(
    outcome: WriteOutcome<()>,
    entity: &'static str,
    id: DbId,
) -> AppResult<()> {
    match outcome {
        WriteOutcome::Applied(()) => Ok(()),
        WriteOutcome::NotFound => Err(CoreError::NotFound { entity, id }.into()),
        WriteOutcome::Conflict(message) => Err(CoreError::Conflict(message.to_string()).into()),
        WriteOutcome::NothingToUpdate => {
            Err(CoreError::Validation(NO_VALID_FIELDS.to_string()).into())
        }
    }
}

/// Unwrap an insert outcome. Inserts can only apply or conflict.
pub(crate) fn insert_applied(outcome: WriteOutcome<DbId>, entity: &'static str) -> AppResult<DbId> {
    match outcome {
        WriteOutcome::Applied(id) => Ok(id),
        WriteOutcome::Conflict(message) => Err(CoreError::Conflict(message.to_string()).into()),
        WriteOutcome::NotFound | WriteOutcome::NothingToUpdate => Err(AppError::InternalError(
            format!("{entity} insert reported no inserted row"),
        )),
    }
}
