use thiserror::Error;

use crate::common::{Compass, LocationId, Principal};

pub type Result<T> = std::result::Result<T, WorldError>;

/// Every way a world operation can be rejected.
///
/// All of these are caller mistakes: nothing is retried, and no state is
/// changed by an operation that returns one.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum WorldError {
    #[error("location [{0}] does not exist")]
    NotFound(LocationId),
    #[error("[{caller}] is neither the owner of location [{id}] nor privileged")]
    Forbidden { caller: Principal, id: LocationId },
    #[error("location [{0}] is frozen")]
    Frozen(LocationId),
    #[error("{field} is {len} bytes long, the limit is {max}")]
    TooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },
    #[error("there is no exit {direction} from location [{from}]")]
    NoExit { from: LocationId, direction: Compass },
    #[error("location [{0}] is not a respawn point")]
    NotRespawnPoint(LocationId),
}
