use thiserror::Error;

pub type Result<T, E = TournamentError> = std::result::Result<T, E>;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TournamentError {
    // Creation errors
    #[error("number of players is out of range")]
    InvalidPlayerCount,
    #[error("whitelist is smaller than the number of players")]
    WhitelistTooSmall,
    #[error("registration deadline is in the past")]
    RegistrationDeadlineInPast,
    #[error("either a start time or a start delay must be given")]
    MissingStartCondition,
    #[error("start time and start delay are mutually exclusive")]
    ConflictingStartCondition,
    #[error("start time is in the past")]
    StartTimeInPast,
    #[error("start time is too far in the future")]
    StartTimeTooFarInFuture,
    #[error("start delay is out of range")]
    InvalidStartDelay,

    // Registration errors
    #[error("tournament is not accepting registrations")]
    RegistrationClosed,
    #[error("registration deadline has passed")]
    RegistrationDeadlinePassed,
    #[error("tournament is full")]
    TournamentFull,
    #[error("player is not on the tournament whitelist")]
    NotWhitelisted,
    #[error("player is already registered")]
    AlreadyRegistered,
    #[error("player is not registered")]
    PlayerNotRegistered,
    #[error("canceling account is neither the player nor a payer")]
    NotPlayerOrPayer,
    #[error("no payer record covers this registration")]
    NoPayerRecord,

    // Match errors
    #[error("tournament is not in progress")]
    TournamentNotInProgress,
    #[error("match does not belong to this tournament")]
    MatchTournamentMismatch,
    #[error("match is not in progress")]
    MatchNotInProgress,
    #[error("player is not in this match")]
    PlayerNotInMatch,
    #[error("player already submitted a move for this game")]
    MoveAlreadySubmitted,
    #[error("match has no winner")]
    NoWinner,

    // Ledger errors
    #[error("insufficient funds")]
    InsufficientFunds,
    #[error("math overflow")]
    MathOverflow,

    // Lookup errors
    #[error("tournament not found")]
    TournamentNotFound,
    #[error("tournament details not found")]
    DetailsNotFound,
    #[error("match not found")]
    MatchNotFound,

    // Dispatch errors
    #[error("operation is not consumed by this engine")]
    UnsupportedOperation,
}

/// Guard macro: bail out with the given error when the condition fails.
#[macro_export]
macro_rules! require {
    ($cond:expr, $err:expr $(,)?) => {
        if !($cond) {
            return Err($err.into());
        }
    };
}
