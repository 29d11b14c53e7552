use hic_core::HicError;

pub mod combine;
pub mod extract;
pub mod format;
pub mod inspect;

/// Exit status for invocation errors, including argument parsing.
pub const USAGE_EXIT: u8 = 1;
/// Exit status when extraction collected no events.
pub const NO_EVENTS_EXIT: u8 = 2;

pub fn exit_code(err: &HicError) -> u8 {
    match err {
        HicError::NoEvents(_) => NO_EVENTS_EXIT,
        _ => USAGE_EXIT,
    }
}
