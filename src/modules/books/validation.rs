//! Checks applied to a payload before the store is touched.

use super::models::BookPayload;

/// Why a payload was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    MissingName,
    PageOverflow,
}

pub fn has_name(payload: &BookPayload) -> bool {
    payload.name.as_deref().is_some_and(|name| !name.is_empty())
}

pub fn pages_within_bounds(payload: &BookPayload) -> bool {
    payload.read_page <= payload.page_count
}

/// Run every rule in order; the first failure wins.
pub fn validate(payload: &BookPayload) -> Result<(), Rejection> {
    if !has_name(payload) {
        return Err(Rejection::MissingName);
    }
    if !pages_within_bounds(payload) {
        return Err(Rejection::PageOverflow);
    }
    Ok(())
}
