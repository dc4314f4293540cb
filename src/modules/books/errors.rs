use bookshelf_http::AppError;
use thiserror::Error;

use super::validation::Rejection;

/// Handler that produced an error; selects the client-facing wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Get,
    Update,
    Delete,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BookError {
    #[error("{}", missing_name_message(.0))]
    MissingName(Operation),

    #[error("{}", page_overflow_message(.0))]
    PageOverflow(Operation),

    #[error("{}", not_found_message(.0))]
    NotFound(Operation),

    #[error("Buku gagal ditambahkan")]
    InsertionFailed,
}

fn missing_name_message(op: &Operation) -> &'static str {
    match op {
        Operation::Update => "Gagal memperbarui buku. Mohon isi nama buku",
        _ => "Gagal menambahkan buku. Mohon isi nama buku",
    }
}

fn page_overflow_message(op: &Operation) -> &'static str {
    match op {
        Operation::Update => {
            "Gagal memperbarui buku. readPage tidak boleh lebih besar dari pageCount"
        }
        _ => "Gagal menambahkan buku. readPage tidak boleh lebih besar dari pageCount",
    }
}

fn not_found_message(op: &Operation) -> &'static str {
    match op {
        Operation::Update => "Gagal memperbarui buku. Id tidak ditemukan",
        Operation::Delete => "Buku gagal dihapus. Id tidak ditemukan",
        _ => "Buku tidak ditemukan",
    }
}

impl BookError {
    pub fn rejected(op: Operation, rejection: Rejection) -> Self {
        match rejection {
            Rejection::MissingName => BookError::MissingName(op),
            Rejection::PageOverflow => BookError::PageOverflow(op),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            BookError::MissingName(_) => "missing_name",
            BookError::PageOverflow(_) => "page_overflow",
            BookError::NotFound(_) => "not_found",
            BookError::InsertionFailed => "insertion_failed",
        }
    }
}

impl From<BookError> for AppError {
    fn from(err: BookError) -> Self {
        let message = err.to_string();
        match err {
            BookError::MissingName(_) | BookError::PageOverflow(_) => {
                AppError::bad_request(err.code(), message)
            }
            BookError::NotFound(_) => AppError::not_found(message),
            BookError::InsertionFailed => AppError::internal(err.code(), message),
        }
    }
}
