//! User-facing status messages carried in the response envelope's `message`
//! field. The service speaks Indonesian to its clients.

pub const CREATED: &str = "Product berhasil dibuat";
pub const FOUND: &str = "Product berhasil ditemukan";
pub const UPDATED: &str = "Product berhasil diupdate";
pub const DELETED: &str = "Product berhasil dihapus";

pub const BAD_REQUEST: &str = "Bad Request";
pub const GENERIC_NOT_FOUND: &str = "Not Found";
pub const INTERNAL_ERROR: &str = "Internal Server Error";
pub const METHOD_NOT_ALLOWED: &str = "Method Not Allowed";
pub const REQUEST_TIMEOUT: &str = "Request Timeout";

/// Plain-text greeting served at `/`.
pub const WELCOME: &str = "Welcome to my API";

/// Message for a lookup that matched no row, e.g. `Product tidak ditemukan`.
pub fn not_found(entity: &str) -> String {
    format!("{entity} tidak ditemukan")
}

/// Message for a listing over an empty table, e.g. `Product Kosong`.
pub fn empty(entity: &str) -> String {
    format!("{entity} Kosong")
}
