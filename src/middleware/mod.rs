/*
 * Responsibility
 * - middlware の公開インターフェース (re-export)
 * - auth (route gate), cors, http (request id / trace / limits), security_headers
 */
pub mod auth;
pub mod cors;
pub mod http;
pub mod security_headers;
