/*
 * Responsibility
 * - middleware の公開インターフェース
 * - auth: protect / optional / authorize の 3 guard
 * - http: request id, trace, body limit, timeout
 */
pub mod auth;
pub mod http;
