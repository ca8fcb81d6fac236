/*
 * Responsibility
 * - Router-level middleware (CORS, request id / tracing / limits, security headers)
 * - Authorization is not a layer here: handlers declare it via Authorized<P>
 */
pub mod cors;
pub mod http;
pub mod security_headers;
