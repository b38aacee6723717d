//! Redis-backed state store and token cache against a real server

pub mod redis_cache_test;
