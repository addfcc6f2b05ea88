//! Tests for the Redis caching layer

mod redis_client_tests;
