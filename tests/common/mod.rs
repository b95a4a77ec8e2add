//! Common test helpers shared across the test suite.

use async_trait::async_trait;
use sierra_record_id::{CampusResolver, InMemoryCampusResolver, ResolveError};

/// Campuses known to [`test_resolver`].
pub const CAMPUSES: [(&str, u16); 3] = [("abc", 42), ("north", 7), ("z9", 65_535)];

/// Creates a resolver with the [`CAMPUSES`] table.
#[allow(dead_code)]
pub fn test_resolver() -> InMemoryCampusResolver {
    CAMPUSES
        .iter()
        .fold(InMemoryCampusResolver::new(), |resolver, (code, id)| {
            resolver.with_campus(*code, *id)
        })
}

/// Packs a database id by hand, independently of the library.
#[allow(dead_code)]
pub fn packed_database_id(campus_id: u16, record_type_code: char, rec_num: u32) -> u64 {
    (u64::from(campus_id) << 48) | (u64::from(u32::from(record_type_code)) << 32) | u64::from(rec_num)
}

/// Resolver whose every lookup fails, as an unreachable campus service would.
#[allow(dead_code)]
#[derive(Debug, Default)]
pub struct FailingResolver;

#[async_trait]
impl CampusResolver for FailingResolver {
    async fn resolve_campus_id_from_code(&self, campus_code: &str) -> Result<u16, ResolveError> {
        Err(anyhow::anyhow!("campus service unavailable while resolving {campus_code}").into())
    }

    async fn resolve_campus_code_from_id(&self, campus_id: u16) -> Result<String, ResolveError> {
        Err(anyhow::anyhow!("campus service unavailable while resolving {campus_id}").into())
    }
}
