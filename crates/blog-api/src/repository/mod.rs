//! 데이터 저장소.
//!
//! 자격증명 저장소 인터페이스와 PostgreSQL 구현을 제공합니다.

pub mod users;

#[cfg(any(test, feature = "test-utils"))]
pub mod memory;

pub use users::{PgUserStore, UserStore, UserStoreError};

#[cfg(any(test, feature = "test-utils"))]
pub use memory::InMemoryUserStore;
