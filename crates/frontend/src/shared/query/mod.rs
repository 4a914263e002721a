pub mod cache;
pub mod client;
pub mod hooks;
pub mod key;
pub mod mutation;

pub use cache::{QueryCache, QuerySnapshot};
pub use client::{use_query_client, QueryClient};
pub use hooks::{use_query, QueryResult};
pub use key::{Invalidation, QueryKey, Resource};
pub use mutation::Mutation;
