mod network;

#[allow(unused_imports)]
pub use network::{NETWORK_GRAPH, NETWORK_MAP};
