// victory-admin-api: Async gRPC client for the Victory broker admin service

pub mod client;
pub mod error;
pub mod proto;
pub mod transport;

pub use client::{AdminClient, GrpcConnector};
pub use error::Error;
pub use transport::{AdminTransport, Connector, MessageStream, TransportConfig};
