pub mod client;

pub use client::{HttpRemoteClient, RemoteClient};
