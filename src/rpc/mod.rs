pub mod client;
pub mod id_generator;
pub mod raw_reply;

pub use client::RpcClient;
pub use id_generator::IdGenerator;
pub use raw_reply::RawReply;
