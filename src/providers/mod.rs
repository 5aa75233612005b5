pub mod eos_rpc;

pub use eos_rpc::{DEFAULT_ENDPOINT, EosRpcProvider};
