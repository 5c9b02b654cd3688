//! Records exchanged with a Monero daemon over JSON.
//!
//! Only the members the synchronizer needs are declared; everything else a
//! daemon sends is skipped while decoding.

pub mod publication;

use alloc::vec::Vec;
use core::fmt;

use crate::{
    Error, ReadJson, Reader, WriteJson, Writer, read_field, read_object,
    rpc::{Empty, Method},
    wire_enum, write_field, write_object,
};

/// A 32-byte block or transaction id, hex encoded on the wire.
///
/// Ordered by byte content.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Hash(pub [u8; 32]);

impl Hash {
    /// The raw bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|byte| write!(f, "{byte:02x}"))
    }
}

impl From<[u8; 32]> for Hash {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl ReadJson for Hash {
    fn read_json(&mut self, source: &mut Reader) -> Result<(), Error> {
        source.binary(&mut self.0)
    }
}

impl WriteJson for Hash {
    fn write_json(&self, dest: &mut Writer) -> Result<(), Error> {
        dest.binary(&self.0)
    }
}

/// Transaction as announced in the pool: only its id.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MinimalTx {
    /// Transaction hash.
    pub id: Hash,
}

impl ReadJson for MinimalTx {
    fn read_json(&mut self, source: &mut Reader) -> Result<(), Error> {
        read_object(source, [read_field!(self.id)])
    }
}

impl WriteJson for MinimalTx {
    fn write_json(&self, dest: &mut Writer) -> Result<(), Error> {
        write_object(dest, [write_field!(self.id)])
    }
}

/// A block as published in the full chain feed.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Block {
    /// Hashes of the non-coinbase transactions, in block order.
    pub tx_hashes: Vec<Hash>,
    /// Id of the parent block.
    pub prev_id: Hash,
}

impl ReadJson for Block {
    fn read_json(&mut self, source: &mut Reader) -> Result<(), Error> {
        read_object(source, [read_field!(self.tx_hashes), read_field!(self.prev_id)])
    }
}

impl WriteJson for Block {
    fn write_json(&self, dest: &mut Writer) -> Result<(), Error> {
        write_object(dest, [write_field!(self.tx_hashes), write_field!(self.prev_id)])
    }
}

/// New chain tip announcement: consecutive block ids starting at
/// `first_height`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MinimalChain {
    /// Height of the first block in `ids`.
    pub first_height: u64,
    /// Block ids, lowest height first.
    pub ids: Vec<Hash>,
    /// Parent of the first block in `ids`.
    pub first_prev_id: Hash,
}

impl ReadJson for MinimalChain {
    fn read_json(&mut self, source: &mut Reader) -> Result<(), Error> {
        read_object(
            source,
            [
                read_field!(self.first_height),
                read_field!(self.ids),
                read_field!(self.first_prev_id),
            ],
        )
    }
}

impl WriteJson for MinimalChain {
    fn write_json(&self, dest: &mut Writer) -> Result<(), Error> {
        write_object(
            dest,
            [
                write_field!(self.first_height),
                write_field!(self.ids),
                write_field!(self.first_prev_id),
            ],
        )
    }
}

/// Contents of a full chain publication.
pub type FullChain = Vec<Block>;
/// Contents of a pool publication.
pub type MinimalTxpool = Vec<MinimalTx>;

wire_enum! {
    /// Which Monero network a daemon serves.
    #[derive(Default)]
    pub enum Network {
        /// The production network.
        #[default]
        Mainnet = "mainnet",
        /// Public test network.
        Testnet = "testnet",
        /// Staging network, mirroring mainnet rules.
        Stagenet = "stagenet",
    }
}

/// `get_info` RPC method.
#[derive(Debug, Clone, Copy)]
pub struct GetInfo;

impl Method for GetInfo {
    const NAME: &'static str = "get_info";
    type Request = Empty;
    type Response = GetInfoResponse;
}

/// Daemon status as reported by `get_info`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DaemonInfo {
    /// Current chain height.
    pub height: u64,
    /// Height the daemon is syncing towards, `0` once synced.
    pub target_height: u64,
    /// Peers this daemon connected to.
    pub outgoing_connections_count: u64,
    /// Peers that connected to this daemon.
    pub incoming_connections_count: u64,
    /// Id of the chain tip.
    pub top_block_hash: Hash,
    /// Set when running on mainnet.
    pub mainnet: bool,
    /// Set when running on testnet.
    pub testnet: bool,
    /// Set when running on stagenet.
    pub stagenet: bool,
}

impl DaemonInfo {
    /// The network flagged by the daemon, if exactly one is.
    #[must_use]
    pub fn network(&self) -> Option<Network> {
        match (self.mainnet, self.testnet, self.stagenet) {
            (true, false, false) => Some(Network::Mainnet),
            (false, true, false) => Some(Network::Testnet),
            (false, false, true) => Some(Network::Stagenet),
            _ => None,
        }
    }
}

impl ReadJson for DaemonInfo {
    fn read_json(&mut self, source: &mut Reader) -> Result<(), Error> {
        read_object(
            source,
            [
                read_field!(self.height),
                read_field!(self.target_height),
                read_field!(self.outgoing_connections_count),
                read_field!(self.incoming_connections_count),
                read_field!(self.top_block_hash),
                read_field!(self.mainnet),
                read_field!(self.testnet),
                read_field!(self.stagenet),
            ],
        )
    }
}

/// Result of [`GetInfo`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GetInfoResponse {
    /// The daemon's status.
    pub info: DaemonInfo,
}

impl ReadJson for GetInfoResponse {
    fn read_json(&mut self, source: &mut Reader) -> Result<(), Error> {
        read_object(source, [read_field!(self.info)])
    }
}

/// `get_transaction_pool` RPC method.
#[derive(Debug, Clone, Copy)]
pub struct GetTransactionPool;

impl Method for GetTransactionPool {
    const NAME: &'static str = "get_transaction_pool";
    type Request = Empty;
    type Response = TransactionPool;
}

/// One transaction waiting in the pool.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PoolEntry {
    /// Transaction hash.
    pub tx_hash: Hash,
}

impl ReadJson for PoolEntry {
    fn read_json(&mut self, source: &mut Reader) -> Result<(), Error> {
        read_object(source, [read_field!(self.tx_hash)])
    }
}

/// Result of [`GetTransactionPool`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TransactionPool {
    /// Pool contents, in the order the daemon lists them.
    pub transactions: Vec<PoolEntry>,
}

impl ReadJson for TransactionPool {
    fn read_json(&mut self, source: &mut Reader) -> Result<(), Error> {
        read_object(source, [read_field!(self.transactions)])
    }
}
