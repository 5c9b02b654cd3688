//! JSON-RPC 2.0 request and response envelopes.
//!
//! A [`Method`] names a remote procedure and its parameter and result types.
//! The envelopes add the protocol members around them:
//!
//! ```rust
//! use jsonwire::rpc::{Empty, JsonRequest, Method};
//!
//! struct Ping;
//!
//! impl Method for Ping {
//!     const NAME: &'static str = "ping";
//!     type Request = Empty;
//!     type Response = Empty;
//! }
//!
//! let json = jsonwire::to_bytes(&JsonRequest::<Ping>::new(Empty).with_id(9))?;
//! assert_eq!(&json[..], br#"{"id":9,"jsonrpc":"2.0","method":"ping","params":{}}"#);
//! # Ok::<(), jsonwire::Error>(())
//! ```

use core::fmt;

use crate::{
    Error, ReadJson, Reader, WriteJson, Writer, read_field, read_object, write_field,
    write_object,
};

/// Protocol version written in every request.
pub const JSONRPC_VERSION: &str = "2.0";

/// A remote procedure.
pub trait Method {
    /// Name sent in the `method` member.
    const NAME: &'static str;
    /// Type of `params`.
    type Request: WriteJson;
    /// Type of `result`.
    type Response: ReadJson + Default;
}

/// An outgoing call to `M`.
pub struct JsonRequest<M: Method> {
    /// Correlates the response.
    pub id: u32,
    /// Arguments of the call.
    pub params: M::Request,
}

impl<M: Method> JsonRequest<M> {
    /// Creates a request with id `0`.
    pub fn new(params: M::Request) -> Self {
        Self { id: 0, params }
    }

    /// Replaces the request id.
    #[must_use]
    pub fn with_id(mut self, id: u32) -> Self {
        self.id = id;
        self
    }
}

impl<M: Method> WriteJson for JsonRequest<M> {
    fn write_json(&self, dest: &mut Writer) -> Result<(), Error> {
        write_object(
            dest,
            [
                write_field!(self.id),
                write_field!("jsonrpc", JSONRPC_VERSION),
                write_field!("method", M::NAME),
                write_field!(self.params),
            ],
        )
    }
}

impl<M: Method> fmt::Debug for JsonRequest<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonRequest")
            .field("id", &self.id)
            .field("method", &M::NAME)
            .finish_non_exhaustive()
    }
}

/// The successful reply to a call of `M`.
///
/// A reply carrying an `error` member instead of `result` fails to decode
/// with [`Schema::MissingKey`](crate::Schema::MissingKey).
pub struct JsonResponse<M: Method> {
    /// Id of the request being answered.
    pub id: u32,
    /// Return value of the call.
    pub result: M::Response,
}

impl<M: Method> Default for JsonResponse<M> {
    fn default() -> Self {
        Self {
            id: 0,
            result: M::Response::default(),
        }
    }
}

impl<M: Method> ReadJson for JsonResponse<M> {
    fn read_json(&mut self, source: &mut Reader) -> Result<(), Error> {
        read_object(source, [read_field!(self.id), read_field!(self.result)])
    }
}

impl<M: Method> fmt::Debug for JsonResponse<M>
where
    M::Response: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonResponse")
            .field("id", &self.id)
            .field("result", &self.result)
            .finish()
    }
}

/// An object without members, for methods that take no parameters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Empty;

impl ReadJson for Empty {
    fn read_json(&mut self, source: &mut Reader) -> Result<(), Error> {
        read_object(source, [])
    }
}

impl WriteJson for Empty {
    fn write_json(&self, dest: &mut Writer) -> Result<(), Error> {
        write_object(dest, [])
    }
}
