use crate::error::Error;
use std::time::Duration;

/// Encrypted left operand sent to the server.
#[derive(Clone, Debug)]
pub struct Query<C> {
    pub n1: usize,
    pub n2: usize,
    pub n3: usize,
    /// `row_blocks x col_blocks` ciphertexts, row-major.
    pub blocks: Vec<Vec<C>>,
}

/// Result stream of the server.
#[derive(Clone, Debug)]
pub struct Response<C> {
    /// Count announced by the server before streaming.
    pub count: usize,
    /// Result ciphertexts in emission order.
    pub ciphertexts: Vec<C>,
    /// Time the server spent evaluating.
    pub eval_time: Duration,
}

/// Blocking, ordered message exchange with the server.
pub trait Channel<C> {
    fn send_query(&mut self, query: &Query<C>) -> Result<(), Error>;
    fn recv_response(&mut self) -> Result<Response<C>, Error>;
}
