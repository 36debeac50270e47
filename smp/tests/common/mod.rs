use math::poly::Poly;
use math::ring::RingContext;
use smp::Error;
use smp::backend::{Backend, CiphertextAddInplace, CiphertextMulConstInplace, TransparentBackend};
use smp::matrix::Matrix;
use smp::transport::{Channel, Query, Response};
use std::time::Instant;

/// Server holding the right operand in clear. It multiplies each received
/// block by the packed column chunks of its operand and sums over column
/// blocks, emitting results row block by row block.
pub struct ReferenceServer {
    backend: TransparentBackend,
    b: Matrix,
}

impl ReferenceServer {
    pub fn new(backend: TransparentBackend, b: Matrix) -> Self {
        Self { backend, b }
    }

    /// Rows `col_block * d ..` of column `col`, reversed so that coefficient
    /// `d - 1` of the slot product is the inner product.
    fn column_chunk(&self, col: usize, col_block: usize) -> Poly<u64> {
        let d: usize = self.backend.context().d();
        Poly(
            (0..d)
                .map(|j| self.b.at(col_block * d + d - 1 - j, col))
                .collect(),
        )
    }

    fn accumulate(&self, acc: &mut Option<Poly<u64>>, ct: &Poly<u64>, pt: &Poly<u64>) {
        let mut prod: Poly<u64> = ct.clone();
        self.backend.ciphertext_mul_const_inplace(&mut prod, pt);
        match acc {
            Some(acc) => self.backend.ciphertext_add_inplace(acc, &prod),
            None => *acc = Some(prod),
        }
    }

    pub fn evaluate(&self, query: &Query<Poly<u64>>) -> Result<Response<Poly<u64>>, Error> {
        let ctx: &RingContext = self.backend.context();
        let l: usize = ctx.l();

        if (query.n2, query.n3) != (self.b.rows(), self.b.cols()) {
            return Err(Error::DimensionMismatch {
                expected: (self.b.rows(), self.b.cols()),
                got: (query.n2, query.n3),
            });
        }

        let start: Instant = Instant::now();
        let mut ciphertexts: Vec<Poly<u64>> = Vec::new();

        if query.n1 == 1 {
            for row_block in 0..query.n3.div_ceil(l) {
                let mut acc: Option<Poly<u64>> = None;
                for (col_block, ct) in query.blocks[0].iter().enumerate() {
                    let slots: Vec<Poly<u64>> = (0..l)
                        .map(|s| self.column_chunk(row_block * l + s, col_block))
                        .collect();
                    self.accumulate(&mut acc, ct, &ctx.encode(&slots)?);
                }
                ciphertexts.push(acc.unwrap_or_else(|| ctx.new_poly()));
            }
        } else {
            for row in query.blocks.iter() {
                for col in 0..query.n3 {
                    let mut acc: Option<Poly<u64>> = None;
                    for (col_block, ct) in row.iter().enumerate() {
                        let pt: Poly<u64> = ctx.encode_broadcast(&self.column_chunk(col, col_block))?;
                        self.accumulate(&mut acc, ct, &pt);
                    }
                    ciphertexts.push(acc.unwrap_or_else(|| ctx.new_poly()));
                }
            }
        }

        Ok(Response {
            count: ciphertexts.len(),
            ciphertexts,
            eval_time: start.elapsed(),
        })
    }
}

/// Channel that evaluates the query in process.
pub struct InMemoryChannel {
    server: ReferenceServer,
    pending: Option<Response<Poly<u64>>>,
    /// Drops the last result ciphertext while keeping the announced count.
    pub truncate: bool,
}

impl InMemoryChannel {
    pub fn new(server: ReferenceServer) -> Self {
        Self {
            server,
            pending: None,
            truncate: false,
        }
    }
}

impl Channel<Poly<u64>> for InMemoryChannel {
    fn send_query(&mut self, query: &Query<Poly<u64>>) -> Result<(), Error> {
        let mut response: Response<Poly<u64>> = self.server.evaluate(query)?;
        if self.truncate {
            response.ciphertexts.pop();
        }
        self.pending = Some(response);
        Ok(())
    }

    fn recv_response(&mut self) -> Result<Response<Poly<u64>>, Error> {
        self.pending
            .take()
            .ok_or_else(|| Error::Transport("no response pending".to_string()))
    }
}
