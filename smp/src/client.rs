use crate::backend::{Backend, Decrypt, Encrypt};
use crate::error::Error;
use crate::gmm::{GmmTable, build_gmm_tables, extract_inner_products};
use crate::matrix::Matrix;
use crate::partition::{BlockGrid, BlockId, fill_result, partition, result_position};
use crate::report::ClientReport;
use crate::transport::{Channel, Query, Response};
use log::{debug, warn};
use math::poly::Poly;
use math::ring::RingContext;
use sampling::source::Source;
use std::time::{Duration, Instant};

/// Client side of the matrix product protocol: encrypts the left operand
/// block by block, and turns the server's result ciphertexts into the
/// product matrix.
pub struct Client<B: Backend> {
    backend: B,
    tables: Vec<GmmTable>,
}

impl<B> Client<B>
where
    B: Backend + Encrypt + Decrypt,
{
    /// Builds the extraction tables of the backend's ring once.
    pub fn new(backend: B) -> Result<Self, Error> {
        let tables: Vec<GmmTable> = build_gmm_tables(backend.context())?;
        Ok(Self { backend, tables })
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn context(&self) -> &RingContext {
        self.backend.context()
    }

    /// Number of result ciphertexts for an `n1 x n2` by `n2 x n3` product:
    /// one per (row block, output column) for a matrix, one per `l` output
    /// columns for a vector.
    pub fn expected_results(&self, n1: usize, n3: usize) -> usize {
        let l: usize = self.context().l();
        if n1 == 1 {
            n3.div_ceil(l)
        } else {
            n1.div_ceil(l) * n3
        }
    }

    /// Partitions, packs and encrypts every block of `a`, row-major.
    pub fn encrypt_matrix(
        &self,
        sk: &B::SecretKey,
        a: &Matrix,
        source: &mut Source,
        report: &mut ClientReport,
    ) -> Result<Vec<Vec<B::Ciphertext>>, Error> {
        let ctx: &RingContext = self.context();
        let grid: BlockGrid = BlockGrid::for_operand(a, ctx, false);

        let mut pack_time: Duration = Duration::ZERO;
        let mut enc_time: Duration = Duration::ZERO;

        let mut blocks: Vec<Vec<B::Ciphertext>> = Vec::with_capacity(grid.row_blocks);
        for row_block in 0..grid.row_blocks {
            let mut row: Vec<B::Ciphertext> = Vec::with_capacity(grid.col_blocks);
            for col_block in 0..grid.col_blocks {
                let block: BlockId = BlockId { row_block, col_block };

                let now: Instant = Instant::now();
                let pt: Poly<u64> = ctx.encode(&partition(a, block, ctx, false))?;
                pack_time += now.elapsed();

                let now: Instant = Instant::now();
                row.push(self.backend.encrypt_sk(sk, &pt, source));
                enc_time += now.elapsed();
            }
            blocks.push(row);
        }

        debug!(
            "encrypted {}x{} operand into {}x{} blocks",
            a.rows(),
            a.cols(),
            grid.row_blocks,
            grid.col_blocks
        );

        report.pack_time += pack_time;
        report.enc_time += enc_time;
        report.ctx_sent += grid.len();
        Ok(blocks)
    }

    /// Decrypts the result ciphertexts in emission order and writes the
    /// extracted scalars into `out`. Fails unless `cts` holds exactly the
    /// number of results expected for the shape of `out`.
    pub fn decrypt_results(
        &self,
        sk: &B::SecretKey,
        cts: &[B::Ciphertext],
        out: &mut Matrix,
        report: &mut ClientReport,
    ) -> Result<(), Error> {
        let ctx: &RingContext = self.context();

        let expected: usize = self.expected_results(out.rows(), out.cols());
        if cts.len() != expected {
            return Err(Error::CiphertextCountMismatch {
                expected,
                got: cts.len(),
            });
        }

        let mut dec_time: Duration = Duration::ZERO;
        let mut unpack_time: Duration = Duration::ZERO;

        for (idx, ct) in cts.iter().enumerate() {
            let now: Instant = Instant::now();
            if !self.backend.is_correct(ct) {
                warn!("result ciphertext {} failed the correctness check", idx);
                report.decryption_ok = false;
            }
            let pt: Poly<u64> = self.backend.decrypt(sk, ct);
            dec_time += now.elapsed();

            let now: Instant = Instant::now();
            let scalars: Vec<u64> = extract_inner_products(&pt, &self.tables, ctx)?;
            let (row_block, col) = if out.is_vector() {
                (idx, 0)
            } else {
                result_position(idx, out.cols())
            };
            fill_result(out, row_block, col, &scalars, ctx.l())?;
            unpack_time += now.elapsed();
        }

        report.dec_time += dec_time;
        report.unpack_time += unpack_time;
        report.ctx_recv += cts.len();
        Ok(())
    }

    /// Runs the protocol for `a * B`, with `B` an `a.cols() x n3` matrix
    /// held by the server behind `channel`.
    pub fn run<C>(
        &self,
        sk: &B::SecretKey,
        a: &Matrix,
        n3: usize,
        channel: &mut C,
        source: &mut Source,
    ) -> Result<(Matrix, ClientReport), Error>
    where
        C: Channel<B::Ciphertext>,
    {
        let start: Instant = Instant::now();
        let mut report: ClientReport = ClientReport {
            decryption_ok: true,
            ..Default::default()
        };

        let (n1, n2) = (a.rows(), a.cols());
        let blocks: Vec<Vec<B::Ciphertext>> = self.encrypt_matrix(sk, a, source, &mut report)?;

        channel.send_query(&Query { n1, n2, n3, blocks })?;
        let response: Response<B::Ciphertext> = channel.recv_response()?;

        let expected: usize = self.expected_results(n1, n3);
        if response.count != expected {
            return Err(Error::CiphertextCountMismatch {
                expected,
                got: response.count,
            });
        }
        report.server_eval_time = response.eval_time;

        debug!(
            "received {} result ciphertexts for a {}x{} output",
            response.count, n1, n3
        );

        let mut out: Matrix = Matrix::zero(n1, n3);
        self.decrypt_results(sk, &response.ciphertexts, &mut out, &mut report)?;

        report.total_time = start.elapsed();
        Ok((out, report))
    }
}
