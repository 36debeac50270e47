use log::info;
use std::time::Duration;

/// Measurements of one protocol run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClientReport {
    pub pack_time: Duration,
    pub enc_time: Duration,
    pub dec_time: Duration,
    pub unpack_time: Duration,
    pub total_time: Duration,
    /// Evaluation time reported by the server.
    pub server_eval_time: Duration,
    pub ctx_sent: usize,
    pub ctx_recv: usize,
    /// False if any received ciphertext failed the correctness check.
    pub decryption_ok: bool,
}

/// Accumulates reports over several runs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClientStats {
    pub runs: usize,
    pub failures: usize,
    pub pack_time: Duration,
    pub enc_time: Duration,
    pub dec_time: Duration,
    pub unpack_time: Duration,
    pub total_time: Duration,
    pub server_eval_time: Duration,
    pub ctx_sent: usize,
    pub ctx_recv: usize,
}

impl ClientStats {
    pub fn record(&mut self, report: &ClientReport) {
        self.runs += 1;
        if !report.decryption_ok {
            self.failures += 1;
        }
        self.pack_time += report.pack_time;
        self.enc_time += report.enc_time;
        self.dec_time += report.dec_time;
        self.unpack_time += report.unpack_time;
        self.total_time += report.total_time;
        self.server_eval_time += report.server_eval_time;
        self.ctx_sent += report.ctx_sent;
        self.ctx_recv += report.ctx_recv;
    }

    /// Returns the average of `total` over the recorded runs.
    pub fn average(&self, total: Duration) -> Duration {
        match u32::try_from(self.runs) {
            Ok(0) | Err(_) => Duration::ZERO,
            Ok(runs) => total / runs,
        }
    }

    pub fn log_summary(&self) {
        info!(
            "runs={} failures={} pack={:?} enc={:?} dec={:?} unpack={:?} server={:?} total={:?} (averages)",
            self.runs,
            self.failures,
            self.average(self.pack_time),
            self.average(self.enc_time),
            self.average(self.dec_time),
            self.average(self.unpack_time),
            self.average(self.server_eval_time),
            self.average(self.total_time),
        );
        info!(
            "ciphertexts sent={} received={} (per run)",
            self.ctx_sent / self.runs.max(1),
            self.ctx_recv / self.runs.max(1)
        );
    }
}
