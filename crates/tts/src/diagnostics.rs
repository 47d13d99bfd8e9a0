use std::{
    future::Future,
    net::SocketAddr,
    time::{Duration, Instant},
};

use serde::{Deserialize, Serialize};
use tokio::net::{TcpStream, lookup_host};
use url::Url;

use crate::{server::Server, spool::AudioSpool};

/// Outcome of one probe stage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeResult {
    pub ok: bool,
    pub detail: String,
    pub elapsed_ms: u64,
}

impl ProbeResult {
    fn skipped(reason: &str) -> Self {
        Self {
            ok: false,
            detail: format!("skipped: {reason}"),
            elapsed_ms: 0,
        }
    }
}

/// Reachability report for the speech engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosticsReport {
    pub dns: ProbeResult,
    pub tcp: ProbeResult,
    pub synthesis: ProbeResult,
}

impl DiagnosticsReport {
    pub const fn healthy(&self) -> bool {
        self.dns.ok && self.tcp.ok && self.synthesis.ok
    }
}

/// Run `stage` under `deadline`, timing it
async fn timed<T, F>(deadline: Duration, stage: F) -> (Result<T, String>, u64)
where
    F: Future<Output = Result<T, String>>,
{
    let started = Instant::now();
    let result = tokio::time::timeout(deadline, stage)
        .await
        .unwrap_or_else(|_| Err(format!("timed out after {}ms", deadline.as_millis())));

    let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    (result, elapsed_ms)
}

fn endpoint_authority(endpoint: &str) -> Result<(String, u16), String> {
    let url = Url::parse(endpoint).map_err(|e| format!("invalid endpoint '{endpoint}': {e}"))?;
    let host = url
        .host_str()
        .ok_or_else(|| format!("endpoint '{endpoint}' has no host"))?
        .to_owned();
    let port = url
        .port_or_known_default()
        .ok_or_else(|| format!("endpoint '{endpoint}' has no port"))?;

    Ok((host, port))
}

impl Server {
    /// Probe DNS, TCP and an end-to-end synthesis against the speech engine
    ///
    /// Storage and the catalog are never touched.
    pub async fn diagnose(&self) -> DiagnosticsReport {
        let config = self.diagnostics_config();
        let deadline = config.timeout();
        let endpoint = self.synthesizer().endpoint().to_owned();

        let (resolved, elapsed_ms) = timed(deadline, async {
            let (host, port) = endpoint_authority(&endpoint)?;
            let addrs: Vec<SocketAddr> = lookup_host((host.as_str(), port))
                .await
                .map_err(|e| format!("failed to resolve {host}: {e}"))?
                .collect();

            if addrs.is_empty() {
                return Err(format!("{host} resolved to no addresses"));
            }
            Ok(addrs)
        })
        .await;

        let dns = match &resolved {
            Ok(addrs) => ProbeResult {
                ok: true,
                detail: addrs.iter().map(ToString::to_string).collect::<Vec<_>>().join(", "),
                elapsed_ms,
            },
            Err(detail) => ProbeResult {
                ok: false,
                detail: detail.clone(),
                elapsed_ms,
            },
        };

        let tcp = match &resolved {
            Ok(addrs) => {
                let (connected, elapsed_ms) = timed(deadline, async {
                    let stream = TcpStream::connect(&addrs[..])
                        .await
                        .map_err(|e| format!("connect failed: {e}"))?;
                    stream.peer_addr().map_err(|e| e.to_string())
                })
                .await;

                match connected {
                    Ok(peer) => ProbeResult {
                        ok: true,
                        detail: format!("connected to {peer}"),
                        elapsed_ms,
                    },
                    Err(detail) => ProbeResult {
                        ok: false,
                        detail,
                        elapsed_ms,
                    },
                }
            }
            Err(_) => ProbeResult::skipped("DNS resolution failed"),
        };

        let synthesis = if tcp.ok {
            self.smoke_synthesis(deadline).await
        } else {
            ProbeResult::skipped("TCP connect failed")
        };

        let report = DiagnosticsReport { dns, tcp, synthesis };
        tracing::info!(
            dns = report.dns.ok,
            tcp = report.tcp.ok,
            synthesis = report.synthesis.ok,
            "diagnostics complete"
        );

        report
    }

    async fn smoke_synthesis(&self, deadline: Duration) -> ProbeResult {
        let config = self.diagnostics_config();
        let voice = self.voices().default_voice();
        let scratch_dir = self.orchestrator().scratch_dir();

        let (produced, elapsed_ms) = timed(deadline, async {
            let mut spool = AudioSpool::create(scratch_dir).map_err(|e| format!("spool: {e}"))?;
            self.synthesizer()
                .synthesize(&config.probe_text, voice, &mut spool)
                .await
                .map_err(|e| e.to_string())?;
            Ok(spool.len())
        })
        .await;

        match produced {
            Ok(bytes) => ProbeResult {
                ok: true,
                detail: format!("{bytes} bytes of audio with {voice}"),
                elapsed_ms,
            },
            Err(detail) => ProbeResult {
                ok: false,
                detail,
                elapsed_ms,
            },
        }
    }
}
