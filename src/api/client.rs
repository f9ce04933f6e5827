use crate::config::Config;
use crate::error::AppError;
use governor::{Quota, RateLimiter, state::{InMemoryState, NotKeyed}, clock::{Clock, DefaultClock}};
use std::error::Error as _;
use std::io;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::thread;
use tracing::trace;

use super::endpoints::{self, ALL_GAME_DATA_PATH, EVENT_DATA_PATH};
use super::models::*;
use super::LiveDataSource;

// Shared by both polling loops; only reached when intervals are configured very low.
const MAX_REQUESTS_PER_SECOND: u32 = 10;

pub struct LiveClientApi {
    config: Config,
    agent: ureq::Agent,
    rate_limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
    clock: DefaultClock,
}

impl LiveClientApi {
    pub fn new(config: Config) -> Result<Self, AppError> {
        // The game serves a self-signed certificate on loopback.
        let tls = native_tls::TlsConnector::builder()
            .danger_accept_invalid_certs(true)
            .danger_accept_invalid_hostnames(true)
            .build()
            .map_err(|e| AppError::ConfigError(format!("TLS setup failed: {}", e)))?;

        let agent = ureq::AgentBuilder::new()
            .tls_connector(Arc::new(tls))
            .timeout(config.request_timeout)
            .user_agent("league_live/0.1.0")
            .build();

        let per_second = NonZeroU32::new(MAX_REQUESTS_PER_SECOND).unwrap_or(NonZeroU32::MIN);
        let rate_limiter = RateLimiter::direct(Quota::per_second(per_second));

        Ok(LiveClientApi {
            config,
            agent,
            rate_limiter,
            clock: DefaultClock::default(),
        })
    }

    fn wait_for_slot(&self) {
        while let Err(not_until) = self.rate_limiter.check() {
            thread::sleep(not_until.wait_time_from(self.clock.now()));
        }
    }

    fn execute_request(&self, path: &str) -> Result<String, AppError> {
        self.wait_for_slot();

        let url = endpoints::url(&self.config.base_url, path);
        trace!(%url, "GET");

        match self.agent.get(&url).call() {
            Ok(resp) => resp
                .into_string()
                .map_err(|e| AppError::Network(e.to_string())),
            Err(ureq::Error::Status(code, _)) => Err(AppError::HttpStatus(code)),
            Err(ureq::Error::Transport(transport)) => Err(classify_transport(&transport)),
        }
    }
}

// Only a refused connection means the game client is gone; timeouts and
// unreachable hosts are retried.
fn classify_transport(transport: &ureq::Transport) -> AppError {
    let refused = transport.kind() == ureq::ErrorKind::ConnectionFailed
        && transport
            .source()
            .and_then(|source| source.downcast_ref::<io::Error>())
            .is_some_and(|e| e.kind() == io::ErrorKind::ConnectionRefused);

    if refused {
        AppError::Disconnected
    } else {
        AppError::Network(transport.to_string())
    }
}

impl LiveDataSource for LiveClientApi {
    fn all_game_data(&self) -> Result<AllGameData, AppError> {
        let body = self.execute_request(ALL_GAME_DATA_PATH)?;
        parse_all_game_data(&body)
    }

    fn event_data(&self) -> Result<EventData, AppError> {
        let body = self.execute_request(EVENT_DATA_PATH)?;
        parse_event_data(&body)
    }
}
