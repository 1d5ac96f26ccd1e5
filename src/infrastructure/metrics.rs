// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use metrics::{counter, describe_counter};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing::info;

use crate::config::settings::MetricsSettings;

pub const LOGINS_TOTAL: &str = "xtaze_logins_total";
pub const PLAYS_TOTAL: &str = "xtaze_plays_total";
pub const CHECKOUTS_TOTAL: &str = "xtaze_checkouts_total";
pub const PAYOUTS_TOTAL: &str = "xtaze_payouts_total";
pub const WEBHOOKS_TOTAL: &str = "xtaze_webhooks_total";

pub fn init_metrics(settings: &MetricsSettings) {
    if !settings.enabled {
        info!("Metrics exporter disabled");
        return;
    }

    let addr: SocketAddr = match settings.listen_addr.parse() {
        Ok(addr) => addr,
        Err(e) => {
            tracing::warn!("Invalid metrics address {}: {}", settings.listen_addr, e);
            return;
        }
    };

    // Ignore error if address is already in use (for development/testing)
    if let Err(e) = PrometheusBuilder::new().with_http_listener(addr).install() {
        tracing::warn!(
            "Failed to install Prometheus recorder: {}. This might happen if the port is already in use.",
            e
        );
        return;
    }

    describe_counter!(LOGINS_TOTAL, "Successful logins by role");
    describe_counter!(PLAYS_TOTAL, "Recorded track plays");
    describe_counter!(CHECKOUTS_TOTAL, "Subscription checkout sessions created");
    describe_counter!(PAYOUTS_TOTAL, "Artist payout sessions created");
    describe_counter!(WEBHOOKS_TOTAL, "Verified payment webhook events by type");

    info!("Metrics exporter listening on {}", addr);
}

pub fn record_login(role: &str) {
    counter!(LOGINS_TOTAL, "role" => role.to_string()).increment(1);
}

pub fn record_play() {
    counter!(PLAYS_TOTAL).increment(1);
}

pub fn record_checkout() {
    counter!(CHECKOUTS_TOTAL).increment(1);
}

pub fn record_payout() {
    counter!(PAYOUTS_TOTAL).increment(1);
}

pub fn record_webhook(event_type: &str) {
    counter!(WEBHOOKS_TOTAL, "type" => event_type.to_string()).increment(1);
}
