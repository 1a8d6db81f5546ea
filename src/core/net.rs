// src/core/net.rs

// Blocking HTTPS GET. The schedule site only serves TLS, so this rides
// on ureq instead of a raw TcpStream; still no async runtime anywhere.

use std::time::Duration;

use crate::params::USER_AGENT;

pub fn http_get(url: &str) -> Result<String, Box<dyn std::error::Error>> {
    let agent = ureq::AgentBuilder::new()
        .timeout_connect(Duration::from_secs(15))
        .timeout(Duration::from_secs(30))
        .build();

    let resp = agent
        .get(url)
        .set("User-Agent", USER_AGENT)
        .call()?;

    Ok(resp.into_string()?)
}
