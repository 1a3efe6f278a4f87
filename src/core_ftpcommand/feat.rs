use crate::core_error::{FtpError, FtpResult};
use crate::core_ftpcommand::ftpcommand::FtpCommand;
use crate::session::{check_response, ControlSession};
use log::{debug, info};

/// One line of the FEAT block, e.g. `MLST` with options `type*;size*;modify*;`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureRecord {
    pub feature: String,
    pub options: String,
}

/// The block is complete once its last line is a final `211 ` line, which
/// covers both `211 End` and a single-line reply without features.
fn is_complete(response: &str) -> bool {
    response
        .trim_end()
        .lines()
        .last()
        .is_some_and(|line| line.starts_with("211 "))
}

/// Parses the body lines of a complete FEAT reply, first and last lines excluded.
pub fn parse_features(response: &str) -> Vec<FeatureRecord> {
    let lines: Vec<&str> = response.trim_end().lines().collect();
    if lines.len() < 3 {
        return Vec::new();
    }

    lines[1..lines.len() - 1]
        .iter()
        .copied()
        .map(|line| line.strip_prefix("211-").unwrap_or(line).trim())
        .filter(|line| !line.is_empty())
        .map(|line| match line.split_once(' ') {
            Some((feature, options)) => FeatureRecord {
                feature: feature.to_string(),
                options: options.trim().to_string(),
            },
            None => FeatureRecord {
                feature: line.to_string(),
                options: String::new(),
            },
        })
        .collect()
}

/// Sends FEAT and collects the capability block.
pub async fn feature_list(session: &mut ControlSession) -> FtpResult<Vec<FeatureRecord>> {
    let mut response = session.query(&FtpCommand::Feat).await?;
    check_response(&response, &[211], "FEAT")?;

    while !is_complete(&response) {
        let more = session.read().await?;
        if more.is_empty() {
            return Err(FtpError::parse("FEAT reply", response.trim_end()));
        }
        response.push_str(&more);
    }

    let features = parse_features(&response);
    for record in &features {
        debug!("Server feature: {} {}", record.feature, record.options);
    }
    info!("Server advertises {} features", features.len());
    Ok(features)
}
