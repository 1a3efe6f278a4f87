use crate::constants::{DEFAULT_DIRECTORY, DEFAULT_PORT};
use anyhow::{anyhow, bail, Context, Result};
use percent_encoding::percent_decode_str;
use url::Url;

/// Where to connect and what to list, as given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub host: String,
    pub port: u16,
    pub directory: String,
    pub username: Option<String>,
    pub password: Option<String>,
}

fn decode(component: &str, what: &str) -> Result<String> {
    percent_decode_str(component)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .with_context(|| format!("Invalid percent-encoding in {}", what))
}

impl Target {
    /// Decomposes `ftp://[user[:password]@]host[:port][/directory]`. The
    /// scheme may be omitted.
    pub fn parse(input: &str) -> Result<Self> {
        let with_scheme = if input.contains("://") {
            input.to_string()
        } else {
            format!("ftp://{}", input)
        };
        let url = Url::parse(&with_scheme).with_context(|| format!("Invalid target: {}", input))?;

        if url.scheme() != "ftp" {
            bail!("Unsupported scheme {:?}, only ftp:// is supported", url.scheme());
        }

        let host = url
            .host_str()
            .ok_or_else(|| anyhow!("Target has no host: {}", input))?
            .trim_start_matches('[')
            .trim_end_matches(']')
            .to_string();

        let username = match url.username() {
            "" => None,
            name => Some(decode(name, "user name")?),
        };
        let password = url
            .password()
            .map(|password| decode(password, "password"))
            .transpose()?;

        let directory = match decode(url.path(), "path")? {
            path if path.is_empty() => DEFAULT_DIRECTORY.to_string(),
            path => path,
        };

        Ok(Self {
            host,
            port: url.port().unwrap_or(DEFAULT_PORT),
            directory,
            username,
            password,
        })
    }
}
