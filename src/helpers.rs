use url::Url;

/// Joins a remote directory and an entry name with `/`. Absolute names stand on their own.
pub fn join_remote_path(directory: &str, name: &str) -> String {
    if name.starts_with('/') {
        return name.to_string();
    }
    if directory.is_empty() {
        return format!("/{}", name);
    }
    if directory.ends_with('/') {
        format!("{}{}", directory, name)
    } else {
        format!("{}/{}", directory, name)
    }
}

/// `ftp://host:port/`, the base every entry locator is built on.
pub fn locator_base(host: &str, port: u16) -> Result<Url, url::ParseError> {
    // IPv6 literals need brackets in a URL authority
    let authority = if host.contains(':') && !host.starts_with('[') {
        format!("[{}]:{}", host, port)
    } else {
        format!("{}:{}", host, port)
    };
    Url::parse(&format!("ftp://{}/", authority))
}
