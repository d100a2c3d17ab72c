use anyhow::{Context, Result};
use std::io::Read;

/// Loads upload bytes from a local path, `-` for stdin, or an HTTP(S) URL.
#[tracing::instrument]
pub fn load_source(source: &str) -> Result<Vec<u8>> {
    let bytes = if source == "-" {
        let mut buf = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buf)
            .context("Failed to read CSV from stdin")?;
        buf
    } else if is_url(source) {
        fetch_bytes(source)?
    } else {
        std::fs::read(source).with_context(|| format!("Failed to read {}", source))?
    };
    Ok(bytes)
}

pub fn fetch_bytes(url: &str) -> Result<Vec<u8>> {
    let resp = reqwest::blocking::get(url)
        .and_then(|r| r.error_for_status())
        .with_context(|| format!("Failed to fetch {}", url))?;
    let bytes = resp
        .bytes()
        .with_context(|| format!("Failed to read response body from {}", url))?;
    Ok(bytes.to_vec())
}

fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    #[test]
    fn test_is_url() {
        assert!(is_url("https://example.com/companies.csv"));
        assert!(is_url("http://localhost:8080/a.csv"));
        assert!(!is_url("httpdocs/companies.csv"));
        assert!(!is_url("companies.csv"));
    }

    #[test]
    fn test_load_source_reads_file() {
        let path = env::temp_dir().join("company_analyzer_test_source.csv");
        fs::write(&path, "company_name,focus,sector,region,size\n").unwrap();

        let bytes = load_source(path.to_str().unwrap()).unwrap();

        assert_eq!(bytes, b"company_name,focus,sector,region,size\n");
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_fetch_error_names_the_url() {
        // nothing listens on port 9 locally, so the connection is refused
        let err = fetch_bytes("http://127.0.0.1:9/companies.csv").unwrap_err();

        let message = err.to_string();
        assert!(message.contains("Failed to fetch http://127.0.0.1:9/companies.csv"));
    }

    #[test]
    fn test_load_source_missing_file() {
        let result = load_source("/definitely/not/here/companies.csv");
        assert!(result.is_err());
    }
}
